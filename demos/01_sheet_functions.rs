use mxfinance_rs::{CellResult, FieldArg, MxClientBuilder, Session, functions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build a client from the environment (MX_API_BASE, MX_TIMEOUT_SECS, MX_CREDENTIALS=file).
    let client = MxClientBuilder::from_env().build()?;
    let session = Session::new(&client);

    // 2. Before logging in, every function answers with the same phrase and sends nothing.
    println!("{:?}", functions::ticker(&client, "AAPL", ["price"]).await);

    // 3. Log in with credentials from the environment.
    let username = std::env::var("MX_USERNAME")?;
    let password = std::env::var("MX_PASSWORD")?;
    let user = session.login(&username, &password).await?;
    println!("Logged in as {}", user.name);
    println!("{}", session.status_line().await);

    // 4. Field lookups. A 2D range is just a nested argument.
    let range = FieldArg::from(vec![vec!["price", "sector"], vec!["industry", "beta"]]);
    print_result("TICKER(AAPL, A1:B2)", functions::ticker(&client, "AAPL", [range]).await);
    print_result(
        "ISIN(US0378331005, price, sector)",
        functions::isin(&client, "US0378331005", ["price", "sector"]).await,
    );
    print_result("COMPLIANT(AAPL)", functions::compliant(&client, "AAPL").await);

    // 5. Log out; the token is gone from the store.
    session.logout()?;
    println!("{}", session.status_line().await);

    Ok(())
}

fn print_result(label: &str, result: CellResult) {
    println!("--- {label} ---");
    for row in result.into_grid() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("  {}", cells.join(" | "));
    }
}
