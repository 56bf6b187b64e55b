use mxfinance_rs::{CellCall, CellFunction, MemoryStore, MxClient, functions};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    mxfinance_rs::init_tracing();

    // A token obtained elsewhere (e.g. a previous login persisted by another process).
    let token = std::env::var("MX_TOKEN")?;
    let client = MxClient::builder()
        .timeout(Duration::from_secs(10))
        .credential_store(Arc::new(MemoryStore::with_token(token)))
        .build()?;

    // A column of formulas, recalculated at once. Each cell is independent.
    let calls: Vec<CellCall> = ["AAPL", "MSFT", "NVDA", "TSLA", "AMZN"]
        .into_iter()
        .flat_map(|sym| {
            [
                CellCall::new(CellFunction::Ticker, sym).with_fields(["price", "sector"]),
                CellCall::new(CellFunction::Compliant, sym),
            ]
        })
        .collect();

    let results = functions::recalculate(&client, &calls).await;
    for (call, result) in calls.iter().zip(results) {
        let shown: Vec<String> = result
            .into_grid()
            .into_iter()
            .flatten()
            .map(|c| c.to_string())
            .collect();
        println!(
            "={}({}) -> {}",
            call.function.name(),
            call.entity,
            shown.join(", ")
        );
    }

    Ok(())
}
