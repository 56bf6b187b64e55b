use crate::common::{num, text};
use mxfinance_rs::projection::{FieldRequest, RemoteRecord, reduce};
use mxfinance_rs::{CellValue, MxError};

fn record(body: &str) -> RemoteRecord {
    RemoteRecord::from_body(body).unwrap()
}

fn fields(names: &[&str]) -> FieldRequest {
    names.iter().copied().collect()
}

#[test]
fn trailing_absent_null_or_empty_is_omitted() {
    for last in [r#""c": null"#, r#""c": """#, r#""z": 1"#] {
        let rec = record(&format!(r#"{{ "a": 1, "b": "two", {last} }}"#));
        let row = reduce(&rec, &fields(&["a", "b", "c"]));
        assert_eq!(row, vec![num(1), text("two")], "trailing case {last}");
    }
}

#[test]
fn same_gap_mid_row_becomes_unknown() {
    let rec = record(r#"{ "a": 1, "b": "two" }"#);
    let row = reduce(&rec, &fields(&["a", "c", "b"]));
    assert_eq!(row, vec![num(1), text("Unknown"), text("two")]);
}

#[test]
fn falsy_values_are_not_placeholders() {
    let rec = record(r#"{ "zero": 0, "no": false, "blank": "", "last": 5 }"#);
    let row = reduce(&rec, &fields(&["zero", "no", "blank", "last"]));
    assert_eq!(
        row,
        vec![num(0), CellValue::Bool(false), text(""), num(5)]
    );
}

#[test]
fn trailing_zero_and_false_are_kept() {
    let rec = record(r#"{ "a": 1, "zero": 0, "no": false }"#);
    assert_eq!(reduce(&rec, &fields(&["a", "zero"])), vec![num(1), num(0)]);
    assert_eq!(
        reduce(&rec, &fields(&["a", "no"])),
        vec![num(1), CellValue::Bool(false)]
    );
}

#[test]
fn only_the_final_position_is_ever_dropped() {
    let rec = record("{}");
    let row = reduce(&rec, &fields(&["a", "b", "c", "d"]));
    assert_eq!(row.len(), 3);
    assert!(row.iter().all(|c| c.as_text() == Some("Unknown")));
}

#[test]
fn single_missing_field_yields_empty_row() {
    let rec = record(r#"{ "a": 1 }"#);
    assert!(reduce(&rec, &fields(&["missing"])).is_empty());
    assert_eq!(reduce(&rec, &fields(&["a"])), vec![num(1)]);
}

#[test]
fn duplicates_and_empty_names_pass_through() {
    let rec = record(r#"{ "a": 1, "": "empty-key" }"#);
    let row = reduce(&rec, &fields(&["a", "", "a"]));
    assert_eq!(row, vec![num(1), text("empty-key"), num(1)]);
}

#[test]
fn nested_values_render_as_json_text() {
    let rec = record(r#"{ "tags": ["x", "y"], "last": 1 }"#);
    let row = reduce(&rec, &fields(&["tags", "last"]));
    assert_eq!(row, vec![text(r#"["x","y"]"#), num(1)]);
}

#[test]
fn non_object_body_has_no_fields() {
    let rec = record("[1, 2, 3]");
    assert!(rec.is_empty());
    let row = reduce(&rec, &fields(&["a", "b"]));
    assert_eq!(row, vec![text("Unknown")]);
}

#[test]
fn null_or_malformed_body_is_rejected() {
    assert!(matches!(
        RemoteRecord::from_body("null"),
        Err(MxError::Data(_))
    ));
    assert!(matches!(
        RemoteRecord::from_body("<html>oops</html>"),
        Err(MxError::Json(_))
    ));
}

#[test]
fn flattening_is_depth_first() {
    use mxfinance_rs::FieldArg;

    let nested = FieldRequest::from_args([
        FieldArg::from("a"),
        FieldArg::from(vec![vec!["b", "c"], vec!["d"]]),
        FieldArg::from("e"),
    ]);
    assert_eq!(nested.names(), ["a", "b", "c", "d", "e"]);
    assert_eq!(nested.joined(), "a,b,c,d,e");
    assert_eq!(FieldRequest::default().joined(), "");
}
