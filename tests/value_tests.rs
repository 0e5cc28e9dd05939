use gridsheet::state::value::{self, CellValue, ColumnType, Status};

#[test]
fn test_url_prefix_added_when_missing() {
    assert_eq!(
        value::ensure_url_protocol("example.com"),
        "https://example.com"
    );
}

#[test]
fn test_url_prefix_idempotent() {
    assert_eq!(value::ensure_url_protocol("https://x"), "https://x");
    assert_eq!(value::ensure_url_protocol("http://x"), "http://x");
    assert_eq!(value::ensure_url_protocol("HTTPS://X.COM"), "HTTPS://X.COM");
}

#[test]
fn test_url_prefix_skips_empty() {
    assert_eq!(value::ensure_url_protocol(""), "");
    assert_eq!(value::ensure_url_protocol("   "), "   ");
}

#[test]
fn test_strip_url_protocol() {
    assert_eq!(value::strip_url_protocol("https://example.com"), "example.com");
    assert_eq!(value::strip_url_protocol("http://example.com"), "example.com");
    assert_eq!(value::strip_url_protocol("HTTP://example.com"), "example.com");
    assert_eq!(value::strip_url_protocol("example.com"), "example.com");
}

#[test]
fn test_coerce_text_is_identity() {
    assert_eq!(
        value::coerce_commit(ColumnType::Text, "  hello  "),
        Some(CellValue::Text("  hello  ".to_string()))
    );
}

#[test]
fn test_coerce_empty_is_null_for_every_type() {
    for ty in ColumnType::all().iter().copied() {
        assert_eq!(value::coerce_commit(ty, ""), Some(CellValue::Null));
    }
}

#[test]
fn test_coerce_number_parses() {
    assert_eq!(
        value::coerce_commit(ColumnType::Number, "42"),
        Some(CellValue::Number(42.0))
    );
    assert_eq!(
        value::coerce_commit(ColumnType::Number, " 3.5 "),
        Some(CellValue::Number(3.5))
    );
}

#[test]
fn test_coerce_number_degrades_to_text() {
    assert_eq!(
        value::coerce_commit(ColumnType::Number, "not a number"),
        Some(CellValue::Text("not a number".to_string()))
    );
}

#[test]
fn test_coerce_url_prefixes_on_commit() {
    assert_eq!(
        value::coerce_commit(ColumnType::Url, "example.com"),
        Some(CellValue::Text("https://example.com".to_string()))
    );
    assert_eq!(
        value::coerce_commit(ColumnType::Url, "https://example.com"),
        Some(CellValue::Text("https://example.com".to_string()))
    );
}

#[test]
fn test_coerce_status_accepts_known_tokens() {
    assert_eq!(
        value::coerce_commit(ColumnType::Status, "in-process"),
        Some(CellValue::Status(Status::InProcess))
    );
    assert_eq!(
        value::coerce_commit(ColumnType::Status, "Need to start"),
        Some(CellValue::Status(Status::NeedToStart))
    );
    assert_eq!(
        value::coerce_commit(ColumnType::Status, "Blocked"),
        Some(CellValue::Status(Status::Blocked))
    );
}

#[test]
fn test_coerce_status_rejects_free_text() {
    assert_eq!(value::coerce_commit(ColumnType::Status, "whenever"), None);
}

#[test]
fn test_coerce_custom_applies_no_transformation() {
    assert_eq!(
        value::coerce_commit(ColumnType::Custom, "raw payload"),
        Some(CellValue::Text("raw payload".to_string()))
    );
}

#[test]
fn test_status_parse_variants() {
    assert_eq!(Status::parse("not-set"), Some(Status::NotSet));
    assert_eq!(Status::parse("Not set"), Some(Status::NotSet));
    assert_eq!(Status::parse("IN-PROCESS"), Some(Status::InProcess));
    assert_eq!(Status::parse("In-process"), Some(Status::InProcess));
    assert_eq!(Status::parse("complete"), Some(Status::Complete));
    assert_eq!(Status::parse("done"), None);
}

#[test]
fn test_display_date_formats_iso() {
    let stored = CellValue::Text("2024-12-11".to_string());
    assert_eq!(
        value::display_value(ColumnType::Date, &stored),
        "12/11/2024"
    );
}

#[test]
fn test_display_date_falls_back_to_raw() {
    let stored = CellValue::Text("next tuesday".to_string());
    assert_eq!(
        value::display_value(ColumnType::Date, &stored),
        "next tuesday"
    );
}

#[test]
fn test_display_number_has_no_trailing_fraction() {
    assert_eq!(
        value::display_value(ColumnType::Number, &CellValue::Number(6200000.0)),
        "6200000"
    );
    assert_eq!(
        value::display_value(ColumnType::Number, &CellValue::Number(3.5)),
        "3.5"
    );
}

#[test]
fn test_raw_string_round_trips_status() {
    assert_eq!(
        CellValue::Status(Status::NeedToStart).raw_string(),
        "need-to-start"
    );
    assert_eq!(CellValue::Null.raw_string(), "");
}

#[test]
fn test_cell_value_is_empty() {
    assert!(CellValue::Null.is_empty());
    assert!(CellValue::Text(String::new()).is_empty());
    assert!(!CellValue::Text("x".to_string()).is_empty());
    assert!(!CellValue::Number(0.0).is_empty());
}
