//! Behavior-driven tests for tabular projection
//!
//! These tests verify HOW forecast periods become plottable rows: order,
//! count, null handling and per-row failures.

use feedpluck_core::sources::weather::forecast_rows;
use feedpluck_core::{
    decode, locate, project, Cell, Column, ColumnParser, ForecastRow, JsonValue, Path, TableSpec,
};
use serde_json::json;

fn fixture_periods() -> Vec<JsonValue> {
    let document = decode(include_bytes!("fixtures/forecast_hourly.json")).expect("valid fixture");
    locate(&document, &"properties.periods".parse().expect("valid path"))
        .and_then(JsonValue::as_array)
        .cloned()
        .expect("fixture has periods")
}

// =============================================================================
// Projection: forecast periods
// =============================================================================

#[test]
fn two_periods_become_two_rows_in_order_with_null_precipitation() {
    // Given: Two forecast periods, the second without probabilityOfPrecipitation
    let periods = vec![
        json!({
            "startTime": "2025-05-20T10:00:00-05:00",
            "temperature": 68,
            "probabilityOfPrecipitation": {"value": 15},
            "shortForecast": "Partly Sunny"
        }),
        json!({
            "startTime": "2025-05-20T11:00:00-05:00",
            "temperature": 71,
            "shortForecast": "Mostly Sunny"
        }),
    ];

    // When: They are projected through the forecast table
    let rows = project(&periods, &ForecastRow::table_spec())
        .into_complete()
        .expect("both periods are readable");

    // Then: Two rows come back in input order
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("temperature"), Some(&Cell::Number(68.0)));
    assert_eq!(rows[1].get("temperature"), Some(&Cell::Number(71.0)));

    // And: The missing precipitation is a null column, not an error
    assert_eq!(rows[0].get("precipitationProbability"), Some(&Cell::Number(15.0)));
    assert_eq!(rows[1].get("precipitationProbability"), Some(&Cell::Null));
    assert_eq!(
        rows.iter()
            .map(|row| row.get("shortForecast").and_then(Cell::as_str))
            .collect::<Vec<_>>(),
        [Some("Partly Sunny"), Some("Mostly Sunny")]
    );
}

#[test]
fn outcome_count_always_matches_record_count() {
    let periods = fixture_periods();
    let projection = project(&periods, &ForecastRow::table_spec());

    assert_eq!(projection.len(), periods.len());
    assert_eq!(projection.rows().count() + projection.errors().count(), periods.len());
}

#[test]
fn unreadable_period_is_reported_without_dropping_the_others() {
    // Given: The fixture forecast, whose third period has a bad startTime
    let periods = fixture_periods();

    // When: The caller keeps readable rows and collects failures
    let (rows, errors) = forecast_rows(project(&periods, &ForecastRow::table_spec()));

    // Then: The two good periods survive in order
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].time.format_rfc3339(), "2025-05-20T10:00:00-05:00");
    assert_eq!(rows[1].precipitation_probability, None);

    // And: The bad one is named by position and column
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 2);
    assert_eq!(errors[0].column, "time");
}

#[test]
fn strict_callers_can_abort_on_the_first_bad_row() {
    let periods = fixture_periods();
    let error = project(&periods, &ForecastRow::table_spec())
        .into_complete()
        .expect_err("third period is unreadable");

    assert_eq!(error.row, 2);
    assert!(error.reason.contains("RFC3339"), "reason: {}", error.reason);
}

// =============================================================================
// Projection: custom tables
// =============================================================================

#[test]
fn custom_columns_project_annunciator_lines() {
    let document = decode(include_bytes!("fixtures/annunciator_lords.json")).expect("valid fixture");
    let lines = locate(&document, &"slides[0].lines".parse().expect("valid path"))
        .and_then(JsonValue::as_array)
        .cloned()
        .expect("fixture has lines");

    let spec = TableSpec::new(vec![
        Column::new("order", Path::root().key("displayOrder"), ColumnParser::Integer),
        Column::new(
            "memberId",
            Path::root().key("member").key("id"),
            ColumnParser::Integer.nullable(),
        ),
    ])
    .expect("valid spec");

    let rows = project(&lines, &spec).into_complete().expect("lines parse");
    assert_eq!(rows[0].get("memberId"), Some(&Cell::Null));
    assert_eq!(rows[1].get("memberId"), Some(&Cell::Integer(4321)));
    assert_eq!(rows[1].get("order"), Some(&Cell::Integer(2)));
}
