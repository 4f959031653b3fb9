use serde::{Deserialize, Serialize};

use crate::pluck::Path;
use crate::table::{Cell, Column, ColumnParser, Row, RowError, TableSpec};
use crate::Timestamp;

/// One hourly forecast period, ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRow {
    pub time: Timestamp,
    pub temperature: f64,
    pub precipitation_probability: Option<f64>,
    pub short_forecast: String,
}

impl ForecastRow {
    pub const TIME: &'static str = "time";
    pub const TEMPERATURE: &'static str = "temperature";
    pub const PRECIPITATION_PROBABILITY: &'static str = "precipitationProbability";
    pub const SHORT_FORECAST: &'static str = "shortForecast";

    /// Columns for an NWS forecast `periods` entry.
    pub fn table_spec() -> TableSpec {
        TableSpec::from_trusted(vec![
            Column::new(
                Self::TIME,
                Path::root().key("startTime"),
                ColumnParser::Timestamp,
            ),
            Column::new(
                Self::TEMPERATURE,
                Path::root().key("temperature"),
                ColumnParser::Number,
            ),
            Column::new(
                Self::PRECIPITATION_PROBABILITY,
                Path::root().key("probabilityOfPrecipitation").key("value"),
                ColumnParser::Number.nullable(),
            ),
            Column::new(
                Self::SHORT_FORECAST,
                Path::root().key("shortForecast"),
                ColumnParser::Text,
            )
            .with_default(serde_json::Value::String(String::new())),
        ])
    }

    /// Typed view of a row projected with [`ForecastRow::table_spec`].
    pub fn from_row(index: usize, row: &Row) -> Result<Self, RowError> {
        let cell = |column: &str| {
            row.get(column).ok_or_else(|| RowError {
                row: index,
                column: column.to_owned(),
                reason: String::from("column missing from row"),
            })
        };
        let mismatch = |column: &str, wanted: &str| RowError {
            row: index,
            column: column.to_owned(),
            reason: format!("expected {wanted} cell"),
        };

        let time = cell(Self::TIME)?
            .as_timestamp()
            .ok_or_else(|| mismatch(Self::TIME, "timestamp"))?;
        let temperature = cell(Self::TEMPERATURE)?
            .as_f64()
            .ok_or_else(|| mismatch(Self::TEMPERATURE, "number"))?;
        let precipitation_probability = match cell(Self::PRECIPITATION_PROBABILITY)? {
            Cell::Null => None,
            other => Some(
                other
                    .as_f64()
                    .ok_or_else(|| mismatch(Self::PRECIPITATION_PROBABILITY, "number"))?,
            ),
        };
        let short_forecast = cell(Self::SHORT_FORECAST)?
            .as_str()
            .ok_or_else(|| mismatch(Self::SHORT_FORECAST, "text"))?
            .to_owned();

        Ok(Self {
            time,
            temperature,
            precipitation_probability,
            short_forecast,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::table::project;

    #[test]
    fn typed_rows_follow_projected_cells() {
        let periods = vec![json!({
            "startTime": "2025-05-20T11:00:00-04:00",
            "temperature": 68,
            "probabilityOfPrecipitation": {"unitCode": "wmoUnit:percent", "value": 20},
            "shortForecast": "Mostly Sunny"
        })];

        let rows = project(&periods, &ForecastRow::table_spec())
            .into_complete()
            .expect("valid period");
        let typed = ForecastRow::from_row(0, &rows[0]).expect("typed row");

        assert_eq!(typed.time.format_rfc3339(), "2025-05-20T11:00:00-04:00");
        assert_eq!(typed.temperature, 68.0);
        assert_eq!(typed.precipitation_probability, Some(20.0));
        assert_eq!(typed.short_forecast, "Mostly Sunny");
    }

    #[test]
    fn missing_short_forecast_becomes_empty_text() {
        let periods = vec![json!({"startTime": "2025-05-20T15:00:00Z", "temperature": 70})];

        let rows = project(&periods, &ForecastRow::table_spec())
            .into_complete()
            .expect("valid period");
        let typed = ForecastRow::from_row(0, &rows[0]).expect("typed row");

        assert_eq!(typed.short_forecast, "");
        assert_eq!(typed.precipitation_probability, None);
    }
}
