use std::sync::Arc;

use feedpluck_core::sources::weather::forecast_rows;
use feedpluck_core::{ClientConfig, Coordinates, ForecastRow, HttpClient, WeatherClient};

use crate::cli::ForecastArgs;
use crate::commands::Report;
use crate::error::CliError;

pub async fn run(
    args: &ForecastArgs,
    http: Arc<dyn HttpClient>,
    config: &ClientConfig,
) -> Result<Report, CliError> {
    let coordinates = Coordinates::new(args.lat, args.lon)?;
    let client = WeatherClient::new(http, config);
    let projection = client.hourly_forecast_for(coordinates).await?;

    let (rows, warnings) = if args.skip_bad_rows {
        let (rows, errors) = forecast_rows(projection);
        let warnings = errors
            .iter()
            .map(|error| format!("skipped forecast period: {error}"))
            .collect();
        (rows, warnings)
    } else {
        let rows = projection
            .into_complete()?
            .iter()
            .enumerate()
            .map(|(index, row)| ForecastRow::from_row(index, row))
            .collect::<Result<Vec<_>, _>>()?;
        (rows, Vec::new())
    };

    Ok(Report::new(serde_json::to_value(rows)?).with_warnings(warnings))
}
