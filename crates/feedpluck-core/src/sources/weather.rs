//! US National Weather Service API (api.weather.gov).

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::http_client::HttpClient;
use crate::json::JsonValue;
use crate::pluck::{locate, pluck, Path};
use crate::sources::Fetcher;
use crate::table::{project, Projection, RowError};
use crate::{ApiError, ClientConfig, ForecastRow, RequestDescriptor, RequestError};

const ACCEPT: &str = "application/geo+json";

/// Validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, RequestError> {
        Ok(Self {
            lat: check_range("latitude", lat, 90.0)?,
            lon: check_range("longitude", lon, 180.0)?,
        })
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lon(self) -> f64 {
        self.lon
    }

    /// `lat,lon` with at most four decimals, the precision the points endpoint accepts.
    pub fn to_segment(self) -> String {
        format!("{},{}", format_degrees(self.lat), format_degrees(self.lon))
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_segment())
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<f64, RequestError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(RequestError::CoordinateOutOfRange {
            field,
            value,
            min: -limit,
            max: limit,
        })
    }
}

fn format_degrees(value: f64) -> String {
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => String::from("0"),
        other => other.to_owned(),
    }
}

/// Typed forecast rows plus the periods that could not be read.
pub fn forecast_rows(projection: Projection) -> (Vec<ForecastRow>, Vec<RowError>) {
    let mut rows = Vec::with_capacity(projection.len());
    let mut errors = Vec::new();

    for (index, outcome) in projection.into_outcomes().into_iter().enumerate() {
        match outcome.and_then(|row| ForecastRow::from_row(index, &row)) {
            Ok(row) => rows.push(row),
            Err(error) => errors.push(error),
        }
    }

    (rows, errors)
}

/// Client for the points lookup and hourly forecast endpoints.
#[derive(Clone)]
pub struct WeatherClient {
    fetcher: Fetcher,
    base: String,
}

impl WeatherClient {
    pub fn new(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        Self {
            fetcher: Fetcher::new(http, config),
            base: config.weather_base.clone(),
        }
    }

    /// `{base}/points/{lat},{lon}`
    pub fn points_request(&self, coordinates: Coordinates) -> Result<RequestDescriptor, RequestError> {
        RequestDescriptor::build(
            &self.base,
            ["points", coordinates.to_segment().as_str()],
            None,
        )
    }

    /// `properties.forecastHourly` of the points lookup.
    pub async fn forecast_hourly_url(&self, coordinates: Coordinates) -> Result<String, ApiError> {
        let descriptor = self.points_request(coordinates)?;
        let document = self.fetcher.get_json(&descriptor, ACCEPT).await?;

        let path = Path::root().key("properties").key("forecastHourly");
        pluck(&document, &path, String::new())
            .found()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ApiError::MissingField {
                path: path.to_string(),
                url: descriptor.to_string(),
            })
    }

    /// `properties.periods` of an hourly forecast, projected into rows.
    pub async fn hourly_forecast(&self, forecast_url: &str) -> Result<Projection, ApiError> {
        let descriptor = RequestDescriptor::new(forecast_url)?;
        let document = self.fetcher.get_json(&descriptor, ACCEPT).await?;

        let path = Path::root().key("properties").key("periods");
        let periods = locate(&document, &path)
            .and_then(JsonValue::as_array)
            .ok_or_else(|| ApiError::MissingField {
                path: path.to_string(),
                url: descriptor.to_string(),
            })?;

        let projection = project(periods, &ForecastRow::table_spec());
        let failed = projection.errors().count();
        if failed > 0 {
            tracing::warn!(url = %descriptor, failed, total = projection.len(), "forecast periods failed to parse");
        }
        Ok(projection)
    }

    /// Points lookup followed by the hourly forecast it links to.
    pub async fn hourly_forecast_for(&self, coordinates: Coordinates) -> Result<Projection, ApiError> {
        let forecast_url = self.forecast_hourly_url(coordinates).await?;
        tracing::debug!(%coordinates, %forecast_url, "resolved hourly forecast");
        self.hourly_forecast(&forecast_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::FixtureHttpClient;

    #[test]
    fn coordinates_render_with_four_decimals_at_most() {
        let coordinates = Coordinates::new(39.745_612, -97.089_2).expect("valid");
        assert_eq!(coordinates.to_segment(), "39.7456,-97.0892");

        let whole = Coordinates::new(40.0, -0.000_01).expect("valid");
        assert_eq!(whole.to_segment(), "40,0");
    }

    #[test]
    fn coordinates_outside_the_globe_are_rejected() {
        assert!(matches!(
            Coordinates::new(91.0, 0.0),
            Err(RequestError::CoordinateOutOfRange { field: "latitude", .. })
        ));
        assert!(matches!(
            Coordinates::new(0.0, f64::NAN),
            Err(RequestError::CoordinateOutOfRange { field: "longitude", .. })
        ));
    }

    #[test]
    fn points_request_keeps_comma_readable() {
        let client = WeatherClient::new(Arc::new(FixtureHttpClient::new()), &ClientConfig::default());
        let descriptor = client
            .points_request(Coordinates::new(39.7456, -97.0892).expect("valid"))
            .expect("valid request");

        assert_eq!(
            descriptor.to_string(),
            "https://api.weather.gov/points/39.7456,-97.0892"
        );
    }
}
