//! # Feedpluck Core
//!
//! Typed request building, JSON decoding and safe nested-field extraction for
//! public JSON APIs, with clients for the UK Parliament annunciator/members
//! APIs and the US National Weather Service hourly forecast.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Request builder ([`RequestDescriptor`]) |
//! | [`http_client`] | Executor contract, reqwest and fixture implementations |
//! | [`json`] | Response decoder |
//! | [`pluck`] | Safe path extraction ([`Path`], [`PluckResult`]) |
//! | [`table`] | Tabular projection of JSON records |
//! | [`sources`] | Parliament and weather clients |
//! | [`domain`] | Annunciator, member and forecast types |
//! | [`config`] | Endpoints, user agent and timeout |
//! | [`error`] | Error types |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use feedpluck_core::{ClientConfig, Coordinates, ReqwestHttpClient, WeatherClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_user_agent("my-app (me@example.org)");
//!     let http = Arc::new(ReqwestHttpClient::new(&config.user_agent));
//!     let weather = WeatherClient::new(http, &config);
//!
//!     let projection = weather
//!         .hourly_forecast_for(Coordinates::new(39.7456, -97.0892)?)
//!         .await?;
//!     for row in projection.rows() {
//!         println!("{:?}", row.get("temperature"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! RequestDescriptor ──▶ HttpClient ──▶ json::decode ──▶ pluck ──▶ scalar
//!                       (reqwest /                      │
//!                        fixture)                       └──▶ table::project ──▶ rows
//! ```
//!
//! ## Error Handling
//!
//! Request construction fails with [`RequestError`], transport with
//! [`HttpError`], decoding with [`DecodeError`]; source clients fold these
//! into [`ApiError`]. Extraction itself never fails: an unreachable path
//! yields the caller's default.

pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod json;
pub mod pluck;
pub mod request;
pub mod sources;
pub mod table;

// Configuration
pub use config::ClientConfig;

// Domain models
pub use domain::{Annunciator, AnnunciatorDate, ForecastRow, MemberRef, Timestamp};

// Error types
pub use error::{ApiError, DecodeError, DecodeErrorKind, RequestError, TableError};

// HTTP client types
pub use http_client::{
    FixtureHttpClient, HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

// Decoding
pub use json::{decode, JsonValue};

// Extraction
pub use pluck::{locate, pluck, pluck_value, Path, PathParseError, PathStep, Pluck, PluckResult};

// Request building
pub use request::RequestDescriptor;

// Source clients
pub use sources::{Coordinates, Fetcher, ParliamentClient, WeatherClient};

// Projection
pub use table::{project, Cell, Column, ColumnParser, Projection, Row, RowError, TableSpec};
