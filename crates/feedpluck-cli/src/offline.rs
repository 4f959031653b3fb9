//! Fixture-backed executor for `--offline`.
//!
//! The directory holds a `routes.json` manifest mapping request URLs to file
//! names in the same directory; each file is served as a 200 response.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use feedpluck_core::{FixtureHttpClient, HttpResponse};

use crate::error::CliError;

pub const MANIFEST: &str = "routes.json";

pub fn load(dir: &Path) -> Result<FixtureHttpClient, CliError> {
    let manifest_path = dir.join(MANIFEST);
    let manifest = fs::read(&manifest_path).map_err(|error| {
        CliError::Fixture(format!("cannot read {}: {error}", manifest_path.display()))
    })?;
    let routes: BTreeMap<String, String> = serde_json::from_slice(&manifest)?;

    let mut client = FixtureHttpClient::new();
    for (url, file) in routes {
        let body_path = dir.join(&file);
        let body = fs::read(&body_path).map_err(|error| {
            CliError::Fixture(format!("cannot read {}: {error}", body_path.display()))
        })?;
        tracing::debug!(%url, file = %body_path.display(), "registered offline route");
        client = client.with_response(url, HttpResponse::new(200, body));
    }

    Ok(client)
}
