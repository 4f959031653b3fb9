use std::fs;
use std::io::Read;

use feedpluck_core::json::{decode, decode_str};
use feedpluck_core::{pluck_value, Path};
use serde_json::json;

use crate::cli::PluckArgs;
use crate::commands::Report;
use crate::error::CliError;

pub fn run(args: &PluckArgs) -> Result<Report, CliError> {
    let path: Path = args.path.parse()?;
    let default = decode_str(&args.default)?;
    let body = read_input(args)?;
    let document = decode(&body)?;

    let result = pluck_value(&document, &path, default);
    let found = result.is_found();

    Ok(Report::new(json!({
        "path": path.to_string(),
        "found": found,
        "value": result.into_inner(),
    })))
}

fn read_input(args: &PluckArgs) -> Result<Vec<u8>, CliError> {
    if args.input.as_os_str() == "-" {
        let mut body = Vec::new();
        std::io::stdin().read_to_end(&mut body)?;
        Ok(body)
    } else {
        Ok(fs::read(&args.input)?)
    }
}
