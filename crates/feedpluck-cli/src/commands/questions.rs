use std::sync::Arc;

use feedpluck_core::{ClientConfig, HttpClient, ParliamentClient};
use serde_json::json;

use crate::cli::QuestionsArgs;
use crate::commands::Report;
use crate::error::CliError;

pub async fn run(
    args: &QuestionsArgs,
    http: Arc<dyn HttpClient>,
    config: &ClientConfig,
) -> Result<Report, CliError> {
    let client = ParliamentClient::new(http, config);
    let total = client.written_questions_total(args.member_id).await?;

    Ok(Report::new(json!({
        "memberId": args.member_id,
        "totalResults": total,
    })))
}
