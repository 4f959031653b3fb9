use std::sync::Arc;

use feedpluck_core::{
    Annunciator, AnnunciatorDate, ClientConfig, HttpClient, MemberRef, ParliamentClient,
};
use serde_json::{json, Value};

use crate::cli::{AnnunciatorArgs, Chamber};
use crate::commands::Report;
use crate::error::CliError;

pub async fn run(
    args: &AnnunciatorArgs,
    http: Arc<dyn HttpClient>,
    config: &ClientConfig,
) -> Result<Report, CliError> {
    let annunciator = match args.chamber {
        Chamber::Commons => Annunciator::CommonsMain,
        Chamber::Lords => Annunciator::LordsMain,
    };
    let date: AnnunciatorDate = args.date.parse()?;
    let client = ParliamentClient::new(http, config);

    let member = client
        .member_on_annunciator(annunciator, date, args.slide, args.line)
        .await?;

    let mut warnings = Vec::new();
    let written_questions = match (&member, args.with_questions) {
        (Some(member), true) => Some(client.written_questions_total(member.id).await?),
        (None, true) => {
            warnings.push(String::from("no member on this line; skipped written questions"));
            None
        }
        (_, false) => None,
    };
    if member.is_none() {
        warnings.push(format!(
            "slides[{}].lines[{}] has no member",
            args.slide, args.line
        ));
    }

    let mut data = json!({
        "annunciator": annunciator.as_str(),
        "date": date.to_segment(),
        "slide": args.slide,
        "line": args.line,
        "member": member.as_ref().map_or(Value::Null, member_json),
    });
    if let (Some(total), Some(object)) = (written_questions, data.as_object_mut()) {
        object.insert(String::from("writtenQuestions"), json!(total));
    }

    Ok(Report::new(data).with_warnings(warnings))
}

fn member_json(member: &MemberRef) -> Value {
    json!({
        "id": member.id,
        "nameFullTitle": member.name_full_title,
    })
}
