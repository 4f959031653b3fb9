//! UK Parliament annunciator and members APIs.

use std::sync::Arc;

use crate::http_client::HttpClient;
use crate::json::JsonValue;
use crate::pluck::{locate, pluck, Path};
use crate::sources::Fetcher;
use crate::{
    Annunciator, AnnunciatorDate, ApiError, ClientConfig, MemberRef, RequestDescriptor,
    RequestError,
};

const ACCEPT: &str = "application/json";

/// Placeholder name for a member line whose `nameFullTitle` is absent.
pub const NAME_NOT_FOUND: &str = "Value not found";

/// `slides[slide].lines[line]`
pub fn line_path(slide: usize, line: usize) -> Path {
    Path::root().key("slides").index(slide).key("lines").index(line)
}

/// Member shown on one line of an annunciator message.
///
/// `None` when the slide, the line, the member or its id is absent; a short
/// slide is not an error. A member without a name keeps [`NAME_NOT_FOUND`].
pub fn member_on_line(document: &JsonValue, slide: usize, line: usize) -> Option<MemberRef> {
    let member = line_path(slide, line).key("member");
    let id = pluck(document, &member.clone().key("id"), 0_u64).found()?;
    let name_full_title = pluck(
        document,
        &member.key("nameFullTitle"),
        String::from(NAME_NOT_FOUND),
    )
    .into_inner();

    Some(MemberRef {
        name_full_title,
        id,
    })
}

/// Every member on a slide, in line order, skipping lines without one.
pub fn slide_members(document: &JsonValue, slide: usize) -> Vec<MemberRef> {
    let lines = Path::root().key("slides").index(slide).key("lines");
    let count = locate(document, &lines)
        .and_then(JsonValue::as_array)
        .map_or(0, Vec::len);

    (0..count)
        .filter_map(|line| member_on_line(document, slide, line))
        .collect()
}

/// Client for the annunciator message and member written-question endpoints.
#[derive(Clone)]
pub struct ParliamentClient {
    fetcher: Fetcher,
    now_base: String,
    members_base: String,
}

impl ParliamentClient {
    pub fn new(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        Self {
            fetcher: Fetcher::new(http, config),
            now_base: config.parliament_now_base.clone(),
            members_base: config.parliament_members_base.clone(),
        }
    }

    /// `{now_base}/Message/message/{annunciator}/{date}`
    pub fn annunciator_request(
        &self,
        annunciator: Annunciator,
        date: AnnunciatorDate,
    ) -> Result<RequestDescriptor, RequestError> {
        RequestDescriptor::build(
            &self.now_base,
            ["Message/message", annunciator.as_str(), date.to_segment().as_str()],
            None,
        )
    }

    /// `{members_base}/Members/{id}/WrittenQuestions`
    pub fn written_questions_request(&self, member_id: u64) -> Result<RequestDescriptor, RequestError> {
        RequestDescriptor::build(
            &self.members_base,
            ["Members", member_id.to_string().as_str(), "WrittenQuestions"],
            None,
        )
    }

    /// The decoded annunciator message document.
    pub async fn annunciator(
        &self,
        annunciator: Annunciator,
        date: AnnunciatorDate,
    ) -> Result<JsonValue, ApiError> {
        let descriptor = self.annunciator_request(annunciator, date)?;
        self.fetcher.get_json(&descriptor, ACCEPT).await
    }

    /// Member on `slides[slide].lines[line]` of the selected message.
    pub async fn member_on_annunciator(
        &self,
        annunciator: Annunciator,
        date: AnnunciatorDate,
        slide: usize,
        line: usize,
    ) -> Result<Option<MemberRef>, ApiError> {
        let document = self.annunciator(annunciator, date).await?;
        let member = member_on_line(&document, slide, line);
        if member.is_none() {
            tracing::info!(%annunciator, slide, line, "no member on annunciator line");
        }
        Ok(member)
    }

    /// `totalResults` of the member's written questions.
    pub async fn written_questions_total(&self, member_id: u64) -> Result<u64, ApiError> {
        let descriptor = self.written_questions_request(member_id)?;
        let document = self.fetcher.get_json(&descriptor, ACCEPT).await?;

        let path = Path::root().key("totalResults");
        pluck(&document, &path, 0_u64)
            .found()
            .ok_or_else(|| ApiError::MissingField {
                path: path.to_string(),
                url: descriptor.to_string(),
            })
    }
}
