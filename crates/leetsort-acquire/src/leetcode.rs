use crate::normalize;
use anyhow::{Context, Result};
use leetsort_model::{Difficulty, FetchProvenance, ProblemDetails, ProblemRecord};
use serde::Deserialize;
use serde_json::json;

const GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const QUESTION_QUERY: &str = "\
query getQuestionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionFrontendId
    title
    difficulty
    content
  }
}";

/// A fetched problem: normalized details plus the raw HTML description,
/// kept so callers can archive the original page content.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub details: ProblemDetails,
    pub raw_html: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    question: Option<RawQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    question_frontend_id: String,
    title: String,
    difficulty: String,
    /// Null for paid-only problems.
    content: Option<String>,
}

/// Fetch metadata for one problem slug from the LeetCode GraphQL API.
///
/// Returns `Ok(None)` when the API answers with a non-success status or an
/// absent question record (unknown slug). Network and decode failures are
/// errors.
pub async fn fetch_problem(slug: &str) -> Result<Option<Fetched>> {
    let client = reqwest::Client::builder()
        .user_agent("leetsort/0.1 (solution archive tool)")
        .build()?;

    let body = json!({
        "query": QUESTION_QUERY,
        "variables": { "titleSlug": slug },
    });

    tracing::info!(slug, url = GRAPHQL_URL, "Fetching problem metadata");
    let response = client
        .post(GRAPHQL_URL)
        .header(
            reqwest::header::REFERER,
            format!("https://leetcode.com/problems/{slug}/"),
        )
        .json(&body)
        .send()
        .await
        .context("Failed to reach metadata API")?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(slug, status = %status, "Metadata request failed");
        return Ok(None);
    }

    let text = response
        .text()
        .await
        .context("Failed to read response body")?;

    let raw = match decode_question(&text)? {
        Some(raw) => raw,
        None => {
            tracing::warn!(slug, "No question record in API response");
            return Ok(None);
        }
    };

    let fetched = into_fetched(raw)?;
    tracing::info!(
        slug,
        id = %fetched.details.id,
        title = %fetched.details.title,
        difficulty = %fetched.details.difficulty,
        "Fetched problem metadata"
    );
    Ok(Some(fetched))
}

/// Wrap fetched details in a provenance-stamped record for on-disk caching.
pub fn build_record(slug: &str, details: ProblemDetails) -> ProblemRecord {
    ProblemRecord {
        source: FetchProvenance {
            url: format!("https://leetcode.com/problems/{slug}/"),
            slug: slug.to_string(),
            fetched_at: chrono::Utc::now(),
        },
        details,
    }
}

/// Decode the GraphQL response body. `Ok(None)` when the question is absent.
fn decode_question(body: &str) -> Result<Option<RawQuestion>> {
    let response: GraphQlResponse =
        serde_json::from_str(body).context("Failed to decode API response")?;
    Ok(response.data.and_then(|d| d.question))
}

fn into_fetched(raw: RawQuestion) -> Result<Fetched> {
    let difficulty: Difficulty = raw
        .difficulty
        .parse()
        .with_context(|| format!("Question '{}'", raw.question_frontend_id))?;

    let raw_html = raw.content.unwrap_or_default();
    let content = normalize::normalize(&raw_html);

    Ok(Fetched {
        details: ProblemDetails {
            id: raw.question_frontend_id,
            title: raw.title,
            difficulty,
            content,
        },
        raw_html,
    })
}
