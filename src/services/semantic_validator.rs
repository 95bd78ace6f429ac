use crate::configuration::Strictness;
use crate::services::{BackendError, ModelBackend, SearchHit};

const NULL_REJECTION_LITERAL: &str = r#""valid_url":null"#;

/// Ask the model whether a reachable URL plausibly belongs to a real
/// company in the target industry. The backend is called exactly once;
/// classification of the raw response is a separate pure routine.
pub async fn validate_candidate(
    backend: &ModelBackend,
    hit: &SearchHit,
    industry: &str,
    strictness: Strictness,
) -> Result<bool, BackendError> {
    let prompt = build_validation_prompt(hit, industry);
    let raw = backend.generate(&prompt).await?;

    log::info!("Raw validation response for {}: {}", hit.url, raw);

    Ok(classify_response(&raw, strictness))
}

pub fn build_validation_prompt(hit: &SearchHit, industry: &str) -> String {
    format!(
        r#"Below is a Google search result:

Title: {}
Link: {}
Snippet: {}

Is this the official website of a real company in the {} industry? If yes, return the valid URL in this format:
{{"valid_url": "https://example.com"}}
If not, return:
{{"valid_url": null}}"#,
        hit.title.as_deref().unwrap_or(""),
        hit.url,
        hit.snippet.as_deref().unwrap_or(""),
        industry,
    )
}

/// Lenient mode rejects only an explicit null answer and accepts anything
/// else, so ambiguous output flows on to the costlier stages. Strict mode
/// flips that: only a parsable non-null `valid_url` accepts.
pub fn classify_response(raw: &str, strictness: Strictness) -> bool {
    match strictness {
        Strictness::Lenient => {
            let squashed: String = raw
                .to_lowercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            !squashed.contains(NULL_REJECTION_LITERAL)
        }
        Strictness::Strict => parse_valid_url(raw).is_some_and(|url| !url.is_empty()),
    }
}

fn parse_valid_url(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }

    let value: serde_json::Value = serde_json::from_str(&raw[start..=end]).ok()?;
    value
        .get("valid_url")?
        .as_str()
        .map(|url| url.to_string())
}

#[cfg(test)]
mod tests {
    use crate::configuration::Strictness;

    use super::classify_response;

    #[test]
    fn lenient_rejects_null_answers() {
        let rejections = [
            r#"{"valid_url": null}"#,
            r#"{"valid_url":null}"#,
            r#"{"VALID_URL": NULL}"#,
            "Sure, here is my answer:\n{\"valid_url\": null}\n",
            r#"{ "valid_url" : null }"#,
        ];

        for raw in rejections {
            assert!(
                !classify_response(raw, Strictness::Lenient),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn lenient_accepts_everything_else() {
        let acceptances = [
            r#"{"valid_url": "https://acme.example.com"}"#,
            "I could not decide, sorry.",
            "",
            "garbage {{{ not even json",
        ];

        for raw in acceptances {
            assert!(
                classify_response(raw, Strictness::Lenient),
                "{} should be accepted",
                raw
            );
        }
    }

    #[test]
    fn strict_requires_a_parsable_non_null_url() {
        assert!(classify_response(
            r#"Here you go: {"valid_url": "https://acme.example.com"} hope it helps"#,
            Strictness::Strict
        ));
        assert!(!classify_response(
            r#"{"valid_url": null}"#,
            Strictness::Strict
        ));
        assert!(!classify_response(
            r#"{"valid_url": ""}"#,
            Strictness::Strict
        ));
        assert!(!classify_response("I could not decide.", Strictness::Strict));
        assert!(!classify_response("", Strictness::Strict));
    }
}
