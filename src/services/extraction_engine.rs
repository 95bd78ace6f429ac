use crate::domain::CompanyRecord;
use crate::services::ModelBackend;

/// Tagged result of the best-effort JSON extraction over a model response.
#[derive(Debug, PartialEq)]
pub enum ParsedInfo {
    Parsed(CompanyRecord),
    Unparsed,
}

/// Prompt the model for the five-field company record and parse whatever
/// comes back. `None` means this URL produced no usable record and must be
/// skipped, never aborted on.
pub async fn extract_company_info(backend: &ModelBackend, text: &str) -> Option<CompanyRecord> {
    let prompt = build_extraction_prompt(text);

    let raw = match backend.generate(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("Model backend call failed during extraction: {}", e);
            return None;
        }
    };

    match extract_json_from_text(&raw) {
        ParsedInfo::Parsed(mut record) => {
            if record.is_empty() {
                log::warn!("Model found none of the requested fields");
                return None;
            }
            record.model_used = Some(backend.model_name().to_string());
            Some(record)
        }
        ParsedInfo::Unparsed => None,
    }
}

pub fn build_extraction_prompt(text: &str) -> String {
    format!(
        r#"You are an AI agent that extracts company contact and identification details from website content.

Given the following text from a company website, extract:
- Company Name
- Address (City and State if available)
- Phone Number
- Email Address
- Industry Category

Respond in the following JSON format:
{{
  "company_name": "...",
  "address": "...",
  "phone": "...",
  "email": "...",
  "category": "..."
}}

Here is the website text:
{}"#,
        text
    )
}

/// Best-effort JSON extraction: take the span from the first `{` to the
/// last `}` and require that span alone to be valid JSON. Responses with
/// stray braces in surrounding prose may widen the span past the object
/// and fail to parse; that is an accepted limitation.
pub fn extract_json_from_text(text: &str) -> ParsedInfo {
    let Some(start) = text.find('{') else {
        return ParsedInfo::Unparsed;
    };
    let Some(end) = text.rfind('}') else {
        return ParsedInfo::Unparsed;
    };
    if end < start {
        return ParsedInfo::Unparsed;
    }

    match serde_json::from_str::<CompanyRecord>(&text[start..=end]) {
        Ok(record) => ParsedInfo::Parsed(record),
        Err(e) => {
            log::error!("Failed to parse JSON from model response: {}", e);
            ParsedInfo::Unparsed
        }
    }
}
