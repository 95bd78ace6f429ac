use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeMethod {
    Head,
    Get,
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeMethod::Head => write!(f, "HEAD"),
            ProbeMethod::Get => write!(f, "GET"),
        }
    }
}

/// What the reachability probe observed for one URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Status { code: u16, method: ProbeMethod },
    Failed { error: String },
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Status { code: 200, .. })
    }
}

/// Why a candidate URL was accepted or rejected by the validation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationReason {
    Accepted,
    NetworkError(String),
    HttpRejected { code: u16, method: ProbeMethod },
    /// The model classified the URL as invalid, or the model backend call
    /// itself failed (carried as the error text).
    SemanticReject(Option<String>),
}

impl ValidationReason {
    /// Human-readable entry for `errors.json`, `None` for accepted URLs.
    pub fn error_message(&self) -> Option<String> {
        match self {
            ValidationReason::Accepted => None,
            ValidationReason::NetworkError(error) => Some(error.clone()),
            ValidationReason::HttpRejected { code, method } => {
                Some(format!("{} via {}", code, method))
            }
            ValidationReason::SemanticReject(None) => Some("LLM rejected".to_string()),
            ValidationReason::SemanticReject(Some(error)) => Some(error.clone()),
        }
    }
}

/// Created once per candidate URL per run, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub url: String,
    pub accepted: bool,
    pub reason: ValidationReason,
}

impl ValidationOutcome {
    pub fn new(url: String, reason: ValidationReason) -> Self {
        let accepted = reason == ValidationReason::Accepted;
        ValidationOutcome {
            url,
            accepted,
            reason,
        }
    }
}

/// One entry of the `errors.json` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlError {
    pub url: String,
    pub error: String,
}
