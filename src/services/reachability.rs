use std::time::Duration;

use fake_user_agent::get_chrome_rua;
use reqwest::header::USER_AGENT;

use crate::domain::{ProbeMethod, ProbeOutcome};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe a URL with a cheap HEAD request before spending model or browser
/// time on it. Servers that refuse HEAD with 405 get one GET retry; there
/// is no other retry, transient and permanent failures are treated alike.
pub async fn check_url_status(client: &reqwest::Client, url: &str) -> ProbeOutcome {
    let user_agent = get_chrome_rua();

    let head_response = client
        .head(url)
        .header(USER_AGENT, user_agent)
        .timeout(PROBE_TIMEOUT)
        .send()
        .await;

    match head_response {
        Ok(res) if res.status().as_u16() == 405 => {
            let get_response = client
                .get(url)
                .header(USER_AGENT, user_agent)
                .timeout(PROBE_TIMEOUT)
                .send()
                .await;

            match get_response {
                Ok(res) => ProbeOutcome::Status {
                    code: res.status().as_u16(),
                    method: ProbeMethod::Get,
                },
                Err(e) => ProbeOutcome::Failed {
                    error: e.to_string(),
                },
            }
        }
        Ok(res) => ProbeOutcome::Status {
            code: res.status().as_u16(),
            method: ProbeMethod::Head,
        },
        Err(e) => ProbeOutcome::Failed {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::domain::{ProbeMethod, ProbeOutcome};

    use super::check_url_status;

    #[tokio::test]
    async fn reachable_site_reports_200_via_head() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = check_url_status(&reqwest::Client::new(), &server.uri()).await;

        assert_eq!(
            outcome,
            ProbeOutcome::Status {
                code: 200,
                method: ProbeMethod::Head
            }
        );
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn missing_page_reports_status_without_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = check_url_status(&reqwest::Client::new(), &server.uri()).await;

        assert_eq!(
            outcome,
            ProbeOutcome::Status {
                code: 404,
                method: ProbeMethod::Head
            }
        );
        assert!(!outcome.is_ok());
    }

    #[tokio::test]
    async fn head_rejection_falls_back_to_get() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = check_url_status(&reqwest::Client::new(), &server.uri()).await;

        assert_eq!(
            outcome,
            ProbeOutcome::Status {
                code: 200,
                method: ProbeMethod::Get
            }
        );
    }

    #[tokio::test]
    async fn unreachable_host_reports_network_error() {
        let outcome = check_url_status(&reqwest::Client::new(), "http://127.0.0.1:1/").await;

        match outcome {
            ProbeOutcome::Failed { error } => assert!(!error.is_empty()),
            other => panic!("expected a network failure, got {:?}", other),
        }
    }
}
