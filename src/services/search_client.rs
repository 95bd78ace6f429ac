use itertools::Itertools;
use serde::{Deserialize, Serialize};
use url::Url;

const SERPAPI_URL: &str = "https://serpapi.com/search";

/// One candidate surfaced by the search stage.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub url: String,
    pub title: Option<String>,
    pub snippet: Option<String>,
}

pub struct SearchClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

#[derive(Serialize)]
struct SearchQuery {
    engine: &'static str,
    q: String,
    api_key: String,
    num: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    link: Option<String>,
    title: Option<String>,
    snippet: Option<String>,
}

impl SearchClient {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        SearchClient {
            client,
            api_key,
            url: SERPAPI_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint, used by tests.
    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    /// Search for company websites in the given industry and region.
    /// Returns at most `num` hits, filtered and deduplicated in order.
    pub async fn search_companies(
        &self,
        industry: &str,
        region: &str,
        num: usize,
    ) -> anyhow::Result<Vec<SearchHit>> {
        let query = SearchQuery {
            engine: "google",
            q: format!("{} companies in {} USA", industry, region),
            api_key: self.api_key.clone(),
            num,
        };

        let res = self.client.get(&self.url).query(&query).send().await?;
        let data: SearchResponse = res.json().await?;

        let hits: Vec<SearchHit> = data
            .organic_results
            .into_iter()
            .filter_map(|result| {
                result.link.map(|link| SearchHit {
                    url: link,
                    title: result.title,
                    snippet: result.snippet,
                })
            })
            .filter(|hit| is_candidate_url(&hit.url))
            .unique_by(|hit| hit.url.clone())
            .take(num)
            .collect();

        log::info!("Search returned {} candidate urls", hits.len());

        Ok(hits)
    }
}

/// Keep absolute http(s) links that don't point back at the search engine.
pub fn is_candidate_url(raw_url: &str) -> bool {
    match Url::parse(raw_url) {
        Ok(parsed_url) => match parsed_url.scheme() {
            "http" | "https" => match parsed_url.host_str() {
                Some("") => false,
                None => false,
                Some(any_host) => !any_host.contains("google.com"),
            },
            _ => false,
        },
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{is_candidate_url, SearchClient};

    #[test]
    fn candidate_urls_invalid() {
        let raw_urls = [
            "https://support.google.com/websearch/answer/181196?hl=en-PK",
            "https://www.google.com/webhp?hl=en",
            "https://accounts.google.com/ServiceLogin?hl=en&passive=true",
            "/search?q=%22injection+molding%22+companies",
            "https://policies.google.com/privacy?hl=en-PK&fg=1",
            "ftp://files.example.com/catalog",
            "#",
            "not a url at all",
        ];

        for url in raw_urls {
            assert!(!is_candidate_url(url), "{} should be rejected", url);
        }
    }

    #[test]
    fn candidate_urls_valid() {
        let raw_urls = [
            "https://www.americanplasticmolds.com/",
            "http://acmemolding.example.com/about",
            "https://www.floridainjectionmolds.com/contact?src=search",
        ];

        for url in raw_urls {
            assert!(is_candidate_url(url), "{} should be kept", url);
        }
    }

    #[tokio::test]
    async fn search_deduplicates_and_caps_results() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "organic_results": [
                {"link": "https://acme.example.com/", "title": "Acme", "snippet": "Molding"},
                {"link": "https://acme.example.com/", "title": "Acme again"},
                {"link": "https://www.google.com/maps", "title": "Maps"},
                {"link": "https://beta.example.com/", "title": "Beta"},
                {"link": "https://gamma.example.com/", "title": "Gamma"},
            ]
        });
        Mock::given(method("GET"))
            .and(query_param("engine", "google"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = SearchClient::new(reqwest::Client::new(), "test-key".to_string())
            .with_url(server.uri());
        let hits = client
            .search_companies("injection molding", "Florida", 2)
            .await
            .unwrap();

        let urls: Vec<&str> = hits.iter().map(|hit| hit.url.as_str()).collect();
        assert_eq!(urls, vec!["https://acme.example.com/", "https://beta.example.com/"]);
    }
}
