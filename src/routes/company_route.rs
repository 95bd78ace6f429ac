use std::path::Path;

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::configuration::Settings;
use crate::services::{load_results, search_and_extract, Droid, ModelBackend, SearchClient};

#[derive(Deserialize)]
struct ExtractCompaniesQuery {
    industry: String,
    region: String,
}

#[get("")]
async fn extract_companies(
    settings: web::Data<Settings>,
    http_client: web::Data<reqwest::Client>,
    search_client: web::Data<SearchClient>,
    backend: web::Data<ModelBackend>,
    query: web::Query<ExtractCompaniesQuery>,
) -> HttpResponse {
    /*
    1. Search candidate company websites for the industry/region
    2. Gate each candidate through reachability, then the model
    3. Render the survivors and extract structured company info
    4. Return whatever landed in results.json
    */

    let droid = match Droid::new(&settings.browser.webdriver_url).await {
        Ok(droid) => droid,
        Err(e) => {
            log::error!("Failed to start a browser session: {:?}", e);
            return no_results_response();
        }
    };

    let run = search_and_extract(
        &settings,
        &http_client,
        &search_client,
        &backend,
        &droid,
        &query.industry,
        &query.region,
    )
    .await;

    if let Err(e) = droid.quit().await {
        log::error!("Failed to close the browser session: {:?}", e);
    }

    match run {
        Ok(run) => log::info!(
            "Run finished with {} results and {} errors",
            run.results.len(),
            run.errors.len()
        ),
        Err(e) => log::error!("Pipeline run failed: {:?}", e),
    }

    match load_results(Path::new(&settings.pipeline.data_dir)) {
        Some(results) => HttpResponse::Ok().json(results),
        None => no_results_response(),
    }
}

fn no_results_response() -> HttpResponse {
    HttpResponse::Ok().json(json!([{"error": "No results found or failed to load."}]))
}
