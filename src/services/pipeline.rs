use std::path::Path;

use crate::configuration::{Settings, Strictness};
use crate::domain::{CompanyRecord, ProbeOutcome, UrlError, ValidationOutcome, ValidationReason};
use crate::services::{
    check_url_status, extract_company_info, fetch_and_clean, save_errors, save_results,
    save_valid_urls, truncate_to_budget, validate_candidate, ModelBackend, PageRenderer,
    SearchClient, SearchHit, CONTENT_CHAR_BUDGET,
};

/// Aggregate state of one pipeline invocation. Every candidate URL ends up
/// in exactly one of `errors` or `results` by the time the run completes.
pub struct PipelineRun {
    pub valid_urls: Vec<String>,
    pub errors: Vec<UrlError>,
    pub results: Vec<CompanyRecord>,
}

/// Full flow behind the front-end surface: search, then everything in
/// [`run_pipeline`].
pub async fn search_and_extract(
    settings: &Settings,
    http_client: &reqwest::Client,
    search_client: &SearchClient,
    backend: &ModelBackend,
    renderer: &dyn PageRenderer,
    industry: &str,
    region: &str,
) -> anyhow::Result<PipelineRun> {
    let hits = search_client
        .search_companies(industry, region, settings.pipeline.result_count)
        .await?;

    run_pipeline(
        http_client,
        backend,
        renderer,
        Path::new(&settings.pipeline.data_dir),
        industry,
        settings.pipeline.strictness,
        &hits,
    )
    .await
}

/// Validate every candidate, persist the URL partition, extract from the
/// survivors, persist results. One URL failing at any stage never aborts
/// the run or touches another URL's outcome.
pub async fn run_pipeline(
    http_client: &reqwest::Client,
    backend: &ModelBackend,
    renderer: &dyn PageRenderer,
    data_dir: &Path,
    industry: &str,
    strictness: Strictness,
    hits: &[SearchHit],
) -> anyhow::Result<PipelineRun> {
    let outcomes = validate_candidates(http_client, backend, hits, industry, strictness).await;

    let valid_urls: Vec<String> = outcomes
        .iter()
        .filter(|outcome| outcome.accepted)
        .map(|outcome| outcome.url.clone())
        .collect();
    let mut errors: Vec<UrlError> = outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.reason.error_message().map(|error| UrlError {
                url: outcome.url.clone(),
                error,
            })
        })
        .collect();

    log::info!(
        "Validation partitioned {} candidates into {} valid and {} rejected",
        hits.len(),
        valid_urls.len(),
        errors.len()
    );

    // Checkpoint the partition before any extraction work starts.
    save_valid_urls(data_dir, &valid_urls)?;
    save_errors(data_dir, &errors)?;

    let results = run_extraction(renderer, backend, &valid_urls, &mut errors).await;

    // Rewritten now that extraction skips are known.
    save_errors(data_dir, &errors)?;
    save_results(data_dir, &results)?;

    Ok(PipelineRun {
        valid_urls,
        errors,
        results,
    })
}

/// Two-stage gate per candidate: the cheap network probe runs first and
/// short-circuits before the model call, so model invocations are only
/// spent on URLs that are at least reachable.
pub async fn validate_candidates(
    http_client: &reqwest::Client,
    backend: &ModelBackend,
    hits: &[SearchHit],
    industry: &str,
    strictness: Strictness,
) -> Vec<ValidationOutcome> {
    let mut outcomes = Vec::with_capacity(hits.len());

    for hit in hits {
        log::info!("Validating candidate: {}", hit.url);

        let reason = match check_url_status(http_client, &hit.url).await {
            ProbeOutcome::Status { code: 200, .. } => {
                match validate_candidate(backend, hit, industry, strictness).await {
                    Ok(true) => ValidationReason::Accepted,
                    Ok(false) => ValidationReason::SemanticReject(None),
                    Err(e) => ValidationReason::SemanticReject(Some(e.to_string())),
                }
            }
            ProbeOutcome::Status { code, method } => {
                ValidationReason::HttpRejected { code, method }
            }
            ProbeOutcome::Failed { error } => ValidationReason::NetworkError(error),
        };

        outcomes.push(ValidationOutcome::new(hit.url.clone(), reason));
    }

    outcomes
}

/// Sequentially render, clean and extract each validated URL. Skips are
/// logged and recorded as error entries so every URL stays accounted for.
pub async fn run_extraction(
    renderer: &dyn PageRenderer,
    backend: &ModelBackend,
    urls: &[String],
    errors: &mut Vec<UrlError>,
) -> Vec<CompanyRecord> {
    let mut results = vec![];

    for url in urls {
        log::info!("Processing: {}", url);

        let Some(clean_text) = fetch_and_clean(renderer, url).await else {
            log::warn!("No clean text extracted from {}", url);
            errors.push(UrlError {
                url: url.clone(),
                error: "render failed".to_string(),
            });
            continue;
        };

        let budgeted_text = truncate_to_budget(&clean_text, CONTENT_CHAR_BUDGET);

        match extract_company_info(backend, budgeted_text).await {
            Some(mut record) => {
                record.website = Some(url.clone());
                results.push(record);
            }
            None => {
                log::warn!("LLM extraction failed for {}", url);
                errors.push(UrlError {
                    url: url.clone(),
                    error: "extraction failed".to_string(),
                });
            }
        }
    }

    results
}
