use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::{CompanyRecord, UrlError};

pub const VALID_URLS_FILE: &str = "valid_urls.json";
pub const ERRORS_FILE: &str = "errors.json";
pub const RESULTS_FILE: &str = "results.json";

pub fn save_valid_urls(data_dir: &Path, urls: &[String]) -> anyhow::Result<()> {
    write_json_artifact(data_dir, VALID_URLS_FILE, &urls)
}

pub fn save_errors(data_dir: &Path, errors: &[UrlError]) -> anyhow::Result<()> {
    write_json_artifact(data_dir, ERRORS_FILE, &errors)
}

pub fn save_results(data_dir: &Path, results: &[CompanyRecord]) -> anyhow::Result<()> {
    write_json_artifact(data_dir, RESULTS_FILE, &results)
}

/// Raw results artifact for the front-end surface. `None` when the file is
/// missing or unreadable.
pub fn load_results(data_dir: &Path) -> Option<serde_json::Value> {
    let payload = fs::read_to_string(data_dir.join(RESULTS_FILE)).ok()?;
    serde_json::from_str(&payload).ok()
}

/// Write to a sibling temp file and rename over the target, so a reader
/// never observes a partially written artifact.
fn write_json_artifact<T: Serialize>(
    data_dir: &Path,
    file_name: &str,
    data: &T,
) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)?;

    let payload = serde_json::to_string_pretty(data)?;
    let tmp_path = data_dir.join(format!("{}.tmp", file_name));
    fs::write(&tmp_path, payload)?;
    fs::rename(&tmp_path, data_dir.join(file_name))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::domain::UrlError;

    use super::{load_results, save_errors, save_results, ERRORS_FILE};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("prospector-{}-{}", name, std::process::id()));
        _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn errors_round_trip_in_order() {
        let dir = scratch_dir("errors");
        let errors = vec![
            UrlError {
                url: "https://a.example.com".to_string(),
                error: "404 via HEAD".to_string(),
            },
            UrlError {
                url: "https://b.example.com".to_string(),
                error: "LLM rejected".to_string(),
            },
        ];

        save_errors(&dir, &errors).unwrap();

        let payload = fs::read_to_string(dir.join(ERRORS_FILE)).unwrap();
        let read_back: Vec<UrlError> = serde_json::from_str(&payload).unwrap();
        assert_eq!(read_back, errors);
    }

    #[test]
    fn missing_results_file_loads_as_none() {
        let dir = scratch_dir("missing");

        assert!(load_results(&dir).is_none());
    }

    #[test]
    fn saved_results_load_back() {
        let dir = scratch_dir("results");

        save_results(&dir, &[]).unwrap();

        let value = load_results(&dir).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }
}
