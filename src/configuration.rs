use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub api_keys: ApiKeySettings,
    pub llm: LlmSettings,
    pub browser: BrowserSettings,
    pub pipeline: PipelineSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApiKeySettings {
    pub serpapi: String,
    pub openai: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub openai_model: String,
    pub ollama_endpoint: String,
    pub ollama_model: String,
}

/// Closed set of model backends. Picked once at startup, never per call.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Openai,
    Ollama,
}

#[derive(serde::Deserialize, Clone)]
pub struct BrowserSettings {
    pub webdriver_url: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct PipelineSettings {
    pub data_dir: String,
    pub strictness: Strictness,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub result_count: usize,
}

/// How ambiguous model output is treated by the semantic validator.
/// Lenient keeps the fail-open behavior: anything that is not an explicit
/// null rejection forwards the URL downstream.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Lenient,
    Strict,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
