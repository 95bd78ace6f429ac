pub mod content_extractor;
pub mod data_persistance;
pub mod droid;
pub mod extraction_engine;
pub mod model_backend;
pub mod pipeline;
pub mod reachability;
pub mod search_client;
pub mod semantic_validator;

pub use content_extractor::*;
pub use data_persistance::*;
pub use droid::*;
pub use extraction_engine::*;
pub use model_backend::*;
pub use pipeline::*;
pub use reachability::*;
pub use search_client::*;
pub use semantic_validator::*;
