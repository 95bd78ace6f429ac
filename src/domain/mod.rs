pub mod company_record;
pub mod validation;

pub use company_record::*;
pub use validation::*;
