//! Core value types used throughout the crate.

mod api_url;
mod contract_id;

pub use api_url::{ApiUrl, DEFAULT_BASE_URL};
pub use contract_id::ContractId;
