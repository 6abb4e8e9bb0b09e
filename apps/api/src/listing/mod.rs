//! Listing extraction: fetch a project page from the configured freelance
//! site and pull a best-effort seed for the proposal form out of it.
//!
//! Only reaching the page can fail. Each field degrades to its own default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod extractors;
pub mod fetcher;
pub mod handlers;

pub use extractors::extract_listing;
pub use fetcher::ListingFetcher;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("URL inválida: {0}")]
    InvalidUrl(String),

    #[error("URL de '{host}' não pertence a {expected}")]
    ForeignSite { host: String, expected: String },

    #[error("A página do projeto respondeu com HTTP {0}")]
    Status(u16),

    #[error("Não foi possível acessar a página do projeto: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Partial generation request recovered from a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProjectData {
    pub client_name: String,
    pub project_description: String,
    /// Plain decimal string, e.g. `1500.00`.
    pub value: String,
}
