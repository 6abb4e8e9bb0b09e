use std::sync::Arc;

use crate::config::Config;
use crate::listing::ListingFetcher;
use crate::llm_client::{CredentialChain, GenerationClient};
use crate::store::{ProjectStore, ProposalStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub proposals: Arc<dyn ProposalStore>,
    pub projects: Arc<dyn ProjectStore>,
    /// API convention is fixed at startup, either configured or probed.
    pub llm: GenerationClient,
    pub credentials: CredentialChain,
    pub listings: ListingFetcher,
    pub config: Config,
}
