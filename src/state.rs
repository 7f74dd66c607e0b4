// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    assessment::SubmissionLedger,
    certification::CertificateIssuer,
    config::Config,
    models::attempt::AttemptResultResponse,
    store::{MemStorage, Storage},
};

/// Graded results of submitted quiz and exam attempts, keyed per attempt.
pub type Submissions = SubmissionLedger<AttemptResultResponse>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub issuer: Arc<CertificateIssuer>,
    pub submissions: Arc<Submissions>,
    pub config: Config,
}

impl AppState {
    /// Wires the issuer to the same store the handlers read from.
    pub fn new(store: Arc<dyn Storage>, config: Config) -> Self {
        let issuer = Arc::new(CertificateIssuer::new(Arc::clone(&store)));
        Self {
            store,
            issuer,
            submissions: Arc::new(Submissions::new()),
            config,
        }
    }

    /// Builds the in-memory store, seeding demo content when configured.
    pub async fn in_memory(config: Config) -> Self {
        let store = MemStorage::new();
        if config.seed_demo_content {
            store.seed_demo_content().await;
        }
        Self::new(Arc::new(store), config)
    }
}

impl FromRef<AppState> for Arc<dyn Storage> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<CertificateIssuer> {
    fn from_ref(state: &AppState) -> Self {
        state.issuer.clone()
    }
}

impl FromRef<AppState> for Arc<Submissions> {
    fn from_ref(state: &AppState) -> Self {
        state.submissions.clone()
    }
}
