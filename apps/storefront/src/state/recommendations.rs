//! # Recommendations State
//!
//! Personalized suggestions. The backend needs a user to recommend for, so
//! nothing is requested while signed out.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use storefront_api::RecommendationsApi;
use storefront_core::{Recommendation, RecommendationAlgorithm};

use crate::error::{AppError, AppResult};

/// Snapshot of the recommendations slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationsState {
    pub algorithm: RecommendationAlgorithm,
    pub recommendation: Option<Recommendation>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Recommendations slice.
pub struct RecommendationsSlice {
    api: Arc<dyn RecommendationsApi>,
    state: Mutex<RecommendationsState>,
}

impl RecommendationsSlice {
    pub fn new(api: Arc<dyn RecommendationsApi>) -> Self {
        RecommendationsSlice {
            api,
            state: Mutex::new(RecommendationsState::default()),
        }
    }

    pub fn snapshot(&self) -> RecommendationsState {
        self.state.lock().clone()
    }

    /// Fetches recommendations with `algorithm`.
    ///
    /// Returns `Ok(None)` without a request when `authenticated` is false.
    pub async fn fetch(
        &self,
        authenticated: bool,
        algorithm: RecommendationAlgorithm,
        limit: u32,
    ) -> AppResult<Option<Recommendation>> {
        if !authenticated {
            debug!("Signed out; skipping recommendations");
            self.state.lock().loading = false;
            return Ok(None);
        }

        {
            let mut state = self.state.lock();
            state.algorithm = algorithm;
            state.loading = true;
            state.error = None;
        }

        let result = self.api.recommendations(algorithm, limit).await;

        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(recommendation) => {
                debug!(
                    algorithm = algorithm.label(),
                    count = recommendation.products.len(),
                    "Recommendations loaded"
                );
                state.recommendation = Some(recommendation.clone());
                Ok(Some(recommendation))
            }
            Err(e) => {
                let err = AppError::from(e);
                warn!(code = ?err.code, "Failed to load recommendations");
                state.error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    /// Forgets recommendations for the previous user.
    pub fn clear(&self) {
        *self.state.lock() = RecommendationsState::default();
    }
}
