//! Error types for the credential chain.

use codeword_cache::CacheError;

use crate::AuthStage;

/// The error type platform service implementations return.
///
/// Services are written against whatever HTTP client the caller chooses,
/// so their failures are boxed rather than forced into one enum.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while producing credentials.
///
/// None of these are retried here; a caller that wants retries wraps the
/// whole lookup.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A platform service call failed or rejected us.
    #[error("{stage} failed: {source}")]
    Stage {
        stage: AuthStage,
        #[source]
        source: ServiceError,
    },

    /// The account service returned a user id that isn't hexadecimal.
    #[error("account service returned malformed user id {0:?}")]
    MalformedUserId(String),

    /// A credential couldn't be persisted to the cache.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl AuthError {
    /// The stage that failed, if the failure came from a service call.
    pub fn stage(&self) -> Option<AuthStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            Self::MalformedUserId(_) => Some(AuthStage::AccountAuth),
            Self::Cache(_) => None,
        }
    }
}
