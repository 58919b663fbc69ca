use std::sync::Arc;

use transpotrack_data::{CredentialVerifier, DataAccess};

/// Shared handler state: the executor seam and the login verifier.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DataAccess>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(db: Arc<dyn DataAccess>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { db, verifier }
    }
}
