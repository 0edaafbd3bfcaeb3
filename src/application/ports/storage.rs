use crate::{app_error::AppResult, domain::entities::credential::Credential};

/// Client-local persistence for the bearer credential.
///
/// Synchronous on purpose: reads and deletes happen inline with session
/// transitions (logout never awaits).
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> AppResult<Option<Credential>>;
    fn save(&self, credential: &Credential) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}
