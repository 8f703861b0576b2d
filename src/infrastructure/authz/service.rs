//! Delegated authorization with a TTL cache in front of the authority

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::cache::{Cache, CacheExt};
use crate::domain::{AccessKey, DomainError, KeyCheckOutcome};
use crate::infrastructure::provision::ProvisionAuthority;

/// How long a cached verdict stays authoritative.
pub const VERDICT_TTL: Duration = Duration::from_secs(60);

/// Answers "may this access key manage this account?" by resolving the
/// account's parent and validating the key against it, memoized per
/// (account, key) pair.
///
/// `Ok(true)` is an allow, `Ok(false)` a cached denial, and `Err(_)` a
/// denial with its cause; callers treat anything but `Ok(true)` as
/// denied. Verdicts are cached, transport-layer failures never are — a
/// retry may succeed and must not be locked out by a poisoned entry.
#[derive(Debug)]
pub struct AccountAuthorizer<P: ProvisionAuthority> {
    authority: P,
    cache: Arc<dyn Cache>,
    verdict_ttl: Duration,
}

impl<P: ProvisionAuthority> AccountAuthorizer<P> {
    pub fn new(authority: P, cache: Arc<dyn Cache>) -> Self {
        Self::with_verdict_ttl(authority, cache, VERDICT_TTL)
    }

    pub fn with_verdict_ttl(authority: P, cache: Arc<dyn Cache>, verdict_ttl: Duration) -> Self {
        Self {
            authority,
            cache,
            verdict_ttl,
        }
    }

    pub async fn authorize(
        &self,
        child_account_id: &str,
        key: &AccessKey,
    ) -> Result<bool, DomainError> {
        let cache_key = key.cache_key(child_account_id);

        if let Some(verdict) = self.cache.get::<bool>(&cache_key).await? {
            debug!(child_account_id, verdict, "authorization cache hit");
            return Ok(verdict);
        }

        let parent = self.authority.parent_of(child_account_id).await?;

        let Some(parent) = parent else {
            self.deny(&cache_key).await?;
            return Err(DomainError::no_parent_account(child_account_id));
        };

        match self.authority.check_key(&parent, key).await? {
            KeyCheckOutcome::Valid => {
                self.cache.set(&cache_key, &true, self.verdict_ttl).await?;
                Ok(true)
            }
            KeyCheckOutcome::NotFound => {
                self.deny(&cache_key).await?;
                Err(DomainError::parent_account_not_found(parent))
            }
            KeyCheckOutcome::Rejected(status) => {
                warn!(child_account_id, %parent, status, "access key rejected");
                self.deny(&cache_key).await?;
                Err(DomainError::key_check_failed(status))
            }
        }
    }

    async fn deny(&self, cache_key: &str) -> Result<(), DomainError> {
        self.cache.set(cache_key, &false, self.verdict_ttl).await
    }
}
