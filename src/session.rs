//! Session bootstrapper.
//!
//! Signs the device in, then derives the storage location for the resolved
//! user. When the identity provider answers without a usable identifier a
//! local one is synthesized so the page can still show a session label.

use crate::errors::Result;
use crate::identity::IdentityProvider;
use crate::storage::CollectionPath;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Message shown when the session cannot be established
pub const INIT_FAILURE_MESSAGE: &str = "Failed to initialize session.";

/// Where the session's user identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Issued by the identity provider
    Provider,
    /// Generated locally; not remembered anywhere
    Fallback,
}

/// One page session: who the user is and where their expenses live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Resolved user identifier
    pub user_id: String,
    /// Origin of `user_id`
    pub source: IdentitySource,
    /// The user's expense collection
    pub collection: CollectionPath,
}

impl Session {
    /// Text identifying the session on the page
    #[must_use]
    pub fn label(&self) -> String {
        format!("User ID: {}", self.user_id)
    }

    /// Whether the identity survives a reload
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.source == IdentitySource::Provider
    }
}

/// Signs in and derives the session. Never retries.
///
/// # Errors
/// Propagates whatever the identity provider failed with.
#[instrument(skip(provider, device_token))]
pub async fn bootstrap<P: IdentityProvider>(
    provider: &P,
    app_id: &str,
    device_token: &str,
) -> Result<Session> {
    let user = provider.sign_in_anonymously(device_token).await?;

    let (user_id, source) = match user.uid.filter(|uid| !uid.trim().is_empty()) {
        Some(uid) => (uid, IdentitySource::Provider),
        None => {
            let uid = fallback_user_id();
            warn!(%uid, "Identity provider returned no user id, using a local one");
            (uid, IdentitySource::Fallback)
        }
    };

    let collection = CollectionPath::new(app_id, user_id.clone());
    info!(%collection, "Session ready");
    Ok(Session {
        user_id,
        source,
        collection,
    })
}

/// Pseudo-random identifier made of random characters and the current time in base 36.
///
/// Collisions are possible; this is only good enough to label a session.
#[must_use]
pub fn fallback_user_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
    format!("{}{}", &random[..11], to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        // value % 36 < 36, always a valid index
        #[allow(clippy::cast_possible_truncation)]
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::StubIdentity;

    #[tokio::test]
    async fn test_bootstrap_uses_provider_identity() -> Result<()> {
        let provider = StubIdentity::issuing("user-42");
        let session = bootstrap(&provider, "tracker", "device").await?;

        assert_eq!(session.user_id, "user-42");
        assert!(session.is_durable());
        assert_eq!(session.label(), "User ID: user-42");
        assert_eq!(
            session.collection.to_string(),
            "artifacts/tracker/users/user-42/expenses"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_uid_falls_back_to_local_identity() -> Result<()> {
        let provider = StubIdentity::anonymous_without_uid();
        let session = bootstrap(&provider, "tracker", "device").await?;

        assert_eq!(session.source, IdentitySource::Fallback);
        assert!(!session.is_durable());
        assert!(!session.user_id.is_empty());
        assert!(session.label().starts_with("User ID: "));
        assert_eq!(session.collection.user_id(), session.user_id);
        Ok(())
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let provider = StubIdentity::failing("service misconfigured");
        let result = bootstrap(&provider, "tracker", "device").await;
        assert!(matches!(result, Err(Error::Auth { .. })));
    }

    #[test]
    fn test_fallback_ids_differ() {
        assert_ne!(fallback_user_id(), fallback_user_id());
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
