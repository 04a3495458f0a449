//! Identity collaborator - anonymous sign-in.
//!
//! A device presents an opaque token (the browser cookie) and gets back a user
//! identifier. [`LocalAnonymousAuth`] remembers the pairing in the database, so the
//! same device keeps its identity, and therefore its expenses, across reloads and
//! restarts.

use crate::entities::{AnonymousUser, anonymous_user};
use crate::errors::Result;
use sea_orm::{Set, prelude::*};
use std::future::Future;
use tracing::{info, instrument};
use uuid::Uuid;

/// Result of an anonymous sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Issued identifier, `None` when the provider could not supply a usable one
    pub uid: Option<String>,
}

/// Anonymous authentication service.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Signs the device in anonymously, returning the identity it is known by.
    fn sign_in_anonymously(&self, device_token: &str)
    -> impl Future<Output = Result<AuthUser>> + Send;
}

/// Anonymous identities kept in the local database.
#[derive(Debug, Clone)]
pub struct LocalAnonymousAuth {
    db: DatabaseConnection,
}

impl LocalAnonymousAuth {
    /// Uses `db`, whose tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl IdentityProvider for LocalAnonymousAuth {
    #[instrument(skip(self, device_token))]
    async fn sign_in_anonymously(&self, device_token: &str) -> Result<AuthUser> {
        if let Some(existing) = AnonymousUser::find()
            .filter(anonymous_user::Column::DeviceToken.eq(device_token))
            .one(&self.db)
            .await?
        {
            return Ok(AuthUser {
                uid: Some(existing.uid),
            });
        }

        let uid = Uuid::new_v4().simple().to_string();
        anonymous_user::ActiveModel {
            uid: Set(uid.clone()),
            device_token: Set(device_token.to_string()),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;
        info!(%uid, "Issued new anonymous identity");

        Ok(AuthUser { uid: Some(uid) })
    }
}
