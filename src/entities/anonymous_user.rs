//! Anonymous user entity - Remembers which uid was issued to which device.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Anonymous user database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anonymous_users")]
pub struct Model {
    /// Issued user identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    /// Opaque token the device presents on sign-in
    #[sea_orm(unique)]
    pub device_token: String,
    /// When the identity was first issued
    pub created_at: DateTimeUtc,
}

/// `AnonymousUser` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
