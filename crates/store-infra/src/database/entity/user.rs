//! User entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use store_core::domain::Role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// Comma-separated role names, e.g. `ADMIN,CLIENT`.
    pub roles: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for store_core::domain::User {
    fn from(model: Model) -> Self {
        let roles = model
            .roles
            .split(',')
            .filter(|r| !r.trim().is_empty())
            .filter_map(|r| match r.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!(user_id = model.id, "Ignoring stored role: {}", e);
                    None
                }
            })
            .collect();

        Self {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            roles,
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<store_core::domain::User> for ActiveModel {
    fn from(user: store_core::domain::User) -> Self {
        let roles = user
            .roles
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(",");

        Self {
            id: user.id.map_or(NotSet, Set),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            roles: Set(roles),
        }
    }
}
