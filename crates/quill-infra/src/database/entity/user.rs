//! `users` table. Usernames and emails are unique.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique, column_type = "String(StringLen::N(20))")]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub image_file: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        let Model {
            id,
            username,
            email,
            password_hash,
            image_file,
            created_at,
            updated_at,
        } = model;

        User {
            id,
            username,
            email,
            password_hash,
            image_file,
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

/// A fully populated row, ready for `INSERT`.
impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            password_hash,
            image_file,
            created_at,
            updated_at,
        } = user;

        ActiveModel {
            id: Set(id),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            image_file: Set(image_file),
            created_at: Set(created_at.into()),
            updated_at: Set(updated_at.into()),
        }
    }
}
