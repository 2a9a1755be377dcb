//! `posts` table. Every post belongs to exactly one user.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::Post;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Deleting a user removes their posts.
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        let Model {
            id,
            user_id,
            title,
            content,
            created_at,
            updated_at,
        } = model;

        Post {
            id,
            user_id,
            title,
            content,
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

/// A fully populated row, ready for `INSERT`.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        let Post {
            id,
            user_id,
            title,
            content,
            created_at,
            updated_at,
        } = post;

        ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            title: Set(title),
            content: Set(content),
            created_at: Set(created_at.into()),
            updated_at: Set(updated_at.into()),
        }
    }
}
