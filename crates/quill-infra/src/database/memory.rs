//! In-memory repositories - used when no database is configured and in tests.
//!
//! Both repositories share one set of tables so posts can be joined with
//! their authors. The tables enforce the same constraints as the SQL schema:
//! unique usernames and emails, and posts that reference an existing user.
//! Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostWithAuthor, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
}

impl Tables {
    fn username_taken(&self, username: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn with_author(&self, post: &Post) -> Option<PostWithAuthor> {
        let author = self.users.get(&post.user_id)?;
        Some(PostWithAuthor {
            post: post.clone(),
            author: author.clone().into(),
        })
    }
}

/// Shared handle to the in-memory tables.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository { db: self.clone() }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository { db: self.clone() }
    }
}

/// In-memory user repository.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    db: InMemoryDatabase,
}

/// In-memory post repository.
#[derive(Clone)]
pub struct InMemoryPostRepository {
    db: InMemoryDatabase,
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.db.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.db.tables.write().await;

        if tables.users.contains_key(&user.id) {
            return Err(RepoError::Constraint("users_pkey".to_string()));
        }
        if tables.username_taken(&user.username, None) {
            return Err(RepoError::Constraint("users_username_key".to_string()));
        }
        if tables.email_taken(&user.email, None) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;

        tables.users.remove(&id).ok_or(RepoError::NotFound)?;
        // ON DELETE CASCADE
        tables.posts.retain(|_, post| post.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
    ) -> Result<User, RepoError> {
        let mut tables = self.db.tables.write().await;

        if tables.username_taken(username, Some(id)) {
            return Err(RepoError::Constraint("users_username_key".to_string()));
        }
        if tables.email_taken(email, Some(id)) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }

        let user = tables.users.get_mut(&id).ok_or(RepoError::NotFound)?;
        user.username = username.to_owned();
        user.email = email.to_owned();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.db.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.db.tables.write().await;

        if !tables.users.contains_key(&post.user_id) {
            return Err(RepoError::Constraint("posts_user_id_fkey".to_string()));
        }
        if tables.posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("posts_pkey".to_string()));
        }

        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;
        tables.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let tables = self.db.tables.read().await;

        let mut posts: Vec<PostWithAuthor> = tables
            .posts
            .values()
            .filter_map(|post| tables.with_author(post))
            .collect();
        posts.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));

        Ok(posts)
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.posts.get(&id).and_then(|post| tables.with_author(post)))
    }

    async fn update_content(&self, id: Uuid, title: &str, content: &str) -> Result<Post, RepoError> {
        let mut tables = self.db.tables.write().await;

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.title = title.to_owned();
        post.content = content.to_owned();
        post.updated_at = Utc::now();

        Ok(post.clone())
    }
}
