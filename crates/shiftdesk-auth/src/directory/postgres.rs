//! PostgreSQL-backed user directory.

use async_trait::async_trait;

use shiftdesk_core::result::AppResult;
use shiftdesk_database::repositories::UserRepository;
use shiftdesk_entity::user::{CreateUser, User};

use super::UserDirectory;

/// User directory over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    repo: UserRepository,
}

impl PgUserDirectory {
    /// Wrap a repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.repo.find_by_username(username).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        self.repo.create(data).await
    }
}
