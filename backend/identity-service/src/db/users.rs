/// In-memory user repository
use crate::error::{IdentityError, Result};
use crate::models::User;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<u32, User>,
    /// email -> id
    by_email: HashMap<String, u32>,
    last_id: u32,
}

#[derive(Debug, Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<Users>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with the next id. Email must already be normalized.
    pub async fn create_user(&self, email: &str, password_hash: String) -> Result<User> {
        let mut users = self.inner.write().await;

        if users.by_email.contains_key(email) {
            return Err(IdentityError::EmailAlreadyExists);
        }

        let id = users
            .last_id
            .checked_add(1)
            .ok_or_else(|| IdentityError::Internal("user id space exhausted".to_string()))?;

        let user = User {
            id,
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        users.last_id = id;
        users.by_email.insert(user.email.clone(), id);
        users.by_id.insert(id, user.clone());

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.inner.read().await;
        users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned()
    }

    pub async fn find_by_id(&self, user_id: u32) -> Option<User> {
        self.inner.read().await.by_id.get(&user_id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.by_id.len()
    }
}
