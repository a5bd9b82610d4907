use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Credential store kept in process memory.
///
/// Used for local runs (`database.url = "memory"`) and end-to-end tests.
/// Identities are assigned sequentially starting at 1.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        if state
            .users
            .values()
            .any(|existing| existing.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        state.next_id += 1;
        let user = user.with_id(UserId(state.next_id));
        state.users.insert(user.id.0, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.read().await.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
