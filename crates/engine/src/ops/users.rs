use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, User,
    util::{normalize_email, normalize_required_text},
};

use super::Engine;

/// How many events a user created and how many invitations they received.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Usage {
    pub created: u64,
    pub invited: u64,
}

impl Engine {
    /// Resolve a bearer token to its user.
    pub async fn authenticate(&self, token: &str) -> ResultEngine<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        self.store.user_by_token(token).await
    }

    /// Register a user and return it with its freshly generated token.
    pub async fn new_user(&self, name: &str, email: &str) -> ResultEngine<(User, String)> {
        let name = normalize_required_text(name, "name", 255)?;
        let email = normalize_email(email)?;
        if self.store.user_by_email(&email).await?.is_some() {
            return Err(EngineError::ExistingKey(
                "User with this email already exists".to_string(),
            ));
        }
        let token = Uuid::new_v4().simple().to_string();
        let user = self.store.insert_user(&name, &email, &token).await?;
        tracing::info!(user_id = user.id, "user created");
        Ok((user, token))
    }

    pub async fn usage(&self, user_id: i32) -> ResultEngine<Usage> {
        Ok(Usage {
            created: self.store.count_events_by_creator(user_id).await?,
            invited: self.store.count_invitations_for_user(user_id).await?,
        })
    }
}
