use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::ports::{AuthError, Authenticator};

/// Fixed token to user id table, for local runs and tests.
pub struct StaticTokenAuthenticator {
    users_by_token: HashMap<String, String>,
}

impl StaticTokenAuthenticator {
    pub fn new<T, U>(tokens: impl IntoIterator<Item = (T, U)>) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            users_by_token: tokens
                .into_iter()
                .map(|(token, user_id)| (token.into(), user_id.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        self.users_by_token
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)
    }
}
