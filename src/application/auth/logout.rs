use crate::domain::users::{User, UserRepository};
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct LogoutUseCase {
    users: Arc<dyn UserRepository>,
}

impl LogoutUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Drops the stored refresh-token hash. The access token stays valid until
    /// it expires on its own.
    #[tracing::instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn execute(&self, user: &User) -> Result<bool, AppError> {
        if !user.has_active_session() {
            return Err(AppError::Unauthorized("User already logged out".to_string()));
        }

        self.users.update_refresh_token_hash(user.id, None).await?;
        tracing::info!("user logged out");
        Ok(true)
    }
}
