use crate::application::auth::token_utils::generate_one_time_token;
use crate::domain::mailer::{Mailer, verification_email};
use crate::domain::password::{PasswordHashingService, hash_blocking};
use crate::domain::users::{DuplicateUser, NewUser, Role, UserRepository};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(min = 6, max = 100, message = "Email must be 6-100 characters")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub password: String,
    #[validate(length(min = 6, max = 100, message = "Username must be 6-100 characters"))]
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub email: String,
    pub username: String,
    pub email_verification_token: String,
}

pub struct RegisterUseCase {
    users: Arc<dyn UserRepository>,
    password_service: Arc<dyn PasswordHashingService>,
    mailer: Arc<dyn Mailer>,
    production: bool,
    frontend_origin: String,
}

impl RegisterUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_service: Arc<dyn PasswordHashingService>,
        mailer: Arc<dyn Mailer>,
        production: bool,
        frontend_origin: String,
    ) -> Self {
        Self {
            users,
            password_service,
            mailer,
            production,
            frontend_origin,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: RegisterRequest) -> Result<RegisterResponse, AppError> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::BadRequest("Email already exists".to_string()));
        }
        if self.users.count_by_username(&req.username).await? > 0 {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }

        let role = Role::for_new_account(self.users.count_all().await?);
        let password_hash = hash_blocking(self.password_service.clone(), req.password).await?;
        let token = generate_one_time_token(self.production);

        let new_user = NewUser {
            email: req.email,
            username: req.username,
            password_hash,
            role,
            email_verification_token: token.clone(),
        };

        let user = match self.users.create(new_user).await {
            Ok(user) => user,
            Err(e) => {
                return Err(match e.downcast_ref::<DuplicateUser>() {
                    Some(duplicate) => AppError::BadRequest(duplicate.to_string()),
                    None => e.into(),
                });
            }
        };

        self.mailer
            .send(verification_email(
                &self.frontend_origin,
                &user.username,
                &user.email,
                &token,
            ))
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "user registered");

        Ok(RegisterResponse {
            email: user.email,
            username: user.username,
            email_verification_token: token,
        })
    }
}
