use crate::domain::users::{Role, User};
use serde::Serialize;

/// Public profile of the authenticated user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}
