use crate::domain::contacts::Contact;
use sqlx::FromRow;
use time::OffsetDateTime;

pub const CONTACT_COLUMNS: &str =
    "id, user_id, first_name, last_name, email, phone, image, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct ContactDbModel {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<ContactDbModel> for Contact {
    fn from(model: ContactDbModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
