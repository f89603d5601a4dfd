use crate::domain::addresses::Address;
use sqlx::FromRow;
use time::OffsetDateTime;

pub const ADDRESS_COLUMNS: &str =
    "id, contact_id, street, city, province, country, postal_code, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct AddressDbModel {
    pub id: i64,
    pub contact_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<AddressDbModel> for Address {
    fn from(model: AddressDbModel) -> Self {
        Self {
            id: model.id,
            contact_id: model.contact_id,
            street: model.street,
            city: model.city,
            province: model.province,
            country: model.country,
            postal_code: model.postal_code,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
