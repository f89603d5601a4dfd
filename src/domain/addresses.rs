use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    #[serde(skip_serializing)]
    pub contact_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddressChanges {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

/// Addresses are always addressed through their parent contact; ownership of
/// the contact is checked by the caller.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn create(&self, contact_id: i64, address: NewAddress) -> Result<Address, anyhow::Error>;
    async fn list_by_contact(&self, contact_id: i64) -> Result<Vec<Address>, anyhow::Error>;
    async fn find_by_id(&self, contact_id: i64, id: i64) -> Result<Option<Address>, anyhow::Error>;
    async fn update(
        &self,
        contact_id: i64,
        id: i64,
        changes: AddressChanges,
    ) -> Result<Option<Address>, anyhow::Error>;
    async fn delete(&self, contact_id: i64, id: i64) -> Result<bool, anyhow::Error>;
}
