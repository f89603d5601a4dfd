use crate::application::addresses::{ADDRESS_NOT_FOUND, ensure_contact};
use crate::domain::addresses::{Address, AddressRepository};
use crate::domain::contacts::ContactRepository;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct GetAddressUseCase {
    contacts: Arc<dyn ContactRepository>,
    addresses: Arc<dyn AddressRepository>,
}

impl GetAddressUseCase {
    pub fn new(contacts: Arc<dyn ContactRepository>, addresses: Arc<dyn AddressRepository>) -> Self {
        Self {
            contacts,
            addresses,
        }
    }

    pub async fn execute(&self, user_id: i64, contact_id: i64, id: i64) -> Result<Address, AppError> {
        ensure_contact(self.contacts.as_ref(), user_id, contact_id).await?;
        self.addresses
            .find_by_id(contact_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(ADDRESS_NOT_FOUND.to_string()))
    }
}
