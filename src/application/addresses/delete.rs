use crate::application::addresses::{ADDRESS_NOT_FOUND, ensure_contact};
use crate::domain::addresses::AddressRepository;
use crate::domain::contacts::ContactRepository;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct DeleteAddressUseCase {
    contacts: Arc<dyn ContactRepository>,
    addresses: Arc<dyn AddressRepository>,
}

impl DeleteAddressUseCase {
    pub fn new(contacts: Arc<dyn ContactRepository>, addresses: Arc<dyn AddressRepository>) -> Self {
        Self {
            contacts,
            addresses,
        }
    }

    pub async fn execute(&self, user_id: i64, contact_id: i64, id: i64) -> Result<bool, AppError> {
        ensure_contact(self.contacts.as_ref(), user_id, contact_id).await?;
        if !self.addresses.delete(contact_id, id).await? {
            return Err(AppError::NotFound(ADDRESS_NOT_FOUND.to_string()));
        }
        Ok(true)
    }
}
