use crate::application::addresses::ensure_contact;
use crate::domain::addresses::{Address, AddressRepository};
use crate::domain::contacts::ContactRepository;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct ListAddressesUseCase {
    contacts: Arc<dyn ContactRepository>,
    addresses: Arc<dyn AddressRepository>,
}

impl ListAddressesUseCase {
    pub fn new(contacts: Arc<dyn ContactRepository>, addresses: Arc<dyn AddressRepository>) -> Self {
        Self {
            contacts,
            addresses,
        }
    }

    pub async fn execute(&self, user_id: i64, contact_id: i64) -> Result<Vec<Address>, AppError> {
        ensure_contact(self.contacts.as_ref(), user_id, contact_id).await?;
        Ok(self.addresses.list_by_contact(contact_id).await?)
    }
}
