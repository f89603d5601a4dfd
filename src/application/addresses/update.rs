use crate::application::addresses::create::AddressRequest;
use crate::application::addresses::{ADDRESS_NOT_FOUND, ensure_contact};
use crate::domain::addresses::{Address, AddressChanges, AddressRepository};
use crate::domain::contacts::ContactRepository;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct UpdateAddressUseCase {
    contacts: Arc<dyn ContactRepository>,
    addresses: Arc<dyn AddressRepository>,
}

impl UpdateAddressUseCase {
    pub fn new(contacts: Arc<dyn ContactRepository>, addresses: Arc<dyn AddressRepository>) -> Self {
        Self {
            contacts,
            addresses,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        user_id: i64,
        contact_id: i64,
        id: i64,
        req: AddressRequest,
    ) -> Result<Address, AppError> {
        ensure_contact(self.contacts.as_ref(), user_id, contact_id).await?;

        let changes = AddressChanges {
            street: req.street,
            city: req.city,
            province: req.province,
            country: req.country,
            postal_code: req.postal_code,
        };
        self.addresses
            .update(contact_id, id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(ADDRESS_NOT_FOUND.to_string()))
    }
}
