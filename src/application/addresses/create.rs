use crate::application::addresses::ensure_contact;
use crate::domain::addresses::{Address, AddressRepository, NewAddress};
use crate::domain::contacts::ContactRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Body for both creating and replacing an address; `country` is always required.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 255, message = "Street must be 1-255 characters"))]
    pub street: Option<String>,
    #[validate(length(min = 1, max = 100, message = "City must be 1-100 characters"))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Province must be 1-100 characters"))]
    pub province: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Country must be 1-100 characters"))]
    pub country: String,
    #[validate(length(min = 1, max = 10, message = "Postal code must be 1-10 characters"))]
    pub postal_code: Option<String>,
}

pub struct CreateAddressUseCase {
    contacts: Arc<dyn ContactRepository>,
    addresses: Arc<dyn AddressRepository>,
}

impl CreateAddressUseCase {
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
        req: AddressRequest,
    ) -> Result<Address, AppError> {
        ensure_contact(self.contacts.as_ref(), user_id, contact_id).await?;

        let address = NewAddress {
            street: req.street,
            city: req.city,
            province: req.province,
            country: req.country,
            postal_code: req.postal_code,
        };
        Ok(self.addresses.create(contact_id, address).await?)
    }
}
