use crate::application::contacts::get::CONTACT_NOT_FOUND;
use crate::domain::contacts::ContactRepository;
use crate::shared::error::AppError;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// Every address operation is gated on the caller owning the parent contact.
async fn ensure_contact(
    contacts: &dyn ContactRepository,
    user_id: i64,
    contact_id: i64,
) -> Result<(), AppError> {
    match contacts.find_by_id(user_id, contact_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(CONTACT_NOT_FOUND.to_string())),
    }
}
