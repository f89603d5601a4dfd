use crate::application::addresses::create::{AddressRequest, CreateAddressUseCase};
use crate::application::addresses::delete::DeleteAddressUseCase;
use crate::application::addresses::get::GetAddressUseCase;
use crate::application::addresses::list::ListAddressesUseCase;
use crate::application::addresses::update::UpdateAddressUseCase;
use crate::domain::addresses::Address;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::AppError;
use crate::shared::response::WebResponse;
use crate::shared::validation::ValidatedJson;
use axum::extract::{Path, State};

pub async fn create_address(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(contact_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<AddressRequest>,
) -> Result<WebResponse<Address>, AppError> {
    let use_case = CreateAddressUseCase::new(state.contacts.clone(), state.addresses.clone());

    let address = use_case.execute(auth.user.id, contact_id, req).await?;
    Ok(WebResponse::created("Address created successfully", address))
}

pub async fn list_addresses(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(contact_id): Path<i64>,
) -> Result<WebResponse<Vec<Address>>, AppError> {
    let use_case = ListAddressesUseCase::new(state.contacts.clone(), state.addresses.clone());

    let addresses = use_case.execute(auth.user.id, contact_id).await?;
    Ok(WebResponse::ok("Addresses retrieved successfully", addresses))
}

pub async fn get_address(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((contact_id, id)): Path<(i64, i64)>,
) -> Result<WebResponse<Address>, AppError> {
    let use_case = GetAddressUseCase::new(state.contacts.clone(), state.addresses.clone());

    let address = use_case.execute(auth.user.id, contact_id, id).await?;
    Ok(WebResponse::ok("Address retrieved successfully", address))
}

pub async fn update_address(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((contact_id, id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<AddressRequest>,
) -> Result<WebResponse<Address>, AppError> {
    let use_case = UpdateAddressUseCase::new(state.contacts.clone(), state.addresses.clone());

    let address = use_case.execute(auth.user.id, contact_id, id, req).await?;
    Ok(WebResponse::ok("Address updated successfully", address))
}

pub async fn delete_address(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((contact_id, id)): Path<(i64, i64)>,
) -> Result<WebResponse<bool>, AppError> {
    let use_case = DeleteAddressUseCase::new(state.contacts.clone(), state.addresses.clone());

    let deleted = use_case.execute(auth.user.id, contact_id, id).await?;
    Ok(WebResponse::ok("Address removed successfully", deleted))
}
