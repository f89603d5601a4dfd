use crate::application::contacts::create::{CreateContactRequest, CreateContactUseCase};
use crate::application::contacts::delete::DeleteContactUseCase;
use crate::application::contacts::get::GetContactUseCase;
use crate::application::contacts::list::{ListContactsUseCase, SearchContactsRequest};
use crate::application::contacts::update::{UpdateContactRequest, UpdateContactUseCase};
use crate::application::contacts::upload_image::UploadContactImageUseCase;
use crate::domain::contacts::Contact;
use crate::domain::images::ImageInfo;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::presentation::handlers::image_field;
use crate::shared::error::AppError;
use crate::shared::query::Qs;
use crate::shared::response::WebResponse;
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use axum_extra::extract::WithRejection;

pub async fn create_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateContactRequest>,
) -> Result<WebResponse<Contact>, AppError> {
    let use_case = CreateContactUseCase::new(state.contacts.clone());

    let contact = use_case.execute(auth.user.id, req).await?;
    Ok(WebResponse::created("Created", contact))
}

pub async fn create_contacts_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(reqs), _): WithRejection<Json<Vec<CreateContactRequest>>, AppError>,
) -> Result<WebResponse<Vec<Contact>>, AppError> {
    let use_case = CreateContactUseCase::new(state.contacts.clone());

    let contacts = use_case.execute_many(auth.user.id, reqs).await?;
    Ok(WebResponse::created("Created", contacts))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
    Qs(req): Qs<SearchContactsRequest>,
) -> Result<WebResponse<Vec<Contact>>, AppError> {
    let use_case = ListContactsUseCase::new(state.contacts.clone());

    let (contacts, paging) = use_case.execute(auth.user.id, req).await?;
    Ok(WebResponse::ok("Success get all contacts", contacts).with_paging(paging))
}

pub async fn get_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<WebResponse<Contact>, AppError> {
    let use_case = GetContactUseCase::new(state.contacts.clone());

    let contact = use_case.execute(auth.user.id, id).await?;
    Ok(WebResponse::ok("Success get a contact", contact))
}

pub async fn update_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateContactRequest>,
) -> Result<WebResponse<Contact>, AppError> {
    let use_case = UpdateContactUseCase::new(state.contacts.clone());

    let contact = use_case.execute(auth.user.id, id, req).await?;
    Ok(WebResponse::ok("Success update a contact", contact))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<WebResponse<bool>, AppError> {
    let use_case = DeleteContactUseCase::new(state.contacts.clone());

    let deleted = use_case.execute(auth.user.id, id).await?;
    Ok(WebResponse::ok("Success delete a contact", deleted))
}

pub async fn upload_contact_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<WebResponse<ImageInfo>, AppError> {
    let image = image_field(multipart).await?;
    let use_case = UploadContactImageUseCase::new(state.contacts.clone(), state.image_store.clone());

    let info = use_case.execute(auth.user.id, id, image).await?;
    Ok(WebResponse::ok("Success upload image", info))
}
