use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ContactChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSortField {
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    CreatedAt,
    UpdatedAt,
}

impl ContactSortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `desc` (case-insensitive) sorts ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactSearch {
    /// Substring of either first or last name
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sort: Vec<(ContactSortField, SortDirection)>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, user_id: i64, contact: NewContact) -> Result<Contact, anyhow::Error>;

    /// Insert all rows or none.
    async fn create_many(
        &self,
        user_id: i64,
        contacts: Vec<NewContact>,
    ) -> Result<Vec<Contact>, anyhow::Error>;

    /// Returns the requested page and the total number of matching rows.
    async fn search(
        &self,
        user_id: i64,
        search: ContactSearch,
    ) -> Result<(Vec<Contact>, i64), anyhow::Error>;

    async fn find_by_id(&self, user_id: i64, id: i64) -> Result<Option<Contact>, anyhow::Error>;

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        changes: ContactChanges,
    ) -> Result<Option<Contact>, anyhow::Error>;

    async fn update_image(
        &self,
        user_id: i64,
        id: i64,
        image_url: &str,
    ) -> Result<Option<Contact>, anyhow::Error>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, anyhow::Error>;
}
