use crate::domain::contacts::{
    Contact, ContactRepository, ContactSearch, ContactSortField, SortDirection,
};
use crate::shared::error::AppError;
use crate::shared::pagination::PageRequest;
use crate::shared::response::Paging;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    PageRequest::DEFAULT_SIZE
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchContactsRequest {
    /// Matched against first or last name
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Email must be 1-100 characters"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Phone must be 1-20 characters"))]
    pub phone: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = 1000000, message = "Page must be between 1 and 1000000"))]
    pub page: i64,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "Size must be between 1 and 100"))]
    pub size: i64,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
}

impl Default for SearchContactsRequest {
    fn default() -> Self {
        Self {
            username: None,
            email: None,
            phone: None,
            page: default_page(),
            size: default_size(),
            sort_by: None,
            order_by: None,
        }
    }
}

/// Pair `sortBy` fields with `orderBy` directions by position.
/// Missing directions default to ascending; unknown fields are dropped.
pub fn parse_sort(
    sort_by: Option<&str>,
    order_by: Option<&str>,
) -> Vec<(ContactSortField, SortDirection)> {
    let Some(sort_by) = sort_by else {
        return Vec::new();
    };
    let directions: Vec<&str> = order_by
        .map(|o| o.split(',').map(str::trim).collect())
        .unwrap_or_default();

    sort_by
        .split(',')
        .map(str::trim)
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .filter_map(|(index, name)| match ContactSortField::parse(name) {
            Some(field) => {
                let direction = directions
                    .get(index)
                    .map(|d| SortDirection::parse(d))
                    .unwrap_or(SortDirection::Asc);
                Some((field, direction))
            }
            None => {
                tracing::warn!(field = name, "ignoring unknown sort field");
                None
            }
        })
        .collect()
}

pub struct ListContactsUseCase {
    repo: Arc<dyn ContactRepository>,
}

impl ListContactsUseCase {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        user_id: i64,
        req: SearchContactsRequest,
    ) -> Result<(Vec<Contact>, Paging), AppError> {
        req.validate()?;

        let page = PageRequest::new(req.page, req.size);
        let search = ContactSearch {
            sort: parse_sort(req.sort_by.as_deref(), req.order_by.as_deref()),
            name: req.username,
            email: req.email,
            phone: req.phone,
            limit: page.limit(),
            offset: page.offset(),
        };

        let (contacts, total) = self.repo.search(user_id, search).await?;
        Ok((contacts, page.paging(total)))
    }
}
