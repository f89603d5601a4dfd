use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Paging block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paging {
    pub size: i64,
    pub total_page: i64,
    pub current_page: i64,
}

/// Success envelope: `{code, status, data, paging?}`.
#[derive(Debug, Serialize)]
pub struct WebResponse<T> {
    pub code: u16,
    pub status: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T> WebResponse<T> {
    pub fn new(code: StatusCode, status: impl Into<String>, data: T) -> Self {
        Self {
            code: code.as_u16(),
            status: status.into(),
            data,
            paging: None,
        }
    }

    pub fn ok(status: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, status, data)
    }

    pub fn created(status: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, status, data)
    }

    pub fn with_paging(mut self, paging: Paging) -> Self {
        self.paging = Some(paging);
        self
    }
}

impl<T: Serialize> IntoResponse for WebResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
