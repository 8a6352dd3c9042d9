//! Remote client for the personnel REST API.
//!
//! [`PersonnelApi`] is the seam the views talk to; [`HttpPersonnelClient`] implements it
//! over HTTP against `{api_url}/personnel`.

mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpPersonnelClient;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{CreateInput, Department, Record, UpdateInput};

/// Result type for remote calls.
pub type ApiResult<T> = Result<T, AppError>;

/// Operations offered by the personnel backend.
///
/// Calls are independent; no ordering between two in-flight calls is implied.
#[async_trait]
pub trait PersonnelApi: Send + Sync {
    /// GET /personnel
    async fn list_all(&self) -> ApiResult<Vec<Record>>;

    /// GET /personnel/{id}
    async fn get_by_id(&self, id: i64) -> ApiResult<Record>;

    /// POST /personnel
    async fn create(&self, input: &CreateInput) -> ApiResult<Record>;

    /// PUT /personnel/{id}
    async fn update(&self, id: i64, input: &UpdateInput) -> ApiResult<Record>;

    /// DELETE /personnel/{id}. The backend soft-deletes; ids are never reused.
    async fn delete(&self, id: i64) -> ApiResult<()>;

    /// GET /personnel/department/{name}
    async fn list_by_department(&self, department: Department) -> ApiResult<Vec<Record>>;

    /// GET /personnel/active
    async fn list_active(&self) -> ApiResult<Vec<Record>>;

    /// GET /personnel/search?first=&last=
    async fn search_by_name(&self, first: &str, last: &str) -> ApiResult<Vec<Record>>;

    /// GET /personnel/departments
    async fn list_departments(&self) -> ApiResult<Vec<String>>;

    /// GET /personnel/positions
    async fn list_positions(&self) -> ApiResult<Vec<String>>;
}
