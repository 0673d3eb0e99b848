use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// List of record ids for bulk operations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdsDto {
    pub ids: Vec<i32>,
}

/// Name uniqueness check body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateNameDto {
    pub name: String,
}

/// Name of a stored upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FilenameDto {
    pub filename: String,
}

/// Boolean answer for `in-use`/`has-*` style queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExistsDto {
    pub exists: bool,
}

/// Page + keyword query parameters used by the simple list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    #[serde(default)]
    pub keyword: Option<String>,
}

pub fn default_entries() -> u64 {
    10
}
