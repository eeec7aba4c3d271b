//! Report Methods

use crate::models::Method;

use super::{get_json, ApiError};

pub async fn list_methods() -> Result<Vec<Method>, ApiError> {
    get_json("/api/metodos/").await
}
