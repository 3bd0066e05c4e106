//! API root

use crate::models::LinkDto;
use crate::server::links::root_links;
use axum::Json;

/// `GET /api`
pub async fn get_root() -> Json<Vec<LinkDto>> {
    Json(root_links())
}
