//! Company collections: fetch or create several companies at once

use super::companies::created;
use super::to_json;
use crate::core::error::{EntityError, RequestError, Result, ValidationError};
use crate::core::validation::validate_all;
use crate::models::{CompanyAddDto, CompanyDto, CompanyFullDto};
use crate::server::binders::{format_id_list, parse_id_list};
use crate::server::host::AppState;
use crate::server::links::COMPANY_COLLECTIONS_PATH;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Response;

/// `GET /api/companycollections/({id1,id2,...})`
///
/// Every id must exist; a partial match is a 404.
pub async fn get_company_collection(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Vec<CompanyFullDto>>> {
    let ids = parse_id_list(&raw)?;
    if ids.is_empty() {
        return Err(RequestError::InvalidIdList { value: raw }.into());
    }

    let companies = state.repository.get_companies_by_ids(&ids).await?;
    if companies.len() != ids.len() {
        return Err(EntityError::CollectionIncomplete {
            entity_type: "companies",
            requested: ids.len(),
            found: companies.len(),
        }
        .into());
    }

    Ok(Json(companies.iter().map(CompanyFullDto::from).collect()))
}

/// `POST /api/companycollections`
///
/// All companies are validated, then stored in a single repository write.
/// Violations are reported as `[index].field`.
pub async fn create_company_collection(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response> {
    let companies: Vec<CompanyAddDto> =
        serde_json::from_slice(&body).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
    validate_all(&companies)?;

    let created_companies: Vec<_> = state
        .repository
        .add_companies(companies.into_iter().map(CompanyAddDto::into_entities).collect())
        .await?
        .into_iter()
        .map(|(company, _)| company)
        .collect();

    let ids: Vec<_> = created_companies.iter().map(|c| c.id).collect();
    tracing::info!(count = ids.len(), "company collection created");

    let dtos: Vec<CompanyDto> = created_companies.iter().map(CompanyDto::from).collect();
    let uri = format!("{}/{}", COMPANY_COLLECTIONS_PATH, format_id_list(&ids));
    created(&uri, to_json(&dtos)?)
}
