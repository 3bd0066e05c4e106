//! Company resource handlers

use super::{FieldsQuery, PAGINATION_HEADER, location, pagination_header, to_json, with_links};
use crate::core::error::{EntityError, Result};
use crate::core::shaping::{ShapedRecord, shape_collection, shape_data};
use crate::core::validation::check_fields;
use crate::core::validation::extractor::parse_validated;
use crate::models::{
    Company, CompanyAddDto, CompanyAddWithBankruptTimeDto, CompanyDto, CompanyFullDto,
    CompanyParameters,
};
use crate::server::host::AppState;
use crate::server::links::{
    companies_links, companies_page_uri, company_links, company_uri, neighbour_pages,
};
use crate::server::negotiation::{CompanyInputFormat, OutputFormat};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header::{ALLOW, LOCATION};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use uuid::Uuid;

/// Methods advertised by `OPTIONS /api/companies`
pub const COMPANIES_ALLOW: &str = "DELETE,GET,PATCH,PUT,OPTIONS";

/// Shape companies as the negotiated output shape
fn shape_companies(
    companies: &[Company],
    fields: Option<&str>,
    format: OutputFormat,
) -> Result<Vec<ShapedRecord>> {
    let shaped = if format.full {
        let dtos: Vec<CompanyFullDto> = companies.iter().map(CompanyFullDto::from).collect();
        shape_collection(&dtos, fields)?
    } else {
        let dtos: Vec<CompanyDto> = companies.iter().map(CompanyDto::from).collect();
        shape_collection(&dtos, fields)?
    };
    Ok(shaped)
}

fn check_company_fields(fields: Option<&str>, format: OutputFormat) -> Result<()> {
    if format.full {
        check_fields::<CompanyFullDto>(fields)?;
    } else {
        check_fields::<CompanyDto>(fields)?;
    }
    Ok(())
}

/// `GET|HEAD /api/companies`
///
/// Sort keys are always those of the full shape, whichever shape is
/// returned.
pub async fn get_companies(
    State(state): State<AppState>,
    format: OutputFormat,
    Query(parameters): Query<CompanyParameters>,
) -> Result<Response> {
    state
        .mappings
        .validate_sort_expression::<CompanyFullDto, Company>(parameters.order_by.as_deref())?;
    check_company_fields(parameters.fields(), format)?;

    let page = parameters.page(&state.config.paging);
    let mapping = state.mappings.get_mapping::<CompanyFullDto, Company>()?;
    let companies = state
        .repository
        .get_companies(&parameters, page, mapping)
        .await?;

    let mut metadata = companies.metadata();
    if !format.include_links {
        let (previous, next) = neighbour_pages(page, &companies);
        metadata = metadata.with_links(
            previous.map(|p| companies_page_uri(&parameters, p)),
            next.map(|p| companies_page_uri(&parameters, p)),
        );
    }
    let mut headers = HeaderMap::new();
    headers.insert(PAGINATION_HEADER, pagination_header(&metadata)?);

    let shaped = shape_companies(companies.items(), parameters.fields(), format)?;
    tracing::debug!(
        count = shaped.len(),
        total = companies.total_count(),
        page = companies.current_page(),
        "listed companies"
    );

    if !format.include_links {
        return Ok((headers, Json(shaped)).into_response());
    }

    let value = shaped
        .iter()
        .zip(companies.items())
        .map(|(record, company)| with_links(record, company_links(company.id, None)))
        .collect::<Result<Vec<_>>>()?;
    let body = json!({
        "value": value,
        "links": to_json(&companies_links(&parameters, page, &companies))?,
    });
    Ok((headers, Json(body)).into_response())
}

/// `GET /api/companies/{companyId}`
pub async fn get_company(
    State(state): State<AppState>,
    format: OutputFormat,
    Path(company_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Response> {
    let fields = query.fields.as_deref();
    check_company_fields(fields, format)?;

    let company = state
        .repository
        .get_company(company_id)
        .await?
        .ok_or(EntityError::NotFound {
            entity_type: "Company",
            id: company_id,
        })?;

    let shaped = if format.full {
        shape_data(&CompanyFullDto::from(&company), fields)?
    } else {
        shape_data(&CompanyDto::from(&company), fields)?
    };

    if format.include_links {
        let body = with_links(&shaped, company_links(company_id, fields))?;
        return Ok(Json(body).into_response());
    }
    Ok(Json(shaped).into_response())
}

/// `POST /api/companies`
///
/// The body shape is chosen by `Content-Type`. The created company is
/// returned in the friendly shape with its links.
pub async fn create_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let (company, employees) = match CompanyInputFormat::from_headers(&headers)? {
        CompanyInputFormat::Standard => parse_validated::<CompanyAddDto>(&body)?.into_entities(),
        CompanyInputFormat::WithBankruptTime => {
            parse_validated::<CompanyAddWithBankruptTimeDto>(&body)?.into_entities()
        }
    };

    let (company, employees) = state.repository.add_company(company, employees).await?;
    tracing::info!(
        company_id = %company.id,
        employees = employees.len(),
        "company created"
    );

    let shaped = shape_data(&CompanyDto::from(&company), None)?;
    let body = with_links(&shaped, company_links(company.id, None))?;
    created(&company_uri(company.id), body)
}

/// `DELETE /api/companies/{companyId}`, together with its employees
pub async fn delete_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.repository.delete_company(company_id).await? {
        return Err(EntityError::NotFound {
            entity_type: "Company",
            id: company_id,
        }
        .into());
    }
    tracing::info!(company_id = %company_id, "company deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `OPTIONS /api/companies`
pub async fn companies_options() -> impl IntoResponse {
    (StatusCode::OK, [(ALLOW, HeaderValue::from_static(COMPANIES_ALLOW))])
}

pub(crate) fn created(uri: &str, body: Value) -> Result<Response> {
    Ok((StatusCode::CREATED, [(LOCATION, location(uri)?)], Json(body)).into_response())
}
