//! Employee resource handlers, nested under a company

use super::companies::created;
use super::{FieldsQuery, PAGINATION_HEADER, pagination_header, to_json};
use crate::core::error::{EntityError, Result, RoutineError, ValidationError};
use crate::core::shaping::{shape_collection, shape_data};
use crate::core::validation::{Validated, check_fields, validate_record};
use crate::models::{Employee, EmployeeAddDto, EmployeeDto, EmployeeParameters, EmployeeUpdateDto};
use crate::server::host::AppState;
use crate::server::links::{employee_uri, employees_page_uri, neighbour_pages};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header::ALLOW;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// Methods advertised by `OPTIONS .../employees`
pub const EMPLOYEES_ALLOW: &str = "DELETE,GET,PATCH,PUT,OPTIONS";

async fn ensure_company(state: &AppState, company_id: Uuid) -> Result<()> {
    if state.repository.company_exists(company_id).await? {
        Ok(())
    } else {
        Err(EntityError::NotFound {
            entity_type: "Company",
            id: company_id,
        }
        .into())
    }
}

fn employee_not_found(employee_id: Uuid) -> RoutineError {
    EntityError::NotFound {
        entity_type: "Employee",
        id: employee_id,
    }
    .into()
}

/// `GET /api/companies/{companyId}/employees`
pub async fn get_employees(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(parameters): Query<EmployeeParameters>,
) -> Result<Response> {
    ensure_company(&state, company_id).await?;
    state
        .mappings
        .validate_sort_expression::<EmployeeDto, Employee>(parameters.order_by.as_deref())?;
    check_fields::<EmployeeDto>(parameters.fields())?;

    let page = parameters.page(&state.config.paging);
    let mapping = state.mappings.get_mapping::<EmployeeDto, Employee>()?;
    let employees = state
        .repository
        .get_employees(company_id, &parameters, page, mapping)
        .await?;

    let (previous, next) = neighbour_pages(page, &employees);
    let metadata = employees.metadata().with_links(
        previous.map(|p| employees_page_uri(company_id, &parameters, p)),
        next.map(|p| employees_page_uri(company_id, &parameters, p)),
    );
    let mut headers = HeaderMap::new();
    headers.insert(PAGINATION_HEADER, pagination_header(&metadata)?);

    let dtos: Vec<EmployeeDto> = employees.items().iter().map(EmployeeDto::from).collect();
    let shaped = shape_collection(&dtos, parameters.fields())?;
    Ok((headers, Json(shaped)).into_response())
}

/// `GET /api/companies/{companyId}/employees/{employeeId}`
pub async fn get_employee(
    State(state): State<AppState>,
    Path((company_id, employee_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<FieldsQuery>,
) -> Result<Response> {
    let fields = query.fields.as_deref();
    check_fields::<EmployeeDto>(fields)?;
    ensure_company(&state, company_id).await?;

    let employee = state
        .repository
        .get_employee(company_id, employee_id)
        .await?
        .ok_or_else(|| employee_not_found(employee_id))?;

    let shaped = shape_data(&EmployeeDto::from(&employee), fields)?;
    Ok(Json(shaped).into_response())
}

/// `POST /api/companies/{companyId}/employees`
pub async fn create_employee(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Validated(payload): Validated<EmployeeAddDto>,
) -> Result<Response> {
    ensure_company(&state, company_id).await?;

    let employee = state
        .repository
        .add_employee(company_id, payload.into_entity(company_id))
        .await?;
    tracing::info!(company_id = %company_id, employee_id = %employee.id, "employee created");

    created(
        &employee_uri(company_id, employee.id),
        to_json(&EmployeeDto::from(&employee))?,
    )
}

/// Store `update` at `employee_id`: replace when it exists, create otherwise
async fn upsert_employee(
    state: &AppState,
    company_id: Uuid,
    employee_id: Uuid,
    existing: Option<Employee>,
    update: EmployeeUpdateDto,
) -> Result<Response> {
    match existing {
        Some(mut employee) => {
            update.apply_to(&mut employee);
            state.repository.update_employee(employee).await?;
            tracing::info!(company_id = %company_id, employee_id = %employee_id, "employee replaced");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        None => {
            let employee = state
                .repository
                .add_employee(company_id, update.into_entity(company_id, employee_id))
                .await?;
            tracing::info!(company_id = %company_id, employee_id = %employee.id, "employee created by upsert");
            created(
                &employee_uri(company_id, employee.id),
                to_json(&EmployeeDto::from(&employee))?,
            )
        }
    }
}

/// `PUT /api/companies/{companyId}/employees/{employeeId}`
///
/// 204 when an existing employee was replaced, 201 when it was created.
pub async fn update_employee(
    State(state): State<AppState>,
    Path((company_id, employee_id)): Path<(Uuid, Uuid)>,
    Validated(payload): Validated<EmployeeUpdateDto>,
) -> Result<Response> {
    ensure_company(&state, company_id).await?;
    let existing = state.repository.get_employee(company_id, employee_id).await?;
    upsert_employee(&state, company_id, employee_id, existing, payload).await
}

/// `PATCH /api/companies/{companyId}/employees/{employeeId}`
///
/// The JSON Patch document is applied to the update shape of the current
/// employee, or to an empty one when the employee does not exist yet, and
/// the result is validated like a `PUT` body.
pub async fn partially_update_employee(
    State(state): State<AppState>,
    Path((company_id, employee_id)): Path<(Uuid, Uuid)>,
    body: Bytes,
) -> Result<Response> {
    ensure_company(&state, company_id).await?;

    let patch: json_patch::Patch =
        serde_json::from_slice(&body).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;

    let existing = state.repository.get_employee(company_id, employee_id).await?;
    let base = existing
        .as_ref()
        .map(EmployeeUpdateDto::from)
        .unwrap_or_default();

    let mut document = to_json(&base)?;
    json_patch::patch(&mut document, &patch.0).map_err(|e| ValidationError::InvalidPatch {
        message: e.to_string(),
    })?;

    let update: EmployeeUpdateDto =
        serde_json::from_value(document).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
    validate_record(&update)?;

    upsert_employee(&state, company_id, employee_id, existing, update).await
}

/// `DELETE /api/companies/{companyId}/employees/{employeeId}`
pub async fn delete_employee(
    State(state): State<AppState>,
    Path((company_id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    ensure_company(&state, company_id).await?;
    if !state.repository.delete_employee(company_id, employee_id).await? {
        return Err(employee_not_found(employee_id));
    }
    tracing::info!(company_id = %company_id, employee_id = %employee_id, "employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `OPTIONS /api/companies/{companyId}/employees`
pub async fn employees_options() -> impl IntoResponse {
    (StatusCode::OK, [(ALLOW, HeaderValue::from_static(EMPLOYEES_ALLOW))])
}
