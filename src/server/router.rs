//! Route table of the API

use super::handlers::{collections, companies, employees, root};
use super::host::AppState;
use crate::core::error::{Result, RoutineError};
use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::routing::{get, post};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Build every route of the API
///
/// - GET /api - Root links
/// - GET|HEAD|POST|OPTIONS /api/companies - List, create, describe companies
/// - GET|DELETE /api/companies/{company_id} - One company
/// - POST /api/companycollections - Create several companies
/// - GET /api/companycollections/({ids}) - Several companies by id
/// - GET|POST|OPTIONS /api/companies/{company_id}/employees - Employees of a company
/// - GET|PUT|PATCH|DELETE /api/companies/{company_id}/employees/{employee_id} - One employee
///
/// Employee responses carry a public `Cache-Control` header with the
/// configured max-age.
pub fn build_routes(state: AppState) -> Result<Router> {
    let max_age = state.config.caching.employees_max_age_secs;
    let cache_control = HeaderValue::from_str(&format!("public, max-age={}", max_age))
        .map_err(|e| RoutineError::Internal(e.to_string()))?;

    let company_routes = Router::new()
        .route("/api", get(root::get_root))
        .route(
            "/api/companies",
            get(companies::get_companies)
                .post(companies::create_company)
                .options(companies::companies_options),
        )
        .route(
            "/api/companies/{company_id}",
            get(companies::get_company).delete(companies::delete_company),
        )
        .route(
            "/api/companycollections",
            post(collections::create_company_collection),
        )
        .route(
            "/api/companycollections/{ids}",
            get(collections::get_company_collection),
        );

    let employee_routes = Router::new()
        .route(
            "/api/companies/{company_id}/employees",
            get(employees::get_employees)
                .post(employees::create_employee)
                .options(employees::employees_options),
        )
        .route(
            "/api/companies/{company_id}/employees/{employee_id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .patch(employees::partially_update_employee)
                .delete(employees::delete_employee),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            cache_control,
        ));

    Ok(company_routes
        .merge(employee_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
