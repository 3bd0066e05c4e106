//! HATEOAS link builders
//!
//! Hrefs are relative to the server root so responses stay correct behind
//! proxies that rewrite the host.

use crate::core::paging::{PageRequest, PagedList};
use crate::models::{CompanyParameters, EmployeeParameters, LinkDto};
use uuid::Uuid;

pub const API_ROOT: &str = "/api";
pub const COMPANIES_PATH: &str = "/api/companies";
pub const COMPANY_COLLECTIONS_PATH: &str = "/api/companycollections";

pub fn company_uri(company_id: Uuid) -> String {
    format!("{}/{}", COMPANIES_PATH, company_id)
}

pub fn employees_uri(company_id: Uuid) -> String {
    format!("{}/{}/employees", COMPANIES_PATH, company_id)
}

pub fn employee_uri(company_id: Uuid, employee_id: Uuid) -> String {
    format!("{}/{}", employees_uri(company_id), employee_id)
}

/// Links of a single company
pub fn company_links(company_id: Uuid, fields: Option<&str>) -> Vec<LinkDto> {
    let self_href = match fields.map(str::trim).filter(|f| !f.is_empty()) {
        Some(fields) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("fields", fields)
                .finish();
            format!("{}?{}", company_uri(company_id), query)
        }
        None => company_uri(company_id),
    };

    vec![
        LinkDto::new(self_href, "self", "GET"),
        LinkDto::new(company_uri(company_id), "delete_company", "DELETE"),
        LinkDto::new(employees_uri(company_id), "create_employee_for_company", "POST"),
        LinkDto::new(employees_uri(company_id), "employees", "GET"),
    ]
}

/// Requests for the pages either side of `page`, when they exist
pub fn neighbour_pages<T>(
    page: PageRequest,
    list: &PagedList<T>,
) -> (Option<PageRequest>, Option<PageRequest>) {
    let number = page.page_number();
    let previous = list
        .has_previous()
        .then(|| page.with_page_number(number - 1));
    let next = list.has_next().then(|| page.with_page_number(number + 1));
    (previous, next)
}

pub fn companies_page_uri(parameters: &CompanyParameters, page: PageRequest) -> String {
    format!("{}?{}", COMPANIES_PATH, parameters.to_query_string(page))
}

pub fn employees_page_uri(
    company_id: Uuid,
    parameters: &EmployeeParameters,
    page: PageRequest,
) -> String {
    format!("{}?{}", employees_uri(company_id), parameters.to_query_string(page))
}

/// Links of a page of companies
pub fn companies_links<T>(
    parameters: &CompanyParameters,
    page: PageRequest,
    list: &PagedList<T>,
) -> Vec<LinkDto> {
    let mut links = vec![LinkDto::new(
        companies_page_uri(parameters, page),
        "self",
        "GET",
    )];

    let (previous, next) = neighbour_pages(page, list);
    if let Some(previous) = previous {
        links.push(LinkDto::new(
            companies_page_uri(parameters, previous),
            "previous_page",
            "GET",
        ));
    }
    if let Some(next) = next {
        links.push(LinkDto::new(
            companies_page_uri(parameters, next),
            "next_page",
            "GET",
        ));
    }
    links
}

/// Entry points advertised by `GET /api`
pub fn root_links() -> Vec<LinkDto> {
    vec![
        LinkDto::new(API_ROOT, "self", "GET"),
        LinkDto::new(COMPANIES_PATH, "companies", "GET"),
        LinkDto::new(COMPANIES_PATH, "create_company", "POST"),
    ]
}
