//! Query string parameters of the list endpoints

use crate::config::PagingConfig;
use crate::core::paging::PageRequest;
use serde::{Deserialize, Serialize};

/// Sort applied when the client sends no `orderBy`
pub const DEFAULT_ORDER_BY: &str = "Name";

/// `GET /api/companies` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyParameters {
    /// Exact name match
    pub company_name: Option<String>,
    /// Substring of name or introduction
    pub search_term: Option<String>,
    pub page_number: Option<usize>,
    pub page_size: Option<usize>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

impl CompanyParameters {
    pub fn order_by(&self) -> &str {
        self.order_by.as_deref().unwrap_or(DEFAULT_ORDER_BY)
    }

    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }

    pub fn page(&self, config: &PagingConfig) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size, config)
    }

    /// Query string that reproduces these parameters for `page`
    pub fn to_query_string(&self, page: PageRequest) -> String {
        encode_query(&[
            ("pageNumber", Some(page.page_number().to_string())),
            ("pageSize", Some(page.page_size().to_string())),
            ("companyName", self.company_name.clone()),
            ("searchTerm", self.search_term.clone()),
            ("orderBy", self.order_by.clone()),
            ("fields", self.fields.clone()),
        ])
    }
}

/// `GET /api/companies/{companyId}/employees` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeParameters {
    /// `Male` or `Female`, any case
    pub gender_display: Option<String>,
    /// Substring of employee number, first or last name
    pub q: Option<String>,
    pub page_number: Option<usize>,
    pub page_size: Option<usize>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

impl EmployeeParameters {
    pub fn order_by(&self) -> &str {
        self.order_by.as_deref().unwrap_or(DEFAULT_ORDER_BY)
    }

    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }

    pub fn page(&self, config: &PagingConfig) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size, config)
    }

    pub fn to_query_string(&self, page: PageRequest) -> String {
        encode_query(&[
            ("pageNumber", Some(page.page_number().to_string())),
            ("pageSize", Some(page.page_size().to_string())),
            ("genderDisplay", self.gender_display.clone()),
            ("q", self.q.clone()),
            ("orderBy", self.order_by.clone()),
            ("fields", self.fields.clone()),
        ])
    }
}

fn encode_query(pairs: &[(&str, Option<String>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Trimmed value, or `None` when missing or blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
