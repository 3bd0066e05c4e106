//! Repository abstraction over companies and their employees

use crate::core::error::Result;
use crate::core::mapping::MappingTable;
use crate::core::paging::{PageRequest, PagedList};
use crate::models::{Company, CompanyParameters, Employee, EmployeeParameters};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence operations used by the HTTP handlers
///
/// List operations filter, sort through the given mapping table and page in
/// one go. Sort expressions must already be validated against that table;
/// an unknown key here is a defect and surfaces as an error.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Filtered, sorted page of companies
    async fn get_companies(
        &self,
        parameters: &CompanyParameters,
        page: PageRequest,
        mapping: &MappingTable<Company>,
    ) -> Result<PagedList<Company>>;

    /// Get a company by id
    async fn get_company(&self, company_id: Uuid) -> Result<Option<Company>>;

    /// Companies whose id is in `company_ids`, ordered by name
    async fn get_companies_by_ids(&self, company_ids: &[Uuid]) -> Result<Vec<Company>>;

    /// Insert a company with its employees, assigning fresh ids to all
    async fn add_company(
        &self,
        company: Company,
        employees: Vec<Employee>,
    ) -> Result<(Company, Vec<Employee>)>;

    /// Insert several companies with their employees as one write
    ///
    /// Either every company is stored or none is.
    async fn add_companies(
        &self,
        companies: Vec<(Company, Vec<Employee>)>,
    ) -> Result<Vec<(Company, Vec<Employee>)>>;

    /// Delete a company and every employee it has
    ///
    /// Returns false when the company does not exist.
    async fn delete_company(&self, company_id: Uuid) -> Result<bool>;

    async fn company_exists(&self, company_id: Uuid) -> Result<bool>;

    /// Filtered, sorted page of one company's employees
    async fn get_employees(
        &self,
        company_id: Uuid,
        parameters: &EmployeeParameters,
        page: PageRequest,
        mapping: &MappingTable<Employee>,
    ) -> Result<PagedList<Employee>>;

    /// Get an employee, only if it belongs to `company_id`
    async fn get_employee(&self, company_id: Uuid, employee_id: Uuid) -> Result<Option<Employee>>;

    /// Insert an employee under `company_id`
    ///
    /// A nil id is replaced with a fresh one; any other id is kept, which is
    /// how upserts create employees at a client chosen id. An id already used
    /// by any employee, in this company or another, is a conflict.
    async fn add_employee(&self, company_id: Uuid, employee: Employee) -> Result<Employee>;

    /// Replace an existing employee
    async fn update_employee(&self, employee: Employee) -> Result<Employee>;

    /// Returns false when the employee does not exist under `company_id`
    async fn delete_employee(&self, company_id: Uuid, employee_id: Uuid) -> Result<bool>;
}
