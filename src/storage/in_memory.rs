//! In-memory implementation of CompanyRepository for testing and development

use crate::core::error::{EntityError, Result, RoutineError, ValidationError};
use crate::core::field::compare_text;
use crate::core::mapping::MappingTable;
use crate::core::paging::{PageRequest, PagedList};
use crate::core::query::Query;
use crate::core::sort::apply_sort;
use crate::models::parameters::non_blank;
use crate::models::{Company, CompanyParameters, Employee, EmployeeParameters, Gender};
use crate::storage::repository::CompanyRepository;
use crate::storage::seed;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    companies: IndexMap<Uuid, Company>,
    employees: IndexMap<Uuid, Employee>,
}

/// In-memory company repository
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// maps keep insertion order, which is the order of an unsorted list.
#[derive(Clone, Default)]
pub struct InMemoryCompanyRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCompanyRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given rows as-is
    pub fn with_data(companies: Vec<Company>, employees: Vec<Employee>) -> Self {
        let tables = Tables {
            companies: companies.into_iter().map(|c| (c.id, c)).collect(),
            employees: employees.into_iter().map(|e| (e.id, e)).collect(),
        };
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// A repository preloaded with the sample data set
    pub fn seeded() -> Self {
        Self::with_data(seed::companies(), seed::employees())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| RoutineError::Internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| RoutineError::Internal(format!("Failed to acquire write lock: {}", e)))
    }
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.contains(needle))
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn get_companies(
        &self,
        parameters: &CompanyParameters,
        page: PageRequest,
        mapping: &MappingTable<Company>,
    ) -> Result<PagedList<Company>> {
        let snapshot: Vec<Company> = self.read()?.companies.values().cloned().collect();
        let mut query = Query::new(snapshot);

        if let Some(name) = non_blank(parameters.company_name.as_deref()) {
            let name = name.to_string();
            query = query.filter(move |c: &Company| c.name == name);
        }
        if let Some(term) = non_blank(parameters.search_term.as_deref()) {
            let term = term.to_string();
            query = query.filter(move |c: &Company| {
                c.name.contains(&term) || contains(c.introduction.as_deref(), &term)
            });
        }

        let query = apply_sort(query, Some(parameters.order_by()), mapping)?;
        PagedList::from_request(&query, page).await
    }

    async fn get_company(&self, company_id: Uuid) -> Result<Option<Company>> {
        Ok(self.read()?.companies.get(&company_id).cloned())
    }

    async fn get_companies_by_ids(&self, company_ids: &[Uuid]) -> Result<Vec<Company>> {
        let tables = self.read()?;
        let mut companies: Vec<Company> = tables
            .companies
            .values()
            .filter(|c| company_ids.contains(&c.id))
            .cloned()
            .collect();
        companies.sort_by(|a, b| compare_text(&a.name, &b.name));
        Ok(companies)
    }

    async fn add_company(
        &self,
        company: Company,
        employees: Vec<Employee>,
    ) -> Result<(Company, Vec<Employee>)> {
        self.add_companies(vec![(company, employees)])
            .await?
            .pop()
            .ok_or_else(|| RoutineError::Internal("company was not stored".to_string()))
    }

    async fn add_companies(
        &self,
        companies: Vec<(Company, Vec<Employee>)>,
    ) -> Result<Vec<(Company, Vec<Employee>)>> {
        let stored: Vec<(Company, Vec<Employee>)> = companies
            .into_iter()
            .map(|(mut company, employees)| {
                company.id = Uuid::new_v4();
                let employees = employees
                    .into_iter()
                    .map(|mut employee| {
                        employee.id = Uuid::new_v4();
                        employee.company_id = company.id;
                        employee
                    })
                    .collect();
                (company, employees)
            })
            .collect();

        let mut tables = self.write()?;
        for (company, employees) in &stored {
            tables.companies.insert(company.id, company.clone());
            for employee in employees {
                tables.employees.insert(employee.id, employee.clone());
            }
            tracing::debug!(company_id = %company.id, employees = employees.len(), "company added");
        }
        Ok(stored)
    }

    async fn delete_company(&self, company_id: Uuid) -> Result<bool> {
        let mut tables = self.write()?;
        if tables.companies.shift_remove(&company_id).is_none() {
            return Ok(false);
        }

        let before = tables.employees.len();
        tables.employees.retain(|_, e| e.company_id != company_id);
        tracing::debug!(
            company_id = %company_id,
            employees_removed = before - tables.employees.len(),
            "company deleted"
        );
        Ok(true)
    }

    async fn company_exists(&self, company_id: Uuid) -> Result<bool> {
        Ok(self.read()?.companies.contains_key(&company_id))
    }

    async fn get_employees(
        &self,
        company_id: Uuid,
        parameters: &EmployeeParameters,
        page: PageRequest,
        mapping: &MappingTable<Employee>,
    ) -> Result<PagedList<Employee>> {
        let gender = match non_blank(parameters.gender_display.as_deref()) {
            Some(value) => Some(value.parse::<Gender>().map_err(|_| {
                ValidationError::InvalidFilter {
                    parameter: "genderDisplay".to_string(),
                    value: value.to_string(),
                }
            })?),
            None => None,
        };

        let snapshot: Vec<Employee> = self
            .read()?
            .employees
            .values()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect();
        let mut query = Query::new(snapshot);

        if let Some(gender) = gender {
            query = query.filter(move |e: &Employee| e.gender == gender);
        }
        if let Some(q) = non_blank(parameters.q.as_deref()) {
            let q = q.to_string();
            query = query.filter(move |e: &Employee| {
                e.employee_no.contains(&q) || e.first_name.contains(&q) || e.last_name.contains(&q)
            });
        }

        let query = apply_sort(query, Some(parameters.order_by()), mapping)?;
        PagedList::from_request(&query, page).await
    }

    async fn get_employee(&self, company_id: Uuid, employee_id: Uuid) -> Result<Option<Employee>> {
        Ok(self
            .read()?
            .employees
            .get(&employee_id)
            .filter(|e| e.company_id == company_id)
            .cloned())
    }

    async fn add_employee(&self, company_id: Uuid, mut employee: Employee) -> Result<Employee> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(&company_id) {
            return Err(EntityError::NotFound {
                entity_type: "Company",
                id: company_id,
            }
            .into());
        }

        if employee.id.is_nil() {
            employee.id = Uuid::new_v4();
        } else if tables.employees.contains_key(&employee.id) {
            return Err(EntityError::Conflict {
                entity_type: "Employee",
                id: employee.id,
            }
            .into());
        }
        employee.company_id = company_id;
        tables.employees.insert(employee.id, employee.clone());

        tracing::debug!(company_id = %company_id, employee_id = %employee.id, "employee added");
        Ok(employee)
    }

    async fn update_employee(&self, employee: Employee) -> Result<Employee> {
        let mut tables = self.write()?;
        let slot = tables
            .employees
            .get_mut(&employee.id)
            .filter(|existing| existing.company_id == employee.company_id)
            .ok_or(EntityError::NotFound {
                entity_type: "Employee",
                id: employee.id,
            })?;
        *slot = employee.clone();

        tracing::debug!(employee_id = %employee.id, "employee updated");
        Ok(employee)
    }

    async fn delete_employee(&self, company_id: Uuid, employee_id: Uuid) -> Result<bool> {
        let mut tables = self.write()?;
        let belongs = tables
            .employees
            .get(&employee_id)
            .is_some_and(|e| e.company_id == company_id);
        if belongs {
            tables.employees.shift_remove(&employee_id);
            tracing::debug!(employee_id = %employee_id, "employee deleted");
        }
        Ok(belongs)
    }
}
