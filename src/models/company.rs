//! Company entity and its input/output shapes

use crate::core::error::FieldValidationError;
use crate::core::validation::rules::{CrossFieldRules, collect_violations, nested_violations};
use crate::models::employee::{Employee, EmployeeAddDto};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stored company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub product: Option<String>,
    pub introduction: Option<String>,
    pub bankrupt_time: Option<DateTime<Utc>>,
}

crate::impl_shape!(Company, "Company", {
    id => "id",
    name => "name",
    country => "country",
    industry => "industry",
    product => "product",
    introduction => "introduction",
    bankrupt_time => "bankruptTime",
});

crate::impl_entity!(Company, "companies");

/// Friendly output shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: Uuid,
    pub name: String,
}

crate::impl_shape!(CompanyDto, "CompanyDto", {
    id => "id",
    name => "name",
});

impl From<&Company> for CompanyDto {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
        }
    }
}

/// Output shape carrying every company field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFullDto {
    pub id: Uuid,
    pub name: String,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub product: Option<String>,
    pub introduction: Option<String>,
    pub bankrupt_time: Option<DateTime<Utc>>,
}

crate::impl_shape!(CompanyFullDto, "CompanyFullDto", {
    id => "id",
    name => "name",
    country => "country",
    industry => "industry",
    product => "product",
    introduction => "introduction",
    bankrupt_time => "bankruptTime",
});

impl From<&Company> for CompanyFullDto {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            country: company.country.clone(),
            industry: company.industry.clone(),
            product: company.product.clone(),
            introduction: company.introduction.clone(),
            bankrupt_time: company.bankrupt_time,
        }
    }
}

/// Input shape for creating a company, optionally with its employees
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyAddDto {
    #[validate(length(min = 1, max = 100, message = "name is required and at most 100 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "country must be at most 100 characters"))]
    pub country: Option<String>,
    #[validate(length(max = 100, message = "industry must be at most 100 characters"))]
    pub industry: Option<String>,
    #[validate(length(max = 100, message = "product must be at most 100 characters"))]
    pub product: Option<String>,
    #[validate(length(max = 500, message = "introduction must be at most 500 characters"))]
    pub introduction: Option<String>,
    pub employees: Vec<EmployeeAddDto>,
}

impl CrossFieldRules for CompanyAddDto {
    fn cross_field_violations(&self) -> Vec<FieldValidationError> {
        self.employees
            .iter()
            .enumerate()
            .flat_map(|(index, employee)| {
                nested_violations(&format!("employees[{}]", index), employee)
            })
            .collect()
    }
}

impl CompanyAddDto {
    /// Split into a company and its employees; ids are assigned on insert
    pub fn into_entities(self) -> (Company, Vec<Employee>) {
        self.into_entities_with(None)
    }

    fn into_entities_with(self, bankrupt_time: Option<DateTime<Utc>>) -> (Company, Vec<Employee>) {
        let company = Company {
            id: Uuid::nil(),
            name: self.name,
            country: self.country,
            industry: self.industry,
            product: self.product,
            introduction: self.introduction,
            bankrupt_time,
        };
        let employees = self
            .employees
            .into_iter()
            .map(|employee| employee.into_entity(Uuid::nil()))
            .collect();
        (company, employees)
    }
}

/// Input shape for creating a company that already went bankrupt
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAddWithBankruptTimeDto {
    #[serde(flatten)]
    pub company: CompanyAddDto,
    #[serde(default)]
    pub bankrupt_time: Option<DateTime<Utc>>,
}

impl CrossFieldRules for CompanyAddWithBankruptTimeDto {
    fn cross_field_violations(&self) -> Vec<FieldValidationError> {
        collect_violations(&self.company)
    }
}

impl CompanyAddWithBankruptTimeDto {
    pub fn into_entities(self) -> (Company, Vec<Employee>) {
        self.company.into_entities_with(self.bankrupt_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{Entity, Shape};
    use crate::core::validation::validate_record;

    fn company() -> Company {
        Company {
            id: Uuid::new_v4(),
            name: "Microsoft".to_string(),
            country: Some("USA".to_string()),
            industry: Some("Software".to_string()),
            product: Some("Software".to_string()),
            introduction: Some("Great Company".to_string()),
            bankrupt_time: None,
        }
    }

    #[test]
    fn test_shapes_declare_wire_names() {
        assert_eq!(CompanyDto::field_names(), &["id", "name"]);
        assert_eq!(CompanyFullDto::field_names().len(), 7);
        assert_eq!(CompanyFullDto::resolve_field("BankruptTime"), Some("bankruptTime"));
        assert_eq!(Company::resource_name(), "companies");
    }

    #[test]
    fn test_output_shapes_copy_fields() {
        let company = company();
        let friendly = CompanyDto::from(&company);
        assert_eq!(friendly.id, company.id);
        assert_eq!(friendly.name, "Microsoft");

        let full = CompanyFullDto::from(&company);
        assert_eq!(full.introduction.as_deref(), Some("Great Company"));
        assert!(full.bankrupt_time.is_none());
    }

    #[test]
    fn test_add_dto_accepts_nested_employees() {
        let dto: CompanyAddDto = serde_json::from_value(serde_json::json!({
            "name": "Acme",
            "introduction": "Makes everything",
            "employees": [{
                "employeeNo": "A001",
                "firstName": "Wile",
                "lastName": "Coyote",
                "gender": "Male",
                "dateOfBirth": "1949-09-17"
            }]
        }))
        .unwrap();
        assert!(validate_record(&dto).is_ok());

        let (company, employees) = dto.into_entities();
        assert_eq!(company.name, "Acme");
        assert!(company.bankrupt_time.is_none());
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].first_name, "Wile");
    }

    #[test]
    fn test_nested_employee_violations_are_prefixed() {
        let dto: CompanyAddDto = serde_json::from_value(serde_json::json!({
            "name": "Acme",
            "employees": [{
                "employeeNo": "A1",
                "firstName": "Wile",
                "lastName": "Coyote"
            }]
        }))
        .unwrap();

        let violations = collect_violations(&dto);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "employees[0].employeeNo");
    }

    #[test]
    fn test_name_rules() {
        let dto = CompanyAddDto::default();
        assert!(validate_record(&dto).is_err());

        let dto = CompanyAddDto {
            name: "x".repeat(101),
            ..CompanyAddDto::default()
        };
        assert!(validate_record(&dto).is_err());

        let dto = CompanyAddDto {
            name: "Acme".to_string(),
            introduction: Some("x".repeat(501)),
            ..CompanyAddDto::default()
        };
        let violations = collect_violations(&dto);
        assert_eq!(violations[0].field, "introduction");
    }

    #[test]
    fn test_bankrupt_time_shape_flattens_company_fields() {
        let dto: CompanyAddWithBankruptTimeDto = serde_json::from_value(serde_json::json!({
            "name": "Enron",
            "bankruptTime": "2001-12-02T00:00:00Z"
        }))
        .unwrap();
        assert!(validate_record(&dto).is_ok());

        let (company, employees) = dto.into_entities();
        assert_eq!(company.name, "Enron");
        assert!(company.bankrupt_time.is_some());
        assert!(employees.is_empty());
    }

    #[test]
    fn test_bankrupt_time_shape_runs_company_rules() {
        let dto: CompanyAddWithBankruptTimeDto =
            serde_json::from_value(serde_json::json!({ "name": "" })).unwrap();
        assert!(validate_record(&dto).is_err());
    }
}
