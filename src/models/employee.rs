//! Employee entity and its input/output shapes

use crate::core::error::FieldValidationError;
use crate::core::field::FieldValue;
use crate::core::validation::rules::{CrossFieldRules, must_differ, record_must_differ};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("Male"),
            Gender::Female => f.write_str("Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("male") {
            Ok(Gender::Male)
        } else if s.eq_ignore_ascii_case("female") {
            Ok(Gender::Female)
        } else {
            Err(format!("unknown gender '{}'", s))
        }
    }
}

impl From<Gender> for FieldValue {
    fn from(gender: Gender) -> Self {
        FieldValue::String(gender.to_string())
    }
}

/// Stored employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
}

crate::impl_shape!(Employee, "Employee", {
    id => "id",
    company_id => "companyId",
    employee_no => "employeeNo",
    first_name => "firstName",
    last_name => "lastName",
    gender => "gender",
    date_of_birth => "dateOfBirth",
});

crate::impl_entity!(Employee, "employees");

/// Whole years between `date_of_birth` and `today`
///
/// One less while this year's birthday is still ahead. Births after
/// `today` count as zero.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0)
}

/// Output shape of an employee
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: Uuid,
    pub company_id: Uuid,
    pub employee_no: String,
    pub name: String,
    pub gender_display: String,
    pub age: i32,
}

crate::impl_shape!(EmployeeDto, "EmployeeDto", {
    id => "id",
    company_id => "companyId",
    employee_no => "employeeNo",
    name => "name",
    gender_display => "genderDisplay",
    age => "age",
});

impl EmployeeDto {
    /// Build the output shape with ages computed against `today`
    pub fn from_entity(employee: &Employee, today: NaiveDate) -> Self {
        Self {
            id: employee.id,
            company_id: employee.company_id,
            employee_no: employee.employee_no.clone(),
            name: format!("{} {}", employee.first_name, employee.last_name),
            gender_display: employee.gender.to_string(),
            age: age_on(employee.date_of_birth, today),
        }
    }
}

impl From<&Employee> for EmployeeDto {
    fn from(employee: &Employee) -> Self {
        Self::from_entity(employee, Utc::now().date_naive())
    }
}

fn employee_violations(
    record: &str,
    employee_no: &str,
    first_name: &str,
    last_name: &str,
) -> Vec<FieldValidationError> {
    let mut violations = must_differ(
        ("firstName", first_name),
        ("lastName", last_name),
        "first name and last name must differ",
    );
    violations.extend(record_must_differ(
        record,
        employee_no,
        first_name,
        "employee number must differ from first name",
    ));
    violations
}

/// Input shape for creating an employee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeAddDto {
    #[validate(length(equal = 4, message = "employeeNo must be exactly 4 characters"))]
    pub employee_no: String,
    #[validate(length(min = 1, max = 50, message = "firstName is required and at most 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "lastName is required and at most 50 characters"))]
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
}

impl CrossFieldRules for EmployeeAddDto {
    fn cross_field_violations(&self) -> Vec<FieldValidationError> {
        employee_violations(
            "EmployeeAddDto",
            &self.employee_no,
            &self.first_name,
            &self.last_name,
        )
    }
}

impl EmployeeAddDto {
    /// The new employee; its id is assigned on insert
    pub fn into_entity(self, company_id: Uuid) -> Employee {
        Employee {
            id: Uuid::nil(),
            company_id,
            employee_no: self.employee_no,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
        }
    }
}

/// Input shape for replacing or patching an employee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeUpdateDto {
    #[validate(length(equal = 4, message = "employeeNo must be exactly 4 characters"))]
    pub employee_no: String,
    #[validate(length(min = 1, max = 50, message = "firstName is required and at most 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "lastName is required and at most 50 characters"))]
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
}

impl CrossFieldRules for EmployeeUpdateDto {
    fn cross_field_violations(&self) -> Vec<FieldValidationError> {
        employee_violations(
            "EmployeeUpdateDto",
            &self.employee_no,
            &self.first_name,
            &self.last_name,
        )
    }
}

impl From<&Employee> for EmployeeUpdateDto {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_no: employee.employee_no.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            gender: employee.gender,
            date_of_birth: employee.date_of_birth,
        }
    }
}

impl EmployeeUpdateDto {
    /// An employee with a caller chosen id, for upserts
    pub fn into_entity(self, company_id: Uuid, id: Uuid) -> Employee {
        Employee {
            id,
            company_id,
            employee_no: self.employee_no,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
        }
    }

    /// Overwrite every updatable field of `employee`
    pub fn apply_to(self, employee: &mut Employee) {
        employee.employee_no = self.employee_no;
        employee.first_name = self.first_name;
        employee.last_name = self.last_name;
        employee.gender = self.gender;
        employee.date_of_birth = self.date_of_birth;
    }
}
