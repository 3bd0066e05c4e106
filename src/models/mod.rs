//! Domain models: storage entities, their output and input shapes, and the
//! property mappings used to sort them

pub mod company;
pub mod employee;
pub mod link;
pub mod parameters;

pub use company::{Company, CompanyAddDto, CompanyAddWithBankruptTimeDto, CompanyDto, CompanyFullDto};
pub use employee::{Employee, EmployeeAddDto, EmployeeDto, EmployeeUpdateDto, Gender};
pub use link::LinkDto;
pub use parameters::{CompanyParameters, EmployeeParameters};

use crate::core::error::ConfigError;
use crate::core::mapping::{MappingTable, PropertyMappingService};

/// Sort keys of the company list, over [`Company`]
pub fn company_mapping() -> Result<MappingTable<Company>, ConfigError> {
    MappingTable::<Company>::builder()
        .map("Id", ["Id"])
        .map("Name", ["Name"])
        .map("Country", ["Country"])
        .map("Industry", ["Industry"])
        .map("Product", ["Product"])
        .map("Introduction", ["Introduction"])
        .map("BankruptTime", ["BankruptTime"])
        .build()
}

/// Sort keys of the employee list, over [`Employee`]
///
/// `Age` runs against date of birth, so ascending age is descending birth
/// date.
pub fn employee_mapping() -> Result<MappingTable<Employee>, ConfigError> {
    MappingTable::<Employee>::builder()
        .map("Id", ["Id"])
        .map("CompanyId", ["CompanyId"])
        .map("EmployeeNo", ["EmployeeNo"])
        .map("Name", ["FirstName", "LastName"])
        .map("GenderDisplay", ["Gender"])
        .map_reversed("Age", ["DateOfBirth"])
        .build()
}

/// The registry every server instance starts with
pub fn property_mappings() -> Result<PropertyMappingService, ConfigError> {
    let mut service = PropertyMappingService::new();
    service.register::<CompanyFullDto, Company>(company_mapping()?)?;
    service.register::<EmployeeDto, Employee>(employee_mapping()?)?;
    tracing::info!("property mappings registered");
    Ok(service)
}
