//! Sample companies and employees loaded by the development server

use crate::models::{Company, Employee, Gender};
use chrono::NaiveDate;
use uuid::{Uuid, uuid};

const MICROSOFT: Uuid = uuid!("bbdee09c-089b-4d30-bece-44df5923716c");
const GOOGLE: Uuid = uuid!("6fb600c1-9011-4fd7-9234-881379716440");
const ALIPAPA: Uuid = uuid!("5efc910b-2f45-43df-afee-620d40542853");

fn company(id: Uuid, name: &str, introduction: &str) -> Company {
    Company {
        id,
        name: name.to_string(),
        country: None,
        industry: None,
        product: None,
        introduction: Some(introduction.to_string()),
        bankrupt_time: None,
    }
}

fn employee(
    id: Uuid,
    company_id: Uuid,
    employee_no: &str,
    name: (&str, &str),
    gender: Gender,
    born: (i32, u32, u32),
) -> Option<Employee> {
    Some(Employee {
        id,
        company_id,
        employee_no: employee_no.to_string(),
        first_name: name.0.to_string(),
        last_name: name.1.to_string(),
        gender,
        date_of_birth: NaiveDate::from_ymd_opt(born.0, born.1, born.2)?,
    })
}

pub fn companies() -> Vec<Company> {
    vec![
        company(MICROSOFT, "Microsoft", "Great Company"),
        company(GOOGLE, "Google", "Don't be evil"),
        company(ALIPAPA, "Alipapa", "Fubao Company"),
    ]
}

pub fn employees() -> Vec<Employee> {
    [
        employee(
            uuid!("ca268a19-0f39-4d8b-b8d6-5bace54f8027"),
            MICROSOFT,
            "M001",
            ("William", "Gates"),
            Gender::Male,
            (1955, 10, 28),
        ),
        employee(
            uuid!("265348d2-1276-4ada-ae33-4c1b8348edce"),
            MICROSOFT,
            "M024",
            ("Kent", "Back"),
            Gender::Male,
            (1998, 1, 14),
        ),
        employee(
            uuid!("47b70abc-98b8-4fdc-b9fa-5dd6716f6e6b"),
            GOOGLE,
            "G003",
            ("Mary", "King"),
            Gender::Female,
            (1986, 11, 4),
        ),
        employee(
            uuid!("059e2fcb-e5a4-4188-9b46-06184bcb111b"),
            GOOGLE,
            "G007",
            ("Kevin", "Richardson"),
            Gender::Male,
            (1977, 4, 6),
        ),
        employee(
            uuid!("a868ff18-3398-4598-b420-4878974a517a"),
            ALIPAPA,
            "A001",
            ("Jack", "Ma"),
            Gender::Male,
            (1964, 9, 10),
        ),
        employee(
            uuid!("2c3bb40c-5907-4eb7-bb2c-7d62edb430c9"),
            ALIPAPA,
            "A201",
            ("Lorraine", "Shaw"),
            Gender::Female,
            (1997, 2, 6),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_employee_belongs_to_a_seeded_company() {
        let companies = companies();
        let employees = employees();
        assert_eq!(employees.len(), 6);
        assert!(
            employees
                .iter()
                .all(|e| companies.iter().any(|c| c.id == e.company_id))
        );
    }
}
