//! Employees (`/Empleados`).

use serde::{Deserialize, Serialize};

use crate::entities::{contains_ci, required};
use crate::error::ValidationError;
use crate::resource::{Entity, EntityId, ResourceClient, Routes};

pub const ROUTES: Routes = Routes::rest("/Empleados");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub dni: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    pub dni: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
}

impl From<NewEmployee> for EmployeePatch {
    fn from(draft: NewEmployee) -> Self {
        Self {
            first_name: Some(draft.first_name),
            last_name: Some(draft.last_name),
            email: Some(draft.email),
            dni: Some(draft.dni),
        }
    }
}

impl Entity for Employee {
    type Draft = NewEmployee;
    type Patch = EmployeePatch;
    const KIND: &'static str = "employee";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub fn client(base_url: &str) -> ResourceClient<Employee> {
    ResourceClient::new(base_url, ROUTES)
}

/// Employees whose name, surname or email contain `term`.
pub fn search<'a>(employees: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    let term = term.trim();
    employees
        .iter()
        .filter(|e| {
            contains_ci(&e.first_name, term) || contains_ci(&e.last_name, term) || contains_ci(&e.email, term)
        })
        .collect()
}

/// Employee modal fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dni: String,
}

impl EmployeeForm {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            dni: employee.dni.clone(),
        }
    }

    pub fn prepare(&self) -> Result<NewEmployee, ValidationError> {
        Ok(NewEmployee {
            first_name: required(&self.first_name, "nombre")?,
            last_name: required(&self.last_name, "apellido")?,
            email: required(&self.email, "email")?,
            dni: self.dni.trim().to_string(),
        })
    }
}
