//! Restaurant entities and their bindings to the generic resource client.
//!
//! Each module defines the read shape, the create draft, the update patch,
//! the route table and a `client` constructor for one backend resource, plus
//! the form preparation and list filtering its screen needs.

pub mod category;
pub mod employee;
pub mod product;
pub mod role;
pub mod supply;
pub mod unit;

pub use category::{Category, CategoryForm, CategoryPatch, FlatCategory, NewCategory, Subcategory, SubcategoryForm};
pub use employee::{Employee, EmployeeForm, EmployeePatch, NewEmployee};
pub use product::{Ingredient, NewProduct, Product, ProductDetail, ProductForm, ProductPatch};
pub use role::{NewRole, Role, RolePatch};
pub use supply::{NewSupply, Supply, SupplyForm, SupplyPatch};
pub use unit::{MeasureUnit, MeasureUnitPatch, NewMeasureUnit};

/// Trimmed value of a required text field.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, crate::error::ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(crate::error::ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Case-insensitive substring match; an empty needle matches everything.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
