//! Domain models
//!
//! Row types for the sample tables and the validation layer that guards
//! every write.

pub mod records;
pub mod validation;

pub use records::{Agent, Company, Customer, NewCompany, Student};
pub use validation::{FieldError, Location, ValidationErrors, Validator};
