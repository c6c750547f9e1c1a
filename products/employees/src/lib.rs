//! Employee vertical slice: lifecycle operations and payload validation.

pub mod service;
pub mod validate;

pub use service::{EmployeeInput, EmployeeService};
pub use validate::is_valid_employee_input;
