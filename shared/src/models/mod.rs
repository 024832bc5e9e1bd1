//! Domain models
//!
//! Plain serde structs shared between server and clients. With the `db`
//! feature the flat records additionally derive `sqlx::FromRow` /
//! `sqlx::Type` so repositories can map them straight from queries.

pub mod accommodation;
pub mod booking;
pub mod employee;
pub mod establishment;
pub mod expense;
pub mod invoice;
pub mod leave;
pub mod payroll;
pub mod role;

pub use accommodation::{Accommodation, AccommodationCreate, AccommodationUpdate};
pub use booking::{Booking, BookingCreate, BookingStatus};
pub use employee::{ContractType, Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
pub use establishment::{
    Establishment, EstablishmentCreate, EstablishmentUpdate, PricingMode,
};
pub use expense::{Expense, ExpenseCreate, ExpenseStatus};
pub use invoice::{Invoice, InvoiceCreate, InvoiceStatus};
pub use leave::{
    Leave, LeaveBalance, LeaveCreate, LeaveFilter, LeaveStatus, LeaveSummary, LeaveType,
};
pub use payroll::{PayItem, Payroll, PayrollCreate, PayrollStatus, PayrollSummary};
pub use role::{InvalidRole, Role};
