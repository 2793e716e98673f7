//! Interactive form for the salary calculator.
//!
//! This module provides the input/validation types, user notifications,
//! the form session state machine, and a console front end.

mod console;
mod handlers;
mod request;
mod response;
mod state;

pub use console::ConsoleForm;
pub use handlers::{
    FormEvent, FormSession, FormSource, Notifier, SessionState, process_calculation,
};
pub use request::{FormValues, SalaryRequest};
pub use response::{Notification, NotificationKind};
pub use state::AppState;
