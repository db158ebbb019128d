//! Leave Engine library crate.
//!
//! This crate exposes the leave distribution calculator and its API
//! components as reusable modules.  External applications may depend
//! on the `leave_engine` crate and call `engine::distribute_leaves`
//! directly or embed the API via `api::build_router`.

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod quota;
pub mod engine;
pub mod api;

pub use engine::{distribute_leaves, distribute_leaves_with, LeavePolicy};
pub use error::{LeaveError, LeaveResult};
pub use models::{LeaveDistribution, LeaveLedger, LeaveRequest, LeaveType};
