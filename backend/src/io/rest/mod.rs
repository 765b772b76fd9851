//! # REST API Interface Layer
//!
//! HTTP endpoints for the expense tracker:
//!
//! - `GET /` and `GET /health`: service information
//! - `/api/expenses`: expense CRUD and filtered listing
//! - `GET /api/dashboard`: aggregated view over a window of days
//!
//! Every error response carries a JSON body of the form `{"detail": "..."}`.

pub mod dashboard_apis;
pub mod errors;
pub mod expense_apis;
pub mod health_apis;
pub mod mappers;

pub use dashboard_apis::*;
pub use expense_apis::*;
pub use health_apis::*;
