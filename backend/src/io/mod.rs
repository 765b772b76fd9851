//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain use cases.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: Exposing the expense and dashboard REST endpoints
//! - **Boundary Validation**: Length limits and date parsing before the domain sees a request
//! - **Error Translation**: Converting domain errors to HTTP status codes
//!
//! Handlers never talk to a store directly; they only call the use cases
//! held in [`AppState`](crate::AppState).

pub mod rest;

pub use rest::*;
