//! # JSON Storage Module
//!
//! Flat-file expense store. Suited to development and single-user installs
//! where no database server is available.

pub mod expense_repository;

pub use expense_repository::JsonExpenseStore;
