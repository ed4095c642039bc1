//! Domain core for the employee management backend.
//!
//! Pure types and validation logic shared by the repository layer and the
//! HTTP layer. Nothing in this crate performs I/O.

pub mod department;
pub mod error;
pub mod filter;
pub mod location;
pub mod relation;
pub mod types;
