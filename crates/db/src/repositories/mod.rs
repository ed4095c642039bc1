//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Relation accessors hold the
//! pool and the parent id instead.

pub mod department_repo;
pub mod location_department_repo;
pub mod location_repo;

pub use department_repo::DepartmentRepo;
pub use location_department_repo::LocationDepartmentRepo;
pub use location_repo::LocationRepo;
