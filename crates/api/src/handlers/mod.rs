pub mod location;
pub mod location_department;
