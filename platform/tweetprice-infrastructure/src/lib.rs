pub mod artifacts;
pub mod reporting;
pub mod tables;
