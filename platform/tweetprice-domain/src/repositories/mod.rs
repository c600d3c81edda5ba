pub mod artifacts;
pub mod tables;
