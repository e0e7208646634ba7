pub mod report;
pub mod repository;
