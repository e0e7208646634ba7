pub mod check;
pub mod prompt;
pub mod report;
