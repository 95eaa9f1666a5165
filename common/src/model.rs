pub mod attempt;
pub mod credential;
pub mod report;
pub mod service;
