pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod pipeline;
pub mod records;

pub mod error;
