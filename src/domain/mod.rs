pub mod aggregation;
pub mod categorizer;
pub mod clamp;
pub mod models;
pub mod slicing;
pub mod time;
