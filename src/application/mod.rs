pub mod bootstrap;
pub mod breakdown;
pub mod commands;
pub mod report;
