pub mod config;
pub mod error;
pub mod event_mapper;
