pub mod api_service;
pub mod connection_monitor;
pub mod features;
pub mod registry;
