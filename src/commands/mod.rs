pub mod connection;
pub mod prediction;
