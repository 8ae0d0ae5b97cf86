pub mod connection_types;
pub mod model_types;
pub mod prediction_types;
