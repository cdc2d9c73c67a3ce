//! Study units, the top-level partition of all data

pub mod models;

pub use models::Unit;
