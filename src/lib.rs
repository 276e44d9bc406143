pub mod logger;
pub mod tracking;
