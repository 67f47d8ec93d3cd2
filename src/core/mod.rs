//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod history;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::{ConvertError, convert};
pub use history::{Conversion, ConversionHistory};
pub use rates::{FetchError, RateProvider, RateSnapshot, RateTable};
