pub mod fxrates;

pub use fxrates::FxRatesProvider;
