//! Instrument definitions.

pub mod asian;
pub mod barrier;
pub mod lookback;
pub mod vanilla;

pub use asian::AsianOption;
pub use barrier::BarrierOption;
pub use lookback::LookbackOption;
pub use vanilla::VanillaOption;
