//! Closed forms and the flat pricing façade.

pub mod european;
pub mod facade;

pub use european::black_scholes_price;
pub use facade::*;
