#![forbid(unsafe_code)]

pub mod drill;
pub mod error;
pub mod generator;
pub mod model;
pub mod time;

pub use error::Error;
pub use time::Clock;
