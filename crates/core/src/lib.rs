#![forbid(unsafe_code)]

pub mod model;
pub mod time;
pub mod token;

pub use time::Clock;
