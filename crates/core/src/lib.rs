#![forbid(unsafe_code)]

pub mod derive;
pub mod error;
pub mod model;
pub mod time;
pub mod timefmt;

pub use error::Error;
pub use time::Clock;
