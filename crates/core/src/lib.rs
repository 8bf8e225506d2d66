#![forbid(unsafe_code)]

pub mod model;
pub mod time;
pub mod timer;
pub mod wire;

pub use time::Clock;
pub use timer::Timer;
