mod calculator;
mod driver;
mod target;

pub use calculator::{compute, Countdown, Remaining, TimeUnit};
pub use driver::{CountdownDriver, DriverState};
pub use target::{default_target, Target, DEFAULT_OFFSET_DAYS};
