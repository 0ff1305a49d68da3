//! # Launchclock Core Library
//!
//! This library provides the core logic for the Launchclock countdown display.
//! The CLI binary is a thin terminal layer over the same core library.
//!
//! ## Architecture
//!
//! - **Calculator**: a pure function decomposing `target - now` into
//!   days/hours/minutes/seconds, or reporting that the target is reached
//! - **Refresh Driver**: a wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()`
//! - **Ticker**: a scheduled tokio task with a cancellation token that owns a
//!   driver and emits frames at a fixed cadence
//! - **Themes**: configuration records feeding a single text renderer
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`compute`]: the countdown calculator
//! - [`CountdownDriver`]: `Counting -> Reached` state machine
//! - [`CountdownTicker`]: 1-second refresh task with idempotent cancellation
//! - [`Theme`]: presentation record consumed by [`render`]
//! - [`Config`]: application configuration management

pub mod countdown;
pub mod error;
pub mod events;
pub mod render;
pub mod storage;
pub mod theme;
pub mod ticker;

pub use countdown::{
    compute, default_target, Countdown, CountdownDriver, DriverState, Remaining, Target, TimeUnit,
};
pub use error::{ConfigError, CoreError, ThemeError, ValidationError};
pub use events::Event;
pub use render::{render, RenderOptions};
pub use storage::Config;
pub use theme::{Palette, Theme, ThemeRegistry};
pub use ticker::{Clock, CountdownTicker, ManualClock, SystemClock};
