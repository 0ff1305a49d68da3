pub mod config;
pub mod status;
pub mod themes;
pub mod watch;

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use clap::Args;
use launchclock_core::{Config, Target, Theme, ThemeRegistry};

/// Flags shared by every command that shows a countdown.
#[derive(Args, Debug, Clone, Default)]
pub struct FrameArgs {
    /// Target instant (RFC 3339, or YYYY-MM-DD[THH:MM[:SS]] in local time).
    /// Defaults to the configured target, then to now + default_offset_days.
    #[arg(long, short)]
    pub target: Option<String>,
    /// Theme id (see `launchclock themes list`)
    #[arg(long)]
    pub theme: Option<String>,
    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

/// Everything needed to run or render one countdown.
pub struct Session {
    pub config: Config,
    pub target: Target,
    pub theme: Theme,
    pub color: bool,
}

impl FrameArgs {
    /// Resolve flags against the saved configuration.
    ///
    /// A malformed target or unknown theme fails here, before anything is
    /// drawn or scheduled.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<Session, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let target = match &self.target {
            Some(raw) => Target::parse(raw)?,
            None => config.resolve_target(now)?,
        };
        let registry: ThemeRegistry = config.theme_registry()?;
        let theme_id = self.theme.as_deref().unwrap_or(&config.theme);
        let theme = registry.get(theme_id)?.clone();
        let color = !self.no_color && config.ui.color && std::io::stdout().is_terminal();

        Ok(Session {
            config,
            target,
            theme,
            color,
        })
    }
}
