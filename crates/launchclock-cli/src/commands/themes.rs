use std::io::IsTerminal;

use chrono::Utc;
use clap::Subcommand;
use launchclock_core::{compute, default_target, Config, Countdown};

use crate::display::Screen;

#[derive(Subcommand)]
pub enum ThemesAction {
    /// List built-in and custom themes
    List,
    /// Preview a theme in both states
    Show {
        /// Theme id
        id: String,
        /// Print the theme record as TOML (a starting point for custom themes)
        #[arg(long = "toml")]
        as_toml: bool,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },
}

pub fn run(action: ThemesAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let registry = config.theme_registry()?;

    match action {
        ThemesAction::List => {
            for theme in registry.iter() {
                let marker = if theme.id == config.theme { "*" } else { " " };
                println!("{marker} {:<12} {}", theme.id, theme.name);
            }
        }
        ThemesAction::Show {
            id,
            as_toml,
            no_color,
        } => {
            let theme = registry.get(&id)?.clone();
            if as_toml {
                print!("{}", theme.to_toml_string()?);
                return Ok(());
            }

            let color = !no_color && config.ui.color && std::io::stdout().is_terminal();
            let screen = Screen::new(theme, config.render_options(), color)?;
            let now = Utc::now();
            screen.draw(&compute(default_target(now).at(), now))?;
            println!();
            screen.draw(&Countdown::Reached)?;
        }
    }
    Ok(())
}
