use std::sync::Arc;

use chrono::Utc;
use clap::Args;
use launchclock_core::{CountdownTicker, Event, SystemClock};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use super::{FrameArgs, Session};
use crate::display::Screen;

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub frame: FrameArgs,
    /// Exit as soon as the target is reached instead of offering the action
    #[arg(long)]
    pub no_prompt: bool,
}

enum Outcome {
    Reached,
    Interrupted,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = args.frame.resolve(Utc::now())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(session, args.no_prompt))
}

async fn watch(session: Session, no_prompt: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Session {
        config,
        target,
        theme,
        color,
    } = session;
    let mut screen = Screen::new(theme, config.render_options(), color)?;
    screen.enter_live()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let ticker = CountdownTicker::start(target, Arc::new(SystemClock), config.tick_interval(), tx);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                ticker.cancel();
                break Outcome::Interrupted;
            }
            event = rx.recv() => {
                let Some(event) = event else {
                    break Outcome::Interrupted;
                };
                if let Some(countdown) = event.countdown() {
                    screen.draw(&countdown)?;
                }
                match event {
                    Event::CountdownCancelled { .. } => break Outcome::Interrupted,
                    ref e if e.is_terminal() => break Outcome::Reached,
                    _ => {}
                }
            }
        }
    };
    drop(ticker);
    screen.leave_live()?;

    match outcome {
        Outcome::Interrupted => Ok(()),
        Outcome::Reached if no_prompt => Ok(()),
        Outcome::Reached => celebrate(&screen).await,
    }
}

/// Offer the celebration panel's single action. Triggering it only logs.
async fn celebrate(screen: &Screen) -> Result<(), Box<dyn std::error::Error>> {
    let theme = screen.theme();
    let label = theme.celebration.action_label.clone();
    screen.note(&format!("Press Enter to {label}, Ctrl-C to quit."))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => Ok(()),
        line = lines.next_line() => {
            if line?.is_some() {
                let event = Event::CelebrationAction {
                    theme: theme.id.clone(),
                    label: label.clone(),
                    at: Utc::now(),
                };
                info!(theme = %theme.id, action = %label, ?event, "celebration action triggered");
                screen.note(&format!("> {label}"))?;
            }
            Ok(())
        }
    }
}
