use chrono::Utc;
use clap::Args;
use launchclock_core::CountdownDriver;

use super::FrameArgs;
use crate::display::Screen;

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub frame: FrameArgs,
    /// Print the state snapshot as JSON instead of the rendered frame
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let session = args.frame.resolve(now)?;
    let driver = CountdownDriver::new(session.target, now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&driver.snapshot(now))?);
        return Ok(());
    }

    let screen = Screen::new(session.theme, session.config.render_options(), session.color)?;
    screen.draw(&driver.countdown())?;
    Ok(())
}
