//! Terminal output for rendered frames.

use std::io::{self, IsTerminal, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use launchclock_core::render::{layout, Tone};
use launchclock_core::theme::Rgb;
use launchclock_core::{Countdown, RenderOptions, Theme, ThemeError};

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Palette resolved once per theme.
struct ToneColors {
    background: Color,
    primary: Color,
    accent: Color,
    muted: Color,
    digits: Color,
}

impl ToneColors {
    fn from_theme(theme: &Theme) -> Result<Self, ThemeError> {
        Ok(Self {
            background: color(theme.palette.background()?),
            primary: color(theme.palette.primary()?),
            accent: color(theme.palette.accent()?),
            muted: color(theme.palette.muted()?),
            digits: color(theme.palette.digits()?),
        })
    }

    fn get(&self, tone: Tone) -> Option<Color> {
        match tone {
            Tone::Plain => None,
            Tone::Primary => Some(self.primary),
            Tone::Accent => Some(self.accent),
            Tone::Muted => Some(self.muted),
            Tone::Digits => Some(self.digits),
        }
    }
}

/// Draws frames for one theme. In live mode each frame replaces the last.
pub struct Screen {
    theme: Theme,
    options: RenderOptions,
    colors: Option<ToneColors>,
    live: bool,
}

impl Screen {
    pub fn new(theme: Theme, options: RenderOptions, color: bool) -> Result<Self, ThemeError> {
        let colors = if color {
            Some(ToneColors::from_theme(&theme)?)
        } else {
            None
        };
        Ok(Self {
            theme,
            options,
            colors,
            live: false,
        })
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Switch to redraw-in-place mode. No-op when stdout is not a terminal.
    pub fn enter_live(&mut self) -> io::Result<()> {
        if !io::stdout().is_terminal() {
            return Ok(());
        }
        self.live = true;
        let mut out = io::stdout();
        queue!(out, cursor::Hide)?;
        out.flush()
    }

    pub fn leave_live(&mut self) -> io::Result<()> {
        if !self.live {
            return Ok(());
        }
        self.live = false;
        let mut out = io::stdout();
        queue!(out, cursor::Show, ResetColor)?;
        out.flush()
    }

    /// Draw one frame. In live mode with colors on, the screen is cleared
    /// to the palette background first and keeps it until `leave_live`.
    pub fn draw(&self, countdown: &Countdown) -> io::Result<()> {
        let mut out = io::stdout().lock();
        if self.live {
            if let Some(colors) = &self.colors {
                queue!(out, SetBackgroundColor(colors.background))?;
            }
            queue!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
        }
        for line in layout(&self.theme, countdown, &self.options) {
            for span in line {
                match self.colors.as_ref().and_then(|c| c.get(span.tone)) {
                    Some(fg) => queue!(
                        out,
                        SetForegroundColor(fg),
                        Print(&span.text),
                        SetForegroundColor(Color::Reset)
                    )?,
                    None => queue!(out, Print(&span.text))?,
                }
            }
            queue!(out, Print("\n"))?;
        }
        out.flush()
    }

    pub fn note(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        match self.colors.as_ref() {
            Some(colors) => queue!(
                out,
                SetForegroundColor(colors.muted),
                Print(text),
                ResetColor,
                Print("\n")
            )?,
            None => queue!(out, Print(text), Print("\n"))?,
        }
        out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.leave_live();
    }
}
