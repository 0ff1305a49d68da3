//! Text presentation shell.
//!
//! [`layout`] turns a theme and a countdown into lines of toned spans; the
//! CLI maps tones to terminal colors. [`render`] flattens the same lines to
//! plain text.
//!
//! ```text
//! [ PROTOCOL v.2.0.77 ]
//! NEURAL LINK
//! ESTABLISHING CONNECTION TO MAINFRAME...
//!
//! +--------+   +---------+   +-----------+   +-----------+
//! |   01   |   |   05    |   |    42     |   |    07     |
//! +--------+   +---------+   +-----------+   +-----------+
//!    DAYS         HOURS         MINUTES         SECONDS
//! ```

use crate::countdown::{Countdown, Remaining};
use crate::theme::Theme;

/// Semantic color slot; resolved against the theme palette by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Primary,
    Accent,
    Muted,
    Digits,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

pub type Line = Vec<Span>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_logo: bool,
    pub show_footer: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_logo: true,
            show_footer: true,
        }
    }
}

const BLOCK_GAP: &str = "   ";

/// Zero-pad to at least two digits. Longer values are never truncated.
pub fn pad2(value: u64) -> String {
    format!("{value:02}")
}

fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn text_line(text: impl Into<String>, tone: Tone) -> Line {
    vec![Span::new(text, tone)]
}

fn header(theme: &Theme, countdown: &Countdown, options: &RenderOptions) -> Vec<Line> {
    let mut lines = Vec::new();
    if options.show_logo {
        if let Some(logo) = theme.logo.as_deref() {
            lines.extend(logo.lines().map(|l| text_line(l, Tone::Primary)));
            lines.push(Vec::new());
        }
    }
    if !theme.badge.is_empty() {
        lines.push(text_line(format!("[ {} ]", theme.badge), Tone::Accent));
    }
    match countdown {
        Countdown::Counting(_) => {
            lines.push(text_line(theme.headline.as_str(), Tone::Primary));
            if !theme.subtitle.is_empty() {
                lines.push(text_line(theme.subtitle.as_str(), Tone::Muted));
            }
        }
        Countdown::Reached => {
            lines.push(text_line(theme.reached_headline.as_str(), Tone::Primary));
        }
    }
    lines.push(Vec::new());
    lines
}

fn blocks(theme: &Theme, remaining: &Remaining) -> Vec<Line> {
    let cells: Vec<(String, &str)> = remaining
        .units()
        .iter()
        .map(|(unit, value)| (pad2(*value), theme.labels.get(*unit)))
        .collect();
    let widths: Vec<usize> = cells
        .iter()
        .map(|(digits, label)| digits.chars().count().max(label.chars().count()) + 4)
        .collect();

    let mut top = Vec::new();
    let mut middle = Vec::new();
    let mut bottom = Vec::new();
    let mut captions = Vec::new();

    for (i, ((digits, label), width)) in cells.iter().zip(&widths).enumerate() {
        if i > 0 {
            for line in [&mut top, &mut middle, &mut bottom, &mut captions] {
                line.push(Span::new(BLOCK_GAP, Tone::Plain));
            }
        }
        let border = format!("+{}+", "-".repeat(*width));
        top.push(Span::new(border.clone(), Tone::Muted));
        middle.push(Span::new("|", Tone::Muted));
        middle.push(Span::new(centered(digits, *width), Tone::Digits));
        middle.push(Span::new("|", Tone::Muted));
        bottom.push(Span::new(border, Tone::Muted));
        captions.push(Span::new(centered(label, width + 2), Tone::Primary));
    }

    vec![top, middle, bottom, captions]
}

fn celebration(theme: &Theme) -> Vec<Line> {
    let panel = &theme.celebration;
    let inner = [panel.title.as_str(), panel.message.as_str()]
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
        + 6;
    let rule = "=".repeat(inner);

    let mut lines = vec![
        text_line(rule.clone(), Tone::Accent),
        text_line(centered(&panel.title, inner), Tone::Primary),
    ];
    if !panel.message.is_empty() {
        lines.push(text_line(centered(&panel.message, inner), Tone::Plain));
    }
    lines.push(text_line(rule, Tone::Accent));
    lines.push(Vec::new());
    lines.push(text_line(
        centered(&format!("[ {} ]", panel.action_label), inner),
        Tone::Accent,
    ));
    lines
}

/// Lay out one frame.
pub fn layout(theme: &Theme, countdown: &Countdown, options: &RenderOptions) -> Vec<Line> {
    let mut lines = header(theme, countdown, options);
    match countdown {
        Countdown::Counting(remaining) => lines.extend(blocks(theme, remaining)),
        Countdown::Reached => lines.extend(celebration(theme)),
    }
    if options.show_footer && !theme.footer.is_empty() {
        lines.push(Vec::new());
        lines.extend(theme.footer.iter().map(|f| text_line(f.as_str(), Tone::Muted)));
    }
    lines
}

/// Flatten a laid-out frame to plain text, one `\n` per line.
pub fn to_plain(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        for span in line {
            out.push_str(&span.text);
        }
        out.push('\n');
    }
    out
}

/// Render one frame as plain text.
pub fn render(theme: &Theme, countdown: &Countdown, options: &RenderOptions) -> String {
    to_plain(&layout(theme, countdown, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeRegistry;

    fn remaining(days: u64, hours: u8, minutes: u8, seconds: u8) -> Countdown {
        Countdown::Counting(Remaining {
            days,
            hours,
            minutes,
            seconds,
        })
    }

    #[test]
    fn pads_to_two_digits_without_truncating() {
        assert_eq!(pad2(0), "00");
        assert_eq!(pad2(7), "07");
        assert_eq!(pad2(42), "42");
        assert_eq!(pad2(365), "365");
    }

    #[test]
    fn counting_frame_shows_padded_blocks_and_labels() {
        let registry = ThemeRegistry::new();
        let theme = registry.get("cyberpunk").unwrap();
        let text = render(theme, &remaining(1, 5, 42, 7), &RenderOptions::default());

        assert!(text.contains("NEURAL LINK"));
        assert!(text.contains("ESTABLISHING CONNECTION TO MAINFRAME..."));
        for digits in ["01", "05", "42", "07"] {
            assert!(text.contains(digits), "missing {digits} in\n{text}");
        }
        for label in ["DAYS", "HOURS", "MINUTES", "SECONDS"] {
            assert!(text.contains(label));
        }
        assert!(!text.contains("ACCESS GRANTED"));
    }

    #[test]
    fn reached_frame_shows_celebration_panel() {
        let registry = ThemeRegistry::new();
        let theme = registry.get("cyberpunk").unwrap();
        let text = render(theme, &Countdown::Reached, &RenderOptions::default());

        assert!(text.contains("SYSTEM ONLINE"));
        assert!(text.contains("ACCESS GRANTED"));
        assert!(text.contains("[ ENTER SYSTEM ]"));
        assert!(!text.contains("NEURAL LINK"));
        assert!(!text.contains("SECONDS"));
    }

    #[test]
    fn theme_labels_replace_defaults() {
        let registry = ThemeRegistry::new();
        let theme = registry.get("black-gold").unwrap();
        let text = render(theme, &remaining(0, 0, 0, 1), &RenderOptions::default());
        assert!(text.contains("HRS"));
        assert!(!text.contains("HOURS"));
    }

    #[test]
    fn options_hide_logo_and_footer() {
        let registry = ThemeRegistry::new();
        let theme = registry.get("tech").unwrap();
        let options = RenderOptions {
            show_logo: false,
            show_footer: false,
        };
        let text = render(theme, &remaining(2, 0, 0, 0), &options);
        assert!(!text.contains("TECH RUN"));
        assert!(!text.contains("uptime"));

        let text = render(theme, &remaining(2, 0, 0, 0), &RenderOptions::default());
        assert!(text.contains("TECH RUN"));
        assert!(text.contains("uptime"));
    }

    #[test]
    fn digit_cells_line_up_with_borders() {
        let registry = ThemeRegistry::new();
        let theme = registry.get("cyberpunk").unwrap();
        let lines = layout(theme, &remaining(123, 1, 2, 3), &RenderOptions::default());
        let plain: Vec<String> = to_plain(&lines).lines().map(str::to_string).collect();
        let top = plain.iter().find(|l| l.starts_with('+')).unwrap();
        let middle = plain.iter().find(|l| l.starts_with('|')).unwrap();
        assert_eq!(top.chars().count(), middle.chars().count());
        assert!(middle.contains("123"));
    }
}
