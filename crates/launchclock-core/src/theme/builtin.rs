use indoc::indoc;

use super::{Celebration, Palette, Theme, UnitLabels};

pub const DEFAULT_THEME_ID: &str = "cyberpunk";

fn labels(days: &str, hours: &str, minutes: &str, seconds: &str) -> UnitLabels {
    UnitLabels {
        days: days.into(),
        hours: hours.into(),
        minutes: minutes.into(),
        seconds: seconds.into(),
    }
}

fn palette(background: &str, primary: &str, accent: &str, muted: &str, digits: &str) -> Palette {
    Palette {
        background: background.into(),
        primary: primary.into(),
        accent: accent.into(),
        muted: muted.into(),
        digits: digits.into(),
    }
}

fn cyberpunk() -> Theme {
    Theme {
        id: "cyberpunk".into(),
        name: "Cyberpunk".into(),
        badge: "PROTOCOL v.2.0.77".into(),
        headline: "NEURAL LINK".into(),
        reached_headline: "SYSTEM ONLINE".into(),
        subtitle: "ESTABLISHING CONNECTION TO MAINFRAME...".into(),
        labels: UnitLabels::default(),
        celebration: Celebration {
            title: "ACCESS GRANTED".into(),
            message: String::new(),
            action_label: "ENTER SYSTEM".into(),
        },
        palette: palette("#050505", "#22d3ee", "#ec4899", "#6b7280", "#ffffff"),
        logo: None,
        footer: vec![
            "LAT: 35.6762° N   LNG: 139.6503° E".into(),
            "SECURE CONNECTION   SYS.LOAD: 89%".into(),
        ],
    }
}

fn black_gold() -> Theme {
    Theme {
        id: "black-gold".into(),
        name: "Black & Gold Marathon".into(),
        badge: "INTERNATIONAL CITY MARATHON".into(),
        headline: "RACE DAY COUNTDOWN".into(),
        reached_headline: "THE RACE IS ON".into(),
        subtitle: "Every second brings you closer to the start line".into(),
        labels: labels("DAYS", "HRS", "MIN", "SEC"),
        celebration: Celebration {
            title: "STARTING GUN FIRED".into(),
            message: "Runners, take your marks. See you at the finish line.".into(),
            action_label: "VIEW LIVE RESULTS".into(),
        },
        palette: palette("#0a0a0a", "#d4af37", "#f5d76e", "#8a7a4a", "#f5f5f5"),
        logo: Some(
            indoc! {r"
                  __  __   _   ___    _ _____ _  _  ___  _  _
                 |  \/  | /_\ | _ \  /_\_   _| || |/ _ \| \| |
                 | |\/| |/ _ \|   / / _ \| | | __ | (_) | .` |
                 |_|  |_/_/ \_\_|_\/_/ \_\_| |_||_|\___/|_|\_|
            "}
            .into(),
        ),
        footer: vec!["42.195 KM   ·   START LINE: CITY HALL PLAZA".into()],
    }
}

fn eco() -> Theme {
    Theme {
        id: "eco".into(),
        name: "Eco Marathon".into(),
        badge: "GREEN MARATHON".into(),
        headline: "Run for the Planet".into(),
        reached_headline: "The Race Has Begun".into(),
        subtitle: "Plant a step, grow a future".into(),
        labels: labels("Days", "Hours", "Minutes", "Seconds"),
        celebration: Celebration {
            title: "Let's Run Green".into(),
            message: "Thank you for running with nature. Every kilometre plants a tree.".into(),
            action_label: "JOIN THE RUN".into(),
        },
        palette: palette("#0f1f14", "#4ade80", "#a3e635", "#6b8f71", "#ecfdf5"),
        logo: Some(
            indoc! {r"
                   \|/
                  --*--   ECO RUN
                   /|\
            "}
            .into(),
        ),
        footer: vec!["Zero-waste course   ·   Refill stations every 5 km".into()],
    }
}

fn tech() -> Theme {
    Theme {
        id: "tech".into(),
        name: "Tech Marathon".into(),
        badge: "TECH MARATHON".into(),
        headline: "HACK THE DISTANCE".into(),
        reached_headline: "RACE STARTED".into(),
        subtitle: "Compiling kilometres...".into(),
        labels: labels("DAYS", "HOURS", "MINS", "SECS"),
        celebration: Celebration {
            title: "BUILD SUCCEEDED".into(),
            message: "All runners deployed to production.".into(),
            action_label: "OPEN LIVE TRACKER".into(),
        },
        palette: palette("#0b1020", "#60a5fa", "#a78bfa", "#64748b", "#e2e8f0"),
        logo: Some("</> TECH RUN".into()),
        footer: vec!["uptime 99.99%   ·   latency 42ms".into()],
    }
}

/// The themes shipped with the binary, in listing order.
pub fn builtin_themes() -> Vec<Theme> {
    vec![cyberpunk(), black_gold(), eco(), tech()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_have_unique_ids_and_valid_palettes() {
        let themes = builtin_themes();
        let mut ids: Vec<_> = themes.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), themes.len());
        for theme in &themes {
            theme.validate().unwrap();
        }
    }

    #[test]
    fn default_theme_is_builtin() {
        assert!(builtin_themes().iter().any(|t| t.id == DEFAULT_THEME_ID));
    }
}
