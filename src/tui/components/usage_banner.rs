//! # UsageBanner Component
//!
//! Single-line banner above the form showing the target project and the
//! caller's remaining quota.
//!
//! ## Conditional Formatting
//!
//! 1. **Credits left**: `"Project abc | 5 credits remaining · resets in 1h 20m"`
//! 2. **Out of credits**: `"Project abc | No credits remaining · resets in 3h · upgrade at /pricing"`
//! 3. **Usage unknown** (not loaded or failed): `"Project abc"`
//!
//! Purely presentational: the snapshot is fetched elsewhere and passed in.

use chrono::TimeDelta;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::rpc::UsageSnapshot;
use crate::tui::component::Component;

pub struct UsageBanner {
    pub project_id: String,
    pub usage: Option<UsageSnapshot>,
}

impl UsageBanner {
    pub fn new(project_id: String, usage: Option<UsageSnapshot>) -> Self {
        Self { project_id, usage }
    }

    fn usage_text(usage: &UsageSnapshot) -> String {
        let reset = format_reset(usage.ms_before_next);
        match usage.remaining_points {
            0 => format!("No credits remaining · resets in {reset} · upgrade at /pricing"),
            1 => format!("1 credit remaining · resets in {reset}"),
            n => format!("{n} credits remaining · resets in {reset}"),
        }
    }
}

impl Component for UsageBanner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!("Project {}", self.project_id),
            Style::default().fg(Color::Cyan),
        )];

        if let Some(usage) = &self.usage {
            let style = if usage.remaining_points == 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(Self::usage_text(usage), style));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

/// Human-readable time until the quota resets, using the two largest units.
pub fn format_reset(ms: u64) -> String {
    let delta = TimeDelta::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX));
    let days = delta.num_days();
    let hours = delta.num_hours() % 24;
    let minutes = delta.num_minutes() % 60;
    let seconds = delta.num_seconds() % 60;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m"), (seconds, "s")]
        .into_iter()
        .skip_while(|(n, _)| *n == 0)
        .take(2)
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n}{unit}"))
        .collect();

    if parts.is_empty() {
        "less than a second".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(banner: &mut UsageBanner) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| banner.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_format_reset_units() {
        assert_eq!(format_reset(0), "less than a second");
        assert_eq!(format_reset(45_000), "45s");
        assert_eq!(format_reset(90_000), "1m 30s");
        assert_eq!(format_reset(3_600_000), "1h");
        assert_eq!(format_reset(4_800_000), "1h 20m");
        assert_eq!(format_reset(90_000_000), "1d 1h");
    }

    #[test]
    fn test_banner_with_credits() {
        let mut banner = UsageBanner::new(
            "proj-1".to_string(),
            Some(UsageSnapshot {
                remaining_points: 5,
                ms_before_next: 4_800_000,
            }),
        );
        let text = render_to_text(&mut banner);
        assert!(text.contains("Project proj-1"));
        assert!(text.contains("5 credits remaining"));
        assert!(text.contains("resets in 1h 20m"));
    }

    #[test]
    fn test_banner_out_of_credits_mentions_pricing() {
        let mut banner = UsageBanner::new(
            "proj-1".to_string(),
            Some(UsageSnapshot {
                remaining_points: 0,
                ms_before_next: 10_800_000,
            }),
        );
        let text = render_to_text(&mut banner);
        assert!(text.contains("No credits remaining"));
        assert!(text.contains("/pricing"));
    }

    #[test]
    fn test_banner_singular_credit() {
        let usage = UsageSnapshot {
            remaining_points: 1,
            ms_before_next: 1_000,
        };
        assert_eq!(UsageBanner::usage_text(&usage), "1 credit remaining · resets in 1s");
    }

    #[test]
    fn test_banner_without_usage_shows_project_only() {
        let mut banner = UsageBanner::new("proj-1".to_string(), None);
        let text = render_to_text(&mut banner);
        assert!(text.contains("Project proj-1"));
        assert!(!text.contains('|'));
    }
}
