//! # Pricing Screen Component
//!
//! Shown in place of the form after a request is rejected for running out of
//! credits. Points the user at the web pricing page; Esc returns to the form.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::rpc::UsageSnapshot;
use crate::tui::component::Component;
use crate::tui::components::usage_banner::format_reset;

pub struct PricingScreen {
    /// Web frontend origin, without trailing slash
    pub web_url: String,
    pub usage: Option<UsageSnapshot>,
}

impl PricingScreen {
    pub fn new(web_url: String, usage: Option<UsageSnapshot>) -> Self {
        Self { web_url, usage }
    }

    pub fn pricing_url(&self) -> String {
        format!("{}/pricing", self.web_url)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "You have run out of credits",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from("Upgrade your plan to keep sending messages:"),
            Line::from(Span::styled(
                self.pricing_url(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        ];
        if let Some(usage) = &self.usage {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("Free credits reset in {}", format_reset(usage.ms_before_next)),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Esc to go back",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Component for PricingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let [content_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, content_area);
    }
}
