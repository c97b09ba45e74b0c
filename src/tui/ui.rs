use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::{App, Route};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ErrorDialog, PricingScreen, ToastStack, UsageBanner};

const FORM_HINT: &str = "Ctrl+Enter send · Enter newline · Tab focus · Ctrl+E error details · Ctrl+C quit";

/// Split the frame into banner, main and input areas.
///
/// The input area collapses to zero height on the pricing screen.
pub fn layout_areas(frame_area: Rect, app: &App, tui: &TuiState) -> [Rect; 3] {
    use Constraint::{Length, Min};
    let input_height = match app.route {
        Route::Form => tui.input_box.calculate_height(frame_area.width),
        Route::Pricing => 0,
    };
    Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame_area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [banner_area, main_area, input_area] = layout_areas(frame.area(), app, tui);

    UsageBanner::new(app.project_id.clone(), app.usage).render(frame, banner_area);

    match app.route {
        Route::Form => {
            draw_hint(frame, main_area);
            tui.input_box.render(frame, input_area);
        }
        Route::Pricing => {
            PricingScreen::new(tui.web_url.clone(), app.usage).render(frame, main_area);
        }
    }

    ToastStack::new(app.toasts.iter()).render(frame, main_area);

    if tui.error_dialog.open
        && let Some(details) = &app.last_error
    {
        ErrorDialog::new(details).render(frame, frame.area());
    }
}

fn draw_hint(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let hint_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
    frame.render_widget(
        Line::styled(FORM_HINT, Style::default().fg(Color::DarkGray)).centered(),
        hint_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::error::MutationError;
    use crate::rpc::{ErrorCode, RpcError, UsageSnapshot};
    use crate::test_support::test_app;
    use chrono::Local;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn fail(app: &mut App, code: Option<ErrorCode>) {
        update(app, Action::InputChanged("hello".to_string()));
        update(app, Action::Submit);
        let id = app.pending.expect("submit should be pending");
        let error = MutationError::from(RpcError::Api {
            status: 429,
            code,
            message: "Out of credits".to_string(),
            body: serde_json::Value::Null,
        });
        update(
            app,
            Action::MutationFailed {
                id,
                error,
                at: Local::now(),
            },
        );
    }

    #[test]
    fn test_form_route_shows_banner_hint_and_input() {
        let mut app = test_app();
        app.usage = Some(UsageSnapshot {
            remaining_points: 3,
            ms_before_next: 60_000,
        });
        let mut tui = TuiState::new("http://localhost:3000".to_string());
        let text = render(&app, &mut tui);
        assert!(text.contains("Project test-project"));
        assert!(text.contains("3 credits remaining"));
        assert!(text.contains("Ctrl+Enter send"));
        assert!(text.contains("Message"));
        assert!(text.contains("0/10000"));
    }

    #[test]
    fn test_pricing_route_replaces_form() {
        let mut app = test_app();
        fail(&mut app, Some(ErrorCode::TooManyRequests));
        assert_eq!(app.route, Route::Pricing);

        let mut tui = TuiState::new("http://localhost:3000".to_string());
        let text = render(&app, &mut tui);
        assert!(text.contains("http://localhost:3000/pricing"));
        assert!(!text.contains("0/10000"));
        // The failure toast is still visible
        assert!(text.contains("Out of credits"));
    }

    #[test]
    fn test_error_dialog_only_when_open_and_error_present() {
        let mut app = test_app();
        let mut tui = TuiState::new("http://localhost:3000".to_string());
        tui.error_dialog.open = true;
        assert!(!render(&app, &mut tui).contains("Troubleshooting"));

        fail(&mut app, None);
        assert!(render(&app, &mut tui).contains("Troubleshooting"));
    }

    #[test]
    fn test_layout_hides_input_on_pricing() {
        let mut app = test_app();
        let tui = TuiState::new(String::new());
        let area = Rect::new(0, 0, 80, 24);
        let [_, _, input] = layout_areas(area, &app, &tui);
        assert_eq!(input.height, 3);

        app.route = Route::Pricing;
        let [_, main, input] = layout_areas(area, &app, &tui);
        assert_eq!(input.height, 0);
        assert_eq!(main.height, 23);
    }
}
