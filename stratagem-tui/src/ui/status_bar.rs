//! Bottom status bar: state, dictionary, last match, status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        format!(" {} ", app.state().label()),
        theme::sequence(app.state()),
    ));
    spans.push(Span::styled(
        format!(
            "| {} stratagems from {} ",
            app.dictionary_len,
            app.dictionary_path.display()
        ),
        theme::muted(),
    ));

    if let Some(entry) = app.event_loop.machine().last_match() {
        spans.push(Span::styled(format!("| last: {} ", entry.name()), theme::muted()));
    }

    spans.push(Span::styled("| q:Quit", theme::muted()));

    // Status message
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}
