//! Top-level UI layout: trainer stage with status bar.
//!
//! The stage mirrors the classic layout: sequence at one sixth of the height,
//! stratagem name at two sixths, icon box centred at four sixths.

pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use stratagem_core::{InteractionState, TextStyle};

use crate::app::AppState;
use crate::theme;

const ICON_BOX_MIN_WIDTH: u16 = 24;
const ICON_BOX_HEIGHT: u16 = 3;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: stage + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    draw_stage(f, chunks[0], app);
    status_bar::render(f, chunks[1], app);
}

fn draw_stage(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::frame_border())
        .title(" Stratagem ")
        .title_style(theme::accent());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let state = app.state();
    let canvas = &app.canvas;

    match canvas.text(TextStyle::Sequence) {
        Some(sequence) => {
            centered_line(f, inner, 1, Span::styled(sequence, theme::sequence(state)));
        }
        None if state == InteractionState::Capturing => centered_line(
            f,
            inner,
            1,
            Span::styled("swipe with the mouse or use the arrow keys", theme::muted()),
        ),
        None => {}
    }

    if let Some(name) = canvas.text(TextStyle::Name) {
        centered_line(f, inner, 2, Span::styled(name, theme::name()));
    }

    if let Some(icon) = canvas.icon() {
        let area = icon_box(inner, icon);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::icon_border());
        let para = Paragraph::new(Line::from(icon))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(para, area);
    }
}

/// Row at `sixths / 6` of the area's height.
fn row_at(area: Rect, sixths: u16) -> u16 {
    let offset = (u32::from(area.height) * u32::from(sixths) / 6) as u16;
    area.y + offset.min(area.height.saturating_sub(1))
}

fn centered_line(f: &mut Frame, area: Rect, sixths: u16, span: Span) {
    if area.height == 0 {
        return;
    }
    let line_area = Rect::new(area.x, row_at(area, sixths), area.width, 1);
    let para = Paragraph::new(Line::from(span)).alignment(Alignment::Center);
    f.render_widget(para, line_area);
}

/// Bordered box for the icon name, centred on the four-sixths row.
fn icon_box(area: Rect, icon: &str) -> Rect {
    let wanted = u16::try_from(icon.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let width = wanted.max(ICON_BOX_MIN_WIDTH).min(area.width);
    let height = ICON_BOX_HEIGHT.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let top = row_at(area, 4).saturating_sub(height / 2).max(area.y);
    let y = top.min(area.y + area.height - height);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use stratagem_core::{AppConfig, Silent, StratagemDictionary};

    fn app() -> AppState {
        let dict =
            StratagemDictionary::from_entries([("RRU", "Orbital Precision Strike", "ops.svg")])
                .unwrap();
        AppState::new(
            Arc::new(dict),
            &AppConfig::default(),
            Box::new(Silent),
            false,
            Instant::now(),
        )
    }

    fn press(app: &mut AppState, code: KeyCode) {
        app.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), Instant::now());
    }

    fn rendered(app: &AppState) -> (Buffer, String) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut content = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
        }
        (buf, content)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol())
            .collect()
    }

    #[test]
    fn idle_stage_shows_hint_and_status() {
        let app = app();
        let (_, content) = rendered(&app);
        assert!(content.contains("Stratagem"));
        assert!(content.contains("arrow keys"));
        assert!(content.contains("capturing"));
    }

    #[test]
    fn match_renders_name_and_icon_rows() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Up);

        let (buf, content) = rendered(&app);
        assert!(content.contains("Orbital Precision Strike"));
        assert!(content.contains("ops.svg"));

        // 23-row stage above the status bar, 21 rows inside its border.
        let inner = Rect::new(1, 1, 78, 21);
        assert!(row_text(&buf, row_at(inner, 2)).contains("Orbital Precision Strike"));
        assert!(row_text(&buf, row_at(inner, 4)).contains("ops.svg"));
    }

    #[test]
    fn row_at_stays_inside_area() {
        let area = Rect::new(0, 5, 10, 6);
        assert_eq!(row_at(area, 0), 5);
        assert_eq!(row_at(area, 1), 6);
        assert_eq!(row_at(area, 4), 9);
        assert_eq!(row_at(area, 6), 10);
    }

    #[test]
    fn icon_box_fits_small_areas() {
        let area = Rect::new(0, 0, 10, 2);
        let rect = icon_box(area, "a-very-long-icon-name.svg");
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
        assert!(rect.y >= area.y);
    }
}
