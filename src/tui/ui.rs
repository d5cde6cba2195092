//! Main UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::TerraApp;
use super::widgets::{ToolbarWidget, UNTITLED};
use crate::routing::{is_path, routes};

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &TerraApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Toolbar
            Constraint::Min(0),    // Page body
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    render_toolbar(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
}

fn render_toolbar(frame: &mut Frame, app: &TerraApp, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = app.toolbar_items();
    frame.render_widget(ToolbarWidget::new(&items, &app.theme), inner);
}

fn render_body(frame: &mut Frame, app: &TerraApp, area: Rect) {
    let state = app.store.state();
    let pathname = &app.location.pathname;

    let mut lines = vec![Line::from("")];

    if is_path(pathname, &[routes::PROJECTS]) {
        lines.push(heading(app, project_title(app)));
        lines.push(Line::from(""));
        if state.project.collection_ids.is_empty() {
            lines.push(muted(app, "No collections in this project yet."));
        } else {
            for id in &state.project.collection_ids {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(app.theme.text_muted)),
                    Span::styled(id.clone(), Style::default().fg(app.theme.text)),
                ]));
            }
        }
    } else if is_path(pathname, &[routes::SEARCH]) {
        lines.push(heading(app, "Search".to_string()));
        lines.push(Line::from(""));
        lines.push(muted(
            app,
            format!(
                "{} collection(s) in {}",
                state.project.collection_ids.len(),
                project_title(app)
            ),
        ));
    } else if is_path(pathname, &[routes::DOWNLOADS]) {
        lines.push(heading(app, "Download Status & History".to_string()));
    } else if is_path(pathname, &[routes::SAVED_PROJECTS]) {
        lines.push(heading(app, "Saved Projects".to_string()));
    } else {
        lines.push(heading(app, "Home".to_string()));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(frame: &mut Frame, app: &TerraApp, area: Rect) {
    let location_pill = Span::styled(
        format!(" {}{} ", app.location.pathname, app.location.search),
        Style::default()
            .fg(app.theme.background)
            .bg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let mut spans = vec![location_pill, Span::raw(" ")];

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(app.theme.success),
        ));
    } else {
        let session = if app.store.state().logged_in() {
            Span::styled("logged in", Style::default().fg(app.theme.success))
        } else {
            Span::styled("logged out", Style::default().fg(app.theme.text_muted))
        };
        spans.push(session);
        spans.push(Span::styled(
            "  │  q: quit",
            Style::default().fg(app.theme.text_muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn project_title(app: &TerraApp) -> String {
    match app.store.state().saved_project.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNTITLED.to_string(),
    }
}

fn heading(app: &TerraApp, text: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default()
            .fg(app.theme.text)
            .add_modifier(Modifier::BOLD),
    ))
}

fn muted(app: &TerraApp, text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text.into()),
        Style::default().fg(app.theme.text_muted),
    ))
}
