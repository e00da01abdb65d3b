use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::quiz::view::{StudyView, study_view};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let view = study_view(session);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], &view);

    let widget = Paragraph::new(view.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, chunks[1]);

    render_answer(frame, chunks[2], &view.answer_lines);
    render_controls(frame, chunks[3], &view);
}

fn render_header(frame: &mut Frame, area: Rect, view: &StudyView) {
    let mut title = format!("Study  ·  {}", view.id_label);
    if let Some(category) = &view.category {
        title.push_str("  ·  ");
        title.push_str(category);
    }
    let progress = format!("  ({}/{})", view.position, view.total);

    let widget = Paragraph::new(Line::from(vec![
        Span::styled(title, Style::default().fg(Color::Cyan)),
        Span::styled(progress, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(widget, area);
}

fn render_answer(frame: &mut Frame, area: Rect, answer_lines: &[String]) {
    let lines: Vec<Line> = answer_lines
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(Color::Green).bold())))
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Answer ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, view: &StudyView) {
    let mut hints = Vec::new();
    if view.controls.previous {
        hints.push("h previous");
    }
    if view.controls.next {
        hints.push("l next");
    }
    hints.push("q menu");

    let widget = Paragraph::new(hints.join("  ·  "))
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
