use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Mode;
use crate::quiz::view::{Controls, Feedback, OptionView, QuestionView, question_view};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let view = question_view(session);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], &view);
    render_question_text(frame, chunks[1], &view.text);
    render_options(frame, chunks[2], &view.options, app.option_cursor());
    if let Some(feedback) = &view.feedback {
        render_feedback(frame, chunks[3], feedback);
    }
    render_controls(frame, chunks[4], view.controls);
}

fn render_header(frame: &mut Frame, area: Rect, view: &QuestionView) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(area);

    let mode = if view.reviewing {
        "Review".to_string()
    } else {
        view.mode.to_string()
    };
    let mut spans = vec![
        Span::styled(mode, Style::default().fg(mode_color(view.mode)).bold()),
        Span::styled(
            format!("  ·  {}  ·  {} module", view.id_label, view.module),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(category) = &view.category {
        spans.push(Span::styled(
            format!("  ·  {}", category),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), left);

    let progress = format!("Question {} of {}", view.position, view.total);
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, right);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[OptionView], cursor: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let style = option_style(option, index == cursor);
        let marker = if index == cursor { ">" } else { " " };
        let tick = match option.correct {
            Some(true) => " ✓",
            Some(false) if option.selected => " ✗",
            _ => "",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option.label), style),
            Span::styled(option.text.as_str(), style),
            Span::styled(tick, style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn option_style(option: &OptionView, under_cursor: bool) -> Style {
    let style = match (option.correct, option.selected) {
        (Some(true), _) => Style::default().fg(Color::Green),
        (Some(false), true) => Style::default().fg(Color::Red),
        (None, true) => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::Gray),
    };
    if under_cursor || option.selected {
        style.bold()
    } else {
        style
    }
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &Feedback) {
    let line = if feedback.correct {
        Line::from(Span::styled(
            "✓ Correct!",
            Style::default().fg(Color::Green).bold(),
        ))
    } else {
        Line::from(vec![
            Span::styled("✗ Incorrect.", Style::default().fg(Color::Red).bold()),
            Span::styled(
                format!(" The correct answer: {}", feedback.expected),
                Style::default().fg(Color::Gray),
            ),
        ])
    };

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, controls: Controls) {
    let mut hints = vec!["j/k move", "enter select"];
    if controls.previous {
        hints.push("h previous");
    }
    if controls.next {
        hints.push("l next");
    }
    if controls.skip {
        hints.push("s skip");
    }
    if controls.finish {
        hints.push("f finish");
    }
    hints.push("q menu");

    let widget = Paragraph::new(hints.join("  ·  "))
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Practice => Color::Green,
        Mode::Exam => Color::Yellow,
        Mode::Study => Color::Cyan,
    }
}
