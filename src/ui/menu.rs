use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::models::{Mode, Module};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(19),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RADIO AMATEUR EXAM QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    if let Some(message) = app.load_error() {
        content.extend(load_error_lines(message));
    } else {
        content.extend(selection_lines(app));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

fn load_error_lines(message: &str) -> Vec<Line<'_>> {
    vec![
        Line::from(Span::styled(
            "Questions not loaded",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(message.fg(Color::Gray)),
        Line::from(""),
        Line::from(""),
        Line::from("r retry  ·  q quit".fg(Color::DarkGray)),
    ]
}

fn selection_lines(app: &App) -> Vec<Line<'_>> {
    let counts = app
        .bank()
        .map(|bank| {
            Module::ALL
                .iter()
                .map(|module| format!("{}: {} questions", module, bank.pool(*module).len()))
                .collect::<Vec<_>>()
                .join(" · ")
        })
        .unwrap_or_default();

    let module_spans = choice_spans(
        &[('1', Module::K), ('2', Module::T1)],
        app.selected_module(),
        |module| format!("{} module", module),
    );
    let mode_spans = choice_spans(
        &[('p', Mode::Practice), ('e', Mode::Exam), ('s', Mode::Study)],
        app.selected_mode(),
        |mode| mode.name().to_string(),
    );

    let settings = app.settings();
    let start_style = if app.can_start() {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![
        Line::from(counts.fg(Color::DarkGray)),
        Line::from(""),
        Line::from("MODULE".fg(Color::Gray)),
        Line::from(module_spans),
        Line::from(""),
        Line::from("MODE".fg(Color::Gray)),
        Line::from(mode_spans),
        Line::from(""),
        Line::from(vec![
            toggle_span('x', "shuffle questions", settings.shuffle_questions),
            Span::raw("   "),
            toggle_span('o', "shuffle options", settings.shuffle_options),
        ]),
        Line::from(""),
        Line::from(Span::styled("ENTER", start_style)),
        Line::from("to start  ·  q quit".fg(Color::DarkGray)),
    ];

    if let Some(notice) = app.notice() {
        lines.push(Line::from(""));
        lines.push(Line::from(notice.fg(Color::Red)));
    }

    lines
}

fn choice_spans<T: Copy + PartialEq>(
    choices: &[(char, T)],
    selected: Option<T>,
    label: impl Fn(T) -> String,
) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(choices.len() * 2);
    for (key, value) in choices {
        let style = if selected == Some(*value) {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if selected == Some(*value) { ">" } else { " " };
        spans.push(Span::styled(
            format!("{}[{}] {}  ", marker, key, label(*value)),
            style,
        ));
    }
    spans
}

fn toggle_span(key: char, label: &str, enabled: bool) -> Span<'static> {
    let (mark, color) = if enabled {
        ("x", Color::Green)
    } else {
        (" ", Color::DarkGray)
    };
    Span::styled(format!("[{}] {} ({})", mark, label, key), Style::default().fg(color))
}
