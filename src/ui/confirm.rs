use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect) {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, popup, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(50),
        Constraint::Fill(1),
    ])
    .areas(row);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quit this session?",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from("Your progress will be lost.".fg(Color::Gray)),
        Line::from(""),
        Line::from("y confirm  ·  n cancel".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Yellow),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}
