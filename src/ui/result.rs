use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::quiz::scorer::{self, Outcome};
use crate::quiz::{Results, Session};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let Some(results) = session.results() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], results);
    render_counts(frame, chunks[2], results);
    render_question_breakdown(frame, chunks[3], session, app.result_scroll());
    render_controls(frame, chunks[4]);
}

fn get_grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, results: &Results) {
    let status = if results.passed {
        Span::styled("PASSED", Style::default().fg(Color::Green).bold())
    } else {
        Span::styled("NOT PASSED - keep studying", Style::default().fg(Color::Red).bold())
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                results.correct, results.total, results.percentage
            ),
            Style::default()
                .fg(get_grade_color(results.percentage))
                .bold(),
        )),
        Line::from(""),
        Line::from(status),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_counts(frame: &mut Frame, area: Rect, results: &Results) {
    let content = vec![
        Line::from(vec![
            Span::styled(format!("correct {}", results.correct), Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled(format!("incorrect {}", results.incorrect), Style::default().fg(Color::Red)),
            Span::raw("   "),
            Span::styled(
                format!("unanswered {}", results.unanswered),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(
            format!(
                "passing score {} / {}",
                results.pass_threshold, results.total
            )
            .fg(Color::DarkGray),
        ),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::vertical(1)));
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, session: &Session, scroll: usize) {
    let lines: Vec<Line> = session
        .working_set()
        .iter()
        .zip(session.answers().iter())
        .enumerate()
        .map(|(index, (question, answer))| {
            let (symbol, color) = match scorer::outcome(question, answer) {
                Outcome::Correct => ("+", Color::Green),
                Outcome::Incorrect => ("-", Color::Red),
                Outcome::Unanswered => ("?", Color::Yellow),
            };

            let preview = truncate_question(&question.text);

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:3}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<10} ", question.id.to_string()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(preview, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  v review  ·  r restart  ·  m menu  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(60);
        let truncated = truncate_question(&long);
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_grade_color() {
        assert_eq!(get_grade_color(100), Color::Green);
        assert_eq!(get_grade_color(75), Color::Cyan);
        assert_eq!(get_grade_color(33), Color::Red);
    }
}
