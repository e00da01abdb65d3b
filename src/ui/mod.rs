mod confirm;
mod menu;
mod quiz;
mod result;
mod study;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state() {
        AppState::Menu => menu::render(frame, area, app),
        AppState::Quiz => quiz::render(frame, area, app),
        AppState::Study => study::render(frame, area, app),
        AppState::Result => result::render(frame, area, app),
    }

    if app.is_confirming_quit() {
        confirm::render(frame, area);
    }
}
