//! Deletion confirmation overlay.
//!
//! Shown while a deletion is awaiting confirmation. Nothing reaches the
//! backend until the user answers yes.

use super::constants::{CONFIRM_POPUP_HEIGHT, CONFIRM_POPUP_WIDTH_PERCENT};
use super::styles::{DANGER, MUTED_TEXT};
use crate::state::DeletionRequest;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::fmt::Display;

/// The question asked for `request`.
pub fn confirmation_prompt<Id: Display>(request: &DeletionRequest<Id>) -> String {
    match request {
        DeletionRequest::One(id) => format!("Delete record {id}?"),
        DeletionRequest::Many(ids) => format!("Delete {} selected records?", ids.len()),
    }
}

/// Render the confirmation overlay centered on the screen.
pub fn render_confirm_dialog<Id: Display>(frame: &mut Frame, request: &DeletionRequest<Id>) {
    let area = centered_rect(CONFIRM_POPUP_WIDTH_PERCENT, CONFIRM_POPUP_HEIGHT, frame.area());

    frame.render_widget(Clear, area);

    let content = vec![
        Line::from(Span::raw(confirmation_prompt(request))),
        Line::from(Span::styled("This cannot be undone.", MUTED_TEXT)),
        Line::from(""),
        Line::from(Span::styled("y: delete   n/Esc: cancel", MUTED_TEXT)),
    ];

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Confirm deletion ")
                .borders(Borders::ALL)
                .border_style(DANGER),
        )
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(dialog, area);
}

/// A rect `percent_x` wide and `height` tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = height.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}
