//! Notification box drawn over the middle of the board.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::notification::Notification;

use super::popup::centered_fixed;
use super::theme::Theme;

const DISMISS_HINT: &str = "click or press a key";

pub struct NotificationPopup<'a> {
    pub notification: &'a Notification,
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let n = self.notification;
        let color = Theme::notification_color(n.kind);

        let text_w = n.message.chars().count().max(DISMISS_HINT.len()) as u16;
        let height = if n.is_sticky() { 4 } else { 3 };
        let popup = centered_fixed(text_w + 6, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::from(Span::styled(
            n.message.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        if n.is_sticky() {
            lines.push(Line::from(Span::styled(DISMISS_HINT, Theme::label_style())));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
