//! Side panel: whose turn it is, the game state, and the move list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::app::handler::color_name;
use crate::core::game::{Game, GameStatus};

use super::theme::Theme;

/// Lines above the move list (turn, status, blank, header).
const HEADER_LINES: usize = 4;

pub struct SidePanel<'a> {
    pub game: &'a Game,
}

impl SidePanel<'_> {
    fn status_line(&self) -> Line<'static> {
        let text = match self.game.status() {
            GameStatus::Ongoing => String::new(),
            GameStatus::Check => "Check!".into(),
            GameStatus::Checkmate { winner } => format!("Checkmate — {} wins", color_name(winner)),
            GameStatus::Stalemate => "Stalemate".into(),
            GameStatus::Draw => "Draw".into(),
        };
        Line::from(Span::styled(text, Theme::latest_move_style()))
    }

    /// Numbered move lines, newest last.
    fn move_lines(&self) -> Vec<Line<'static>> {
        let pairs = self.game.move_pairs();
        let last = pairs.len().saturating_sub(1);
        pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                let latest = |is_black: bool| {
                    if i == last && pair.black.is_some() == is_black {
                        Theme::latest_move_style()
                    } else {
                        Theme::move_style()
                    }
                };
                let (white_style, black_style) = (latest(false), latest(true));
                Line::from(vec![
                    Span::styled(format!("{:>3}. ", pair.number), Theme::move_number_style()),
                    Span::styled(format!("{:<8}", pair.white.unwrap_or("…")), white_style),
                    Span::styled(pair.black.unwrap_or("").to_string(), black_style),
                ])
            })
            .collect()
    }
}

impl Widget for SidePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Game ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let turn = self.game.turn();
        let mut lines = vec![
            Line::from(vec![
                Span::styled("● ", Theme::turn_style(turn)),
                Span::styled(format!("{} to move", color_name(turn)), Theme::turn_style(turn)),
            ]),
            self.status_line(),
            Line::raw(""),
            Line::from(Span::styled("Moves", Theme::title_style())),
        ];

        // Keep the newest moves in view.
        let mut moves = self.move_lines();
        let room = (inner.height as usize).saturating_sub(HEADER_LINES);
        if moves.len() > room {
            moves.drain(..moves.len() - room);
        }
        lines.extend(moves);

        Paragraph::new(lines).render(inner, buf);
    }
}
