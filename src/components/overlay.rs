use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::multiline::MultiLine;
use crate::{
    constants::{game::ACCENT_COLOR, GAME_OVER_TEXT, RESTART_HINT, START_HINT, TITLE_TEXT},
    game::{Phase, RenderState},
};

const CARD_HPADDING: u16 = 2;
const CARD_VPADDING: u16 = 1;

/// Dialog drawn over the playfield outside of a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Start,
    GameOver { score: u32, best: u32 },
}

impl Overlay {
    pub fn for_state(state: &RenderState) -> Option<Self> {
        match state.phase {
            Phase::Start => Some(Overlay::Start),
            Phase::Running => None,
            Phase::Dead => Some(Overlay::GameOver { score: state.score, best: state.best }),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        match self {
            Overlay::Start => vec![Line::from(START_HINT)],
            Overlay::GameOver { score, best } => vec![
                Line::from(GAME_OVER_TEXT).style(Style::new().fg(ACCENT_COLOR).bold()),
                Line::default(),
                Line::from(format!("Score: {score}   Best: {best}")),
                Line::default(),
                Line::from(RESTART_HINT).italic(),
            ],
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    area
}

impl Widget for Overlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let text_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
        let card_height = lines.len() as u16 + CARD_VPADDING * 2 + 2;
        let card_width = text_width + CARD_HPADDING * 2 + 2;

        let title = MultiLine::new(TITLE_TEXT).style(Style::new().fg(ACCENT_COLOR).bold());
        let title_height = match self {
            Overlay::Start if title.width() <= area.width => title.height() + 1,
            _ => 0,
        };

        let width = if title_height > 0 { card_width.max(title.width()) } else { card_width };
        let area = centered(area, width, title_height + card_height);
        let [title_area, card_area] =
            Layout::vertical([Constraint::Length(title_height), Constraint::Length(card_height)]).areas(area);

        if title_height > 0 {
            let [title_area] = Layout::horizontal([Constraint::Length(title.width())]).flex(Flex::Center).areas(title_area);
            title.render(title_area, buf);
        }

        let [card_area] = Layout::horizontal([Constraint::Length(card_width)]).flex(Flex::Center).areas(card_area);
        Clear.render(card_area, buf);
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::new().bg(Color::Black).fg(Color::White))
            .render(card_area, buf);

        let inner = card_area.inner(Margin { horizontal: CARD_HPADDING + 1, vertical: CARD_VPADDING + 1 });
        Paragraph::new(lines).alignment(Alignment::Center).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn state(phase: Phase) -> RenderState {
        RenderState {
            phase,
            score: 5,
            best: 8,
            bird_x: 0.0,
            bird_y: 0.0,
            bird_radius: 1.0,
            pipes: Vec::new(),
            pipe_width: 1.0,
            gap_height: 1.0,
            width: 10.0,
            height: 10.0,
            ground_height: 1.0,
        }
    }

    fn render(overlay: Overlay, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        overlay.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_overlay_follows_phase() {
        assert_eq!(Overlay::for_state(&state(Phase::Start)), Some(Overlay::Start));
        assert_eq!(Overlay::for_state(&state(Phase::Running)), None);
        assert_eq!(Overlay::for_state(&state(Phase::Dead)), Some(Overlay::GameOver { score: 5, best: 8 }));
    }

    #[test]
    fn test_game_over_card() {
        let text = render(Overlay::GameOver { score: 5, best: 8 }, Rect::new(0, 0, 40, 12));
        assert!(text.contains(GAME_OVER_TEXT));
        assert!(text.contains("Score: 5   Best: 8"));
        assert!(text.contains(RESTART_HINT));
    }

    #[test]
    fn test_start_card() {
        let text = render(Overlay::Start, Rect::new(0, 0, 50, 16));
        assert!(text.contains(START_HINT));
        assert!(text.contains('#'));
    }

    #[test]
    fn test_start_card_hides_title_when_narrow() {
        let text = render(Overlay::Start, Rect::new(0, 0, 34, 8));
        assert!(!text.contains('#'));
    }
}
