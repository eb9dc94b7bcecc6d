use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::constants::game::ACCENT_COLOR;

pub const SCOREBAR_HEIGHT: u16 = 1;

/// Current score and the best one, which already counts the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorebar {
    score: u32,
    best: u32,
}

impl Scorebar {
    pub fn new(score: u32, best: u32) -> Self {
        Self { score, best: best.max(score) }
    }
}

impl Widget for Scorebar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(self.score.to_string(), Style::new().bold()),
            Span::raw("   "),
            Span::styled("BEST ", Style::new().fg(ACCENT_COLOR).bold()),
            Span::raw(self.best.to_string()),
        ]);
        Paragraph::new(line).alignment(Alignment::Center).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let area = Rect::new(0, 0, 16, 1);
        let mut buf = Buffer::empty(area);
        Scorebar::new(4, 9).render(area, &mut buf);

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        insta::assert_snapshot!(text.trim(), @"4   BEST 9");
    }

    #[test]
    fn test_best_counts_current_run() {
        let area = Rect::new(0, 0, 16, 1);
        let mut buf = Buffer::empty(area);
        Scorebar::new(12, 10).render(area, &mut buf);

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        insta::assert_snapshot!(text.trim(), @"12   BEST 12");
    }
}
