use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Span, widgets::Widget};

/// Block lettering drawn cell by cell.
///
/// Whitespace is skipped so whatever is underneath shows through the letters.
#[derive(Debug, Default)]
pub struct MultiLine<'a> {
    lines: Vec<&'a str>,
    style: Style,
}

impl<'a> MultiLine<'a> {
    /// Takes ascii art, dropping blank leading and trailing lines.
    pub fn new(text: &'a str) -> Self {
        let lines = text.lines().filter(|line| !line.trim().is_empty()).collect();
        Self { lines, style: Style::default() }
    }

    pub fn style(self, style: Style) -> Self {
        Self { style, ..self }
    }

    pub fn width(&self) -> u16 {
        self.lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16
    }

    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

impl Widget for MultiLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for (row, line) in self.lines.iter().enumerate().take(area.height as usize) {
            let y = area.y + row as u16;
            for (col, pixel) in line.chars().enumerate().take(area.width as usize) {
                if pixel.is_whitespace() {
                    continue;
                }
                let cell = Rect { x: area.x + col as u16, y, width: 1, height: 1 };
                Span::styled(pixel.to_string(), self.style).render(cell, buf);
            }
        }
    }
}
