use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::config::{key_event_to_string, PageKeyBindings};

const COLUMN_SPACING: u16 = 5;
const MARGIN_VERTICAL: u16 = 1;
const MARGIN_HORIZONTAL: u16 = 2;

/// Keybinding tables, one per group, stacked in the middle of the screen.
#[derive(Debug)]
pub struct Help {
    groups: Vec<(String, Vec<(String, String)>)>,
}

impl Help {
    pub fn new(groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = groups
            .into_iter()
            .map(|(name, bindings)| {
                let mut rows: Vec<(String, String)> =
                    bindings.iter().map(|(key, action)| (key_event_to_string(key), action.label())).collect();
                rows.sort();
                (name, rows)
            })
            .collect();
        Self { groups }
    }

    fn column_width(&self, column: impl Fn(&(String, String)) -> &String) -> u16 {
        self.groups.iter().flat_map(|(_, rows)| rows.iter().map(|row| column(row).len())).max().unwrap_or(0) as u16
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_width = self.column_width(|(key, _)| key).max(3);
        let action_width = self.column_width(|(_, action)| action).max(6);

        // columns + spacing + padding + border
        let width = key_width + action_width + COLUMN_SPACING + MARGIN_HORIZONTAL * 2 + 2;
        // rows + header + padding + border
        let heights = self.groups.iter().map(|(_, rows)| Constraint::Length(rows.len() as u16 + 2 + MARGIN_VERTICAL * 2 + 2));

        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        let areas = Layout::vertical(heights).flex(Flex::Center).split(area);

        for ((name, rows), area) in self.groups.into_iter().zip(areas.iter()) {
            let rows: Vec<Row> = rows.into_iter().map(|(key, action)| Row::new(vec![key, action])).collect();
            let table = Table::new(rows, [Constraint::Length(key_width), Constraint::Min(action_width)])
                .column_spacing(COLUMN_SPACING)
                .header(Row::new(vec!["Key", "Action"]).style(Style::new().bold()).bottom_margin(1))
                .block(
                    Block::new()
                        .title(name)
                        .title_alignment(Alignment::Center)
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::new().bold().fg(Color::Cyan))
                        .padding(Padding::symmetric(MARGIN_HORIZONTAL, MARGIN_VERTICAL)),
                );

            Clear.render(*area, buf);
            table.render(*area, buf);
        }
    }
}
