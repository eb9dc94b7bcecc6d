use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Widget,
    },
};

use crate::{
    constants::game::*,
    game::{Phase, RenderState},
};

/// Largest area inside `area` with the playfield's aspect ratio, centered.
///
/// Half-block cells hold two square pixels stacked vertically, so a row
/// counts twice against the playfield height.
pub fn fit_playfield(area: Rect, width: f32, height: f32) -> Rect {
    if area.is_empty() || width <= 0.0 || height <= 0.0 {
        return area;
    }
    let ratio = width / height;
    let full_width = area.height as f32 * 2.0 * ratio;
    let (cols, rows) = if full_width <= area.width as f32 {
        (full_width.round().max(1.0) as u16, area.height)
    } else {
        (area.width, (area.width as f32 / ratio / 2.0).round().max(1.0) as u16)
    };
    let cols = cols.min(area.width);
    let rows = rows.min(area.height);

    Rect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

pub struct Playfield<'a> {
    state: &'a RenderState,
}

impl<'a> Playfield<'a> {
    pub fn new(state: &'a RenderState) -> Self {
        Self { state }
    }
}

// Canvas coordinates grow upwards, the playfield grows downwards.
struct Painter {
    height: f64,
    step_x: f64,
    step_y: f64,
}

impl Painter {
    fn flip(&self, y: f32) -> f64 {
        self.height - y as f64
    }

    fn fill_rect(&self, ctx: &mut Context, x: f32, top: f32, width: f32, height: f32, color: Color) {
        let (x, right) = (x as f64, (x + width) as f64);
        let (y1, y2) = (self.flip(top), self.flip(top + height));
        let mut column = x;
        while column < right {
            ctx.draw(&CanvasLine::new(column, y1, column, y2, color));
            column += self.step_x;
        }
        ctx.draw(&CanvasLine::new(right, y1, right, y2, color));
    }

    fn fill_circle(&self, ctx: &mut Context, x: f32, y: f32, radius: f32, color: Color) {
        let (x, y, radius) = (x as f64, self.flip(y), radius as f64);
        let mut dy = -radius;
        while dy <= radius {
            let half = (radius * radius - dy * dy).max(0.0).sqrt();
            ctx.draw(&CanvasLine::new(x - half, y + dy, x + half, y + dy, color));
            dy += self.step_y;
        }
    }
}

impl Widget for Playfield<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let state = self.state;
        let painter = Painter {
            height: state.height as f64,
            step_x: (state.width as f64 / area.width as f64).max(f64::EPSILON),
            step_y: (state.height as f64 / (area.height as f64 * 2.0)).max(f64::EPSILON),
        };
        let sky = match state.phase {
            Phase::Dead => DEAD_SKY_COLOR,
            _ => SKY_COLOR,
        };
        let ground_line = state.height - state.ground_height;

        Canvas::default()
            .marker(Marker::HalfBlock)
            .background_color(sky)
            .x_bounds([0.0, state.width as f64])
            .y_bounds([0.0, state.height as f64])
            .paint(|ctx| {
                for pipe in &state.pipes {
                    let gap_bottom = pipe.gap_top() + state.gap_height;
                    painter.fill_rect(ctx, pipe.x(), 0.0, state.pipe_width, pipe.gap_top(), PIPE_COLOR);
                    painter.fill_rect(ctx, pipe.x(), gap_bottom, state.pipe_width, ground_line - gap_bottom, PIPE_COLOR);
                    painter.fill_rect(
                        ctx,
                        pipe.x() - 2.0,
                        pipe.gap_top() - PIPE_LIP_HEIGHT,
                        state.pipe_width + 4.0,
                        PIPE_LIP_HEIGHT,
                        PIPE_ACCENT_COLOR,
                    );
                    painter.fill_rect(ctx, pipe.x() - 2.0, gap_bottom, state.pipe_width + 4.0, PIPE_LIP_HEIGHT, PIPE_ACCENT_COLOR);
                }
                ctx.layer();

                painter.fill_rect(ctx, 0.0, ground_line, state.width, state.ground_height, GROUND_COLOR);
                ctx.layer();

                painter.fill_circle(ctx, state.bird_x, state.bird_y, state.bird_radius, BIRD_COLOR);
                ctx.draw(&Circle {
                    x: state.bird_x as f64,
                    y: painter.flip(state.bird_y),
                    radius: state.bird_radius as f64,
                    color: BIRD_EDGE_COLOR,
                });
                let eye = (
                    (state.bird_x + state.bird_radius * 0.35) as f64,
                    painter.flip(state.bird_y - state.bird_radius * 0.3),
                );
                ctx.draw(&Points { coords: &[eye], color: Color::White });
                let beak = state.bird_x + state.bird_radius;
                painter.fill_rect(ctx, beak, state.bird_y - 2.0, state.bird_radius * 0.4, 4.0, ACCENT_COLOR);
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fit_tall_area() {
        // 390 / 600 * 2 * 20 = 26 columns
        let area = fit_playfield(Rect::new(0, 0, 80, 20), 390.0, 600.0);
        assert_eq!(area, Rect::new(27, 0, 26, 20));
    }

    #[test]
    fn test_fit_narrow_area() {
        let area = fit_playfield(Rect::new(0, 0, 13, 40), 390.0, 600.0);
        assert_eq!(area, Rect::new(0, 15, 13, 10));
    }

    #[test]
    fn test_fit_empty_area() {
        let area = Rect::new(4, 4, 0, 0);
        assert_eq!(fit_playfield(area, 390.0, 600.0), area);
    }

    #[test]
    fn test_dead_tints_sky() {
        let mut state = RenderState {
            phase: Phase::Running,
            score: 0,
            best: 0,
            bird_x: 90.0,
            bird_y: 250.0,
            bird_radius: 18.0,
            pipes: Vec::new(),
            pipe_width: 48.0,
            gap_height: 128.0,
            width: 390.0,
            height: 600.0,
            ground_height: 60.0,
        };
        let area = Rect::new(0, 0, 26, 20);

        let mut buf = Buffer::empty(area);
        Playfield::new(&state).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, SKY_COLOR);

        state.phase = Phase::Dead;
        let mut buf = Buffer::empty(area);
        Playfield::new(&state).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, DEAD_SKY_COLOR);
    }
}
