use rand::Rng;
use serde::Serialize;

use crate::game::{bird::Bird, settings::GameSettings};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pipe {
    x: f32,
    gap_top: f32,
    scored: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Pipe { x, gap_top, scored: false }
    }

    /// A pipe at `x` whose gap top is drawn uniformly from the configured range.
    pub fn random<R: Rng>(x: f32, settings: &GameSettings, rng: &mut R) -> Self {
        let gap_top = rng.gen_range(settings.min_gap_top..=settings.max_gap_top);
        Pipe::new(x, gap_top)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    pub fn scored(&self) -> bool {
        self.scored
    }

    pub fn move_left(&mut self, step: f32) {
        self.x -= step;
    }

    /// Whether the trailing edge has left the playfield, margin included.
    pub fn off_screen(&self, settings: &GameSettings) -> bool {
        self.x < -settings.pipe_width - settings.recycle_margin
    }

    /// Marks the pipe as scored the first time its trailing edge is behind the
    /// bird. Returns true only on that first time.
    pub fn try_score(&mut self, settings: &GameSettings) -> bool {
        if !self.scored && settings.bird_x() > self.x + settings.pipe_width {
            self.scored = true;
            true
        } else {
            false
        }
    }

    pub fn collides_with(&self, bird: &Bird, settings: &GameSettings) -> bool {
        let radius = settings.bird_radius;
        let bird_x = settings.bird_x();

        interval_sec(bird_x - radius, bird_x + radius, self.x, self.x + settings.pipe_width)
            && (bird.y() - radius < self.gap_top || bird.y() + radius > self.gap_top + settings.gap_height)
    }
}

// Open intervals: touching edges do not overlap.
fn interval_sec(l1: f32, r1: f32, l2: f32, r2: f32) -> bool {
    r1 > l2 && l1 < r2
}
