use std::collections::VecDeque;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{info, warn};

use crate::game::{
    bird::Bird,
    pipe::Pipe,
    score::ScoreStore,
    settings::{GameSettings, SettingsError},
};

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Phase {
    /// Waiting for the first flap.
    #[default]
    Start,
    Running,
    /// Frozen until restarted.
    Dead,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub phase: Phase,
    pub score: u32,
    pub best: u32,
    pub bird_x: f32,
    pub bird_y: f32,
    pub bird_radius: f32,
    pub pipes: Vec<Pipe>,
    pub pipe_width: f32,
    pub gap_height: f32,
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
}

/// One player's game: bird, pipes, score and lifecycle phase.
///
/// Mutating calls must be serialized by the owner; the session itself keeps
/// no timers and never blocks.
pub struct GameSession<S> {
    settings: GameSettings,
    store: S,
    rng: StdRng,
    phase: Phase,
    bird: Bird,
    pipes: VecDeque<Pipe>,
    score: u32,
    best: u32,
}

impl<S: ScoreStore> GameSession<S> {
    pub fn new(settings: GameSettings, store: S, rng: StdRng) -> Result<Self, SettingsError> {
        settings.validate()?;

        let best = store.read();
        let mut session = GameSession {
            bird: Bird::new(settings.bird_start_y()),
            pipes: VecDeque::with_capacity(settings.pipe_count),
            settings,
            store,
            rng,
            phase: Phase::Start,
            score: 0,
            best,
        };
        session.reset();

        Ok(session)
    }

    /// Back to the start screen with a fresh bird, pipes and score.
    pub fn reset(&mut self) {
        self.respawn();
        self.phase = Phase::Start;
    }

    pub fn flap(&mut self) {
        match self.phase {
            Phase::Start => {
                self.respawn();
                self.phase = Phase::Running;
                self.bird.up(self.settings.flap_impulse);
                info!("Game started, best {}", self.best);
            },
            Phase::Running => self.bird.up(self.settings.flap_impulse),
            Phase::Dead => {},
        }
    }

    pub fn restart(&mut self) {
        if self.phase == Phase::Dead {
            self.respawn();
            self.phase = Phase::Running;
            info!("Game restarted, best {}", self.best);
        }
    }

    /// Advances the game by `dt` logical frames.
    ///
    /// Long steps run as several steps of at most one frame, so a pipe never
    /// jumps over the bird.
    pub fn advance_frame(&mut self, dt: f32) {
        if !dt.is_finite() {
            warn!("Ignoring frame step {dt}");
            return;
        }
        let mut remaining = dt;
        while remaining > 0.0 && self.phase == Phase::Running {
            let step = remaining.min(1.0);
            self.step(step);
            remaining -= step;
        }
    }

    fn step(&mut self, dt: f32) {
        self.bird.update(self.settings.gravity, dt);

        let step = self.settings.scroll_speed * dt;
        for pipe in self.pipes.iter_mut() {
            pipe.move_left(step);
        }
        self.recycle_pipes();

        for pipe in self.pipes.iter_mut() {
            if pipe.try_score(&self.settings) {
                self.score += 1;
            }
        }

        if self.pipes.iter().any(|pipe| pipe.collides_with(&self.bird, &self.settings)) {
            self.die();
        }
        if self.bird.land(self.settings.bird_floor()) {
            self.die();
        }
        self.bird.bounce(self.settings.bird_radius, self.settings.ceiling_margin, self.settings.ceiling_bounce);
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            phase: self.phase,
            score: self.score,
            best: self.best,
            bird_x: self.settings.bird_x(),
            bird_y: self.bird.y(),
            bird_radius: self.settings.bird_radius,
            pipes: self.pipes.iter().copied().collect(),
            pipe_width: self.settings.pipe_width,
            gap_height: self.settings.gap_height,
            width: self.settings.width,
            height: self.settings.height,
            ground_height: self.settings.ground_height,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn respawn(&mut self) {
        self.bird = Bird::new(self.settings.bird_start_y());
        self.pipes = (0..self.settings.pipe_count)
            .map(|i| {
                let x = self.settings.width + i as f32 * self.settings.pipe_spacing;
                Pipe::random(x, &self.settings, &mut self.rng)
            })
            .collect();
        self.score = 0;
    }

    // The window keeps its length: the leftmost pipe is replaced by one
    // spaced after the rightmost.
    fn recycle_pipes(&mut self) {
        if !self.pipes.front().is_some_and(|pipe| pipe.off_screen(&self.settings)) {
            return;
        }
        let Some(rightmost) = self.pipes.back().map(Pipe::x) else {
            return;
        };
        self.pipes.pop_front();
        let pipe = Pipe::random(rightmost + self.settings.pipe_spacing, &self.settings, &mut self.rng);
        self.pipes.push_back(pipe);
    }

    fn die(&mut self) {
        if self.phase == Phase::Dead {
            return;
        }
        self.phase = Phase::Dead;
        info!("Game over with score {}", self.score);

        if self.score > self.best {
            self.best = self.score;
            if let Err(e) = self.store.write(self.best) {
                warn!("Failed to save best score {}: {e:?}", self.best);
            }
        }
    }
}
