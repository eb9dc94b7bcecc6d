use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::game;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("`{0}` must be a finite number")]
    NotFinite(&'static str),
    #[error("`{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("ground height {ground_height} leaves no sky in a playfield {height} tall")]
    GroundTooHigh { ground_height: f32, height: f32 },
    #[error("min gap top {min} is greater than max gap top {max}")]
    InvertedGapRange { min: f32, max: f32 },
    #[error("min gap top {0} is above the top of the playfield")]
    GapAboveCeiling(f32),
    #[error("a gap of height {gap_height} starting at {max_gap_top} reaches below the ground line at {ground_line}")]
    GapBelowGround { max_gap_top: f32, gap_height: f32, ground_line: f32 },
    #[error("a bird of radius {radius} does not fit through a gap of height {gap_height}")]
    GapTooNarrow { radius: f32, gap_height: f32 },
    #[error("`{name}` must be within 0..=1, got {value}")]
    RatioOutOfRange { name: &'static str, value: f32 },
    #[error("at least one pipe is required")]
    NoPipes,
}

/// Tunables of a play-through. Distances are playfield units, speeds are per
/// logical frame. `y` grows downwards from the top of the playfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default)]
#[serde(default)]
pub struct GameSettings {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    pub gravity: f32,
    pub flap_impulse: f32,
    pub scroll_speed: f32,
    pub pipe_width: f32,
    pub pipe_spacing: f32,
    pub pipe_count: usize,
    pub recycle_margin: f32,
    pub gap_height: f32,
    pub min_gap_top: f32,
    pub max_gap_top: f32,
    pub bird_radius: f32,
    pub bird_x_ratio: f32,
    pub bird_start_ratio: f32,
    pub ceiling_margin: f32,
    pub ceiling_bounce: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: game::PLAYFIELD_WIDTH,
            height: game::PLAYFIELD_HEIGHT,
            ground_height: game::GROUND_HEIGHT,
            gravity: game::GRAVITY,
            flap_impulse: game::FLAP_IMPULSE,
            scroll_speed: game::SCROLL_SPEED,
            pipe_width: game::PIPE_WIDTH,
            pipe_spacing: game::PIPE_SPACING,
            pipe_count: game::PIPE_COUNT,
            recycle_margin: game::PIPE_RECYCLE_MARGIN,
            gap_height: game::PIPE_GAP_HEIGHT,
            min_gap_top: game::PIPE_MIN_GAP_TOP,
            max_gap_top: game::PIPE_MAX_GAP_TOP,
            bird_radius: game::BIRD_RADIUS,
            bird_x_ratio: game::BIRD_X_RATIO,
            bird_start_ratio: game::BIRD_START_RATIO,
            ceiling_margin: game::CEILING_MARGIN,
            ceiling_bounce: game::CEILING_BOUNCE,
        }
    }
}

impl GameSettings {
    /// The y coordinate of the top of the ground.
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height
    }

    /// The bird never moves horizontally; pipes scroll past this x.
    pub fn bird_x(&self) -> f32 {
        self.width * self.bird_x_ratio
    }

    pub fn bird_start_y(&self) -> f32 {
        self.height * self.bird_start_ratio
    }

    /// The lowest y the bird center can reach before touching the ground.
    pub fn bird_floor(&self) -> f32 {
        self.ground_line() - self.bird_radius
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let numbers = [
            ("width", self.width),
            ("height", self.height),
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("flap_impulse", self.flap_impulse),
            ("scroll_speed", self.scroll_speed),
            ("pipe_width", self.pipe_width),
            ("pipe_spacing", self.pipe_spacing),
            ("recycle_margin", self.recycle_margin),
            ("gap_height", self.gap_height),
            ("min_gap_top", self.min_gap_top),
            ("max_gap_top", self.max_gap_top),
            ("bird_radius", self.bird_radius),
            ("bird_x_ratio", self.bird_x_ratio),
            ("bird_start_ratio", self.bird_start_ratio),
            ("ceiling_margin", self.ceiling_margin),
            ("ceiling_bounce", self.ceiling_bounce),
        ];
        if let Some(&(name, _)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(SettingsError::NotFinite(name));
        }

        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("scroll_speed", self.scroll_speed),
            ("pipe_width", self.pipe_width),
            ("pipe_spacing", self.pipe_spacing),
            ("gap_height", self.gap_height),
            ("bird_radius", self.bird_radius),
        ];
        if let Some(&(name, value)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(SettingsError::NotPositive { name, value });
        }

        for (name, value) in [("bird_x_ratio", self.bird_x_ratio), ("bird_start_ratio", self.bird_start_ratio)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::RatioOutOfRange { name, value });
            }
        }

        if self.pipe_count == 0 {
            return Err(SettingsError::NoPipes);
        }
        if self.ground_height < 0.0 || self.ground_height >= self.height {
            return Err(SettingsError::GroundTooHigh { ground_height: self.ground_height, height: self.height });
        }
        if self.min_gap_top > self.max_gap_top {
            return Err(SettingsError::InvertedGapRange { min: self.min_gap_top, max: self.max_gap_top });
        }
        if self.min_gap_top < 0.0 {
            return Err(SettingsError::GapAboveCeiling(self.min_gap_top));
        }
        if self.max_gap_top + self.gap_height > self.ground_line() {
            return Err(SettingsError::GapBelowGround {
                max_gap_top: self.max_gap_top,
                gap_height: self.gap_height,
                ground_line: self.ground_line(),
            });
        }
        if self.bird_radius * 2.0 > self.gap_height {
            return Err(SettingsError::GapTooNarrow { radius: self.bird_radius, gap_height: self.gap_height });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = GameSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.ground_line(), 540.0);
        assert_eq!(settings.bird_floor(), 522.0);
    }

    #[test]
    fn test_builder_keeps_defaults() {
        let settings = GameSettingsBuilder::default().gravity(0.0).build().unwrap();
        assert_eq!(settings.gravity, 0.0);
        assert_eq!(settings.pipe_count, game::PIPE_COUNT);
        assert_eq!(settings.gap_height, game::PIPE_GAP_HEIGHT);
    }

    #[test]
    fn test_inverted_gap_range() {
        let settings = GameSettingsBuilder::default().min_gap_top(300.0).max_gap_top(200.0).build().unwrap();
        assert_eq!(settings.validate(), Err(SettingsError::InvertedGapRange { min: 300.0, max: 200.0 }));
    }

    #[test]
    fn test_gap_taller_than_playfield() {
        let settings = GameSettingsBuilder::default().gap_height(700.0).build().unwrap();
        assert!(matches!(settings.validate(), Err(SettingsError::GapBelowGround { .. })));
    }

    #[test]
    fn test_gap_reaching_into_ground() {
        // 340 + 128 fits above 540, but not above 600 - 200
        let settings = GameSettingsBuilder::default().ground_height(200.0).build().unwrap();
        assert_eq!(
            settings.validate(),
            Err(SettingsError::GapBelowGround { max_gap_top: 340.0, gap_height: 128.0, ground_line: 400.0 })
        );
    }

    #[test]
    fn test_rejects_degenerate_values() {
        let settings = GameSettingsBuilder::default().width(0.0).build().unwrap();
        assert_eq!(settings.validate(), Err(SettingsError::NotPositive { name: "width", value: 0.0 }));

        let settings = GameSettingsBuilder::default().gravity(f32::NAN).build().unwrap();
        assert_eq!(settings.validate(), Err(SettingsError::NotFinite("gravity")));

        let settings = GameSettingsBuilder::default().pipe_count(0).build().unwrap();
        assert_eq!(settings.validate(), Err(SettingsError::NoPipes));

        let settings = GameSettingsBuilder::default().bird_radius(70.0).build().unwrap();
        assert!(matches!(settings.validate(), Err(SettingsError::GapTooNarrow { .. })));

        let settings = GameSettingsBuilder::default().min_gap_top(-1.0).build().unwrap();
        assert_eq!(settings.validate(), Err(SettingsError::GapAboveCeiling(-1.0)));
    }

    #[test]
    fn test_error_message() {
        let err = SettingsError::InvertedGapRange { min: 3.0, max: 2.0 };
        insta::assert_snapshot!(err.to_string(), @"min gap top 3 is greater than max gap top 2");
    }

    #[test]
    fn test_deserialize_partial_table() {
        let settings: GameSettings = serde_yaml::from_str("gravity: 0.5\npipe_count: 3\n").unwrap();
        assert_eq!(settings.gravity, 0.5);
        assert_eq!(settings.pipe_count, 3);
        assert_eq!(settings.flap_impulse, game::FLAP_IMPULSE);
    }
}
