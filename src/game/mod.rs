//! The rules of the game, free of any terminal or rendering concern.

pub mod bird;
pub mod pipe;
pub mod score;
pub mod session;
pub mod settings;

pub use score::{FileScoreStore, ScoreStore};
pub use session::{GameSession, Phase, RenderState};
pub use settings::{GameSettings, SettingsError};
