pub mod help;
pub mod multiline;
pub mod overlay;
pub mod playfield;
pub mod scorebar;
