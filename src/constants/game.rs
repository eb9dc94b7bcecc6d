use ratatui::style::Color;

// Physics, in playfield units per logical frame.
pub const GRAVITY: f32 = 0.44;
pub const FLAP_IMPULSE: f32 = -7.0;
pub const SCROLL_SPEED: f32 = 2.4;

// Logical frames per second the physics constants are tuned for.
pub const LOGICAL_FRAME_RATE: f64 = 60.0;

pub const PLAYFIELD_WIDTH: f32 = 390.0;
pub const PLAYFIELD_HEIGHT: f32 = 600.0;
pub const GROUND_HEIGHT: f32 = 60.0;

pub const PIPE_WIDTH: f32 = 48.0;
pub const PIPE_SPACING: f32 = 170.0;
pub const PIPE_COUNT: usize = 4;
pub const PIPE_RECYCLE_MARGIN: f32 = 10.0;
pub const PIPE_GAP_HEIGHT: f32 = 128.0;
pub const PIPE_MIN_GAP_TOP: f32 = 90.0;
pub const PIPE_MAX_GAP_TOP: f32 = 340.0;

pub const BIRD_RADIUS: f32 = 18.0;
pub const BIRD_X_RATIO: f32 = 0.23;
pub const BIRD_START_RATIO: f32 = 0.42;

pub const CEILING_MARGIN: f32 = 2.0;
pub const CEILING_BOUNCE: f32 = 0.8;

pub const SKY_COLOR: Color = Color::Rgb(0xEC, 0xF8, 0xF9);
pub const DEAD_SKY_COLOR: Color = Color::Rgb(0xF5, 0x9E, 0x9C);
pub const GROUND_COLOR: Color = Color::Rgb(0xEA, 0xE7, 0xD6);
pub const PIPE_COLOR: Color = Color::Rgb(0xD6, 0xB7, 0x5D);
pub const PIPE_ACCENT_COLOR: Color = Color::Rgb(0xC0, 0x9D, 0x24);
pub const PIPE_LIP_HEIGHT: f32 = 15.0;
pub const BIRD_COLOR: Color = Color::Rgb(0x4E, 0xC0, 0xCA);
pub const BIRD_EDGE_COLOR: Color = Color::Rgb(0x38, 0xA2, 0xB0);
pub const ACCENT_COLOR: Color = Color::Rgb(0xFF, 0x4B, 0x4B);
