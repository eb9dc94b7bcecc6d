use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Bird {
    y: f32,
    velocity: f32,
}

impl Bird {
    pub fn new(y: f32) -> Self {
        Bird { y, velocity: 0.0 }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    pub fn update(&mut self, gravity: f32, dt: f32) {
        self.velocity += gravity * dt;
        self.y += self.velocity * dt;
    }

    /// Replaces the current velocity; flaps never stack.
    pub fn up(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// Clamps the bird onto `floor`. Returns whether it was below it.
    pub fn land(&mut self, floor: f32) -> bool {
        if self.y > floor {
            self.y = floor;
            true
        } else {
            false
        }
    }

    /// Pushes the bird back under `ceiling` and sends it downwards.
    pub fn bounce(&mut self, ceiling: f32, margin: f32, velocity: f32) -> bool {
        if self.y < ceiling {
            self.y = ceiling + margin;
            self.velocity = velocity;
            true
        } else {
            false
        }
    }
}
