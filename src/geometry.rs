use glam::Vec2;

/// Rectangular playing area in world units, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamps a circle of the given radius so it stays fully inside the field
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        // f32::clamp panics when the radius is wider than half the field
        Vec2::new(
            pos.x.min(self.width - radius).max(radius),
            pos.y.min(self.height - radius).max(radius),
        )
    }

    /// True when `pos` lies inside the field grown by `margin` on every side
    pub fn contains(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }

    /// How far `pos` lies beyond the nearest edge, zero when inside
    pub fn distance_outside(&self, pos: Vec2) -> f32 {
        (-pos.x)
            .max(pos.x - self.width)
            .max(-pos.y)
            .max(pos.y - self.height)
            .max(0.0)
    }
}

/// Angle in radians from `from` toward `to`, atan2 convention
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Velocity of magnitude `speed` pointing along `angle`
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(angle) * speed
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
