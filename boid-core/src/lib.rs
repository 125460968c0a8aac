#![cfg_attr(not(feature = "std"), no_std)]

pub mod config;
pub mod engine;
pub mod flock;
pub mod population;

pub use config::{ConfigError, FlockConfig, UpdateMode};
pub use engine::SteeringTerms;
pub use flock::FixedFlock;
#[cfg(feature = "std")]
pub use flock::Flock;

/// A 2D vector used for position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f32 {
        #[cfg(feature = "std")]
        {
            (self.x * self.x + self.y * self.y).sqrt()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sqrtf(self.x * self.x + self.y * self.y)
        }
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Rescales to exactly `max` when longer than `max`, keeping direction.
    pub fn limit(&self, max: f32) -> Self {
        let mag = self.magnitude();
        if mag > max {
            Self {
                x: (self.x / mag) * max,
                y: (self.y / mag) * max,
            }
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

/// A single flocking agent. Identity is its index in the population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self { position, velocity }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

/// The most recent externally observed attraction point, in integer
/// plane coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerTarget {
    pub x: i32,
    pub y: i32,
}

impl PointerTarget {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of a `width` x `height` plane, truncated toward zero.
    pub fn center_of(width: f32, height: f32) -> Self {
        Self {
            x: (width / 2.0) as i32,
            y: (height / 2.0) as i32,
        }
    }

    pub fn to_vector(self) -> Vector2D {
        Vector2D::new(self.x as f32, self.y as f32)
    }
}

impl From<PointerTarget> for Vector2D {
    fn from(target: PointerTarget) -> Self {
        target.to_vector()
    }
}

impl From<(i32, i32)> for PointerTarget {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
