use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Contact identity reported by the digitizer, stable for the lifetime of one
/// physical touch.
pub type ContactId = u8;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn midpoint(self, other: Self) -> Self {
        (self + other) / 2.0
    }

    pub fn component_mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    pub fn component_div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    /// Angle of the vector in degrees, screen convention (+y points down).
    pub fn angle_deg(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn rotated_deg(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// True when either component's magnitude is strictly past the matching
    /// threshold component.
    pub fn exceeds(self, threshold: Self) -> bool {
        self.x.abs() > threshold.x || self.y.abs() > threshold.y
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub id: ContactId,
    pub position: Vec2,
}

impl TouchPoint {
    pub const fn new(id: ContactId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Vec2::new(x, y),
        }
    }

    pub fn with_position(self, position: Vec2) -> Self {
        Self {
            id: self.id,
            position,
        }
    }
}

/// Rectangular region, optionally rotated (degrees, clockwise on screen)
/// around its center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Area {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: f32,
}

impl Area {
    pub const fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Axis-aligned area from its top-left corner.
    pub fn from_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(
            Vec2::new(x + width / 2.0, y + height / 2.0),
            width,
            height,
        )
    }

    pub fn with_rotation(self, rotation: f32) -> Self {
        Self { rotation, ..self }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.rotation.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Closed containment test: points exactly on an edge are inside.
    pub fn contains(&self, point: Vec2) -> bool {
        let p = self.unrotate(point);
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Position relative to the area's top-left corner, measured along the
    /// area's own (rotated) axes.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        let p = self.unrotate(point);
        Vec2::new(p.x - self.left(), p.y - self.top())
    }

    fn unrotate(&self, point: Vec2) -> Vec2 {
        if self.rotation == 0.0 {
            return point;
        }
        self.center + (point - self.center).rotated_deg(-self.rotation)
    }
}

#[cfg(test)]
mod tests;
