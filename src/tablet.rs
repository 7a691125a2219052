#[cfg(feature = "serde")]
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    geometry::Vec2,
};

/// Physical size and logical resolution of one digitizer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct DigitizerSpec {
    pub width_mm: f32,
    pub height_mm: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl DigitizerSpec {
    pub const fn new(width_mm: f32, height_mm: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            max_x,
            max_y,
        }
    }

    pub fn lines_per_mm(&self) -> Vec2 {
        Vec2::new(self.max_x / self.width_mm, self.max_y / self.height_mm)
    }

    fn validate(&self) -> core::result::Result<(), &'static str> {
        let values = [self.width_mm, self.height_mm, self.max_x, self.max_y];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("digitizer extents must be finite");
        }
        if self.width_mm <= 0.0 || self.height_mm <= 0.0 {
            return Err("digitizer physical size must be positive");
        }
        if self.max_x <= 0.0 || self.max_y <= 0.0 {
            return Err("digitizer resolution must be positive");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct TabletGeometry {
    pub name: String,
    pub pen: DigitizerSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub touch: Option<DigitizerSpec>,
}

impl TabletGeometry {
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason| Error::InvalidGeometry {
            name: self.name.clone(),
            reason,
        };
        self.pen.validate().map_err(invalid)?;
        if let Some(touch) = &self.touch {
            touch.validate().map_err(invalid)?;
        }
        Ok(())
    }

    pub fn lines_per_mm(&self) -> Vec2 {
        self.pen.lines_per_mm()
    }

    /// Touch resolution; tablets without a separate touch digitizer report
    /// touches in pen coordinates.
    pub fn touch_lines_per_mm(&self) -> Vec2 {
        self.touch.as_ref().unwrap_or(&self.pen).lines_per_mm()
    }

    pub fn touch_converter(&self) -> Result<UnitConverter> {
        self.validate()?;
        let converter = UnitConverter::new(self.touch_lines_per_mm());
        debug!(
            tablet = %self.name,
            lpmm_x = converter.lines_per_mm.x,
            lpmm_y = converter.lines_per_mm.y,
            "touch unit conversion ready"
        );
        Ok(converter)
    }
}

/// Device-units to millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitConverter {
    lines_per_mm: Vec2,
}

impl UnitConverter {
    pub const fn new(lines_per_mm: Vec2) -> Self {
        Self { lines_per_mm }
    }

    /// Passes coordinates through unchanged.
    pub const fn identity() -> Self {
        Self::new(Vec2::new(1.0, 1.0))
    }

    pub fn lines_per_mm(&self) -> Vec2 {
        self.lines_per_mm
    }

    pub fn to_mm(&self, device: Vec2) -> Vec2 {
        device.component_div(self.lines_per_mm)
    }

    pub fn to_device(&self, mm: Vec2) -> Vec2 {
        mm.component_mul(self.lines_per_mm)
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(touch: Option<DigitizerSpec>) -> TabletGeometry {
        TabletGeometry {
            name: "PTH-660".into(),
            pen: DigitizerSpec::new(224.0, 148.0, 44_800.0, 29_600.0),
            touch,
        }
    }

    #[test]
    fn lines_per_mm_is_resolution_over_size() {
        let tablet = geometry(None);
        assert_eq!(tablet.lines_per_mm(), Vec2::new(200.0, 200.0));
    }

    #[test]
    fn touch_conversion_prefers_touch_digitizer() {
        let tablet = geometry(Some(DigitizerSpec::new(224.0, 148.0, 4_096.0, 4_096.0)));
        let converter = tablet.touch_converter().unwrap();
        let mm = converter.to_mm(Vec2::new(2_048.0, 4_096.0));
        assert!((mm.x - 112.0).abs() < 1e-3);
        assert!((mm.y - 148.0).abs() < 1e-3);
        let back = converter.to_device(mm);
        assert!((back.x - 2_048.0).abs() < 1e-2);
    }

    #[test]
    fn touch_conversion_falls_back_to_pen() {
        let tablet = geometry(None);
        assert_eq!(tablet.touch_lines_per_mm(), tablet.lines_per_mm());
    }

    #[test]
    fn zero_sized_digitizer_is_rejected() {
        let tablet = geometry(Some(DigitizerSpec::new(0.0, 148.0, 4_096.0, 4_096.0)));
        let err = tablet.touch_converter().unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { .. }));
    }
}
