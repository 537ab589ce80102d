use serde::{Deserialize, Serialize};

use crate::curve::{AngleUnit, CurveShape, SampleRequest};
use crate::error::{ensure_finite, MandalaError, Result};
use crate::layout::OrientationPolicy;
use crate::placement::BarDimensions;

/// Parameters for a single bar array laid along one sine period.
///
/// Missing fields fall back to their defaults, so a host can pass a partial
/// object such as `{ barCount: 12 }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarArrayParameters {
    pub bar_count: usize,
    /// Horizontal length of the sine period the bars follow.
    pub group_length: f32,
    /// Sine amplitude.
    pub vertical_scale: f32,
    pub bar_width: f32,
    pub bar_height: f32,
    pub bar_depth: f32,
    /// Euler angles in degrees applied to the whole array.
    pub rotation: [f32; 3],
}

impl Default for BarArrayParameters {
    fn default() -> Self {
        Self {
            bar_count: 9,
            group_length: 20.0,
            vertical_scale: 3.0,
            bar_width: 10.0,
            bar_height: 1.0,
            bar_depth: 1.0,
            rotation: [0.0; 3],
        }
    }
}

impl BarArrayParameters {
    pub fn sample_request(&self) -> SampleRequest {
        SampleRequest {
            shape: CurveShape::new(self.group_length as f64, self.vertical_scale as f64),
            sample_count: self.bar_count,
            angle_unit: AngleUnit::Degrees,
        }
    }

    pub fn dimensions(&self) -> BarDimensions {
        BarDimensions {
            width: self.bar_width,
            height: self.bar_height,
            depth: self.bar_depth,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.sample_request().validate()?;
        ensure_finite("barWidth", self.bar_width as f64)?;
        ensure_finite("barHeight", self.bar_height as f64)?;
        ensure_finite("barDepth", self.bar_depth as f64)?;
        for angle in self.rotation {
            ensure_finite("rotation", angle as f64)?;
        }
        Ok(())
    }
}

/// Parameters for a radial arrangement of identical bar arrays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MandalaParameters {
    pub num_arrays: usize,
    /// Radius of the circle the arrays are spread on.
    pub circle_width: f32,
    pub bar_count: usize,
    pub group_length: f32,
    pub vertical_scale: f32,
    pub bar_width: f32,
    pub bar_height: f32,
    pub bar_depth: f32,
    /// Where the mandala root sits in the scene.
    pub position: [f32; 3],
    pub orientation: OrientationPolicy,
}

impl Default for MandalaParameters {
    fn default() -> Self {
        Self {
            num_arrays: 16,
            circle_width: 10.0,
            bar_count: 9,
            group_length: 20.0,
            vertical_scale: 3.0,
            bar_width: 40.0,
            bar_height: 0.5,
            bar_depth: 0.5,
            position: [0.0, 1.5, 45.0],
            orientation: OrientationPolicy::default(),
        }
    }
}

impl MandalaParameters {
    /// The per-array parameters. Array rotation comes from the orientation
    /// policy instead, so it is left at zero here.
    pub fn bar_array(&self) -> BarArrayParameters {
        BarArrayParameters {
            bar_count: self.bar_count,
            group_length: self.group_length,
            vertical_scale: self.vertical_scale,
            bar_width: self.bar_width,
            bar_height: self.bar_height,
            bar_depth: self.bar_depth,
            rotation: [0.0; 3],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_arrays == 0 {
            return Err(MandalaError::NoArrays(self.num_arrays));
        }
        ensure_finite("circleWidth", self.circle_width as f64)?;
        for coordinate in self.position {
            ensure_finite("position", coordinate as f64)?;
        }
        self.bar_array().validate()
    }
}
