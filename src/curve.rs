use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::elliptic::{complete_elliptic_e, QUADRATURE_INTERVALS};
use crate::error::{ensure_finite, MandalaError, Result};

/// Horizontal step of the arc-length walk, in curve units.
/// Spacing error between samples is bounded by this step.
pub const WALK_STEP: f64 = 0.001;

/// Upper bound on samples per request.
pub const MAX_SAMPLES: usize = 1_000_000;

/// One period of `y = amplitude * sin(2πx / period)`, centered so that it
/// spans `[-period / 2, period / 2]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveShape {
    pub period: f64,
    pub amplitude: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            AngleUnit::Radians => radians,
            AngleUnit::Degrees => radians.to_degrees(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRequest {
    pub shape: CurveShape,
    pub sample_count: usize,
    pub angle_unit: AngleUnit,
}

/// A point on the curve and the direction of its tangent there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSample {
    /// Distance along the curve from its start.
    pub arc_length: f64,
    pub x: f64,
    pub y: f64,
    /// Angle of the tangent against the horizontal axis, in the requested unit.
    pub tangent_angle: f64,
}

impl CurveShape {
    pub fn new(period: f64, amplitude: f64) -> Self {
        Self { period, amplitude }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.period.is_finite() && self.period > 0.0) {
            return Err(MandalaError::InvalidPeriod(self.period));
        }
        // the walk only terminates if a step still moves x at the curve ends
        if self.half_period() + WALK_STEP == self.half_period() {
            return Err(MandalaError::PeriodTooLong(self.period));
        }
        if !self.amplitude.is_finite() {
            return Err(MandalaError::InvalidAmplitude(self.amplitude));
        }
        Ok(())
    }

    pub fn half_period(&self) -> f64 {
        self.period * 0.5
    }

    /// Angular frequency, `2π / period`.
    fn frequency(&self) -> f64 {
        TAU / self.period
    }

    pub fn height_at(&self, x: f64) -> f64 {
        self.amplitude * (x * self.frequency()).sin()
    }

    /// Analytic derivative `dy/dx`.
    pub fn slope_at(&self, x: f64) -> f64 {
        self.amplitude * self.frequency() * (x * self.frequency()).cos()
    }

    /// Tangent angle in radians.
    pub fn tangent_angle_at(&self, x: f64) -> f64 {
        self.slope_at(x).atan()
    }

    fn sample_at(&self, x: f64, y: f64, arc_length: f64, unit: AngleUnit) -> CurveSample {
        CurveSample {
            arc_length,
            x,
            y,
            tangent_angle: unit.from_radians(self.tangent_angle_at(x)),
        }
    }
}

impl SampleRequest {
    pub fn new(shape: CurveShape, sample_count: usize) -> Self {
        Self {
            shape,
            sample_count,
            angle_unit: AngleUnit::Radians,
        }
    }

    pub fn in_degrees(mut self) -> Self {
        self.angle_unit = AngleUnit::Degrees;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_count < 2 {
            return Err(MandalaError::TooFewSamples(self.sample_count));
        }
        if self.sample_count > MAX_SAMPLES {
            return Err(MandalaError::TooManySamples {
                count: self.sample_count,
                max: MAX_SAMPLES,
            });
        }
        self.shape.validate()
    }
}

/// Arc length of one full period, using the default quadrature resolution.
pub fn total_arc_length(shape: &CurveShape) -> Result<f64> {
    total_arc_length_with(shape, QUADRATURE_INTERVALS)
}

/// Arc length of one full period of the sinusoid.
///
/// With `k = 2πA / P` the length is `∫ sqrt(1 + k²cos²(2πx/P)) dx` over one
/// period, which folds into `(2P / π) · E(-k²)`. A flat curve gives `E(0) = π/2`
/// and therefore exactly `P`.
pub fn total_arc_length_with(shape: &CurveShape, intervals: usize) -> Result<f64> {
    shape.validate()?;

    let k = shape.amplitude * shape.frequency();
    let total = 2.0 * shape.period / PI * complete_elliptic_e(-(k * k), intervals);
    ensure_finite("arcLength", total)
}

/// Places `sample_count` points along one period so that consecutive points
/// are the same distance apart when measured along the curve.
///
/// The curve is walked once from its start in steps of [`WALK_STEP`],
/// accumulating chord lengths. When a step would cross the next checkpoint,
/// the point is interpolated inside that step and the walk resumes from it.
/// The first and last samples are pinned to the curve's end points.
pub fn sample(request: &SampleRequest) -> Result<Vec<CurveSample>> {
    request.validate()?;

    let total = total_arc_length(&request.shape)?;
    Ok(sample_over(request, total))
}

/// Spreads checkpoints over `total` arc length. Checkpoints the walk cannot
/// reach are pinned to the curve end.
fn sample_over(request: &SampleRequest, total: f64) -> Vec<CurveSample> {
    let shape = &request.shape;
    let unit = request.angle_unit;
    let count = request.sample_count;

    let spacing = total / (count - 1) as f64;
    let half = shape.half_period();

    let mut samples = Vec::with_capacity(count);
    samples.push(shape.sample_at(-half, shape.height_at(-half), 0.0, unit));

    let mut walker = ArcWalker::new(shape);
    for i in 1..count - 1 {
        let target = i as f64 * spacing;
        let (x, y) = match walker.advance_to(target) {
            Some(point) => point,
            None => {
                log::warn!(
                    "arc walk reached the curve end {:.6} short of checkpoint {} of {}; clamping",
                    target - walker.walked,
                    i,
                    count - 1
                );
                (half, shape.height_at(half))
            }
        };
        samples.push(shape.sample_at(x, y, target, unit));
    }

    samples.push(shape.sample_at(half, shape.height_at(half), total, unit));

    log::debug!(
        "sampled {} points over arc length {:.4} (period {}, amplitude {})",
        count,
        total,
        shape.period,
        shape.amplitude
    );

    samples
}

/// Forward-only cursor over the curve. Never moves past the curve end.
struct ArcWalker<'a> {
    shape: &'a CurveShape,
    end: f64,
    x: f64,
    y: f64,
    walked: f64,
}

impl<'a> ArcWalker<'a> {
    fn new(shape: &'a CurveShape) -> Self {
        let start = -shape.half_period();
        Self {
            shape,
            end: shape.half_period(),
            x: start,
            y: shape.height_at(start),
            walked: 0.0,
        }
    }

    /// Walks until `target` arc length is reached and returns the point there,
    /// or `None` if the curve end arrives first.
    fn advance_to(&mut self, target: f64) -> Option<(f64, f64)> {
        while self.x < self.end {
            let next_x = (self.x + WALK_STEP).min(self.end);
            if next_x <= self.x {
                // no representable progress left
                break;
            }
            let next_y = self.shape.height_at(next_x);

            let dx = next_x - self.x;
            let dy = next_y - self.y;
            let segment = (dx * dx + dy * dy).sqrt();

            if self.walked + segment >= target {
                let ratio = (target - self.walked) / segment;
                self.x += dx * ratio;
                self.y += dy * ratio;
                self.walked = target;
                return Some((self.x, self.y));
            }

            self.x = next_x;
            self.y = next_y;
            self.walked += segment;
        }

        None
    }
}
