use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::curve::{AngleUnit, CurveSample};

/// Size of one bar. `width` runs across the curve (along Z).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BarDimensions {
    pub fn scale(&self) -> Vec3 {
        Vec3::new(self.depth, self.height, self.width)
    }
}

/// Local transform of one instanced cuboid, relative to its parent array.
#[derive(Clone, Debug, PartialEq)]
pub struct BarPlacement {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl BarPlacement {
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Rotation from Euler angles in degrees, applied Z first, then X, then Y.
pub fn unity_euler(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, y.to_radians(), x.to_radians(), z.to_radians())
}

/// One bar per sample, rolled about Z so it sits flush against the curve.
///
/// `unit` is the angle unit the samples were produced in.
pub fn place_bars(
    samples: &[CurveSample],
    unit: AngleUnit,
    dimensions: &BarDimensions,
) -> Vec<BarPlacement> {
    let scale = dimensions.scale();

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let roll = match unit {
                AngleUnit::Radians => sample.tangent_angle as f32,
                AngleUnit::Degrees => (sample.tangent_angle as f32).to_radians(),
            };

            BarPlacement {
                name: format!("Bar {}", i + 1),
                position: Vec3::new(sample.x as f32, sample.y as f32, 0.0),
                rotation: Quat::from_rotation_z(roll),
                scale,
            }
        })
        .collect()
}
