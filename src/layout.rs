use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{BarArrayParameters, MandalaParameters};
use crate::curve;
use crate::error::{ensure_finite, Result};
use crate::placement::{place_bars, unity_euler, BarDimensions, BarPlacement};

/// Name the standalone bar array root is given, and looked up by.
pub const BAR_ARRAY_NAME: &str = "BarArray";

/// Name of the `index`-th (zero-based) array inside a mandala.
pub fn mandala_array_name(index: usize) -> String {
    format!("Bar Array {}", index + 1)
}

/// A group of bars sharing one parent transform.
#[derive(Clone, Debug, PartialEq)]
pub struct BarArrayLayout {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub bars: Vec<BarPlacement>,
}

impl BarArrayLayout {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// World transform of every bar, given the transform of the array's parent.
    pub fn world_matrices(&self, parent: Mat4) -> impl Iterator<Item = Mat4> + '_ {
        let array = parent * self.matrix();
        self.bars.iter().map(move |bar| array * bar.local_matrix())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MandalaLayout {
    pub position: Vec3,
    pub arrays: Vec<BarArrayLayout>,
}

impl MandalaLayout {
    pub fn root_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    pub fn find_array(&self, name: &str) -> Option<usize> {
        self.arrays.iter().position(|array| array.name == name)
    }

    pub fn bar_count(&self) -> usize {
        self.arrays.iter().map(|array| array.bars.len()).sum()
    }

    pub fn world_matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        let root = self.root_matrix();
        self.arrays.iter().flat_map(move |array| array.world_matrices(root))
    }
}

/// How each array is turned once it is moved onto the circle.
///
/// `angle_degrees` is the array's angular position on the circle.
pub trait ArrayOrientation {
    fn rotation_for(&self, angle_degrees: f32) -> Quat;
}

/// Euler `(90 - angle, 90, 0)`: each curve's plane is turned to lie along its
/// spoke, tipped by the array's angle.
#[derive(Clone, Copy, Debug, Default)]
pub struct FaceOutward;

impl ArrayOrientation for FaceOutward {
    fn rotation_for(&self, angle_degrees: f32) -> Quat {
        unity_euler(90.0 - angle_degrees, 90.0, 0.0)
    }
}

/// Euler `(0, angle, 90)`: each curve is stood upright, then yawed by the
/// array's angle.
#[derive(Clone, Copy, Debug, Default)]
pub struct RollAboutAxis;

impl ArrayOrientation for RollAboutAxis {
    fn rotation_for(&self, angle_degrees: f32) -> Quat {
        unity_euler(0.0, angle_degrees, 90.0)
    }
}

/// Serializable choice between the built-in orientations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrientationPolicy {
    #[default]
    FaceOutward,
    RollAboutAxis,
}

impl OrientationPolicy {
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => OrientationPolicy::RollAboutAxis,
            _ => OrientationPolicy::FaceOutward,
        }
    }
}

impl ArrayOrientation for OrientationPolicy {
    fn rotation_for(&self, angle_degrees: f32) -> Quat {
        match self {
            OrientationPolicy::FaceOutward => FaceOutward.rotation_for(angle_degrees),
            OrientationPolicy::RollAboutAxis => RollAboutAxis.rotation_for(angle_degrees),
        }
    }
}

fn bars_for(params: &BarArrayParameters) -> Result<Vec<BarPlacement>> {
    let request = params.sample_request();
    let samples = curve::sample(&request)?;
    Ok(place_bars(&samples, request.angle_unit, &params.dimensions()))
}

/// A standalone bar array at the origin, turned by `params.rotation`.
pub fn build_bar_array(params: &BarArrayParameters) -> Result<BarArrayLayout> {
    params.validate()?;

    let [x, y, z] = params.rotation;
    Ok(BarArrayLayout {
        name: BAR_ARRAY_NAME.to_owned(),
        position: Vec3::ZERO,
        rotation: unity_euler(x, y, z),
        bars: bars_for(params)?,
    })
}

/// A mandala oriented by `params.orientation`.
pub fn build_mandala(params: &MandalaParameters) -> Result<MandalaLayout> {
    build_mandala_with(params, &params.orientation)
}

/// `num_arrays` copies of the same bar array spread evenly around a circle
/// in the root's XY plane.
pub fn build_mandala_with<O: ArrayOrientation + ?Sized>(
    params: &MandalaParameters,
    orientation: &O,
) -> Result<MandalaLayout> {
    params.validate()?;

    // sampling is pure, so every array can share one set of bars
    let bars = bars_for(&params.bar_array())?;
    let angle_step = 360.0 / params.num_arrays as f32;

    let arrays = (0..params.num_arrays)
        .map(|i| {
            let angle = i as f32 * angle_step;
            let radians = angle.to_radians();

            BarArrayLayout {
                name: mandala_array_name(i),
                position: Vec3::new(radians.cos(), radians.sin(), 0.0) * params.circle_width,
                rotation: orientation.rotation_for(angle),
                bars: bars.clone(),
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "built mandala with {} arrays of {} bars",
        arrays.len(),
        bars.len()
    );

    Ok(MandalaLayout {
        position: Vec3::from_array(params.position),
        arrays,
    })
}

/// Unit cubes spread on a circle, each rolled so its X axis follows the
/// circle's tangent.
pub fn cube_ring(count: usize, radius: f32) -> Result<Vec<BarPlacement>> {
    ensure_finite("radius", radius as f64)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let unit = BarDimensions {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    };
    let angle_step = 360.0 / count as f32;

    Ok((0..count)
        .map(|i| {
            let angle = i as f32 * angle_step;
            let radians = angle.to_radians();

            BarPlacement {
                name: format!("Cube {}", i + 1),
                position: Vec3::new(radians.cos(), radians.sin(), 0.0) * radius,
                rotation: Quat::from_rotation_z((angle - 90.0).to_radians()),
                scale: unit.scale(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MandalaError;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_bar_array_rotation_applies_to_root() {
        let params = BarArrayParameters {
            rotation: [0.0, 0.0, 90.0],
            ..Default::default()
        };
        let layout = build_bar_array(&params).unwrap();
        assert_eq!(layout.name, BAR_ARRAY_NAME);
        assert_eq!(layout.bars.len(), 9);

        // the first bar starts at x = -10; rolled 90° it ends up at y = -10
        let first = layout.world_matrices(Mat4::IDENTITY).next().unwrap();
        let origin = first.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, -10.0, 0.0), EPSILON), "got {origin}");
    }

    #[test]
    fn test_mandala_arrays_on_circle() {
        let params = MandalaParameters {
            num_arrays: 4,
            circle_width: 5.0,
            ..Default::default()
        };
        let layout = build_mandala(&params).unwrap();

        assert_eq!(layout.arrays.len(), 4);
        assert_eq!(layout.bar_count(), 36);
        assert_eq!(layout.arrays[0].name, "Bar Array 1");
        assert_eq!(layout.find_array("Bar Array 4"), Some(3));
        assert_eq!(layout.find_array("Bar Array 5"), None);

        let expected = [
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(0.0, -5.0, 0.0),
        ];
        for (array, position) in layout.arrays.iter().zip(expected) {
            assert!(array.position.abs_diff_eq(position, EPSILON));
            assert_eq!(array.bars, layout.arrays[0].bars);
        }
    }

    #[test]
    fn test_orientation_policies() {
        let face = OrientationPolicy::FaceOutward.rotation_for(30.0);
        assert!(face.abs_diff_eq(unity_euler(60.0, 90.0, 0.0), EPSILON));

        let roll = OrientationPolicy::RollAboutAxis.rotation_for(30.0);
        assert!(roll.abs_diff_eq(unity_euler(0.0, 30.0, 90.0), EPSILON));

        assert_eq!(OrientationPolicy::from_index(1), OrientationPolicy::RollAboutAxis);
        assert_eq!(OrientationPolicy::from_index(7), OrientationPolicy::FaceOutward);
    }

    #[test]
    fn test_custom_orientation() {
        struct Fixed;
        impl ArrayOrientation for Fixed {
            fn rotation_for(&self, _: f32) -> Quat {
                Quat::IDENTITY
            }
        }

        let params = MandalaParameters {
            num_arrays: 3,
            ..Default::default()
        };
        let layout = build_mandala_with(&params, &Fixed).unwrap();
        assert!(layout.arrays.iter().all(|a| a.rotation == Quat::IDENTITY));
    }

    #[test]
    fn test_world_matrices_include_root() {
        let params = MandalaParameters {
            num_arrays: 2,
            ..Default::default()
        };
        let layout = build_mandala(&params).unwrap();
        let matrices: Vec<Mat4> = layout.world_matrices().collect();
        assert_eq!(matrices.len(), layout.bar_count());

        // the middle bar of each array sits on the array origin
        let middle = matrices[4].transform_point3(Vec3::ZERO);
        let expected = Vec3::new(0.0, 1.5, 45.0) + layout.arrays[0].position;
        assert!(middle.abs_diff_eq(expected, 1e-3), "got {middle}");
    }

    #[test]
    fn test_mandala_rejects_zero_arrays() {
        let params = MandalaParameters {
            num_arrays: 0,
            ..Default::default()
        };
        assert_eq!(build_mandala(&params), Err(MandalaError::NoArrays(0)));
    }

    #[test]
    fn test_cube_ring() {
        let cubes = cube_ring(4, 5.0).unwrap();
        assert_eq!(cubes.len(), 4);
        assert_eq!(cubes[3].name, "Cube 4");
        assert!(cubes[1].position.abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), EPSILON));

        // the cube's X axis follows the circle tangent
        let tangent = cubes[1].rotation * Vec3::X;
        assert!(tangent.abs_diff_eq(Vec3::X, EPSILON), "got {tangent}");

        assert!(cube_ring(0, 5.0).unwrap().is_empty());
    }
}
