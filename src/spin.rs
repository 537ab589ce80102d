use glam::{Quat, Vec3};

use crate::layout::{mandala_array_name, BarArrayLayout};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

impl RotationAxis {
    /// 0 = X, 1 = Y, 2 = Z. Anything else falls back to the vertical axis.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => RotationAxis::X,
            2 => RotationAxis::Z,
            _ => RotationAxis::Y,
        }
    }

    pub fn vector(self) -> Vec3 {
        match self {
            RotationAxis::X => Vec3::X,
            RotationAxis::Y => Vec3::Y,
            RotationAxis::Z => Vec3::Z,
        }
    }
}

/// Constant-speed rotation about one local axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub rpm: f32,
    pub axis: RotationAxis,
}

impl Spin {
    pub fn new(rpm: f32, axis_index: i32) -> Self {
        Self {
            rpm,
            axis: RotationAxis::from_index(axis_index),
        }
    }

    pub fn degrees_per_second(&self) -> f32 {
        self.rpm * 360.0 / 60.0
    }

    /// Turns `rotation` about its own (local) axis by one frame's worth.
    pub fn advance(&self, rotation: Quat, delta_time: f32) -> Quat {
        let angle = (self.degrees_per_second() * delta_time).to_radians();
        (rotation * Quat::from_axis_angle(self.axis.vector(), angle)).normalize()
    }
}

/// Spins a fixed set of bar arrays, found by name when it is attached.
#[derive(Clone, Debug)]
pub struct Spinner {
    spin: Spin,
    targets: Vec<usize>,
}

impl Spinner {
    /// Targets the first array called `name`, if there is one.
    pub fn attach_named(spin: Spin, arrays: &[BarArrayLayout], name: &str) -> Self {
        let targets = match arrays.iter().position(|array| array.name == name) {
            Some(index) => vec![index],
            None => {
                log::warn!("no bar array named {name:?} to spin");
                Vec::new()
            }
        };
        Self { spin, targets }
    }

    /// Targets `Bar Array 1` through `Bar Array {num_arrays}`, skipping any
    /// that are missing.
    pub fn attach_mandala(spin: Spin, arrays: &[BarArrayLayout], num_arrays: usize) -> Self {
        let targets = (0..num_arrays)
            .filter_map(|i| {
                let name = mandala_array_name(i);
                let found = arrays.iter().position(|array| array.name == name);
                if found.is_none() {
                    log::warn!("mandala has no child named {name:?}");
                }
                found
            })
            .collect();
        Self { spin, targets }
    }

    pub fn spin(&self) -> Spin {
        self.spin
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Call once per frame.
    pub fn update(&self, arrays: &mut [BarArrayLayout], delta_time: f32) {
        for &index in &self.targets {
            if let Some(array) = arrays.get_mut(index) {
                array.rotation = self.spin.advance(array.rotation, delta_time);
            }
        }
    }
}
