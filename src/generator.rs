use glam::Mat4;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::config::{BarArrayParameters, MandalaParameters};
use crate::curve::{self, CurveShape, SampleRequest};
use crate::error::{MandalaError, Result};
use crate::layout::{self, BarArrayLayout, MandalaLayout, BAR_ARRAY_NAME};
use crate::spin::{Spin, Spinner};

/// Floats per sample in `sample_curve` output: arc length, x, y, angle.
pub const SAMPLE_STRIDE: usize = 4;
/// Floats per instance matrix (column-major 4x4).
pub const MATRIX_STRIDE: usize = 16;

/// What the generator last built, kept so it can be spun frame by frame.
enum Scene {
    Empty,
    BarArray(BarArrayLayout),
    Mandala(MandalaLayout),
}

impl Scene {
    fn root(&self) -> Mat4 {
        match self {
            Scene::Mandala(mandala) => mandala.root_matrix(),
            _ => Mat4::IDENTITY,
        }
    }

    fn arrays(&self) -> &[BarArrayLayout] {
        match self {
            Scene::Empty => &[],
            Scene::BarArray(array) => std::slice::from_ref(array),
            Scene::Mandala(mandala) => &mandala.arrays,
        }
    }

    fn arrays_mut(&mut self) -> &mut [BarArrayLayout] {
        match self {
            Scene::Empty => &mut [],
            Scene::BarArray(array) => std::slice::from_mut(array),
            Scene::Mandala(mandala) => &mut mandala.arrays,
        }
    }
}

/// Builds bar arrays and mandalas as flat instance-matrix buffers for an
/// instanced mesh on the JS side.
#[wasm_bindgen]
pub struct MandalaGenerator {
    // Reusable output buffer to avoid allocation per frame
    matrix_buffer: Vec<f32>,
    scene: Scene,
    spinner: Option<Spinner>,
}

impl Default for MandalaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MandalaGenerator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            matrix_buffer: Vec::new(),
            scene: Scene::Empty,
            spinner: None,
        }
    }

    /// Evenly spaced samples along one sine period.
    /// Returns flat array: [arcLength, x, y, angleDegrees, ...]
    #[wasm_bindgen(js_name = sampleCurve)]
    pub fn sample_curve(
        &self,
        period: f64,
        amplitude: f64,
        sample_count: usize,
    ) -> std::result::Result<Vec<f32>, JsError> {
        Ok(self.sample_curve_flat(period, amplitude, sample_count)?)
    }

    /// Accepts a (partial) `BarArrayParameters` object.
    /// Returns one 4x4 matrix per bar.
    #[wasm_bindgen(js_name = generateBarArray)]
    pub fn generate_bar_array(
        &mut self,
        params: JsValue,
    ) -> std::result::Result<Vec<f32>, JsError> {
        let params: BarArrayParameters = read_parameters(params)?;
        Ok(self.build_bar_array(&params)?)
    }

    /// Accepts a (partial) `MandalaParameters` object.
    /// Returns one 4x4 matrix per bar, array by array.
    #[wasm_bindgen(js_name = generateMandala)]
    pub fn generate_mandala(
        &mut self,
        params: JsValue,
    ) -> std::result::Result<Vec<f32>, JsError> {
        let params: MandalaParameters = read_parameters(params)?;
        Ok(self.build_mandala(&params)?)
    }

    /// Unit cube matrices on a circle. Does not replace the current scene.
    #[wasm_bindgen(js_name = generateCubeRing)]
    pub fn generate_cube_ring(
        &self,
        count: usize,
        radius: f32,
    ) -> std::result::Result<Vec<f32>, JsError> {
        Ok(self.cube_ring_flat(count, radius)?)
    }

    /// Starts spinning every array of the current scene.
    /// `axis`: 0 = X, 1 = Y, 2 = Z, anything else = Y
    #[wasm_bindgen(js_name = startSpin)]
    pub fn start_spin(&mut self, rpm: f32, axis: i32) {
        let spin = Spin::new(rpm, axis);
        let spinner = match &self.scene {
            Scene::Mandala(mandala) => {
                Spinner::attach_mandala(spin, &mandala.arrays, mandala.arrays.len())
            }
            scene => Spinner::attach_named(spin, scene.arrays(), BAR_ARRAY_NAME),
        };
        self.spinner = Some(spinner);
    }

    #[wasm_bindgen(js_name = stopSpin)]
    pub fn stop_spin(&mut self) {
        self.spinner = None;
    }

    /// Advance spinning (call once per frame) and return the current matrices.
    pub fn update(&mut self, delta_time: f32) -> Vec<f32> {
        if let Some(spinner) = &self.spinner {
            spinner.update(self.scene.arrays_mut(), delta_time);
        }
        self.write_matrices()
    }

    #[wasm_bindgen(getter, js_name = instanceCount)]
    pub fn instance_count(&self) -> usize {
        self.scene.arrays().iter().map(|array| array.bars.len()).sum()
    }
}

impl MandalaGenerator {
    pub fn sample_curve_flat(
        &self,
        period: f64,
        amplitude: f64,
        sample_count: usize,
    ) -> Result<Vec<f32>> {
        let request =
            SampleRequest::new(CurveShape::new(period, amplitude), sample_count).in_degrees();
        let samples = curve::sample(&request)?;

        let mut data = Vec::with_capacity(samples.len() * SAMPLE_STRIDE);
        for s in &samples {
            data.extend_from_slice(&[
                s.arc_length as f32,
                s.x as f32,
                s.y as f32,
                s.tangent_angle as f32,
            ]);
        }
        Ok(data)
    }

    pub fn cube_ring_flat(&self, count: usize, radius: f32) -> Result<Vec<f32>> {
        let cubes = layout::cube_ring(count, radius)?;
        Ok(flatten(cubes.iter().map(|cube| cube.local_matrix())))
    }

    pub fn build_bar_array(&mut self, params: &BarArrayParameters) -> Result<Vec<f32>> {
        let array = layout::build_bar_array(params)?;
        self.replace_scene(Scene::BarArray(array));
        Ok(self.write_matrices())
    }

    pub fn build_mandala(&mut self, params: &MandalaParameters) -> Result<Vec<f32>> {
        let mandala = layout::build_mandala(params)?;
        self.replace_scene(Scene::Mandala(mandala));
        Ok(self.write_matrices())
    }

    fn replace_scene(&mut self, scene: Scene) {
        self.scene = scene;
        // targets were resolved against the old scene
        self.spinner = None;
    }

    fn write_matrices(&mut self) -> Vec<f32> {
        self.matrix_buffer.clear();
        let root = self.scene.root();
        for array in self.scene.arrays() {
            for matrix in array.world_matrices(root) {
                self.matrix_buffer.extend_from_slice(&matrix.to_cols_array());
            }
        }
        self.matrix_buffer.clone()
    }
}

fn flatten(matrices: impl Iterator<Item = Mat4>) -> Vec<f32> {
    matrices.flat_map(|matrix| matrix.to_cols_array()).collect()
}

fn read_parameters<T: DeserializeOwned + Default>(value: JsValue) -> Result<T> {
    // `undefined` means "all defaults"
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|err| MandalaError::InvalidParameters(err.to_string()))
}
