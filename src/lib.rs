use wasm_bindgen::prelude::*;

pub mod config;
pub mod curve;
pub mod elliptic;
pub mod error;
pub mod layout;
pub mod placement;
pub mod spin;

// Modules actively used by JS
pub mod generator;

pub use config::{BarArrayParameters, MandalaParameters};
pub use curve::{sample, total_arc_length, AngleUnit, CurveSample, CurveShape, SampleRequest};
pub use error::{MandalaError, Result};
pub use generator::MandalaGenerator;
pub use layout::{
    build_bar_array, build_mandala, build_mandala_with, ArrayOrientation, OrientationPolicy,
};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}
