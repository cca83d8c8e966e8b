//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

pub mod console;
mod frame;
mod monitor;

pub use frame::{landmarks_from_flat, FRAME_LEN, LANDMARK_STRIDE};
pub use monitor::{supported_exercise_names, FormMonitor};
