//! Tewuwuq App: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the platform adapters and hands them to the session
//! manager, exposed to the page as `ChatApp`.

mod app;

pub use app::ChatApp;

use wasm_bindgen::prelude::*;

/// WASM entry point: runs when the module is instantiated
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Tewuwuq WASM starting...");
}
