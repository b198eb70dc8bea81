// ============================================================================
// TALLER APP - FRONTEND DE GESTIÓN DEL TALLER (RUST PURO)
// ============================================================================
// Cada página HTML estática carga este mismo bundle; el arranque detecta el
// pathname y monta la vista correspondiente:
// - Views: render de tablas, dashboards y modales
// - Services: comunicación con la API + saga de alta de servicio
// - State: sesión, bus de colecciones y resolución de página
// - Models: estructuras compartidas con el backend
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod views;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::config::CONFIG;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook primero: un panic sin hook muere en silencio en WASM.
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(Config::default());
    }
    log::info!(
        "🚀 Taller App - Rust Puro ({} → {})",
        CONFIG.environment,
        CONFIG.api_url()
    );

    app::arrancar()
}
