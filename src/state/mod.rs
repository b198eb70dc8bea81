// ============================================================================
// STATE - Estado compartido de la aplicación
// ============================================================================

pub mod app_state;
pub mod bus;
pub mod session_state;

pub use app_state::Pagina;
pub use bus::Coleccion;
pub use session_state::SesionContexto;
