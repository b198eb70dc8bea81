// ============================================================================
// SERVICES - Comunicación con el backend y flujos de negocio
// ============================================================================

pub mod alta_servicio;
pub mod api_client;
pub mod session_service;

pub use api_client::ApiClient;
pub use session_service::{cerrar_sesion, esta_autenticado, guardar_sesion, leer_sesion};
