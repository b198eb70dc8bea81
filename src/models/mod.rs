// ============================================================================
// MODELS - Estructuras compartidas con el backend
// ============================================================================

pub mod cliente;
pub mod envelope;
pub mod finalizado;
pub mod marca;
pub mod producto;
pub mod sesion;
pub mod stats;
pub mod tarjeta;
pub mod tecnico;

pub use cliente::Cliente;
pub use envelope::ApiRespuesta;
pub use finalizado::Finalizado;
pub use marca::Marca;
pub use producto::Producto;
pub use sesion::{LoginRequest, PerfilUsuario, RegistroRequest};
pub use stats::{ChartDatos, StatsResumen};
pub use tarjeta::{MaterialUsado, Tarjeta};
pub use tecnico::Tecnico;
