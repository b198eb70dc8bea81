// ============================================================================
// UTILS - Helpers compartidos
// ============================================================================

pub mod clipboard;
pub mod estados;
pub mod fechas;
pub mod storage;
pub mod validacion;
