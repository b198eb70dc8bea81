// ============================================================================
// SESSION SERVICE - Persistencia de la sesión en localStorage
// ============================================================================

use crate::models::PerfilUsuario;
use crate::state::SesionContexto;
use crate::utils::storage;

/// Llave única bajo la que se guarda el blob JSON de la sesión.
pub const CLAVE_SESION: &str = "taller_sesion";

pub fn guardar_sesion(perfil: &PerfilUsuario) -> Result<(), String> {
    storage::guardar(CLAVE_SESION, perfil)?;
    log::info!("💾 Sesión guardada: {} ({})", perfil.nombre, perfil.tipo);
    Ok(())
}

/// Snapshot de la sesión actual, o None si no hay sesión guardada.
pub fn leer_sesion() -> Option<SesionContexto> {
    let perfil: PerfilUsuario = storage::cargar(CLAVE_SESION)?;
    if perfil.token.is_empty() {
        return None;
    }
    Some(perfil.into())
}

/// Hay sesión activa con token no vacío.
pub fn esta_autenticado() -> bool {
    leer_sesion().is_some()
}

/// Logout completo: borra la sesión y purga todo el almacenamiento.
pub fn cerrar_sesion() {
    let _ = storage::eliminar(CLAVE_SESION);
    storage::purgar_todo();
    log::info!("👋 Sesión cerrada");
}
