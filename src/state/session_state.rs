// ============================================================================
// SESSION STATE - Snapshot inmutable de la sesión
// ============================================================================
// Cada vista recibe este snapshot al montarse en lugar de releer localStorage
// en cada operación; un cambio de sesión implica recargar la página.
// ============================================================================

use crate::models::PerfilUsuario;
use crate::services::ApiClient;

#[derive(Debug, Clone, PartialEq)]
pub struct SesionContexto {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub nombre: String,
    pub tipo: String,
}

impl From<PerfilUsuario> for SesionContexto {
    fn from(p: PerfilUsuario) -> Self {
        Self {
            token: p.token,
            user_id: p.user_id,
            email: p.email,
            nombre: p.nombre,
            tipo: p.tipo,
        }
    }
}

impl SesionContexto {
    pub fn es_tecnico(&self) -> bool {
        self.tipo.trim().eq_ignore_ascii_case("tecnico")
    }

    pub fn es_gerente(&self) -> bool {
        self.tipo.trim().eq_ignore_ascii_case("gerente")
    }

    /// Cliente API ligado al token de esta sesión.
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sesion(tipo: &str) -> SesionContexto {
        SesionContexto {
            token: "t".into(),
            user_id: "u-1".into(),
            email: "x@taller.mx".into(),
            nombre: "X".into(),
            tipo: tipo.into(),
        }
    }

    #[test]
    fn el_rol_no_distingue_mayusculas() {
        assert!(sesion("Tecnico").es_tecnico());
        assert!(sesion("TECNICO").es_tecnico());
        assert!(sesion(" gerente ").es_gerente());
        assert!(!sesion("gerente").es_tecnico());
    }
}
