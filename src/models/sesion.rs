use serde::{Deserialize, Serialize};

/// Perfil de usuario devuelto por `POST /auth/login` y persistido en localStorage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfilUsuario {
    pub token: String,
    pub user_id: String,
    #[serde(default, alias = "correoElectronico")]
    pub email: String,
    #[serde(default, alias = "nombreCompleto")]
    pub nombre: String,
    pub tipo: String,
}

/// Credenciales para `POST /auth/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub correo_electronico: String,
    pub contrasena: String,
}

/// Payload de `POST /auth/register`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroRequest {
    pub nombre_completo: String,
    pub correo_electronico: String,
    pub contrasena: String,
    pub tipo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializa_la_respuesta_de_login_del_backend() {
        let json = r#"{
            "token": "abc123",
            "userId": "u-1",
            "correoElectronico": "gerente@taller.mx",
            "nombreCompleto": "Ana Gerente",
            "tipo": "gerente"
        }"#;
        let perfil: PerfilUsuario = serde_json::from_str(json).unwrap();
        assert_eq!(perfil.token, "abc123");
        assert_eq!(perfil.nombre, "Ana Gerente");
        assert_eq!(perfil.tipo, "gerente");
    }
}
