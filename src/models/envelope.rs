use serde::Deserialize;

/// Envoltura estándar de todas las respuestas del backend:
/// `{ success: bool, data: ..., message?: string }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRespuesta<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiRespuesta<T> {
    /// Extrae `data` o convierte el envelope en un error legible.
    /// `success: false` y HTTP no-2xx se tratan igual: un mensaje para el usuario.
    pub fn datos(self) -> Result<T, String> {
        if !self.success {
            return Err(self
                .message
                .unwrap_or_else(|| "Respuesta inválida del servidor".to_string()));
        }
        self.data
            .ok_or_else(|| "Respuesta inválida del servidor".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datos_devuelve_el_payload_cuando_success() {
        let resp: ApiRespuesta<Vec<u32>> = serde_json::from_str(
            r#"{"success": true, "data": [1, 2, 3]}"#,
        )
        .unwrap();
        assert_eq!(resp.datos().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn success_false_se_convierte_en_error_con_mensaje() {
        let resp: ApiRespuesta<Vec<u32>> = serde_json::from_str(
            r#"{"success": false, "message": "Token expirado"}"#,
        )
        .unwrap();
        assert_eq!(resp.datos().unwrap_err(), "Token expirado");
    }

    #[test]
    fn success_sin_data_es_error_generico() {
        let resp: ApiRespuesta<String> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.datos().is_err());
    }
}
