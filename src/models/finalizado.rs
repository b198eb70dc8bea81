use serde::{Deserialize, Serialize};

use crate::models::tarjeta::folio_corto;
use crate::utils::fechas::Fecha;

/// Registro de venta: una tarjeta que terminó reparación y se entrega.
/// Según la ruta, el backend identifica el registro por `id` o por
/// `registroTarjetaId`, así que modelamos ambos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finalizado {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub registro_tarjeta_id: Option<String>,
    #[serde(default)]
    pub nombre_cliente: Option<String>,
    #[serde(default)]
    pub numero_celular: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub problema_reportado: Option<String>,
    #[serde(default)]
    pub problema_cambiado: Option<String>,
    #[serde(default)]
    pub diagnostico_tecnico: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub tecnico_id: Option<String>,
    #[serde(default)]
    pub tecnico_nombre: Option<String>,
    #[serde(default)]
    pub fecha_entrega: Option<String>,
    #[serde(default)]
    pub fecha_finalizacion: Option<Fecha>,
    #[serde(default)]
    pub fecha_entrega_cliente: Option<Fecha>,
    #[serde(default)]
    pub costo_reparacion: Option<f64>,
}

impl Finalizado {
    /// Identificador a usar en `/finalizado/{id}`.
    pub fn clave(&self) -> &str {
        self.id
            .as_deref()
            .or(self.registro_tarjeta_id.as_deref())
            .unwrap_or("")
    }

    pub fn folio(&self) -> String {
        let clave = self.clave();
        if clave.is_empty() {
            "N/A".to_string()
        } else {
            folio_corto(clave)
        }
    }

    pub fn coincide(&self, termino: &str) -> bool {
        let t = termino.to_lowercase();
        let contiene = |campo: &Option<String>| {
            campo
                .as_deref()
                .map(|v| v.to_lowercase().contains(&t))
                .unwrap_or(false)
        };
        contiene(&self.nombre_cliente) || contiene(&self.marca) || contiene(&self.modelo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clave_cae_a_registro_tarjeta_id() {
        let f: Finalizado = serde_json::from_str(
            r#"{"registroTarjetaId":"abcd1234-0000","nombreCliente":"Luis"}"#,
        )
        .unwrap();
        assert_eq!(f.clave(), "abcd1234-0000");
        assert_eq!(f.folio(), "abcd1234");
    }

    #[test]
    fn sin_identificador_el_folio_es_na() {
        let f: Finalizado = serde_json::from_str(r#"{"nombreCliente":"Luis"}"#).unwrap();
        assert_eq!(f.folio(), "N/A");
    }

    #[test]
    fn el_filtro_busca_en_cliente_marca_y_modelo() {
        let f: Finalizado = serde_json::from_str(
            r#"{"id":"x","nombreCliente":"Laura","marca":"LG","modelo":"K40"}"#,
        )
        .unwrap();
        assert!(f.coincide("laura"));
        assert!(f.coincide("lg"));
        assert!(f.coincide("k4"));
        assert!(!f.coincide("samsung"));
    }
}
