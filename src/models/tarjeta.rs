use serde::{Deserialize, Serialize};

use crate::utils::fechas::Fecha;

/// Tarjeta de servicio (reparación en curso). El id viene del backend con
/// forma de UUID; en pantalla se muestra el folio corto de 8 caracteres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tarjeta {
    pub id: String,
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
    pub problema_descrito: Option<String>,
    #[serde(default)]
    pub diagnostico_tecnico: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub tecnico_id: Option<String>,
    #[serde(default)]
    pub tecnico_nombre: Option<String>,
    #[serde(default)]
    pub fecha_registro: Option<Fecha>,
    #[serde(default)]
    pub fecha_ingreso: Option<Fecha>,
    #[serde(default)]
    pub fecha_finalizacion: Option<String>,
    #[serde(default)]
    pub costo_reparacion: Option<f64>,
}

impl Tarjeta {
    /// Folio corto de 8 caracteres para mostrar en tablas.
    pub fn folio(&self) -> String {
        folio_corto(&self.id)
    }

    pub fn estado_normalizado(&self) -> String {
        self.estado
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_uppercase()
    }

    /// El backend usa `problemaDescrito` en unas rutas y `problemaReportado`
    /// en otras; para mostrar aceptamos cualquiera.
    pub fn problema(&self) -> &str {
        self.problema_descrito
            .as_deref()
            .or(self.problema_reportado.as_deref())
            .unwrap_or("N/A")
    }
}

/// Material usado en un servicio (`GET /servicios/{id}/materiales`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsado {
    pub nombre_pieza: String,
    pub cantidad_usada: i64,
}

/// Prefijo de 8 caracteres de un id con forma de UUID.
pub fn folio_corto(id: &str) -> String {
    id.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_folio_corta_a_ocho_caracteres() {
        assert_eq!(folio_corto("a81bc81b-dead-4e5d-abff-90865d1e13b1"), "a81bc81b");
    }

    #[test]
    fn un_id_corto_no_entra_en_panico() {
        assert_eq!(folio_corto("abc"), "abc");
    }

    #[test]
    fn problema_acepta_cualquiera_de_los_dos_campos() {
        let t: Tarjeta = serde_json::from_str(
            r#"{"id":"t1","problemaReportado":"No enciende"}"#,
        )
        .unwrap();
        assert_eq!(t.problema(), "No enciende");

        let t: Tarjeta = serde_json::from_str(
            r#"{"id":"t2","problemaDescrito":"Pantalla rota"}"#,
        )
        .unwrap();
        assert_eq!(t.problema(), "Pantalla rota");
    }

    #[test]
    fn estado_normalizado_quita_espacios_y_sube_mayusculas() {
        let t: Tarjeta =
            serde_json::from_str(r#"{"id":"t1","estado":" en_proceso "}"#).unwrap();
        assert_eq!(t.estado_normalizado(), "EN_PROCESO");
    }
}
