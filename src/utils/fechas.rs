// ============================================================================
// FECHAS - Formato y parseo de fechas del backend
// ============================================================================
// El backend devuelve fechas en dos formas distintas según la ruta:
// un string ISO ("2025-12-02T22:15:30") o un arreglo de partes
// ([2025, 12, 2, 22, 15, 30]). `Fecha` acepta cualquiera de las dos.
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fecha {
    Texto(String),
    Partes(Vec<i64>),
}

impl Fecha {
    /// Formato de tabla: `dd/mm/yyyy HH:MM`. Si el valor no se puede
    /// interpretar, se devuelve tal cual; nunca se rechaza el renderizado.
    pub fn formato(&self) -> String {
        match self {
            Fecha::Partes(partes) => formato_partes(partes),
            Fecha::Texto(texto) => formato_iso(texto),
        }
    }
}

/// Formatea un `Option<Fecha>` mostrando `N/A` cuando no hay valor.
pub fn formato_opcional(fecha: &Option<Fecha>) -> String {
    fecha
        .as_ref()
        .map(|f| f.formato())
        .unwrap_or_else(|| "N/A".to_string())
}

fn formato_partes(partes: &[i64]) -> String {
    if partes.len() < 3 {
        return "N/A".to_string();
    }
    let hora = partes.get(3).copied().unwrap_or(0);
    let minuto = partes.get(4).copied().unwrap_or(0);
    format!(
        "{:02}/{:02}/{} {:02}:{:02}",
        partes[2], partes[1], partes[0], hora, minuto
    )
}

/// Parseo sin reloj: rebanamos el string ISO en vez de pasar por js_sys,
/// así el formato también funciona (y se prueba) fuera del navegador.
fn formato_iso(texto: &str) -> String {
    let bytes = texto.as_bytes();
    let es_fecha = bytes.len() >= 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && texto[..4].chars().all(|c| c.is_ascii_digit());

    if !es_fecha {
        return texto.to_string();
    }

    let (anio, mes, dia) = (&texto[..4], &texto[5..7], &texto[8..10]);

    // Con hora: "YYYY-MM-DDTHH:MM..."
    if bytes.len() >= 16 && (bytes[10] == b'T' || bytes[10] == b' ') {
        let (hora, minuto) = (&texto[11..13], &texto[14..16]);
        return format!("{}/{}/{} {}:{}", dia, mes, anio, hora, minuto);
    }

    format!("{}/{}/{}", dia, mes, anio)
}

/// Fecha de hoy en `YYYY-MM-DD`, para inputs tipo date.
pub fn hoy_iso() -> String {
    let ahora = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        ahora.get_full_year(),
        ahora.get_month() + 1,
        ahora.get_date()
    )
}

/// Fecha de hace `dias` días en `YYYY-MM-DD` (límite inferior del alta).
pub fn hace_dias_iso(dias: f64) -> String {
    let ms = js_sys::Date::now() - dias * 86_400_000.0;
    let fecha = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms));
    format!(
        "{:04}-{:02}-{:02}",
        fecha.get_full_year(),
        fecha.get_month() + 1,
        fecha.get_date()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializa_fecha_como_string_iso() {
        let f: Fecha = serde_json::from_str(r#""2025-12-02T22:15:30""#).unwrap();
        assert_eq!(f.formato(), "02/12/2025 22:15");
    }

    #[test]
    fn deserializa_fecha_como_arreglo_de_partes() {
        let f: Fecha = serde_json::from_str("[2025, 12, 2, 22, 15, 30]").unwrap();
        assert_eq!(f.formato(), "02/12/2025 22:15");
    }

    #[test]
    fn arreglo_sin_hora_asume_medianoche() {
        let f: Fecha = serde_json::from_str("[2025, 3, 7]").unwrap();
        assert_eq!(f.formato(), "07/03/2025 00:00");
    }

    #[test]
    fn fecha_solo_dia_sin_hora() {
        let f = Fecha::Texto("2025-01-15".to_string());
        assert_eq!(f.formato(), "15/01/2025");
    }

    #[test]
    fn un_valor_irreconocible_se_devuelve_tal_cual() {
        let f = Fecha::Texto("mañana".to_string());
        assert_eq!(f.formato(), "mañana");
    }

    #[test]
    fn formato_opcional_muestra_na() {
        assert_eq!(formato_opcional(&None), "N/A");
    }
}
