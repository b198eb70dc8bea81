use serde::{Deserialize, Serialize};

/// Materia prima del inventario. El backend es inconsistente con el nombre
/// del campo de stock (`cantidad` vs `cantidadPiezas`), así que modelamos
/// ambos y `stock()` resuelve el que venga.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: String,
    pub nombre_producto: String,
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub cantidad: Option<i64>,
    #[serde(default)]
    pub cantidad_piezas: Option<i64>,
    #[serde(default)]
    pub unidad: String,
    #[serde(default)]
    pub cantidad_ohms: Option<f64>,
    #[serde(default)]
    pub precio_unitario: Option<f64>,
    #[serde(default)]
    pub fecha_registro: Option<String>,
}

impl Producto {
    pub fn stock(&self) -> i64 {
        self.cantidad.or(self.cantidad_piezas).unwrap_or(0)
    }

    pub fn coincide(&self, termino: &str) -> bool {
        let t = termino.to_lowercase();
        self.nombre_producto.to_lowercase().contains(&t)
            || self.categoria.to_lowercase().contains(&t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_prefiere_cantidad_sobre_cantidad_piezas() {
        let p: Producto = serde_json::from_str(
            r#"{"id":"p1","nombreProducto":"Capacitor","cantidad":7,"cantidadPiezas":99}"#,
        )
        .unwrap();
        assert_eq!(p.stock(), 7);
    }

    #[test]
    fn stock_usa_cantidad_piezas_si_cantidad_no_viene() {
        let p: Producto = serde_json::from_str(
            r#"{"id":"p1","nombreProducto":"Capacitor","cantidadPiezas":4}"#,
        )
        .unwrap();
        assert_eq!(p.stock(), 4);
    }
}
