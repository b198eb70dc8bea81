// ============================================================================
// VIEWS - Una vista por página HTML
// ============================================================================

pub mod alerts;
pub mod cliente_pedido;
pub mod clientes;
pub mod estadisticas;
pub mod gerente;
pub mod inventario_tecnico;
pub mod login;
pub mod materia_prima;
pub mod modals;
pub mod pedidos;
pub mod tarjetas_venta;
pub mod tecnico;

use gloo_net::http::Request;

/// Descarga un fragmento HTML estático (modales y alertas viven en assets/).
pub async fn fetch_fragmento(ruta: &str) -> Result<String, String> {
    let respuesta = Request::get(ruta)
        .send()
        .await
        .map_err(|e| format!("Error de red: {}", e))?;
    if !respuesta.ok() {
        return Err(format!("No se encontró {}", ruta));
    }
    respuesta
        .text()
        .await
        .map_err(|e| format!("Error leyendo {}: {}", ruta, e))
}
