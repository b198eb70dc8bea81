// ============================================================================
// CLIENTE PEDIDO - Historial de pedidos de un cliente (?celular=...)
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use web_sys::UrlSearchParams;

use crate::dom::get_element_by_id;
use crate::models::Tarjeta;
use crate::state::SesionContexto;
use crate::utils::estados::badge_estado;
use crate::utils::fechas::{formato_opcional, Fecha};

/// Filtra los servicios del cliente y los ordena del más reciente al más
/// antiguo según la fecha de ingreso.
pub fn pedidos_del_cliente(servicios: &[Tarjeta], celular: &str) -> Vec<Tarjeta> {
    let mut pedidos: Vec<Tarjeta> = servicios
        .iter()
        .filter(|s| s.numero_celular.as_deref() == Some(celular))
        .cloned()
        .collect();
    pedidos.sort_by(|a, b| clave_orden(&b.fecha_ingreso).cmp(&clave_orden(&a.fecha_ingreso)));
    pedidos
}

/// Clave de ordenamiento lexicográfico de una fecha. Las fechas ISO ya
/// ordenan bien como texto; las de arreglo se normalizan al mismo formato.
/// Sin fecha se ordena al final.
fn clave_orden(fecha: &Option<Fecha>) -> String {
    match fecha {
        None => String::new(),
        Some(Fecha::Texto(t)) => t.clone(),
        Some(Fecha::Partes(p)) => {
            let parte = |i: usize| p.get(i).copied().unwrap_or(0);
            format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                parte(0),
                parte(1),
                parte(2),
                parte(3),
                parte(4),
                parte(5)
            )
        }
    }
}

fn celular_de_la_url() -> Option<String> {
    let busqueda = web_sys::window()?.location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&busqueda).ok()?;
    params.get("celular").filter(|c| !c.is_empty())
}

pub fn montar(sesion: SesionContexto) {
    let Some(tabla) = get_element_by_id("tabla-pedidos") else {
        log::error!("❌ No se encontró #tabla-pedidos");
        return;
    };

    let Some(celular) = celular_de_la_url() else {
        tabla.set_inner_html(
            r#"<tr><td colspan="5" style="text-align:center; color:red;">Error: No se proporcionó número de celular.</td></tr>"#,
        );
        return;
    };

    spawn_local(async move {
        cargar(&sesion, &celular).await;
    });
}

async fn cargar(sesion: &SesionContexto, celular: &str) {
    // El nombre se obtiene aparte; si falla, el historial se muestra igual.
    let nombre = match sesion.api().obtener_cliente(celular).await {
        Ok(c) => c.nombre_completo(),
        Err(e) => {
            log::warn!("⚠️ No se pudo obtener info del cliente: {}", e);
            "Cliente no encontrado".to_string()
        }
    };

    if let Some(el) = get_element_by_id("cliente-nombre") {
        el.set_text_content(Some(&nombre));
    }
    if let Some(el) = get_element_by_id("cliente-celular") {
        el.set_text_content(Some(celular));
    }

    let Some(tabla) = get_element_by_id("tabla-pedidos") else {
        return;
    };

    match sesion.api().listar_servicios().await {
        Ok(servicios) => {
            let pedidos = pedidos_del_cliente(&servicios, celular);
            renderizar(&tabla, &pedidos);
        }
        Err(e) => {
            log::error!("❌ Error al cargar el historial: {}", e);
            tabla.set_inner_html(&format!(
                r#"<tr><td colspan="5" style="color:red; text-align:center;">Error al cargar el historial: {}</td></tr>"#,
                e
            ));
        }
    }
}

fn renderizar(tabla: &web_sys::Element, pedidos: &[Tarjeta]) {
    tabla.set_inner_html("");

    if pedidos.is_empty() {
        tabla.set_inner_html(
            r#"<tr><td colspan="5" style="text-align:center;">Este cliente no tiene pedidos registrados.</td></tr>"#,
        );
        return;
    }

    for pedido in pedidos {
        let fecha = if pedido.fecha_ingreso.is_some() {
            formato_opcional(&pedido.fecha_ingreso)
        } else {
            "---".to_string()
        };
        let costo = pedido
            .costo_reparacion
            .map(|c| format!("${:.2}", c))
            .unwrap_or_else(|| "Pendiente".to_string());

        let html = format!(
            r#"<tr><td>{}</td><td>{}</td><td>{} {}</td><td>{}</td><td><strong>{}</strong></td></tr>"#,
            badge_estado(pedido.estado.as_deref().unwrap_or("N/A")),
            fecha,
            pedido.marca.as_deref().unwrap_or(""),
            pedido.modelo.as_deref().unwrap_or(""),
            pedido.problema_reportado.as_deref().unwrap_or(""),
            costo
        );
        let _ = tabla.insert_adjacent_html("beforeend", &html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn servicio(id: &str, celular: &str, fecha: serde_json::Value) -> Tarjeta {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "numeroCelular": celular,
            "fechaIngreso": fecha,
        }))
        .unwrap()
    }

    #[test]
    fn filtra_por_celular_exacto() {
        let servicios = vec![
            servicio("a", "5512345678", serde_json::json!("2025-01-01T10:00:00")),
            servicio("b", "5599999999", serde_json::json!("2025-01-02T10:00:00")),
        ];
        let pedidos = pedidos_del_cliente(&servicios, "5512345678");
        assert_eq!(pedidos.len(), 1);
        assert_eq!(pedidos[0].id, "a");
    }

    #[test]
    fn ordena_del_mas_reciente_al_mas_antiguo() {
        let servicios = vec![
            servicio("viejo", "55", serde_json::json!("2024-06-01T08:00:00")),
            servicio("nuevo", "55", serde_json::json!("2025-03-10T12:30:00")),
            servicio("partes", "55", serde_json::json!([2025, 1, 5, 9, 0, 0])),
        ];
        let pedidos = pedidos_del_cliente(&servicios, "55");
        let ids: Vec<&str> = pedidos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["nuevo", "partes", "viejo"]);
    }

    #[test]
    fn sin_fecha_queda_al_final() {
        let servicios = vec![
            servicio("sin-fecha", "55", serde_json::Value::Null),
            servicio("con-fecha", "55", serde_json::json!("2025-01-01T00:00:00")),
        ];
        let pedidos = pedidos_del_cliente(&servicios, "55");
        assert_eq!(pedidos[0].id, "con-fecha");
        assert_eq!(pedidos[1].id, "sin-fecha");
    }
}
