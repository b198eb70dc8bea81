// ============================================================================
// DASHBOARD GERENTE - Resumen de tarjetas, stock bajo y entregas recientes
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, on_click, ElementBuilder};
use crate::models::stats::formato_monto;
use crate::models::{Finalizado, Producto, Tarjeta};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::estados::{badge_estado, stock_bajo};
use crate::utils::fechas::formato_opcional;
use crate::views::alerts::{notificar, TipoAlerta};

const MAX_RECIENTES: usize = 10;
const MAX_STOCK_BAJO: usize = 5;
const MAX_ENTREGAS: usize = 5;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ContadoresGerente {
    pub activos: usize,
    pub proceso: usize,
    pub finalizados: usize,
}

/// Contadores del encabezado. "Activos" es todo lo que aún está en el taller:
/// ni finalizado, ni entregado, ni cancelado.
pub fn contar(tarjetas: &[Tarjeta]) -> ContadoresGerente {
    let mut c = ContadoresGerente::default();
    for t in tarjetas {
        match t.estado_normalizado().as_str() {
            "FINALIZADO" | "ENTREGADO" => c.finalizados += 1,
            "CANCELADO" => {}
            "EN_PROCESO" => {
                c.proceso += 1;
                c.activos += 1;
            }
            _ => c.activos += 1,
        }
    }
    c
}

pub fn montar(sesion: SesionContexto) {
    {
        let sesion = sesion.clone();
        bus::suscribir(
            &[
                Coleccion::Tarjetas,
                Coleccion::Servicios,
                Coleccion::Productos,
                Coleccion::Finalizados,
            ],
            move |_| {
                let sesion = sesion.clone();
                spawn_local(async move {
                    recargar(&sesion).await;
                });
            },
        );
    }

    spawn_local(async move {
        recargar(&sesion).await;
    });
}

async fn recargar(sesion: &SesionContexto) {
    match sesion.api().listar_tarjetas().await {
        Ok(tarjetas) => {
            let contadores = contar(&tarjetas);
            set_contador("count-activos", contadores.activos);
            set_contador("count-proceso", contadores.proceso);
            set_contador("count-finalizados", contadores.finalizados);
            renderizar_recientes(&tarjetas);
        }
        Err(e) => log::error!("❌ Error cargando tarjetas: {}", e),
    }

    match sesion.api().listar_productos().await {
        Ok(productos) => renderizar_stock_bajo(&productos),
        Err(e) => log::error!("❌ Error cargando productos: {}", e),
    }

    match sesion.api().listar_finalizados().await {
        Ok(finalizados) => renderizar_entregas(&finalizados),
        Err(e) => log::error!("❌ Error cargando entregas: {}", e),
    }
}

fn set_contador(id: &str, valor: usize) {
    if let Some(el) = get_element_by_id(id) {
        el.set_text_content(Some(&valor.to_string()));
    }
}

fn renderizar_recientes(tarjetas: &[Tarjeta]) {
    let Some(cuerpo) = get_element_by_id("table-body") else {
        return;
    };
    cuerpo.set_inner_html("");

    if tarjetas.is_empty() {
        cuerpo.set_inner_html(
            r#"<tr><td colspan="5" style="text-align:center">No hay tarjetas recientes.</td></tr>"#,
        );
        return;
    }

    for tarjeta in tarjetas.iter().take(MAX_RECIENTES) {
        if let Err(e) = agregar_fila_tarjeta(&cuerpo, tarjeta) {
            log::error!("❌ Error renderizando tarjeta: {:?}", e);
        }
    }
}

fn agregar_fila_tarjeta(cuerpo: &Element, tarjeta: &Tarjeta) -> Result<(), JsValue> {
    let fila = ElementBuilder::new("tr")?
        .html(&format!(
            r#"<td title="{}">{}...</td><td>{}</td><td>{}</td><td>{}</td>"#,
            tarjeta.id,
            tarjeta.folio(),
            tarjeta.nombre_cliente.as_deref().unwrap_or("N/A"),
            badge_estado(tarjeta.estado.as_deref().unwrap_or("N/A")),
            tarjeta.tecnico_nombre.as_deref().unwrap_or("Sin Asignar")
        ))
        .build();

    let btn_copiar = ElementBuilder::new("button")?
        .class("btn-accion btn-copiar")
        .attr("title", "Copiar Folio Completo")?
        .text("📋 Copiar ID")
        .build();
    {
        let id = tarjeta.id.clone();
        let boton = btn_copiar.clone();
        let _ = on_click(&btn_copiar, move |_| {
            match crate::utils::clipboard::copiar_al_portapapeles(&id) {
                Ok(_) => {
                    let original = boton.inner_html();
                    boton.set_inner_html("✅ Copiado");
                    let boton = boton.clone();
                    Timeout::new(1_500, move || boton.set_inner_html(&original)).forget();
                    notificar(TipoAlerta::Exito, "Folio copiado al portapapeles");
                }
                Err(e) => {
                    log::error!("❌ Error al copiar: {}", e);
                    notificar(TipoAlerta::Error, "No se pudo copiar el folio");
                }
            }
        });
    }

    let acciones = ElementBuilder::new("td")?.child(btn_copiar)?.build();
    fila.append_child(&acciones)?;
    cuerpo.append_child(&fila)?;
    Ok(())
}

fn renderizar_stock_bajo(productos: &[Producto]) {
    let bajos: Vec<&Producto> = productos.iter().filter(|p| stock_bajo(p.stock())).collect();

    if let Some(contador) = get_element_by_id("count-stock-bajo") {
        contador.set_text_content(Some(&bajos.len().to_string()));
        if let Some(card) = contador.closest(".card-stock-bajo").ok().flatten() {
            if bajos.is_empty() {
                let _ = card.class_list().remove_1("active");
            } else {
                let _ = card.class_list().add_1("active");
            }
        }
    }

    let Some(cuerpo) = get_element_by_id("productos-table-body") else {
        return;
    };
    cuerpo.set_inner_html("");

    if bajos.is_empty() {
        cuerpo.set_inner_html(
            r#"<tr><td colspan="5" style="text-align:center">Todo el stock está correcto.</td></tr>"#,
        );
        return;
    }

    for producto in bajos.iter().take(MAX_STOCK_BAJO) {
        let html = format!(
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td style="color: #d90429; font-weight: bold;">{} ⚠️</td><td><a href="MateriaPrima.html" class="btn-accion">Gestionar</a></td></tr>"#,
            producto.nombre_producto,
            producto.categoria,
            producto.unidad,
            producto.stock()
        );
        let _ = cuerpo.insert_adjacent_html("beforeend", &html);
    }
}

fn renderizar_entregas(finalizados: &[Finalizado]) {
    let Some(cuerpo) = get_element_by_id("finalizados-table-body") else {
        return;
    };
    cuerpo.set_inner_html("");

    if finalizados.is_empty() {
        cuerpo.set_inner_html(
            r#"<tr><td colspan="5" style="text-align:center">No hay entregas recientes.</td></tr>"#,
        );
        return;
    }

    for pedido in finalizados.iter().take(MAX_ENTREGAS) {
        let fecha = if pedido.fecha_finalizacion.is_some() {
            formato_opcional(&pedido.fecha_finalizacion)
        } else {
            formato_opcional(&pedido.fecha_entrega_cliente)
        };
        let html = format!(
            r#"<tr><td title="{}">{}...</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            pedido.clave(),
            pedido.folio(),
            pedido.nombre_cliente.as_deref().unwrap_or("N/A"),
            pedido.tecnico_nombre.as_deref().unwrap_or("N/A"),
            fecha,
            formato_monto(pedido.costo_reparacion)
        );
        let _ = cuerpo.insert_adjacent_html("beforeend", &html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tarjeta(estado: &str) -> Tarjeta {
        serde_json::from_value(serde_json::json!({ "id": "t", "estado": estado })).unwrap()
    }

    #[test]
    fn activos_excluye_finalizados_entregados_y_cancelados() {
        let tarjetas = vec![
            tarjeta("PENDIENTE"),
            tarjeta("DIAGNOSTICO"),
            tarjeta("EN_PROCESO"),
            tarjeta("FINALIZADO"),
            tarjeta("ENTREGADO"),
            tarjeta("CANCELADO"),
        ];
        let c = contar(&tarjetas);
        assert_eq!(
            c,
            ContadoresGerente {
                activos: 3,
                proceso: 1,
                finalizados: 2,
            }
        );
    }

    #[test]
    fn en_proceso_cuenta_como_activo_y_como_proceso() {
        let c = contar(&[tarjeta("EN_PROCESO")]);
        assert_eq!(c.activos, 1);
        assert_eq!(c.proceso, 1);
    }
}
