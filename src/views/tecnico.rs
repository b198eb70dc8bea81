// ============================================================================
// DASHBOARD TÉCNICO - Mis reparaciones asignadas
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, on_click, ElementBuilder};
use crate::models::Tarjeta;
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::clipboard::copiar_al_portapapeles;
use crate::utils::estados::{color_estado, grupo_contador, stock_bajo, GrupoContador};
use crate::utils::fechas::formato_opcional;
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::{editar_estado, ModalHost};

/// Contadores de las tarjetas asignadas al técnico en sesión.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ContadoresTecnico {
    pub pendientes: usize,
    pub proceso: usize,
    pub finalizadas: usize,
}

/// Filtra del listado global las tarjetas asignadas a `tecnico_id`.
pub fn mis_tarjetas(todas: &[Tarjeta], tecnico_id: &str) -> Vec<Tarjeta> {
    todas
        .iter()
        .filter(|t| t.tecnico_id.as_deref() == Some(tecnico_id))
        .cloned()
        .collect()
}

pub fn contar(tarjetas: &[Tarjeta]) -> ContadoresTecnico {
    let mut c = ContadoresTecnico::default();
    for t in tarjetas {
        match grupo_contador(&t.estado_normalizado()) {
            GrupoContador::Pendientes => c.pendientes += 1,
            GrupoContador::Proceso => c.proceso += 1,
            GrupoContador::Finalizadas => c.finalizadas += 1,
            _ => {}
        }
    }
    c
}

pub fn montar(sesion: SesionContexto) {
    let Some(host) = ModalHost::nuevo() else {
        log::error!("❌ No se encontró #modal-container");
        return;
    };
    let sesion = Rc::new(sesion);

    {
        let sesion = sesion.clone();
        let host = host.clone();
        bus::suscribir(
            &[Coleccion::Tarjetas, Coleccion::Servicios, Coleccion::Productos],
            move |_| {
                let sesion = sesion.clone();
                let host = host.clone();
                spawn_local(async move {
                    recargar(&sesion, &host).await;
                });
            },
        );
    }

    spawn_local(async move {
        recargar(&sesion, &host).await;
    });
}

async fn recargar(sesion: &SesionContexto, host: &ModalHost) {
    match sesion.api().listar_tarjetas().await {
        Ok(todas) => {
            let propias = mis_tarjetas(&todas, &sesion.user_id);
            renderizar(&propias, host, sesion);
        }
        Err(e) => log::error!("❌ Error cargando dashboard: {}", e),
    }

    cargar_stock_bajo(sesion).await;
}

fn renderizar(tarjetas: &[Tarjeta], host: &ModalHost, sesion: &SesionContexto) {
    let Some(cuerpo) = get_element_by_id("tabla-mis-reparaciones") else {
        return;
    };
    cuerpo.set_inner_html("");

    if tarjetas.is_empty() {
        cuerpo.set_inner_html(
            r#"<tr><td colspan="6" style="text-align:center">No tienes reparaciones asignadas.</td></tr>"#,
        );
    }

    for tarjeta in tarjetas {
        if let Err(e) = agregar_fila(&cuerpo, tarjeta, host, sesion) {
            log::error!("❌ Error renderizando reparación: {:?}", e);
        }
    }

    let contadores = contar(tarjetas);
    set_contador("count-pendientes", contadores.pendientes);
    set_contador("count-proceso", contadores.proceso);
    set_contador("count-finalizadas", contadores.finalizadas);
}

fn set_contador(id: &str, valor: usize) {
    if let Some(el) = get_element_by_id(id) {
        el.set_text_content(Some(&valor.to_string()));
    }
}

fn agregar_fila(
    cuerpo: &Element,
    tarjeta: &Tarjeta,
    host: &ModalHost,
    sesion: &SesionContexto,
) -> Result<(), JsValue> {
    let estado = tarjeta.estado.as_deref().unwrap_or("N/A");

    let fila = ElementBuilder::new("tr")?
        .html(&format!(
            r#"<td>{}...</td><td>{} / {}</td><td>{}</td><td><span style="color: {}; font-weight: bold;">{}</span></td><td>{}</td>"#,
            tarjeta.folio(),
            tarjeta.marca.as_deref().unwrap_or("N/A"),
            tarjeta.modelo.as_deref().unwrap_or("N/A"),
            tarjeta.problema(),
            color_estado(estado),
            estado,
            formato_opcional(&tarjeta.fecha_ingreso)
        ))
        .build();

    let id = tarjeta.id.clone();

    let btn_estado = ElementBuilder::new("button")?
        .class("btn-accion btn-cambiar-estado")
        .text("Editar Estado")
        .build();
    {
        let host = host.clone();
        let sesion = sesion.clone();
        let id = id.clone();
        let _ = on_click(&btn_estado, move |_| {
            editar_estado::abrir(host.clone(), sesion.clone(), id.clone());
        });
    }

    let btn_copiar = ElementBuilder::new("button")?
        .class("btn-accion btn-copiar-id")
        .text("📋 Copiar ID")
        .build();
    {
        let _ = on_click(&btn_copiar, move |_| match copiar_al_portapapeles(&id) {
            Ok(_) => notificar(TipoAlerta::Exito, "✅ ID copiado al portapapeles"),
            Err(e) => {
                log::error!("❌ Error al copiar: {}", e);
                notificar(TipoAlerta::Error, "No se pudo copiar el ID");
            }
        });
    }

    let acciones = ElementBuilder::new("td")?
        .child(btn_estado)?
        .child(btn_copiar)?
        .build();
    fila.append_child(&acciones)?;
    cuerpo.append_child(&fila)?;
    Ok(())
}

/// Contador de stock bajo del dashboard. Comparte el umbral (<10) con el
/// inventario para que ambas pantallas reporten el mismo número.
async fn cargar_stock_bajo(sesion: &SesionContexto) {
    let productos = match sesion.api().listar_productos().await {
        Ok(p) => p,
        Err(e) => {
            log::error!("❌ Error cargando productos: {}", e);
            return;
        }
    };

    let bajos = productos.iter().filter(|p| stock_bajo(p.stock())).count();
    log::debug!("📉 Stock bajo detectado (<10): {}", bajos);

    let Some(contador) = get_element_by_id("count-stock-bajo") else {
        return;
    };
    contador.set_text_content(Some(&bajos.to_string()));

    if let Some(card) = contador.closest(".card").ok().flatten() {
        if bajos > 0 {
            let _ = card.class_list().add_1("active");
        } else {
            let _ = card.class_list().remove_1("active");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tarjeta(id: &str, tecnico: Option<&str>, estado: &str) -> Tarjeta {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "tecnicoId": tecnico,
            "estado": estado,
        }))
        .unwrap()
    }

    #[test]
    fn solo_cuenta_las_tarjetas_del_tecnico_en_sesion() {
        let todas = vec![
            tarjeta("a", Some("t-1"), "PENDIENTE"),
            tarjeta("b", Some("t-2"), "PENDIENTE"),
            tarjeta("c", None, "PENDIENTE"),
        ];
        let mias = mis_tarjetas(&todas, "t-1");
        assert_eq!(mias.len(), 1);
        assert_eq!(mias[0].id, "a");
    }

    #[test]
    fn los_contadores_agrupan_por_estado() {
        let mias = vec![
            tarjeta("a", Some("t-1"), "PENDIENTE"),
            tarjeta("b", Some("t-1"), "DIAGNOSTICO"),
            tarjeta("c", Some("t-1"), "EN_PROCESO"),
            tarjeta("d", Some("t-1"), "FINALIZADO"),
            tarjeta("e", Some("t-1"), "ENTREGADO"),
            tarjeta("f", Some("t-1"), "CANCELADO"),
        ];
        let c = contar(&mias);
        assert_eq!(
            c,
            ContadoresTecnico {
                pendientes: 2,
                proceso: 1,
                finalizadas: 2,
            }
        );
    }
}
