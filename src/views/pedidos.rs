// ============================================================================
// VISTA PEDIDOS - Órdenes activas + ventas, fusionadas en una sola tabla
// ============================================================================
// Las tarjetas FINALIZADO/ENTREGADO se excluyen de la lista de tarjetas
// porque ya aparecen como registro de venta; fusionarlas duplicaría filas.
// Los materiales usados de cada pedido se cargan de forma perezosa.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, on_change, on_click, ElementBuilder};
use crate::models::tarjeta::folio_corto;
use crate::models::{Finalizado, Tarjeta};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::clipboard::copiar_al_portapapeles;
use crate::utils::estados::{badge_estado, stock_bajo};
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::{registro_tarjeta, ModalHost};

/// Fila unificada de la tabla de pedidos.
#[derive(Debug, Clone, PartialEq)]
pub struct Pedido {
    pub id: String,
    pub nombre_cliente: String,
    pub tecnico_nombre: Option<String>,
    pub estado: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Contadores {
    pub activos: u32,
    pub proceso: u32,
    pub finalizados: u32,
}

/// Fusión de tarjetas en curso con registros de venta. Una tarjeta que ya
/// está FINALIZADO o ENTREGADO se omite: su venta la representa.
pub fn fusionar_pedidos(tarjetas: &[Tarjeta], finalizados: &[Finalizado]) -> Vec<Pedido> {
    let mut pedidos: Vec<Pedido> = tarjetas
        .iter()
        .filter(|t| {
            let estado = t.estado_normalizado();
            estado != "FINALIZADO" && estado != "ENTREGADO"
        })
        .map(|t| Pedido {
            id: t.id.clone(),
            nombre_cliente: t.nombre_cliente.clone().unwrap_or_default(),
            tecnico_nombre: t.tecnico_nombre.clone(),
            estado: t.estado.clone().unwrap_or_default(),
        })
        .collect();

    pedidos.extend(finalizados.iter().map(|f| Pedido {
        id: f.clave().to_string(),
        nombre_cliente: f.nombre_cliente.clone().unwrap_or_default(),
        tecnico_nombre: f.tecnico_nombre.clone(),
        estado: f.estado.clone().unwrap_or_else(|| "ENTREGADO".to_string()),
    }));

    pedidos
}

/// Las dos colecciones se piden por separado; si cualquiera falla, la vista
/// reporta el error en lugar de fingir una tabla vacía con contadores en cero.
pub fn combinar_cargas(
    tarjetas: Result<Vec<Tarjeta>, String>,
    finalizados: Result<Vec<Finalizado>, String>,
) -> Result<Vec<Pedido>, String> {
    Ok(fusionar_pedidos(&tarjetas?, &finalizados?))
}

pub fn contar(pedidos: &[Pedido]) -> Contadores {
    let mut c = Contadores::default();
    for pedido in pedidos {
        match pedido.estado.as_str() {
            "PENDIENTE" | "PENDIENTE_ENTREGA" => c.activos += 1,
            "EN_PROCESO" => {
                c.activos += 1;
                c.proceso += 1;
            }
            "FINALIZADO" | "ENTREGADO" => c.finalizados += 1,
            _ => {}
        }
    }
    c
}

type Datos = Rc<RefCell<Vec<Pedido>>>;

pub fn montar(sesion: SesionContexto) {
    let Some(host) = ModalHost::nuevo() else {
        log::error!("❌ No se encontró #modal-container");
        return;
    };
    let datos: Datos = Rc::new(RefCell::new(Vec::new()));

    registro_tarjeta::enlazar_boton(host, sesion.clone());

    // Filtro por estado (select), sobre el vector en memoria.
    if let Some(filtro) = get_element_by_id("status-filter") {
        let datos = datos.clone();
        let sesion = sesion.clone();
        let _ = on_change(&filtro, move |_| {
            let seleccionado = crate::dom::valor_campo("status-filter");
            let pedidos = datos.borrow();
            if seleccionado == "todos" {
                renderizar(&pedidos, &sesion);
            } else {
                let filtrados: Vec<Pedido> = pedidos
                    .iter()
                    .filter(|p| p.estado == seleccionado)
                    .cloned()
                    .collect();
                renderizar(&filtrados, &sesion);
            }
        });
    }

    {
        let sesion = sesion.clone();
        let datos = datos.clone();
        bus::suscribir(
            &[
                Coleccion::Tarjetas,
                Coleccion::Servicios,
                Coleccion::Finalizados,
                Coleccion::Productos,
            ],
            move |_| {
                let sesion = sesion.clone();
                let datos = datos.clone();
                spawn_local(async move {
                    recargar(&sesion, &datos).await;
                });
            },
        );
    }

    spawn_local(async move {
        recargar(&sesion, &datos).await;
    });
}

async fn recargar(sesion: &SesionContexto, datos: &Datos) {
    let api = sesion.api();

    let tarjetas = api.listar_tarjetas().await;
    let finalizados = api.listar_finalizados().await;
    let pedidos = match combinar_cargas(tarjetas, finalizados) {
        Ok(pedidos) => pedidos,
        Err(e) => {
            log::error!("❌ Error al cargar pedidos: {}", e);
            if let Some(cuerpo) = get_element_by_id("table-body") {
                cuerpo.set_inner_html(&format!(
                    r#"<tr><td colspan="6" class="celda-error">Error: {}</td></tr>"#,
                    e
                ));
            }
            return;
        }
    };

    let contadores = contar(&pedidos);
    poner_contador("count-activos", contadores.activos);
    poner_contador("count-proceso", contadores.proceso);
    poner_contador("count-finalizados", contadores.finalizados);

    *datos.borrow_mut() = pedidos;
    renderizar(&datos.borrow(), sesion);

    cargar_stock_bajo(sesion).await;
}

fn poner_contador(id: &str, valor: u32) {
    if let Some(el) = get_element_by_id(id) {
        el.set_text_content(Some(&valor.to_string()));
    }
}

fn renderizar(pedidos: &[Pedido], sesion: &SesionContexto) {
    let Some(cuerpo) = get_element_by_id("table-body") else {
        return;
    };
    cuerpo.set_inner_html("");

    if pedidos.is_empty() {
        cuerpo.set_inner_html(
            r#"<tr><td colspan="6" class="celda-vacia">No se encontraron pedidos.</td></tr>"#,
        );
        return;
    }

    for pedido in pedidos {
        if let Err(e) = agregar_fila(&cuerpo, pedido) {
            log::error!("❌ Error renderizando pedido: {:?}", e);
        }
        // Materiales usados, sin bloquear el render de la tabla.
        let sesion = sesion.clone();
        let servicio_id = pedido.id.clone();
        spawn_local(async move {
            cargar_materiales(&sesion, &servicio_id).await;
        });
    }
}

fn agregar_fila(cuerpo: &Element, pedido: &Pedido) -> Result<(), JsValue> {
    let fila = ElementBuilder::new("tr")?
        .html(&format!(
            r#"<td>{}...</td><td>{}</td><td><div class="status-container">{}</div></td><td>{}</td><td id="materiales-{}"><small>Cargando...</small></td>"#,
            folio_corto(&pedido.id),
            pedido.nombre_cliente,
            badge_estado(&pedido.estado),
            pedido.tecnico_nombre.as_deref().unwrap_or("Sin Asignar"),
            pedido.id
        ))
        .build();

    let btn_copiar = ElementBuilder::new("button")?
        .class("btn-accion btn-copiar")
        .text("Copiar ID")
        .build();
    {
        let id = pedido.id.clone();
        let boton = btn_copiar.clone();
        let _ = on_click(&btn_copiar, move |_| {
            match copiar_al_portapapeles(&id) {
                Ok(()) => {
                    boton.set_text_content(Some("¡Copiado!"));
                    let boton = boton.clone();
                    Timeout::new(2_000, move || {
                        boton.set_text_content(Some("Copiar ID"));
                    })
                    .forget();
                }
                Err(e) => {
                    log::error!("❌ Error copiado: {}", e);
                    notificar(TipoAlerta::Error, "Error al copiar");
                }
            }
        });
    }

    let acciones = ElementBuilder::new("td")?.child(btn_copiar)?.build();
    fila.append_child(&acciones)?;
    cuerpo.append_child(&fila)?;
    Ok(())
}

/// Si la celda ya no existe (la tabla se re-renderizó), no se hace nada.
async fn cargar_materiales(sesion: &SesionContexto, servicio_id: &str) {
    let resultado = sesion.api().materiales_de_servicio(servicio_id).await;
    let Some(celda) = get_element_by_id(&format!("materiales-{}", servicio_id)) else {
        return;
    };
    match resultado {
        Ok(materiales) if !materiales.is_empty() => {
            let etiquetas: Vec<String> = materiales
                .iter()
                .map(|m| {
                    format!(
                        r#"<span class="material-chip">{} x{}</span>"#,
                        m.nombre_pieza, m.cantidad_usada
                    )
                })
                .collect();
            celda.set_inner_html(&format!("<small>{}</small>", etiquetas.join(" ")));
        }
        Ok(_) => celda.set_inner_html("<small>Sin materiales</small>"),
        Err(_) => celda.set_inner_html("<small>-</small>"),
    }
}

/// Tarjeta de stock bajo + tabla de productos con poco inventario.
async fn cargar_stock_bajo(sesion: &SesionContexto) {
    let Ok(productos) = sesion.api().listar_productos().await else {
        return;
    };
    let bajos: Vec<_> = productos.iter().filter(|p| stock_bajo(p.stock())).collect();

    if let Some(contador) = get_element_by_id("count-stock-bajo") {
        contador.set_text_content(Some(&bajos.len().to_string()));
        if let Some(tarjeta) = contador.closest(".card-stock-bajo").ok().flatten() {
            if bajos.is_empty() {
                let _ = tarjeta.class_list().remove_1("active");
            } else {
                let _ = tarjeta.class_list().add_1("active");
            }
        }
    }

    let Some(cuerpo) = get_element_by_id("productos-table-body") else {
        return;
    };
    if bajos.is_empty() {
        cuerpo.set_inner_html(
            r#"<tr><td colspan="5" class="celda-vacia">No hay productos con stock bajo.</td></tr>"#,
        );
        return;
    }

    cuerpo.set_inner_html("");
    for producto in bajos {
        let Ok(fila) = ElementBuilder::new("tr") else {
            continue;
        };
        let fila = fila
            .html(&format!(
                r#"<td>{}</td><td>{}</td><td>{}</td><td class="stock-critico">{} ⚠️</td>"#,
                producto.nombre_producto,
                producto.categoria,
                producto.unidad,
                producto.stock()
            ))
            .build();
        if let Ok(btn) = ElementBuilder::new("button") {
            let btn = btn.class("btn-accion").text("Gestionar").build();
            let _ = on_click(&btn, move |_| {
                if let Some(w) = web_sys::window() {
                    let _ = w.location().set_href("MateriaPrima.html");
                }
            });
            if let Ok(celda) = ElementBuilder::new("td") {
                if let Ok(celda) = celda.child(btn) {
                    let _ = fila.append_child(&celda.build());
                }
            }
        }
        let _ = cuerpo.append_child(&fila);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tarjeta(id: &str, estado: &str) -> Tarjeta {
        serde_json::from_str(&format!(
            r#"{{"id":"{}","estado":"{}","nombreCliente":"Ana"}}"#,
            id, estado
        ))
        .unwrap()
    }

    fn venta(id: &str) -> Finalizado {
        serde_json::from_str(&format!(r#"{{"id":"{}","nombreCliente":"Luis"}}"#, id)).unwrap()
    }

    #[test]
    fn las_tarjetas_finalizadas_no_se_duplican_con_las_ventas() {
        let tarjetas = vec![
            tarjeta("t1", "EN_PROCESO"),
            tarjeta("t2", "FINALIZADO"),
            tarjeta("t3", "ENTREGADO"),
        ];
        let finalizados = vec![venta("t2")];

        let pedidos = fusionar_pedidos(&tarjetas, &finalizados);
        assert_eq!(pedidos.len(), 2);
        assert_eq!(pedidos[0].id, "t1");
        // La venta sin estado explícito se reporta como ENTREGADO.
        assert_eq!(pedidos[1].estado, "ENTREGADO");
    }

    #[test]
    fn los_contadores_agrupan_como_el_dashboard() {
        let pedidos = vec![
            Pedido {
                id: "a".into(),
                nombre_cliente: String::new(),
                tecnico_nombre: None,
                estado: "PENDIENTE".into(),
            },
            Pedido {
                id: "b".into(),
                nombre_cliente: String::new(),
                tecnico_nombre: None,
                estado: "EN_PROCESO".into(),
            },
            Pedido {
                id: "c".into(),
                nombre_cliente: String::new(),
                tecnico_nombre: None,
                estado: "ENTREGADO".into(),
            },
        ];
        let c = contar(&pedidos);
        assert_eq!(c.activos, 2);
        assert_eq!(c.proceso, 1);
        assert_eq!(c.finalizados, 1);
    }

    #[test]
    fn un_fallo_en_cualquiera_de_las_dos_cargas_propaga_el_error() {
        let error = combinar_cargas(Err("Error del servidor: 500".into()), Ok(vec![venta("v1")]));
        assert_eq!(error, Err("Error del servidor: 500".to_string()));

        let error = combinar_cargas(Ok(vec![tarjeta("t1", "PENDIENTE")]), Err("sin red".into()));
        assert_eq!(error, Err("sin red".to_string()));
    }

    #[test]
    fn dos_cargas_exitosas_se_fusionan() {
        let pedidos = combinar_cargas(
            Ok(vec![tarjeta("t1", "EN_PROCESO")]),
            Ok(vec![venta("v1")]),
        );
        assert_eq!(pedidos.map(|p| p.len()), Ok(2));
    }
}
