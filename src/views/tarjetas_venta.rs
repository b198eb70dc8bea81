// ============================================================================
// VISTA TARJETAS EN VENTA - Registros finalizados (ventas)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, on_click, on_input, ElementBuilder};
use crate::models::stats::formato_monto;
use crate::models::Finalizado;
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::fechas::formato_opcional;
use crate::views::alerts::{confirmar, notificar, TipoAlerta};
use crate::views::modals::{editar_finalizado, registro_finalizado, ModalHost};

type Datos = Rc<RefCell<Vec<Finalizado>>>;

pub fn montar(sesion: SesionContexto) {
    let Some(host) = ModalHost::nuevo() else {
        log::error!("❌ No se encontró #modal-container");
        return;
    };
    let datos: Datos = Rc::new(RefCell::new(Vec::new()));

    registro_finalizado::enlazar_boton(host.clone(), sesion.clone());

    if let Some(buscador) = get_element_by_id("search-input") {
        let datos = datos.clone();
        let host = host.clone();
        let sesion = sesion.clone();
        let _ = on_input(&buscador, move |_| {
            let termino = crate::dom::valor_campo("search-input");
            let filtradas: Vec<Finalizado> = datos
                .borrow()
                .iter()
                .filter(|f| f.coincide(&termino))
                .cloned()
                .collect();
            renderizar(&filtradas, &host, &sesion);
        });
    }

    {
        let sesion = sesion.clone();
        let datos = datos.clone();
        let host = host.clone();
        bus::suscribir(&[Coleccion::Finalizados], move |_| {
            let sesion = sesion.clone();
            let datos = datos.clone();
            let host = host.clone();
            spawn_local(async move {
                recargar(&sesion, &datos, &host).await;
            });
        });
    }

    spawn_local(async move {
        recargar(&sesion, &datos, &host).await;
    });
}

async fn recargar(sesion: &SesionContexto, datos: &Datos, host: &ModalHost) {
    match sesion.api().listar_finalizados().await {
        Ok(ventas) => {
            *datos.borrow_mut() = ventas;
            renderizar(&datos.borrow(), host, sesion);
        }
        Err(e) => {
            log::error!("❌ Error al cargar ventas: {}", e);
            if let Some(cuerpo) = get_element_by_id("table-body") {
                cuerpo.set_inner_html(&format!(
                    r#"<tr><td colspan="7" class="celda-error">Error: {}</td></tr>"#,
                    e
                ));
            }
        }
    }
}

fn renderizar(ventas: &[Finalizado], host: &ModalHost, sesion: &SesionContexto) {
    let Some(cuerpo) = get_element_by_id("table-body") else {
        return;
    };
    cuerpo.set_inner_html("");

    if ventas.is_empty() {
        cuerpo.set_inner_html(
            r#"<tr><td colspan="7" class="celda-vacia">No se encontraron tarjetas finalizadas.</td></tr>"#,
        );
        return;
    }

    for venta in ventas {
        if let Err(e) = agregar_fila(&cuerpo, venta, host, sesion) {
            log::error!("❌ Error renderizando venta: {:?}", e);
        }
    }
}

fn agregar_fila(
    cuerpo: &Element,
    venta: &Finalizado,
    host: &ModalHost,
    sesion: &SesionContexto,
) -> Result<(), JsValue> {
    // La fecha mostrada prefiere la de finalización; si no, la de entrega.
    let fecha = if venta.fecha_finalizacion.is_some() {
        formato_opcional(&venta.fecha_finalizacion)
    } else {
        formato_opcional(&venta.fecha_entrega_cliente)
    };

    let fila = ElementBuilder::new("tr")?
        .html(&format!(
            "<td>{}...</td><td>{}</td><td>{} / {}</td><td>{}</td><td>{}</td><td>{}</td>",
            venta.folio(),
            venta.nombre_cliente.as_deref().unwrap_or("N/A"),
            venta.marca.as_deref().unwrap_or("N/A"),
            venta.modelo.as_deref().unwrap_or("N/A"),
            venta.tecnico_nombre.as_deref().unwrap_or("N/A"),
            fecha,
            formato_monto(venta.costo_reparacion)
        ))
        .build();

    let clave = venta.clave().to_string();

    let btn_editar = ElementBuilder::new("button")?
        .class("btn-accion btn-editar")
        .text("✏️")
        .build();
    {
        let host = host.clone();
        let sesion = sesion.clone();
        let clave = clave.clone();
        let _ = on_click(&btn_editar, move |_| {
            editar_finalizado::abrir(host.clone(), sesion.clone(), clave.clone());
        });
    }

    let btn_eliminar = ElementBuilder::new("button")?
        .class("btn-accion btn-eliminar")
        .text("🗑️")
        .build();
    {
        let sesion = sesion.clone();
        let _ = on_click(&btn_eliminar, move |_| {
            let sesion = sesion.clone();
            let clave = clave.clone();
            spawn_local(async move {
                eliminar(&sesion, &clave).await;
            });
        });
    }

    let acciones = ElementBuilder::new("td")?
        .child(btn_editar)?
        .child(btn_eliminar)?
        .build();
    fila.append_child(&acciones)?;
    cuerpo.append_child(&fila)?;
    Ok(())
}

async fn eliminar(sesion: &SesionContexto, id: &str) {
    let detalles = match sesion.api().obtener_finalizado(id).await {
        Ok(f) => format!(
            "<p><strong>Folio:</strong> {}...</p><p><strong>Cliente:</strong> {}</p><p><strong>Costo:</strong> {}</p>",
            f.folio(),
            f.nombre_cliente.as_deref().unwrap_or("N/A"),
            formato_monto(f.costo_reparacion)
        ),
        Err(_) => "El registro podría no existir o hay un error de conexión.".to_string(),
    };

    let confirmado = confirmar(
        "Eliminar Venta",
        "¿Seguro que deseas eliminar este registro de venta?",
        &detalles,
    )
    .await;
    if !confirmado {
        return;
    }

    match sesion.api().eliminar_finalizado(id).await {
        Ok(_) => {
            notificar(TipoAlerta::Exito, "Venta eliminada");
            bus::publicar(Coleccion::Finalizados);
        }
        Err(e) => notificar(TipoAlerta::Error, &e),
    }
}
