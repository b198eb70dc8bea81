// ============================================================================
// VISTA MATERIA PRIMA - Inventario del gerente
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, on_click, on_input, ElementBuilder};
use crate::models::Producto;
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::estados::stock_bajo;
use crate::views::alerts::{confirmar, notificar, TipoAlerta};
use crate::views::modals::{editar_producto, registro_producto, ModalHost};

type Datos = Rc<RefCell<Vec<Producto>>>;

pub fn montar(sesion: SesionContexto) {
    let Some(host) = ModalHost::nuevo() else {
        log::error!("❌ No se encontró #modal-container");
        return;
    };
    let datos: Datos = Rc::new(RefCell::new(Vec::new()));

    registro_producto::enlazar_boton(host.clone(), sesion.clone());

    if let Some(buscador) = get_element_by_id("search-input") {
        let datos = datos.clone();
        let host = host.clone();
        let sesion = sesion.clone();
        let _ = on_input(&buscador, move |_| {
            let termino = crate::dom::valor_campo("search-input");
            let filtrados: Vec<Producto> = datos
                .borrow()
                .iter()
                .filter(|p| p.coincide(&termino))
                .cloned()
                .collect();
            renderizar(&filtrados, &host, &sesion);
        });
    }

    {
        let sesion = sesion.clone();
        let datos = datos.clone();
        let host = host.clone();
        bus::suscribir(&[Coleccion::Productos], move |_| {
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
    match sesion.api().listar_productos().await {
        Ok(productos) => {
            *datos.borrow_mut() = productos;
            renderizar(&datos.borrow(), host, sesion);
        }
        Err(e) => {
            log::error!("❌ Error al cargar materia prima: {}", e);
            if let Some(cuerpo) = get_element_by_id("table-body") {
                cuerpo.set_inner_html(&format!(
                    r#"<tr><td colspan="5" class="celda-error">Error al cargar: {}</td></tr>"#,
                    e
                ));
            }
        }
    }
}

fn renderizar(productos: &[Producto], host: &ModalHost, sesion: &SesionContexto) {
    let Some(cuerpo) = get_element_by_id("table-body") else {
        return;
    };
    cuerpo.set_inner_html("");

    if productos.is_empty() {
        cuerpo.set_inner_html(r#"<tr><td colspan="5">No se encontró materia prima.</td></tr>"#);
        return;
    }

    for producto in productos {
        if let Err(e) = agregar_fila(&cuerpo, producto, host, sesion) {
            log::error!("❌ Error renderizando fila: {:?}", e);
        }
    }
}

fn agregar_fila(
    cuerpo: &Element,
    producto: &Producto,
    host: &ModalHost,
    sesion: &SesionContexto,
) -> Result<(), JsValue> {
    let stock = producto.stock();
    let bajo = stock_bajo(stock);

    let mut fila = ElementBuilder::new("tr")?;
    if bajo {
        fila = fila.class("stock-bajo-row");
    }
    let fila = fila
        .html(&format!(
            "<td>{}</td><td>{}</td><td>{} {}</td><td>{}</td>",
            producto.nombre_producto,
            producto.categoria,
            stock,
            if bajo { "⚠️" } else { "" },
            producto.unidad
        ))
        .build();

    let btn_editar = ElementBuilder::new("button")?
        .class("btn-accion btn-editar")
        .text("Editar")
        .build();
    {
        let host = host.clone();
        let sesion = sesion.clone();
        let id = producto.id.clone();
        let _ = on_click(&btn_editar, move |_| {
            editar_producto::abrir(host.clone(), sesion.clone(), id.clone());
        });
    }

    let btn_eliminar = ElementBuilder::new("button")?
        .class("btn-accion btn-eliminar")
        .text("Eliminar")
        .build();
    {
        let sesion = sesion.clone();
        let id = producto.id.clone();
        let _ = on_click(&btn_eliminar, move |_| {
            let sesion = sesion.clone();
            let id = id.clone();
            spawn_local(async move {
                eliminar(&sesion, &id).await;
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
    let detalles = match sesion.api().obtener_producto(id).await {
        Ok(p) => format!(
            "<strong>Producto:</strong> {}<br><strong>Stock:</strong> {} {}",
            p.nombre_producto,
            p.stock(),
            p.unidad
        ),
        Err(_) => "El producto podría no existir o hay un error de conexión.".to_string(),
    };

    let confirmado = confirmar(
        "Eliminar Producto",
        "¿Estás seguro de que deseas eliminar este ítem del inventario? Esta acción no se puede deshacer.",
        &detalles,
    )
    .await;
    if !confirmado {
        return;
    }

    match sesion.api().eliminar_producto(id).await {
        Ok(_) => {
            notificar(TipoAlerta::Exito, "Producto eliminado correctamente.");
            bus::publicar(Coleccion::Productos);
        }
        Err(e) => notificar(TipoAlerta::Error, &e),
    }
}
