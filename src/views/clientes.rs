// ============================================================================
// VISTA CLIENTES - Tabla de clientes del gerente
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, on_click, on_input, ElementBuilder};
use crate::models::Cliente;
use crate::state::{bus, Coleccion, SesionContexto};
use crate::views::alerts::{confirmar, notificar, TipoAlerta};
use crate::views::modals::{editar_cliente, ModalHost};

type Datos = Rc<RefCell<Vec<Cliente>>>;

pub fn montar(sesion: SesionContexto) {
    let Some(host) = ModalHost::nuevo() else {
        log::error!("❌ No se encontró #modal-container");
        return;
    };
    let datos: Datos = Rc::new(RefCell::new(Vec::new()));

    // Buscador local: filtra el vector en memoria, sin ir al servidor.
    if let Some(buscador) = get_element_by_id("search-cliente") {
        let datos = datos.clone();
        let host = host.clone();
        let sesion = sesion.clone();
        let _ = on_input(&buscador, move |_| {
            let termino = crate::dom::valor_campo("search-cliente");
            let filtrados: Vec<Cliente> = datos
                .borrow()
                .iter()
                .filter(|c| c.coincide(&termino))
                .cloned()
                .collect();
            renderizar(&filtrados, &host, &sesion);
        });
    }

    // Cualquier cambio en la colección de clientes recarga la tabla.
    {
        let sesion = sesion.clone();
        let datos = datos.clone();
        let host = host.clone();
        bus::suscribir(&[Coleccion::Clientes], move |_| {
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
    match sesion.api().listar_clientes().await {
        Ok(clientes) => {
            *datos.borrow_mut() = clientes;
            renderizar(&datos.borrow(), host, sesion);
        }
        Err(e) => {
            log::error!("❌ Error al cargar clientes: {}", e);
            if let Some(cuerpo) = get_element_by_id("table-body") {
                cuerpo.set_inner_html(&format!(
                    r#"<tr><td colspan="4" class="celda-error">{}</td></tr>"#,
                    e
                ));
            }
        }
    }
}

fn renderizar(clientes: &[Cliente], host: &ModalHost, sesion: &SesionContexto) {
    let Some(cuerpo) = get_element_by_id("table-body") else {
        return;
    };
    cuerpo.set_inner_html("");

    if clientes.is_empty() {
        cuerpo.set_inner_html(
            r#"<tr><td colspan="4" class="celda-vacia">No se encontraron clientes.</td></tr>"#,
        );
        return;
    }

    for cliente in clientes {
        if let Err(e) = agregar_fila(&cuerpo, cliente, host, sesion) {
            log::error!("❌ Error renderizando fila: {:?}", e);
        }
    }
}

fn agregar_fila(
    cuerpo: &Element,
    cliente: &Cliente,
    host: &ModalHost,
    sesion: &SesionContexto,
) -> Result<(), JsValue> {
    let total = cliente
        .total_pedidos
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());

    let fila = ElementBuilder::new("tr")?
        .html(&format!(
            "<td>{}</td><td>{}</td><td>{}</td>",
            cliente.nombre_completo(),
            cliente.numero_celular,
            total
        ))
        .build();

    let celular = cliente.numero_celular.clone();

    let btn_ver = ElementBuilder::new("button")?
        .class("btn-accion btn-ver")
        .text("Ver Pedidos")
        .build();
    {
        let celular = celular.clone();
        let _ = on_click(&btn_ver, move |_| {
            if let Some(w) = web_sys::window() {
                let _ = w
                    .location()
                    .set_href(&format!("ClientePedido.html?celular={}", celular));
            }
        });
    }

    let btn_editar = ElementBuilder::new("button")?
        .class("btn-accion btn-editar")
        .text("✏️")
        .build();
    {
        let host = host.clone();
        let sesion = sesion.clone();
        let celular = celular.clone();
        let _ = on_click(&btn_editar, move |_| {
            editar_cliente::abrir(host.clone(), sesion.clone(), celular.clone());
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
            let celular = celular.clone();
            spawn_local(async move {
                eliminar(&sesion, &celular).await;
            });
        });
    }

    let acciones = ElementBuilder::new("td")?
        .child(btn_ver)?
        .child(btn_editar)?
        .child(btn_eliminar)?
        .build();
    fila.append_child(&acciones)?;
    cuerpo.append_child(&fila)?;
    Ok(())
}

/// Confirma y elimina. Un celular inexistente termina en banner de error,
/// nunca en un throw sin manejar.
async fn eliminar(sesion: &SesionContexto, celular: &str) {
    let detalles = match sesion.api().obtener_cliente(celular).await {
        Ok(c) => format!(
            "<strong>Cliente:</strong> {}<br><strong>Teléfono:</strong> {}",
            c.nombre_completo(),
            c.numero_celular
        ),
        Err(_) => "El cliente podría no existir o hay un error de conexión.".to_string(),
    };

    let confirmado = confirmar(
        "Eliminar Cliente",
        "¿Seguro que deseas eliminar este cliente? Esta acción no se puede deshacer.",
        &detalles,
    )
    .await;
    if !confirmado {
        return;
    }

    match sesion.api().eliminar_cliente(celular).await {
        Ok(_) => {
            notificar(TipoAlerta::Exito, "Cliente eliminado correctamente.");
            bus::publicar(Coleccion::Clientes);
        }
        Err(e) => notificar(TipoAlerta::Error, &e),
    }
}
