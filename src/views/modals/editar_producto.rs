// ============================================================================
// EDITAR PRODUCTO - Modal de edición de materia prima
// ============================================================================
// El técnico ve el formulario completo pero solo puede tocar la cantidad;
// el resto queda en solo-lectura (readonly, no disabled) para que los
// valores bloqueados sí viajen en el guardado.
// ============================================================================

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::dom::{bloquear_campo, get_element_by_id, on_submit, set_valor_campo, valor_campo};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::validacion::nombre_producto_valido;
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::registro_producto::enlazar_validador_nombre;
use crate::views::modals::{payloads, set_boton_cargando, ModalHost};

pub fn abrir(host: ModalHost, sesion: SesionContexto, id: String) {
    if !host.adquirir() {
        return;
    }
    spawn_local(async move {
        if let Err(e) = poblar(&host, &sesion, &id).await {
            host.abortar(&e);
        }
    });
}

async fn poblar(host: &ModalHost, sesion: &SesionContexto, id: &str) -> Result<(), String> {
    let producto = sesion.api().obtener_producto(id).await?;

    host.cargar_fragmento("assets/modals-actions/EditarProducto.html")
        .await?;

    set_valor_campo("edit-producto-id", &producto.id);
    set_valor_campo("edit-producto-nombre", &producto.nombre_producto);
    set_valor_campo("edit-producto-unidad", &producto.unidad);
    set_valor_campo("edit-producto-categoria", &producto.categoria);
    set_valor_campo("edit-producto-cantidad", &producto.stock().to_string());
    set_valor_campo(
        "edit-producto-ohms",
        &producto
            .cantidad_ohms
            .map(|v| v.to_string())
            .unwrap_or_default(),
    );
    set_valor_campo(
        "edit-producto-precio",
        &producto
            .precio_unitario
            .map(|v| v.to_string())
            .unwrap_or_default(),
    );

    if sesion.es_tecnico() {
        bloquear_para_tecnico();
    }

    host.mostrar();
    host.enlazar_cierre();
    enlazar_validador_nombre("edit-producto-nombre");
    enlazar_submit(host, sesion);
    Ok(())
}

/// Todo bloqueado menos la cantidad. Los selects no aceptan readonly, así
/// que se congelan con pointer-events y se sacan del tabulado.
fn bloquear_para_tecnico() {
    for id in ["edit-producto-nombre", "edit-producto-ohms", "edit-producto-precio"] {
        bloquear_campo(id);
    }
    for id in ["edit-producto-categoria", "edit-producto-unidad"] {
        if let Some(el) = get_element_by_id(id) {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                let _ = html.style().set_property("pointer-events", "none");
                let _ = html.style().set_property("background-color", "#e9ecef");
                html.set_tab_index(-1);
            }
        }
    }
}

fn enlazar_submit(host: &ModalHost, sesion: &SesionContexto) {
    let Some(form) = host.query("#form-editar-producto") else {
        return;
    };
    let host = host.clone();
    let sesion = sesion.clone();
    let _ = on_submit(&form, move |_| {
        let nombre = valor_campo("edit-producto-nombre");
        if !nombre_producto_valido(&nombre) {
            notificar(
                TipoAlerta::Advertencia,
                "El nombre del producto debe contener al menos 3 letras",
            );
            return;
        }

        let producto_id = valor_campo("edit-producto-id");
        let payload = payloads::producto_editado(
            &nombre,
            &valor_campo("edit-producto-categoria"),
            &valor_campo("edit-producto-unidad"),
            &valor_campo("edit-producto-cantidad"),
            &valor_campo("edit-producto-ohms"),
            &valor_campo("edit-producto-precio"),
        );

        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            host.enviando();
            let boton = host.query("#form-editar-producto button[type=submit]");
            if let Some(b) = &boton {
                set_boton_cargando(b, true);
            }

            match sesion.api().actualizar_producto(&producto_id, &payload).await {
                Ok(_) => {
                    notificar(TipoAlerta::Exito, "Producto actualizado correctamente");
                    host.cerrar();
                    bus::publicar(Coleccion::Productos);
                }
                Err(e) => {
                    notificar(TipoAlerta::Error, &e);
                    if let Some(b) = &boton {
                        set_boton_cargando(b, false);
                    }
                    host.fallo_envio();
                }
            }
        });
    });
}
