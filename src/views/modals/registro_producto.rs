// ============================================================================
// REGISTRO DE PRODUCTO - Modal de alta de materia prima
// ============================================================================

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use crate::dom::{get_element_by_id, on_click, on_input, on_submit, set_valor_campo, valor_campo};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::fechas::hoy_iso;
use crate::utils::validacion::nombre_producto_valido;
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::{payloads, set_boton_cargando, ModalHost};

pub fn enlazar_boton(host: ModalHost, sesion: SesionContexto) {
    let Some(boton) = get_element_by_id("btn-abrir-modal-producto") else {
        return;
    };
    let _ = on_click(&boton, move |_| {
        if !host.adquirir() {
            return;
        }
        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            if let Err(e) = abrir(&host, &sesion).await {
                host.abortar(&e);
            }
        });
    });
}

async fn abrir(host: &ModalHost, sesion: &SesionContexto) -> Result<(), String> {
    host.cargar_fragmento("assets/modals/RegistroProducto.html")
        .await?;
    set_valor_campo("producto-fecha", &hoy_iso());
    host.mostrar();
    host.enlazar_cierre();
    enlazar_validador_nombre("producto-nombre");
    enlazar_submit(host, sesion);
    Ok(())
}

/// Marca el input como inválido mientras el nombre no junte 3 letras; el
/// navegador bloquea el submit con su propio mensaje.
pub fn enlazar_validador_nombre(input_id: &str) {
    let Some(input) = get_element_by_id(input_id) else {
        return;
    };
    let id = input_id.to_string();
    let _ = on_input(&input, move |_| {
        let Some(el) = get_element_by_id(&id) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            let valor = input.value();
            if !valor.is_empty() && !nombre_producto_valido(&valor) {
                input.set_custom_validity("El nombre debe contener al menos 3 letras");
            } else {
                input.set_custom_validity("");
            }
        }
    });
}

fn enlazar_submit(host: &ModalHost, sesion: &SesionContexto) {
    let Some(form) = host.query("#form-registro-producto") else {
        return;
    };
    let host = host.clone();
    let sesion = sesion.clone();
    let _ = on_submit(&form, move |_| {
        let nombre = valor_campo("producto-nombre");
        if !nombre_producto_valido(&nombre) {
            notificar(
                TipoAlerta::Advertencia,
                "El nombre del producto debe contener al menos 3 letras",
            );
            return;
        }

        let payload = payloads::producto_nuevo(
            &nombre,
            &valor_campo("producto-categoria"),
            &valor_campo("producto-cantidad"),
            &valor_campo("producto-unidad"),
            &valor_campo("producto-fecha"),
        );

        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            host.enviando();
            let boton = host.query("#form-registro-producto button[type=submit]");
            if let Some(b) = &boton {
                set_boton_cargando(b, true);
            }

            match sesion.api().crear_producto(&payload).await {
                Ok(_) => {
                    notificar(TipoAlerta::Exito, "Producto creado");
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
