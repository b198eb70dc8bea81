// ============================================================================
// EDITAR ESTADO - Modal de cambio de estado de una tarjeta
// ============================================================================
// Al abrir se guarda la tarjeta completa tal como la mandó el backend; el
// guardado superpone únicamente el estado (y la fecha de finalización si
// aplica) sobre esa copia, para que el PUT no borre ningún campo.
// ============================================================================

use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{on_submit, set_valor_campo, valor_campo};
use crate::models::tarjeta::folio_corto;
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::fechas::hoy_iso;
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::{payloads, set_boton_cargando, ModalHost};

pub fn abrir(host: ModalHost, sesion: SesionContexto, tarjeta_id: String) {
    if !host.adquirir() {
        return;
    }
    spawn_local(async move {
        if let Err(e) = poblar(&host, &sesion, &tarjeta_id).await {
            host.abortar(&e);
        }
    });
}

async fn poblar(host: &ModalHost, sesion: &SesionContexto, tarjeta_id: &str) -> Result<(), String> {
    let tarjeta = sesion.api().obtener_tarjeta_cruda(tarjeta_id).await?;

    host.cargar_fragmento("assets/modals-actions/EditarEstado.html")
        .await?;

    let texto = |clave: &str| {
        tarjeta
            .get(clave)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    };
    let id = texto("id");
    set_valor_campo("edit-estado-id", &id);
    set_valor_campo("edit-estado-folio", &folio_corto(&id));
    set_valor_campo(
        "edit-estado-info",
        &format!(
            "{} - {} ({})",
            texto("marca"),
            texto("modelo"),
            texto("nombreCliente")
        ),
    );
    set_valor_campo("edit-estado-select", &texto("estado"));

    host.mostrar();
    host.enlazar_cierre();
    enlazar_submit(host, sesion, Rc::new(tarjeta));
    Ok(())
}

fn enlazar_submit(host: &ModalHost, sesion: &SesionContexto, tarjeta_completa: Rc<Value>) {
    let Some(form) = host.query("#form-editar-estado") else {
        return;
    };
    let host = host.clone();
    let sesion = sesion.clone();
    let _ = on_submit(&form, move |_| {
        let nuevo_estado = valor_campo("edit-estado-select");
        if nuevo_estado.is_empty() {
            notificar(TipoAlerta::Error, "Por favor selecciona un estado");
            return;
        }
        let tarjeta_id = valor_campo("edit-estado-id");
        let payload = payloads::estado_editado(&tarjeta_completa, &nuevo_estado, &hoy_iso());

        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            host.enviando();
            let boton = host.query("#form-editar-estado button[type=submit]");
            if let Some(b) = &boton {
                set_boton_cargando(b, true);
            }

            match sesion.api().actualizar_tarjeta(&tarjeta_id, &payload).await {
                Ok(_) => {
                    notificar(TipoAlerta::Exito, "Estado actualizado correctamente");
                    host.cerrar();
                    bus::publicar(Coleccion::Tarjetas);
                    bus::publicar(Coleccion::Servicios);
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
