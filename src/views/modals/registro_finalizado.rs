// ============================================================================
// REGISTRO FINALIZADO - Modal para cerrar una reparación y venderla
// ============================================================================
// Al teclear el ID de la tarjeta se autocompletan los datos del cliente y
// del equipo, y esos campos quedan en solo-lectura para que el registro de
// venta no contradiga a la tarjeta.
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::dom::{
    bloquear_campo, desbloquear_campo, get_element_by_id, on_change, on_click, on_submit,
    set_valor_campo, valor_campo,
};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::{payloads, poblar_tecnicos, set_boton_cargando, ModalHost};

const CAMPOS_AUTOCOMPLETADOS: [&str; 6] = [
    "finalizado-cliente-nombre",
    "finalizado-cliente-celular",
    "finalizado-equipo-marca",
    "finalizado-equipo-modelo",
    "finalizado-equipo-problema",
    "finalizado-asignar-tecnico",
];

pub fn enlazar_boton(host: ModalHost, sesion: SesionContexto) {
    let Some(boton) = get_element_by_id("btn-abrir-modal-finalizado") else {
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
    host.cargar_fragmento("assets/modals/RegistroFinalizado.html")
        .await?;
    poblar_tecnicos(host, "#finalizado-asignar-tecnico", &sesion.api()).await;
    host.mostrar();
    host.enlazar_cierre();
    enlazar_autocompletado(sesion);
    enlazar_submit(host, sesion);
    Ok(())
}

/// El cambio del campo de ID dispara la búsqueda de la tarjeta.
fn enlazar_autocompletado(sesion: &SesionContexto) {
    let Some(input) = get_element_by_id("finalizado-tarjeta-id") else {
        return;
    };
    let sesion = sesion.clone();
    let _ = on_change(&input, move |_| {
        let sesion = sesion.clone();
        spawn_local(async move {
            autocompletar(&sesion).await;
        });
    });
}

async fn autocompletar(sesion: &SesionContexto) {
    let tarjeta_id = valor_campo("finalizado-tarjeta-id").trim().to_string();
    if tarjeta_id.is_empty() {
        limpiar_campos();
        return;
    }

    match sesion.api().obtener_tarjeta_cruda(&tarjeta_id).await {
        Ok(tarjeta) => {
            let campo = |clave: &str| {
                tarjeta
                    .get(clave)
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string()
            };
            set_valor_campo("finalizado-cliente-nombre", &campo("nombreCliente"));
            set_valor_campo("finalizado-cliente-celular", &campo("numeroCelular"));
            set_valor_campo("finalizado-equipo-marca", &campo("marca"));
            set_valor_campo("finalizado-equipo-modelo", &campo("modelo"));
            let problema = tarjeta
                .get("problemaDescrito")
                .or_else(|| tarjeta.get("problema"))
                .and_then(|v| v.as_str())
                .unwrap_or("");
            set_valor_campo("finalizado-equipo-problema", problema);
            let tecnico = campo("tecnicoId");
            if !tecnico.is_empty() {
                set_valor_campo("finalizado-asignar-tecnico", &tecnico);
            }
            // Solo-lectura, no disabled: los valores deben viajar al guardar.
            for id in CAMPOS_AUTOCOMPLETADOS {
                bloquear_campo(id);
            }
            log::info!("✅ Tarjeta {} autocompletada", tarjeta_id);
        }
        Err(e) => {
            limpiar_campos();
            notificar(
                TipoAlerta::Error,
                &format!("No se encontró tarjeta con ID: {} ({})", tarjeta_id, e),
            );
        }
    }
}

fn limpiar_campos() {
    for id in CAMPOS_AUTOCOMPLETADOS {
        set_valor_campo(id, "");
        desbloquear_campo(id);
    }
}

fn enlazar_submit(host: &ModalHost, sesion: &SesionContexto) {
    let Some(form) = host.query("#form-registro-finalizado") else {
        return;
    };
    let host = host.clone();
    let sesion = sesion.clone();
    let _ = on_submit(&form, move |_| {
        let tecnico_id = valor_campo("finalizado-asignar-tecnico");
        let tecnico_nombre = host
            .query("#finalizado-asignar-tecnico option:checked")
            .and_then(|o| o.text_content())
            .unwrap_or_default();

        let payload = payloads::finalizado_nuevo(
            &valor_campo("finalizado-tarjeta-id"),
            &valor_campo("finalizado-cliente-nombre"),
            &valor_campo("finalizado-cliente-celular"),
            &valor_campo("finalizado-equipo-marca"),
            &valor_campo("finalizado-equipo-modelo"),
            &valor_campo("finalizado-equipo-problema"),
            &tecnico_id,
            &tecnico_nombre,
            &valor_campo("finalizado-fecha-entrega"),
            &valor_campo("finalizado-costo"),
        );

        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            host.enviando();
            let boton = host.query("#form-registro-finalizado button[type=submit]");
            if let Some(b) = &boton {
                set_boton_cargando(b, true);
            }

            match sesion.api().crear_finalizado(&payload).await {
                Ok(_) => {
                    notificar(TipoAlerta::Exito, "Pedido finalizado exitosamente");
                    host.cerrar();
                    bus::publicar(Coleccion::Finalizados);
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
