// ============================================================================
// EDITAR FINALIZADO - Modal de edición de una venta
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::dom::{on_submit, set_valor_campo, valor_campo};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::views::alerts::{notificar, TipoAlerta};
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
    let venta = sesion.api().obtener_finalizado(id).await?;

    host.cargar_fragmento("assets/modals-actions/EditarFinalizado.html")
        .await?;

    set_valor_campo("edit-finalizado-id", venta.clave());
    set_valor_campo(
        "edit-finalizado-cliente",
        venta.nombre_cliente.as_deref().unwrap_or(""),
    );
    set_valor_campo(
        "edit-finalizado-equipo",
        &format!(
            "{} - {}",
            venta.marca.as_deref().unwrap_or("N/A"),
            venta.modelo.as_deref().unwrap_or("N/A")
        ),
    );
    set_valor_campo(
        "edit-finalizado-problema",
        venta
            .problema_cambiado
            .as_deref()
            .or(venta.problema_reportado.as_deref())
            .or(venta.diagnostico_tecnico.as_deref())
            .unwrap_or(""),
    );
    set_valor_campo(
        "edit-finalizado-costo",
        &venta
            .costo_reparacion
            .map(|c| c.to_string())
            .unwrap_or_default(),
    );
    // El input date solo acepta YYYY-MM-DD; se recorta la parte de hora.
    if let Some(fecha) = venta.fecha_entrega.as_deref() {
        if fecha.len() >= 10 {
            set_valor_campo("edit-finalizado-fecha", &fecha[..10]);
        }
    }

    host.mostrar();
    host.enlazar_cierre();
    enlazar_submit(host, sesion);
    Ok(())
}

fn enlazar_submit(host: &ModalHost, sesion: &SesionContexto) {
    let Some(form) = host.query("#form-editar-finalizado") else {
        return;
    };
    let host = host.clone();
    let sesion = sesion.clone();
    let _ = on_submit(&form, move |_| {
        let id = valor_campo("edit-finalizado-id");
        let payload = payloads::finalizado_editado(
            &valor_campo("edit-finalizado-problema"),
            &valor_campo("edit-finalizado-fecha"),
            &valor_campo("edit-finalizado-costo"),
        );

        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            host.enviando();
            let boton = host.query("#form-editar-finalizado button[type=submit]");
            if let Some(b) = &boton {
                set_boton_cargando(b, true);
            }

            match sesion.api().actualizar_finalizado(&id, &payload).await {
                Ok(_) => {
                    notificar(TipoAlerta::Exito, "Venta actualizada");
                    host.cerrar();
                    bus::publicar(Coleccion::Finalizados);
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
