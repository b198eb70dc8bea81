// ============================================================================
// USAR MATERIAL - Modal del técnico para descontar stock contra un servicio
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::dom::{on_submit, set_valor_campo, valor_campo};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::{payloads, set_boton_cargando, ModalHost};

pub fn abrir(host: ModalHost, sesion: SesionContexto, producto_id: String, nombre: String, stock: i64) {
    if !host.adquirir() {
        return;
    }
    spawn_local(async move {
        if let Err(e) = poblar(&host, &sesion, &producto_id, &nombre, stock).await {
            host.abortar(&e);
        }
    });
}

async fn poblar(
    host: &ModalHost,
    sesion: &SesionContexto,
    producto_id: &str,
    nombre: &str,
    stock: i64,
) -> Result<(), String> {
    host.cargar_fragmento("assets/modals/UsarMaterial.html")
        .await?;

    set_valor_campo("material-producto-id", producto_id);
    set_valor_campo("material-producto-nombre", nombre);
    if let Some(etiqueta) = host.query("#material-stock-disponible") {
        etiqueta.set_text_content(Some(&stock.to_string()));
    }

    host.mostrar();
    host.enlazar_cierre();
    enlazar_submit(host, sesion);
    Ok(())
}

fn enlazar_submit(host: &ModalHost, sesion: &SesionContexto) {
    let Some(form) = host.query("#form-usar-material") else {
        return;
    };
    let host = host.clone();
    let sesion = sesion.clone();
    let _ = on_submit(&form, move |_| {
        let payload = payloads::uso_material(
            &valor_campo("material-producto-id"),
            &valor_campo("material-servicio-id"),
            &valor_campo("material-cantidad"),
        );

        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            host.enviando();
            let boton = host.query("#form-usar-material button[type=submit]");
            if let Some(b) = &boton {
                set_boton_cargando(b, true);
            }

            match sesion.api().usar_material(&payload).await {
                Ok(_) => {
                    notificar(TipoAlerta::Exito, "Material registrado correctamente");
                    host.cerrar();
                    bus::publicar(Coleccion::Productos);
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
