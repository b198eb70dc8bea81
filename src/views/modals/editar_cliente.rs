// ============================================================================
// EDITAR CLIENTE - Modal de edición de datos del cliente
// ============================================================================
// El celular es la llave del recurso: se conserva el número original en un
// campo oculto para dirigir el PUT aunque el usuario cambie el celular.
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::dom::{on_submit, set_valor_campo, valor_campo};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::{payloads, set_boton_cargando, ModalHost};

pub fn abrir(host: ModalHost, sesion: SesionContexto, celular: String) {
    if !host.adquirir() {
        return;
    }
    spawn_local(async move {
        if let Err(e) = poblar(&host, &sesion, &celular).await {
            host.abortar(&e);
        }
    });
}

async fn poblar(host: &ModalHost, sesion: &SesionContexto, celular: &str) -> Result<(), String> {
    let cliente = sesion.api().obtener_cliente(celular).await?;

    host.cargar_fragmento("assets/modals-actions/EditarCliente.html")
        .await?;

    set_valor_campo("edit-cliente-numero-original", &cliente.numero_celular);
    set_valor_campo("edit-cliente-nombre", &cliente.nombre);
    set_valor_campo("edit-cliente-apellidos", &cliente.apellidos);
    set_valor_campo("edit-cliente-celular", &cliente.numero_celular);

    host.mostrar();
    host.enlazar_cierre();
    enlazar_submit(host, sesion);
    Ok(())
}

fn enlazar_submit(host: &ModalHost, sesion: &SesionContexto) {
    let Some(form) = host.query("#form-editar-cliente") else {
        return;
    };
    let host = host.clone();
    let sesion = sesion.clone();
    let _ = on_submit(&form, move |_| {
        let numero_original = valor_campo("edit-cliente-numero-original");
        let payload = payloads::cliente_editado(
            &valor_campo("edit-cliente-nombre"),
            &valor_campo("edit-cliente-apellidos"),
            &valor_campo("edit-cliente-celular"),
        );

        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            host.enviando();
            let boton = host.query("#form-editar-cliente button[type=submit]");
            if let Some(b) = &boton {
                set_boton_cargando(b, true);
            }

            match sesion
                .api()
                .actualizar_cliente(&numero_original, &payload)
                .await
            {
                Ok(_) => {
                    notificar(TipoAlerta::Exito, "Cliente actualizado correctamente");
                    host.cerrar();
                    bus::publicar(Coleccion::Clientes);
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
