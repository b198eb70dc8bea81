// ============================================================================
// REGISTRO DE TARJETA - Modal de alta de servicio
// ============================================================================
// El guardado dispara la cascada cliente → marca → equipo → servicio de
// services/alta_servicio; aquí solo se lee el formulario y se reporta.
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::dom::{get_element_by_id, on_click, on_submit, valor_campo};
use crate::services::alta_servicio::{crear_tarjeta, FormularioTarjeta};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::{
    fijar_rango_fecha, poblar_tecnicos, set_boton_cargando, ModalHost,
};

pub fn enlazar_boton(host: ModalHost, sesion: SesionContexto) {
    let Some(boton) = get_element_by_id("btn-abrir-modal-tarjeta") else {
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
    host.cargar_fragmento("assets/modals/RegistroTarjeta.html")
        .await?;
    poblar_tecnicos(host, "#asignar-tecnico", &sesion.api()).await;
    host.mostrar();
    host.enlazar_cierre();
    fijar_rango_fecha("fecha-registro");
    enlazar_submit(host, sesion);
    Ok(())
}

fn leer_formulario() -> FormularioTarjeta {
    FormularioTarjeta {
        cliente_nombre: valor_campo("cliente-nombre"),
        cliente_apellidos: valor_campo("cliente-apellidos"),
        cliente_celular: valor_campo("cliente-celular"),
        equipo_marca: valor_campo("equipo-marca"),
        equipo_tipo: valor_campo("equipo-tipo"),
        equipo_modelo: valor_campo("equipo-modelo"),
        equipo_serie: valor_campo("equipo-serie"),
        equipo_problema: valor_campo("equipo-problema"),
        tecnico_id: valor_campo("asignar-tecnico"),
        fecha_registro: valor_campo("fecha-registro"),
    }
}

/// El alta no sale del formulario sin celular de cliente ni técnico asignado.
fn validar_formulario(f: &FormularioTarjeta) -> Result<(), &'static str> {
    if f.cliente_celular.trim().is_empty() || f.tecnico_id.is_empty() {
        return Err("Captura el celular del cliente y asigna un técnico");
    }
    Ok(())
}

fn enlazar_submit(host: &ModalHost, sesion: &SesionContexto) {
    let Some(form) = host.query("#form-registro-tarjeta") else {
        return;
    };
    let host = host.clone();
    let sesion = sesion.clone();
    let _ = on_submit(&form, move |_| {
        let formulario = leer_formulario();
        if let Err(mensaje) = validar_formulario(&formulario) {
            notificar(TipoAlerta::Advertencia, mensaje);
            return;
        }

        let host = host.clone();
        let sesion = sesion.clone();
        spawn_local(async move {
            host.enviando();
            let boton = host.query("#form-registro-tarjeta button[type=submit]");
            if let Some(b) = &boton {
                set_boton_cargando(b, true);
            }

            match crear_tarjeta(&sesion.api(), &formulario).await {
                Ok(()) => {
                    notificar(TipoAlerta::Exito, "Servicio registrado exitosamente");
                    host.cerrar();
                    bus::publicar(Coleccion::Clientes);
                    bus::publicar(Coleccion::Marcas);
                    bus::publicar(Coleccion::Servicios);
                    bus::publicar(Coleccion::Tarjetas);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_celular_o_sin_tecnico_no_hay_alta() {
        let mut f = FormularioTarjeta {
            cliente_celular: "5512345678".into(),
            tecnico_id: "tec-1".into(),
            ..Default::default()
        };
        assert!(validar_formulario(&f).is_ok());

        f.cliente_celular = "   ".into();
        assert!(validar_formulario(&f).is_err());

        f.cliente_celular = "5512345678".into();
        f.tecnico_id = String::new();
        assert!(validar_formulario(&f).is_err());
    }
}
