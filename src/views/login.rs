// ============================================================================
// LOGIN / REGISTRO - Autenticación contra /auth/*
// ============================================================================

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{document, get_element_by_id, on_click, on_submit, valor_campo};
use crate::models::{LoginRequest, RegistroRequest};
use crate::services::{api_client, session_service};
use crate::state::app_state::pagina_inicio;
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::modals::set_boton_cargando;

/// Mínimo de caracteres de la contraseña al registrarse.
pub const MIN_CONTRASENA: usize = 8;

pub fn validar_login(email: &str, contrasena: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() || contrasena.is_empty() {
        return Err("Por favor, completa todos los campos");
    }
    Ok(())
}

pub fn validar_registro(
    nombre: &str,
    email: &str,
    contrasena: &str,
    tipo: &str,
) -> Result<(), &'static str> {
    if nombre.trim().is_empty() || email.trim().is_empty() || contrasena.is_empty() || tipo.is_empty()
    {
        return Err("Por favor, completa todos los campos");
    }
    if contrasena.chars().count() < MIN_CONTRASENA {
        return Err("La contraseña debe tener al menos 8 caracteres");
    }
    Ok(())
}

/// Monta la página de login/registro. Si ya hay sesión, no hay nada que
/// capturar: se salta directo al dashboard que corresponda.
pub fn montar() {
    if let Some(sesion) = session_service::leer_sesion() {
        log::info!("🔐 Sesión activa, redirigiendo a {}", pagina_inicio(&sesion.tipo));
        redirigir(pagina_inicio(&sesion.tipo));
        return;
    }

    enlazar_login();
    enlazar_registro();
}

fn redirigir(destino: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.location().set_href(destino);
    }
}

fn enlazar_login() {
    let Some(form) = get_element_by_id("loginForm") else {
        return;
    };
    let _ = on_submit(&form.clone(), move |_| {
        let email = valor_campo("email").trim().to_string();
        let contrasena = valor_campo("password");

        if let Err(mensaje) = validar_login(&email, &contrasena) {
            notificar(TipoAlerta::Error, mensaje);
            return;
        }

        let boton = form.query_selector("button[type=submit]").ok().flatten();
        if let Some(b) = &boton {
            set_boton_cargando(b, true);
        }

        let peticion = LoginRequest {
            correo_electronico: email,
            contrasena,
        };

        let boton = boton.clone();
        spawn_local(async move {
            match api_client::login(&peticion).await {
                Ok(perfil) => {
                    if let Err(e) = session_service::guardar_sesion(&perfil) {
                        log::error!("❌ No se pudo guardar la sesión: {}", e);
                        notificar(TipoAlerta::Error, "No se pudo guardar la sesión");
                    } else {
                        redirigir(pagina_inicio(&perfil.tipo));
                        return;
                    }
                }
                Err(e) => {
                    log::error!("❌ Error en login: {}", e);
                    notificar(TipoAlerta::Error, &e);
                }
            }
            if let Some(b) = &boton {
                set_boton_cargando(b, false);
            }
        });
    });
}

fn enlazar_registro() {
    let Some(form) = get_element_by_id("registerForm") else {
        return;
    };
    let _ = on_submit(&form.clone(), move |_| {
        let nombre = valor_campo("fullname").trim().to_string();
        let email = valor_campo("email").trim().to_string();
        let contrasena = valor_campo("password");
        let tipo = valor_campo("tipo");

        if let Err(mensaje) = validar_registro(&nombre, &email, &contrasena, &tipo) {
            notificar(TipoAlerta::Error, mensaje);
            return;
        }

        let boton = form.query_selector("button[type=submit]").ok().flatten();
        if let Some(b) = &boton {
            set_boton_cargando(b, true);
        }

        let peticion = RegistroRequest {
            nombre_completo: nombre,
            correo_electronico: email,
            contrasena,
            tipo,
        };

        let boton = boton.clone();
        spawn_local(async move {
            match api_client::registrar(&peticion).await {
                Ok(_) => {
                    notificar(TipoAlerta::Exito, "Registro exitoso. Ahora puedes iniciar sesión.");
                    redirigir("login.html");
                    return;
                }
                Err(e) => {
                    log::error!("❌ Error en registro: {}", e);
                    notificar(TipoAlerta::Error, &e);
                }
            }
            if let Some(b) = &boton {
                set_boton_cargando(b, false);
            }
        });
    });
}

/// Encabezado común de las páginas internas: nombre del usuario en sesión
/// y botones de cerrar sesión.
pub fn montar_encabezado(sesion: &crate::state::SesionContexto) {
    let Some(doc) = document() else {
        return;
    };

    if let Ok(nodos) = doc.query_selector_all(".user-name") {
        for i in 0..nodos.length() {
            if let Some(nodo) = nodos.item(i) {
                nodo.set_text_content(Some(&sesion.nombre));
            }
        }
    }

    if let Ok(nodos) = doc.query_selector_all(".user-type-display") {
        for i in 0..nodos.length() {
            if let Some(nodo) = nodos.item(i) {
                nodo.set_text_content(Some(&capitalizar(&sesion.tipo)));
            }
        }
    }

    if let Ok(nodos) = doc.query_selector_all(".logout, .cerrar-sesion") {
        for i in 0..nodos.length() {
            let Some(boton) = nodos.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let _ = on_click(&boton, move |e| {
                e.prevent_default();
                let confirmado = web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message("¿Deseas cerrar sesión y salir del sistema?")
                            .ok()
                    })
                    .unwrap_or(false);
                if confirmado {
                    session_service::cerrar_sesion();
                    redirigir("index.html");
                }
            });
        }
    }
}

fn capitalizar(texto: &str) -> String {
    let mut chars = texto.chars();
    match chars.next() {
        Some(primera) => primera.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_login_exige_ambos_campos() {
        assert!(validar_login("a@b.mx", "secreta123").is_ok());
        assert!(validar_login("", "secreta123").is_err());
        assert!(validar_login("a@b.mx", "").is_err());
        assert!(validar_login("   ", "secreta123").is_err());
    }

    #[test]
    fn el_registro_exige_contrasena_de_ocho() {
        assert!(validar_registro("Ana", "a@b.mx", "12345678", "gerente").is_ok());
        assert_eq!(
            validar_registro("Ana", "a@b.mx", "1234567", "gerente"),
            Err("La contraseña debe tener al menos 8 caracteres")
        );
        assert!(validar_registro("", "a@b.mx", "12345678", "gerente").is_err());
        assert!(validar_registro("Ana", "a@b.mx", "12345678", "").is_err());
    }

    #[test]
    fn capitalizar_sube_solo_la_primera_letra() {
        assert_eq!(capitalizar("gerente"), "Gerente");
        assert_eq!(capitalizar("técnico"), "Técnico");
        assert_eq!(capitalizar(""), "");
    }
}
