// ============================================================================
// ALERTS - Toasts y diálogo de confirmación
// ============================================================================
// Los banners se arman con fragmentos HTML de assets/alerts/. El diálogo de
// confirmación nunca falla: si el fragmento no carga, degrada a
// window.confirm y siempre resuelve un booleano.
// ============================================================================

use gloo_timers::callback::Timeout;
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::dom::{create_element, document, get_element_by_id, on_click};
use crate::views::fetch_fragmento;

/// Milisegundos que vive un banner de éxito antes de auto-cerrarse.
const MS_AUTO_CIERRE: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoAlerta {
    Exito,
    Error,
    Advertencia,
}

impl TipoAlerta {
    fn fragmento(&self) -> &'static str {
        match self {
            // El nombre del archivo viene así del paquete de assets.
            TipoAlerta::Exito => "assets/alerts/succesfull.html",
            TipoAlerta::Error => "assets/alerts/error.html",
            TipoAlerta::Advertencia => "assets/alerts/warning.html",
        }
    }

    fn titulo(&self) -> &'static str {
        match self {
            TipoAlerta::Exito => "¡Éxito!",
            TipoAlerta::Error => "Error",
            TipoAlerta::Advertencia => "Advertencia",
        }
    }

    /// Solo los banners de éxito se cierran solos; un error se queda hasta
    /// que el usuario lo descarte.
    fn auto_cierre(&self) -> bool {
        matches!(self, TipoAlerta::Exito)
    }
}

/// Muestra un banner. Nunca bloquea: el render corre en spawn_local y un
/// fallo al cargar el fragmento solo deja rastro en consola.
pub fn notificar(tipo: TipoAlerta, mensaje: &str) {
    let mensaje = mensaje.to_string();
    spawn_local(async move {
        if let Err(e) = render_banner(tipo, &mensaje).await {
            log::warn!("⚠️ Alerta no mostrada ({}): {}", e, mensaje);
        }
    });
}

async fn render_banner(tipo: TipoAlerta, mensaje: &str) -> Result<(), String> {
    let contenedor = contenedor_alertas()?;
    let html = fetch_fragmento(tipo.fragmento()).await?;
    contenedor.set_inner_html(&html);

    if let Some(titulo) = contenedor.query_selector("#alert-title").ok().flatten() {
        titulo.set_text_content(Some(tipo.titulo()));
    }
    if let Some(cuerpo) = contenedor.query_selector("#alert-message").ok().flatten() {
        cuerpo.set_text_content(Some(mensaje));
    }

    if let Some(btn) = contenedor.query_selector("#alert-ok-btn").ok().flatten() {
        let c = contenedor.clone();
        on_click(&btn, move |_| c.set_inner_html(""))
            .map_err(|_| "No se pudo enlazar el botón de cierre".to_string())?;
    }

    if tipo.auto_cierre() {
        let c = contenedor.clone();
        Timeout::new(MS_AUTO_CIERRE, move || c.set_inner_html("")).forget();
    }
    Ok(())
}

/// El contenedor #alert-container se crea si la página no lo trae.
fn contenedor_alertas() -> Result<Element, String> {
    if let Some(existente) = get_element_by_id("alert-container") {
        return Ok(existente);
    }
    let doc = document().ok_or("No hay document")?;
    let body = doc.body().ok_or("No hay body")?;
    let contenedor = create_element("div").map_err(|_| "No se pudo crear #alert-container")?;
    contenedor.set_id("alert-container");
    body.append_child(&contenedor)
        .map_err(|_| "No se pudo insertar #alert-container")?;
    Ok(contenedor)
}

/// Diálogo de confirmación. Resuelve `true` con OK, `false` con cancelar o
/// clic en el backdrop. Cualquier fallo degrada a window.confirm.
pub async fn confirmar(titulo: &str, mensaje: &str, detalles_html: &str) -> bool {
    match confirmar_con_fragmento(titulo, mensaje, detalles_html).await {
        Ok(respuesta) => respuesta,
        Err(e) => {
            log::warn!("⚠️ Confirmación degradada a window.confirm: {}", e);
            web_sys::window()
                .and_then(|w| w.confirm_with_message(mensaje).ok())
                .unwrap_or(false)
        }
    }
}

async fn confirmar_con_fragmento(
    titulo: &str,
    mensaje: &str,
    detalles_html: &str,
) -> Result<bool, String> {
    let doc = document().ok_or("No hay document")?;
    let body = doc.body().ok_or("No hay body")?;

    // Limpieza previa por si quedó un diálogo colgado.
    if let Some(previo) = doc.query_selector(".alert-wrapper-temp").ok().flatten() {
        previo.remove();
    }

    let html = fetch_fragmento("assets/alerts/warning.html").await?;

    let wrapper = create_element("div").map_err(|_| "No se pudo crear el wrapper")?;
    wrapper.set_class_name("alert-wrapper-temp");
    if let Some(w) = wrapper.dyn_ref::<HtmlElement>() {
        let estilo = w.style();
        let _ = estilo.set_property("position", "fixed");
        let _ = estilo.set_property("inset", "0");
        let _ = estilo.set_property("z-index", "99999");
    }
    wrapper.set_inner_html(&html);
    body.append_child(&wrapper)
        .map_err(|_| "No se pudo insertar el diálogo")?;

    if let Some(t) = wrapper.query_selector("#alert-title").ok().flatten() {
        t.set_text_content(Some(titulo));
    }
    let cuerpo = wrapper.query_selector("#alert-message").ok().flatten();
    if let Some(m) = &cuerpo {
        m.set_text_content(Some(mensaje));
    }
    if !detalles_html.is_empty() {
        if let Some(m) = &cuerpo {
            let detalles = create_element("div").map_err(|_| "No se pudo crear los detalles")?;
            detalles.set_class_name("alert-detalles");
            detalles.set_inner_html(detalles_html);
            let _ = m.after_with_node_1(&detalles);
        }
    }

    let backdrop = wrapper.query_selector(".alert-backdrop").ok().flatten();
    if let Some(b) = &backdrop {
        crate::dom::set_display(b, "flex");
    }

    let btn_ok = wrapper
        .query_selector("#alert-ok-btn")
        .ok()
        .flatten()
        .ok_or("El fragmento no trae botón OK")?;
    let btn_cancel = wrapper.query_selector("#alert-cancel-btn").ok().flatten();

    let wrapper_promesa = wrapper.clone();
    let promesa = Promise::new(&mut |resolve: Function, _reject: Function| {
        let cerrar = {
            let wrapper = wrapper_promesa.clone();
            move |respuesta: bool, resolve: &Function| {
                wrapper.remove();
                let _ = resolve.call1(&JsValue::NULL, &JsValue::from_bool(respuesta));
            }
        };

        let r = resolve.clone();
        let c = cerrar.clone();
        let _ = on_click(&btn_ok, move |_| c(true, &r));

        if let Some(cancel) = &btn_cancel {
            let r = resolve.clone();
            let c = cerrar.clone();
            let _ = on_click(cancel, move |_| c(false, &r));
        }

        // Clic fuera del contenido = cancelar.
        if let Some(b) = &backdrop {
            let r = resolve.clone();
            let c = cerrar.clone();
            let objetivo = JsValue::from(b.clone());
            let _ = on_click(b, move |e: MouseEvent| {
                let en_backdrop = e
                    .target()
                    .map(|t| JsValue::from(t) == objetivo)
                    .unwrap_or(false);
                if en_backdrop {
                    c(false, &r);
                }
            });
        }
    });

    let resultado = JsFuture::from(promesa)
        .await
        .map_err(|_| "El diálogo se interrumpió".to_string())?;
    Ok(resultado.as_bool().unwrap_or(false))
}
