// ============================================================================
// CLIPBOARD - Copiar al portapapeles (HTTP y HTTPS)
// ============================================================================
// navigator.clipboard solo existe en HTTPS/localhost; el taller sirve la app
// por HTTP plano, así que usamos el método legacy con textarea oculto.
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::HtmlTextAreaElement;

use crate::dom::{create_element, document};

pub fn copiar_al_portapapeles(texto: &str) -> Result<(), String> {
    let doc = document().ok_or("No hay document")?;
    let body = doc.body().ok_or("No hay body")?;

    let textarea: HtmlTextAreaElement = create_element("textarea")
        .map_err(|_| "No se pudo crear el textarea")?
        .dyn_into()
        .map_err(|_| "El elemento no es un textarea")?;

    textarea.set_value(texto);
    let _ = textarea.set_attribute("style", "position:fixed; left:-9999px; top:0;");

    body.append_child(&textarea)
        .map_err(|_| "No se pudo insertar el textarea")?;

    let _ = textarea.focus();
    textarea.select();

    let resultado = doc
        .unchecked_into::<web_sys::HtmlDocument>()
        .exec_command("copy")
        .map_err(|_| "execCommand no disponible".to_string());

    let _ = body.remove_child(&textarea);

    match resultado {
        Ok(true) => Ok(()),
        Ok(false) => Err("Falló execCommand".to_string()),
        Err(e) => Err(e),
    }
}
