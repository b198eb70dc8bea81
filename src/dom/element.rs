// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    Window,
};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Mostrar u ocultar un elemento vía style.display
pub fn set_display(element: &Element, display: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("display", display);
    }
}

// ----------------------------------------------------------------------------
// Lectura/escritura de campos de formulario por ID
// ----------------------------------------------------------------------------
// Los formularios de los modales se leen campo por campo; un campo que no
// existe o está vacío se reporta como cadena vacía, nunca como error.

/// Valor de un input/select/textarea por ID (cadena vacía si no existe).
pub fn valor_campo(id: &str) -> String {
    let Some(el) = get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return select.value();
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

/// Escribir el valor de un input/select/textarea por ID.
pub fn set_valor_campo(id: &str, valor: &str) {
    let Some(el) = get_element_by_id(id) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(valor);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(valor);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(valor);
    }
}

/// Bloquear un campo como solo-lectura (readonly, no disabled: el valor
/// bloqueado sí viaja en el submit del formulario).
pub fn bloquear_campo(id: &str) {
    if let Some(el) = get_element_by_id(id) {
        let _ = el.set_attribute("readonly", "readonly");
        let _ = el.class_list().add_1("campo-bloqueado");
    }
}

/// Desbloquear un campo previamente bloqueado.
pub fn desbloquear_campo(id: &str) {
    if let Some(el) = get_element_by_id(id) {
        let _ = el.remove_attribute("readonly");
        let _ = el.class_list().remove_1("campo-bloqueado");
    }
}
