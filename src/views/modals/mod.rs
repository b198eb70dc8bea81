// ============================================================================
// MODALS - Host único de modales dinámicos
// ============================================================================
// Todos los modales viven dentro de #modal-container y pasan por el mismo
// ciclo: Cerrado → Cargando (fetch de datos y fragmento) → Poblado →
// Enviando → Cerrado si el guardado funciona, o de vuelta a Poblado si
// falla (el usuario conserva lo tecleado). El flag del host garantiza un
// solo modal en vuelo aunque se dispare dos veces el mismo botón.
// ============================================================================

pub mod editar_cliente;
pub mod editar_estado;
pub mod editar_finalizado;
pub mod editar_producto;
pub mod payloads;
pub mod registro_finalizado;
pub mod registro_producto;
pub mod registro_tarjeta;
pub mod usar_material;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlOptionElement, HtmlSelectElement};

use crate::config::CONFIG;
use crate::dom::{create_element, get_element_by_id, on_change, on_click, on_keydown, set_display};
use crate::services::ApiClient;
use crate::utils::fechas::{hace_dias_iso, hoy_iso};
use crate::views::alerts::{notificar, TipoAlerta};
use crate::views::fetch_fragmento;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoModal {
    Cerrado,
    Cargando,
    Poblado,
    Enviando,
}

/// Compuerta de un-solo-modal. Separada del host para poder verificar las
/// transiciones sin DOM.
pub struct Compuerta {
    estado: Cell<EstadoModal>,
}

impl Compuerta {
    pub fn nueva() -> Self {
        Self {
            estado: Cell::new(EstadoModal::Cerrado),
        }
    }

    /// Intenta pasar de Cerrado a Cargando. Devuelve false si ya hay un
    /// modal en vuelo.
    pub fn adquirir(&self) -> bool {
        if self.estado.get() != EstadoModal::Cerrado {
            return false;
        }
        self.estado.set(EstadoModal::Cargando);
        true
    }

    pub fn poblado(&self) {
        self.estado.set(EstadoModal::Poblado);
    }

    pub fn enviando(&self) {
        self.estado.set(EstadoModal::Enviando);
    }

    pub fn liberar(&self) {
        self.estado.set(EstadoModal::Cerrado);
    }

    pub fn estado(&self) -> EstadoModal {
        self.estado.get()
    }
}

/// Host de modales: el contenedor #modal-container más la compuerta.
#[derive(Clone)]
pub struct ModalHost {
    contenedor: Element,
    compuerta: Rc<Compuerta>,
}

impl ModalHost {
    pub fn nuevo() -> Option<Self> {
        let contenedor = get_element_by_id("modal-container")?;
        Some(Self {
            contenedor,
            compuerta: Rc::new(Compuerta::nueva()),
        })
    }

    pub fn adquirir(&self) -> bool {
        self.compuerta.adquirir()
    }

    pub fn poblado(&self) {
        self.compuerta.poblado();
    }

    pub fn enviando(&self) {
        self.compuerta.enviando();
    }

    /// Vuelve a Poblado tras un fallo de guardado: el formulario sigue ahí.
    pub fn fallo_envio(&self) {
        self.compuerta.poblado();
    }

    pub fn cerrar(&self) {
        self.contenedor.set_inner_html("");
        self.compuerta.liberar();
    }

    /// Cierra notificando el error; para fallos durante la carga.
    pub fn abortar(&self, mensaje: &str) {
        log::error!("❌ Modal abortado: {}", mensaje);
        self.cerrar();
        notificar(TipoAlerta::Error, mensaje);
    }

    /// Descarga el fragmento HTML del modal dentro del contenedor.
    pub async fn cargar_fragmento(&self, ruta: &str) -> Result<(), String> {
        let html = fetch_fragmento(ruta).await?;
        self.contenedor.set_inner_html(&html);
        Ok(())
    }

    pub fn query(&self, selector: &str) -> Option<Element> {
        self.contenedor.query_selector(selector).ok().flatten()
    }

    pub fn mostrar(&self) {
        if let Some(backdrop) = self.query(".modal-backdrop") {
            set_display(&backdrop, "flex");
        }
        self.poblado();
    }

    /// Botones estándar de cierre de los fragmentos, más Escape mientras el
    /// foco esté dentro del modal. El listener muere con el fragmento.
    pub fn enlazar_cierre(&self) {
        for id in ["#btn-cerrar-modal", "#btn-cancelar-modal"] {
            if let Some(btn) = self.query(id) {
                let host = self.clone();
                let _ = on_click(&btn, move |_| host.cerrar());
            }
        }
        let host = self.clone();
        let _ = on_keydown(&self.contenedor, move |e| {
            if e.key() == "Escape" && host.compuerta.estado() == EstadoModal::Poblado {
                host.cerrar();
            }
        });
    }
}

/// Botón de submit en estado "Cargando...". El texto original se conserva
/// en un atributo data para restaurarlo.
pub fn set_boton_cargando(boton: &Element, cargando: bool) {
    let Some(btn) = boton.dyn_ref::<HtmlButtonElement>() else {
        return;
    };
    if cargando {
        let _ = boton.set_attribute("data-texto", &btn.inner_text());
        btn.set_disabled(true);
        btn.set_inner_text("Cargando...");
    } else {
        btn.set_disabled(false);
        if let Some(texto) = boton.get_attribute("data-texto") {
            btn.set_inner_text(&texto);
        }
    }
}

/// Llena el select de técnicos desde `GET /users/tecnicos`. Si no hay
/// técnicos registrados, deshabilita el submit: una tarjeta sin técnico
/// asignado no tiene sentido.
pub async fn poblar_tecnicos(host: &ModalHost, select_id: &str, api: &ApiClient) {
    let Some(select_el) = host.query(select_id) else {
        return;
    };
    let Ok(select) = select_el.dyn_into::<HtmlSelectElement>() else {
        return;
    };
    let submit = host.query("button[type=submit]");

    match api.listar_tecnicos().await {
        Ok(tecnicos) if !tecnicos.is_empty() => {
            select.set_inner_html(
                r#"<option value="" disabled selected>Seleccionar técnico...</option>"#,
            );
            for tecnico in tecnicos {
                let Ok(opcion) = create_element("option") else {
                    continue;
                };
                if let Ok(opcion) = opcion.dyn_into::<HtmlOptionElement>() {
                    opcion.set_value(&tecnico.id);
                    opcion.set_text_content(Some(&tecnico.nombre));
                    let _ = select.append_child(&opcion);
                }
            }
            select.set_disabled(false);
        }
        _ => {
            select.set_inner_html(r#"<option value="">No hay técnicos</option>"#);
            if let Some(btn) = submit.as_ref().and_then(|b| b.dyn_ref::<HtmlButtonElement>()) {
                btn.set_disabled(true);
            }
            notificar(TipoAlerta::Error, "No hay técnicos registrados.");
        }
    }
}

/// Acota un input de fecha (por ID, sin `#`) al rango [hoy - N días, hoy]
/// y lo deja en hoy. Las fechas ISO se comparan como texto; un valor fuera
/// de rango se reacomoda al límite con una advertencia.
pub fn fijar_rango_fecha(input_id: &str) {
    let Some(input) = get_element_by_id(input_id) else {
        return;
    };
    let hoy = hoy_iso();
    let minimo = hace_dias_iso(CONFIG.dias_retroceso_ingreso as f64);

    let _ = input.set_attribute("min", &minimo);
    let _ = input.set_attribute("max", &hoy);
    crate::dom::set_valor_campo(input_id, &hoy);

    let id = input_id.to_string();
    let _ = on_change(&input, move |_| {
        let valor = crate::dom::valor_campo(&id);
        if valor < minimo {
            notificar(
                TipoAlerta::Advertencia,
                "La fecha no puede ser mayor a 1 semana atrás",
            );
            crate::dom::set_valor_campo(&id, &minimo);
        } else if valor > hoy {
            notificar(TipoAlerta::Advertencia, "La fecha no puede ser futura");
            crate::dom::set_valor_campo(&id, &hoy);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_un_modal_puede_estar_en_vuelo() {
        let compuerta = Compuerta::nueva();
        assert!(compuerta.adquirir());
        // Un segundo disparo del mismo botón no abre nada.
        assert!(!compuerta.adquirir());
        compuerta.poblado();
        assert!(!compuerta.adquirir());
        compuerta.liberar();
        assert!(compuerta.adquirir());
    }

    #[test]
    fn el_fallo_de_envio_regresa_a_poblado_no_a_cerrado() {
        let compuerta = Compuerta::nueva();
        assert!(compuerta.adquirir());
        compuerta.poblado();
        compuerta.enviando();
        assert_eq!(compuerta.estado(), EstadoModal::Enviando);
        compuerta.poblado();
        assert_eq!(compuerta.estado(), EstadoModal::Poblado);
        // Sigue ocupado: no se puede abrir otro modal encima.
        assert!(!compuerta.adquirir());
    }
}
