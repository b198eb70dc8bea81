// ============================================================================
// INVENTARIO TÉCNICO - Inventario completo + tarjetas finalizadas en venta
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, on_click, on_input, ElementBuilder};
use crate::models::stats::formato_monto;
use crate::models::{Finalizado, Producto};
use crate::state::{bus, Coleccion, SesionContexto};
use crate::utils::estados::{stock_bajo, stock_critico};
use crate::views::modals::{usar_material, ModalHost};

/// Nivel presentacional del stock de un producto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NivelStock {
    Normal,
    Bajo,
    Critico,
}

impl NivelStock {
    pub fn de(cantidad: i64) -> Self {
        if stock_critico(cantidad) {
            NivelStock::Critico
        } else if stock_bajo(cantidad) {
            NivelStock::Bajo
        } else {
            NivelStock::Normal
        }
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            NivelStock::Normal => "Normal",
            NivelStock::Bajo => "Bajo",
            NivelStock::Critico => "Crítico",
        }
    }

    pub fn clase_badge(&self) -> &'static str {
        match self {
            NivelStock::Normal => "status-entregado",
            NivelStock::Bajo => "status-en_proceso",
            NivelStock::Critico => "status-cancelado",
        }
    }

    fn estilo_cantidad(&self) -> &'static str {
        match self {
            NivelStock::Normal => "",
            NivelStock::Bajo => "color: #e59400; font-weight: bold;",
            NivelStock::Critico => "color: #d90429; font-weight: bold;",
        }
    }
}

type Productos = Rc<RefCell<Vec<Producto>>>;
type Ventas = Rc<RefCell<Vec<Finalizado>>>;

pub fn montar(sesion: SesionContexto) {
    let Some(host) = ModalHost::nuevo() else {
        log::error!("❌ No se encontró #modal-container");
        return;
    };
    let productos: Productos = Rc::new(RefCell::new(Vec::new()));
    let ventas: Ventas = Rc::new(RefCell::new(Vec::new()));

    if let Some(buscador) = get_element_by_id("search-materia-prima") {
        let productos = productos.clone();
        let host = host.clone();
        let sesion = sesion.clone();
        let _ = on_input(&buscador, move |_| {
            let termino = crate::dom::valor_campo("search-materia-prima");
            let filtrados: Vec<Producto> = productos
                .borrow()
                .iter()
                .filter(|p| p.coincide(&termino))
                .cloned()
                .collect();
            renderizar_productos(&filtrados, &host, &sesion);
        });
    }

    if let Some(buscador) = get_element_by_id("search-tarjetas") {
        let ventas = ventas.clone();
        let _ = on_input(&buscador, move |_| {
            let termino = crate::dom::valor_campo("search-tarjetas");
            let filtradas: Vec<Finalizado> = ventas
                .borrow()
                .iter()
                .filter(|f| f.coincide(&termino))
                .cloned()
                .collect();
            renderizar_ventas(&filtradas);
        });
    }

    {
        let sesion = sesion.clone();
        let productos = productos.clone();
        let ventas = ventas.clone();
        let host = host.clone();
        bus::suscribir(
            &[Coleccion::Productos, Coleccion::Servicios, Coleccion::Finalizados],
            move |_| {
                log::debug!("🔄 Datos actualizados, recargando inventario...");
                let sesion = sesion.clone();
                let productos = productos.clone();
                let ventas = ventas.clone();
                let host = host.clone();
                spawn_local(async move {
                    recargar(&sesion, &productos, &ventas, &host).await;
                });
            },
        );
    }

    spawn_local(async move {
        recargar(&sesion, &productos, &ventas, &host).await;
    });
}

async fn recargar(sesion: &SesionContexto, productos: &Productos, ventas: &Ventas, host: &ModalHost) {
    match sesion.api().listar_productos().await {
        Ok(lista) => {
            log::debug!("✅ Productos cargados: {}", lista.len());
            *productos.borrow_mut() = lista;
            renderizar_productos(&productos.borrow(), host, sesion);
        }
        Err(e) => {
            log::error!("❌ Error al obtener materia prima: {}", e);
            if let Some(tabla) = get_element_by_id("tabla-materia-prima") {
                tabla.set_inner_html(
                    r#"<tr><td colspan="6" style="text-align:center; color:red;">Error al cargar materia prima</td></tr>"#,
                );
            }
        }
    }

    match sesion.api().listar_finalizados().await {
        Ok(lista) => {
            *ventas.borrow_mut() = lista;
            renderizar_ventas(&ventas.borrow());
        }
        Err(e) => {
            log::error!("❌ Error al cargar tarjetas: {}", e);
            if let Some(tabla) = get_element_by_id("tabla-tarjetas-venta") {
                tabla.set_inner_html(
                    r#"<tr><td colspan="6" style="text-align:center; color:red;">Error de conexión</td></tr>"#,
                );
            }
        }
    }
}

fn renderizar_productos(productos: &[Producto], host: &ModalHost, sesion: &SesionContexto) {
    let Some(tabla) = get_element_by_id("tabla-materia-prima") else {
        return;
    };
    tabla.set_inner_html("");

    if productos.is_empty() {
        tabla.set_inner_html(
            r#"<tr><td colspan="6" style="text-align:center;">No hay productos registrados.</td></tr>"#,
        );
        return;
    }

    for producto in productos {
        if let Err(e) = agregar_fila_producto(&tabla, producto, host, sesion) {
            log::error!("❌ Error renderizando producto: {:?}", e);
        }
    }
}

fn agregar_fila_producto(
    tabla: &Element,
    producto: &Producto,
    host: &ModalHost,
    sesion: &SesionContexto,
) -> Result<(), JsValue> {
    let stock = producto.stock();
    let nivel = NivelStock::de(stock);
    let alerta = if nivel == NivelStock::Critico { " ⚠️" } else { "" };

    let fila = ElementBuilder::new("tr")?
        .html(&format!(
            r#"<td><strong>{}</strong></td><td>{}</td><td style="{}">{}{}</td><td>{}</td><td><span class="status-badge {}">{}</span></td>"#,
            producto.nombre_producto,
            producto.categoria,
            nivel.estilo_cantidad(),
            stock,
            alerta,
            if producto.unidad.is_empty() { "N/A" } else { &producto.unidad },
            nivel.clase_badge(),
            nivel.etiqueta()
        ))
        .build();

    let btn_usar = ElementBuilder::new("button")?
        .class("btn-accion btn-usar-material")
        .text("🔧 Usar")
        .build();
    {
        let host = host.clone();
        let sesion = sesion.clone();
        let id = producto.id.clone();
        let nombre = producto.nombre_producto.clone();
        let _ = on_click(&btn_usar, move |_| {
            usar_material::abrir(host.clone(), sesion.clone(), id.clone(), nombre.clone(), stock);
        });
    }

    let acciones = ElementBuilder::new("td")?.child(btn_usar)?.build();
    fila.append_child(&acciones)?;
    tabla.append_child(&fila)?;
    Ok(())
}

fn renderizar_ventas(ventas: &[Finalizado]) {
    let Some(tabla) = get_element_by_id("tabla-tarjetas-venta") else {
        return;
    };
    tabla.set_inner_html("");

    if ventas.is_empty() {
        tabla.set_inner_html(
            r#"<tr><td colspan="6" style="text-align:center;">No hay tarjetas finalizadas en venta.</td></tr>"#,
        );
        return;
    }

    for venta in ventas {
        let html = format!(
            r#"<tr><td><small>{}...</small></td><td>{}</td><td>{} / {}</td><td>{}</td><td>{}</td><td><strong>{}</strong></td></tr>"#,
            venta.folio(),
            venta.nombre_cliente.as_deref().unwrap_or("N/A"),
            venta.marca.as_deref().unwrap_or("N/A"),
            venta.modelo.as_deref().unwrap_or("N/A"),
            venta.tecnico_nombre.as_deref().unwrap_or("Sin Asignar"),
            venta.fecha_entrega.as_deref().unwrap_or("N/A"),
            formato_monto(venta.costo_reparacion)
        );
        let _ = tabla.insert_adjacent_html("beforeend", &html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_nivel_critico_domina_sobre_el_bajo() {
        assert_eq!(NivelStock::de(4), NivelStock::Critico);
        assert_eq!(NivelStock::de(5), NivelStock::Bajo);
        assert_eq!(NivelStock::de(9), NivelStock::Bajo);
        assert_eq!(NivelStock::de(10), NivelStock::Normal);
    }

    #[test]
    fn las_etiquetas_y_badges_coinciden_con_el_nivel() {
        assert_eq!(NivelStock::Critico.etiqueta(), "Crítico");
        assert_eq!(NivelStock::Bajo.clase_badge(), "status-en_proceso");
        assert_eq!(NivelStock::Normal.etiqueta(), "Normal");
    }
}
