// ============================================================================
// APP - Arranque: resuelve la página actual y monta la vista que toca
// ============================================================================

use wasm_bindgen::JsValue;

use crate::services::session_service;
use crate::state::{Pagina, SesionContexto};
use crate::views;

pub fn arrancar() -> Result<(), JsValue> {
    let ventana = web_sys::window().ok_or_else(|| JsValue::from_str("No hay window"))?;
    let pathname = ventana.location().pathname().unwrap_or_default();
    let pagina = Pagina::desde_ruta(&pathname);
    log::info!("📄 Página detectada: {:?} ({})", pagina, pathname);

    if !pagina.requiere_sesion() {
        views::login::montar();
        return Ok(());
    }

    // Guardia de autenticación: sin sesión no se monta nada.
    if !session_service::esta_autenticado() {
        log::warn!("⚠️ Sin sesión activa, redirigiendo al login");
        let _ = ventana.location().set_href("login.html");
        return Ok(());
    }
    let Some(sesion) = session_service::leer_sesion() else {
        return Ok(());
    };

    views::login::montar_encabezado(&sesion);
    montar_vista(pagina, sesion);
    Ok(())
}

fn montar_vista(pagina: Pagina, sesion: SesionContexto) {
    match pagina {
        Pagina::Gerente => views::gerente::montar(sesion),
        Pagina::Tecnico => views::tecnico::montar(sesion),
        Pagina::Clientes => views::clientes::montar(sesion),
        Pagina::MateriaPrima => views::materia_prima::montar(sesion),
        Pagina::Pedidos => views::pedidos::montar(sesion),
        Pagina::TarjetasVenta => views::tarjetas_venta::montar(sesion),
        Pagina::InventarioTecnico => views::inventario_tecnico::montar(sesion),
        Pagina::ClientePedido => views::cliente_pedido::montar(sesion),
        Pagina::Estadisticas => views::estadisticas::montar(sesion),
        Pagina::Login | Pagina::Desconocida => {}
    }
}
