// ============================================================================
// ESTADOS - Helper centralizado de estados de tarjeta y stock
// ============================================================================
// Los dashboards de Gerente y Técnico comparten estas funciones para que
// los contadores y los badges coincidan entre vistas.
// ============================================================================

/// Umbral único de stock bajo para todas las vistas.
pub const LIMITE_STOCK_BAJO: i64 = 10;

/// Sub-umbral "crítico", solo presentacional (inventario del técnico).
pub const LIMITE_STOCK_CRITICO: i64 = 5;

pub fn stock_bajo(cantidad: i64) -> bool {
    cantidad < LIMITE_STOCK_BAJO
}

pub fn stock_critico(cantidad: i64) -> bool {
    cantidad < LIMITE_STOCK_CRITICO
}

/// Grupo de contador al que aporta cada estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrupoContador {
    Pendientes,
    Proceso,
    Finalizadas,
    Cancelados,
    Otro,
}

/// Mapea un estado (cualquier capitalización) a su grupo de contador.
pub fn grupo_contador(estado: &str) -> GrupoContador {
    match estado.trim().to_uppercase().as_str() {
        "PENDIENTE" | "DIAGNOSTICO" => GrupoContador::Pendientes,
        "EN_PROCESO" => GrupoContador::Proceso,
        "FINALIZADO" | "ENTREGADO" | "PENDIENTE_ENTREGA" => GrupoContador::Finalizadas,
        "CANCELADO" => GrupoContador::Cancelados,
        _ => GrupoContador::Otro,
    }
}

/// Clase CSS del badge de estado. Un estado desconocido degrada al estilo
/// por defecto; nunca se rechaza el renderizado.
pub fn clase_estado(estado: &str) -> &'static str {
    match estado.trim().to_uppercase().as_str() {
        "EN_PROCESO" | "DIAGNOSTICO" => "status-proceso",
        "PENDIENTE" | "ENTREGADO" | "PENDIENTE_ENTREGA" => "status-pendiente",
        "FINALIZADO" => "status-finalizado",
        "CANCELADO" => "status-cancelado",
        _ => "status-default",
    }
}

/// Color inline del estado (fallback cuando no aplica la clase CSS).
pub fn color_estado(estado: &str) -> &'static str {
    match estado.trim().to_uppercase().as_str() {
        "EN_PROCESO" | "DIAGNOSTICO" => "#ffc107",
        "PENDIENTE" | "ENTREGADO" | "PENDIENTE_ENTREGA" => "#007bff",
        "FINALIZADO" => "#28a745",
        "CANCELADO" => "#dc3545",
        _ => "#6c757d",
    }
}

/// HTML del badge de estado para insertar en celdas de tabla.
pub fn badge_estado(estado: &str) -> String {
    format!(
        r#"<span class="status-badge {}">{}</span>"#,
        clase_estado(estado),
        estado
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_bajo_es_estrictamente_menor_a_diez() {
        assert!(stock_bajo(9));
        assert!(!stock_bajo(10));
        assert!(!stock_bajo(11));
    }

    #[test]
    fn stock_critico_es_estrictamente_menor_a_cinco() {
        assert!(stock_critico(4));
        assert!(!stock_critico(5));
        // Todo lo crítico es también bajo.
        assert!(stock_bajo(4));
    }

    #[test]
    fn un_estado_desconocido_degrada_al_estilo_por_defecto() {
        assert_eq!(clase_estado("ESPERA_REFACCION"), "status-default");
        assert_eq!(color_estado("???"), "#6c757d");
        assert_eq!(grupo_contador("???"), GrupoContador::Otro);
    }

    #[test]
    fn el_mapeo_no_distingue_mayusculas_ni_espacios() {
        assert_eq!(clase_estado(" en_proceso "), "status-proceso");
        assert_eq!(grupo_contador("finalizado"), GrupoContador::Finalizadas);
    }

    #[test]
    fn entregado_y_pendiente_entrega_cuentan_como_finalizadas() {
        assert_eq!(grupo_contador("ENTREGADO"), GrupoContador::Finalizadas);
        assert_eq!(grupo_contador("PENDIENTE_ENTREGA"), GrupoContador::Finalizadas);
    }
}
