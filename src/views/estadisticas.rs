// ============================================================================
// ESTADÍSTICAS - Resumen de ingresos y gráfica de barras
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::dom::{get_element_by_id, on_click};
use crate::models::stats::{formato_monto, ChartDatos};
use crate::state::SesionContexto;

/// Periodo de la gráfica de ingresos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Periodo {
    Diario,
    Semanal,
    Mensual,
}

impl Periodo {
    /// Valor del query param `tipo` que espera el backend. Ojo: el periodo
    /// mensual viaja como `mes`, no como `mensual`.
    pub fn parametro(&self) -> &'static str {
        match self {
            Periodo::Diario => "diario",
            Periodo::Semanal => "semanal",
            Periodo::Mensual => "mes",
        }
    }

    fn boton(&self) -> &'static str {
        match self {
            Periodo::Diario => "filter-diario",
            Periodo::Semanal => "filter-semanal",
            Periodo::Mensual => "filter-mensual",
        }
    }
}

const PERIODOS: [Periodo; 3] = [Periodo::Diario, Periodo::Semanal, Periodo::Mensual];

/// Etiqueta compacta del eje de montos: $1.5M, $12K, $800.
pub fn etiqueta_monto(valor: f64) -> String {
    if valor >= 1_000_000.0 {
        format!("${:.1}M", valor / 1_000_000.0)
    } else if valor >= 1_000.0 {
        format!("${:.0}K", valor / 1_000.0)
    } else {
        format!("${:.0}", valor)
    }
}

/// Altura porcentual de cada barra relativa al máximo de la serie.
/// Una serie vacía o toda en cero produce barras de altura cero.
pub fn alturas_relativas(valores: &[f64]) -> Vec<f64> {
    let maximo = valores.iter().copied().fold(0.0_f64, f64::max);
    if maximo <= 0.0 {
        return vec![0.0; valores.len()];
    }
    valores.iter().map(|v| (v / maximo) * 100.0).collect()
}

pub fn montar(sesion: SesionContexto) {
    {
        let sesion = sesion.clone();
        spawn_local(async move {
            cargar_resumen(&sesion).await;
        });
    }

    for periodo in PERIODOS {
        if let Some(boton) = get_element_by_id(periodo.boton()) {
            let sesion = sesion.clone();
            let _ = on_click(&boton, move |_| {
                let sesion = sesion.clone();
                spawn_local(async move {
                    cargar_grafica(&sesion, periodo).await;
                });
            });
        }
    }

    // La vista abre con la serie semanal.
    spawn_local(async move {
        cargar_grafica(&sesion, Periodo::Semanal).await;
    });
}

async fn cargar_resumen(sesion: &SesionContexto) {
    let resumen = match sesion.api().stats_resumen().await {
        Ok(r) => r,
        Err(e) => {
            log::error!("❌ Error al cargar resumen: {}", e);
            return;
        }
    };

    let set = |id: &str, texto: &str| {
        if let Some(el) = get_element_by_id(id) {
            el.set_text_content(Some(texto));
        }
    };

    set("stats-ingresos-hoy", &formato_monto(resumen.ingresos_hoy));
    set("stats-ingresos-semana", &formato_monto(resumen.ingresos_semana));
    set("stats-ingresos-mes", &formato_monto(resumen.ingresos_mes));
    set(
        "stats-tarjetas-finalizadas",
        &resumen.total_finalizadas().to_string(),
    );
}

async fn cargar_grafica(sesion: &SesionContexto, periodo: Periodo) {
    for otro in PERIODOS {
        if let Some(boton) = get_element_by_id(otro.boton()) {
            if otro == periodo {
                let _ = boton.class_list().add_1("active");
            } else {
                let _ = boton.class_list().remove_1("active");
            }
        }
    }

    match sesion.api().stats_chart(periodo.parametro()).await {
        Ok(datos) => renderizar_grafica(&datos),
        Err(e) => log::error!("❌ Error gráfico: {}", e),
    }
}

/// Gráfica de barras en HTML/CSS puro dentro de #ventas-chart.
fn renderizar_grafica(datos: &ChartDatos) {
    let Some(contenedor) = get_element_by_id("ventas-chart") else {
        return;
    };

    if datos.labels.is_empty() {
        contenedor.set_inner_html(r#"<p class="chart-vacio">Sin datos para este periodo.</p>"#);
        return;
    }

    let alturas = alturas_relativas(&datos.valores);
    let mut html = String::from(r#"<div class="chart-barras">"#);
    for (i, label) in datos.labels.iter().enumerate() {
        let valor = datos.valores.get(i).copied().unwrap_or(0.0);
        let altura = alturas.get(i).copied().unwrap_or(0.0);
        html.push_str(&format!(
            r#"<div class="chart-columna"><span class="chart-valor">{}</span><div class="chart-barra" style="height: {:.1}%"></div><span class="chart-label">{}</span></div>"#,
            etiqueta_monto(valor),
            altura,
            label
        ));
    }
    html.push_str("</div>");
    contenedor.set_inner_html(&html);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_periodo_mensual_viaja_como_mes() {
        assert_eq!(Periodo::Mensual.parametro(), "mes");
        assert_eq!(Periodo::Diario.parametro(), "diario");
        assert_eq!(Periodo::Semanal.parametro(), "semanal");
    }

    #[test]
    fn etiquetas_compactas_por_magnitud() {
        assert_eq!(etiqueta_monto(800.0), "$800");
        assert_eq!(etiqueta_monto(12_000.0), "$12K");
        assert_eq!(etiqueta_monto(1_500_000.0), "$1.5M");
    }

    #[test]
    fn las_alturas_se_normalizan_contra_el_maximo() {
        let alturas = alturas_relativas(&[50.0, 100.0, 25.0]);
        assert_eq!(alturas, vec![50.0, 100.0, 25.0]);
    }

    #[test]
    fn una_serie_en_cero_no_divide_entre_cero() {
        assert_eq!(alturas_relativas(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(alturas_relativas(&[]).is_empty());
    }
}
