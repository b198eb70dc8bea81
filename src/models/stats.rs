use serde::Deserialize;

/// Resumen de ingresos (`GET /stats/summary`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResumen {
    #[serde(default)]
    pub ingresos_hoy: Option<f64>,
    #[serde(default)]
    pub ingresos_semana: Option<f64>,
    #[serde(default)]
    pub ingresos_mes: Option<f64>,
    #[serde(default)]
    pub tarjetas_finalizadas: Option<u32>,
    #[serde(default)]
    pub vendidas_mes: Option<u32>,
}

impl StatsResumen {
    /// El backend renombró este contador en algún momento; aceptamos ambos.
    pub fn total_finalizadas(&self) -> u32 {
        self.tarjetas_finalizadas.or(self.vendidas_mes).unwrap_or(0)
    }
}

/// Serie para la gráfica de ingresos (`GET /stats/chart?tipo=...`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartDatos {
    pub labels: Vec<String>,
    pub valores: Vec<f64>,
}

/// Formatea un monto como `$1234.56`; `None` se muestra como `$0.00`.
pub fn formato_monto(monto: Option<f64>) -> String {
    format!("${:.2}", monto.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_finalizadas_acepta_cualquier_nombre_de_campo() {
        let s: StatsResumen =
            serde_json::from_str(r#"{"tarjetasFinalizadas": 12}"#).unwrap();
        assert_eq!(s.total_finalizadas(), 12);

        let s: StatsResumen = serde_json::from_str(r#"{"vendidasMes": 7}"#).unwrap();
        assert_eq!(s.total_finalizadas(), 7);
    }

    #[test]
    fn formato_monto_con_none_es_cero() {
        assert_eq!(formato_monto(None), "$0.00");
        assert_eq!(formato_monto(Some(1250.5)), "$1250.50");
    }
}
