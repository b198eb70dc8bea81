use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub stock_bajo_limite: i64,
    pub dias_retroceso_ingreso: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:7000/api".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            stock_bajo_limite: 10,
            dias_retroceso_ingreso: 7,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            backend_url: option_env!("BACKEND_URL")
                .unwrap_or("http://localhost:7000/api")
                .to_string(),
            environment: option_env!("ENVIRONMENT").unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            stock_bajo_limite: option_env!("STOCK_BAJO_LIMITE")
                .unwrap_or("10")
                .parse()
                .unwrap_or(10),
            dias_retroceso_ingreso: option_env!("DIAS_RETROCESO_INGRESO")
                .unwrap_or("7")
                .parse()
                .unwrap_or(7),
        }
    }

    /// URL base de la API (sin slash final)
    pub fn api_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_sin_slash_final() {
        let mut cfg = AppConfig::default();
        cfg.backend_url = "http://taller.local:7000/api/".to_string();
        assert_eq!(cfg.api_url(), "http://taller.local:7000/api");
    }
}
