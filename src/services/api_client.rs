// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP contra el backend del
// taller. Todas las respuestas vienen envueltas en {success, data, message?};
// los helpers tipados desenvuelven con ApiRespuesta.
// ============================================================================

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::CONFIG;
use crate::models::{
    ApiRespuesta, ChartDatos, Cliente, Finalizado, Marca, MaterialUsado, PerfilUsuario, Producto,
    StatsResumen, Tarjeta, Tecnico,
};
use crate::models::sesion::{LoginRequest, RegistroRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metodo {
    Get,
    Post,
    Put,
    Delete,
}

/// Extrae el mensaje de error de una respuesta no-2xx. El backend no es
/// consistente: unas rutas mandan `message`, otras `error` u ocasionalmente
/// `details`. Si el cuerpo no es JSON (o no trae ninguno), degradamos al
/// status HTTP.
pub fn extraer_mensaje_error(status: u16, status_text: &str, cuerpo: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(cuerpo) {
        for clave in ["message", "error", "details"] {
            if let Some(m) = v.get(clave).and_then(Value::as_str) {
                if !m.trim().is_empty() {
                    return m.to_string();
                }
            }
        }
    }
    format!("Error del servidor: {} {}", status, status_text)
}

/// Request genérico autenticado. Normaliza la respuesta:
/// - 2xx con cuerpo JSON → el JSON tal cual.
/// - 2xx con cuerpo vacío o no-JSON → `{"success": true}` sintético.
/// - DELETE con 204 → `{"success": true}` sin intentar parsear.
/// - no-2xx → Err con el mensaje extraído del cuerpo.
pub async fn enviar(
    ruta: &str,
    metodo: Metodo,
    cuerpo: Option<&Value>,
    token: &str,
) -> Result<Value, String> {
    let url = format!("{}{}", CONFIG.api_url(), ruta);
    log::debug!("🌐 {:?} {}", metodo, url);

    let builder = match metodo {
        Metodo::Get => Request::get(&url),
        Metodo::Post => Request::post(&url),
        Metodo::Put => Request::put(&url),
        Metodo::Delete => Request::delete(&url),
    };
    let builder = if token.is_empty() {
        builder
    } else {
        builder.header("Authorization", &format!("Bearer {}", token))
    };

    let respuesta = match cuerpo {
        Some(v) => builder
            .json(v)
            .map_err(|e| format!("Error serializando request: {}", e))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| format!("Error de red: {}", e))?;

    let status = respuesta.status();

    // El backend responde DELETE con 204 y sin cuerpo.
    if metodo == Metodo::Delete && status == 204 {
        return Ok(json!({ "success": true }));
    }

    let texto = respuesta.text().await.unwrap_or_default();

    if respuesta.ok() {
        match serde_json::from_str::<Value>(&texto) {
            Ok(v) => Ok(v),
            // 200 con cuerpo vacío (algunos PUT): lo tratamos como éxito.
            Err(_) => Ok(json!({ "success": true })),
        }
    } else {
        Err(extraer_mensaje_error(
            status,
            &respuesta.status_text(),
            &texto,
        ))
    }
}

/// Desenvuelve `{success, data, message?}` hacia el tipo pedido.
fn desenvolver<T: DeserializeOwned>(valor: Value) -> Result<T, String> {
    let envelope: ApiRespuesta<T> = serde_json::from_value(valor)
        .map_err(|e| format!("Error parseando respuesta: {}", e))?;
    envelope.datos()
}

// ----------------------------------------------------------------------------
// Autenticación (sin token)
// ----------------------------------------------------------------------------

pub async fn login(credenciales: &LoginRequest) -> Result<PerfilUsuario, String> {
    log::info!("🔐 Iniciando sesión: {}", credenciales.correo_electronico);
    let cuerpo = serde_json::to_value(credenciales)
        .map_err(|e| format!("Error serializando credenciales: {}", e))?;
    desenvolver(enviar("/auth/login", Metodo::Post, Some(&cuerpo), "").await?)
}

pub async fn registrar(datos: &RegistroRequest) -> Result<Value, String> {
    let cuerpo = serde_json::to_value(datos)
        .map_err(|e| format!("Error serializando registro: {}", e))?;
    enviar("/auth/register", Metodo::Post, Some(&cuerpo), "").await
}

// ----------------------------------------------------------------------------
// Cliente autenticado
// ----------------------------------------------------------------------------

/// Cliente API autenticado - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    token: String,
}

impl ApiClient {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }

    async fn get(&self, ruta: &str) -> Result<Value, String> {
        enviar(ruta, Metodo::Get, None, &self.token).await
    }

    async fn post(&self, ruta: &str, cuerpo: &Value) -> Result<Value, String> {
        enviar(ruta, Metodo::Post, Some(cuerpo), &self.token).await
    }

    async fn put(&self, ruta: &str, cuerpo: &Value) -> Result<Value, String> {
        enviar(ruta, Metodo::Put, Some(cuerpo), &self.token).await
    }

    async fn delete(&self, ruta: &str) -> Result<Value, String> {
        enviar(ruta, Metodo::Delete, None, &self.token).await
    }

    // ---- Clientes ----------------------------------------------------------

    pub async fn listar_clientes(&self) -> Result<Vec<Cliente>, String> {
        desenvolver(self.get("/clientes").await?)
    }

    pub async fn obtener_cliente(&self, celular: &str) -> Result<Cliente, String> {
        desenvolver(self.get(&format!("/clientes/{}", celular)).await?)
    }

    pub async fn crear_cliente(&self, cuerpo: &Value) -> Result<Value, String> {
        self.post("/clientes", cuerpo).await
    }

    pub async fn actualizar_cliente(&self, celular: &str, cuerpo: &Value) -> Result<Value, String> {
        self.put(&format!("/clientes/{}", celular), cuerpo).await
    }

    pub async fn eliminar_cliente(&self, celular: &str) -> Result<Value, String> {
        self.delete(&format!("/clientes/{}", celular)).await
    }

    // ---- Productos (materia prima) -----------------------------------------

    pub async fn listar_productos(&self) -> Result<Vec<Producto>, String> {
        desenvolver(self.get("/productos").await?)
    }

    pub async fn obtener_producto(&self, id: &str) -> Result<Producto, String> {
        desenvolver(self.get(&format!("/productos/{}", id)).await?)
    }

    pub async fn crear_producto(&self, cuerpo: &Value) -> Result<Value, String> {
        self.post("/productos", cuerpo).await
    }

    pub async fn actualizar_producto(&self, id: &str, cuerpo: &Value) -> Result<Value, String> {
        self.put(&format!("/productos/{}", id), cuerpo).await
    }

    pub async fn eliminar_producto(&self, id: &str) -> Result<Value, String> {
        self.delete(&format!("/productos/{}", id)).await
    }

    /// Descuenta stock al registrar el uso de material en un servicio.
    pub async fn usar_material(&self, cuerpo: &Value) -> Result<Value, String> {
        self.post("/productos/uso", cuerpo).await
    }

    // ---- Marcas y equipos --------------------------------------------------

    pub async fn listar_marcas(&self) -> Result<Vec<Marca>, String> {
        desenvolver(self.get("/marcas").await?)
    }

    pub async fn crear_marca(&self, cuerpo: &Value) -> Result<Value, String> {
        self.post("/marcas", cuerpo).await
    }

    pub async fn eliminar_marca(&self, id: &str) -> Result<Value, String> {
        self.delete(&format!("/marcas/{}", id)).await
    }

    pub async fn crear_equipo(&self, cuerpo: &Value) -> Result<Value, String> {
        self.post("/equipos", cuerpo).await
    }

    pub async fn eliminar_equipo(&self, id: &str) -> Result<Value, String> {
        self.delete(&format!("/equipos/{}", id)).await
    }

    // ---- Servicios y tarjetas ----------------------------------------------

    pub async fn listar_servicios(&self) -> Result<Vec<Tarjeta>, String> {
        desenvolver(self.get("/servicios").await?)
    }

    pub async fn crear_servicio(&self, cuerpo: &Value) -> Result<Value, String> {
        self.post("/servicios", cuerpo).await
    }

    pub async fn materiales_de_servicio(&self, id: &str) -> Result<Vec<MaterialUsado>, String> {
        desenvolver(self.get(&format!("/servicios/{}/materiales", id)).await?)
    }

    pub async fn listar_tarjetas(&self) -> Result<Vec<Tarjeta>, String> {
        desenvolver(self.get("/tarjetas").await?)
    }

    /// Devuelve la tarjeta cruda (Value) para que la edición de estado pueda
    /// rehidratar el payload completo sin perder campos que no modelamos.
    pub async fn obtener_tarjeta_cruda(&self, id: &str) -> Result<Value, String> {
        desenvolver(self.get(&format!("/tarjetas/{}", id)).await?)
    }

    pub async fn actualizar_tarjeta(&self, id: &str, cuerpo: &Value) -> Result<Value, String> {
        self.put(&format!("/tarjetas/{}", id), cuerpo).await
    }

    // ---- Finalizados (ventas) ----------------------------------------------

    pub async fn listar_finalizados(&self) -> Result<Vec<Finalizado>, String> {
        desenvolver(self.get("/finalizado").await?)
    }

    pub async fn obtener_finalizado(&self, id: &str) -> Result<Finalizado, String> {
        desenvolver(self.get(&format!("/finalizado/{}", id)).await?)
    }

    pub async fn crear_finalizado(&self, cuerpo: &Value) -> Result<Value, String> {
        self.post("/finalizado", cuerpo).await
    }

    pub async fn actualizar_finalizado(&self, id: &str, cuerpo: &Value) -> Result<Value, String> {
        self.put(&format!("/finalizado/{}", id), cuerpo).await
    }

    pub async fn eliminar_finalizado(&self, id: &str) -> Result<Value, String> {
        self.delete(&format!("/finalizado/{}", id)).await
    }

    // ---- Técnicos y estadísticas -------------------------------------------

    pub async fn listar_tecnicos(&self) -> Result<Vec<Tecnico>, String> {
        desenvolver(self.get("/users/tecnicos").await?)
    }

    pub async fn stats_resumen(&self) -> Result<StatsResumen, String> {
        desenvolver(self.get("/stats/summary").await?)
    }

    pub async fn stats_chart(&self, tipo: &str) -> Result<ChartDatos, String> {
        desenvolver(self.get(&format!("/stats/chart?tipo={}", tipo)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_mensaje_sale_del_campo_message() {
        let m = extraer_mensaje_error(400, "Bad Request", r#"{"message":"Celular duplicado"}"#);
        assert_eq!(m, "Celular duplicado");
    }

    #[test]
    fn sin_message_cae_a_error_y_luego_a_details() {
        let m = extraer_mensaje_error(500, "Oops", r#"{"error":"Fallo interno"}"#);
        assert_eq!(m, "Fallo interno");

        let m = extraer_mensaje_error(422, "Oops", r#"{"details":"nombre requerido"}"#);
        assert_eq!(m, "nombre requerido");
    }

    #[test]
    fn message_tiene_prioridad_sobre_error() {
        let m = extraer_mensaje_error(400, "x", r#"{"error":"b","message":"a"}"#);
        assert_eq!(m, "a");
    }

    #[test]
    fn cuerpo_no_json_degrada_al_status() {
        let m = extraer_mensaje_error(502, "Bad Gateway", "<html>nginx</html>");
        assert!(m.contains("502"));
        assert!(m.contains("Bad Gateway"));
    }

    #[test]
    fn campos_vacios_no_cuentan_como_mensaje() {
        let m = extraer_mensaje_error(500, "Internal", r#"{"message":"  "}"#);
        assert!(m.contains("500"));
    }
}
