// ============================================================================
// ALTA DE SERVICIO - Cascada cliente → marca → equipo → servicio
// ============================================================================
// El alta de una tarjeta toca hasta cuatro recursos. Cada creación registra
// su reversa; si un paso falla, las reversas registradas se ejecutan en orden
// inverso (best-effort) para no dejar entidades huérfanas. Los pasos de
// resolución (cliente por celular, marca por nombre) son idempotentes: reusar
// una entidad existente no registra reversa.
// ============================================================================

use serde_json::{json, Value};

use crate::models::marca::buscar_marca;
use crate::models::Marca;
use crate::services::ApiClient;

/// Datos del formulario de registro de tarjeta, ya leídos del DOM.
#[derive(Debug, Clone, Default)]
pub struct FormularioTarjeta {
    pub cliente_nombre: String,
    pub cliente_apellidos: String,
    pub cliente_celular: String,
    pub equipo_marca: String,
    pub equipo_tipo: String,
    pub equipo_modelo: String,
    pub equipo_serie: String,
    pub equipo_problema: String,
    pub tecnico_id: String,
    pub fecha_registro: String,
}

/// Reversa registrada por un paso de creación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensacion {
    EliminarCliente(String),
    EliminarMarca(String),
    EliminarEquipo(String),
}

/// Decisión de un paso de resolución: reusar una entidad existente o crearla.
#[derive(Debug, Clone, PartialEq)]
pub enum Paso {
    Reusar(String),
    Crear(Value),
}

/// El backend devuelve el recurso creado como `{data: {id}}` o `{id}` plano
/// según la ruta; aceptamos ambos.
pub fn extraer_id(respuesta: &Value) -> Option<String> {
    respuesta
        .get("data")
        .and_then(|d| d.get("id"))
        .or_else(|| respuesta.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Resolución idempotente del cliente: el celular es la llave natural.
pub fn decidir_cliente(existente: Option<&crate::models::Cliente>, f: &FormularioTarjeta) -> Paso {
    match existente.and_then(|c| c.id.clone()) {
        Some(id) => Paso::Reusar(id),
        None => Paso::Crear(json!({
            "nombre": f.cliente_nombre,
            "apellidos": f.cliente_apellidos,
            "numeroCelular": f.cliente_celular,
            "email": ""
        })),
    }
}

/// Resolución de marca contra la lista completa, sin distinguir mayúsculas.
pub fn decidir_marca(marcas: &[Marca], nombre: &str) -> Paso {
    match buscar_marca(marcas, nombre) {
        Some(m) => Paso::Reusar(m.id.clone()),
        None => Paso::Crear(json!({ "nombreMarca": nombre.trim() })),
    }
}

pub fn payload_equipo(f: &FormularioTarjeta, cliente_id: &str, marca_id: &str) -> Value {
    json!({
        "clienteId": cliente_id,
        "marcaId": marca_id,
        "tipoEquipo": f.equipo_tipo,
        "modelo": f.equipo_modelo,
        "numeroSerie": f.equipo_serie
    })
}

pub fn payload_servicio(f: &FormularioTarjeta, equipo_id: &str) -> Value {
    json!({
        "equipoId": equipo_id,
        "tecnicoId": f.tecnico_id,
        "problemaReportado": f.equipo_problema,
        "fechaRecepcion": f.fecha_registro
    })
}

/// Orden de ejecución de las reversas: inverso al de registro.
pub fn orden_reversion(registradas: &[Compensacion]) -> Vec<Compensacion> {
    registradas.iter().rev().cloned().collect()
}

/// Ejecuta la cascada completa. Si falla cualquier paso, revierte lo creado
/// y devuelve el mensaje del paso que falló.
pub async fn crear_tarjeta(api: &ApiClient, form: &FormularioTarjeta) -> Result<(), String> {
    let mut registradas: Vec<Compensacion> = Vec::new();
    match ejecutar(api, form, &mut registradas).await {
        Ok(()) => {
            log::info!("✅ Servicio registrado para {}", form.cliente_celular);
            Ok(())
        }
        Err(e) => {
            log::error!("❌ Falló el alta de servicio: {}", e);
            revertir(api, &registradas).await;
            Err(e)
        }
    }
}

async fn ejecutar(
    api: &ApiClient,
    form: &FormularioTarjeta,
    registradas: &mut Vec<Compensacion>,
) -> Result<(), String> {
    // 1. CLIENTE: buscar por celular; cualquier fallo del GET se trata como
    //    "no existe" y se crea (el backend responde 404 para desconocidos).
    let existente = api.obtener_cliente(&form.cliente_celular).await.ok();
    let cliente_id = match decidir_cliente(existente.as_ref(), form) {
        Paso::Reusar(id) => id,
        Paso::Crear(payload) => {
            let creado = api.crear_cliente(&payload).await?;
            let id = extraer_id(&creado)
                .ok_or_else(|| "El servidor no devolvió el ID del cliente".to_string())?;
            registradas.push(Compensacion::EliminarCliente(form.cliente_celular.clone()));
            id
        }
    };

    // 2. MARCA: resolver contra la lista completa, crear si no existe.
    let marcas = api.listar_marcas().await?;
    let marca_id = match decidir_marca(&marcas, &form.equipo_marca) {
        Paso::Reusar(id) => id,
        Paso::Crear(payload) => {
            let creada = api.crear_marca(&payload).await?;
            let id = extraer_id(&creada)
                .ok_or_else(|| "El servidor no devolvió el ID de la marca".to_string())?;
            registradas.push(Compensacion::EliminarMarca(id.clone()));
            id
        }
    };

    // 3. EQUIPO: siempre se crea uno nuevo.
    let equipo = api
        .crear_equipo(&payload_equipo(form, &cliente_id, &marca_id))
        .await?;
    let equipo_id = extraer_id(&equipo)
        .ok_or_else(|| "El servidor no devolvió el ID del equipo".to_string())?;
    registradas.push(Compensacion::EliminarEquipo(equipo_id.clone()));

    // 4. SERVICIO (la tarjeta propiamente).
    api.crear_servicio(&payload_servicio(form, &equipo_id))
        .await?;
    Ok(())
}

/// Best-effort: una reversa que falla se registra en consola y se continúa
/// con las demás; no se reintenta.
async fn revertir(api: &ApiClient, registradas: &[Compensacion]) {
    for reversa in orden_reversion(registradas) {
        let resultado = match &reversa {
            Compensacion::EliminarCliente(celular) => api.eliminar_cliente(celular).await,
            Compensacion::EliminarMarca(id) => api.eliminar_marca(id).await,
            Compensacion::EliminarEquipo(id) => api.eliminar_equipo(id).await,
        };
        match resultado {
            Ok(_) => log::info!("↩️ Revertido: {:?}", reversa),
            Err(e) => log::warn!("⚠️ No se pudo revertir {:?}: {}", reversa, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cliente;

    fn formulario() -> FormularioTarjeta {
        FormularioTarjeta {
            cliente_nombre: "María".into(),
            cliente_apellidos: "López".into(),
            cliente_celular: "5512345678".into(),
            equipo_marca: "Samsung".into(),
            equipo_tipo: "Televisión".into(),
            equipo_modelo: "UN40".into(),
            equipo_serie: String::new(),
            equipo_problema: "No enciende".into(),
            tecnico_id: "tec-1".into(),
            fecha_registro: "2026-08-30".into(),
        }
    }

    #[test]
    fn un_cliente_existente_se_reusa_sin_reversa() {
        let existente = Cliente {
            id: Some("c-9".into()),
            nombre: "María".into(),
            apellidos: "López".into(),
            numero_celular: "5512345678".into(),
            email: None,
            total_pedidos: None,
        };
        // Mismo celular dos veces: ambas resoluciones reusan el mismo id,
        // nunca se duplica el cliente.
        assert_eq!(
            decidir_cliente(Some(&existente), &formulario()),
            Paso::Reusar("c-9".into())
        );
        assert_eq!(
            decidir_cliente(Some(&existente), &formulario()),
            Paso::Reusar("c-9".into())
        );
    }

    #[test]
    fn un_cliente_ausente_genera_payload_de_creacion() {
        let Paso::Crear(payload) = decidir_cliente(None, &formulario()) else {
            panic!("debió decidir crear");
        };
        assert_eq!(payload["numeroCelular"], "5512345678");
        assert_eq!(payload["email"], "");
    }

    #[test]
    fn la_marca_se_reusa_sin_distinguir_mayusculas() {
        let marcas = vec![Marca {
            id: "m-1".into(),
            nombre_marca: "samsung".into(),
        }];
        assert_eq!(decidir_marca(&marcas, "SAMSUNG"), Paso::Reusar("m-1".into()));
        assert_eq!(decidir_marca(&marcas, " Samsung "), Paso::Reusar("m-1".into()));
    }

    #[test]
    fn una_marca_nueva_se_crea_con_el_nombre_recortado() {
        let Paso::Crear(payload) = decidir_marca(&[], "  Sony ") else {
            panic!("debió decidir crear");
        };
        assert_eq!(payload["nombreMarca"], "Sony");
    }

    #[test]
    fn extraer_id_acepta_ambas_formas_de_respuesta() {
        assert_eq!(
            extraer_id(&serde_json::json!({"data": {"id": "x-1"}})),
            Some("x-1".into())
        );
        assert_eq!(
            extraer_id(&serde_json::json!({"id": "x-2"})),
            Some("x-2".into())
        );
        assert_eq!(extraer_id(&serde_json::json!({"success": true})), None);
    }

    #[test]
    fn las_reversas_se_ejecutan_en_orden_inverso() {
        let registradas = vec![
            Compensacion::EliminarCliente("555".into()),
            Compensacion::EliminarMarca("m-1".into()),
            Compensacion::EliminarEquipo("e-1".into()),
        ];
        assert_eq!(
            orden_reversion(&registradas),
            vec![
                Compensacion::EliminarEquipo("e-1".into()),
                Compensacion::EliminarMarca("m-1".into()),
                Compensacion::EliminarCliente("555".into()),
            ]
        );
    }

    #[test]
    fn el_payload_de_servicio_usa_el_equipo_creado() {
        let payload = payload_servicio(&formulario(), "eq-7");
        assert_eq!(payload["equipoId"], "eq-7");
        assert_eq!(payload["tecnicoId"], "tec-1");
        assert_eq!(payload["problemaReportado"], "No enciende");
        assert_eq!(payload["fechaRecepcion"], "2026-08-30");
    }
}
