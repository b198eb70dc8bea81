// ============================================================================
// PAYLOADS - Construcción pura de los cuerpos de cada formulario
// ============================================================================
// Todo lo que se manda al backend se arma aquí, sin tocar el DOM, para que
// la coerción numérica y la preservación de campos sean verificables.
// Regla general: un numérico opcional vacío viaja como null, nunca como 0.
// ============================================================================

use serde_json::{json, Value};

/// Entero requerido; un valor ilegible degrada a 0 (como `parseInt || 0`).
fn entero(texto: &str) -> i64 {
    texto.trim().parse().unwrap_or(0)
}

/// Flotante opcional: vacío o ilegible → null.
fn flotante_opcional(texto: &str) -> Value {
    match texto.trim().parse::<f64>() {
        Ok(v) if !texto.trim().is_empty() => json!(v),
        _ => Value::Null,
    }
}

/// `POST /productos`
pub fn producto_nuevo(
    nombre: &str,
    categoria: &str,
    cantidad: &str,
    unidad: &str,
    fecha_registro: &str,
) -> Value {
    json!({
        "nombreProducto": nombre,
        "categoria": categoria,
        "cantidad": entero(cantidad),
        "unidad": unidad,
        "fechaRegistro": fecha_registro
    })
}

/// `PUT /productos/{id}`
pub fn producto_editado(
    nombre: &str,
    categoria: &str,
    unidad: &str,
    cantidad_piezas: &str,
    cantidad_ohms: &str,
    precio_unitario: &str,
) -> Value {
    json!({
        "nombreProducto": nombre,
        "categoria": categoria,
        "unidad": unidad,
        "cantidadPiezas": entero(cantidad_piezas),
        "cantidadOhms": flotante_opcional(cantidad_ohms),
        "precioUnitario": flotante_opcional(precio_unitario)
    })
}

/// `PUT /clientes/{celularOriginal}`
pub fn cliente_editado(nombre: &str, apellidos: &str, numero_celular: &str) -> Value {
    json!({
        "nombre": nombre,
        "apellidos": apellidos,
        "numeroCelular": numero_celular
    })
}

/// `PUT /tarjetas/{id}` al cambiar el estado. Parte de la tarjeta completa
/// que se guardó al abrir el modal y solo superpone `estado`; si el nuevo
/// estado es FINALIZADO y la tarjeta no traía fecha de finalización, se
/// estampa `hoy`. Ningún otro campo se pierde.
pub fn estado_editado(tarjeta_completa: &Value, nuevo_estado: &str, hoy: &str) -> Value {
    let mut payload = tarjeta_completa.clone();
    if let Some(obj) = payload.as_object_mut() {
        obj.insert("estado".to_string(), json!(nuevo_estado));
        let sin_fecha = obj
            .get("fechaFinalizacion")
            .map_or(true, |v| v.is_null() || v.as_str().map_or(false, str::is_empty));
        if nuevo_estado == "FINALIZADO" && sin_fecha {
            obj.insert("fechaFinalizacion".to_string(), json!(hoy));
        }
    }
    payload
}

/// `POST /finalizado`
#[allow(clippy::too_many_arguments)]
pub fn finalizado_nuevo(
    registro_tarjeta_id: &str,
    nombre_cliente: &str,
    numero_celular: &str,
    marca: &str,
    modelo: &str,
    problema_cambiado: &str,
    tecnico_id: &str,
    tecnico_nombre: &str,
    fecha_entrega: &str,
    costo_reparacion: &str,
) -> Value {
    json!({
        "registroTarjetaId": registro_tarjeta_id,
        "nombreCliente": nombre_cliente,
        "numeroCelular": numero_celular,
        "marca": marca,
        "modelo": modelo,
        "problemaCambiado": problema_cambiado,
        "tecnicoId": tecnico_id,
        "tecnicoNombre": tecnico_nombre,
        "fechaEntrega": fecha_entrega,
        "costoReparacion": costo_reparacion.trim().parse::<f64>().unwrap_or(0.0)
    })
}

/// `PUT /finalizado/{id}`
pub fn finalizado_editado(problema_cambiado: &str, fecha_entrega: &str, costo: &str) -> Value {
    json!({
        "problemaCambiado": problema_cambiado,
        "fechaEntrega": fecha_entrega,
        "costoReparacion": costo.trim().parse::<f64>().unwrap_or(0.0)
    })
}

/// `POST /productos/uso`
pub fn uso_material(producto_id: &str, servicio_id: &str, cantidad: &str) -> Value {
    json!({
        "productoId": producto_id,
        "servicioId": servicio_id,
        "cantidad": entero(cantidad)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn los_opcionales_vacios_viajan_como_null_no_como_cero() {
        let p = producto_editado("Resistencia", "electronica", "pieza", "12", "", "");
        assert_eq!(p["cantidadPiezas"], 12);
        assert!(p["cantidadOhms"].is_null());
        assert!(p["precioUnitario"].is_null());
    }

    #[test]
    fn los_opcionales_con_valor_se_coercen_a_numero() {
        let p = producto_editado("Resistencia", "electronica", "pieza", "5", "220.5", "3.75");
        assert_eq!(p["cantidadOhms"], 220.5);
        assert_eq!(p["precioUnitario"], 3.75);
    }

    #[test]
    fn el_cambio_de_estado_preserva_todos_los_campos_previos() {
        let tarjeta = json!({
            "id": "t-1",
            "nombreCliente": "María López",
            "numeroCelular": "5512345678",
            "marca": "Samsung",
            "modelo": "UN40",
            "problemaDescrito": "No enciende",
            "diagnosticoTecnico": "Fuente dañada",
            "estado": "EN_PROCESO",
            "tecnicoId": "tec-1",
            "tecnicoNombre": "Pedro",
            "fechaRegistro": "2026-08-20",
            "campoQueNoModelamos": 42
        });

        let payload = estado_editado(&tarjeta, "DIAGNOSTICO", "2026-08-30");

        assert_eq!(payload["estado"], "DIAGNOSTICO");
        // Cada campo previo sobrevive, incluso los que el front no modela.
        assert_eq!(payload["diagnosticoTecnico"], "Fuente dañada");
        assert_eq!(payload["campoQueNoModelamos"], 42);
        assert_eq!(payload["tecnicoNombre"], "Pedro");
        // DIAGNOSTICO no estampa fecha de finalización.
        assert!(payload.get("fechaFinalizacion").is_none());
    }

    #[test]
    fn finalizar_estampa_la_fecha_solo_si_no_existia() {
        let sin_fecha = json!({"id": "t-1", "estado": "EN_PROCESO"});
        let payload = estado_editado(&sin_fecha, "FINALIZADO", "2026-08-30");
        assert_eq!(payload["fechaFinalizacion"], "2026-08-30");

        let con_fecha = json!({"id": "t-1", "fechaFinalizacion": "2026-08-01"});
        let payload = estado_editado(&con_fecha, "FINALIZADO", "2026-08-30");
        assert_eq!(payload["fechaFinalizacion"], "2026-08-01");
    }

    #[test]
    fn fecha_vacia_cuenta_como_ausente() {
        let vacia = json!({"id": "t-1", "fechaFinalizacion": ""});
        let payload = estado_editado(&vacia, "FINALIZADO", "2026-08-30");
        assert_eq!(payload["fechaFinalizacion"], "2026-08-30");
    }

    #[test]
    fn el_uso_de_material_coerce_la_cantidad() {
        let p = uso_material("p-1", "s-1", "3");
        assert_eq!(p["productoId"], "p-1");
        assert_eq!(p["servicioId"], "s-1");
        assert_eq!(p["cantidad"], 3);
    }

    #[test]
    fn el_costo_del_finalizado_es_flotante() {
        let p = finalizado_editado("Cambio de pantalla", "2026-08-30", "1250.50");
        assert_eq!(p["costoReparacion"], 1250.5);
    }
}
