use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub fn guardar<T: Serialize>(clave: &str, valor: &T) -> Result<(), String> {
    let storage = local_storage().ok_or("No se pudo acceder a localStorage")?;
    let json = serde_json::to_string(valor)
        .map_err(|e| format!("Error serializando datos: {}", e))?;
    storage
        .set_item(clave, &json)
        .map_err(|_| "Error guardando en localStorage".to_string())
}

pub fn cargar<T: DeserializeOwned>(clave: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(clave).ok()??;
    serde_json::from_str(&json).ok()
}

pub fn eliminar(clave: &str) -> Result<(), String> {
    let storage = local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .remove_item(clave)
        .map_err(|_| "Error eliminando de localStorage".to_string())
}

/// Purga todo el almacenamiento de la sesión (logout completo).
pub fn purgar_todo() {
    if let Some(storage) = local_storage() {
        let _ = storage.clear();
    }
    if let Some(session) = window().and_then(|w| w.session_storage().ok().flatten()) {
        let _ = session.clear();
    }
}
