use serde::{Deserialize, Serialize};

/// Técnico asignable a una tarjeta (`GET /users/tecnicos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tecnico {
    pub id: String,
    pub nombre: String,
}
