use serde::{Deserialize, Serialize};

/// Marca de equipo. Se resuelve por nombre (sin distinguir mayúsculas)
/// durante el alta de una tarjeta; si no existe, se crea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marca {
    pub id: String,
    pub nombre_marca: String,
}

/// Busca una marca por nombre sin distinguir mayúsculas/minúsculas.
/// Evita duplicar "Samsung" cuando ya existe "samsung".
pub fn buscar_marca<'a>(marcas: &'a [Marca], nombre: &str) -> Option<&'a Marca> {
    let buscado = nombre.trim().to_lowercase();
    marcas
        .iter()
        .find(|m| m.nombre_marca.to_lowercase() == buscado)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marcas() -> Vec<Marca> {
        vec![
            Marca { id: "m1".into(), nombre_marca: "samsung".into() },
            Marca { id: "m2".into(), nombre_marca: "LG".into() },
        ]
    }

    #[test]
    fn la_resolucion_de_marca_no_distingue_mayusculas() {
        let lista = marcas();
        assert_eq!(buscar_marca(&lista, "Samsung").unwrap().id, "m1");
        assert_eq!(buscar_marca(&lista, "SAMSUNG").unwrap().id, "m1");
        assert_eq!(buscar_marca(&lista, "lg").unwrap().id, "m2");
    }

    #[test]
    fn la_resolucion_ignora_espacios_alrededor() {
        let lista = marcas();
        assert_eq!(buscar_marca(&lista, "  samsung ").unwrap().id, "m1");
    }

    #[test]
    fn marca_inexistente_devuelve_none() {
        assert!(buscar_marca(&marcas(), "Sony").is_none());
    }
}
