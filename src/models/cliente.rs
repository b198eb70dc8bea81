use serde::{Deserialize, Serialize};

/// Cliente del taller. El número de celular es la llave natural:
/// el backend lo usa como identificador en `/clientes/{celular}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    #[serde(default)]
    pub id: Option<String>,
    pub nombre: String,
    #[serde(default)]
    pub apellidos: String,
    pub numero_celular: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub total_pedidos: Option<u32>,
}

impl Cliente {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellidos).trim().to_string()
    }

    /// Filtro local del buscador: nombre, apellidos o celular.
    pub fn coincide(&self, termino: &str) -> bool {
        let t = termino.to_lowercase();
        self.nombre.to_lowercase().contains(&t)
            || self.apellidos.to_lowercase().contains(&t)
            || self.numero_celular.contains(termino)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cliente(nombre: &str, apellidos: &str, celular: &str) -> Cliente {
        Cliente {
            id: Some("c-1".into()),
            nombre: nombre.into(),
            apellidos: apellidos.into(),
            numero_celular: celular.into(),
            email: None,
            total_pedidos: None,
        }
    }

    #[test]
    fn el_filtro_busca_en_nombre_apellidos_y_celular() {
        let c = cliente("María", "López", "5512345678");
        assert!(c.coincide("maría"));
        assert!(c.coincide("lóp"));
        assert!(c.coincide("1234"));
        assert!(!c.coincide("garcía"));
    }

    #[test]
    fn nombre_completo_sin_apellidos_no_deja_espacio_colgante() {
        let c = cliente("Juan", "", "5500000000");
        assert_eq!(c.nombre_completo(), "Juan");
    }
}
