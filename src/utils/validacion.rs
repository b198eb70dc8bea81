// ============================================================================
// VALIDACION - Validadores locales de formularios
// ============================================================================

/// Mínimo de letras que debe contener el nombre de un producto.
pub const MIN_LETRAS_NOMBRE: usize = 3;

/// Cuenta letras (incluye acentos y ñ), ignorando dígitos y símbolos.
pub fn cuenta_letras(texto: &str) -> usize {
    texto.chars().filter(|c| c.is_alphabetic()).count()
}

/// Validador del nombre de producto: al menos 3 letras.
/// Bloquea el submit sin necesidad de ida al servidor.
pub fn nombre_producto_valido(nombre: &str) -> bool {
    cuenta_letras(nombre) >= MIN_LETRAS_NOMBRE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuenta_letras_incluye_acentos() {
        assert_eq!(cuenta_letras("ñandú"), 5);
        assert_eq!(cuenta_letras("R2-D2"), 2);
        assert_eq!(cuenta_letras("123 !!"), 0);
    }

    #[test]
    fn el_nombre_necesita_al_menos_tres_letras()  {
        assert!(nombre_producto_valido("Led"));
        assert!(nombre_producto_valido("Capacitor 10uF"));
        assert!(!nombre_producto_valido("XL"));
        assert!(!nombre_producto_valido("12345"));
        assert!(!nombre_producto_valido(""));
    }
}
