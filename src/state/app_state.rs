// ============================================================================
// APP STATE - Página actual
// ============================================================================

/// Página servida como HTML estático; el pathname decide qué vista se monta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagina {
    Login,
    Gerente,
    Tecnico,
    Clientes,
    MateriaPrima,
    Pedidos,
    TarjetasVenta,
    InventarioTecnico,
    ClientePedido,
    Estadisticas,
    Desconocida,
}

impl Pagina {
    /// El pathname puede venir con prefijos (file://, subcarpetas), así que
    /// se compara por inclusión del nombre de archivo.
    pub fn desde_ruta(pathname: &str) -> Self {
        if pathname.contains("HomeGerente.html") {
            Pagina::Gerente
        } else if pathname.contains("HomeTecnico.html") {
            Pagina::Tecnico
        } else if pathname.contains("ClientePedido.html") {
            Pagina::ClientePedido
        } else if pathname.contains("Clientes.html") {
            Pagina::Clientes
        } else if pathname.contains("MateriaPrima.html") {
            Pagina::MateriaPrima
        } else if pathname.contains("Pedidos.html") {
            Pagina::Pedidos
        } else if pathname.contains("TarjetasVenta.html") {
            Pagina::TarjetasVenta
        } else if pathname.contains("InventarioTecnico.html") {
            Pagina::InventarioTecnico
        } else if pathname.contains("Estadisticas.html") {
            Pagina::Estadisticas
        } else if pathname.contains("login.html")
            || pathname.contains("register.html")
            || pathname.contains("index.html")
            || pathname == "/"
        {
            Pagina::Login
        } else {
            Pagina::Desconocida
        }
    }

    /// Las páginas distintas del login requieren sesión activa.
    pub fn requiere_sesion(&self) -> bool {
        !matches!(self, Pagina::Login | Pagina::Desconocida)
    }
}

/// Página de inicio según el tipo de usuario.
pub fn pagina_inicio(tipo: &str) -> &'static str {
    if tipo.trim().eq_ignore_ascii_case("tecnico") {
        "HomeTecnico.html"
    } else {
        "HomeGerente.html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_pathname_se_resuelve_por_inclusion() {
        assert_eq!(
            Pagina::desde_ruta("/taller/HomeGerente.html"),
            Pagina::Gerente
        );
        assert_eq!(
            Pagina::desde_ruta("file:///C:/app/HomeTecnico.html"),
            Pagina::Tecnico
        );
        assert_eq!(Pagina::desde_ruta("/login.html"), Pagina::Login);
        assert_eq!(Pagina::desde_ruta("/"), Pagina::Login);
    }

    #[test]
    fn cliente_pedido_no_se_confunde_con_clientes_ni_pedidos() {
        assert_eq!(
            Pagina::desde_ruta("/ClientePedido.html?celular=5512345678"),
            Pagina::ClientePedido
        );
        assert_eq!(Pagina::desde_ruta("/Pedidos.html"), Pagina::Pedidos);
        assert_eq!(Pagina::desde_ruta("/Clientes.html"), Pagina::Clientes);
    }

    #[test]
    fn solo_el_login_no_requiere_sesion() {
        assert!(!Pagina::Login.requiere_sesion());
        assert!(Pagina::Gerente.requiere_sesion());
        assert!(Pagina::Estadisticas.requiere_sesion());
    }

    #[test]
    fn el_tipo_de_usuario_decide_la_pagina_de_inicio() {
        assert_eq!(pagina_inicio("tecnico"), "HomeTecnico.html");
        assert_eq!(pagina_inicio("Tecnico"), "HomeTecnico.html");
        assert_eq!(pagina_inicio("gerente"), "HomeGerente.html");
    }
}
