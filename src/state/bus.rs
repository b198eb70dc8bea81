// ============================================================================
// DATA BUS - Pub/sub tipado entre vistas y modales
// ============================================================================
// Cuando un modal guarda con éxito, publica las colecciones afectadas y solo
// las vistas suscritas a esas colecciones se refrescan. Sustituye al patrón
// de un único evento global que obligaba a recargar todo.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coleccion {
    Clientes,
    Productos,
    Marcas,
    Tarjetas,
    Servicios,
    Finalizados,
}

struct Suscriptor {
    colecciones: Vec<Coleccion>,
    callback: Rc<dyn Fn(Coleccion)>,
}

thread_local! {
    static BUS: RefCell<Vec<Suscriptor>> = RefCell::new(Vec::new());
}

/// Registra un callback para un conjunto de colecciones. Los suscriptores
/// viven lo que vive la página; no hay desuscripción.
pub fn suscribir<F>(colecciones: &[Coleccion], callback: F)
where
    F: Fn(Coleccion) + 'static,
{
    BUS.with(|bus| {
        bus.borrow_mut().push(Suscriptor {
            colecciones: colecciones.to_vec(),
            callback: Rc::new(callback),
        });
    });
}

/// Notifica a los suscriptores interesados en `coleccion`.
pub fn publicar(coleccion: Coleccion) {
    log::debug!("📣 Publicando cambio en {:?}", coleccion);
    // Clonamos los callbacks antes de invocarlos para que un callback pueda
    // suscribir o publicar sin romper el borrow del bus.
    let interesados: Vec<Rc<dyn Fn(Coleccion)>> = BUS.with(|bus| {
        bus.borrow()
            .iter()
            .filter(|s| s.colecciones.contains(&coleccion))
            .map(|s| s.callback.clone())
            .collect()
    });
    for callback in interesados {
        callback(coleccion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn solo_se_notifica_a_los_suscriptores_interesados() {
        let clientes = Rc::new(Cell::new(0));
        let productos = Rc::new(Cell::new(0));

        let c = clientes.clone();
        suscribir(&[Coleccion::Clientes], move |_| c.set(c.get() + 1));
        let p = productos.clone();
        suscribir(&[Coleccion::Productos, Coleccion::Servicios], move |_| {
            p.set(p.get() + 1)
        });

        publicar(Coleccion::Clientes);
        assert_eq!(clientes.get(), 1);
        assert_eq!(productos.get(), 0);

        publicar(Coleccion::Servicios);
        publicar(Coleccion::Productos);
        assert_eq!(clientes.get(), 1);
        assert_eq!(productos.get(), 2);
    }

    #[test]
    fn un_callback_puede_publicar_sin_panico() {
        let toques = Rc::new(Cell::new(0));
        let t = toques.clone();
        suscribir(&[Coleccion::Marcas], move |_| {
            t.set(t.get() + 1);
            if t.get() == 1 {
                publicar(Coleccion::Finalizados);
            }
        });
        publicar(Coleccion::Marcas);
        assert_eq!(toques.get(), 1);
    }
}
