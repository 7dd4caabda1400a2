//! Handle de mapa de instancia única
//!
//! Solo puede haber un mapa vivo a la vez. Crear uno nuevo libera antes el
//! anterior, y soltar el handle libera el que quede.

use tracing::debug;

use super::scene::{MapFactory, MapSurface};

pub struct MapHandle {
    factory: Box<dyn MapFactory>,
    current: Option<Box<dyn MapSurface>>,
}

impl MapHandle {
    pub fn new(factory: Box<dyn MapFactory>) -> Self {
        Self {
            factory,
            current: None,
        }
    }

    /// Libera el mapa actual (si hay) y crea uno nuevo sobre `container`
    pub fn replace(&mut self, container: &str) -> &mut dyn MapSurface {
        self.dispose();
        debug!("🗺️ Creando mapa en '{}'", container);
        let surface = self.factory.create(container);
        &mut **self.current.insert(surface)
    }

    pub fn dispose(&mut self) {
        if let Some(mut surface) = self.current.take() {
            debug!("🧹 Liberando mapa anterior");
            surface.remove();
        }
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }
}

impl Drop for MapHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
