use std::sync::mpsc::Sender;

use super::RunEvent;

/// Canal observador: el consumidor decide cómo presentar o persistir cada
/// evento. El runner nunca escribe a disco ni a pantalla por su cuenta.
pub trait EventSink: Send {
    /// Recibe un evento. Propiedad transferida; no hay retorno de error:
    /// un sink saturado o desconectado no detiene la corrida.
    fn on_event(&mut self, event: RunEvent);
}

/// Sink en memoria para tests y consumidores simples.
#[derive(Default)]
pub struct CollectSink {
    pub events: Vec<RunEvent>,
}

impl EventSink for CollectSink {
    fn on_event(&mut self, event: RunEvent) {
        self.events.push(event);
    }
}

/// Un extremo de canal estándar sirve directo como sink: permite a una UI
/// despachar la corrida a un worker y drenar eventos desde su propio hilo.
impl EventSink for Sender<RunEvent> {
    fn on_event(&mut self, event: RunEvent) {
        // Receptor desconectado: descartamos, la corrida no depende del observador.
        let _ = self.send(event);
    }
}
