//! Selección guionada: respuestas prefijadas para pruebas y demos.

use std::collections::VecDeque;

use bim_core::{SelectionError, SelectionProvider};
use bim_domain::ElementId;

/// Respuesta que el guion entrega ante el próximo prompt.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    One(ElementId),
    Many(Vec<ElementId>),
    Choice(Vec<String>),
    Cancel,
}

/// Proveedor de selección que responde desde un guion.
///
/// Cada prompt consume la siguiente respuesta; un guion agotado equivale a
/// cancelar. Una respuesta cuyo tipo no coincide con el prompt es un bug
/// del arnés de prueba y produce panic con el prompt ofendido.
pub struct ScriptedSelection {
    replies: VecDeque<ScriptedReply>,
    prompts: Vec<String>,
}

impl ScriptedSelection {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        ScriptedSelection {
            replies: replies.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Guion vacío: todo prompt se responde con cancelación.
    pub fn cancelling() -> Self {
        Self::new([])
    }

    /// Prompts vistos hasta ahora, en orden. Para verificar el recorrido
    /// exacto que hizo un flujo.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    fn next(&mut self, prompt: &str) -> Option<ScriptedReply> {
        self.prompts.push(prompt.to_string());
        self.replies.pop_front()
    }
}

impl SelectionProvider for ScriptedSelection {
    fn pick_one(&mut self, prompt: &str) -> Result<ElementId, SelectionError> {
        match self.next(prompt) {
            Some(ScriptedReply::One(id)) => Ok(id),
            Some(ScriptedReply::Cancel) | None => Err(SelectionError::Cancelled),
            Some(other) => panic!("guion desalineado en '{prompt}': {other:?}"),
        }
    }

    fn pick_many(&mut self, prompt: &str) -> Result<Vec<ElementId>, SelectionError> {
        match self.next(prompt) {
            Some(ScriptedReply::Many(ids)) => Ok(ids),
            Some(ScriptedReply::Cancel) | None => Err(SelectionError::Cancelled),
            Some(other) => panic!("guion desalineado en '{prompt}': {other:?}"),
        }
    }

    fn choose(
        &mut self,
        prompt: &str,
        options: &[String],
        multi: bool,
    ) -> Result<Vec<String>, SelectionError> {
        match self.next(prompt) {
            Some(ScriptedReply::Choice(mut picked)) => {
                // Igual que un diálogo real: sólo valen las opciones ofrecidas.
                picked.retain(|p| options.contains(p));
                if !multi {
                    picked.truncate(1);
                }
                Ok(picked)
            }
            Some(ScriptedReply::Cancel) | None => Err(SelectionError::Cancelled),
            Some(other) => panic!("guion desalineado en '{prompt}': {other:?}"),
        }
    }
}
