use crate::adapters::memory_view::MemoryDocument;
use crate::core::{ElementId, FormView, Result, MODAL_VISIBLE_CLASS};
use std::io::Write;

/// Prints the prediction modal to `out` when it becomes visible, and alerts
/// to `err`. Element state is kept in a standard in-memory page.
pub struct TerminalView<O: Write, E: Write> {
    page: MemoryDocument,
    out: O,
    err: E,
}

impl TerminalView<std::io::Stdout, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<O: Write, E: Write> TerminalView<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            page: MemoryDocument::standard(),
            out,
            err,
        }
    }

    pub fn page(&self) -> &MemoryDocument {
        &self.page
    }

    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }

    fn render_modal(&mut self) -> Result<()> {
        let text = |id: ElementId| self.page.text(id).unwrap_or_default().to_string();
        let demand = text(ElementId::PredictedDemand);
        let eoq = text(ElementId::Eoq);
        let rol = text(ElementId::Rol);
        let eoq_instruction = text(ElementId::EoqInstruction);
        let rol_instruction = text(ElementId::RolInstruction);

        writeln!(self.out, "📈 Prediction Result")?;
        writeln!(self.out, "  Predicted demand : {}", demand)?;
        writeln!(self.out, "  EOQ              : {}", eoq)?;
        writeln!(self.out, "  ROL              : {}", rol)?;
        writeln!(
            self.out,
            "  💡 Order {} units each time; reorder when stock falls to {} units.",
            eoq_instruction, rol_instruction
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl<O: Write, E: Write> FormView for TerminalView<O, E> {
    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        self.page.set_text(id, text)
    }

    fn add_class(&mut self, id: ElementId, class: &str) -> Result<()> {
        let showing_modal = id == ElementId::PredictionModal
            && class == MODAL_VISIBLE_CLASS
            && !self.page.has_class(id, class)?;
        // 輸出成功後才標記為可見
        if showing_modal {
            self.render_modal()?;
        }
        self.page.add_class(id, class)
    }

    fn remove_class(&mut self, id: ElementId, class: &str) -> Result<()> {
        self.page.remove_class(id, class)
    }

    fn has_class(&self, id: ElementId, class: &str) -> Result<bool> {
        self.page.has_class(id, class)
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.err, "{}", message) {
            tracing::warn!("Failed to write alert: {}", e);
        }
        self.page.alert(message);
    }
}
