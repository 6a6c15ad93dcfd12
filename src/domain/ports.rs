use crate::domain::model::{Payload, PredictionResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Class that makes the prediction modal visible.
pub const MODAL_VISIBLE_CLASS: &str = "show";

/// Element ids the form handler reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    ForecastForm,
    PredictionModal,
    CloseModal,
    PredictedDemand,
    Eoq,
    Rol,
    EoqInstruction,
    RolInstruction,
}

impl ElementId {
    pub const ALL: [ElementId; 8] = [
        ElementId::ForecastForm,
        ElementId::PredictionModal,
        ElementId::CloseModal,
        ElementId::PredictedDemand,
        ElementId::Eoq,
        ElementId::Rol,
        ElementId::EoqInstruction,
        ElementId::RolInstruction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::ForecastForm => "forecastForm",
            ElementId::PredictionModal => "predictionModal",
            ElementId::CloseModal => "closeModal",
            ElementId::PredictedDemand => "predictedDemand",
            ElementId::Eoq => "eoq",
            ElementId::Rol => "rol",
            ElementId::EoqInstruction => "eoqInstruction",
            ElementId::RolInstruction => "rolInstruction",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound call to the prediction service.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, payload: &Payload) -> Result<PredictionResult>;
}

/// The page the handler renders into. Lookups of absent elements fail with
/// `FormError::MissingElement`.
pub trait FormView {
    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()>;
    fn add_class(&mut self, id: ElementId, class: &str) -> Result<()>;
    fn remove_class(&mut self, id: ElementId, class: &str) -> Result<()>;
    fn has_class(&self, id: ElementId, class: &str) -> Result<bool>;
    fn alert(&mut self, message: &str);
}
