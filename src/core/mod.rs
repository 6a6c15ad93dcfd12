pub mod client;
pub mod handler;

pub use crate::domain::model::{FormFields, Payload, PredictionResult};
pub use crate::domain::ports::{ElementId, FormView, PredictionService, MODAL_VISIBLE_CLASS};
pub use crate::utils::error::Result;
