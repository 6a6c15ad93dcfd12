pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{form_file::FormFile, CliConfig, Submission};

pub use adapters::{memory_view::MemoryDocument, terminal_view::TerminalView};
pub use core::client::{HttpPredictionClient, DEFAULT_ENDPOINT};
pub use core::handler::{FormSubmissionHandler, SubmitOutcome};
pub use domain::model::{FormFields, Payload, PredictionResult};
pub use domain::ports::{ElementId, FormView, PredictionService};
pub use utils::error::{FormError, Result};
