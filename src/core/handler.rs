use crate::core::{
    ElementId, FormFields, FormView, PredictionResult, PredictionService, Result,
    MODAL_VISIBLE_CLASS,
};
use crate::domain::model::{EOQ_KEY, PREDICTED_DEMAND_KEY, ROL_KEY};
use crate::utils::error::ErrorSeverity;
use std::sync::atomic::{AtomicBool, Ordering};

pub const ALERT_PREFIX: &str = "❌ Error fetching prediction: ";

/// Result element and the response key written into it, in render order.
const RESULT_BINDINGS: [(ElementId, &str); 5] = [
    (ElementId::PredictedDemand, PREDICTED_DEMAND_KEY),
    (ElementId::Eoq, EOQ_KEY),
    (ElementId::Rol, ROL_KEY),
    (ElementId::EoqInstruction, EOQ_KEY),
    (ElementId::RolInstruction, ROL_KEY),
];

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Results rendered and the modal made visible.
    Shown(PredictionResult),
    /// The submission failed; `message` is the alert text shown to the user.
    Alerted {
        message: String,
        severity: ErrorSeverity,
    },
    /// Another submission was still in flight.
    Ignored,
}

pub struct FormSubmissionHandler<S: PredictionService> {
    service: S,
    in_flight: AtomicBool,
}

/// 提交結束時（包含錯誤路徑）釋放旗標
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: PredictionService> FormSubmissionHandler<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handles one form submission: coerce, post, render. Failures never
    /// propagate; they end up in a single alert on the view.
    pub async fn submit<V: FormView>(&self, form: &FormFields, view: &mut V) -> SubmitOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Submission ignored: a prediction request is already in flight");
            return SubmitOutcome::Ignored;
        }
        let _guard = InFlightGuard(&self.in_flight);

        tracing::info!("📨 Submitting forecast form ({} fields)", form.len());

        match self.request_and_render(form, view).await {
            Ok(result) => {
                tracing::info!(
                    "✅ Prediction shown: demand={}, EOQ={}, ROL={}",
                    result.text(PREDICTED_DEMAND_KEY),
                    result.text(EOQ_KEY),
                    result.text(ROL_KEY)
                );
                SubmitOutcome::Shown(result)
            }
            Err(e) => {
                tracing::error!("❌ Prediction failed: {} (Category: {:?})", e, e.category());
                let message = format!("{}{}", ALERT_PREFIX, e);
                view.alert(&message);
                SubmitOutcome::Alerted {
                    message,
                    severity: e.severity(),
                }
            }
        }
    }

    async fn request_and_render<V: FormView>(
        &self,
        form: &FormFields,
        view: &mut V,
    ) -> Result<PredictionResult> {
        let payload = form.to_payload();
        tracing::debug!("Request payload: {}", serde_json::to_string(&payload)?);

        let result = self.service.predict(&payload).await?;

        for (id, key) in RESULT_BINDINGS {
            view.set_text(id, &result.text(key))?;
        }
        view.add_class(ElementId::PredictionModal, MODAL_VISIBLE_CLASS)?;

        Ok(result)
    }

    /// Close button: hides the modal. No-op when already hidden.
    pub fn close<V: FormView>(&self, view: &mut V) -> Result<()> {
        if !view.has_class(ElementId::PredictionModal, MODAL_VISIBLE_CLASS)? {
            tracing::debug!("Prediction modal already hidden");
            return Ok(());
        }
        view.remove_class(ElementId::PredictionModal, MODAL_VISIBLE_CLASS)
    }
}
