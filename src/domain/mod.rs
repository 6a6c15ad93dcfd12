// Domain layer: form/result models and ports (prediction service, view).

pub mod model;
pub mod ports;
