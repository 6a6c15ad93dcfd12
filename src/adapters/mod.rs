// Adapters layer: concrete views the form handler renders into.

pub mod memory_view;
pub mod terminal_view;
