// Adapters layer: concrete boundaries the action services render through.

pub mod memory;
pub mod terminal;
