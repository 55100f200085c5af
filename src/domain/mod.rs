// Domain layer: request-scoped models and the ports the action services are wired through.

pub mod model;
pub mod ports;
