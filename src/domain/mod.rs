// Domain layer: favorites model, the storage port and the service on top of it.
// Nothing here knows about HTTP or a concrete backend.

pub mod model;
pub mod ports;

pub mod services;
