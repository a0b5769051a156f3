// Domain layer: the verdict model and the ports (interfaces) the client depends on.

pub mod model;
pub mod ports;
