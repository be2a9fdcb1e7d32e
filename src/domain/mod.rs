// Domain layer: waitlist models and the ports the flow depends on.

pub mod model;
pub mod ports;
