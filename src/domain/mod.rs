// Domain layer: core models, the distance calculation and the ports the adapters implement.

pub mod distance;
pub mod model;
pub mod ports;
