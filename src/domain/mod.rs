// Domain layer: value types and ports. No I/O.

pub mod model;
pub mod ports;
