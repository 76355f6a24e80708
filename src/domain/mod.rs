// Domain layer: reports and the two seams (byte sources and processors).

pub mod model;
pub mod ports;
