// Domain layer: participant records, round outcomes and the ports the draw model talks through.

pub mod model;
pub mod ports;
