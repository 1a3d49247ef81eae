// Domain layer: reference records, units and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod reference;
pub mod units;
