// Domain layer: data model and ports. Transport and storage live behind the traits in `ports`.

pub mod model;
pub mod ports;
