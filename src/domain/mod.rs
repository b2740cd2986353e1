// Domain layer: catalog models and the ports through which content is read.

pub mod model;
pub mod ports;
