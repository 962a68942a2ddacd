// Domain layer: the Model/Export contracts and the field collector models fill in.

pub mod fields;
pub mod ports;
