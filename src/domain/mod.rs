// Domain layer: LP and payroll data model plus ports (interfaces). No external dependencies beyond serde.

pub mod model;
pub mod payroll;
pub mod ports;
