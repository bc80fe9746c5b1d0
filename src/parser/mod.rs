pub mod hierarchy;
pub mod ifc;
pub mod schema;
pub mod step;

pub use crate::error::ParseError;
pub use ifc::open_ifc_file;
pub use schema::{SchemaGeneration, SchemaInfo};
pub use step::{StepEntity, StepFile, StepValue};
