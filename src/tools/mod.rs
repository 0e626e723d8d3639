//! Tool surface: three query operations and two reference documents

pub mod catalog;
pub mod operations;
pub mod reference;

pub use catalog::{tool_specs, ParamSpec, ToolSpec};
pub use operations::{
    AlertQueryArgs, Bridge, MetaValuesArgs, SessionQueryArgs, ToolCallError, ToolOutput,
};
pub use reference::{reference_doc, ReferenceDoc, REFERENCE_DOCS};
