//! CLI command implementations.

pub(crate) mod call;
pub(crate) mod nav;
pub(crate) mod project;
pub(crate) mod tools;

pub(crate) use call::CallArgs;
pub(crate) use nav::NavArgs;
pub(crate) use project::ProjectArgs;
pub(crate) use tools::ToolsArgs;
