//! Named documentation operations for mkdocs-mcp.
//!
//! This crate provides:
//! - [`Toolbox`]: the eight operations (`list_docs`, `read_doc`, `create_doc`,
//!   `update_doc`, `delete_doc`, `search_docs`, `get_navigation`,
//!   `update_navigation`) as typed methods and through [`Toolbox::call`]
//! - [`ToolOutcome`]: tagged result rendered as a JSON payload
//! - [`descriptors`]: names, descriptions and input schemas
//!
//! # Quick Start
//!
//! ```no_run
//! use mkd_config::Config;
//! use mkd_tools::Toolbox;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None, None)?;
//! let toolbox = Toolbox::from_config(&config);
//!
//! let payload = toolbox
//!     .call("search_docs", json!({"query": "install"}))
//!     .into_payload();
//! println!("{payload}");
//! # Ok(())
//! # }
//! ```

mod descriptors;
mod documents;
mod error;
mod navigation;
mod outcome;
mod toolbox;

pub use descriptors::{ToolDescriptor, descriptors};
pub use documents::{ChangeResponse, ListResponse, ReadResponse};
pub use error::{ErrorKind, ToolError};
pub use navigation::{NavigationResponse, NavigationUpdateResponse};
pub use outcome::ToolOutcome;
pub use toolbox::Toolbox;
