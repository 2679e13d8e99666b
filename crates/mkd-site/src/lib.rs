//! Site configuration and navigation for mkdocs-mcp.
//!
//! This crate provides:
//! - [`SiteConfigFile`]: read and rewrite `mkdocs.yml`, touching only `nav`
//! - [`SiteConfig`]: parsed configuration with `site_name`, theme and `nav` accessors
//! - [`NavNode`]: typed view over the navigation tree
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mkd_site::{SiteConfigFile, outline};
//!
//! let file = SiteConfigFile::new("mkdocs.yml");
//! let config = file.load()?;
//! print!("{}", outline(&config.nav_tree()));
//! # Ok(())
//! # }
//! ```

mod nav;
mod site_config;

pub use nav::{NavNode, nav_tree, outline};
pub use site_config::{SiteConfig, SiteConfigFile, SiteError};
