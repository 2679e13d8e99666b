//! Navigation operations over the site configuration.

use mkd_meta::{json_to_yaml, yaml_to_json};
use mkd_site::NavNode;
use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;
use crate::toolbox::Toolbox;

/// Response for `get_navigation`.
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    /// `site_name`, if set.
    pub site_name: Option<String>,
    /// Raw navigation tree, `[]` when absent.
    pub nav: Value,
    /// Theme name, if set.
    pub theme: Option<String>,
}

/// Response for `update_navigation`.
#[derive(Debug, Serialize)]
pub struct NavigationUpdateResponse {
    /// Always `true`; failures are reported as errors.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
}

impl Toolbox {
    /// Site name, navigation tree and theme from the site configuration.
    pub fn get_navigation(&self) -> Result<NavigationResponse, ToolError> {
        let config = self.site_config()?.load()?;
        Ok(NavigationResponse {
            site_name: config.site_name(),
            nav: yaml_to_json(&config.nav()),
            theme: config.theme_name(),
        })
    }

    /// Replace the navigation tree, leaving every other key untouched.
    pub fn update_navigation(&self, navigation: &Value) -> Result<NavigationUpdateResponse, ToolError> {
        let file = self.site_config()?;
        file.update_navigation(json_to_yaml(navigation)?)?;
        Ok(NavigationUpdateResponse {
            success: true,
            message: format!("Navigation updated in {}", file.file_name()),
        })
    }

    /// Typed navigation tree.
    pub fn navigation_tree(&self) -> Result<Vec<NavNode>, ToolError> {
        Ok(self.site_config()?.load()?.nav_tree())
    }
}
