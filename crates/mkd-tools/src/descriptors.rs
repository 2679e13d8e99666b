//! Tool descriptors advertised to the invocation runtime.

use serde::Serialize;
use serde_json::{Value, json};

/// Name, description and JSON input schema of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    /// Operation name accepted by [`crate::Toolbox::call`].
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// JSON Schema of the arguments object.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Descriptors of every operation, in a stable order.
#[must_use]
pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "list_docs",
            description: "List all markdown documentation files in the MkDocs project",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pattern": {
                        "type": "string",
                        "description": "Optional glob pattern to filter files (e.g., \"api/**/*.md\")"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "read_doc",
            description: "Read the content of a specific documentation file",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Relative path to the file (e.g., \"getting-started/installation.md\")"
                    }
                },
                "required": ["file_path"]
            }),
        },
        ToolDescriptor {
            name: "create_doc",
            description: "Create a new documentation file with content",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Relative path for the new file (e.g., \"api/new-endpoint.md\")"
                    },
                    "content": {
                        "type": "string",
                        "description": "Markdown content for the file"
                    },
                    "frontmatter": {
                        "type": "object",
                        "description": "Optional YAML frontmatter metadata"
                    }
                },
                "required": ["file_path", "content"]
            }),
        },
        ToolDescriptor {
            name: "update_doc",
            description: "Update the content of an existing documentation file",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Relative path to the file to update"
                    },
                    "content": {
                        "type": "string",
                        "description": "New markdown content"
                    },
                    "frontmatter": {
                        "type": "object",
                        "description": "Optional YAML frontmatter metadata; replaces the existing block when given"
                    }
                },
                "required": ["file_path", "content"]
            }),
        },
        ToolDescriptor {
            name: "delete_doc",
            description: "Delete a documentation file",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Relative path to the file to delete"
                    }
                },
                "required": ["file_path"]
            }),
        },
        ToolDescriptor {
            name: "search_docs",
            description: "Search for content across all documentation files",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (supports regex)"
                    },
                    "case_sensitive": {
                        "type": "boolean",
                        "description": "Whether search should be case-sensitive (default: false)"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDescriptor {
            name: "get_navigation",
            description: "Get the current navigation structure from mkdocs.yml",
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDescriptor {
            name: "update_navigation",
            description: "Update the navigation structure in mkdocs.yml",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "navigation": {
                        "type": "array",
                        "description": "New navigation structure array"
                    }
                },
                "required": ["navigation"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_names_are_unique_and_ordered() {
        let names: Vec<_> = descriptors().iter().map(|d| d.name).collect();

        assert_eq!(
            names,
            vec![
                "list_docs",
                "read_doc",
                "create_doc",
                "update_doc",
                "delete_doc",
                "search_docs",
                "get_navigation",
                "update_navigation",
            ]
        );
    }

    #[test]
    fn test_required_fields_are_declared_properties() {
        for descriptor in descriptors() {
            let properties = descriptor.input_schema["properties"]
                .as_object()
                .unwrap();
            let required = descriptor.input_schema["required"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            for field in required {
                let field = field.as_str().unwrap();
                assert!(
                    properties.contains_key(field),
                    "{}: {field} not in properties",
                    descriptor.name
                );
            }
        }
    }

    #[test]
    fn test_serializes_input_schema_key() {
        let json = serde_json::to_value(&descriptors()[0]).unwrap();

        assert!(json.get("inputSchema").is_some());
        assert!(json.get("input_schema").is_none());
    }
}
