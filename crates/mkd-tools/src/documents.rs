//! Document operations: list, read, create, update, delete, search.

use mkd_meta::{Metadata, metadata_from_json, metadata_to_json};
use mkd_storage::{DocumentInfo, MARKDOWN_PATTERN, SearchResults, Searcher, Storage};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::toolbox::Toolbox;

/// Response for `list_docs`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Number of listed files.
    pub count: usize,
    /// Listed files, sorted by path.
    pub files: Vec<DocumentInfo>,
}

/// Response for `read_doc`.
#[derive(Debug, Serialize)]
pub struct ReadResponse {
    /// Path as requested.
    pub path: String,
    /// Frontmatter, empty when absent or malformed.
    pub frontmatter: Map<String, Value>,
    /// Body without the frontmatter block.
    pub content: String,
}

/// Response for `create_doc`, `update_doc` and `delete_doc`.
#[derive(Debug, Serialize)]
pub struct ChangeResponse {
    /// Always `true`; failures are reported as errors.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Path as requested.
    pub path: String,
}

impl ChangeResponse {
    fn new(verb: &str, path: &str) -> Self {
        Self {
            success: true,
            message: format!("{verb} file: {path}"),
            path: path.to_owned(),
        }
    }
}

fn caller_metadata(frontmatter: Option<&Map<String, Value>>) -> Result<Option<Metadata>, ToolError> {
    frontmatter
        .map(metadata_from_json)
        .transpose()
        .map_err(ToolError::from)
}

impl Toolbox {
    /// List documents matching `pattern` (default `**/*.md`).
    pub fn list_docs(&self, pattern: Option<&str>) -> Result<ListResponse, ToolError> {
        let pattern = pattern
            .filter(|p| !p.is_empty())
            .unwrap_or(MARKDOWN_PATTERN);
        let files = self.storage()?.list(pattern)?;
        Ok(ListResponse {
            count: files.len(),
            files,
        })
    }

    /// Read one document split into frontmatter and body.
    pub fn read_doc(&self, file_path: &str) -> Result<ReadResponse, ToolError> {
        let document = self.storage()?.read(file_path)?;
        Ok(ReadResponse {
            path: file_path.to_owned(),
            frontmatter: metadata_to_json(&document.metadata()),
            content: document.body,
        })
    }

    /// Create a new document. Fails if it already exists.
    pub fn create_doc(
        &self,
        file_path: &str,
        content: &str,
        frontmatter: Option<&Map<String, Value>>,
    ) -> Result<ChangeResponse, ToolError> {
        let storage = self.storage()?;
        let metadata = caller_metadata(frontmatter)?;
        storage.create(file_path, content, metadata.as_ref())?;
        Ok(ChangeResponse::new("Created", file_path))
    }

    /// Replace a document's body, and its frontmatter when one is supplied.
    ///
    /// Without `frontmatter` the existing block is kept; with it the block is
    /// replaced wholesale.
    pub fn update_doc(
        &self,
        file_path: &str,
        content: &str,
        frontmatter: Option<&Map<String, Value>>,
    ) -> Result<ChangeResponse, ToolError> {
        let storage = self.storage()?;
        let metadata = caller_metadata(frontmatter)?;
        storage.update(file_path, content, metadata.as_ref())?;
        Ok(ChangeResponse::new("Updated", file_path))
    }

    /// Remove a document.
    pub fn delete_doc(&self, file_path: &str) -> Result<ChangeResponse, ToolError> {
        self.storage()?.delete(file_path)?;
        Ok(ChangeResponse::new("Deleted", file_path))
    }

    /// Regex search over every Markdown body under the docs root.
    pub fn search_docs(&self, query: &str, case_sensitive: bool) -> Result<SearchResults, ToolError> {
        let storage = self.storage()?;
        let searcher = Searcher::new(query, case_sensitive)?;
        Ok(searcher.search(&storage)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mkd_config::DocsConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn toolbox() -> (tempfile::TempDir, Toolbox) {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs_dir = temp_dir.path().join("docs");
        fs::create_dir(&docs_dir).unwrap();
        let toolbox = Toolbox::new(DocsConfig::new(docs_dir, temp_dir.path().join("mkdocs.yml")));
        (temp_dir, toolbox)
    }

    fn docs_file(temp_dir: &tempfile::TempDir, path: &str) -> std::path::PathBuf {
        temp_dir.path().join("docs").join(path)
    }

    #[test]
    fn test_list_docs_default_and_empty_pattern() {
        let (temp_dir, toolbox) = toolbox();
        fs::write(docs_file(&temp_dir, "index.md"), "# Home").unwrap();

        let default = toolbox.list_docs(None).unwrap();
        let empty = toolbox.list_docs(Some("")).unwrap();

        assert_eq!(default.count, 1);
        assert_eq!(empty.count, 1);
        assert_eq!(default.files[0].title, "Home");
    }

    #[test]
    fn test_read_doc_payload() {
        let (temp_dir, toolbox) = toolbox();
        fs::write(
            docs_file(&temp_dir, "a.md"),
            "---\ntitle: A\ntags:\n  - x\n---\nBody\n",
        )
        .unwrap();

        let response = toolbox.read_doc("a.md").unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "path": "a.md",
                "frontmatter": {"title": "A", "tags": ["x"]},
                "content": "Body\n"
            })
        );
    }

    #[test]
    fn test_create_doc_message() {
        let (temp_dir, toolbox) = toolbox();

        let response = toolbox.create_doc("guide/new.md", "# New", None).unwrap();

        assert_eq!(response.message, "Created file: guide/new.md");
        assert_eq!(
            fs::read_to_string(docs_file(&temp_dir, "guide/new.md")).unwrap(),
            "# New"
        );
    }

    #[test]
    fn test_update_doc_replaces_frontmatter_wholesale() {
        let (temp_dir, toolbox) = toolbox();
        fs::write(docs_file(&temp_dir, "a.md"), "---\ntitle: Old\nauthor: Me\n---\nOld").unwrap();
        let frontmatter = json!({"title": "New"});

        toolbox
            .update_doc("a.md", "New", frontmatter.as_object())
            .unwrap();

        assert_eq!(
            fs::read_to_string(docs_file(&temp_dir, "a.md")).unwrap(),
            "---\ntitle: New\n---\nNew"
        );
    }

    #[test]
    fn test_delete_doc_twice() {
        let (temp_dir, toolbox) = toolbox();
        fs::write(docs_file(&temp_dir, "a.md"), "x").unwrap();

        assert_eq!(
            toolbox.delete_doc("a.md").unwrap().message,
            "Deleted file: a.md"
        );
        assert_eq!(
            toolbox.delete_doc("a.md").unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_search_docs_invalid_query() {
        let (_temp_dir, toolbox) = toolbox();

        assert_eq!(
            toolbox.search_docs("[", false).unwrap_err().kind,
            ErrorKind::InvalidQuery
        );
    }
}
