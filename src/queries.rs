//! Hive query templates.
//!
//! Queries live as `.sql` files in the configured queries directory and are
//! rendered through Handlebars with keyword parameters before submission.

use std::fs;
use std::path::PathBuf;

use handlebars::Handlebars;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("failed to read query template '{filename}': {source}")]
    Read {
        filename: String,
        source: std::io::Error,
    },

    #[error("failed to render query template '{filename}': {source}")]
    Render {
        filename: String,
        source: Box<handlebars::RenderError>,
    },
}

/// Loads and renders parameterized Hive queries from a directory.
pub struct QueryLibrary {
    dir: PathBuf,
    handlebars: Handlebars<'static>,
}

impl QueryLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut handlebars = Handlebars::new();
        // Queries are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(false);
        Self {
            dir: dir.into(),
            handlebars,
        }
    }

    /// Read the named template and substitute `params` into it.
    pub fn render(&self, filename: &str, params: &Value) -> Result<String, QueryError> {
        let path = self.dir.join(filename);
        let template = fs::read_to_string(&path).map_err(|source| QueryError::Read {
            filename: filename.to_string(),
            source,
        })?;

        self.handlebars
            .render_template(&template, params)
            .map_err(|source| QueryError::Render {
                filename: filename.to_string(),
                source: Box::new(source),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn library_with(filename: &str, contents: &str) -> (TempDir, QueryLibrary) {
        let dir = TempDir::new().unwrap();
        let mut file = fs::File::create(dir.path().join(filename)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let library = QueryLibrary::new(dir.path());
        (dir, library)
    }

    #[test]
    fn test_render_substitutes_params() {
        let (_dir, library) = library_with(
            "show.sql",
            "USE {{database_name}};\nSHOW TABLES;",
        );
        let query = library
            .render("show.sql", &json!({"database_name": "retail"}))
            .unwrap();
        assert_eq!(query, "USE retail;\nSHOW TABLES;");
    }

    #[test]
    fn test_render_leaves_sql_quoting_alone() {
        let (_dir, library) = library_with(
            "loc.sql",
            "LOCATION '{{web_logs_s3_dir}}';",
        );
        let query = library
            .render("loc.sql", &json!({"web_logs_s3_dir": "s3://bucket/logs"}))
            .unwrap();
        // No HTML escaping of the slashes
        assert_eq!(query, "LOCATION 's3://bucket/logs';");
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        let library = QueryLibrary::new(dir.path());
        let err = library.render("nope.sql", &json!({})).unwrap_err();
        assert!(matches!(err, QueryError::Read { .. }));
    }

    #[test]
    fn test_unused_params_are_ignored() {
        let (_dir, library) = library_with("plain.sql", "SELECT 1;");
        let query = library
            .render("plain.sql", &json!({"database_name": "retail"}))
            .unwrap();
        assert_eq!(query, "SELECT 1;");
    }
}
