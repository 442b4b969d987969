use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One resource scheduled for migration.
///
/// `key` is the canonical identifier of the source resource (a public-facing
/// path or a URL) and must be unique across a run; it is what downstream
/// find-and-replace tooling matches on, so it must mirror the original
/// reference string verbatim. `source_locator` is the value handed to the
/// upload client (filesystem path or remote URL) and may equal `key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationItem {
    pub key: String,
    pub source_locator: String,
    pub target_folder: String,
    /// Provider-specific hints (filename preservation, uniqueness policy).
    /// Opaque to the engine; forwarded to the upload client as-is.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub upload_options: HashMap<String, serde_json::Value>,
}

impl MigrationItem {
    pub fn new(
        key: impl Into<String>,
        source_locator: impl Into<String>,
        target_folder: impl Into<String>,
    ) -> Self {
        MigrationItem {
            key: key.into(),
            source_locator: source_locator.into(),
            target_folder: target_folder.into(),
            upload_options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.upload_options.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_has_no_options() {
        let item = MigrationItem::new("/images/logo.png", "./public/images/logo.png", "services");
        assert_eq!(item.key, "/images/logo.png");
        assert_eq!(item.source_locator, "./public/images/logo.png");
        assert_eq!(item.target_folder, "services");
        assert!(item.upload_options.is_empty());
    }

    #[test]
    fn with_option_accumulates() {
        let item = MigrationItem::new("k", "l", "f")
            .with_option("use_filename", serde_json::json!(true))
            .with_option("unique_filename", serde_json::json!(false));
        assert_eq!(item.upload_options.len(), 2);
        assert_eq!(
            item.upload_options.get("use_filename"),
            Some(&serde_json::json!(true))
        );
    }

    #[test]
    fn options_omitted_from_json_when_empty() {
        let item = MigrationItem::new("k", "l", "f");
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("upload_options").is_none());
    }
}
