use std::path::Path;

use super::{tokenize, LoadError, LoadedDocument};

/// Load a plain text file.
pub fn load(path: &str) -> Result<LoadedDocument, LoadError> {
    let path_ref = Path::new(path);

    if !path_ref.exists() {
        return Err(LoadError::FileNotFound(path_ref.to_path_buf()));
    }

    let content = std::fs::read_to_string(path_ref)?;
    let tokens = tokenize(&content);
    if tokens.is_empty() {
        return Err(LoadError::EmptyDocument(path.to_string()));
    }

    Ok(LoadedDocument {
        tokens,
        source: format!("txt:{}", path_ref.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_text_load_tokenizes_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        fs::write(&path, "The quick brown fox\njumps over").unwrap();

        let doc = load(path.to_str().unwrap()).unwrap();
        assert_eq!(doc.tokens.len(), 6);
        assert_eq!(doc.tokens[0], "The");
        assert!(doc.source.starts_with("txt:"));
    }

    #[test]
    fn test_text_load_nonexistent_file() {
        let result = load("/nonexistent/path/notes.txt");
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_text_load_rejects_whitespace_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "   \n\t\n").unwrap();

        let result = load(path.to_str().unwrap());
        assert!(matches!(result, Err(LoadError::EmptyDocument(_))));
    }
}
