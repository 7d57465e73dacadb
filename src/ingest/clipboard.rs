use super::{tokenize, LoadError, LoadedDocument};

/// Read the system clipboard and tokenize its text content.
pub fn load() -> Result<LoadedDocument, LoadError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
    let text = clipboard
        .get_text()
        .map_err(|e| LoadError::Clipboard(e.to_string()))?;

    let tokens = tokenize(&text);
    if tokens.is_empty() {
        return Err(LoadError::EmptyDocument("clipboard".to_string()));
    }

    Ok(LoadedDocument {
        tokens,
        source: "clipboard".to_string(),
    })
}
