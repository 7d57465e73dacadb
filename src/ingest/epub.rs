use std::path::Path;

use super::{tokenize, LoadError, LoadedDocument};

/// Load an EPUB file: walk every chapter in spine order, strip the HTML
/// markup and tokenize what remains.
pub fn load(path: &str) -> Result<LoadedDocument, LoadError> {
    let path_ref = Path::new(path);

    if !path_ref.exists() {
        return Err(LoadError::FileNotFound(path_ref.to_path_buf()));
    }

    let mut doc =
        epub::doc::EpubDoc::new(path_ref).map_err(|e| LoadError::EpubParse(e.to_string()))?;

    let num_chapters = doc.get_num_chapters();
    if num_chapters == 0 {
        return Err(LoadError::EpubParse("No chapters found in EPUB".to_string()));
    }

    let mut content = String::new();
    for chapter_idx in 0..num_chapters {
        if !doc.set_current_chapter(chapter_idx) {
            continue;
        }
        if let Some((chapter_html, _mime)) = doc.get_current_str() {
            if !chapter_html.is_empty() {
                if !content.is_empty() {
                    content.push_str("\n\n");
                }
                content.push_str(&strip_markup(&chapter_html));
            }
        }
    }

    let tokens = tokenize(&content);
    if tokens.is_empty() {
        return Err(LoadError::EmptyDocument(path.to_string()));
    }

    Ok(LoadedDocument {
        tokens,
        source: format!("epub:{}", path_ref.display()),
    })
}

/// Drop everything between `<` and `>`, then squeeze blank lines.
fn strip_markup(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        if c == '<' {
            in_tag = true;
        } else if c == '>' {
            in_tag = false;
        } else if !in_tag {
            result.push(c);
        }
    }

    result
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
