use sha2::{Digest, Sha256};

/// Deterministic name for a local CSV copy: `{stem}--{short_hash(content)}.csv`.
///
/// Identical documents map to the same file, so repeated submissions of the
/// same form do not pile up copies.
pub fn csv_copy_filename(stem: &str, content: &[u8]) -> String {
    let stem = sanitize_stem(stem);
    let hash = short_hash(content);
    format!("{stem}--{hash}.csv")
}

fn sanitize_stem(input: &str) -> String {
    let stem = input
        .rsplit_once('.')
        .filter(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
        .map(|(stem, _)| stem)
        .unwrap_or(input);

    let mut cleaned = String::with_capacity(stem.len());
    let mut prev_underscore = false;
    for c in stem.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        cleaned.push(c);
    }
    let mut cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "document".to_string();
    }
    if cleaned.chars().count() > 60 {
        cleaned = cleaned.chars().take(60).collect();
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn short_hash(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_content_same_name() {
        let a = csv_copy_filename("document.csv", b"a,b\n\"1\",\"2\"\n");
        let b = csv_copy_filename("document.csv", b"a,b\n\"1\",\"2\"\n");
        assert_eq!(a, b);
        assert!(a.starts_with("document--"));
        assert!(a.ends_with(".csv"));
        assert_ne!(a, csv_copy_filename("document.csv", b"other"));
    }

    #[test]
    fn unsafe_characters_are_replaced() {
        let name = csv_copy_filename("../we:ird??name.CSV", b"x");
        assert!(name.starts_with("we_ird_name--"), "{name}");
        assert_eq!(csv_copy_filename("", b"x").split("--").next(), Some("document"));
    }
}
