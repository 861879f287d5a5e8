/// Normalize a value for use in artifact filenames.
///
/// Lowercases, folds Latin diacritics to their ASCII base letter, drops
/// characters that are not ASCII alphanumerics or `_`, and collapses runs of
/// whitespace into a single space. The result carries no leading or trailing
/// whitespace.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.chars().flat_map(char::to_lowercase) {
        let folded = fold_diacritic(c);
        if folded.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if !folded.is_ascii_alphanumeric() && folded != '_' {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(folded);
    }

    out
}

/// Map a lowercase Latin letter with a diacritic to its base letter.
///
/// Covers the Latin-1 range plus a few common extensions; anything else is
/// returned unchanged (and filtered later if not ASCII alphanumeric).
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' => 's',
        'ž' => 'z',
        _ => c,
    }
}

/// Escape a value for use as XML text content.
pub fn escape_xml_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/text.rs"]
mod tests;
