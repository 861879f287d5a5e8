use crate::{
    foundation::error::{EncarteError, EncarteResult},
    foundation::text::{escape_xml_text, normalize},
    template::wrap::{DESCRIPTION_LINE_CHARS, DESCRIPTION_LINES, wrap_lines},
};

/// One row's template with placeholders filled, prior to rasterization.
#[derive(Clone, Debug)]
pub struct RenderedItem {
    /// Zero-based index of the source row.
    pub row_index: usize,
    /// Normalized filename stem, `encarte_<code>_<name>`.
    pub stem: String,
    /// Filled SVG markup.
    pub svg: String,
}

/// Fill one row's values into a copy of the template.
///
/// The `codigo` placeholder receives the code prefixed with `COD.`, `preco`
/// receives the price prefixed with `R$ `, and the three description
/// placeholders receive the wrapped name lines (3 lines, 18 chars). Only the
/// first `<text>` element carrying each id is touched, and only its text
/// content; attributes and surrounding markup are preserved byte for byte.
///
/// A required placeholder absent from the template is a hard
/// [`EncarteError::TemplateInvalid`]: validation guarantees presence, so a
/// miss here means the template changed underneath the batch.
pub fn fill_template(
    template: &str,
    row_index: usize,
    code: &str,
    name: &str,
    price: &str,
) -> EncarteResult<RenderedItem> {
    let lines = wrap_lines(name, DESCRIPTION_LINES, DESCRIPTION_LINE_CHARS);

    let mut svg = replace_text_content(template, "codigo", &format!("COD.{code}"))?;
    svg = replace_text_content(&svg, "preco", &format!("R$ {price}"))?;
    svg = replace_text_content(&svg, "descricao", &lines[0])?;
    svg = replace_text_content(&svg, "descricao2", &lines[1])?;
    svg = replace_text_content(&svg, "descricao3", &lines[2])?;

    Ok(RenderedItem {
        row_index,
        stem: format!("encarte_{}_{}", normalize(code), normalize(name)),
        svg,
    })
}

/// Replace the text content of the first `<text>` element whose `id`
/// attribute equals `id`. The value is XML-escaped.
fn replace_text_content(svg: &str, id: &str, value: &str) -> EncarteResult<String> {
    let (content_start, content_end) = find_text_content(svg, id).ok_or_else(|| {
        EncarteError::template_invalid(format!("placeholder id \"{id}\" not found in template"))
    })?;

    let mut out = String::with_capacity(svg.len() + value.len());
    out.push_str(&svg[..content_start]);
    out.push_str(&escape_xml_text(value));
    out.push_str(&svg[content_end..]);
    Ok(out)
}

/// Locate the content byte range of the first `<text>` element carrying the
/// given id. Returns `None` when no such element exists or the element is
/// self-closing.
fn find_text_content(svg: &str, id: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;
    while let Some(rel) = svg[search_from..].find("<text") {
        let tag_start = search_from + rel;
        let after_name = tag_start + "<text".len();
        search_from = after_name;

        // "<textPath" and friends share the prefix; require a delimiter.
        match svg[after_name..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => {}
            _ => continue,
        }

        let tag_end = find_tag_end(svg, after_name)?;
        let attrs = &svg[after_name..tag_end];
        if !has_id_attribute(attrs, id) {
            continue;
        }
        if attrs.trim_end().ends_with('/') {
            // Self-closing: no text content to replace.
            return None;
        }

        let content_start = tag_end + 1;
        let close = svg[content_start..].find("</text>")?;
        return Some((content_start, content_start + close));
    }
    None
}

/// Find the byte index of the `>` closing an open tag, skipping quoted
/// attribute values.
pub(crate) fn find_tag_end(svg: &str, from: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in svg[from..].char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(from + i),
            _ => {}
        }
    }
    None
}

/// Whether an attribute string contains `id="<id>"` (either quote style).
fn has_id_attribute(attrs: &str, id: &str) -> bool {
    for quote in ['"', '\''] {
        let needle = format!("id={quote}{id}{quote}");
        let mut from = 0;
        while let Some(rel) = attrs[from..].find(&needle) {
            let at = from + rel;
            // Must be the `id` attribute itself, not a suffix like `data-id`.
            let boundary = attrs[..at]
                .chars()
                .next_back()
                .is_none_or(|c| c.is_whitespace());
            if boundary {
                return true;
            }
            from = at + needle.len();
        }
    }
    false
}

#[cfg(test)]
#[path = "../../tests/unit/template/substitute.rs"]
mod tests;
