use crate::template::substitute::{RenderedItem, find_tag_end};

/// Fixed column count of the combined sheet.
pub const GRID_COLUMNS: usize = 5;

/// Spacing between cells, in user units.
pub const GRID_SPACING: u32 = 20;

/// Filename of the combined sheet artifact.
pub const GRID_FILENAME: &str = "encartes_grade_unica.svg";

/// Single vector document tiling all rendered items.
#[derive(Clone, Debug)]
pub struct GridArtifact {
    /// Output filename, [`GRID_FILENAME`].
    pub filename: String,
    /// Combined SVG markup.
    pub svg: String,
}

/// Tile all rendered items into one combined sheet.
///
/// Item `i` lands in cell `(i mod C, i / C)` with `C` = [`GRID_COLUMNS`].
/// Explicit `width`/`height` attributes are stripped from each item's root
/// element so the positioning transform governs placement. The sheet is
/// built from the rendered markup alone: rows whose raster composition
/// failed still appear here.
#[tracing::instrument(skip(items))]
pub fn assemble_grid(items: &[RenderedItem], item_width: u32, item_height: u32) -> GridArtifact {
    let cols = GRID_COLUMNS as u32;
    let rows = items.len().div_ceil(GRID_COLUMNS) as u32;
    let width = cols * item_width + (cols - 1) * GRID_SPACING;
    let height = rows * item_height + rows.saturating_sub(1) * GRID_SPACING;

    let mut svg = format!(
        r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">"#
    );
    for (i, item) in items.iter().enumerate() {
        let col = (i % GRID_COLUMNS) as u32;
        let row = (i / GRID_COLUMNS) as u32;
        let x = col * (item_width + GRID_SPACING);
        let y = row * (item_height + GRID_SPACING);

        svg.push_str(&format!(r#"<g transform="translate({x},{y})">"#));
        svg.push_str(&strip_root_size_attrs(&item.svg));
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");

    GridArtifact {
        filename: GRID_FILENAME.to_string(),
        svg,
    }
}

/// Remove `width` and `height` attributes from the root `<svg>` open tag,
/// leaving every other attribute (notably `viewBox`) in place.
fn strip_root_size_attrs(svg: &str) -> String {
    let Some(tag_start) = find_svg_open(svg) else {
        return svg.to_string();
    };
    let after_name = tag_start + "<svg".len();
    let Some(tag_end) = find_tag_end(svg, after_name) else {
        return svg.to_string();
    };

    let mut kept = String::new();
    for attr in iter_raw_attributes(&svg[after_name..tag_end]) {
        let name = attr.split('=').next().unwrap_or(attr);
        if name.eq_ignore_ascii_case("width") || name.eq_ignore_ascii_case("height") {
            continue;
        }
        kept.push(' ');
        kept.push_str(attr);
    }

    format!(
        "{}<svg{}>{}",
        &svg[..tag_start],
        kept,
        &svg[tag_end + 1..]
    )
}

/// Locate the first `<svg` open tag followed by a delimiter.
fn find_svg_open(svg: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = svg[from..].find("<svg") {
        let at = from + rel;
        let after = at + "<svg".len();
        match svg[after..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' => return Some(at),
            _ => from = after,
        }
    }
    None
}

/// Split an open tag's attribute region into raw `name="value"` slices.
fn iter_raw_attributes(attrs: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let bytes = attrs.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i] as char).is_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        let start = i;
        let mut quote: Option<u8> = None;
        while i < bytes.len() {
            let b = bytes[i];
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None if b == b'"' || b == b'\'' => quote = Some(b),
                None if (b as char).is_whitespace() => break,
                None => {}
            }
            i += 1;
        }
        let raw = attrs[start..i].trim_end_matches('/');
        if !raw.is_empty() {
            out.push(raw);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/sheet/grid.rs"]
mod tests;
