use crate::foundation::error::{EncarteError, EncarteResult};

/// Placeholder element ids every template must provide.
///
/// `codigo` receives the product code, `preco` the price, and the three
/// `descricao*` ids receive the wrapped product-name lines.
pub const REQUIRED_PLACEHOLDERS: [&str; 5] =
    ["codigo", "descricao", "descricao2", "descricao3", "preco"];

/// Check that a template contains a well-formed SVG document with every
/// required placeholder id.
///
/// Runs once per batch, before any row is processed. Failure is fatal to the
/// whole batch: the error message folds all missing ids into one
/// human-readable sentence.
#[tracing::instrument(skip(svg))]
pub fn validate_template(svg: &str) -> EncarteResult<()> {
    let doc = roxmltree::Document::parse(svg)
        .map_err(|e| EncarteError::template_invalid(format!("markup is not well-formed: {e}")))?;

    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(EncarteError::template_invalid(format!(
            "root element is <{}>, expected <svg>",
            root.tag_name().name()
        )));
    }

    let missing: Vec<&str> = REQUIRED_PLACEHOLDERS
        .iter()
        .copied()
        .filter(|id| {
            !doc.descendants()
                .any(|n| n.is_element() && n.attribute("id") == Some(*id))
        })
        .collect();

    if !missing.is_empty() {
        return Err(EncarteError::template_invalid(format!(
            "missing required placeholder ids: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/template/validate.rs"]
mod tests;
