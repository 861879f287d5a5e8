use super::*;

fn items(n: usize) -> Vec<RenderedItem> {
    (0..n)
        .map(|i| RenderedItem {
            row_index: i,
            stem: format!("encarte_{i}_x"),
            svg: format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="1080" height="1080" viewBox="0 0 1080 1080"><text id="codigo">COD.{i}</text></svg>"#
            ),
        })
        .collect()
}

#[test]
fn twelve_items_make_three_grid_rows() {
    let grid = assemble_grid(&items(12), 1080, 1080);
    assert_eq!(grid.filename, GRID_FILENAME);

    // 5 columns, 3 rows, 20-unit spacing.
    let width = 5 * 1080 + 4 * 20;
    let height = 3 * 1080 + 2 * 20;
    assert!(grid.svg.starts_with(&format!(
        r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">"#
    )));
    assert_eq!(grid.svg.matches("<g transform=\"translate(").count(), 12);
}

#[test]
fn item_lands_in_cell_index_mod_columns() {
    let grid = assemble_grid(&items(7), 1080, 1080);
    // Item 5: column 0, row 1.
    assert!(grid.svg.contains(r#"<g transform="translate(0,1100)">"#));
    // Item 6: column 1, row 1.
    assert!(grid.svg.contains(r#"<g transform="translate(1100,1100)">"#));
    // Item 4: column 4, row 0.
    assert!(grid.svg.contains(r#"<g transform="translate(4400,0)">"#));
}

#[test]
fn root_size_attributes_are_stripped_but_viewbox_kept() {
    let grid = assemble_grid(&items(1), 1080, 1080);
    let inner = grid.svg.split_once('>').unwrap().1;
    assert!(!inner.contains(r#"width="1080""#), "inner: {inner}");
    assert!(inner.contains(r#"viewBox="0 0 1080 1080""#));
    assert!(inner.contains("COD.0"));
}

#[test]
fn grid_document_is_well_formed_xml() {
    let grid = assemble_grid(&items(12), 1080, 1080);
    roxmltree::Document::parse(&grid.svg).unwrap();
}

#[test]
fn strip_root_size_attrs_removes_only_size() {
    let svg = r#"<svg width="10" height="20" viewBox="0 0 10 20" xmlns="http://www.w3.org/2000/svg"><g/></svg>"#;
    assert_eq!(
        strip_root_size_attrs(svg),
        r#"<svg viewBox="0 0 10 20" xmlns="http://www.w3.org/2000/svg"><g/></svg>"#
    );
}

#[test]
fn strip_root_size_attrs_handles_single_quotes_and_order() {
    let svg = "<svg viewBox='0 0 5 5' height='5' width='5'><g/></svg>";
    assert_eq!(
        strip_root_size_attrs(svg),
        "<svg viewBox='0 0 5 5'><g/></svg>"
    );
}

#[test]
fn strip_root_size_attrs_without_open_tag_is_identity() {
    assert_eq!(strip_root_size_attrs("<g/>"), "<g/>");
}
