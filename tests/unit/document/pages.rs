use std::io::Cursor;

use super::*;

fn artifact(row_index: usize, rgba: [u8; 4]) -> RasterArtifact {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    RasterArtifact {
        row_index,
        filename: format!("encarte_{row_index}_x.png"),
        png,
    }
}

#[test]
fn one_page_per_appended_artifact() {
    let mut builder = PagedDocumentBuilder::new(2, 2);
    for i in 0..3 {
        builder.append_page(&artifact(i, [255, 0, 0, 255])).unwrap();
    }
    assert_eq!(builder.page_count(), 3);

    let document = builder.finish().unwrap();
    assert_eq!(document.filename, DOCUMENT_FILENAME);

    let doc = lopdf::Document::load_mem(&document.pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
}

#[test]
fn pages_keep_append_order() {
    let mut builder = PagedDocumentBuilder::new(2, 2);
    builder.append_page(&artifact(0, [255, 0, 0, 255])).unwrap();
    builder.append_page(&artifact(1, [0, 255, 0, 255])).unwrap();
    let document = builder.finish().unwrap();

    let doc = lopdf::Document::load_mem(&document.pdf).unwrap();
    let pages: Vec<_> = doc.get_pages().into_iter().collect();
    assert_eq!(pages.len(), 2);

    // Each page references its own image XObject, numbered by append order.
    for (i, (_, page_id)) in pages.iter().enumerate() {
        let page = doc.get_object(*page_id).and_then(lopdf::Object::as_dict).unwrap();
        let resources = page
            .get(b"Resources")
            .and_then(lopdf::Object::as_dict)
            .unwrap();
        let xobjects = resources
            .get(b"XObject")
            .and_then(lopdf::Object::as_dict)
            .unwrap();
        assert!(xobjects.has(format!("Im{}", i + 1).as_bytes()));
    }
}

#[test]
fn finish_without_pages_is_an_export_error() {
    let builder = PagedDocumentBuilder::new(2, 2);
    let err = builder.finish().unwrap_err();
    assert!(matches!(err, EncarteError::Export(_)));
}

#[test]
fn append_rejects_undecodable_artifact() {
    let mut builder = PagedDocumentBuilder::new(2, 2);
    let bad = RasterArtifact {
        row_index: 0,
        filename: "bad.png".to_string(),
        png: b"not a png".to_vec(),
    };
    assert!(builder.append_page(&bad).is_err());
    assert_eq!(builder.page_count(), 0);
}
