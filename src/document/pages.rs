use anyhow::Context;
use lopdf::{Document as PdfDocument, Object, Stream, dictionary};

use crate::{
    foundation::error::{EncarteError, EncarteResult},
    render::compositor::RasterArtifact,
};

/// Filename of the paged-document artifact.
pub const DOCUMENT_FILENAME: &str = "encartes.pdf";

/// Multi-page output document, one full-bleed page per rasterized row.
#[derive(Clone, Debug)]
pub struct PagedDocument {
    /// Output filename, [`DOCUMENT_FILENAME`].
    pub filename: String,
    /// Serialized PDF bytes.
    pub pdf: Vec<u8>,
}

/// Incrementally assembles rasterized items into one PDF.
///
/// Pages are appended in the order `append_page` is called; the orchestrator
/// feeds artifacts in original row order, one page per successfully
/// composited item, each page sized to the item dimensions.
#[derive(Debug)]
pub struct PagedDocumentBuilder {
    width: u32,
    height: u32,
    pages: Vec<Vec<u8>>,
}

impl PagedDocumentBuilder {
    /// Create a builder for pages of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append one artifact as a full-bleed page.
    ///
    /// The artifact's PNG is re-encoded as JPEG for embedding (DCTDecode);
    /// composition over the background leaves no transparency to preserve.
    pub fn append_page(&mut self, artifact: &RasterArtifact) -> EncarteResult<()> {
        let img = image::load_from_memory(&artifact.png)
            .with_context(|| format!("decode raster '{}' for page embed", artifact.filename))?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut jpeg = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 90)
            .encode(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .with_context(|| format!("encode page jpeg for '{}'", artifact.filename))?;

        self.pages.push(jpeg);
        Ok(())
    }

    /// Serialize the accumulated pages into a PDF document.
    pub fn finish(self) -> EncarteResult<PagedDocument> {
        if self.pages.is_empty() {
            return Err(EncarteError::export(
                "paged document requires at least one page",
            ));
        }

        let mut doc = PdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());

        for (idx, jpeg) in self.pages.into_iter().enumerate() {
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => self.width as i64,
                    "Height" => self.height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                jpeg,
            ));

            let content = format!("q {} 0 0 {} 0 0 cm /Im{} Do Q", self.width, self.height, idx + 1);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => dictionary! {
                        format!("Im{}", idx + 1) => image_id,
                    },
                },
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    (self.width as i64).into(),
                    (self.height as i64).into(),
                ],
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut pdf = Vec::new();
        doc.save_to(&mut pdf)
            .map_err(|e| EncarteError::export(format!("serialize paged document: {e}")))?;

        Ok(PagedDocument {
            filename: DOCUMENT_FILENAME.to_string(),
            pdf,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/pages.rs"]
mod tests;
