//! Output document construction
//!
//! Each page of the poster document is one sheet holding a single JPEG
//! image XObject stretched over the full MediaBox.

use crate::types::{PageFormat, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Name of the image XObject in every page's resources
const PAGE_IMAGE_NAME: &str = "Im0";

/// Builds the output document one page at a time.
///
/// A builder starts empty, accumulates pages in the order they are added,
/// and is consumed by [`PosterPdfBuilder::finish`], which serializes the
/// document exactly once.
pub struct PosterPdfBuilder {
    doc: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    sheet_width_pt: f32,
    sheet_height_pt: f32,
}

impl PosterPdfBuilder {
    /// Start an empty document whose sheets all have the size of `format`
    pub fn new(format: &PageFormat) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_tree_id = doc.new_object_id();
        let (sheet_width_pt, sheet_height_pt) = format.dimensions_pt();

        Self {
            doc,
            pages_tree_id,
            page_refs: Vec::new(),
            sheet_width_pt,
            sheet_height_pt,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Append a page showing a JPEG of `width_px` x `height_px` pixels,
    /// filling the sheet with no margin.
    pub fn add_jpeg_page(&mut self, jpeg: Vec<u8>, width_px: u32, height_px: u32) -> ObjectId {
        let image_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(width_px as i64)),
            ("Height", Object::Integer(height_px as i64)),
            ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
            ("Filter", Object::Name(b"DCTDecode".to_vec())),
        ]);
        // Already DCT-compressed
        let image_id = self
            .doc
            .add_object(Stream::new(image_dict, jpeg).with_compression(false));

        let content = placement_command(PAGE_IMAGE_NAME, self.sheet_width_pt, self.sheet_height_pt);
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set(PAGE_IMAGE_NAME, Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.sheet_width_pt),
                Object::Real(self.sheet_height_pt),
            ]),
        );
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set("Contents", Object::Reference(content_id));

        let page_id = self.doc.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        page_id
    }

    /// Close the page tree and serialize the document
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        let mut writer = Vec::new();
        self.doc.save_to(&mut writer)?;
        Ok(writer)
    }
}

/// Content stream command that scales the unit-square image to the sheet
fn placement_command(name: &str, width_pt: f32, height_pt: f32) -> String {
    format!("q {} 0 0 {} 0 0 cm /{} Do Q\n", width_pt, height_pt, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(obj: &Object) -> f32 {
        match obj {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            other => panic!("not a number: {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_has_no_pages() {
        let bytes = PosterPdfBuilder::new(&PageFormat::PORTRAIT).finish().unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn test_pages_use_sheet_size() {
        let mut builder = PosterPdfBuilder::new(&PageFormat::LANDSCAPE);
        builder.add_jpeg_page(vec![0xFF, 0xD8, 0xFF, 0xD9], 3508, 2480);
        builder.add_jpeg_page(vec![0xFF, 0xD8, 0xFF, 0xD9], 3508, 2480);
        assert_eq!(builder.page_count(), 2);

        let bytes = builder.finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        for page_id in pages.values() {
            let page = doc.get_dictionary(*page_id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            assert!((number(&media_box[2]) - 841.89).abs() < 0.01);
            assert!((number(&media_box[3]) - 595.28).abs() < 0.01);
        }
    }

    #[test]
    fn test_image_is_embedded_unchanged() {
        let jpeg = vec![0xFF, 0xD8, 1, 2, 3, 0xFF, 0xD9];
        let mut builder = PosterPdfBuilder::new(&PageFormat::PORTRAIT);
        builder.add_jpeg_page(jpeg.clone(), 2480, 3508);
        let bytes = builder.finish().unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
        let stream = doc.get_object(image_id).unwrap().as_stream().unwrap();

        assert_eq!(stream.content, jpeg);
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 2480);
        assert_eq!(stream.dict.get(b"Height").unwrap().as_i64().unwrap(), 3508);
        assert_eq!(
            stream.dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"DCTDecode"
        );
    }

    #[test]
    fn test_placement_command_fills_sheet() {
        assert_eq!(
            placement_command("Im0", 595.0, 842.0),
            "q 595 0 0 842 0 0 cm /Im0 Do Q\n"
        );
    }
}
