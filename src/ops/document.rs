//! Shared lopdf plumbing for the document operations.
//!
//! Everything that touches the PDF object graph directly lives here: byte
//! buffer load/save, metadata stripping, and the page-tree rebuild used by
//! both merge and the compress rebuild strategies.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::PdfError;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Parent chains longer than this are treated as malformed.
const MAX_PARENT_DEPTH: usize = 64;

/// Decode a PDF from a byte buffer.
pub fn load_document(input: &[u8]) -> Result<Document, PdfError> {
    Document::load_mem(input).map_err(|e| PdfError::Decode(e.to_string()))
}

/// Serialize a document to a byte buffer.
pub fn save_bytes(doc: &mut Document) -> Result<Vec<u8>, PdfError> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decode a buffer and count its pages.
pub fn page_count(input: &[u8]) -> Result<usize, PdfError> {
    Ok(load_document(input)?.get_pages().len())
}

/// Resolve the trailer's Info entry to its dictionary, if present.
pub fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Drop the trailer Info dictionary and the catalog's XMP metadata stream.
/// The orphaned objects stay in the document until the caller prunes.
pub fn strip_metadata(doc: &mut Document) {
    doc.trailer.remove(b"Info");
    if let Ok(root_id) = doc.trailer.get(b"Root").and_then(Object::as_reference) {
        if let Ok(catalog) = doc.get_object_mut(root_id).and_then(Object::as_dict_mut) {
            catalog.remove(b"Metadata");
        }
    }
}

/// Copy every page of `source` into a freshly created document.
///
/// The fresh document gets a new page tree and catalog; outlines, name
/// trees, and anything else hanging off the old catalog is left behind and
/// pruned. The Info dictionary is carried over only when `keep_info` is set.
pub fn rebuild_document(source: Document, keep_info: bool) -> Document {
    let info = if keep_info {
        info_dictionary(&source).cloned()
    } else {
        None
    };

    let mut builder = PageTreeBuilder::new();
    builder.append(source);
    let mut doc = builder.finish();

    if let Some(info) = info {
        let info_id = doc.add_object(Object::Dictionary(info));
        doc.trailer.set("Info", Object::Reference(info_id));
    }
    doc
}

/// Accumulates pages from one or more source documents into a fresh
/// document under a single new page tree.
///
/// Used by merge (many sources) and by the compress rebuild strategies (one
/// source). Inheritable attributes are resolved onto each page before its
/// old parent chain is dropped.
pub struct PageTreeBuilder {
    doc: Document,
    kids: Vec<ObjectId>,
}

impl PageTreeBuilder {
    pub fn new() -> Self {
        Self {
            doc: Document::with_version("1.5"),
            kids: Vec::new(),
        }
    }

    /// Append every page of `source`, in page order.
    pub fn append(&mut self, mut source: Document) {
        source.renumber_objects_with(self.doc.max_id + 1);
        self.doc.max_id = source.max_id;

        let pages = source.get_pages();
        let mut inherited = Vec::with_capacity(pages.len());
        for &page_id in pages.values() {
            inherited.push((page_id, inherited_attributes(&source, page_id)));
        }

        self.doc.objects.extend(source.objects);

        for (page_id, attributes) in inherited {
            if let Ok(page) = self
                .doc
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
            {
                for (key, value) in attributes {
                    page.set(key, value);
                }
            }
            self.kids.push(page_id);
        }
    }

    /// Hang the collected pages under a new Pages node with a new Catalog,
    /// drop everything unreachable, and renumber densely.
    pub fn finish(mut self) -> Document {
        let pages_id = self.doc.new_object_id();
        for &page_id in &self.kids {
            if let Ok(page) = self
                .doc
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
            {
                page.set("Parent", Object::Reference(pages_id));
            }
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(self.kids.len() as i64)),
            (
                "Kids",
                Object::Array(self.kids.iter().map(|&id| Object::Reference(id)).collect()),
            ),
        ]);
        self.doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.prune_objects();
        self.doc.renumber_objects();
        self.doc.adjust_zero_pages();
        self.doc
            .trailer
            .set("Size", Object::Integer(self.doc.max_id as i64 + 1));
        self.doc
    }
}

impl Default for PageTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Attributes `page_id` would inherit from its ancestors but does not carry
/// itself, as (key, value) pairs ready to plant on the page dictionary.
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(Vec<u8>, Object)> {
    let Ok(page) = doc.get_object(page_id).and_then(Object::as_dict) else {
        return Vec::new();
    };

    let mut missing: Vec<&[u8]> = INHERITABLE_PAGE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();
    let mut parent = dict_parent(doc, page);
    let mut depth = 0;

    while let Some(ancestor) = parent {
        if missing.is_empty() || depth >= MAX_PARENT_DEPTH {
            break;
        }
        missing.retain(|&key| match ancestor.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = dict_parent(doc, ancestor);
        depth += 1;
    }

    found
}

fn dict_parent<'a>(doc: &'a Document, dict: &Dictionary) -> Option<&'a Dictionary> {
    let id = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    doc.get_object(id).and_then(Object::as_dict).ok()
}
