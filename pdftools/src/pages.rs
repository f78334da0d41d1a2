//! Page tree manipulation on lopdf documents.
//!
//! Every command that moves pages between documents goes through these
//! helpers:
//! - listing page object ids in document order
//! - copying inherited attributes onto pages before they change parents
//! - importing all pages of one document into another
//! - rebuilding the page tree as a single flat `Kids` array

use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::error::{PdfToolsError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth when walking `Parent` links.
const MAX_TREE_DEPTH: usize = 64;

/// Page object ids in document order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Number of pages in the document.
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Object id of the root `Pages` node.
fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfToolsError::operation_failed(format!("Failed to get pages reference: {e}")))
}

/// Copy inherited attributes onto every page that does not define them.
///
/// After this, a page renders the same no matter which node it hangs under,
/// which is what allows flattening and cross-document moves.
pub fn materialize_inherited_attributes(doc: &mut Document) -> Result<()> {
    for page_id in page_ids(doc) {
        let inherited = collect_inherited(doc, page_id)?;
        if inherited.is_empty() {
            continue;
        }

        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}

/// Inheritable attributes missing on `page_id`, resolved from its ancestors.
fn collect_inherited(doc: &Document, page_id: ObjectId) -> Result<Vec<(Vec<u8>, Object)>> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();

    let mut found = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(parent_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }

        let node = doc.get_dictionary(parent_id)?;
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    Ok(found)
}

/// Replace the page tree with a flat list of `page_ids`, in order.
///
/// Every listed page is re-parented to the root `Pages` node. Nodes and
/// pages no longer reachable stay in the object table until the writer
/// prunes them.
pub fn set_page_tree(doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = root_pages_id(doc)?;

    for &page_id in page_ids {
        doc.get_dictionary_mut(page_id)
            .map_err(|e| PdfToolsError::operation_failed(format!("Failed to get page: {e}")))?
            .set("Parent", Object::Reference(pages_id));
    }

    let pages_dict = doc
        .get_dictionary_mut(pages_id)
        .map_err(|e| PdfToolsError::operation_failed(format!("Failed to get pages object: {e}")))?;

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Count", Object::Integer(page_ids.len() as i64));

    Ok(())
}

/// Move all objects of `source` into `target` and return the imported page ids.
///
/// The source's objects are renumbered above the target's highest id so no
/// ids collide. The imported pages are not yet part of the target's page
/// tree; pass them to [`set_page_tree`].
pub fn import_pages(target: &mut Document, mut source: Document) -> Result<Vec<ObjectId>> {
    materialize_inherited_attributes(&mut source)?;

    source.renumber_objects_with(target.max_id + 1);
    target.max_id = target.max_id.max(source.max_id);

    let imported = page_ids(&source);
    target.objects.extend(source.objects);

    debug!(pages = imported.len(), "imported pages");
    Ok(imported)
}

/// Add a shallow copy of a page under a fresh object id.
///
/// Content streams and resources stay shared with the original page.
pub fn duplicate_page(doc: &mut Document, page_id: ObjectId) -> Result<ObjectId> {
    let page = doc.get_dictionary(page_id)?.clone();
    Ok(doc.add_object(page))
}

/// Build a document holding only `page_id` of `doc`.
pub fn extract_page(doc: &Document, page_id: ObjectId) -> Result<Document> {
    let mut single = doc.clone();

    // Outline entries would keep every other page reachable.
    if let Ok(catalog) = single.catalog_mut() {
        catalog.remove(b"Outlines");
    }

    set_page_tree(&mut single, &[page_id])?;
    Ok(single)
}
