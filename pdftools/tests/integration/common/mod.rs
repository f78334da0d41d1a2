//! Shared fixtures for the integration tests.
//!
//! PDFs are generated with lopdf. Every page shows its label as text and has
//! its own width, so a page can be recognised after it has been moved
//! between documents.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Page height of generated fixtures, in points.
pub const PAGE_HEIGHT: i64 = 144;

/// Width of the page at `index`, in points.
pub fn page_width(index: usize) -> i64 {
    144 + 36 * index as i64
}

/// Write a PDF with one page per label to `dir/name`.
pub fn create_pdf(dir: &Path, name: &str, labels: &[&str]) -> PathBuf {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let kids: Vec<Object> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 18.into()]),
                    Operation::new("Td", vec![36.into(), 72.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*label)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode page content"),
            ));

            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    page_width(index).into(),
                    PAGE_HEIGHT.into(),
                ],
            }))
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => labels.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("save fixture PDF");
    path
}

/// Labels of the pages of the PDF at `path`, in page order.
pub fn labels_of(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("load PDF");

    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).expect("page content");
            let text = String::from_utf8_lossy(&content).into_owned();
            let start = text.find('(').expect("text operand") + 1;
            let end = start + text[start..].find(')').expect("closing paren");
            text[start..end].to_string()
        })
        .collect()
}

/// Number of pages of the PDF at `path`.
pub fn page_count_of(path: &Path) -> usize {
    Document::load(path).expect("load PDF").get_pages().len()
}
