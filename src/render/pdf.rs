//! PDF boundary: page geometry in, FreeText annotations out.

use crate::placement::{LabelPlacement, PageGeometry};
use anyhow::{Context, anyhow, bail};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::path::Path;

// Guards against Parent loops in malformed page trees.
const MAX_INHERIT_DEPTH: usize = 32;

pub fn load_pdf(path: &Path) -> anyhow::Result<Document> {
    Document::load(path).with_context(|| format!("read pdf file {}", path.display()))
}

pub fn save_pdf(doc: &mut Document, path: &Path) -> anyhow::Result<()> {
    doc.save(path)
        .with_context(|| format!("write pdf file {}", path.display()))?;
    Ok(())
}

/// Width and height of every page, in page order.
pub fn page_geometry(doc: &Document) -> anyhow::Result<Vec<PageGeometry>> {
    doc.get_pages()
        .into_iter()
        .map(|(number, id)| {
            let [llx, lly, urx, ury] =
                media_box(doc, id).with_context(|| format!("page {} media box", number))?;
            Ok(PageGeometry {
                width: urx - llx,
                height: ury - lly,
            })
        })
        .collect()
}

/// Attach one FreeText annotation per placement.
pub fn add_annotations(doc: &mut Document, placements: &[LabelPlacement]) -> anyhow::Result<()> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for placement in placements {
        let page_id = *page_ids.get(placement.page).ok_or_else(|| {
            anyhow!(
                "annotation targets page {}, but the document has {} page(s)",
                placement.page,
                page_ids.len()
            )
        })?;
        let annot_id = doc.add_object(free_text(placement));
        attach_annotation(doc, page_id, annot_id)
            .with_context(|| format!("attach annotation to page {}", placement.page))?;
    }
    Ok(())
}

fn free_text(placement: &LabelPlacement) -> Dictionary {
    let size = placement.font_size.trim_end_matches("pt");
    let rect: Vec<Object> = placement
        .rect()
        .iter()
        .map(|v| Object::Real(*v as f32))
        .collect();
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "FreeText",
        "Rect" => rect,
        "Contents" => Object::string_literal(placement.text.as_str()),
        "DA" => Object::string_literal(format!("/Helv {} Tf 0 g", size)),
        "DS" => Object::string_literal(format!(
            "font: {} Helvetica; text-align:left; color:#000000",
            placement.font_size
        )),
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "F" => Object::Integer(4),
    }
}

fn attach_annotation(doc: &mut Document, page_id: ObjectId, annot_id: ObjectId) -> anyhow::Result<()> {
    let annot = Object::Reference(annot_id);
    let existing = doc.get_dictionary(page_id)?.get(b"Annots").ok().cloned();
    match existing {
        Some(Object::Reference(array_id)) => {
            doc.get_object_mut(array_id)?.as_array_mut()?.push(annot);
        }
        Some(Object::Array(_)) => {
            doc.get_dictionary_mut(page_id)?
                .get_mut(b"Annots")?
                .as_array_mut()?
                .push(annot);
        }
        _ => {
            doc.get_dictionary_mut(page_id)?.set("Annots", vec![annot]);
        }
    }
    Ok(())
}

/// `[llx, lly, urx, ury]`, inherited from ancestors when the page lacks one.
fn media_box(doc: &Document, page_id: ObjectId) -> anyhow::Result<[f64; 4]> {
    let mut dict = doc.get_dictionary(page_id)?;
    for _ in 0..MAX_INHERIT_DEPTH {
        if let Ok(obj) = dict.get(b"MediaBox") {
            let values = deref(doc, obj)?.as_array()?;
            if values.len() != 4 {
                bail!("MediaBox has {} entries, expected 4", values.len());
            }
            let mut out = [0.0; 4];
            for (slot, v) in out.iter_mut().zip(values) {
                *slot = f64::from(deref(doc, v)?.as_float()?);
            }
            return Ok(out);
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => dict = doc.get_dictionary(parent)?,
            Err(_) => bail!("no MediaBox on page or its ancestors"),
        }
    }
    bail!("page tree deeper than {} levels", MAX_INHERIT_DEPTH)
}

fn deref<'a>(doc: &'a Document, obj: &'a Object) -> anyhow::Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbers(values: [i64; 4]) -> Object {
        Object::Array(values.iter().map(|v| Object::Integer(*v)).collect())
    }

    /// Page 0 has its own Letter box and an inline Annots array; page 1
    /// inherits A4 from the page tree and keeps Annots behind a reference.
    pub(crate) fn two_page_doc() -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let shared_annots = doc.add_object(Object::Array(vec![]));
        let first = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => numbers([0, 0, 612, 792]),
            "Annots" => Object::Array(vec![]),
        });
        let second = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Annots" => shared_annots,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(first), Object::Reference(second)],
                "Count" => Object::Integer(2),
                "MediaBox" => numbers([0, 0, 595, 842]),
            }),
        );
        let catalog = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog);
        doc
    }

    fn annotation_count(doc: &Document, page: usize) -> usize {
        let page_id = doc.get_pages().into_values().nth(page).unwrap();
        let annots = doc.get_dictionary(page_id).unwrap().get(b"Annots").unwrap();
        deref(doc, annots).unwrap().as_array().unwrap().len()
    }

    fn label(page: usize, text: &str) -> LabelPlacement {
        LabelPlacement {
            page,
            x: 30.0,
            y: 700.0,
            text: text.to_string(),
            font_size: "8pt".to_string(),
        }
    }

    #[test]
    fn geometry_inherits_media_box() {
        let doc = two_page_doc();
        assert_eq!(
            page_geometry(&doc).unwrap(),
            vec![
                PageGeometry {
                    width: 612.0,
                    height: 792.0
                },
                PageGeometry {
                    width: 595.0,
                    height: 842.0
                },
            ]
        );
    }

    #[test]
    fn annotations_land_on_inline_and_referenced_arrays() {
        let mut doc = two_page_doc();
        add_annotations(&mut doc, &[label(0, "01"), label(0, "02"), label(1, "03")]).unwrap();
        assert_eq!(annotation_count(&doc, 0), 2);
        assert_eq!(annotation_count(&doc, 1), 1);
    }

    #[test]
    fn annots_created_when_absent() {
        let mut doc = two_page_doc();
        let page_id = doc.get_pages().into_values().next().unwrap();
        doc.get_dictionary_mut(page_id).unwrap().remove(b"Annots");
        add_annotations(&mut doc, &[label(0, "1")]).unwrap();
        assert_eq!(annotation_count(&doc, 0), 1);
    }

    #[test]
    fn free_text_carries_label_and_size() {
        let dict = free_text(&label(0, "07"));
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"FreeText");
        assert_eq!(dict.get(b"Contents").unwrap().as_str().unwrap(), b"07");
        assert_eq!(dict.get(b"DA").unwrap().as_str().unwrap(), b"/Helv 8 Tf 0 g");
        assert_eq!(dict.get(b"Rect").unwrap().as_array().unwrap().len(), 4);
    }

    #[test]
    fn missing_page_is_an_error() {
        let mut doc = two_page_doc();
        let err = add_annotations(&mut doc, &[label(5, "1")]).unwrap_err();
        assert!(err.to_string().contains("page 5"), "{err}");
    }

    #[test]
    fn saved_file_reloads_with_annotations() {
        let mut doc = two_page_doc();
        add_annotations(&mut doc, &[label(1, "1"), label(1, "2")]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        save_pdf(&mut doc, &path).unwrap();

        let reloaded = load_pdf(&path).unwrap();
        assert_eq!(reloaded.get_pages().len(), 2);
        assert_eq!(annotation_count(&reloaded, 1), 2);
    }
}
