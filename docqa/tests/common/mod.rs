// Fixture builders shared by the integration tests
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use zip::write::FileOptions;
use zip::ZipWriter;

pub const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const SHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Write a ZIP container holding the given parts.
pub fn write_zip(path: &Path, parts: &[(&str, String)]) {
    let file = File::create(path).expect("create zip fixture");
    let mut zip = ZipWriter::new(file);
    for (name, contents) in parts {
        zip.start_file(*name, FileOptions::default())
            .expect("start zip entry");
        zip.write_all(contents.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip fixture");
}

pub fn docx_paragraph(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
}

pub fn docx_table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr/>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str("<w:tc>");
            xml.push_str(&docx_paragraph(cell));
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// Build a minimal .docx whose body is `body_xml`.
pub fn write_docx(dir: &Path, name: &str, body_xml: &str) -> PathBuf {
    let path = dir.join(name);
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORD_NS}"><w:body>{body_xml}<w:sectPr/></w:body></w:document>"#
    );
    write_zip(
        &path,
        &[
            ("[Content_Types].xml", docx_content_types()),
            ("_rels/.rels", package_rels("word/document.xml")),
            ("word/document.xml", document),
        ],
    );
    path
}

fn docx_content_types() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#
        .to_string()
}

fn package_rels(target: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{PKG_REL_NS}">
<Relationship Id="rId1" Type="{REL_NS}/officeDocument" Target="{target}"/>
</Relationships>"#
    )
}

/// A spreadsheet cell for [`write_xlsx`].
pub enum Cell<'a> {
    Empty,
    Number(&'a str),
    Text(&'a str),
    Bool(bool),
    /// Serial value styled as a date (`mm-dd-yy`)
    Date(&'a str),
    /// Serial value styled as a time of day (`h:mm:ss`)
    Time(&'a str),
    /// Serial value styled as elapsed time (`[h]:mm:ss`)
    Duration(&'a str),
}

/// Cell formats at style indices 1..=3, matching `Cell::Date`, `Cell::Time`
/// and `Cell::Duration`.
const XLSX_STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<cellXfs count="4">
<xf numFmtId="0"/>
<xf numFmtId="14" applyNumberFormat="1"/>
<xf numFmtId="21" applyNumberFormat="1"/>
<xf numFmtId="46" applyNumberFormat="1"/>
</cellXfs>
</styleSheet>"#;

/// Build a minimal .xlsx. Each sheet is a name plus rows of cells; a row
/// index offset lets a sheet start below row 1.
pub fn write_xlsx(dir: &Path, name: &str, sheets: &[(&str, usize, Vec<Vec<Cell<'_>>>)]) -> PathBuf {
    let path = dir.join(name);

    let mut parts: Vec<(String, String)> = Vec::new();
    let mut sheet_entries = String::new();
    let mut sheet_rels = String::new();
    let mut overrides = String::new();

    for (index, (sheet_name, first_row, rows)) in sheets.iter().enumerate() {
        let number = index + 1;
        sheet_entries.push_str(&format!(
            r#"<sheet name="{sheet_name}" sheetId="{number}" r:id="rId{number}"/>"#
        ));
        sheet_rels.push_str(&format!(
            r#"<Relationship Id="rId{number}" Type="{REL_NS}/worksheet" Target="worksheets/sheet{number}.xml"/>"#
        ));
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{number}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));

        let mut sheet_data = String::new();
        for (offset, row) in rows.iter().enumerate() {
            let row_number = first_row + offset;
            sheet_data.push_str(&format!(r#"<row r="{row_number}">"#));
            for (col, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", column_name(col), row_number);
                match cell {
                    Cell::Empty => {}
                    Cell::Number(v) => {
                        sheet_data.push_str(&format!(r#"<c r="{reference}"><v>{v}</v></c>"#))
                    }
                    Cell::Text(v) => sheet_data.push_str(&format!(
                        r#"<c r="{reference}" t="inlineStr"><is><t>{v}</t></is></c>"#
                    )),
                    Cell::Bool(v) => sheet_data.push_str(&format!(
                        r#"<c r="{reference}" t="b"><v>{}</v></c>"#,
                        u8::from(*v)
                    )),
                    Cell::Date(v) => sheet_data
                        .push_str(&format!(r#"<c r="{reference}" s="1"><v>{v}</v></c>"#)),
                    Cell::Time(v) => sheet_data
                        .push_str(&format!(r#"<c r="{reference}" s="2"><v>{v}</v></c>"#)),
                    Cell::Duration(v) => sheet_data
                        .push_str(&format!(r#"<c r="{reference}" s="3"><v>{v}</v></c>"#)),
                }
            }
            sheet_data.push_str("</row>");
        }

        parts.push((
            format!("xl/worksheets/sheet{number}.xml"),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{SHEET_NS}"><sheetData>{sheet_data}</sheetData></worksheet>"#
            ),
        ));
    }

    parts.push((
        "[Content_Types].xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
{overrides}
</Types>"#
        ),
    ));
    parts.push(("_rels/.rels".to_string(), package_rels("xl/workbook.xml")));
    parts.push(("xl/styles.xml".to_string(), XLSX_STYLES.to_string()));
    parts.push((
        "xl/workbook.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{SHEET_NS}" xmlns:r="{REL_NS}"><sheets>{sheet_entries}</sheets></workbook>"#
        ),
    ));
    parts.push((
        "xl/_rels/workbook.xml.rels".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{PKG_REL_NS}">{sheet_rels}<Relationship Id="rIdStyles" Type="{REL_NS}/styles" Target="styles.xml"/></Relationships>"#
        ),
    ));

    let borrowed: Vec<(&str, String)> = parts
        .iter()
        .map(|(name, contents)| (name.as_str(), contents.clone()))
        .collect();
    write_zip(&path, &borrowed);
    path
}

fn column_name(index: usize) -> String {
    let mut index = index + 1;
    let mut name = String::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        name.insert(0, (b'A' + rem as u8) as char);
        index = (index - 1) / 26;
    }
    name
}

/// Build a PDF with one page per entry; each page shows its string in Courier.
/// An empty string produces a page with no text at all.
pub fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
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

    doc.save(&path).expect("save pdf fixture");
    path
}
