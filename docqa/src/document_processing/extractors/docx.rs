// DOCX extractor
use crate::document_processing::error::ExtractionError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Returned instead of an empty string when a document parses but holds no text.
pub const NO_TEXT_CONTENT: &str = "No text content found in document.";

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxExtractor;

impl DocxExtractor {
    /// Extract text from a DOCX file
    ///
    /// DOCX files are ZIP archives containing XML files.
    /// The main content is in word/document.xml
    pub fn extract(docx_path: impl AsRef<Path>) -> Result<String, ExtractionError> {
        let docx_path = docx_path.as_ref();

        let file = File::open(docx_path).map_err(|e| ExtractionError::io(docx_path, e))?;

        let mut archive = ZipArchive::new(file).map_err(|e| match e {
            ZipError::Io(e) => ExtractionError::io(docx_path, e),
            other => ExtractionError::parse(docx_path, other),
        })?;

        let xml_content = {
            let mut document_xml = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
                ZipError::FileNotFound => ExtractionError::parse(
                    docx_path,
                    format!("Invalid DOCX file: {} not found", DOCUMENT_PART),
                ),
                other => ExtractionError::parse(docx_path, other),
            })?;

            let mut xml_content = String::new();
            document_xml
                .read_to_string(&mut xml_content)
                .map_err(|e| ExtractionError::parse(docx_path, e))?;
            xml_content
        };

        let text = Self::extract_text_from_xml(&xml_content)
            .map_err(|cause| ExtractionError::parse(docx_path, cause))?;

        if text.trim().is_empty() {
            return Ok(NO_TEXT_CONTENT.to_string());
        }

        Ok(text)
    }

    /// Body paragraphs first, then body table cells, one non-blank entry per line
    fn extract_text_from_xml(xml: &str) -> Result<String, String> {
        let document = Element::parse(xml)?;
        let body = document
            .child("body")
            .ok_or_else(|| "Invalid DOCX file: document has no body".to_string())?;

        let mut text = String::new();

        for paragraph in body.children_named("p") {
            let paragraph_text = Self::paragraph_text(paragraph);
            if !paragraph_text.trim().is_empty() {
                text.push_str(&paragraph_text);
                text.push('\n');
            }
        }

        for table in body.children_named("tbl") {
            for row in Self::table_rows(table) {
                for cell in row {
                    if !cell.trim().is_empty() {
                        text.push_str(&cell);
                        text.push('\n');
                    }
                }
            }
        }

        Ok(text)
    }

    fn paragraph_text(paragraph: &Element) -> String {
        let mut text = String::new();
        Self::collect_runs(paragraph, &mut text);
        text
    }

    fn collect_runs(container: &Element, out: &mut String) {
        for child in container.elements() {
            match child.name.as_str() {
                "r" => Self::run_text(child, out),
                "hyperlink" => Self::collect_runs(child, out),
                _ => {}
            }
        }
    }

    fn run_text(run: &Element, out: &mut String) {
        for child in run.elements() {
            match child.name.as_str() {
                "t" => out.push_str(&child.text()),
                "tab" | "ptab" => out.push('\t'),
                "br" => {
                    // Page and column breaks carry no text
                    if matches!(child.attr("type"), None | Some("textWrapping")) {
                        out.push('\n');
                    }
                }
                "cr" => out.push('\n'),
                "noBreakHyphen" => out.push('-'),
                _ => {}
            }
        }
    }

    /// Cell texts per row, expanded to grid columns
    ///
    /// A cell spanning several grid columns is repeated once per column, and
    /// a cell continuing a vertical merge takes the text of the cell above.
    fn table_rows(table: &Element) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut above: Vec<String> = Vec::new();

        for tr in table.children_named("tr") {
            let mut row: Vec<String> = Vec::new();

            for tc in tr.children_named("tc") {
                let properties = tc.child("tcPr");
                let span = properties
                    .and_then(|p| p.child("gridSpan"))
                    .and_then(|g| g.attr("val"))
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(1)
                    .max(1);
                let continues_merge = properties
                    .and_then(|p| p.child("vMerge"))
                    .map(|v| v.attr("val").map_or(true, |val| val == "continue"))
                    .unwrap_or(false);

                let text = match above.get(row.len()) {
                    Some(text_above) if continues_merge => text_above.clone(),
                    _ => Self::cell_text(tc),
                };

                for _ in 0..span {
                    row.push(text.clone());
                }
            }

            above = row.clone();
            rows.push(row);
        }

        rows
    }

    fn cell_text(cell: &Element) -> String {
        cell.children_named("p")
            .map(Self::paragraph_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Minimal element tree of an Office Open XML part
///
/// Names are stored without their namespace prefix. Character data is kept
/// only inside `t` elements, the one place WordprocessingML puts text.
#[derive(Debug)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    fn parse(xml: &str) -> Result<Element, String> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(Self::from_start(&start)?),
                Ok(Event::Empty(start)) => {
                    let element = Self::from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(element)),
                        None => root = Some(element),
                    }
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| "unbalanced closing tag".to_string())?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(element)),
                        None => root = Some(element),
                    }
                }
                Ok(Event::Text(text)) => {
                    if let Some(current) = stack.last_mut().filter(|e| e.name == "t") {
                        let text = text.unescape().map_err(|e| e.to_string())?;
                        current.children.push(Node::Text(text.into_owned()));
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(current) = stack.last_mut().filter(|e| e.name == "t") {
                        let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                        current.children.push(Node::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(format!(
                        "XML error at position {}: {}",
                        reader.error_position(),
                        e
                    ))
                }
            }
        }

        if !stack.is_empty() {
            return Err("unexpected end of document".to_string());
        }

        root.ok_or_else(|| "document has no root element".to_string())
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element, String> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            attrs.push((key, value.into_owned()));
        }

        Ok(Element {
            name,
            attrs,
            children: Vec::new(),
        })
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}
