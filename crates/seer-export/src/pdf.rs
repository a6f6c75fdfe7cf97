//! Premium Reading PDF Layout
//!
//! Builds a small fixed document (the submitted fields under labels, then
//! the reading text with its line breaks preserved) and serializes it to a
//! PDF byte stream for download.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::{ExportError, Result};

const PAGE_WIDTH: i64 = 595; // A4 portrait, points
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const LEADING: i64 = 16;
const TITLE_SIZE: i64 = 16;
const BODY_SIZE: i64 = 11;
const MAX_LINE_CHARS: usize = 92;
const LINES_PER_PAGE: usize = 45;

/// The premium reading laid out for export
#[derive(Clone, Debug)]
pub struct ReadingDocument {
    pub name: String,
    pub birthdate: String,
    pub question: String,
    pub result_text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Clone, Debug)]
struct Line {
    text: String,
    font: Font,
    size: i64,
}

impl Line {
    fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::Regular,
            size: BODY_SIZE,
        }
    }

    fn heading(text: impl Into<String>, size: i64) -> Self {
        Self {
            text: text.into(),
            font: Font::Bold,
            size,
        }
    }

    fn blank() -> Self {
        Self::body("")
    }
}

impl ReadingDocument {
    pub fn new(
        name: impl Into<String>,
        birthdate: impl Into<String>,
        question: impl Into<String>,
        result_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birthdate: birthdate.into(),
            question: question.into(),
            result_text: result_text.into(),
        }
    }

    /// Serialize the reading to PDF bytes
    pub fn render(&self) -> Result<Vec<u8>> {
        let lines = self.build_lines();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page_lines in lines.chunks(LINES_PER_PAGE) {
            let content = Content {
                operations: page_ops(page_lines),
            };
            let encoded = content
                .encode()
                .map_err(|e| ExportError::Render(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
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
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| ExportError::Render(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ExportError::EmptyOutput);
        }
        tracing::debug!(bytes = bytes.len(), "premium reading rendered to PDF");
        Ok(bytes)
    }

    fn build_lines(&self) -> Vec<Line> {
        let mut lines = vec![
            Line::heading("Premium Numerology Reading", TITLE_SIZE),
            Line::blank(),
        ];

        for (label, value) in [
            ("Name", &self.name),
            ("Birthdate", &self.birthdate),
            ("Question", &self.question),
        ] {
            for wrapped in wrap(&format!("{label}: {value}"), MAX_LINE_CHARS) {
                lines.push(Line::body(wrapped));
            }
        }
        lines.push(Line::blank());

        for paragraph in self.result_text.lines() {
            if paragraph.trim().is_empty() {
                lines.push(Line::blank());
                continue;
            }
            for wrapped in wrap(paragraph, MAX_LINE_CHARS) {
                lines.push(Line::body(wrapped));
            }
        }

        lines
    }
}

fn page_ops(lines: &[Line]) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("TL", vec![LEADING.into()]),
        Operation::new(
            "Td",
            vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - TITLE_SIZE).into()],
        ),
    ];

    let mut current: Option<(Font, i64)> = None;
    for line in lines {
        if current != Some((line.font, line.size)) {
            ops.push(Operation::new(
                "Tf",
                vec![line.font.resource_name().into(), line.size.into()],
            ));
            current = Some((line.font, line.size));
        }
        if !line.text.is_empty() {
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(sanitize(&line.text))],
            ));
        }
        ops.push(Operation::new("T*", vec![]));
    }

    ops.push(Operation::new("ET", vec![]));
    ops
}

/// Map text onto the Latin-1 range the standard fonts can show
fn sanitize(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Greedy word wrap; words longer than `max` are hard-split
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max {
            let split_at = word
                .char_indices()
                .nth(max)
                .map_or(word.len(), |(i, _)| i);
            let (head, tail) = word.split_at(split_at);
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(head.to_string());
            word = tail;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
