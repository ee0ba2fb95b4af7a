//! PDF report assembly
//!
//! Builds a simple multi-page report: a header with the query and the
//! generation time, then one numbered section per summarized source.
//! Text is laid out line by line in Helvetica; summary lines keep their
//! Markdown markers as plain text.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::models::SourceSummary;
use crate::types::{AppError, AppResult};

// US Letter, 72 dpi points
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;

const BODY_SIZE: i64 = 11;
const HEADING_SIZE: i64 = 13;
const TITLE_SIZE: i64 = 18;

/// Wrap width for body-size text. Helvetica at 11pt runs roughly 5.5
/// points per character, leaving ~85 characters between the margins.
const BODY_LINE_CHARS: usize = 85;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

struct Line {
    text: String,
    font: &'static str,
    size: i64,
}

/// Build the PDF report bytes for an export request.
pub fn build_report(query: &str, items: &[SourceSummary]) -> AppResult<Vec<u8>> {
    let generated = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();

    let mut lines: Vec<Line> = Vec::new();
    push_wrapped(&mut lines, query, FONT_BOLD, TITLE_SIZE);
    push_wrapped(&mut lines, &format!("Generated: {generated}"), FONT_REGULAR, BODY_SIZE);
    push_blank(&mut lines);

    for (index, item) in items.iter().enumerate() {
        push_wrapped(
            &mut lines,
            &format!("{}. {}", index + 1, item.title),
            FONT_BOLD,
            HEADING_SIZE,
        );
        if !item.url.is_empty() {
            push_wrapped(&mut lines, &item.url, FONT_REGULAR, BODY_SIZE);
        }
        push_blank(&mut lines);
        for raw in item.summary.lines() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            push_wrapped(&mut lines, trimmed, FONT_REGULAR, BODY_SIZE);
        }
        push_blank(&mut lines);
    }

    render(&lines)
}

fn render(lines: &[Line]) -> AppResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => font_regular,
            FONT_BOLD => font_bold,
        },
    });

    let mut page_ids: Vec<Object> = Vec::new();
    let mut cursor = 0usize;

    while cursor < lines.len() {
        let mut operations: Vec<Operation> = Vec::new();
        let mut y = PAGE_HEIGHT - MARGIN;

        while cursor < lines.len() {
            let line = &lines[cursor];
            let advance = line.size + 4;
            if y - advance < MARGIN {
                break;
            }
            y -= advance;

            if !line.text.is_empty() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![line.font.into(), line.size.into()]));
                operations.push(Operation::new("Td", vec![MARGIN.into(), y.into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(sanitize(&line.text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            cursor += 1;
        }

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| AppError::Internal(format!("Failed to encode PDF content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AppError::Internal(format!("Failed to serialize PDF: {e}")))?;
    Ok(buffer)
}

fn push_wrapped(lines: &mut Vec<Line>, text: &str, font: &'static str, size: i64) {
    // Larger sizes get proportionally fewer characters per line
    let max_chars = (BODY_LINE_CHARS as i64 * BODY_SIZE / size).max(20) as usize;
    for chunk in wrap_line(text, max_chars) {
        lines.push(Line {
            text: chunk,
            font,
            size,
        });
    }
}

fn push_blank(lines: &mut Vec<Line>) {
    lines.push(Line {
        text: String::new(),
        font: FONT_REGULAR,
        size: BODY_SIZE,
    });
}

/// Greedy word wrap. A single word longer than the limit stays on its
/// own overlong line rather than being split.
fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_chars {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

/// Type1 Helvetica has no Unicode cmap; anything outside printable
/// ASCII is replaced rather than risking a broken content stream.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c
            } else {
                '?'
            }
        })
        .collect()
}
