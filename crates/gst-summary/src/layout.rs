//! Minimal grid-table layout over lopdf content streams
//!
//! Positions are tracked top-down in points and flipped to PDF space only when
//! an operation is emitted. Text uses the standard Helvetica faces with
//! WinAnsi encoding, so widths are estimated from the Helvetica metrics
//! rather than measured from an embedded font.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

/// A4 portrait in points
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

pub const MM: f32 = 72.0 / 25.4;

pub const MARGIN: f32 = 14.0 * MM;

/// Resource names of the two fonts every page carries
pub const FONT_REGULAR: &str = "F1";
pub const FONT_BOLD: &str = "F2";

const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Approximate Helvetica advance width in thousandths of an em
fn glyph_width(c: char) -> u16 {
    match c {
        ' ' | '.' | ',' | ':' | ';' | '!' | '|' | 'i' | 'j' | 'l' | '\'' => 278,
        'f' | 't' | 'I' | '/' | '(' | ')' | '[' | ']' | '-' => 333,
        'r' => 333,
        '0'..='9' | '$' | '_' => 556,
        'm' | 'M' => 833,
        'w' | '%' => 889,
        'W' => 944,
        'A'..='Z' => 667,
        'a'..='z' => 556,
        _ => 556,
    }
}

/// Estimated width of `text` at `font_size` points
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(|c| glyph_width(c) as f32).sum::<f32>() * font_size / 1000.0
}

/// Break `text` into lines no wider than `max_width`.
///
/// Words wider than a whole line are split by character. Always returns at
/// least one (possibly empty) line.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width(word, font_size) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                current.push(c);
                if text_width(&current, font_size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, c.to_string()));
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode text for a WinAnsi Type1 font; characters outside Latin-1 become `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Visual style of one table
#[derive(Debug, Clone)]
pub struct TableStyle {
    /// Column widths in points
    pub column_widths: Vec<f32>,
    pub font_size: f32,
    pub cell_padding: f32,
    /// Header row fill, RGB 0-255
    pub header_fill: [u8; 3],
    /// Grid line color, RGB 0-255
    pub line_color: [u8; 3],
}

impl TableStyle {
    /// Grid style with widths given in millimetres
    pub fn grid_mm(widths_mm: &[f32]) -> Self {
        Self {
            column_widths: widths_mm.iter().map(|w| w * MM).collect(),
            font_size: 10.0,
            cell_padding: 3.0,
            header_fill: [230, 230, 230],
            line_color: [200, 200, 200],
        }
    }

    fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT_FACTOR
    }
}

/// Table contents: optional header row plus body rows
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub head: Option<Vec<String>>,
    pub body: Vec<Vec<String>>,
}

struct LaidOutRow {
    cells: Vec<Vec<String>>,
    height: f32,
}

/// Accumulates drawing operations page by page
pub struct PageCanvas {
    pages: Vec<Vec<Operation>>,
    /// Distance of the write cursor from the top of the current page
    cursor: f32,
}

impl Default for PageCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCanvas {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: MARGIN,
        }
    }

    /// Distance of the write cursor from the top edge, in points
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn set_cursor(&mut self, from_top: f32) {
        self.cursor = from_top;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Finish drawing and hand back one operation list per page
    pub fn into_pages(self) -> Vec<Vec<Operation>> {
        self.pages
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` starts with one page and only grows
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = MARGIN;
    }

    fn remaining(&self) -> f32 {
        PAGE_HEIGHT - MARGIN - self.cursor
    }

    /// Start a new page unless `height` points still fit below the cursor
    pub fn reserve(&mut self, height: f32) {
        if height > self.remaining() && self.cursor > MARGIN {
            self.new_page();
        }
    }

    /// Draw a single line of text with its baseline at `baseline_from_top`
    pub fn text(&mut self, x: f32, baseline_from_top: f32, font: &str, size: f32, text: &str) {
        let y = PAGE_HEIGHT - baseline_from_top;
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)],
        ));
        ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn rect(&mut self, x: f32, top: f32, width: f32, height: f32, fill: Option<[u8; 3]>, stroke: [u8; 3]) {
        let y = PAGE_HEIGHT - top - height;
        let rgb = |c: [u8; 3]| {
            c.iter()
                .map(|v| Object::Real(*v as f32 / 255.0))
                .collect::<Vec<_>>()
        };
        let bounds = vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(width),
            Object::Real(height),
        ];

        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        if let Some(fill) = fill {
            ops.push(Operation::new("rg", rgb(fill)));
            ops.push(Operation::new("re", bounds.clone()));
            ops.push(Operation::new("f", vec![]));
        }
        ops.push(Operation::new("RG", rgb(stroke)));
        ops.push(Operation::new("w", vec![Object::Real(0.5)]));
        ops.push(Operation::new("re", bounds));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    fn layout_row(style: &TableStyle, cells: &[String]) -> LaidOutRow {
        let cells: Vec<Vec<String>> = style
            .column_widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let text = cells.get(i).map(String::as_str).unwrap_or("");
                wrap_text(text, style.font_size, width - 2.0 * style.cell_padding)
            })
            .collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        LaidOutRow {
            height: lines as f32 * style.line_height() + 2.0 * style.cell_padding,
            cells,
        }
    }

    fn draw_row(&mut self, style: &TableStyle, row: &LaidOutRow, header: bool) {
        let font = if header { FONT_BOLD } else { FONT_REGULAR };
        let fill = header.then_some(style.header_fill);
        let top = self.cursor;
        let mut x = MARGIN;

        for (width, lines) in style.column_widths.iter().zip(&row.cells) {
            self.rect(x, top, *width, row.height, fill, style.line_color);
            for (i, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let baseline =
                    top + style.cell_padding + style.font_size + i as f32 * style.line_height();
                self.text(x + style.cell_padding, baseline, font, style.font_size, line);
            }
            x += width;
        }

        self.cursor += row.height;
    }

    /// Draw `table` at the cursor, continuing onto new pages as needed.
    ///
    /// The header row is repeated at the top of every continuation page.
    /// Returns the cursor position just below the table.
    pub fn table(&mut self, table: &Table, style: &TableStyle) -> f32 {
        let head = table
            .head
            .as_ref()
            .map(|head| Self::layout_row(style, head));

        let head_height = head.as_ref().map_or(0.0, |h| h.height);
        let first_row_height = table
            .body
            .first()
            .map_or(0.0, |row| Self::layout_row(style, row).height);
        if head_height + first_row_height > self.remaining() {
            self.new_page();
        }

        if let Some(head) = &head {
            self.draw_row(style, head, true);
        }

        for cells in &table.body {
            let row = Self::layout_row(style, cells);
            if row.height > self.remaining() && self.cursor > MARGIN + head_height {
                self.new_page();
                if let Some(head) = &head {
                    self.draw_row(style, head, true);
                }
            }
            self.draw_row(style, &row, false);
        }

        self.cursor
    }
}
