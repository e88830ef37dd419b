//! Assembling the summary PDF with lopdf

use crate::error::SummaryError;
use crate::history::{HistorySection, HISTORY_COLUMNS};
use crate::layout::{
    PageCanvas, Table, TableStyle, FONT_BOLD, FONT_REGULAR, MARGIN, PAGE_HEIGHT, PAGE_WIDTH,
};
use chrono::{DateTime, Utc};
use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

pub const TITLE: &str = "COMPANY GST3B SUMMARY";

const TITLE_SIZE: f32 = 14.0;
const HEADING_SIZE: f32 = 12.0;
const SECTION_GAP: f32 = 10.0;

const SUMMARY_WIDTHS_MM: [f32; 4] = [45.0, 70.0, 45.0, 30.0];
const HISTORY_WIDTHS_MM: [f32; 6] = [30.0, 30.0, 30.0, 30.0, 35.0, 30.0];

/// Everything that goes into one company's summary PDF
#[derive(Debug, Clone)]
pub struct SummaryDocument {
    pub gstin: String,
    /// Fixed key/value block, four cells per row
    pub summary: Vec<[String; 4]>,
    pub sections: Vec<HistorySection>,
    pub generated_at: DateTime<Utc>,
}

impl SummaryDocument {
    /// Lay out the document and serialize it to PDF bytes
    pub fn render(&self) -> Result<Vec<u8>, SummaryError> {
        let pages = self.draw();
        let page_count = pages.len();

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(type1_font("Helvetica"));
        let bold_id = doc.add_object(type1_font("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_REGULAR => Object::Reference(regular_id),
                FONT_BOLD => Object::Reference(bold_id),
            },
        });

        let mut kids = Vec::with_capacity(page_count);
        for operations in pages {
            let encoded = Content { operations }
                .encode()
                .map_err(|e| SummaryError::Render(format!("Content encode failed: {}", e)))?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(PAGE_WIDTH),
                    Object::Real(PAGE_HEIGHT),
                ],
                "Resources" => Object::Reference(resources_id),
                "Contents" => Object::Reference(content_id),
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => page_count as i64,
                "Kids" => kids,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let info_id = doc.add_object(dictionary! {
            "Title" => literal(&format!("{} {}", self.gstin, TITLE)),
            "Producer" => literal("gst-summary"),
            "CreationDate" => literal(&self.generated_at.format("D:%Y%m%d%H%M%SZ").to_string()),
        });
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| SummaryError::Render(format!("Save failed: {}", e)))?;

        tracing::debug!(
            gstin = %self.gstin,
            pages = page_count,
            bytes = buffer.len(),
            "Rendered summary PDF"
        );
        Ok(buffer)
    }

    fn draw(&self) -> Vec<Vec<lopdf::content::Operation>> {
        let mut canvas = PageCanvas::new();

        canvas.text(MARGIN, MARGIN + TITLE_SIZE, FONT_BOLD, TITLE_SIZE, TITLE);
        canvas.set_cursor(MARGIN + TITLE_SIZE + SECTION_GAP);

        let summary = Table {
            head: None,
            body: self.summary.iter().map(|row| row.to_vec()).collect(),
        };
        canvas.table(&summary, &TableStyle::grid_mm(&SUMMARY_WIDTHS_MM));

        let history_style = TableStyle::grid_mm(&HISTORY_WIDTHS_MM);
        for section in &self.sections {
            canvas.set_cursor(canvas.cursor() + SECTION_GAP);
            if let Some(heading) = &section.heading {
                // heading plus room for the table header and a first row
                canvas.reserve(HEADING_SIZE * 5.0);
                let top = canvas.cursor();
                canvas.text(MARGIN, top + HEADING_SIZE, FONT_BOLD, HEADING_SIZE, heading);
                canvas.set_cursor(top + HEADING_SIZE + SECTION_GAP / 2.0);
            }

            let table = Table {
                head: Some(HISTORY_COLUMNS.iter().map(|c| c.to_string()).collect()),
                body: section
                    .rows
                    .iter()
                    .map(|row| row.cells().iter().map(|c| c.to_string()).collect())
                    .collect(),
            };
            canvas.table(&table, &history_style);
        }

        canvas.into_pages()
    }
}

fn type1_font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn literal(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}
