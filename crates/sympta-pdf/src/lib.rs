//! sympta-pdf — renders a stored report as a downloadable PDF.
//!
//! One A4 page of fixed draw calls via `printpdf` builtin fonts; no layout
//! engine, no pagination. Reports are short enough that a single page is an
//! invariant, not a limitation.

use std::io::BufWriter;

use printpdf::*;
use thiserror::Error;

use sympta_db::Report;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF write error: {0}")]
    Write(String),
}

/// Generate the PDF document for one report. Returns the raw PDF bytes.
pub fn generate_report_pdf(report: &Report, username: &str) -> Result<Vec<u8>, PdfError> {
    let title = format!("Symptom Report — {}", report.disease);
    let (doc, page1, layer1) = PdfDocument::new(&title, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Font(e.to_string()))?;

    let mut y = Mm(280.0);

    layer.use_text(&title, 16.0, Mm(20.0), y, &bold);
    y -= Mm(7.0);
    layer.use_text(
        format!("Prepared for {} on {}", username, report.created_at.format("%Y-%m-%d %H:%M UTC")),
        9.0,
        Mm(20.0),
        y,
        &font,
    );
    y -= Mm(12.0);

    layer.use_text("REPORTED SYMPTOMS:", 11.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    for line in wrap_text(&report.typed_text, 90) {
        layer.use_text(&line, 10.0, Mm(25.0), y, &font);
        y -= Mm(5.0);
    }
    y -= Mm(6.0);

    layer.use_text("BEST MATCH:", 11.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    layer.use_text(
        format!("{} ({}% match)", report.disease, report.match_percent),
        10.0,
        Mm(25.0),
        y,
        &font,
    );
    y -= Mm(10.0);

    layer.use_text("PRECAUTION:", 11.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    for line in wrap_text(&report.precaution, 90) {
        layer.use_text(&line, 10.0, Mm(25.0), y, &font);
        y -= Mm(5.0);
    }
    y -= Mm(6.0);

    layer.use_text("MEDICINE:", 11.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    for line in wrap_text(&report.medicine, 90) {
        layer.use_text(&line, 10.0, Mm(25.0), y, &font);
        y -= Mm(5.0);
    }
    y -= Mm(12.0);

    layer.use_text(
        "This report is generated from a static symptom table and is not medical advice.",
        8.0,
        Mm(20.0),
        y,
        &bold,
    );

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    buf.into_inner().map_err(|e| PdfError::Write(e.to_string()))
}

/// Greedy word wrap at a character budget per line.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
