//! PDF transcripts.
//!
//! Layout: A4 portrait. The first page carries the institution header and
//! the student identity block; every page repeats the table header and ends
//! with a footer holding the generation time and page number.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use printpdf::image_crate::{self, GenericImageView};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};
use tracing::warn;

use crate::config::InstitutionConfig;
use crate::error::{NotasError, Result};
use crate::transcript::{Transcript, TranscriptRow};
use super::html::BLANK;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LOGO_SIZE: f32 = 24.0;
const ROW_HEIGHT: f32 = 7.0;
const FOOTER_Y: f32 = 10.0;
/// Lowest baseline a table row may use before breaking the page.
const TABLE_BOTTOM: f32 = 22.0;
/// Where the table header sits on the first page and on continuation pages.
const FIRST_TABLE_TOP: f32 = 218.0;
const CONTINUATION_TABLE_TOP: f32 = 275.0;

const BODY_SIZE: f32 = 9.0;
/// Rough Helvetica advance at `BODY_SIZE`, used to clip cell text.
const CHAR_WIDTH_MM: f32 = 1.75;

/// Table columns: title and width in millimetres.
const COLUMNS: [(&str, f32); 5] = [
    ("Asignatura", 62.0),
    ("Docente", 48.0),
    ("Nota Final", 22.0),
    ("Nota Especial", 24.0),
    ("Estado", 24.0),
];

/// Renders transcripts to PDF bytes.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    institution: String,
    logo: Option<PathBuf>,
}

impl PdfExporter {
    pub fn new(institution: impl Into<String>, logo: Option<PathBuf>) -> Self {
        Self {
            institution: institution.into(),
            logo,
        }
    }

    pub fn from_config(config: &InstitutionConfig) -> Self {
        Self::new(config.name.clone(), Some(config.logo.clone()))
    }

    /// Render `transcript`, stamping the footer with the current local time.
    pub fn render(&self, transcript: &Transcript) -> Result<Vec<u8>> {
        self.render_at(transcript, Local::now())
    }

    /// Render `transcript` with an explicit generation time.
    pub fn render_at(&self, transcript: &Transcript, generated_at: DateTime<Local>) -> Result<Vec<u8>> {
        let title = format!("Notas {}", transcript.student.student_id);
        let (doc, first_page, first_layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Contenido");

        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
        };

        let pages = paginate(&transcript.rows);
        let total = pages.len();
        let stamp = generated_at.format("%d/%m/%Y %H:%M").to_string();

        for (index, rows) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Contenido");
                doc.get_page(page).get_layer(layer)
            };

            let table_top = if index == 0 {
                self.draw_header(&layer, &fonts, transcript);
                FIRST_TABLE_TOP
            } else {
                CONTINUATION_TABLE_TOP
            };

            draw_table(&layer, &fonts, table_top, rows);
            draw_footer(&layer, &fonts, &stamp, index + 1, total);
        }

        doc.save_to_bytes().map_err(pdf_error)
    }

    fn draw_header(&self, layer: &PdfLayerReference, fonts: &Fonts, transcript: &Transcript) {
        let top = PAGE_HEIGHT - MARGIN;
        let logo_drawn = self
            .logo
            .as_deref()
            .is_some_and(|path| draw_logo(layer, path, MARGIN, top - LOGO_SIZE));
        if !logo_drawn {
            draw_logo_placeholder(layer, fonts, MARGIN, top - LOGO_SIZE);
        }

        let text_x = MARGIN + LOGO_SIZE + 6.0;
        layer.use_text(&self.institution, 16.0, Mm(text_x), Mm(top - 8.0), &fonts.bold);
        layer.use_text(
            "Constancia de Calificaciones",
            12.0,
            Mm(text_x),
            Mm(top - 15.0),
            &fonts.regular,
        );
        rule(layer, top - LOGO_SIZE - 4.0, 0.8);

        let student = &transcript.student;
        let mut y = top - LOGO_SIZE - 12.0;
        let identity = [
            ("Estudiante:", student.student_name.as_str()),
            ("Carnet:", student.student_id.as_str()),
            ("Carrera:", student.program.as_str()),
        ];
        for (label, value) in identity {
            layer.use_text(label, 10.0, Mm(MARGIN), Mm(y), &fonts.bold);
            layer.use_text(or_blank(value), 10.0, Mm(MARGIN + 26.0), Mm(y), &fonts.regular);
            y -= 6.0;
        }

        let period = format!(
            "Año {}  ·  Ciclo {}  ·  Régimen {}",
            or_blank(&student.year),
            or_blank(&student.term),
            or_blank(&student.regime)
        );
        layer.use_text(period, 10.0, Mm(MARGIN), Mm(y), &fonts.regular);
        y -= 6.0;

        let totals = transcript.summary.totals_line();
        layer.use_text(totals, BODY_SIZE, Mm(MARGIN), Mm(y), &fonts.regular);
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Split rows into pages; always at least one page, even with no rows.
fn paginate(rows: &[TranscriptRow]) -> Vec<&[TranscriptRow]> {
    let first = rows_fitting(FIRST_TABLE_TOP);
    let rest = rows_fitting(CONTINUATION_TABLE_TOP);

    let split = first.min(rows.len());
    let (head, mut tail) = rows.split_at(split);
    let mut pages = vec![head];
    while !tail.is_empty() {
        let (page, remaining) = tail.split_at(rest.min(tail.len()));
        pages.push(page);
        tail = remaining;
    }
    pages
}

/// Body rows that fit below a table header drawn at `top`.
fn rows_fitting(top: f32) -> usize {
    (((top - ROW_HEIGHT) - TABLE_BOTTOM) / ROW_HEIGHT).floor() as usize + 1
}

fn draw_table(layer: &PdfLayerReference, fonts: &Fonts, top: f32, rows: &[TranscriptRow]) {
    let mut x = MARGIN;
    for (title, width) in COLUMNS {
        layer.use_text(title, BODY_SIZE, Mm(x + 1.0), Mm(top), &fonts.bold);
        x += width;
    }
    rule(layer, top - 2.5, 0.6);

    let mut y = top - ROW_HEIGHT;
    for row in rows {
        let classification = &row.classification;
        let cells = [
            row.record.subject.as_str(),
            row.record.instructor.as_str(),
            classification.final_grade.as_str(),
            classification.special_grade.as_deref().unwrap_or(BLANK),
            classification.status.label(),
        ];

        let mut x = MARGIN;
        for ((_, width), value) in COLUMNS.iter().zip(cells) {
            layer.use_text(clip(or_blank(value), *width), BODY_SIZE, Mm(x + 1.0), Mm(y), &fonts.regular);
            x += width;
        }
        rule(layer, y - 2.5, 0.2);
        y -= ROW_HEIGHT;
    }
}

fn draw_footer(layer: &PdfLayerReference, fonts: &Fonts, stamp: &str, page: usize, total: usize) {
    rule(layer, FOOTER_Y + 4.0, 0.4);
    layer.use_text(format!("Generado el {stamp}"), 8.0, Mm(MARGIN), Mm(FOOTER_Y), &fonts.regular);
    layer.use_text(
        format!("Página {page} / {total}"),
        8.0,
        Mm(PAGE_WIDTH - MARGIN - 22.0),
        Mm(FOOTER_Y),
        &fonts.regular,
    );
}

/// Embed the logo scaled into a `LOGO_SIZE` square. Returns false when the
/// image is missing or unreadable.
fn draw_logo(layer: &PdfLayerReference, path: &Path, x: f32, y: f32) -> bool {
    if !path.is_file() {
        return false;
    }

    let image = match image_crate::open(path) {
        Ok(image) => image,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read logo, using placeholder");
            return false;
        }
    };

    let (width, height) = image.dimensions();
    let longest = width.max(height).max(1) as f32;
    // Pixels per inch that make the longest side exactly LOGO_SIZE mm.
    let dpi = longest * 25.4 / LOGO_SIZE;

    Image::from_dynamic_image(&image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    true
}

fn draw_logo_placeholder(layer: &PdfLayerReference, fonts: &Fonts, x: f32, y: f32) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + LOGO_SIZE), Mm(y)), false),
            (Point::new(Mm(x + LOGO_SIZE), Mm(y + LOGO_SIZE)), false),
            (Point::new(Mm(x), Mm(y + LOGO_SIZE)), false),
        ],
        is_closed: true,
    });
    layer.use_text("LOGO", 10.0, Mm(x + 6.5), Mm(y + LOGO_SIZE / 2.0 - 1.5), &fonts.bold);
}

/// Horizontal rule across the printable width.
fn rule(layer: &PdfLayerReference, y: f32, thickness: f32) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.55, 0.55, 0.55, None)));
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn or_blank(value: &str) -> &str {
    if value.trim().is_empty() { BLANK } else { value }
}

/// Shorten `value` so it fits a column `width` mm wide.
fn clip(value: &str, width: f32) -> String {
    let max_chars = ((width - 2.0) / CHAR_WIDTH_MM).floor().max(1.0) as usize;
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn pdf_error(e: impl std::fmt::Debug) -> NotasError {
    NotasError::Pdf(format!("{e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::GradeClassifier;
    use crate::dataset::GradeRecord;

    fn transcript(rows: usize) -> Transcript {
        let records: Vec<GradeRecord> = (0..rows)
            .map(|i| GradeRecord {
                row: i,
                student_id: "25-0022-02".to_string(),
                student_name: "Juan Pérez".to_string(),
                program: "Ingeniería".to_string(),
                subject: format!("Asignatura {i}"),
                instructor: "M. López".to_string(),
                final_grade: if i % 2 == 0 { "75".to_string() } else { "45".to_string() },
                special_grade: "61".to_string(),
                year: "2025".to_string(),
                term: "I".to_string(),
                regime: "Diurno".to_string(),
            })
            .collect();
        let refs: Vec<&GradeRecord> = records.iter().collect();
        Transcript::build(&refs, &GradeClassifier::default()).unwrap()
    }

    #[test]
    fn test_render_produces_pdf() {
        let exporter = PdfExporter::new("Universidad Central", None);
        let bytes = exporter.render(&transcript(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_logo_falls_back_to_placeholder() {
        let exporter = PdfExporter::new("Universidad Central", Some(PathBuf::from("/nonexistent/logo.png")));
        assert!(exporter.render(&transcript(1)).is_ok());
    }

    #[test]
    fn test_unreadable_logo_falls_back_to_placeholder() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        std::fs::write(file.path(), b"not an image").unwrap();
        let exporter = PdfExporter::new("Universidad Central", Some(file.path().to_path_buf()));
        assert!(exporter.render(&transcript(1)).is_ok());
    }

    #[test]
    fn test_paginate_breaks_long_transcripts() {
        let first = rows_fitting(FIRST_TABLE_TOP);
        let rest = rows_fitting(CONTINUATION_TABLE_TOP);
        assert!(rest > first);

        let t = transcript(first + rest + 1);
        let pages = paginate(&t.rows);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), first);
        assert_eq!(pages[1].len(), rest);
        assert_eq!(pages[2].len(), 1);
        assert_eq!(pages.iter().map(|p| p.len()).sum::<usize>(), t.rows.len());
    }

    #[test]
    fn test_paginate_empty_still_has_a_page() {
        assert_eq!(paginate(&[]).len(), 1);
    }

    #[test]
    fn test_multi_page_render() {
        let exporter = PdfExporter::new("Universidad Central", None);
        let bytes = exporter.render(&transcript(90)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("Cálculo", 62.0), "Cálculo");
        let long = "x".repeat(100);
        let clipped = clip(&long, 22.0);
        assert!(clipped.ends_with('…'));
        assert_eq!(clipped.chars().count(), ((22.0 - 2.0) / CHAR_WIDTH_MM) as usize);
    }
}
