//! Medical-certificate proof document.
//!
//! The layout is written against [`DocumentCanvas`] so it can be checked
//! without parsing PDF output; [`PdfCanvas`] is the real backend.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Pt, Rgb,
};

use crate::models::ClinicSettings;

const INCH: f32 = 72.0;
const PAGE_WIDTH: f32 = 8.5 * INCH;
const PAGE_HEIGHT: f32 = 11.0 * INCH;

const PARAGRAPH_WIDTH: f32 = 6.5 * INCH;
const PARAGRAPH_FONT_SIZE: f32 = 10.0;
const PARAGRAPH_LEADING: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ink {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Ink {
    pub const BLACK: Ink = Ink { r: 0.0, g: 0.0, b: 0.0 };
    pub const BLUE: Ink = Ink { r: 0.0, g: 0.0, b: 1.0 };
    pub const RED: Ink = Ink { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREY: Ink = Ink { r: 0.5, g: 0.5, b: 0.5 };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub ink: Ink,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, ink: Ink) -> Self {
        Self { face, size, ink }
    }

    pub const fn plain(size: f32) -> Self {
        Self::new(FontFace::Regular, size, Ink::BLACK)
    }
}

/// Drawing primitives needed by the certificate. Coordinates are points,
/// origin bottom-left, `y` is the text baseline.
pub trait DocumentCanvas {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, ink: Ink);

    fn stroke_circle(&mut self, center: (f32, f32), radius: f32, width: f32, ink: Ink);

    fn draw_centred_text(&mut self, text: &str, center_x: f32, y: f32, style: TextStyle) {
        let x = center_x - text_width(text, style.size) / 2.0;
        self.draw_text(text, x, y, style);
    }

    /// Wrap `text` to `max_width` and draw it so the block's bottom edge sits at `bottom`.
    fn draw_paragraph(
        &mut self,
        text: &str,
        x: f32,
        bottom: f32,
        max_width: f32,
        style: TextStyle,
        leading: f32,
    ) {
        let lines = wrap_paragraph(text, style.size, max_width);
        let count = lines.len();
        for (i, line) in lines.iter().enumerate() {
            let baseline = bottom + (count - 1 - i) as f32 * leading + (leading - style.size);
            self.draw_text(line, x, baseline, style);
        }
    }
}

// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722,
    722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722,
    667, 944, 667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556,
    556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500,
    500, 334, 260, 334, 584,
];

/// Approximate rendered width of `text` in points.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| match c as u32 {
            code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize] as u32,
            _ => 556,
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap. A single word wider than `max_width` gets its own line.
pub fn wrap_paragraph(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if text_width(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Everything that varies between two certificates.
#[derive(Debug, Clone)]
pub struct CertificateDetails<'a> {
    pub clinic: &'a ClinicSettings,
    pub patient_name: Option<&'a str>,
    pub reason: &'a str,
    pub date: String,
}

pub fn justification_text(patient_name: Option<&str>) -> String {
    format!(
        "This is to certify that {} has been examined and diagnosed with a temporary medical \
         condition requiring rest. The patient is advised to refrain from work or school \
         activities for a period of 1-2 days, starting from the date above.",
        patient_name.unwrap_or("the patient")
    )
}

/// Patient and reason go into the document information as well as the page.
pub fn certificate_info(details: &CertificateDetails) -> PdfInfo {
    let patient = details
        .patient_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("Not Specified");
    PdfInfo {
        title: "Medical Certificate".to_string(),
        subject: format!("Reason for Absence: {}", details.reason),
        keywords: vec![patient.to_string(), details.clinic.name.clone()],
    }
}

pub fn draw_certificate<C: DocumentCanvas + ?Sized>(canvas: &mut C, details: &CertificateDetails) {
    let clinic = details.clinic;
    let centre = PAGE_WIDTH / 2.0;
    let patient = details.patient_name.filter(|name| !name.trim().is_empty());

    // Letterhead
    canvas.draw_centred_text(
        "Medical Certificate",
        centre,
        10.7 * INCH,
        TextStyle::new(FontFace::Bold, 18.0, Ink::BLACK),
    );
    canvas.draw_centred_text(&clinic.name, centre, 10.4 * INCH, TextStyle::plain(12.0));
    canvas.draw_centred_text(&clinic.address, centre, 10.2 * INCH, TextStyle::plain(12.0));
    canvas.draw_centred_text(&clinic.contact, centre, 10.0 * INCH, TextStyle::plain(12.0));
    canvas.draw_line((1.0 * INCH, 9.8 * INCH), (7.5 * INCH, 9.8 * INCH), 1.0, Ink::BLACK);

    // Patient
    canvas.draw_text(
        &format!("Date: {}", details.date),
        1.0 * INCH,
        9.3 * INCH,
        TextStyle::plain(12.0),
    );
    canvas.draw_text(
        &format!("Patient Name: {}", patient.unwrap_or("Not Specified")),
        1.0 * INCH,
        9.0 * INCH,
        TextStyle::plain(12.0),
    );
    canvas.draw_text(
        &format!("Reason for Absence: {}", details.reason),
        1.0 * INCH,
        8.7 * INCH,
        TextStyle::plain(12.0),
    );

    canvas.draw_paragraph(
        &justification_text(patient),
        1.0 * INCH,
        7.8 * INCH,
        PARAGRAPH_WIDTH,
        TextStyle::plain(PARAGRAPH_FONT_SIZE),
        PARAGRAPH_LEADING,
    );

    // Physician
    canvas.draw_text(
        &format!("Certified by: Dr. {}, MD", clinic.doctor),
        1.0 * INCH,
        7.0 * INCH,
        TextStyle::plain(12.0),
    );
    canvas.draw_text(
        &format!("License No: {}", clinic.license_no),
        1.0 * INCH,
        6.7 * INCH,
        TextStyle::plain(12.0),
    );
    canvas.draw_text(
        &clinic.doctor,
        1.0 * INCH,
        6.4 * INCH,
        TextStyle::new(FontFace::Oblique, 14.0, Ink::BLUE),
    );

    // Stamp
    let stamp = TextStyle::new(FontFace::Regular, 8.0, Ink::RED);
    canvas.stroke_circle((6.0 * INCH, 6.5 * INCH), 0.5 * INCH, 2.0, Ink::RED);
    canvas.draw_centred_text(&clinic.name, 6.0 * INCH, 6.55 * INCH, stamp);
    canvas.draw_centred_text(&clinic.city, 6.0 * INCH, 6.45 * INCH, stamp);

    canvas.draw_centred_text(
        "This certificate is issued for medical purposes only.",
        centre,
        0.5 * INCH,
        TextStyle::new(FontFace::Oblique, 10.0, Ink::GREY),
    );
}

/// Document information written to the PDF trailer. Unlike page content
/// these strings are stored uncompressed, so the file stays searchable.
#[derive(Debug, Clone, Default)]
pub struct PdfInfo {
    pub title: String,
    pub subject: String,
    pub keywords: Vec<String>,
}

/// Single-page letter-size PDF built with printpdf's builtin Helvetica family.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: HashMap<FontFace, IndirectFontRef>,
}

impl PdfCanvas {
    pub fn new(info: PdfInfo) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            &info.title,
            Mm::from(Pt(PAGE_WIDTH)),
            Mm::from(Pt(PAGE_HEIGHT)),
            "certificate",
        );
        let doc = doc.with_subject(info.subject).with_keywords(info.keywords);

        let mut fonts = HashMap::new();
        for (face, builtin) in [
            (FontFace::Regular, BuiltinFont::Helvetica),
            (FontFace::Bold, BuiltinFont::HelveticaBold),
            (FontFace::Oblique, BuiltinFont::HelveticaOblique),
        ] {
            let font = doc
                .add_builtin_font(builtin)
                .map_err(|e| anyhow!("failed to load builtin font: {e:?}"))?;
            fonts.insert(face, font);
        }

        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self { doc, layer, fonts })
    }

    pub fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| anyhow!("failed to write PDF {}: {e:?}", path.display()))
    }

    fn color(ink: Ink) -> Color {
        Color::Rgb(Rgb::new(ink.r, ink.g, ink.b, None))
    }

    fn point(x: f32, y: f32) -> Point {
        Point::new(Mm::from(Pt(x)), Mm::from(Pt(y)))
    }
}

impl DocumentCanvas for PdfCanvas {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let Some(font) = self.fonts.get(&style.face) else {
            return;
        };
        self.layer.set_fill_color(Self::color(style.ink));
        self.layer
            .use_text(text, style.size, Mm::from(Pt(x)), Mm::from(Pt(y)), font);
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, ink: Ink) {
        self.layer.set_outline_color(Self::color(ink));
        self.layer.set_outline_thickness(width);
        self.layer.add_line(Line {
            points: vec![
                (Self::point(from.0, from.1), false),
                (Self::point(to.0, to.1), false),
            ],
            is_closed: false,
        });
    }

    fn stroke_circle(&mut self, center: (f32, f32), radius: f32, width: f32, ink: Ink) {
        self.layer.set_outline_color(Self::color(ink));
        self.layer.set_outline_thickness(width);
        let ring =
            printpdf::utils::calculate_points_for_circle(Pt(radius), Pt(center.0), Pt(center.1));
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::NonZero,
        });
    }
}

/// Render a certificate to `path`.
pub fn write_certificate(path: &Path, details: &CertificateDetails) -> Result<()> {
    let mut canvas = PdfCanvas::new(certificate_info(details))?;
    draw_certificate(&mut canvas, details);
    canvas.save(path)
}
