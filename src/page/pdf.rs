use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::export::{Align, Canvas, FontWeight, Rgb};

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Advance widths in 1/1000 em for ASCII 32..=126. Bold text is measured
/// with the same table.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];
const DEFAULT_WIDTH: u16 = 556;

pub struct PdfCanvas {
    width_mm: f32,
    height_mm: f32,
    content: Vec<u8>,
    fill_color: Rgb,
    text_color: Rgb,
    font_size: f32,
    weight: FontWeight,
}

impl PdfCanvas {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            content: Vec::new(),
            fill_color: Rgb(0, 0, 0),
            text_color: Rgb(0, 0, 0),
            font_size: 16.0,
            weight: FontWeight::Normal,
        }
    }

    pub fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        let mut out: Vec<u8> = Vec::new();
        let mut offsets = Vec::with_capacity(6);

        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        offsets.push(out.len());
        out.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        offsets.push(out.len());
        out.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

        offsets.push(out.len());
        write!(
            out,
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << /F1 5 0 R /F2 6 0 R >> >> /Contents 4 0 R >>\nendobj\n",
            self.width_mm * PT_PER_MM,
            self.height_mm * PT_PER_MM
        )?;

        offsets.push(out.len());
        write!(out, "4 0 obj\n<< /Length {} >>\nstream\n", self.content.len())?;
        out.extend_from_slice(&self.content);
        out.extend_from_slice(b"\nendstream\nendobj\n");

        for (id, name) in [(5, "Helvetica"), (6, "Helvetica-Bold")] {
            offsets.push(out.len());
            write!(
                out,
                "{id} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{name} \
                 /Encoding /WinAnsiEncoding >>\nendobj\n"
            )?;
        }

        let xref = out.len();
        write!(out, "xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1)?;
        for offset in &offsets {
            write!(out, "{offset:010} 00000 n \n")?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
            offsets.len() + 1
        )?;

        w.write_all(&out)
    }

    fn x(&self, mm: f32) -> f32 {
        mm * PT_PER_MM
    }

    fn y(&self, mm: f32) -> f32 {
        (self.height_mm - mm) * PT_PER_MM
    }

    fn set_color(&mut self, color: Rgb) {
        let Rgb(r, g, b) = color;
        let _ = writeln!(
            self.content,
            "{:.3} {:.3} {:.3} rg",
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0
        );
    }
}

impl Canvas for PdfCanvas {
    fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.set_color(self.fill_color);
        let (px, py) = (self.x(x), self.y(y + height));
        let _ = writeln!(
            self.content,
            "{px:.2} {py:.2} {:.2} {:.2} re f",
            width * PT_PER_MM,
            height * PT_PER_MM
        );
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn set_font(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        let encoded = encode(text);
        let mut px = self.x(x);
        if align == Align::Center {
            px -= text_width(&encoded, self.font_size) / 2.0;
        }
        let py = self.y(y);
        let font = match self.weight {
            FontWeight::Normal => "F1",
            FontWeight::Bold => "F2",
        };

        self.set_color(self.text_color);
        let _ = write!(
            self.content,
            "BT /{font} {:.1} Tf {px:.2} {py:.2} Td (",
            self.font_size
        );
        self.content.extend_from_slice(&encoded);
        self.content.extend_from_slice(b") Tj ET\n");
    }

    fn save(&self, path: &Path) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)?;
        file.flush()
    }
}

fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\r' | '\n' | '\t' => out.push(b' '),
            c if (c as u32) < 0x20 => {}
            c if (c as u32) < 0x80 => out.push(c as u8),
            // C1 controls have no glyph; WinAnsi reuses those bytes
            c if (c as u32) < 0xA0 => out.push(b'?'),
            c if (c as u32) < 0x100 => out.push(c as u32 as u8),
            c => out.push(win_ansi_extra(c).unwrap_or(b'?')),
        }
    }
    out
}

// Characters outside Latin-1 that WinAnsi places in 0x80..=0x9F.
fn win_ansi_extra(c: char) -> Option<u8> {
    let byte = match c {
        '\u{20AC}' => 0x80, // €
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85, // …
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn glyph_width(byte: u8) -> u16 {
    match byte {
        32..=126 => HELVETICA_WIDTHS[(byte - 32) as usize],
        0x91 | 0x92 | 0x82 => 222,
        0x93 | 0x94 | 0x84 => 333,
        0x85 | 0x97 => 1000,
        _ => DEFAULT_WIDTH,
    }
}

fn text_width(encoded: &[u8], size: f32) -> f32 {
    let mut units: u32 = 0;
    let mut escaped = false;
    for &byte in encoded {
        if byte == b'\\' && !escaped {
            escaped = true;
            continue;
        }
        escaped = false;
        units += u32::from(glyph_width(byte));
    }
    units as f32 / 1000.0 * size
}
