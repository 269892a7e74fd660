use std::io;
use std::path::{Path, PathBuf};

use super::pdf::PdfCanvas;
use super::presenter::ResultsView;

pub const FILE_NAME: &str = "nyc-taxi-fare-estimate.pdf";
// millimetres on A4, origin top left
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

pub const TAXI_YELLOW: Rgb = Rgb(255, 214, 10);
pub const ASPHALT_BLACK: Rgb = Rgb(46, 46, 46);
pub const PEARL_WHITE: Rgb = Rgb(248, 249, 250);

const TABLE_TOP: f32 = 180.0;
const ROW_HEIGHT: f32 = 10.0;
const LABEL_X: f32 = 20.0;
const AMOUNT_X: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

pub trait Canvas {
    fn set_fill_color(&mut self, color: Rgb);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn set_text_color(&mut self, color: Rgb);
    fn set_font_size(&mut self, size: f32);
    fn set_font(&mut self, weight: FontWeight);
    fn text(&mut self, text: &str, x: f32, y: f32, align: Align);
    fn save(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub pickup: String,
    pub dropoff: String,
    pub view: ResultsView,
}

pub fn layout(canvas: &mut dyn Canvas, summary: &Summary) {
    let view = &summary.view;

    canvas.set_fill_color(TAXI_YELLOW);
    canvas.fill_rect(0.0, 0.0, PAGE_WIDTH, 30.0);

    canvas.set_text_color(ASPHALT_BLACK);
    canvas.set_font_size(24.0);
    canvas.set_font(FontWeight::Bold);
    canvas.text("NYC Taxi Fare Estimate", PAGE_WIDTH / 2.0, 20.0, Align::Center);

    section(canvas, "Trip Details", 40.0);

    let trip = [
        format!("Pickup: {}", summary.pickup),
        format!("Dropoff: {}", summary.dropoff),
        format!("Distance: {}", view.distance),
        format!("Duration: {}", view.duration),
        format!("Date: {}", view.pickup_date),
        format!("Day: {}", view.pickup_day),
        format!("Time: {}", view.pickup_hour),
    ];
    for (i, line) in trip.iter().enumerate() {
        canvas.text(line, LABEL_X, 70.0 + i as f32 * 10.0, Align::Left);
    }

    section(canvas, "Fare Details", 150.0);

    let table = [
        ("Charge", "Amount"),
        ("Base Fare", view.fare_amount.as_str()),
        ("Total Fare (incl. surcharges)", view.total_amount.as_str()),
    ];

    let mut y = TABLE_TOP;
    for (row, (label, amount)) in table.iter().enumerate() {
        canvas.set_font(if row == 0 { FontWeight::Bold } else { FontWeight::Normal });
        canvas.text(label, LABEL_X, y, Align::Left);
        canvas.text(amount, AMOUNT_X, y, Align::Left);
        y += ROW_HEIGHT;
    }

    canvas.set_font_size(10.0);
    canvas.set_font(FontWeight::Normal);
    canvas.set_text_color(ASPHALT_BLACK);
    canvas.text(
        "This is an estimate only. Actual fare may vary.",
        PAGE_WIDTH / 2.0,
        285.0,
        Align::Center,
    );
}

// Pearl-white block with a bold heading, leaves the canvas at normal 12pt.
fn section(canvas: &mut dyn Canvas, title: &str, top: f32) {
    canvas.set_fill_color(PEARL_WHITE);
    canvas.fill_rect(10.0, top, 190.0, 100.0);

    canvas.set_text_color(ASPHALT_BLACK);
    canvas.set_font_size(16.0);
    canvas.set_font(FontWeight::Bold);
    canvas.text(title, LABEL_X, top + 15.0, Align::Left);

    canvas.set_font_size(12.0);
    canvas.set_font(FontWeight::Normal);
}

#[derive(Debug, Clone)]
pub struct SummaryExporter {
    dir: PathBuf,
}

impl SummaryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    pub fn export(&self, summary: &Summary) -> anyhow::Result<PathBuf> {
        let mut canvas = PdfCanvas::new(PAGE_WIDTH, PAGE_HEIGHT);
        layout(&mut canvas, summary);

        let path = self.path();
        canvas
            .save(&path)
            .map_err(|e| anyhow::anyhow!("error writing {}: {e}", path.display()))?;

        log::info!("Saved fare summary to {}", path.display());
        Ok(path)
    }
}
