use std::fs::{self, File};
use std::path::{Path, PathBuf};
use image::{Rgb, RgbImage};
use log::debug;
use rusttype::{Font, Scale, point};

use crate::card::{BOARD_SIZE, Card};
use crate::config::RenderSettings;
use crate::error::{BingoError, Result};

const FONT_CANDIDATES: &[&str] = &[
    "Arial", "Helvetica", "DejaVuSans", "LiberationSans", "SegoeUI", "Segoe UI", "NotoSans-Regular", "NotoSans", "Cantarell-Regular"
];

const BACKGROUND: Rgb<u8> = Rgb([245, 245, 245]);
const GRID_LINE: Rgb<u8> = Rgb([30, 30, 30]);
const TEXT: Rgb<u8> = Rgb([20, 20, 20]);
const MARKED: Rgb<u8> = Rgb([255, 236, 153]);
const WINNING: Rgb<u8> = Rgb([134, 219, 150]);

fn find_system_font_data(explicit: Option<&Path>) -> Option<Vec<u8>> {
    if let Some(path) = explicit {
        if let Ok(bytes) = fs::read(path) { return Some(bytes); }
    }

    let mut search_dirs: Vec<PathBuf> = Vec::new();
    if cfg!(target_os = "macos") {
        search_dirs.extend([
            PathBuf::from("/System/Library/Fonts"),
            PathBuf::from("/Library/Fonts"),
        ]);
        if let Some(home) = dirs_next::home_dir() { search_dirs.push(home.join("Library/Fonts")); }
    } else if cfg!(target_os = "windows") {
        if let Some(win) = std::env::var_os("WINDIR") { search_dirs.push(PathBuf::from(win).join("Fonts")); }
        search_dirs.push(PathBuf::from("C:/Windows/Fonts"));
    } else {
        search_dirs.extend([
            PathBuf::from("/usr/share/fonts"),
            PathBuf::from("/usr/local/share/fonts"),
        ]);
        if let Some(dir) = dirs_next::font_dir() { search_dirs.push(dir); }
        if let Some(home) = dirs_next::home_dir() { search_dirs.push(home.join(".fonts")); }
    }

    let font_files: Vec<PathBuf> = search_dirs
        .iter()
        .filter(|dir| dir.exists())
        .flat_map(|dir| walkdir::WalkDir::new(dir).follow_links(true).into_iter().filter_map(|e| e.ok()))
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_font_file(path))
        .collect();

    if font_files.is_empty() { return None; }

    for &cand in FONT_CANDIDATES {
        if let Some(p) = font_files.iter().find(|p| p.file_stem().and_then(|s| s.to_str()).is_some_and(|s| s.eq_ignore_ascii_case(cand))) {
            if let Ok(data) = fs::read(p) {
                debug!("using font {}", p.display());
                return Some(data);
            }
        }
    }

    // No preferred font: take the one covering the most printable ASCII
    let mut best: Option<(usize, Vec<u8>)> = None;
    for path in &font_files {
        let Ok(bytes) = fs::read(path) else { continue };
        let Some(font) = Font::try_from_vec(bytes.clone()) else { continue };
        let score = (32u8..=126u8).filter(|&ch| font.glyph(ch as char).id().0 != 0).count();
        if best.as_ref().is_none_or(|(s, _)| score > *s) {
            best = Some((score, bytes));
        }
    }
    best.map(|(_, bytes)| bytes)
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf"))
}

struct TextPainter {
    font: Font<'static>,
    scale: Scale,
    line_height: f32,
}

impl TextPainter {
    fn new(font_data: Vec<u8>, px: f32) -> Result<Self> {
        let font = Font::try_from_vec(font_data).ok_or_else(|| BingoError::Render("invalid font data".into()))?;
        let scale = Scale::uniform(px);
        let v = font.v_metrics(scale);
        let line_height = (v.ascent - v.descent + v.line_gap).ceil();
        Ok(Self { font, scale, line_height })
    }

    fn word_width(&self, word: &str) -> f32 {
        let v: Vec<_> = self.font.layout(word, self.scale, point(0.0, 0.0)).collect();
        if let Some(last) = v.last() {
            last.position().x + last.unpositioned().h_metrics().advance_width
        } else { 0.0 }
    }

    /// Greedy word wrap into lines no wider than `max_w`.
    fn wrap(&self, text: &str, max_w: f32) -> Vec<String> {
        let space = self.word_width(" ");
        let mut lines = Vec::new();
        let mut line = String::new();
        let mut line_width = 0.0f32;
        for w in text.split_whitespace() {
            let w_width = self.word_width(w);
            if !line.is_empty() && line_width + space + w_width > max_w {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            if !line.is_empty() { line.push(' '); line_width += space; }
            line.push_str(w);
            line_width += w_width;
        }
        if !line.is_empty() { lines.push(line); }
        lines
    }

    /// Draws wrapped text vertically centred in the box, dropping lines that
    /// do not fit.
    fn draw_wrapped(&self, img: &mut RgbImage, text: &str, left: u32, top: u32, max_w: u32, max_h: u32, color: Rgb<u8>) {
        let ascent = self.font.v_metrics(self.scale).ascent;
        let fitting = ((max_h as f32 / self.line_height).floor() as usize).max(1);
        let lines = self.wrap(text, max_w as f32);
        let shown = &lines[..lines.len().min(fitting)];
        let block_h = shown.len() as f32 * self.line_height;
        let offset = ((max_h as f32 - block_h) / 2.0).max(0.0);
        for (i, line) in shown.iter().enumerate() {
            self.draw_line(img, line, left, top, offset + i as f32 * self.line_height + ascent, color);
        }
    }

    fn draw_line(&self, img: &mut RgbImage, text: &str, left: u32, top: u32, baseline_y: f32, color: Rgb<u8>) {
        for glyph in self.font.layout(text, self.scale, point(0.0, baseline_y)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|x, y, v| {
                    if v < 0.05 { return; }
                    let gx = left as i32 + x as i32 + bb.min.x;
                    let gy = top as i32 + y as i32 + bb.min.y;
                    if gx >= 0 && gy >= 0 && (gx as u32) < img.width() && (gy as u32) < img.height() {
                        let dst = img.get_pixel_mut(gx as u32, gy as u32);
                        for i in 0..3 { dst[i] = ((dst[i] as f32)*(1.0 - v) + (color[i] as f32)*v) as u8; }
                    }
                });
            }
        }
    }
}

/// Background colour of a cell: winning lines over plain marks.
pub fn cell_fill(card: &Card, index: usize) -> Rgb<u8> {
    if card.is_on_bingo_line(index) {
        WINNING
    } else if card.is_marked(index) {
        MARKED
    } else {
        BACKGROUND
    }
}

/// Paints the card without text.
fn paint_grid(card: &Card, settings: &RenderSettings) -> RgbImage {
    let board = BOARD_SIZE as u32;
    let cell_px = settings.cell_px;
    let padding = settings.padding;
    let grid = board * cell_px;
    let mut img = RgbImage::from_pixel(grid + padding * 2, grid + padding * 2, BACKGROUND);

    for row in 0..board {
        for col in 0..board {
            let fill = cell_fill(card, (row * board + col) as usize);
            if fill == BACKGROUND { continue; }
            let (x0, y0) = (padding + col * cell_px, padding + row * cell_px);
            for y in y0..y0 + cell_px {
                for x in x0..x0 + cell_px { img.put_pixel(x, y, fill); }
            }
        }
    }

    let (img_w, img_h) = img.dimensions();
    for i in 0..=board {
        // the closing line falls outside the image when there is no padding
        let offset = (padding + i * cell_px).min(img_w.saturating_sub(1));
        for t in padding..=(padding + grid) {
            if t < img_w && offset < img_h { img.put_pixel(t, offset, GRID_LINE); }
            if offset < img_w && t < img_h { img.put_pixel(offset, t, GRID_LINE); }
        }
    }
    img
}

/// Renders the card into an image in memory.
pub fn render_card(card: &Card, settings: &RenderSettings) -> Result<RgbImage> {
    if settings.cell_px == 0 {
        return Err(BingoError::Render("cell_px must be greater than zero".into()));
    }
    let mut img = paint_grid(card, settings);

    let font_data = find_system_font_data(settings.font_path.as_deref())
        .ok_or_else(|| BingoError::Render("no system font found".into()))?;
    let painter = TextPainter::new(font_data, settings.font_px)?;

    let board = BOARD_SIZE as u32;
    let inner = settings.cell_px.saturating_sub(20);
    for (idx, word) in card.words().iter().enumerate() {
        let (row, col) = (idx as u32 / board, idx as u32 % board);
        let x0 = settings.padding + col * settings.cell_px + 10;
        let y0 = settings.padding + row * settings.cell_px + 10;
        painter.draw_wrapped(&mut img, word, x0, y0, inner, inner, TEXT);
    }
    Ok(img)
}

/// Writes the card as a PNG share image.
pub fn render_card_to_png(card: &Card, settings: &RenderSettings, path: &Path) -> Result<()> {
    let img = render_card(card, settings)?;
    let mut file = File::create(path)?;
    img.write_to(&mut file, image::ImageFormat::Png)?;
    debug!("card {} written to {}", card.id(), path.display());
    Ok(())
}
