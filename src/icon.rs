use ab_glyph::{Font, FontVec, OutlinedGlyph, PxScale, ScaleFont, point};
use anyhow::{Context, Result};
use image::RgbImage;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tiny_skia::{Color, Paint, Pixmap, PremultipliedColorU8, Rect, Transform};

use crate::config::{
    BACKGROUND_RGB, CURSOR_GLYPH_RGB, CURSOR_PADDING_RATIO, CURSOR_RGB, CURSOR_WIDTH_RATIO,
    FONT_SIZE_RATIO, GLYPH_RGB, INSET_RATIO, LOCAL_FONT_CANDIDATES, SYSTEM_FONT_CANDIDATES, scaled,
};

/// Letters drawn in green, with their quadrant. The bottom-right `S` sits on
/// the cursor and is handled separately.
const QUADRANT_LETTERS: [(char, u32, u32); 3] = [('B', 0, 0), ('O', 1, 0), ('S', 0, 1)];
const CURSOR_LETTER: char = 'S';

const BITMAP_COLS: i32 = 5;
const BITMAP_ROWS: i32 = 7;

/// Ink bounding box in canvas pixels, right and bottom exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl GlyphBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

pub enum FontFace {
    Outline { font: FontVec, source: PathBuf },
    /// Built-in 5x7 letters, scaled up in whole pixels.
    Bitmap,
}

impl FontFace {
    /// First candidate font that parses, else the bitmap face.
    pub fn load() -> Self {
        for path in font_candidates() {
            match Self::from_file(&path) {
                Ok(face) => {
                    log::debug!("using font {}", path.display());
                    return face;
                }
                Err(err) => log::trace!("{err:#}"),
            }
        }
        println!("Warning: No suitable font found, using default (may look different)");
        FontFace::Bitmap
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path).with_context(|| format!("read font {}", path.display()))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|_| anyhow::anyhow!("parse font {}", path.display()))?;
        Ok(FontFace::Outline {
            font,
            source: path.to_path_buf(),
        })
    }

    pub fn source(&self) -> Option<&Path> {
        match self {
            FontFace::Outline { source, .. } => Some(source),
            FontFace::Bitmap => None,
        }
    }

    /// Ink bounds of `ch` drawn middle/middle anchored at `center`.
    pub fn glyph_bounds(&self, ch: char, center: (i32, i32), font_size: u32) -> GlyphBounds {
        match self {
            FontFace::Outline { font, .. } => match outline(font, ch, center, font_size) {
                Some(glyph) => {
                    let rect = glyph.px_bounds();
                    GlyphBounds {
                        left: rect.min.x.floor() as i32,
                        top: rect.min.y.floor() as i32,
                        right: rect.max.x.ceil() as i32,
                        bottom: rect.max.y.ceil() as i32,
                    }
                }
                None => GlyphBounds {
                    left: center.0,
                    top: center.1,
                    right: center.0,
                    bottom: center.1,
                },
            },
            FontFace::Bitmap => {
                let (left, top, unit) = bitmap_origin(center, font_size);
                let rows = bitmap_rows(ch);
                let lit = |row: usize, col: usize| rows[row] & (0b10000 >> col) != 0;
                let mut bounds: Option<GlyphBounds> = None;
                for row in 0..BITMAP_ROWS as usize {
                    for col in 0..BITMAP_COLS as usize {
                        if !lit(row, col) {
                            continue;
                        }
                        let x = left + col as i32 * unit;
                        let y = top + row as i32 * unit;
                        let cell = GlyphBounds {
                            left: x,
                            top: y,
                            right: x + unit,
                            bottom: y + unit,
                        };
                        bounds = Some(match bounds {
                            Some(b) => GlyphBounds {
                                left: b.left.min(cell.left),
                                top: b.top.min(cell.top),
                                right: b.right.max(cell.right),
                                bottom: b.bottom.max(cell.bottom),
                            },
                            None => cell,
                        });
                    }
                }
                bounds.unwrap_or(GlyphBounds {
                    left: center.0,
                    top: center.1,
                    right: center.0,
                    bottom: center.1,
                })
            }
        }
    }

    pub fn draw_glyph(
        &self,
        pixmap: &mut Pixmap,
        ch: char,
        center: (i32, i32),
        font_size: u32,
        rgb: [u8; 3],
    ) {
        match self {
            FontFace::Outline { font, .. } => {
                let Some(glyph) = outline(font, ch, center, font_size) else {
                    return;
                };
                let bounds = glyph.px_bounds();
                let (x0, y0) = (bounds.min.x as i32, bounds.min.y as i32);
                glyph.draw(|x, y, coverage| {
                    blend(pixmap, x0 + x as i32, y0 + y as i32, rgb, coverage);
                });
            }
            FontFace::Bitmap => {
                let (left, top, unit) = bitmap_origin(center, font_size);
                let mut paint = Paint::default();
                paint.set_color(Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
                for (row, bits) in bitmap_rows(ch).iter().enumerate() {
                    for col in 0..BITMAP_COLS {
                        if bits & (0b10000 >> col) == 0 {
                            continue;
                        }
                        let x = left + col * unit;
                        let y = top + row as i32 * unit;
                        if let Some(rect) =
                            Rect::from_xywh(x as f32, y as f32, unit as f32, unit as f32)
                        {
                            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                        }
                    }
                }
            }
        }
    }
}

fn font_candidates() -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    LOCAL_FONT_CANDIDATES
        .iter()
        .map(|path| root.join(path))
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from))
        .collect()
}

/// `font_size` is the em size in pixels, so the scale covers the full
/// ascent-to-descent height.
fn px_scale(font: &FontVec, font_size: u32) -> PxScale {
    let em = font_size as f32;
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(em * font.height_unscaled() / units),
        _ => PxScale::from(em),
    }
}

fn outline(font: &FontVec, ch: char, center: (i32, i32), font_size: u32) -> Option<OutlinedGlyph> {
    let scale = px_scale(font, font_size);
    let scaled_font = font.as_scaled(scale);
    let id = font.glyph_id(ch);
    let x = center.0 as f32 - scaled_font.h_advance(id) / 2.0;
    let baseline = center.1 as f32 + (scaled_font.ascent() + scaled_font.descent()) / 2.0;
    font.outline_glyph(id.with_scale_and_position(scale, point(x, baseline)))
}

fn bitmap_origin(center: (i32, i32), font_size: u32) -> (i32, i32, i32) {
    let unit = (font_size as i32 / 10).max(1);
    (
        center.0 - BITMAP_COLS * unit / 2,
        center.1 - BITMAP_ROWS * unit / 2,
        unit,
    )
}

fn bitmap_rows(ch: char) -> [u8; 7] {
    match ch {
        'B' => [
            0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110,
        ],
        'O' => [
            0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110,
        ],
        'S' => [
            0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110,
        ],
        _ => [0; 7],
    }
}

fn blend(pixmap: &mut Pixmap, x: i32, y: i32, rgb: [u8; 3], coverage: f32) {
    let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
    if x < 0 || y < 0 || x >= width || y >= height {
        return;
    }
    let pixel = &mut pixmap.pixels_mut()[(y * width + x) as usize];
    let alpha = coverage.clamp(0.0, 1.0);
    let mix = |fg: u8, bg: u8| (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
    if let Some(color) = PremultipliedColorU8::from_rgba(
        mix(rgb[0], pixel.red()),
        mix(rgb[1], pixel.green()),
        mix(rgb[2], pixel.blue()),
        255,
    ) {
        *pixel = color;
    }
}

pub fn font_size_for(size: u32) -> u32 {
    scaled(size, FONT_SIZE_RATIO)
}

/// Center of quadrant (`qx`, `qy`), pulled toward the canvas center by the
/// inset.
pub fn glyph_center(size: u32, qx: u32, qy: u32) -> (i32, i32) {
    let half = (size / 2) as i32;
    let inset = scaled(size, INSET_RATIO) as i32;
    let toward_center = |q: u32| if q == 0 { inset } else { -inset };
    (
        qx as i32 * half + half / 2 + toward_center(qx),
        qy as i32 * half + half / 2 + toward_center(qy),
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorLayout {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub padding: u32,
}

impl CursorLayout {
    pub fn around(size: u32, center_x: i32, glyph: GlyphBounds) -> Self {
        let padding = scaled(size, CURSOR_PADDING_RATIO);
        let width = scaled(size, CURSOR_WIDTH_RATIO);
        Self {
            x: center_x - (width / 2) as i32,
            y: glyph.top - padding as i32,
            width,
            height: (glyph.height() + 2 * padding as i32).max(0) as u32,
            padding,
        }
    }

    /// Corners are inclusive, so the filled area is one pixel larger than
    /// `width` x `height`.
    fn rect(&self) -> Option<Rect> {
        Rect::from_xywh(
            self.x as f32,
            self.y as f32,
            (self.width + 1) as f32,
            (self.height + 1) as f32,
        )
    }
}

pub fn cursor_layout(size: u32, face: &FontFace) -> (CursorLayout, GlyphBounds) {
    let center = glyph_center(size, 1, 1);
    let bounds = face.glyph_bounds(CURSOR_LETTER, center, font_size_for(size));
    (CursorLayout::around(size, center.0, bounds), bounds)
}

pub fn render_icon(size: u32, face: &FontFace) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(size, size).with_context(|| format!("create {size}px canvas"))?;
    let [r, g, b] = BACKGROUND_RGB;
    pixmap.fill(Color::from_rgba8(r, g, b, 255));

    let font_size = font_size_for(size);
    for (letter, qx, qy) in QUADRANT_LETTERS {
        let center = glyph_center(size, qx, qy);
        face.draw_glyph(&mut pixmap, letter, center, font_size, GLYPH_RGB);
    }

    let (cursor, _) = cursor_layout(size, face);
    if let Some(rect) = cursor.rect() {
        let mut paint = Paint::default();
        paint.set_color(Color::from_rgba8(CURSOR_RGB[0], CURSOR_RGB[1], CURSOR_RGB[2], 255));
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
    face.draw_glyph(
        &mut pixmap,
        CURSOR_LETTER,
        glyph_center(size, 1, 1),
        font_size,
        CURSOR_GLYPH_RGB,
    );
    Ok(pixmap)
}

pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let rgb = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| [pixel.red(), pixel.green(), pixel.blue()])
        .collect::<Vec<_>>();
    let image = RgbImage::from_raw(pixmap.width(), pixmap.height(), rgb)
        .context("pixmap to rgb image")?;
    image
        .save(path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
