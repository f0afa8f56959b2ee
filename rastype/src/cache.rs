//! Rendered-glyph caching.
//!
//! A glyph keeps its loaded outline plus the scanline intersections
//! built for the last scale it was drawn at, so repeated draws of the
//! same character at the same size skip both parsing and flattening.
//! The cache is bounded: when it reaches its quota, the least recently
//! drawn half is discarded.

use std::collections::HashMap;

use crate::outline::Outline;
use crate::raster::{Bitmap, ScaledPoint, Scan};

/// A cached glyph: either a blank advance or an outline with its
/// per-scale scanline state.
pub enum Glyph {
    Space {
        advance: u16,
        frame: u64,
    },
    Outline {
        outline: Outline,
        scan: Option<Scan>,
        frame: u64,
    },
}

impl Glyph {
    pub fn space(advance: u16) -> Glyph {
        Glyph::Space { advance, frame: 0 }
    }

    pub fn outline(outline: Outline) -> Glyph {
        Glyph::Outline {
            outline,
            scan: None,
            frame: 0,
        }
    }

    fn frame(&self) -> u64 {
        match self {
            Glyph::Space { frame, .. } | Glyph::Outline { frame, .. } => *frame,
        }
    }

    /// The horizontal advance in pixels. An outline advances by its
    /// scaled x-max rather than its hmtx advance, so adjacent glyphs
    /// pack against their ink extents.
    pub fn advance(&self, scale: f64) -> f64 {
        match self {
            Glyph::Space { advance, .. } => *advance as f64 * scale,
            Glyph::Outline { outline, .. } => outline.bbox.x_max as f64 * scale,
        }
    }

    /// Rasterizes this glyph into `bitmap` at `(x, y)` and returns its
    /// advance. The scanline state is rebuilt when the scale differs
    /// from the cached one.
    pub fn draw(&mut self, scale: f64, bitmap: &mut Bitmap, x: f64, y: i32, frame: u64) -> f64 {
        match self {
            Glyph::Space { frame: touched, .. } => *touched = frame,
            Glyph::Outline {
                outline,
                scan,
                frame: touched,
            } => {
                *touched = frame;
                if scan.as_ref().map_or(true, |scan| scan.scale() != scale) {
                    *scan = Some(build_scan(outline, scale));
                }
                if let Some(scan) = scan {
                    scan.write(bitmap, x, y);
                }
            }
        }
        self.advance(scale)
    }
}

/// Flattens every contour of `outline` into scanline intersections at
/// the given scale. A contour is a sequence of curve runs delimited by
/// on-curve points; the final run closes back to the start point.
fn build_scan(outline: &Outline, scale: f64) -> Scan {
    let mut scan = Scan::new(scale, outline.bbox.y_min, outline.bbox.y_max);
    for contour in &outline.contours {
        let scaled: Vec<ScaledPoint> = contour
            .iter()
            .map(|point| ScaledPoint {
                x: point.x as f64 * scale,
                y: point.y as f64 * scale,
            })
            .collect();
        let Some(&start) = scaled.first() else {
            continue;
        };
        let mut path = vec![start];
        for (point, source) in scaled.iter().zip(contour).skip(1) {
            path.push(*point);
            if source.on_curve {
                scan.draw_path(&path);
                path = vec![*point];
            }
        }
        path.push(start);
        scan.draw_path(&path);
    }
    scan
}

/// A bounded map from character code to rendered glyph.
pub struct GlyphCache {
    glyphs: HashMap<u32, Glyph>,
    quota: usize,
    frame: u64,
}

impl GlyphCache {
    pub fn new(quota: usize) -> GlyphCache {
        GlyphCache {
            glyphs: HashMap::new(),
            quota,
            frame: 0,
        }
    }

    /// Advances the draw counter. Each glyph drawn takes one frame;
    /// glyphs record the frame they were last used in.
    pub fn next_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns the glyph for `code`, building it with `build` on a
    /// miss. Inserting past the quota first evicts the least recently
    /// used half of the cache.
    pub fn get_or_insert_with<F>(&mut self, code: u32, build: F) -> &mut Glyph
    where
        F: FnOnce() -> Glyph,
    {
        if !self.glyphs.contains_key(&code) && self.glyphs.len() >= self.quota {
            self.evict();
        }
        self.glyphs.entry(code).or_insert_with(build)
    }

    fn evict(&mut self) {
        let mut entries: Vec<(u64, u32)> = self
            .glyphs
            .iter()
            .map(|(code, glyph)| (glyph.frame(), *code))
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, code) in entries.drain(entries.len() / 2..) {
            self.glyphs.remove(&code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eviction_keeps_recently_drawn_half() {
        let mut cache = GlyphCache::new(4);
        for code in 0..4u32 {
            let frame = cache.next_frame();
            if let Glyph::Space { frame: touched, .. } =
                cache.get_or_insert_with(code, || Glyph::space(100))
            {
                *touched = frame;
            }
        }
        // cache is full; inserting a fifth drops the two oldest
        cache.get_or_insert_with(4, || Glyph::space(100));
        assert_eq!(cache.len(), 3);
        assert!(cache.glyphs.contains_key(&2));
        assert!(cache.glyphs.contains_key(&3));
        assert!(cache.glyphs.contains_key(&4));
    }

    #[test]
    fn space_glyph_advances_without_ink() {
        let mut glyph = Glyph::space(500);
        let mut data = [0u8; 8];
        let mut bitmap = Bitmap::new(&mut data, 8, 8, false);
        let advance = glyph.draw(0.01, &mut bitmap, 0.0, 0, 1);
        assert_eq!(advance, 5.0);
        assert!(data.iter().all(|byte| *byte == 0));
    }
}
