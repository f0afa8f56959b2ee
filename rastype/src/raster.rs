//! Scanline rasterization.
//!
//! Contours are flattened into per-scanline x-intersection lists
//! ([`Scan`]), which are then filled pairwise into a packed 1-bit
//! [`Bitmap`]. Flattening subdivides curves until consecutive samples
//! land in the same pixel column, with an explicit worklist and a depth
//! cap so degenerate curves cannot overflow the stack.

/// A point on a scaled outline or curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledPoint {
    pub x: f64,
    pub y: f64,
}

/// Subdivision stops at this depth and emits a chord instead.
const MAX_SUBDIVISION_DEPTH: u32 = 24;

/// Evaluates a Bezier curve of degree `points.len() - 1` at `t` using
/// the Bernstein forms for the degrees glyph contours produce.
fn eval_bezier(points: &[ScaledPoint], t: f64) -> ScaledPoint {
    let u = 1.0 - t;
    let (x, y) = match points {
        [p0, p1, p2] => (
            u * u * p0.x + 2.0 * u * t * p1.x + t * t * p2.x,
            u * u * p0.y + 2.0 * u * t * p1.y + t * t * p2.y,
        ),
        [p0, p1, p2, p3] => {
            let u2 = u * u;
            let t2 = t * t;
            (
                u2 * u * p0.x + 3.0 * u2 * t * p1.x + 3.0 * u * t2 * p2.x + t2 * t * p3.x,
                u2 * u * p0.y + 3.0 * u2 * t * p1.y + 3.0 * u * t2 * p2.y + t2 * t * p3.y,
            )
        }
        [p0, p1, p2, p3, p4] => {
            let u2 = u * u;
            let t2 = t * t;
            let ut = u * t;
            (
                u2 * u2 * p0.x
                    + 4.0 * u2 * ut * p1.x
                    + 6.0 * u2 * t2 * p2.x
                    + 4.0 * ut * t2 * p3.x
                    + t2 * t2 * p4.x,
                u2 * u2 * p0.y
                    + 4.0 * u2 * ut * p1.y
                    + 6.0 * u2 * t2 * p2.y
                    + 4.0 * ut * t2 * p3.y
                    + t2 * t2 * p4.y,
            )
        }
        // callers only pass 3 to 5 control points
        _ => (0.0, 0.0),
    };
    ScaledPoint { x, y }
}

/// Per-glyph, per-scale rasterization state: one list of x
/// intersections per integer scanline covered by the glyph's vertical
/// extent.
pub struct Scan {
    scale: f64,
    y_min: i32,
    lines: Vec<Vec<f64>>,
    dirty: bool,
}

impl Scan {
    /// Creates an empty scan covering `[y_min, y_max]` font units at
    /// the given scale.
    pub fn new(scale: f64, y_min: i16, y_max: i16) -> Scan {
        let y_lo = (scale * y_min as f64).floor() as i32;
        let y_hi = (scale * y_max as f64).floor() as i32;
        let count = (y_hi - y_lo + 1).max(0) as usize;
        Scan {
            scale,
            y_min: y_lo,
            lines: vec![Vec::new(); count],
            dirty: false,
        }
    }

    /// The scale this scan was built for. A different requested scale
    /// means the scan must be rebuilt.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Records the x-intersections of a line segment with every
    /// scanline strictly inside its vertical span.
    ///
    /// The x for each crossing is interpolated from the lower
    /// endpoint's floored y, which keeps adjacent segments of a
    /// contour consistent at shared scanlines.
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        if y0 == y1 {
            return;
        }
        let (x0, y0, x1, y1) = if y0 > y1 {
            (x1, y1, x0, y0)
        } else {
            (x0, y0, x1, y1)
        };
        let slope = (x1 - x0) / (y1 - y0);
        let y_lo = y0.floor() as i32;
        let y_hi = y1.floor() as i32;
        for y in y_lo..y_hi {
            let index = y - self.y_min;
            if let Some(line) = usize::try_from(index)
                .ok()
                .and_then(|index| self.lines.get_mut(index))
            {
                line.push(x0 + slope * (y - y_lo) as f64);
            }
        }
    }

    /// Flattens one curve span, subdividing until consecutive samples
    /// share a pixel column.
    fn flatten(
        &mut self,
        curve: &[ScaledPoint],
        t0: f64,
        p0: ScaledPoint,
        t1: f64,
        p1: ScaledPoint,
    ) {
        let mut worklist = vec![(t0, p0, t1, p1, 0u32)];
        while let Some((t0, p0, t1, p1, depth)) = worklist.pop() {
            if p0.x.floor() != p1.x.floor() && depth < MAX_SUBDIVISION_DEPTH {
                if p0.y.floor() == p1.y.floor() {
                    continue;
                }
                let tm = (t0 + t1) * 0.5;
                let pm = eval_bezier(curve, tm);
                worklist.push((tm, pm, t1, p1, depth + 1));
                worklist.push((t0, p0, tm, pm, depth + 1));
                continue;
            }
            self.draw_line(p0.x, p0.y, p1.x, p1.y);
        }
    }

    fn draw_curve(&mut self, curve: &[ScaledPoint], samples: &[f64]) {
        let mut previous = (samples[0], eval_bezier(curve, samples[0]));
        for &t in &samples[1..] {
            let point = (t, eval_bezier(curve, t));
            self.flatten(curve, previous.0, previous.1, point.0, point.1);
            previous = point;
        }
    }

    /// Draws a path of 2 or more points: a line for 2, a quadratic for
    /// 3, a quartic for exactly 5, and a chain of cubics otherwise.
    pub fn draw_path(&mut self, path: &[ScaledPoint]) {
        self.dirty = true;
        if path.len() == 5 {
            self.draw_curve(path, &[0.0, 0.25, 0.75, 1.0]);
            return;
        }
        let mut rest = path;
        while rest.len() >= 4 {
            self.draw_curve(&rest[..4], &[0.0, 0.25, 0.75, 1.0]);
            rest = &rest[3..];
        }
        match rest {
            [p0, p1] => self.draw_line(p0.x, p0.y, p1.x, p1.y),
            _ if rest.len() == 3 => self.draw_curve(rest, &[0.0, 0.5, 1.0]),
            _ => {}
        }
    }

    /// Fills this scan into `bitmap` with its origin at `(x, y)`.
    ///
    /// Scanlines are sorted on the first write after a draw; the sorted
    /// x-values pair up into spans (closed contours cross each scanline
    /// an even number of times). A scanline left with an unpaired
    /// crossing by a malformed outline drops the leftover.
    pub fn write(&mut self, bitmap: &mut Bitmap, x: f64, y: i32) {
        if self.dirty {
            for line in &mut self.lines {
                line.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            }
            self.dirty = false;
        }
        let mut row = y + self.y_min;
        for line in &self.lines {
            for pair in line.chunks_exact(2) {
                bitmap.fill(row, x + pair[0], x + pair[1]);
            }
            row += 1;
        }
    }
}

/// A packed 1-bit-per-pixel bitmap over a caller-provided buffer.
pub struct Bitmap<'a> {
    data: &'a mut [u8],
    line_size: usize,
    width: i32,
    height: i32,
    edges_only: bool,
}

impl<'a> Bitmap<'a> {
    /// Wraps `data` as a `width` x `height` bitmap with row stride
    /// `ceil(width / 8)` bytes. With `edges_only` set, fills mark only
    /// the two boundary pixels of each span.
    pub fn new(data: &'a mut [u8], width: usize, height: usize, edges_only: bool) -> Bitmap<'a> {
        Bitmap {
            data,
            line_size: (width + 7) / 8,
            width: width as i32,
            height: height as i32,
            edges_only,
        }
    }

    fn set_bit(&mut self, row: i32, x: i32) {
        let offset = row as usize * self.line_size + (x >> 3) as usize;
        if let Some(byte) = self.data.get_mut(offset) {
            *byte |= 1 << (7 - (x & 7));
        }
    }

    /// Fills the span `[x_min, x_max)` on scanline `y`, rounding both
    /// edges to the nearest pixel and clipping to the bitmap. Spans
    /// outside the bitmap are a no-op.
    pub fn fill(&mut self, y: i32, x_min: f64, x_max: f64) {
        let x_min = ((x_min + 0.5).floor() as i32).max(0);
        let x_max = ((x_max + 0.5).floor() as i32).min(self.width);
        let mut width = x_max - x_min;
        if x_max < 0 || x_min >= self.width || width <= 0 || y < 0 || y >= self.height {
            return;
        }
        if self.edges_only {
            self.set_bit(y, x_min);
            self.set_bit(y, (x_max).min(self.width - 1));
            return;
        }
        let mut offset = y as usize * self.line_size + (x_min >> 3) as usize;
        let mut bits = 8 - (x_min & 7);
        let mut mask = ((1u16 << bits) - 1) as u8;
        while width >= bits {
            if let Some(byte) = self.data.get_mut(offset) {
                *byte |= mask;
            }
            offset += 1;
            width -= bits;
            bits = 8;
            mask = 0xff;
        }
        if width > 0 {
            bits -= width;
            mask ^= (1u8 << bits) - 1;
            if let Some(byte) = self.data.get_mut(offset) {
                *byte |= mask;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_scan() -> Scan {
        // a 4x4 square from (2,2) to (6,6), already in pixel space
        let mut scan = Scan::new(1.0, 0, 7);
        let points = [
            ScaledPoint { x: 2.0, y: 2.0 },
            ScaledPoint { x: 2.0, y: 6.0 },
            ScaledPoint { x: 6.0, y: 6.0 },
            ScaledPoint { x: 6.0, y: 2.0 },
            ScaledPoint { x: 2.0, y: 2.0 },
        ];
        for pair in points.windows(2) {
            scan.draw_path(pair);
        }
        scan
    }

    #[test]
    fn spans_pair_and_fill() {
        let mut data = [0u8; 8];
        let mut bitmap = Bitmap::new(&mut data, 8, 8, false);
        square_scan().write(&mut bitmap, 0.0, 0);
        // rows 2..6 carry the span [2, 6): bits 2..=5 set
        assert_eq!(data[2], 0b0011_1100);
        assert_eq!(data[5], 0b0011_1100);
        assert_eq!(data[1], 0);
        assert_eq!(data[6], 0);
    }

    #[test]
    fn edge_fill_marks_span_boundaries() {
        let mut data = [0u8; 8];
        let mut bitmap = Bitmap::new(&mut data, 8, 8, true);
        square_scan().write(&mut bitmap, 0.0, 0);
        assert_eq!(data[3], 0b0010_0010);
    }

    #[test]
    fn fill_clips_to_bounds() {
        let mut data = [0u8; 8];
        {
            let mut bitmap = Bitmap::new(&mut data, 8, 8, false);
            bitmap.fill(3, -4.0, 100.0);
            bitmap.fill(-1, 0.0, 8.0);
            bitmap.fill(8, 0.0, 8.0);
            bitmap.fill(4, 9.0, 12.0);
        }
        assert_eq!(data[3], 0xff);
        assert_eq!(data[4], 0);
    }

    #[test]
    fn quadratic_flattening_stays_within_extremes() {
        let mut scan = Scan::new(1.0, 0, 8);
        let curve = [
            ScaledPoint { x: 0.0, y: 0.0 },
            ScaledPoint { x: 8.0, y: 4.0 },
            ScaledPoint { x: 0.0, y: 8.0 },
        ];
        scan.draw_path(&curve);
        // monotone in y, so each scanline is crossed exactly once
        for line in &scan.lines[..8] {
            assert_eq!(line.len(), 1);
            assert!(line[0] >= 0.0 && line[0] <= 8.0);
        }
    }

    #[test]
    fn unpaired_crossings_are_not_filled() {
        let mut scan = Scan::new(1.0, 0, 8);
        let curve = [
            ScaledPoint { x: 0.0, y: 0.0 },
            ScaledPoint { x: 8.0, y: 4.0 },
            ScaledPoint { x: 0.0, y: 8.0 },
        ];
        scan.draw_path(&curve);
        let mut data = [0u8; 8];
        {
            let mut bitmap = Bitmap::new(&mut data, 8, 8, false);
            scan.write(&mut bitmap, 0.0, 0);
        }
        // an open contour leaves an odd crossing count on every line
        assert!(data.iter().all(|byte| *byte == 0));
    }
}
