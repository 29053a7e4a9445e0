/// Scanline triangle fill into a depth buffer
use crate::depth_buffer::DepthBuffer;
use crate::geometry::Face;
use crate::projection::ProjectedPoint;

/// Where a triangle edge crosses one pixel row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSample {
    pub x: i64,
    pub y: i64,
    pub depth: f64,
}

impl EdgeSample {
    pub fn new(x: i64, y: i64, depth: f64) -> Self {
        Self { x, y, depth }
    }
}

/// Scanline rasterizer.
///
/// Each triangle is traced edge by edge into a list of row crossings. Sorted
/// by row and column, the crossings pair up into horizontal spans which are
/// filled with linearly interpolated depth. The span list is scratch space
/// reused across triangles and emptied after each one.
#[derive(Debug, Default)]
pub struct Rasterizer {
    spans: Vec<EdgeSample>,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw every face, resolving corners through `points`. Returns the number
    /// of depth cells written.
    pub fn draw_faces(
        &mut self,
        faces: &[Face],
        points: &[ProjectedPoint],
        buffer: &mut DepthBuffer,
    ) -> usize {
        faces
            .iter()
            .map(|face| {
                self.draw_triangle([points[face.p1], points[face.p2], points[face.p3]], buffer)
            })
            .sum()
    }

    pub fn draw_triangle(&mut self, corners: [ProjectedPoint; 3], buffer: &mut DepthBuffer) -> usize {
        let [a, b, c] = corners;
        self.spans.clear();
        let rows = i64::from(buffer.height());
        trace_edge(a, b, rows, &mut self.spans);
        trace_edge(b, c, rows, &mut self.spans);
        trace_edge(c, a, rows, &mut self.spans);

        sort_samples(&mut self.spans);
        let written = fill_spans(&self.spans, buffer);
        self.spans.clear();
        written
    }
}

/// Append one sample per pixel row from the upper endpoint down to, but not
/// including, the lower endpoint's row. Horizontal edges add nothing.
///
/// Only rows in `0..height` are sampled. Every edge of a triangle is clipped
/// to the same rows, so each kept row still gets both of its crossings.
pub fn trace_edge(
    a: ProjectedPoint,
    b: ProjectedPoint,
    height: i64,
    samples: &mut Vec<EdgeSample>,
) {
    let (top, bottom) = if a.y <= b.y { (a, b) } else { (b, a) };
    let rows = bottom.y - top.y;
    if rows == 0 {
        return;
    }

    let step_x = (bottom.x - top.x) as f64 / rows as f64;
    let step_depth = (bottom.distance - top.distance) / rows as f64;
    let first = top.y.max(0);
    let skipped = (first - top.y) as f64;
    let mut x = top.x as f64 + step_x * skipped;
    let mut depth = top.distance + step_depth * skipped;

    for y in first..bottom.y.min(height) {
        samples.push(EdgeSample::new(x as i64, y, depth));
        x += step_x;
        depth += step_depth;
    }
}

/// Order samples by row, then column, then depth.
pub fn sort_samples(samples: &mut [EdgeSample]) {
    samples.sort_by(|a, b| {
        a.y.cmp(&b.y)
            .then(a.x.cmp(&b.x))
            .then(a.depth.total_cmp(&b.depth))
    });
}

/// Fill sorted samples into `buffer`, consuming them two at a time.
///
/// A lone first sample whose row differs from the next one is drawn as a
/// single pixel before pairing starts; a trailing unpaired sample is dropped.
pub fn fill_spans(samples: &[EdgeSample], buffer: &mut DepthBuffer) -> usize {
    let mut samples = samples;
    let mut written = 0;

    if let [first, second, ..] = samples {
        if first.y != second.y {
            written += usize::from(buffer.composite(first.x, first.y, first.depth));
            samples = &samples[1..];
        }
    }

    for pair in samples.chunks_exact(2) {
        written += fill_row(pair[0], pair[1], buffer);
    }
    written
}

/// Fill the pixels between two samples on the row of the leftmost one.
fn fill_row(a: EdgeSample, b: EdgeSample, buffer: &mut DepthBuffer) -> usize {
    if a.x == b.x {
        return usize::from(buffer.composite(a.x, a.y, a.depth));
    }

    let (left, right) = if a.x > b.x { (b, a) } else { (a, b) };
    // Pixels outside the buffer would be dropped anyway.
    if left.y < 0 || left.y >= i64::from(buffer.height()) {
        return 0;
    }

    let step = (right.depth - left.depth) / (right.x - left.x) as f64;
    let start = left.x.max(0);
    let end = right.x.min(i64::from(buffer.width()) - 1);
    let mut depth = left.depth + step * (start - left.x) as f64;
    let mut written = 0;
    for x in start..=end {
        written += usize::from(buffer.composite(x, left.y, depth));
        depth += step;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(x: i64, y: i64, distance: f64) -> ProjectedPoint {
        ProjectedPoint::new(x, y, distance)
    }

    #[test]
    fn test_trace_edge_walks_down() {
        let mut samples = Vec::new();
        trace_edge(point(4, 6, 10.0), point(0, 2, 2.0), 10, &mut samples);

        assert_eq!(
            samples,
            vec![
                EdgeSample::new(0, 2, 2.0),
                EdgeSample::new(1, 3, 4.0),
                EdgeSample::new(2, 4, 6.0),
                EdgeSample::new(3, 5, 8.0),
            ]
        );
    }

    #[test]
    fn test_trace_horizontal_edge_is_empty() {
        let mut samples = Vec::new();
        trace_edge(point(0, 3, 1.0), point(9, 3, 2.0), 10, &mut samples);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_trace_truncates_x() {
        let mut samples = Vec::new();
        trace_edge(point(0, 0, 1.0), point(3, 2, 1.0), 10, &mut samples);
        // x steps by 1.5: 0.0, 1.5
        assert_eq!(samples[1].x, 1);
    }

    #[test]
    fn test_trace_edge_clips_rows() {
        let mut samples = Vec::new();
        trace_edge(point(0, -2, 0.0), point(8, 6, 8.0), 3, &mut samples);

        assert_eq!(
            samples,
            vec![
                EdgeSample::new(2, 0, 2.0),
                EdgeSample::new(3, 1, 3.0),
                EdgeSample::new(4, 2, 4.0),
            ]
        );
    }

    #[test]
    fn test_fill_row_starts_at_left_edge() {
        let mut buffer = DepthBuffer::new(4, 2);
        let written = fill_row(
            EdgeSample::new(-6, 1, 0.0),
            EdgeSample::new(10, 1, 16.0),
            &mut buffer,
        );

        assert_eq!(written, 4);
        for x in 0..4 {
            assert_relative_eq!(buffer.get(x, 1).unwrap(), 6.0 + x as f64);
        }
    }

    #[test]
    fn test_huge_triangle_is_clipped() {
        let far = i64::from(i32::MAX);
        let mut buffer = DepthBuffer::new(6, 4);
        let written = Rasterizer::new().draw_triangle(
            [point(-far, -far, 1.0), point(far, -far, 1.0), point(0, far, 1.0)],
            &mut buffer,
        );

        assert_eq!(written, 24);
        assert_eq!(buffer.filled_count(), 24);
    }

    #[test]
    fn test_right_triangle_fill() {
        // Legs along +x and +y from (2, 3); depth = 1 + dx + 2·dy.
        let mut buffer = DepthBuffer::new(10, 10);
        let mut rasterizer = Rasterizer::new();
        let written = rasterizer.draw_triangle(
            [point(2, 3, 1.0), point(6, 3, 5.0), point(2, 7, 9.0)],
            &mut buffer,
        );

        assert_eq!(written, 14);
        assert_eq!(buffer.filled_count(), 14);
        for y in 0..10 {
            for x in 0..10 {
                let (dx, dy) = (x - 2, y - 3);
                let inside = dy >= 0 && dy < 4 && dx >= 0 && dx <= 4 - dy;
                match buffer.get(x, y) {
                    Some(depth) => {
                        assert!(inside, "({x}, {y}) should be empty");
                        assert_relative_eq!(depth, 1.0 + dx as f64 + 2.0 * dy as f64);
                    }
                    None => assert!(!inside, "({x}, {y}) should be filled"),
                }
            }
        }
    }

    #[test]
    fn test_lone_first_sample() {
        let mut buffer = DepthBuffer::new(8, 8);
        let mut samples = vec![
            EdgeSample::new(4, 1, 5.0),
            EdgeSample::new(1, 1, 2.0),
            EdgeSample::new(3, 0, 1.0),
        ];
        sort_samples(&mut samples);

        assert_eq!(fill_spans(&samples, &mut buffer), 5);
        assert_eq!(buffer.get(3, 0), Some(1.0));
        for (x, depth) in [(1, 2.0), (2, 3.0), (3, 4.0), (4, 5.0)] {
            assert_relative_eq!(buffer.get(x, 1).unwrap(), depth);
        }
    }

    #[test]
    fn test_matching_pair_fills_one_pixel() {
        let mut buffer = DepthBuffer::new(4, 4);
        let samples = [EdgeSample::new(2, 1, 3.0), EdgeSample::new(2, 1, 4.0)];
        assert_eq!(fill_spans(&samples, &mut buffer), 1);
        assert_eq!(buffer.get(2, 1), Some(3.0));
    }

    #[test]
    fn test_unpaired_trailing_sample_is_dropped() {
        let mut buffer = DepthBuffer::new(4, 4);
        let samples = [
            EdgeSample::new(0, 0, 1.0),
            EdgeSample::new(1, 0, 1.0),
            EdgeSample::new(3, 3, 1.0),
        ];
        assert_eq!(fill_spans(&samples, &mut buffer), 2);
        assert_eq!(buffer.get(3, 3), None);
    }

    #[test]
    fn test_partially_off_screen() {
        let mut buffer = DepthBuffer::new(4, 4);
        let mut rasterizer = Rasterizer::new();
        rasterizer.draw_triangle(
            [point(-3, -2, 1.0), point(6, -2, 1.0), point(-3, 7, 1.0)],
            &mut buffer,
        );

        // Rows -2..=6 reach from x = -3 to 6 - (y + 2); clipped to the buffer.
        assert_eq!(buffer.filled_count(), 4 + 4 + 3 + 2);
        assert_eq!(buffer.get(0, 0), Some(1.0));
        assert_eq!(buffer.get(3, 3), None);
    }

    #[test]
    fn test_nearer_triangle_wins() {
        let mut buffer = DepthBuffer::new(8, 8);
        let mut rasterizer = Rasterizer::new();
        let near = [point(0, 0, 2.0), point(6, 0, 2.0), point(0, 6, 2.0)];
        let far = [point(0, 0, 4.0), point(6, 0, 4.0), point(0, 6, 4.0)];

        rasterizer.draw_triangle(near, &mut buffer);
        assert_eq!(rasterizer.draw_triangle(far, &mut buffer), 0);
        assert_eq!(buffer.get(1, 1), Some(2.0));
        assert!(rasterizer.spans.is_empty());

        let range = buffer.range().unwrap();
        assert_eq!((range.min, range.max), (2.0, 2.0));
    }

    #[test]
    fn test_draw_faces_resolves_indices() {
        let points = [point(0, 0, 1.0), point(3, 0, 1.0), point(0, 3, 1.0)];
        let mut buffer = DepthBuffer::new(4, 4);
        let written =
            Rasterizer::new().draw_faces(&[Face::new(2, 0, 1)], &points, &mut buffer);
        assert_eq!(written, 4 + 3 + 2);
    }
}
