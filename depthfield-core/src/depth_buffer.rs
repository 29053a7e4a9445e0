/// Nearest-depth buffer for one render

/// Smallest and largest depth ever written to a buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub min: f64,
    pub max: f64,
}

impl DepthRange {
    fn include(&mut self, depth: f64) {
        self.min = self.min.min(depth);
        self.max = self.max.max(depth);
    }
}

/// A width × height grid of camera distances.
///
/// Each cell is empty until a surface is composited into it. Cells only ever
/// move to a strictly smaller depth afterwards. The range tracks every value
/// that was written, including ones later overwritten by a nearer surface.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    cells: Vec<Option<f64>>,
    range: Option<DepthRange>,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            range: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth stored at `(x, y)`, or `None` if nothing was drawn there or the
    /// coordinates fall outside the buffer.
    pub fn get(&self, x: i64, y: i64) -> Option<f64> {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Offer `depth` for pixel `(x, y)`.
    ///
    /// Out-of-bounds pixels are dropped. The cell is written if it is empty
    /// or holds a strictly greater depth. Returns whether it was written.
    pub fn composite(&mut self, x: i64, y: i64, depth: f64) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };

        match self.cells[idx] {
            Some(current) if current <= depth => false,
            _ => {
                self.cells[idx] = Some(depth);
                self.range
                    .get_or_insert(DepthRange {
                        min: depth,
                        max: depth,
                    })
                    .include(depth);
                true
            }
        }
    }

    /// Range of depths written so far; `None` until the first write.
    pub fn range(&self) -> Option<DepthRange> {
        self.range
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Option<f64>] {
        &self.cells
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}
