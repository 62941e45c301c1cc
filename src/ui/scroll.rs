// Scroll-proximity trigger for incremental loading
// Decides from container metrics whether the list is close enough to its
// bottom that the next page should be requested.

/// Distance before the literal bottom at which the next page is requested.
pub const PREFETCH_MARGIN: f64 = 150.0;

/// Scroll metrics of the list container, all in the same unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    pub fn near_bottom(&self) -> bool {
        self.scroll_top + self.client_height + PREFETCH_MARGIN >= self.scroll_height
    }

    /// Content is shorter than the viewport, so no further scroll event
    /// would ever arrive.
    pub fn content_fits(&self) -> bool {
        self.scroll_height < self.client_height
    }

    pub fn wants_more(&self) -> bool {
        self.near_bottom() || self.content_fits()
    }
}

/// Fixed-row viewport used when there is no real widget to measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualViewport {
    pub row_height: f64,
    pub client_height: f64,
    pub scroll_top: f64,
}

impl VirtualViewport {
    pub fn new(row_height: f64, client_height: f64) -> Self {
        Self {
            row_height: row_height.max(1.0),
            client_height: client_height.max(0.0),
            scroll_top: 0.0,
        }
    }

    pub fn content_height(&self, rows: usize) -> f64 {
        rows as f64 * self.row_height
    }

    pub fn metrics(&self, rows: usize) -> ScrollMetrics {
        ScrollMetrics::new(self.scroll_top, self.client_height, self.content_height(rows))
    }

    /// Scrolls as far down as `rows` allow and returns the resulting metrics.
    pub fn scroll_to_bottom(&mut self, rows: usize) -> ScrollMetrics {
        self.scroll_top = (self.content_height(rows) - self.client_height).max(0.0);
        self.metrics(rows)
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0.0;
    }
}
