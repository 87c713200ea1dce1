//! Deferred measurement of chart dimensions
//!
//! The chart cannot be sized until the surrounding layout has settled, so the
//! first measurement is scheduled for the next frame. A scheduled measurement
//! is represented by a [`MeasureTicket`]. Cancelling (on teardown or when the
//! displayed artifact changes) invalidates every outstanding ticket, and
//! resolving an invalidated ticket is a silent no-op.

/// Size of the chart drawing area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewDimensions {
    pub width: f32,
    pub height: f32,
}

impl ViewDimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Shrink by fixed padding, never going negative
    pub fn shrink(&self, dx: f32, dy: f32) -> Self {
        Self {
            width: (self.width - dx).max(0.0),
            height: (self.height - dy).max(0.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Handle for one scheduled measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureTicket {
    generation: u64,
}

/// Tracks the measured dimensions of a view and its pending measurement
#[derive(Debug, Default)]
pub struct DeferredMeasure {
    generation: u64,
    pending: Option<MeasureTicket>,
    dimensions: Option<ViewDimensions>,
}

impl DeferredMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a measurement for after the current layout pass.
    /// Scheduling twice before resolving returns the same ticket.
    pub fn schedule(&mut self) -> MeasureTicket {
        *self.pending.get_or_insert(MeasureTicket {
            generation: self.generation,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending ticket so the caller can resolve it
    pub fn take_pending(&mut self) -> Option<MeasureTicket> {
        self.pending.take()
    }

    /// Complete a scheduled measurement.
    ///
    /// Returns `true` when the stored dimensions changed. A ticket from before
    /// the last [`cancel`](Self::cancel) is ignored.
    pub fn resolve(&mut self, ticket: MeasureTicket, dimensions: ViewDimensions) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        if self.pending == Some(ticket) {
            self.pending = None;
        }
        self.store(dimensions)
    }

    /// Report the current size after the first measurement (resize tracking).
    /// Before the first measurement has resolved this does nothing.
    pub fn observe(&mut self, dimensions: ViewDimensions) -> bool {
        if self.dimensions.is_none() {
            return false;
        }
        self.store(dimensions)
    }

    /// Drop the pending measurement and invalidate every issued ticket
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.dimensions = None;
    }

    pub fn dimensions(&self) -> Option<ViewDimensions> {
        self.dimensions
    }

    fn store(&mut self, dimensions: ViewDimensions) -> bool {
        if self.dimensions == Some(dimensions) {
            return false;
        }
        self.dimensions = Some(dimensions);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_measurement_goes_through_ticket() {
        let mut measure = DeferredMeasure::new();
        assert!(!measure.observe(ViewDimensions::new(100.0, 50.0)));
        assert_eq!(measure.dimensions(), None);

        let ticket = measure.schedule();
        assert_eq!(measure.schedule(), ticket);
        assert!(measure.resolve(ticket, ViewDimensions::new(100.0, 50.0)));
        assert!(!measure.is_pending());
        assert_eq!(measure.dimensions(), Some(ViewDimensions::new(100.0, 50.0)));
    }

    #[test]
    fn test_resize_reports_changes_only() {
        let mut measure = DeferredMeasure::new();
        let ticket = measure.schedule();
        measure.resolve(ticket, ViewDimensions::new(100.0, 50.0));

        assert!(!measure.observe(ViewDimensions::new(100.0, 50.0)));
        assert!(measure.observe(ViewDimensions::new(120.0, 50.0)));
        assert_eq!(measure.dimensions(), Some(ViewDimensions::new(120.0, 50.0)));
    }

    #[test]
    fn test_cancelled_ticket_is_ignored() {
        let mut measure = DeferredMeasure::new();
        let stale = measure.schedule();
        measure.cancel();

        assert!(!measure.resolve(stale, ViewDimensions::new(100.0, 50.0)));
        assert_eq!(measure.dimensions(), None);

        let fresh = measure.schedule();
        assert_ne!(fresh, stale);
        assert!(measure.resolve(fresh, ViewDimensions::new(80.0, 40.0)));
    }

    #[test]
    fn test_shrink_clamps_at_zero() {
        let dims = ViewDimensions::new(20.0, 100.0).shrink(32.0, 48.0);
        assert_eq!(dims, ViewDimensions::new(0.0, 52.0));
        assert!(dims.is_empty());
    }
}
