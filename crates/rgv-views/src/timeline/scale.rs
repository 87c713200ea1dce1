//! Scales mapping timeline data into screen space

use indexmap::IndexSet;

/// Continuous mapping from a time domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (i64, i64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (i64, i64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Distance from the domain start; the subtraction cannot overflow
    fn offset(&self, value: i64) -> f64 {
        (value as i128 - self.domain.0 as i128) as f64
    }

    /// Map a time onto the pixel range. A zero-width domain maps everything
    /// onto the start of the range.
    pub fn scale(&self, value: i64) -> f32 {
        let (r0, r1) = self.range;
        let span = self.offset(self.domain.1);
        if span == 0.0 {
            return r0;
        }
        let t = self.offset(value) / span;
        r0 + (t * (r1 - r0) as f64) as f32
    }

    /// Pixels covered by one time step
    pub fn step_width(&self) -> f32 {
        let span = self.offset(self.domain.1);
        if span == 0.0 {
            return 0.0;
        }
        ((self.range.1 - self.range.0) as f64 / span) as f32
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Integer tick positions in the domain. One per step when there is room,
    /// otherwise the step grows through 1, 2, 5, 10, 20, 50, ... until
    /// neighbouring ticks are at least `min_spacing` pixels apart.
    pub fn ticks(&self, min_spacing: f32) -> Vec<i64> {
        let (start, end) = self.domain;
        if end <= start {
            return vec![start];
        }

        let step = tick_step(self.step_width().abs(), min_spacing);
        let rem = start.rem_euclid(step);
        let first = if rem == 0 { Some(start) } else { start.checked_add(step - rem) };

        std::iter::successors(first, |t| t.checked_add(step))
            .take_while(|t| *t <= end)
            .collect()
    }
}

/// Spacing floor so a tick count never exceeds the chart width in pixels
const MIN_TICK_SPACING: f32 = 1.0;

fn tick_step(pixels_per_unit: f32, min_spacing: f32) -> i64 {
    if pixels_per_unit <= 0.0 || !pixels_per_unit.is_finite() {
        return i64::MAX;
    }
    let min_spacing = if min_spacing.is_finite() { min_spacing.max(MIN_TICK_SPACING) } else { MIN_TICK_SPACING };

    let mut magnitude: i64 = 1;
    loop {
        for factor in [1, 2, 5] {
            let step = magnitude * factor;
            if step as f32 * pixels_per_unit >= min_spacing {
                return step;
            }
        }
        match magnitude.checked_mul(10) {
            Some(next) => magnitude = next,
            None => return magnitude,
        }
    }
}

/// Categorical mapping of names onto equal-height bands
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    range: (f32, f32),
}

impl BandScale {
    /// Build from names in first-appearance order; repeats are ignored.
    pub fn new<I, S>(names: I, range: (f32, f32)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: names.into_iter().map(Into::into).collect(),
            range,
        }
    }

    /// Height of one band
    pub fn bandwidth(&self) -> f32 {
        if self.domain.is_empty() {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.domain.len() as f32
    }

    /// Top edge of the band for `name`
    pub fn band_start(&self, name: &str) -> Option<f32> {
        let index = self.domain.get_index_of(name)?;
        Some(self.range.0 + index as f32 * self.bandwidth())
    }

    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale_maps_endpoints() {
        let scale = LinearScale::new((0, 10), (100.0, 600.0));
        assert_eq!(scale.scale(0), 100.0);
        assert_eq!(scale.scale(10), 600.0);
        assert_eq!(scale.scale(5), 350.0);
        assert_eq!(scale.step_width(), 50.0);
    }

    #[test]
    fn test_degenerate_domain_maps_to_range_start() {
        let scale = LinearScale::new((4, 4), (20.0, 300.0));
        assert_eq!(scale.scale(4), 20.0);
        assert_eq!(scale.scale(9), 20.0);
        assert_eq!(scale.ticks(24.0), vec![4]);
    }

    #[test]
    fn test_one_tick_per_step_when_there_is_room() {
        let scale = LinearScale::new((0, 5), (0.0, 500.0));
        assert_eq!(scale.ticks(24.0), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ticks_are_thinned_on_narrow_charts() {
        let scale = LinearScale::new((0, 100), (0.0, 400.0));
        // 4px per step; 5 steps is the first that clears 12px.
        assert_eq!(scale.ticks(12.0), (0..=100).step_by(5).collect::<Vec<_>>());
        // 10 steps clears 24px.
        assert_eq!(scale.ticks(24.0), (0..=100).step_by(10).collect::<Vec<_>>());
    }

    #[test]
    fn test_ticks_start_on_a_step_multiple() {
        let scale = LinearScale::new((3, 20), (0.0, 34.0));
        // 2px per step, step 10 is the first to clear 16px.
        assert_eq!(scale.ticks(16.0), vec![10, 20]);
    }

    #[test]
    fn test_ticks_near_the_end_of_the_domain_stop_cleanly() {
        let scale = LinearScale::new((0, i64::MAX), (112.0, 1080.0));
        let ticks = scale.ticks(24.0);

        assert_eq!(ticks.first(), Some(&0));
        assert!(ticks.len() <= 41);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));

        let scale = LinearScale::new((i64::MAX - 10, i64::MAX), (0.0, 500.0));
        assert_eq!(scale.ticks(24.0).len(), 11);
        assert_eq!(scale.ticks(24.0).last(), Some(&i64::MAX));
    }

    #[test]
    fn test_tick_spacing_has_a_floor() {
        let scale = LinearScale::new((0, 1_000_000), (0.0, 100.0));
        assert!(scale.ticks(0.0).len() <= 101);
        assert!(scale.ticks(-5.0).len() <= 101);
    }

    #[test]
    fn test_band_scale_first_appearance_order() {
        let bands = BandScale::new(["Resource-2", "Resource-1", "Resource-2", "Resource-3"], (0.0, 300.0));

        assert_eq!(bands.len(), 3);
        assert_eq!(bands.bandwidth(), 100.0);
        assert_eq!(bands.domain().collect::<Vec<_>>(), vec!["Resource-2", "Resource-1", "Resource-3"]);
        assert_eq!(bands.band_start("Resource-2"), Some(0.0));
        assert_eq!(bands.band_start("Resource-1"), Some(100.0));
        assert_eq!(bands.band_start("Resource-3"), Some(200.0));
    }

    #[test]
    fn test_unknown_band_is_none() {
        let bands = BandScale::new(["Resource-1"], (0.0, 50.0));
        assert_eq!(bands.band_start("Resource-9"), None);

        let empty = BandScale::new(Vec::<String>::new(), (0.0, 50.0));
        assert!(empty.is_empty());
        assert_eq!(empty.bandwidth(), 0.0);
    }
}
