use egui::Color32;

/// A numeric domain mapped onto the plot axes. The domain is the
/// min/max extent of the chosen field, optionally expanded to "nice" round
/// numbers; values outside the domain are clamped to its edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    start: f64,
    stop: f64,
}

impl LinearScale {
    /// Extent over all finite values. None if there are no finite values.
    pub fn from_extent(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut extent: Option<(f64, f64)> = None;
        for value in values {
            if !value.is_finite() {
                continue;
            }
            extent = Some(match extent {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
        extent.map(|(start, stop)| Self { start, stop })
    }

    /// Expand the domain outward to multiples of a round tick step, so the
    /// plot bounds land on round numbers.
    pub fn nice(self) -> Self {
        let Self { start, stop } = self;
        if start == stop {
            // Degenerate extent, give the single value some breathing room.
            return Self {
                start: start - 0.5,
                stop: stop + 0.5,
            };
        }
        let step = tick_step(start, stop, 10.0);
        Self {
            start: (start / step).floor() * step,
            stop: (stop / step).ceil() * step,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.start, self.stop)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }
}

/// Round tick step covering the span with roughly `count` ticks, snapped to
/// 1/2/5 times a power of ten.
fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start).abs() / count;
    let power = 10f64.powf(step.log10().floor());
    let error = step / power;
    if error >= 50f64.sqrt() {
        power * 10.0
    } else if error >= 10f64.sqrt() {
        power * 5.0
    } else if error >= 2f64.sqrt() {
        power * 2.0
    } else {
        power
    }
}

/// The fixed 10-color categorical palette. A domain with more than 10
/// categories aliases colors.
const PALETTE: [Color32; 10] = [
    Color32::from_rgb(0x4c, 0x78, 0xa8),
    Color32::from_rgb(0xf5, 0x85, 0x18),
    Color32::from_rgb(0xe4, 0x57, 0x56),
    Color32::from_rgb(0x72, 0xb7, 0xb2),
    Color32::from_rgb(0x54, 0xa2, 0x4b),
    Color32::from_rgb(0xee, 0xca, 0x3b),
    Color32::from_rgb(0xb2, 0x79, 0xa2),
    Color32::from_rgb(0xff, 0x9d, 0xa6),
    Color32::from_rgb(0x9d, 0x75, 0x5d),
    Color32::from_rgb(0xba, 0xb0, 0xac),
];

/// Maps the distinct values of the color field, in domain order, onto the
/// fixed palette.
#[derive(Clone, Debug, Default)]
pub struct ColorScale {
    domain: Vec<String>,
}

impl ColorScale {
    pub fn new(domain: Vec<String>) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn color_of(&self, category: &str) -> Color32 {
        match self.domain.iter().position(|c| c == category) {
            Some(idx) => PALETTE[idx % PALETTE.len()],
            // A category outside the domain should not happen, but degrade
            // to gray instead of panicking.
            None => Color32::GRAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_expands_to_round_bounds() {
        let scale = LinearScale::from_extent([0.2, 9.7]).unwrap().nice();
        assert_eq!((scale.start(), scale.stop()), (0.0, 10.0));

        let scale = LinearScale::from_extent([12.0, 87.0]).unwrap().nice();
        assert_eq!((scale.start(), scale.stop()), (10.0, 90.0));
    }

    #[test]
    fn test_nice_contains_raw_extent() {
        let scale = LinearScale::from_extent([-3.21, 44.7]).unwrap().nice();
        assert!(scale.start() <= -3.21);
        assert!(scale.stop() >= 44.7);
    }

    #[test]
    fn test_nice_degenerate_extent() {
        let scale = LinearScale::from_extent([5.0, 5.0]).unwrap().nice();
        assert!(scale.start() < 5.0 && scale.stop() > 5.0);
    }

    #[test]
    fn test_extent_ignores_non_finite() {
        let scale = LinearScale::from_extent([1.0, f64::NAN, 3.0, f64::INFINITY]).unwrap();
        assert_eq!((scale.start(), scale.stop()), (1.0, 3.0));
        assert!(LinearScale::from_extent([f64::NAN]).is_none());
    }

    #[test]
    fn test_clamp_pins_to_domain_edges() {
        let scale = LinearScale::from_extent([0.0, 10.0]).unwrap();
        assert_eq!(scale.clamp(-4.0), 0.0);
        assert_eq!(scale.clamp(11.5), 10.0);
        assert_eq!(scale.clamp(3.3), 3.3);
    }

    #[test]
    fn test_palette_aliases_after_ten_categories() {
        let domain: Vec<String> = (0..12).map(|i| format!("c{i}")).collect();
        let scale = ColorScale::new(domain);
        assert_eq!(scale.color_of("c10"), scale.color_of("c0"));
        assert_ne!(scale.color_of("c1"), scale.color_of("c0"));
    }

    #[test]
    fn test_unknown_category_falls_back_to_gray() {
        let scale = ColorScale::new(vec!["a".into()]);
        assert_eq!(scale.color_of("zzz"), Color32::GRAY);
    }
}
