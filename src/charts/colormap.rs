//! Color Ramps
//! Linear-interpolated palettes shared by the scatter charts and the map.

use plotters::style::RGBColor;

/// Sequential yellow-to-dark-red ramp (the YlOrRd stops).
pub const YL_OR_RD: ColorRamp = ColorRamp {
    stops: &[
        (255, 255, 204),
        (255, 237, 160),
        (254, 217, 118),
        (254, 178, 76),
        (253, 141, 60),
        (252, 78, 42),
        (227, 26, 28),
        (189, 0, 38),
        (128, 0, 38),
    ],
};

/// Diverging red-to-green ramp (the RdYlGn stops).
pub const RD_YL_GN: ColorRamp = ColorRamp {
    stops: &[
        (165, 0, 38),
        (215, 48, 39),
        (244, 109, 67),
        (253, 174, 97),
        (254, 224, 139),
        (255, 255, 191),
        (217, 239, 139),
        (166, 217, 106),
        (102, 189, 99),
        (26, 152, 80),
        (0, 104, 55),
    ],
};

/// Piecewise-linear color ramp over fixed RGB stops.
pub struct ColorRamp {
    stops: &'static [(u8, u8, u8)],
}

impl ColorRamp {
    /// Interpolated color at `t` in `[0, 1]`; `t` is clamped.
    pub fn sample(&self, t: f64) -> (u8, u8, u8) {
        let t = t.clamp(0.0, 1.0);
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f64;
        let idx = (scaled.floor() as usize).min(segments - 1);
        let frac = scaled - idx as f64;

        let (r0, g0, b0) = self.stops[idx];
        let (r1, g1, b1) = self.stops[idx + 1];
        (lerp(r0, r1, frac), lerp(g0, g1, frac), lerp(b0, b1, frac))
    }

    pub fn rgb(&self, t: f64) -> RGBColor {
        let (r, g, b) = self.sample(t);
        RGBColor(r, g, b)
    }

    /// CSS hex form, for the HTML map.
    pub fn hex(&self, t: f64) -> String {
        let (r, g, b) = self.sample(t);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// All stops as hex, for CSS gradient legends.
    pub fn hex_stops(&self) -> Vec<String> {
        self.stops
            .iter()
            .map(|&(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
            .collect()
    }

    /// Position of `value` within `[min, max]`, for feeding `sample`.
    pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
        if max > min {
            (value - min) / (max - min)
        } else {
            0.5
        }
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(YL_OR_RD.sample(0.0), (255, 255, 204));
        assert_eq!(YL_OR_RD.sample(1.0), (128, 0, 38));
        assert_eq!(RD_YL_GN.sample(0.0), (165, 0, 38));
        assert_eq!(RD_YL_GN.sample(1.0), (0, 104, 55));
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(YL_OR_RD.sample(-0.5), YL_OR_RD.sample(0.0));
        assert_eq!(YL_OR_RD.sample(1.5), YL_OR_RD.sample(1.0));
    }

    #[test]
    fn hex_is_lowercase_rgb() {
        assert_eq!(YL_OR_RD.hex(0.0), "#ffffcc");
        assert_eq!(YL_OR_RD.hex(1.0), "#800026");
    }

    #[test]
    fn normalize_maps_the_span_to_unit() {
        assert_eq!(ColorRamp::normalize(2.6, 2.6, 5.0), 0.0);
        assert_eq!(ColorRamp::normalize(5.0, 2.6, 5.0), 1.0);
        assert_eq!(ColorRamp::normalize(3.8, 3.8, 3.8), 0.5);
    }
}
