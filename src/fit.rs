//! Auto-fit sizing
//!
//! Finds the smallest circle radius whose square bound fully encloses a
//! label. Text layout is a black box owned by the host surface, so the search
//! only ever asks "does it fit at this size?" and never assumes the answer is
//! exactly monotonic.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Vertical extent of a laid-out box, relative to the bound's frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub top: f32,
    pub bottom: f32,
}

impl Extent {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Layout capability the host rendering surface provides for one label
pub trait LayoutSurface {
    /// Set a trial circular bound with the given side length (2 * radius)
    fn set_bounds(&mut self, side: f32);

    /// Label box after layout settles, relative to the bound
    fn measure_content_box(&self) -> Extent;

    /// The bound's own box
    fn measure_self_box(&self) -> Extent;
}

/// Search tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Lower end of the search interval
    pub min_radius: f32,
    /// Fits found before this many iterations only tighten the bound
    pub max_iterations: u32,
    /// First bracket candidate
    pub initial_max_radius: f32,
    /// Upper bound inflation applied after every miss
    pub slack: f32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            min_radius: FIT_MIN_RADIUS,
            max_iterations: FIT_MAX_ITERATIONS,
            initial_max_radius: FIT_INITIAL_MAX_RADIUS,
            slack: FIT_SLACK,
        }
    }
}

/// Doublings allowed before the bracket search gives up
const MAX_BRACKET_STEPS: u32 = 64;

/// True when the label lies strictly inside the current bound
pub fn label_fits(surface: &dyn LayoutSurface) -> bool {
    let bound_bottom = surface.measure_self_box().bottom;
    let content = surface.measure_content_box();
    content.top < bound_bottom && content.bottom < bound_bottom
}

/// Try a radius on the surface and report whether the label fits
fn try_radius(surface: &mut dyn LayoutSurface, radius: f32) -> bool {
    surface.set_bounds(2.0 * radius);
    label_fits(surface)
}

/// Find the minimal enclosing radius for the label on `surface`
///
/// On return the surface is left bounded at the returned radius.
pub fn fit(surface: &mut dyn LayoutSurface, params: &FitParams) -> f32 {
    let mut min_radius = params.min_radius;
    let mut max_radius = params.initial_max_radius.max(min_radius);

    // Bracket: grow until the label fits
    let mut steps = 0;
    while !try_radius(surface, max_radius) {
        steps += 1;
        if steps > MAX_BRACKET_STEPS || !max_radius.is_finite() {
            log::error!("Label never fits its bound (gave up at radius {max_radius})");
            return max_radius;
        }
        max_radius *= 2.0;
    }

    // Refine: keep halving past the first fit, stop on a fit once over budget
    let hard_stop = params
        .max_iterations
        .saturating_mul(4)
        .max(params.max_iterations.saturating_add(1));
    let mut smallest_fit = max_radius;
    let mut iterations = 0;
    loop {
        let radius = (min_radius + max_radius) / 2.0;
        if try_radius(surface, radius) {
            smallest_fit = smallest_fit.min(radius);
            if iterations > params.max_iterations {
                log::trace!("Fit converged at radius {radius} after {iterations} iterations");
                return radius;
            }
            max_radius = radius;
        } else {
            min_radius = radius;
            // Slack so the true minimum is never stranded below a stale bound
            max_radius *= params.slack;
        }
        iterations += 1;

        if iterations > hard_stop {
            log::error!("Fit did not settle after {iterations} iterations, using {smallest_fit}");
            surface.set_bounds(2.0 * smallest_fit);
            return smallest_fit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// A fixed-size box vertically centered in the bound
    struct FixedLabel {
        height: f32,
        side: f32,
        calls: u32,
    }

    impl FixedLabel {
        fn new(height: f32) -> Self {
            Self {
                height,
                side: 0.0,
                calls: 0,
            }
        }
    }

    impl LayoutSurface for FixedLabel {
        fn set_bounds(&mut self, side: f32) {
            self.side = side;
            self.calls += 1;
        }

        fn measure_content_box(&self) -> Extent {
            let top = (self.side - self.height) / 2.0;
            Extent::new(top, top + self.height)
        }

        fn measure_self_box(&self) -> Extent {
            Extent::new(0.0, self.side)
        }
    }

    /// Never fits any bound
    struct Overflowing;

    impl LayoutSurface for Overflowing {
        fn set_bounds(&mut self, _side: f32) {}

        fn measure_content_box(&self) -> Extent {
            Extent::new(0.0, f32::INFINITY)
        }

        fn measure_self_box(&self) -> Extent {
            Extent::new(0.0, 1.0)
        }
    }

    #[test]
    fn test_fit_small_label_in_initial_bracket() {
        // Fits iff height < 2r, so the minimum is r = 3
        let mut label = FixedLabel::new(6.0);
        let radius = fit(&mut label, &FitParams::default());
        assert!(radius > 3.0);
        assert!(radius < 3.0 * 1.02);
        assert!((label.side - 2.0 * radius).abs() < 1e-4);
    }

    #[test]
    fn test_fit_large_label_needs_bracket_growth() {
        let mut label = FixedLabel::new(300.0);
        let radius = fit(&mut label, &FitParams::default());
        assert!(radius > 150.0);
        assert!(radius < 150.0 * 1.02);
    }

    #[test]
    fn test_fit_empty_label_yields_min_radius() {
        let mut label = FixedLabel::new(0.0);
        let radius = fit(&mut label, &FitParams::default());
        assert!(radius >= FIT_MIN_RADIUS);
        assert!(radius < FIT_MIN_RADIUS + 0.01);
    }

    #[test]
    fn test_fit_keeps_refining_past_first_success() {
        let mut label = FixedLabel::new(6.0);
        fit(&mut label, &FitParams::default());
        // One bracket probe plus more than the iteration budget
        assert!(label.calls > FIT_MAX_ITERATIONS + 1);
    }

    #[test]
    fn test_fit_gives_up_on_unfittable_label() {
        let radius = fit(&mut Overflowing, &FitParams::default());
        assert!(radius > FIT_INITIAL_MAX_RADIUS);
    }

    #[test]
    fn test_label_fits_requires_strict_containment() {
        let mut label = FixedLabel::new(4.0);
        label.set_bounds(4.0);
        assert!(!label_fits(&label));
        label.set_bounds(4.01);
        assert!(label_fits(&label));
    }

    /// Fits only at one exact side length
    struct OnlyAtTwenty {
        side: f32,
    }

    impl LayoutSurface for OnlyAtTwenty {
        fn set_bounds(&mut self, side: f32) {
            self.side = side;
        }

        fn measure_content_box(&self) -> Extent {
            if self.side == 20.0 {
                Extent::new(0.0, 1.0)
            } else {
                Extent::new(0.0, f32::INFINITY)
            }
        }

        fn measure_self_box(&self) -> Extent {
            Extent::new(0.0, self.side)
        }
    }

    /// Layout that shifts the label up or down on alternate bounds
    struct JitteryLabel {
        height: f32,
        side: f32,
        calls: u32,
    }

    impl LayoutSurface for JitteryLabel {
        fn set_bounds(&mut self, side: f32) {
            self.side = side;
            self.calls += 1;
        }

        fn measure_content_box(&self) -> Extent {
            let jitter = if self.calls % 2 == 1 { 0.05 } else { -0.05 };
            let top = (self.side - self.height) / 2.0 + jitter;
            Extent::new(top, top + self.height)
        }

        fn measure_self_box(&self) -> Extent {
            Extent::new(0.0, self.side)
        }
    }

    #[test]
    fn test_fit_hard_stop_returns_smallest_fit() {
        let mut surface = OnlyAtTwenty { side: 0.0 };
        let radius = fit(&mut surface, &FitParams::default());
        assert_eq!(radius, 10.0);
        assert_eq!(surface.side, 20.0);
    }

    #[test]
    fn test_fit_survives_jittery_layout() {
        let mut label = JitteryLabel {
            height: 6.0,
            side: 0.0,
            calls: 0,
        };
        let radius = fit(&mut label, &FitParams::default());
        // Threshold wanders between radius 2.95 and 3.05
        assert!(radius > 2.95);
        assert!(radius < 3.2);
        assert!(label_fits(&label));
        assert!((label.side - 2.0 * radius).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_fit_contains_label_and_is_near_minimal(height in 0.0f32..2000.0) {
            let mut label = FixedLabel::new(height);
            let radius = fit(&mut label, &FitParams::default());
            let minimal = (height / 2.0).max(FIT_MIN_RADIUS);

            label.set_bounds(2.0 * radius);
            prop_assert!(label_fits(&label));
            prop_assert!(radius < minimal * 1.02 + 1e-3);

            // A noticeably smaller circle no longer contains the label
            if height / 2.0 > FIT_MIN_RADIUS {
                label.set_bounds(2.0 * minimal * 0.99);
                prop_assert!(!label_fits(&label));
            }
        }
    }
}
