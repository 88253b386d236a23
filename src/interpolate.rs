//! Interpolation between two colors in a chosen color space.

use num_traits::Float;

use crate::color::{Color, Component, Space};
use crate::math::normalize_hue;

fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Hue components interpolate along the shorter arc of the hue circle.
fn lerp_hue(a: Component, b: Component, t: Component) -> Component {
    let a = normalize_hue(a);
    let b = normalize_hue(b);

    let mut delta = b - a;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }

    normalize_hue(a + delta * t)
}

/// A prepared interpolation from one color to another in a fixed color
/// space. Both endpoints are converted up front so that [`Interpolation::at`]
/// is a plain lerp.
#[derive(Clone, Debug)]
pub struct Interpolation {
    left: Color,
    right: Color,
    space: Space,
}

impl Color {
    /// Prepare an interpolation from this color to another in the given
    /// color space.
    pub fn interpolate(&self, other: &Self, space: Space) -> Interpolation {
        Interpolation {
            left: self.to_space(space),
            right: other.to_space(space),
            space,
        }
    }
}

impl Interpolation {
    /// The color at progress `t`, with `t` in [0, 1] mapping from the left
    /// endpoint to the right.
    ///
    /// A component missing on one side carries the other side's value, per
    /// css-color-4 interpolation; missing on both sides stays missing. Alpha
    /// clamps to [0, 1].
    pub fn at(&self, t: Component) -> Color {
        let pick = |index: usize| -> (Option<Component>, Option<Component>) {
            match index {
                0 => (self.left.c0(), self.right.c0()),
                1 => (self.left.c1(), self.right.c1()),
                _ => (self.left.c2(), self.right.c2()),
            }
        };

        let component = |index: usize| -> Option<Component> {
            match pick(index) {
                (None, None) => None,
                (None, Some(v)) | (Some(v), None) => Some(v),
                (Some(a), Some(b)) => Some(if self.space.hue_index() == Some(index) {
                    lerp_hue(a, b, t)
                } else {
                    lerp(a, b, t)
                }),
            }
        };

        let alpha = match (self.left.alpha(), self.right.alpha()) {
            (None, None) => None,
            (None, Some(v)) | (Some(v), None) => Some(v.clamp(0.0, 1.0)),
            (Some(a), Some(b)) => Some(lerp(a, b, t).clamp(0.0, 1.0)),
        };

        Color::new(self.space, component(0), component(1), component(2), alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn basic() {
        let left = Color::new(Space::Srgb, 0.1, 0.2, 0.3, 1.0);
        let right = Color::new(Space::Srgb, 0.5, 0.6, 0.7, 1.0);
        let mixed = left.interpolate(&right, Space::Srgb).at(0.5);
        assert_eq!(mixed.components.0, 0.3);
        assert_eq!(mixed.components.1, 0.4);
        assert_eq!(mixed.components.2, 0.5);
        assert_eq!(mixed.alpha, 1.0);
        assert_eq!(mixed.space, Space::Srgb);
    }

    #[test]
    fn endpoints_reproduce_the_inputs() {
        let left = Color::new(Space::Oklch, 0.3, 0.1, 30.0, 1.0);
        let right = Color::new(Space::Oklch, 0.7, 0.2, 90.0, 0.5);
        let interp = left.interpolate(&right, Space::Oklch);

        let start = interp.at(0.0);
        assert_component_eq!(start.components.0, left.components.0);
        assert_component_eq!(start.components.1, left.components.1);
        assert_component_eq!(start.components.2, left.components.2);

        let end = interp.at(1.0);
        assert_component_eq!(end.components.0, right.components.0);
        assert_component_eq!(end.components.1, right.components.1);
        assert_component_eq!(end.components.2, right.components.2);
        assert_component_eq!(end.alpha, right.alpha);
    }

    #[test]
    fn interpolation_happens_in_the_requested_space() {
        let red = Color::new(Space::Srgb, 1.0, 0.0, 0.0, 1.0);
        let blue = Color::new(Space::Srgb, 0.0, 0.0, 1.0, 1.0);
        let mid = red.interpolate(&blue, Space::Oklch).at(0.5);
        assert_eq!(mid.space, Space::Oklch);
        // Mixing in a polar space keeps chroma instead of dipping through
        // grey the way an sRGB mix does.
        assert!(mid.components.1 > 0.1);
    }

    #[test]
    fn hue_takes_the_shorter_arc() {
        let a = Color::new(Space::Hsl, 350.0, 1.0, 0.5, 1.0);
        let b = Color::new(Space::Hsl, 10.0, 1.0, 0.5, 1.0);
        let mid = a.interpolate(&b, Space::Hsl).at(0.5);
        assert_component_eq!(mid.components.0, 0.0);

        let c = Color::new(Space::Hsl, 40.0, 1.0, 0.5, 1.0);
        let d = Color::new(Space::Hsl, 60.0, 1.0, 0.5, 1.0);
        let mid = c.interpolate(&d, Space::Hsl).at(0.25);
        assert_component_eq!(mid.components.0, 45.0);
    }

    #[test]
    fn missing_components_carry_the_other_side() {
        let grey = Color::new(Space::Oklch, 0.5, 0.0, None, 1.0);
        let green = Color::new(Space::Oklch, 0.7, 0.2, 140.0, 1.0);
        let mid = grey.interpolate(&green, Space::Oklch).at(0.5);
        assert_component_eq!(mid.components.2, 140.0);

        let both = grey.interpolate(&grey, Space::Oklch).at(0.5);
        assert!(both.c2().is_none());
    }

    #[test]
    fn alpha_is_clamped_after_interpolation() {
        // color-mix(in srgb, color(srgb 2 3 4 / 5), color(srgb 4 6 8 / 10))
        let left = Color::new(Space::Srgb, 2.0, 3.0, 4.0, 5.0);
        let right = Color::new(Space::Srgb, 4.0, 6.0, 8.0, 10.0);
        let result = left.interpolate(&right, Space::Srgb).at(0.5);
        assert_eq!(result.alpha(), Some(1.0));
        assert_eq!(result.components.0, 3.0);
    }
}
