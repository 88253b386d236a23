//! Gamut testing and mapping.
//!
//! Mapping reduces OKLCH chroma with a binary search, holding lightness and
//! hue fixed, so an out-of-gamut color keeps its perceived hue instead of
//! drifting the way a per-channel clamp would make it.

use crate::color::{Color, Component, Space};
use crate::math::almost_zero;

/// Tolerance a coordinate may sit outside `[0, 1]` and still count as
/// displayable.
pub const GAMUT_EPSILON: Component = 1.0e-4;

/// The mapping search stops when the candidate's channel overshoot in the
/// target space drops below this.
const TOLERANCE: Component = 2.0e-4;

/// Upper bound on the mapping search, so the operation stays O(1).
const MAX_ITERATIONS: usize = 20;

/// An advisory display gamut, used to pick the space gamut checks run
/// against. Purely informational; it never changes a [`Color`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GamutHint {
    /// No display gamut is known.
    #[default]
    None,
    /// The display covers sRGB.
    Srgb,
    /// The display covers a98-rgb.
    A98Rgb,
    /// The display covers Display-P3.
    DisplayP3,
    /// The display covers Rec.2020.
    Rec2020,
    /// The display covers ProPhoto RGB.
    ProPhotoRgb,
}

impl GamutHint {
    /// The space gamut operations should use for this hint.
    pub fn space(self) -> Option<Space> {
        match self {
            GamutHint::None => None,
            GamutHint::Srgb => Some(Space::Srgb),
            GamutHint::A98Rgb => Some(Space::A98Rgb),
            GamutHint::DisplayP3 => Some(Space::DisplayP3),
            GamutHint::Rec2020 => Some(Space::Rec2020),
            GamutHint::ProPhotoRgb => Some(Space::ProPhotoRgb),
        }
    }
}

/// The largest distance any component sits outside `[0, 1]`. Negative when
/// all components are inside.
fn channel_deviation(color: &Color) -> Component {
    let deviation = |v: Component| (v - 1.0).max(-v);
    deviation(color.components.0)
        .max(deviation(color.components.1))
        .max(deviation(color.components.2))
}

impl Color {
    /// Returns true if this color is displayable in the given space, within
    /// [`GAMUT_EPSILON`].
    pub fn in_gamut(&self, space: Space) -> bool {
        self.in_gamut_eps(space, GAMUT_EPSILON)
    }

    /// Returns true if this color is displayable in the given space, within
    /// `epsilon`.
    ///
    /// Spaces without gamut limits are always in gamut for themselves. The
    /// cylindrical notations of the sRGB gamut are checked against sRGB.
    pub fn in_gamut_eps(&self, space: Space, epsilon: Component) -> bool {
        let Some(bounded) = space.gamut_space() else {
            return true;
        };

        let color = self.to_space(bounded);
        channel_deviation(&color) <= epsilon
    }

    /// Return a color with each of the components clipped (clamped to
    /// [0..1]). NOTE: This is a lossy operation.
    pub fn clip(&self) -> Color {
        Color::new(
            self.space,
            self.components.0.clamp(0.0, 1.0),
            self.components.1.clamp(0.0, 1.0),
            self.components.2.clamp(0.0, 1.0),
            self.alpha(),
        )
    }

    /// Map this color into the gamut of the given space and return the
    /// result expressed in that space.
    ///
    /// An already displayable color converts without a mapping pass. Spaces
    /// without gamut limits convert as-is.
    pub fn map_to_gamut(&self, space: Space) -> Color {
        let Some(bounded) = space.gamut_space() else {
            return self.to_space(space);
        };

        if self.in_gamut(space) {
            return self.to_space(space);
        }

        let finish = |color: Color| {
            if space == bounded {
                color
            } else {
                color.to_space(space)
            }
        };

        let origin_oklch = self.to_space(Space::Oklch);
        let lightness = origin_oklch.components.0;

        // Beyond the lightness range of the gamut only white or black can
        // come out.
        if lightness >= 1.0 {
            return finish(Color::new(bounded, 1.0, 1.0, 1.0, self.alpha()));
        }
        if lightness <= 0.0 {
            return finish(Color::new(bounded, 0.0, 0.0, 0.0, self.alpha()));
        }

        // An achromatic color that still reports out of gamut is floating
        // point noise at the boundary; clamping resolves it.
        if almost_zero(origin_oklch.components.1) {
            return finish(self.to_space(bounded).clip());
        }

        let mut min = 0.0;
        let mut max = origin_oklch.components.1;
        let mut candidate = origin_oklch.clone();
        let mut mapped = None;

        for _ in 0..MAX_ITERATIONS {
            let chroma = (min + max) / 2.0;
            candidate.components.1 = chroma;

            let current = candidate.to_space(bounded);
            let deviation = channel_deviation(&current);

            if deviation <= 0.0 {
                min = chroma;
            } else if deviation < TOLERANCE {
                mapped = Some(current);
                break;
            } else {
                max = chroma;
            }
        }

        let mapped = mapped.unwrap_or_else(|| {
            candidate.components.1 = min;
            candidate.to_space(bounded)
        });

        // Clamp away any residual overshoot so the result is strictly
        // displayable.
        finish(mapped.clip())
    }

    /// [`Color::in_gamut`] against an advisory display gamut. With no hint
    /// every color counts as displayable.
    pub fn in_gamut_hint(&self, hint: GamutHint) -> bool {
        hint.space().map_or(true, |space| self.in_gamut(space))
    }

    /// [`Color::map_to_gamut`] against an advisory display gamut. With no
    /// hint the color is returned untouched.
    pub fn map_to_gamut_hint(&self, hint: GamutHint) -> Color {
        match hint.space() {
            Some(space) => self.map_to_gamut(space),
            None => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_gamut_checks() {
        let red = Color::new(Space::Srgb, 1.0, 0.0, 0.0, 1.0);
        assert!(red.in_gamut(Space::Srgb));
        assert!(red.in_gamut(Space::DisplayP3));

        let p3_red = Color::new(Space::DisplayP3, 1.0, 0.0, 0.0, 1.0);
        assert!(!p3_red.in_gamut(Space::Srgb));
        assert!(p3_red.in_gamut(Space::DisplayP3));

        // Unbounded spaces are always in gamut for themselves.
        let loud = Color::new(Space::Lab, 200.0, 300.0, -300.0, 1.0);
        assert!(loud.in_gamut(Space::Lab));

        // Cylindrical notations check against sRGB.
        let hsl = Color::new(Space::Hsl, 0.0, 2.0, 0.5, 1.0);
        assert!(!hsl.in_gamut(Space::Hsl));
    }

    #[test]
    fn epsilon_absorbs_boundary_noise() {
        let slightly_out = Color::new(Space::Srgb, 1.00005, 0.0, -0.00005, 1.0);
        assert!(slightly_out.in_gamut(Space::Srgb));
        assert!(!slightly_out.in_gamut_eps(Space::Srgb, 1.0e-6));
    }

    #[test]
    fn map_red() {
        // color(display-p3 1 0 0) mapped into sRGB reduces chroma to the
        // gamut boundary instead of clamping the channels.
        let source = Color::new(Space::DisplayP3, 1.0, 0.0, 0.0, 1.0);
        let mapped = source.map_to_gamut(Space::Srgb);

        assert_eq!(mapped.space, Space::Srgb);
        assert!(mapped.in_gamut(Space::Srgb));
        approx::assert_abs_diff_eq!(mapped.components.0, 1.0, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(mapped.components.1, 0.2035, epsilon = 1.0e-2);
        approx::assert_abs_diff_eq!(mapped.components.2, 0.1588, epsilon = 1.0e-2);
    }

    #[test]
    fn mapping_preserves_hue() {
        let source = Color::new(Space::DisplayP3, 1.0, 0.0, 0.0, 1.0);
        let mapped = source.map_to_gamut(Space::Srgb);

        let source_hue = source.to_space(Space::Oklch).components.2;
        let mapped_hue = mapped.to_space(Space::Oklch).components.2;
        assert!((source_hue - mapped_hue).abs() < 1.0);
    }

    #[test]
    fn mapping_postcondition_and_idempotence() {
        let sources = [
            Color::new(Space::DisplayP3, 1.0, 0.0, 0.0, 1.0),
            Color::new(Space::Oklch, 0.7, 0.35, 150.0, 1.0),
            Color::new(Space::Lab, 60.0, 120.0, -80.0, 1.0),
            Color::new(Space::Rec2020, 0.0, 1.0, 0.2, 1.0),
        ];

        for source in sources {
            for space in [Space::Srgb, Space::DisplayP3, Space::Rec2020] {
                let mapped = source.map_to_gamut(space);
                assert!(mapped.in_gamut(space));

                let again = mapped.map_to_gamut(space);
                assert_eq!(again, mapped);
            }
        }
    }

    #[test]
    fn in_gamut_color_is_not_touched() {
        let color = Color::new(Space::Srgb, 0.25, 0.5, 0.75, 0.5);
        assert_eq!(color.map_to_gamut(Space::Srgb), color);
    }

    #[test]
    fn extreme_lightness_short_circuits() {
        let hot = Color::new(Space::Oklch, 1.5, 0.2, 120.0, 1.0);
        let mapped = hot.map_to_gamut(Space::Srgb);
        assert_eq!(mapped.components.0, 1.0);
        assert_eq!(mapped.components.1, 1.0);
        assert_eq!(mapped.components.2, 1.0);

        let cold = Color::new(Space::Oklch, -0.5, 0.2, 120.0, 1.0);
        let mapped = cold.map_to_gamut(Space::Srgb);
        assert_eq!(mapped.components.0, 0.0);
    }

    #[test]
    fn achromatic_noise_clamps_directly() {
        let barely_out = Color::new(Space::Srgb, 1.001, 1.001, 1.001, 1.0);
        let mapped = barely_out.map_to_gamut(Space::Srgb);
        assert_eq!(mapped.components.0, 1.0);
        assert_eq!(mapped.components.1, 1.0);
        assert_eq!(mapped.components.2, 1.0);
    }

    #[test]
    fn gamut_hints_are_advisory() {
        let p3_red = Color::new(Space::DisplayP3, 1.0, 0.0, 0.0, 1.0);

        assert!(p3_red.in_gamut_hint(GamutHint::None));
        assert!(p3_red.in_gamut_hint(GamutHint::DisplayP3));
        assert!(!p3_red.in_gamut_hint(GamutHint::Srgb));

        assert_eq!(p3_red.map_to_gamut_hint(GamutHint::None), p3_red);
        let mapped = p3_red.map_to_gamut_hint(GamutHint::Srgb);
        assert_eq!(mapped.space, Space::Srgb);
        assert!(mapped.in_gamut(Space::Srgb));
    }

    #[test]
    fn mapping_to_cylindrical_spaces_lands_in_that_space() {
        let source = Color::new(Space::DisplayP3, 0.0, 1.0, 0.0, 1.0);
        let mapped = source.map_to_gamut(Space::Hsl);
        assert_eq!(mapped.space, Space::Hsl);
        assert!(mapped.in_gamut(Space::Hsl));
    }
}
