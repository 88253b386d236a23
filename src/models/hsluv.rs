//! Model a color with the HSLuv notation of the sRGB gamut.
//!
//! HSLuv is the cylindrical form of CIE-Luv (LCHuv) with chroma normalized
//! against the maximum chroma the sRGB gamut allows for the given lightness
//! and hue, so saturation always spans the full `[0, 1]` range.

use crate::color::{Component, HasSpace, Space};
use crate::math::{almost_zero, normalize, normalize_hue};
use crate::models::xyz::{ToXyz, Xyz, XyzD65, D65};

tinct_macros::gen_model! {
    /// A color specified with the HSLuv notation of the sRGB gamut.
    pub struct Hsluv {
        /// The hue component of the color.
        pub hue: Component,
        /// The saturation component of the color.
        pub saturation: Component,
        /// The lightness component of the color.
        pub lightness: Component,
    }
}

impl HasSpace for Hsluv {
    const SPACE: Space = Space::Hsluv;
}

const KAPPA: Component = 24389.0 / 27.0;
const EPSILON: Component = 216.0 / 24389.0;

// D65 chromaticity in u'v' coordinates.
#[allow(clippy::excessive_precision)]
const REF_U: Component = 0.19783000664283;
#[allow(clippy::excessive_precision)]
const REF_V: Component = 0.46831999493879;

// Rows of the XYZ to linear-light sRGB matrix, used to derive the gamut
// bounding lines in chroma/lightness space.
#[allow(clippy::excessive_precision)]
const M: [[Component; 3]; 3] = [
    [3.240969941904521, -1.537383177570093, -0.498610760293],
    [-0.96924363628087, 1.87596750150772, 0.041555057407175],
    [0.055630079696993, -0.20397695888897, 1.056971514242878],
];

fn y_to_l(y: Component) -> Component {
    if y <= EPSILON {
        y * KAPPA
    } else {
        116.0 * y.cbrt() - 16.0
    }
}

fn l_to_y(l: Component) -> Component {
    if l <= 8.0 {
        l / KAPPA
    } else {
        let f = (l + 16.0) / 116.0;
        f * f * f
    }
}

fn xyz_to_luv(xyz: &XyzD65) -> (Component, Component, Component) {
    let l = y_to_l(xyz.y);
    if almost_zero(l) {
        return (0.0, 0.0, 0.0);
    }

    let div = xyz.x + 15.0 * xyz.y + 3.0 * xyz.z;
    let var_u = 4.0 * xyz.x / div;
    let var_v = 9.0 * xyz.y / div;

    (l, 13.0 * l * (var_u - REF_U), 13.0 * l * (var_v - REF_V))
}

fn luv_to_xyz(l: Component, u: Component, v: Component) -> XyzD65 {
    if almost_zero(l) {
        return Xyz::new(0.0, 0.0, 0.0);
    }

    let var_u = u / (13.0 * l) + REF_U;
    let var_v = v / (13.0 * l) + REF_V;

    let y = l_to_y(l);
    let x = -(9.0 * y * var_u) / ((var_u - 4.0) * var_v - var_u * var_v);
    let z = (9.0 * y - (15.0 * var_v * y) - (var_v * x)) / (3.0 * var_v);

    Xyz::new(x, y, z)
}

/// The six lines bounding the sRGB gamut in the chroma plane at lightness
/// `l` (in `[0, 100]`): for each RGB channel, the line where it reaches 0
/// and the line where it reaches 1.
fn bounds(l: Component) -> [(Component, Component); 6] {
    let sub1 = {
        let t = l + 16.0;
        t * t * t / 1560896.0
    };
    let sub2 = if sub1 > EPSILON { sub1 } else { l / KAPPA };

    let mut lines = [(0.0, 0.0); 6];
    for (channel, m) in M.iter().enumerate() {
        for t in 0..2 {
            let t = t as Component;

            let top1 = (284517.0 * m[0] - 94839.0 * m[2]) * sub2;
            let top2 = (838422.0 * m[2] + 769860.0 * m[1] + 731718.0 * m[0]) * l * sub2
                - 769860.0 * t * l;
            let bottom = (632260.0 * m[2] - 126452.0 * m[1]) * sub2 + 126452.0 * t;

            lines[channel * 2 + t as usize] = (top1 / bottom, top2 / bottom);
        }
    }
    lines
}

/// The largest chroma that stays inside sRGB for the given lightness (in
/// `[0, 100]`) and hue (in degrees).
fn max_chroma_for(l: Component, hue: Component) -> Component {
    let h_rad = hue.to_radians();
    let (sin_h, cos_h) = h_rad.sin_cos();

    let mut min_length = Component::MAX;
    for (slope, intercept) in bounds(l) {
        // Length of the ray from the origin at angle `h_rad` to the line.
        let length = intercept / (sin_h - slope * cos_h);
        if length >= 0.0 && length < min_length {
            min_length = length;
        }
    }
    min_length
}

impl Hsluv {
    /// Resolve saturation against the per-hue chroma limit, giving LCH(uv).
    fn to_lch(&self) -> (Component, Component, Component) {
        let hue = normalize(self.hue);
        let s = normalize(self.saturation) * 100.0;
        let l = normalize(self.lightness) * 100.0;

        if l > 99.9999 {
            return (100.0, 0.0, hue);
        }
        if l < 1.0e-8 {
            return (0.0, 0.0, hue);
        }

        let chroma = max_chroma_for(l, hue) / 100.0 * s;
        (l, chroma, hue)
    }
}

impl ToXyz for Hsluv {
    type WhitePoint = D65;

    fn to_xyz(&self) -> XyzD65 {
        let (l, chroma, hue) = self.to_lch();
        let h_rad = hue.to_radians();
        luv_to_xyz(l, chroma * h_rad.cos(), chroma * h_rad.sin())
    }
}

impl From<XyzD65> for Hsluv {
    fn from(value: XyzD65) -> Self {
        let (l, u, v) = xyz_to_luv(&value);
        let chroma = (u * u + v * v).sqrt();

        if l > 99.9999 {
            return Hsluv::new(Component::NAN, 0.0, 1.0);
        }
        if l < 1.0e-8 {
            return Hsluv::new(Component::NAN, 0.0, 0.0);
        }

        // Luv chroma sits on a ~100 scale, so boundary noise from the float
        // pipeline is orders of magnitude larger than in the unit spaces.
        if chroma < 1.0e-3 {
            return Hsluv::new(Component::NAN, 0.0, l / 100.0);
        }

        let hue = normalize_hue(v.atan2(u).to_degrees());
        let saturation = chroma / max_chroma_for(l, hue) * 100.0;

        Hsluv::new(hue, saturation / 100.0, l / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::models::rgb::SrgbLinear;
    use crate::models::xyz::D65;
    use crate::models::xyz::WhitePoint;

    const EPS: Component = 1.0e-3;

    #[test]
    fn white_and_black() {
        let white = Hsluv::new(0.0, 0.0, 1.0).to_xyz();
        assert_abs_diff_eq!(white.x, D65::WHITE_POINT.0, epsilon = EPS);
        assert_abs_diff_eq!(white.y, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(white.z, D65::WHITE_POINT.2, epsilon = EPS);

        let black = Hsluv::new(0.0, 0.0, 0.0).to_xyz();
        assert_abs_diff_eq!(black.y, 0.0, epsilon = EPS);
    }

    #[test]
    fn round_trips_through_xyz() {
        for &(h, s, l) in &[(12.177, 1.0, 0.532), (200.0, 0.4, 0.75), (310.0, 0.8, 0.25)] {
            let xyz = Hsluv::new(h, s, l).to_xyz();
            let back = Hsluv::from(xyz);
            assert_abs_diff_eq!(back.hue, h, epsilon = 0.05);
            assert_abs_diff_eq!(back.saturation, s, epsilon = EPS);
            assert_abs_diff_eq!(back.lightness, l, epsilon = EPS);
        }
    }

    #[test]
    fn full_saturation_touches_the_srgb_boundary() {
        // hsluv(12.177 100% 53.2%) is the HSLuv rendition of pure red.
        let xyz = Hsluv::new(12.177, 1.0, 0.532).to_xyz();
        let rgb = SrgbLinear::from(xyz).to_gamma_encoded();
        assert_abs_diff_eq!(rgb.red, 1.0, epsilon = 5.0e-3);
        assert_abs_diff_eq!(rgb.green, 0.0, epsilon = 5.0e-3);
        assert_abs_diff_eq!(rgb.blue, 0.0, epsilon = 5.0e-3);
    }

    #[test]
    fn achromatic_has_missing_hue() {
        let grey = Hsluv::from(Xyz::new(0.2, 0.21, 0.22));
        // Near-neutral but not exactly achromatic: hue must be defined.
        assert!(!grey.hue.is_nan());

        let white_point = Xyz::new(
            D65::WHITE_POINT.0 * 0.5,
            D65::WHITE_POINT.1 * 0.5,
            D65::WHITE_POINT.2 * 0.5,
        );
        let neutral = Hsluv::from(white_point);
        assert!(neutral.hue.is_nan());
        assert_abs_diff_eq!(neutral.saturation, 0.0, epsilon = EPS);
    }
}
