//! Models for the Okhsl and Okhsv notations of the sRGB gamut.
//!
//! Both are cylindrical parameterizations of the colors sRGB can display,
//! expressed through the Oklab color space: hue is the Oklab hue, saturation
//! is relative to the gamut boundary for that hue and lightness/value are
//! toe-mapped for perceptual uniformity.

use crate::color::{Component, HasSpace, Space};
use crate::math::{almost_zero, normalize, normalize_hue};
use crate::models::lab::Oklab;
use crate::models::rgb::{Srgb, SrgbLinear};

tinct_macros::gen_model! {
    /// A color specified with the Okhsl notation of the sRGB gamut.
    pub struct Okhsl {
        /// The hue component of the color.
        pub hue: Component,
        /// The saturation component of the color.
        pub saturation: Component,
        /// The lightness component of the color.
        pub lightness: Component,
    }
}

impl HasSpace for Okhsl {
    const SPACE: Space = Space::Okhsl;
}

tinct_macros::gen_model! {
    /// A color specified with the Okhsv notation of the sRGB gamut.
    pub struct Okhsv {
        /// The hue component of the color.
        pub hue: Component,
        /// The saturation component of the color.
        pub saturation: Component,
        /// The value component of the color.
        pub value: Component,
    }
}

impl HasSpace for Okhsv {
    const SPACE: Space = Space::Okhsv;
}

/// Lightness and chroma of the gamut cusp for a hue.
struct Lc {
    l: Component,
    c: Component,
}

/// The cusp expressed as saturation `S = C/L` and `T = C/(1-L)`.
struct St {
    s: Component,
    t: Component,
}

/// The chroma boundaries for a given lightness and hue.
struct Cs {
    c_0: Component,
    c_mid: Component,
    c_max: Component,
}

/// Convert linear-light sRGB to Oklab with the direct matrices. The cusp
/// polynomials below are fitted against exactly these coefficients, so this
/// module does not route through XYZ.
#[allow(clippy::excessive_precision)]
fn linear_srgb_to_oklab(rgb: &SrgbLinear) -> Oklab {
    let l = 0.4122214708 * rgb.red + 0.5363325363 * rgb.green + 0.0514459929 * rgb.blue;
    let m = 0.2119034982 * rgb.red + 0.6806995451 * rgb.green + 0.1073969566 * rgb.blue;
    let s = 0.0883024619 * rgb.red + 0.2817188376 * rgb.green + 0.6299787005 * rgb.blue;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab::new(
        0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    )
}

/// Convert Oklab to linear-light sRGB. The result may be out of gamut.
#[allow(clippy::excessive_precision)]
fn oklab_to_linear_srgb(lab: &Oklab) -> SrgbLinear {
    let l_ = lab.lightness + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
    let m_ = lab.lightness - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
    let s_ = lab.lightness - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    SrgbLinear::new(
        4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    )
}

/// Maximum saturation `S = C/L` that stays inside sRGB for the normalized
/// hue direction `(a, b)` with `a^2 + b^2 == 1`.
#[allow(clippy::excessive_precision)]
fn compute_max_saturation(a: Component, b: Component) -> Component {
    // Select different coefficients depending on which component goes below
    // zero first.
    let (k0, k1, k2, k3, k4, wl, wm, ws) = if -1.88170328 * a - 0.80936493 * b > 1.0 {
        // Red component.
        (
            1.19086277,
            1.76576728,
            0.59662641,
            0.75515197,
            0.56771245,
            4.0767416621,
            -3.3077115913,
            0.2309699292,
        )
    } else if 1.81444104 * a - 1.19445276 * b > 1.0 {
        // Green component.
        (
            0.73956515,
            -0.45954404,
            0.08285427,
            0.12541070,
            0.14503204,
            -1.2684380046,
            2.6097574011,
            -0.3413193965,
        )
    } else {
        // Blue component.
        (
            1.35733652,
            -0.00915799,
            -1.15130210,
            -0.50559606,
            0.00692167,
            -0.0041960863,
            -0.7034186147,
            1.7076147010,
        )
    };

    // Polynomial approximation, then one step of Halley's method.
    let mut s = k0 + k1 * a + k2 * b + k3 * a * a + k4 * a * b;

    let k_l = 0.3963377774 * a + 0.2158037573 * b;
    let k_m = -0.1055613458 * a - 0.0638541728 * b;
    let k_s = -0.0894841775 * a - 1.2914855480 * b;

    {
        let l_ = 1.0 + s * k_l;
        let m_ = 1.0 + s * k_m;
        let s_ = 1.0 + s * k_s;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s_val = s_ * s_ * s_;

        let l_ds = 3.0 * k_l * l_ * l_;
        let m_ds = 3.0 * k_m * m_ * m_;
        let s_ds = 3.0 * k_s * s_ * s_;

        let l_ds2 = 6.0 * k_l * k_l * l_;
        let m_ds2 = 6.0 * k_m * k_m * m_;
        let s_ds2 = 6.0 * k_s * k_s * s_;

        let f = wl * l + wm * m + ws * s_val;
        let f1 = wl * l_ds + wm * m_ds + ws * s_ds;
        let f2 = wl * l_ds2 + wm * m_ds2 + ws * s_ds2;

        s -= f * f1 / (f1 * f1 - 0.5 * f * f2);
    }

    s
}

/// The point of maximum chroma of the sRGB gamut for a hue direction.
fn find_cusp(a: Component, b: Component) -> Lc {
    let s_cusp = compute_max_saturation(a, b);

    // Convert to linear sRGB to find the first point where at least one of
    // r, g or b >= 1.
    let rgb_at_max = oklab_to_linear_srgb(&Oklab::new(1.0, s_cusp * a, s_cusp * b));
    let l_cusp = (1.0 / rgb_at_max.red.max(rgb_at_max.green).max(rgb_at_max.blue)).cbrt();
    let c_cusp = l_cusp * s_cusp;

    Lc {
        l: l_cusp,
        c: c_cusp,
    }
}

/// Intersection of the line `L = L0 * (1 - t) + t * L1, C = t * C1` with the
/// sRGB gamut boundary, as the parameter `t`.
#[allow(clippy::excessive_precision)]
fn find_gamut_intersection(
    a: Component,
    b: Component,
    l1: Component,
    c1: Component,
    l0: Component,
    cusp: &Lc,
) -> Component {
    if ((l1 - l0) * cusp.c - (cusp.l - l0) * c1) <= 0.0 {
        // Lower half.
        return cusp.c * l0 / (c1 * cusp.l + cusp.c * (l0 - l1));
    }

    // Upper half: first intersect with the triangle, then one step of
    // Halley's method against the actual boundary.
    let mut t_val = cusp.c * (l0 - 1.0) / (c1 * (cusp.l - 1.0) + cusp.c * (l0 - l1));

    let dl = l1 - l0;
    let dc = c1;

    let k_l = 0.3963377774 * a + 0.2158037573 * b;
    let k_m = -0.1055613458 * a - 0.0638541728 * b;
    let k_s = -0.0894841775 * a - 1.2914855480 * b;

    let l_dt = dl + dc * k_l;
    let m_dt = dl + dc * k_m;
    let s_dt = dl + dc * k_s;

    {
        let l = l0 * (1.0 - t_val) + t_val * l1;
        let c = t_val * c1;

        let l_ = l + c * k_l;
        let m_ = l + c * k_m;
        let s_ = l + c * k_s;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        let ldt = 3.0 * l_dt * l_ * l_;
        let mdt = 3.0 * m_dt * m_ * m_;
        let sdt = 3.0 * s_dt * s_ * s_;

        let ldt2 = 6.0 * l_dt * l_dt * l_;
        let mdt2 = 6.0 * m_dt * m_dt * m_;
        let sdt2 = 6.0 * s_dt * s_dt * s_;

        let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s - 1.0;
        let r1 = 4.0767416621 * ldt - 3.3077115913 * mdt + 0.2309699292 * sdt;
        let r2 = 4.0767416621 * ldt2 - 3.3077115913 * mdt2 + 0.2309699292 * sdt2;

        let u_r = r1 / (r1 * r1 - 0.5 * r * r2);
        let t_r = -r * u_r;

        let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s - 1.0;
        let g1 = -1.2684380046 * ldt + 2.6097574011 * mdt - 0.3413193965 * sdt;
        let g2 = -1.2684380046 * ldt2 + 2.6097574011 * mdt2 - 0.3413193965 * sdt2;

        let u_g = g1 / (g1 * g1 - 0.5 * g * g2);
        let t_g = -g * u_g;

        let b_val = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s - 1.0;
        let b1 = -0.0041960863 * ldt - 0.7034186147 * mdt + 1.7076147010 * sdt;
        let b2 = -0.0041960863 * ldt2 - 0.7034186147 * mdt2 + 1.7076147010 * sdt2;

        let u_b = b1 / (b1 * b1 - 0.5 * b_val * b2);
        let t_b = -b_val * u_b;

        let t_r = if u_r >= 0.0 { t_r } else { Component::MAX };
        let t_g = if u_g >= 0.0 { t_g } else { Component::MAX };
        let t_b = if u_b >= 0.0 { t_b } else { Component::MAX };

        t_val += t_r.min(t_g.min(t_b));
    }

    t_val
}

const K_1: Component = 0.206;
const K_2: Component = 0.03;
const K_3: Component = (1.0 + K_1) / (1.0 + K_2);

/// The lightness toe: maps Oklab lightness to a scale matching CIE L*.
fn toe(x: Component) -> Component {
    0.5 * (K_3 * x - K_1 + ((K_3 * x - K_1) * (K_3 * x - K_1) + 4.0 * K_2 * K_3 * x).sqrt())
}

/// Inverse of [`toe`].
fn toe_inv(x: Component) -> Component {
    (x * x + K_1 * x) / (K_3 * (x + K_2))
}

fn to_st(cusp: &Lc) -> St {
    St {
        s: cusp.c / cusp.l,
        t: cusp.c / (1.0 - cusp.l),
    }
}

/// Smooth polynomial approximation of the cusp location, designed so that
/// `S_mid < S_max` and `T_mid < T_max`.
#[allow(clippy::excessive_precision)]
fn get_st_mid(a_: Component, b_: Component) -> St {
    let s = 0.11516993
        + 1.0 / (7.44778970
            + 4.15901240 * b_
            + a_ * (-2.19557347
                + 1.75198401 * b_
                + a_ * (-2.13704948 - 10.02301043 * b_
                    + a_ * (-4.24894561 + 5.38770819 * b_ + 4.69891013 * a_))));

    let t = 0.11239642
        + 1.0 / (1.61320320 - 0.68124379 * b_
            + a_ * (0.40370612
                + 0.90148123 * b_
                + a_ * (-0.27087943
                    + 0.61223990 * b_
                    + a_ * (0.00299215 - 0.45399568 * b_ - 0.14661872 * a_))));

    St { s, t }
}

/// Chroma boundaries `(C_0, C_mid, C_max)` for a lightness and hue direction.
fn get_cs(l: Component, a_: Component, b_: Component) -> Cs {
    let cusp = find_cusp(a_, b_);

    let c_max = find_gamut_intersection(a_, b_, l, 1.0, l, &cusp);
    let st_max = to_st(&cusp);

    // Scale factor to compensate for the curved part of the gamut shape.
    let k = c_max / (l * st_max.s).min((1.0 - l) * st_max.t);

    let c_mid = {
        let st_mid = get_st_mid(a_, b_);

        // Soft minimum instead of a sharp triangle shape.
        let c_a = l * st_mid.s;
        let c_b = (1.0 - l) * st_mid.t;
        0.9 * k
            * (1.0 / (1.0 / (c_a * c_a * c_a * c_a) + 1.0 / (c_b * c_b * c_b * c_b)))
                .sqrt()
                .sqrt()
    };

    let c_0 = {
        // The shape is independent of hue here, so the ST values are
        // constants picked to roughly be the average.
        let c_a = l * 0.4;
        let c_b = (1.0 - l) * 0.8;

        (1.0 / (1.0 / (c_a * c_a) + 1.0 / (c_b * c_b))).sqrt()
    };

    Cs { c_0, c_mid, c_max }
}

const MID: Component = 0.8;
const MID_INV: Component = 1.25;

impl Okhsl {
    /// Convert this color from the Okhsl notation to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        let hue = normalize(self.hue);
        let s = normalize(self.saturation);
        let l = normalize(self.lightness);

        if l >= 1.0 {
            return Srgb::new(1.0, 1.0, 1.0);
        } else if l <= 0.0 {
            return Srgb::new(0.0, 0.0, 0.0);
        }

        let a_ = hue.to_radians().cos();
        let b_ = hue.to_radians().sin();
        let l_val = toe_inv(l);

        let Cs { c_0, c_mid, c_max } = get_cs(l_val, a_, b_);

        let c = if s < MID {
            let t = MID_INV * s;

            let k_1 = MID * c_0;
            let k_2 = 1.0 - k_1 / c_mid;

            t * k_1 / (1.0 - k_2 * t)
        } else {
            let t = (s - MID) / (1.0 - MID);

            let k_0 = c_mid;
            let k_1 = (1.0 - MID) * c_mid * c_mid * MID_INV * MID_INV / c_0;
            let k_2 = 1.0 - k_1 / (c_max - c_mid);

            k_0 + t * k_1 / (1.0 - k_2 * t)
        };

        oklab_to_linear_srgb(&Oklab::new(l_val, c * a_, c * b_)).to_gamma_encoded()
    }
}

impl Okhsv {
    /// Convert this color from the Okhsv notation to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        let hue = normalize(self.hue);
        let s = normalize(self.saturation);
        let v = normalize(self.value);

        if v <= 0.0 {
            return Srgb::new(0.0, 0.0, 0.0);
        }

        let a_ = hue.to_radians().cos();
        let b_ = hue.to_radians().sin();

        let cusp = find_cusp(a_, b_);
        let st_max = to_st(&cusp);
        let s_0 = 0.5;
        let k = 1.0 - s_0 / st_max.s;

        // L and C as if the gamut were a perfect triangle.
        let l_v = 1.0 - s * s_0 / (s_0 + st_max.t - st_max.t * k * s);
        let c_v = s * st_max.t * s_0 / (s_0 + st_max.t - st_max.t * k * s);

        let mut l = v * l_v;
        let mut c = v * c_v;

        // Compensate for both the toe and the curved top of the triangle.
        let l_vt = toe_inv(l_v);
        let c_vt = c_v * l_vt / l_v;

        let l_new = toe_inv(l);
        c *= l_new / l;
        l = l_new;

        let rgb_scale = oklab_to_linear_srgb(&Oklab::new(l_vt, a_ * c_vt, b_ * c_vt));
        let scale_l = (1.0
            / rgb_scale
                .red
                .max(rgb_scale.green)
                .max(rgb_scale.blue.max(0.0)))
        .cbrt();

        l *= scale_l;
        c *= scale_l;

        oklab_to_linear_srgb(&Oklab::new(l, c * a_, c * b_)).to_gamma_encoded()
    }
}

impl Srgb {
    /// Convert a color specified in the sRGB color space to the Okhsl
    /// notation.
    pub fn to_okhsl(&self) -> Okhsl {
        let lab = linear_srgb_to_oklab(&self.to_linear_light());

        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        let l = lab.lightness;

        if almost_zero(c) {
            return Okhsl::new(Component::NAN, 0.0, toe(l));
        }

        let a_ = lab.a / c;
        let b_ = lab.b / c;
        let hue = normalize_hue(lab.b.atan2(lab.a).to_degrees());

        let Cs { c_0, c_mid, c_max } = get_cs(l, a_, b_);

        // Inverse of the interpolation in Okhsl::to_srgb.
        let s = if c < c_mid {
            let k_1 = MID * c_0;
            let k_2 = 1.0 - k_1 / c_mid;

            let t = c / (k_1 + k_2 * c);
            t * MID
        } else {
            let k_0 = c_mid;
            let k_1 = (1.0 - MID) * c_mid * c_mid * MID_INV * MID_INV / c_0;
            let k_2 = 1.0 - k_1 / (c_max - c_mid);

            let t = (c - k_0) / (k_1 + k_2 * (c - k_0));
            MID + (1.0 - MID) * t
        };

        Okhsl::new(hue, s, toe(l))
    }

    /// Convert a color specified in the sRGB color space to the Okhsv
    /// notation.
    pub fn to_okhsv(&self) -> Okhsv {
        let lab = linear_srgb_to_oklab(&self.to_linear_light());

        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        let mut l = lab.lightness;

        if l <= 0.0 {
            return Okhsv::new(Component::NAN, 0.0, 0.0);
        }

        let achromatic = almost_zero(c);
        let (a_, b_, hue) = if achromatic {
            (1.0, 0.0, Component::NAN)
        } else {
            (
                lab.a / c,
                lab.b / c,
                normalize_hue(lab.b.atan2(lab.a).to_degrees()),
            )
        };

        let cusp = find_cusp(a_, b_);
        let st_max = to_st(&cusp);
        let s_0 = 0.5;
        let k = 1.0 - s_0 / st_max.s;

        let t = st_max.t / (c + l * st_max.t);
        let l_v = t * l;
        let c_v = t * c;

        let l_vt = toe_inv(l_v);
        let c_vt = c_v * l_vt / l_v;

        // Invert the toe and curved-top compensation.
        let rgb_scale = oklab_to_linear_srgb(&Oklab::new(l_vt, a_ * c_vt, b_ * c_vt));
        let scale_l = (1.0
            / rgb_scale
                .red
                .max(rgb_scale.green)
                .max(rgb_scale.blue.max(0.0)))
        .cbrt();

        l /= scale_l;
        l = toe(l);

        let v = l / l_v;
        let s = (s_0 + st_max.t) * c_v / ((st_max.t * s_0) + st_max.t * k * c_v);

        Okhsv::new(hue, s, v)
    }
}
