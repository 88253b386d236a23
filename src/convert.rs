//! Each color space/form is modeled with its own type. Conversions are only
//! implemented on relevant models, making conversion paths accurate and
//! performant.
//!
//! Conversions only operate on the 3 color components (no alpha). A
//! conversion that yields a NaN value marks that component as powerless and
//! the resulting [`Color`] stores it as missing.

use crate::color::{Color, Space};
use crate::models::{
    A98Rgb, A98RgbLinear, DisplayP3, DisplayP3Linear, Hsl, Hsluv, Hsv, Hwb, Lab, Lch, Model,
    Okhsl, Okhsv, Oklab, Oklch, ProPhotoRgb, ProPhotoRgbLinear, Rec2020, Rec2020Linear, Srgb,
    SrgbLinear, ToBase, XyzD50, XyzD65, D50, D65,
};

impl Color {
    /// Convert this color from its current color space/notation to the
    /// specified color space/notation.
    ///
    /// Converting to the color's own space is the identity and returns the
    /// coordinates bit-for-bit, missing components included.
    pub fn to_space(&self, space: Space) -> Self {
        use Space as S;

        if self.space == space {
            return self.clone();
        }

        let alpha = self.alpha();

        macro_rules! model {
            ($m:ident) => {{
                $m::from(self.components)
            }};
        }

        // Handle direct conversions that never need to touch the XYZ hub.
        match (self.space, space) {
            (S::Srgb, S::SrgbLinear) => {
                return model!(Srgb).to_linear_light().to_color(alpha);
            }
            (S::SrgbLinear, S::Srgb) => {
                return model!(SrgbLinear).to_gamma_encoded().to_color(alpha);
            }
            (S::Srgb, S::Hsl) => return model!(Srgb).to_hsl().to_color(alpha),
            (S::Hsl, S::Srgb) => return model!(Hsl).to_srgb().to_color(alpha),
            (S::Srgb, S::Hsv) => return model!(Srgb).to_hsv().to_color(alpha),
            (S::Hsv, S::Srgb) => return model!(Hsv).to_srgb().to_color(alpha),
            (S::Srgb, S::Hwb) => return model!(Srgb).to_hwb().to_color(alpha),
            (S::Hwb, S::Srgb) => return model!(Hwb).to_srgb().to_color(alpha),
            (S::Srgb, S::Okhsl) => return model!(Srgb).to_okhsl().to_color(alpha),
            (S::Okhsl, S::Srgb) => return model!(Okhsl).to_srgb().to_color(alpha),
            (S::Srgb, S::Okhsv) => return model!(Srgb).to_okhsv().to_color(alpha),
            (S::Okhsv, S::Srgb) => return model!(Okhsv).to_srgb().to_color(alpha),
            (S::Hsl, S::Hwb) => return model!(Hsl).to_srgb().to_hwb().to_color(alpha),
            (S::Hwb, S::Hsl) => return model!(Hwb).to_srgb().to_hsl().to_color(alpha),
            (S::Hsl, S::Hsv) => return model!(Hsl).to_srgb().to_hsv().to_color(alpha),
            (S::Hsv, S::Hsl) => return model!(Hsv).to_srgb().to_hsl().to_color(alpha),
            (S::Lab, S::Lch) => return model!(Lab).to_polar().to_color(alpha),
            (S::Lch, S::Lab) => return model!(Lch).to_rectangular().to_color(alpha),
            (S::Oklab, S::Oklch) => return model!(Oklab).to_polar().to_color(alpha),
            (S::Oklch, S::Oklab) => return model!(Oklch).to_rectangular().to_color(alpha),
            (S::XyzD50, S::XyzD65) => {
                return model!(XyzD50).transfer::<D65>().to_color(alpha);
            }
            (S::XyzD65, S::XyzD50) => {
                return model!(XyzD65).transfer::<D50>().to_color(alpha);
            }
            _ => {}
        }

        // The rest converts through the base color space.
        let base = match self.space {
            S::Srgb => model!(Srgb).to_base(),
            S::SrgbLinear => model!(SrgbLinear).to_base(),
            S::A98Rgb => model!(A98Rgb).to_base(),
            S::DisplayP3 => model!(DisplayP3).to_base(),
            S::Rec2020 => model!(Rec2020).to_base(),
            S::ProPhotoRgb => model!(ProPhotoRgb).to_base(),
            S::XyzD65 => model!(XyzD65).to_base(),
            S::XyzD50 => model!(XyzD50).to_base(),
            S::Lab => model!(Lab).to_base(),
            S::Lch => model!(Lch).to_base(),
            S::Oklab => model!(Oklab).to_base(),
            S::Oklch => model!(Oklch).to_base(),
            S::Hsl => model!(Hsl).to_base(),
            S::Hsv => model!(Hsv).to_base(),
            S::Hwb => model!(Hwb).to_base(),
            S::Okhsv => model!(Okhsv).to_base(),
            S::Okhsl => model!(Okhsl).to_base(),
            S::Hsluv => model!(Hsluv).to_base(),
        };

        match space {
            S::Srgb => SrgbLinear::from(base.transfer())
                .to_gamma_encoded()
                .to_color(alpha),
            S::SrgbLinear => SrgbLinear::from(base.transfer()).to_color(alpha),
            S::Hsl => SrgbLinear::from(base.transfer())
                .to_gamma_encoded()
                .to_hsl()
                .to_color(alpha),
            S::Hsv => SrgbLinear::from(base.transfer())
                .to_gamma_encoded()
                .to_hsv()
                .to_color(alpha),
            S::Hwb => SrgbLinear::from(base.transfer())
                .to_gamma_encoded()
                .to_hwb()
                .to_color(alpha),
            S::Okhsl => SrgbLinear::from(base.transfer())
                .to_gamma_encoded()
                .to_okhsl()
                .to_color(alpha),
            S::Okhsv => SrgbLinear::from(base.transfer())
                .to_gamma_encoded()
                .to_okhsv()
                .to_color(alpha),
            S::Hsluv => Hsluv::from(base.transfer()).to_color(alpha),
            S::Lab => Lab::from(base.transfer()).to_color(alpha),
            S::Lch => Lab::from(base.transfer()).to_polar().to_color(alpha),
            S::Oklab => Oklab::from(base.transfer()).to_color(alpha),
            S::Oklch => Oklab::from(base.transfer()).to_polar().to_color(alpha),
            S::DisplayP3 => DisplayP3Linear::from(base.transfer())
                .to_gamma_encoded()
                .to_color(alpha),
            S::A98Rgb => A98RgbLinear::from(base.transfer())
                .to_gamma_encoded()
                .to_color(alpha),
            S::ProPhotoRgb => ProPhotoRgbLinear::from(base.transfer())
                .to_gamma_encoded()
                .to_color(alpha),
            S::Rec2020 => Rec2020Linear::from(base.transfer())
                .to_gamma_encoded()
                .to_color(alpha),
            S::XyzD50 => base.transfer::<D50>().to_color(alpha),
            S::XyzD65 => base.transfer::<D65>().to_color(alpha),
        }
    }

    /// Convert this color to the specified space and, if that space has
    /// gamut limits, map the result into them.
    pub fn to_space_in_gamut(&self, space: Space) -> Self {
        self.map_to_gamut(space)
    }
}

impl Srgb {
    /// Convert a color specified in the sRGB color space to the HSL notation.
    pub fn to_hsl(&self) -> Hsl {
        util::rgb_to_hsl(&self.to_components()).into()
    }

    /// Convert a color specified in the sRGB color space to the HSV notation.
    pub fn to_hsv(&self) -> Hsv {
        util::rgb_to_hsv(&self.to_components()).into()
    }

    /// Convert a color specified in the sRGB color space to the HWB notation.
    pub fn to_hwb(&self) -> Hwb {
        util::rgb_to_hwb(&self.to_components()).into()
    }
}

impl Hsl {
    /// Convert this color from the HSL notation to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        util::hsl_to_rgb(&self.to_components()).into()
    }
}

impl Hsv {
    /// Convert this color from the HSV notation to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        util::hsv_to_rgb(&self.to_components()).into()
    }
}

impl Hwb {
    /// Convert this color from the HWB notation to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        util::hwb_to_rgb(&self.to_components()).into()
    }
}

mod util {
    use crate::color::{Component, Components};
    use crate::math::{almost_zero, normalize, normalize_hue};

    /// Calculate the hue from RGB components and return it along with the min
    /// and max RGB values.
    fn rgb_to_hue_with_min_max(from: &Components) -> (Component, Component, Component) {
        let Components(red, green, blue) = *from;

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);

        let delta = max - min;

        let hue = if delta != 0.0 {
            60.0 * if max == red {
                (green - blue) / delta + if green < blue { 6.0 } else { 0.0 }
            } else if max == green {
                (blue - red) / delta + 2.0
            } else {
                (red - green) / delta + 4.0
            }
        } else {
            Component::NAN
        };

        (hue, min, max)
    }

    /// Convert from RGB notation to HSL notation.
    /// <https://drafts.csswg.org/css-color-4/#rgb-to-hsl>
    pub fn rgb_to_hsl(from: &Components) -> Components {
        let (hue, min, max) = rgb_to_hue_with_min_max(from);

        let lightness = (min + max) / 2.0;
        let delta = max - min;

        let saturation =
            if almost_zero(delta) || almost_zero(lightness) || almost_zero(1.0 - lightness) {
                0.0
            } else {
                (max - lightness) / lightness.min(1.0 - lightness)
            };

        Components(hue, saturation, lightness)
    }

    /// Convert from HSL notation to RGB notation.
    /// <https://drafts.csswg.org/css-color-4/#hsl-to-rgb>
    pub fn hsl_to_rgb(from: &Components) -> Components {
        let Components(hue, saturation, lightness) = from.map(normalize);

        if saturation <= 0.0 {
            return Components(lightness, lightness, lightness);
        }

        let hue = normalize_hue(hue);

        macro_rules! f {
            ($n:expr) => {{
                let k = ($n + hue / 30.0) % 12.0;
                let a = saturation * lightness.min(1.0 - lightness);
                lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
            }};
        }

        Components(f!(0.0), f!(8.0), f!(4.0))
    }

    /// Convert from RGB notation to HSV notation.
    pub fn rgb_to_hsv(from: &Components) -> Components {
        let (hue, min, max) = rgb_to_hue_with_min_max(from);

        let saturation = if almost_zero(max) {
            0.0
        } else {
            (max - min) / max
        };

        Components(hue, saturation, max)
    }

    /// Convert from HSV notation to RGB notation.
    pub fn hsv_to_rgb(from: &Components) -> Components {
        let Components(hue, saturation, value) = from.map(normalize);

        if saturation <= 0.0 {
            return Components(value, value, value);
        }

        let hue = normalize_hue(hue);

        macro_rules! f {
            ($n:expr) => {{
                let k = ($n + hue / 60.0) % 6.0;
                value - value * saturation * k.min(4.0 - k).clamp(0.0, 1.0)
            }};
        }

        Components(f!(5.0), f!(3.0), f!(1.0))
    }

    /// Convert from RGB notation to HWB notation.
    /// <https://drafts.csswg.org/css-color-4/#rgb-to-hwb>
    pub fn rgb_to_hwb(from: &Components) -> Components {
        let (hue, min, max) = rgb_to_hue_with_min_max(from);

        let whiteness = min;
        let blackness = 1.0 - max;

        Components(hue, whiteness, blackness)
    }

    /// Convert from HWB notation to RGB notation.
    /// <https://drafts.csswg.org/css-color-4/#hwb-to-rgb>
    pub fn hwb_to_rgb(from: &Components) -> Components {
        let hue = from.0;
        let whiteness = from.1;
        let blackness = from.2;

        if whiteness + blackness >= 1.0 {
            let gray = whiteness / (whiteness + blackness);
            return Components(gray, gray, gray);
        }

        let rgb = hsl_to_rgb(&Components(hue, 1.0, 0.5));
        rgb.map(|v| v * (1.0 - whiteness - blackness) + whiteness)
    }
}
