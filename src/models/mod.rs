//! Models are structs that represent a color in a specified color space or
//! form. They represent a type safe way to convert between different color
//! spaces and forms.

use crate::color::{Color, Component};

mod base;
mod hsl;
mod hsluv;
mod hsv;
mod hwb;
pub(crate) mod lab;
mod okhsx;
pub(crate) mod rgb;
pub(crate) mod xyz;

pub use hsl::Hsl;
pub use hsluv::Hsluv;
pub use hsv::Hsv;
pub use hwb::Hwb;
pub use lab::{Lab, Lch, Oklab, Oklch, Polar, Rectangular};
pub use okhsx::{Okhsl, Okhsv};
pub use rgb::{
    encoding, A98Rgb, A98RgbLinear, DisplayP3, DisplayP3Linear, ProPhotoRgb, ProPhotoRgbLinear,
    Rec2020, Rec2020Linear, Rgb, Srgb, SrgbLinear,
};
pub use xyz::{ToXyz, TransferWhitePoint, WhitePoint, Xyz, XyzD50, XyzD65, D50, D65};

pub use base::{Base, BaseWhitePoint, ToBase};

/// A trait implemented for color models that can be converted to a generic
/// [`Color`].
pub trait Model {
    /// Convert a model to a generic [`Color`].
    fn to_color(&self, alpha: Option<Component>) -> Color;
}
