//! Functions for converting color models to a base color space common to all
//! models. Used for color conversion.

use crate::models::{self, ToXyz};

// D65 is used by many more color spaces than D50, so it's a better choice
// for not having to do unnecessary matrix multiplications.

/// The white point reference used by the base model.
pub type BaseWhitePoint = models::D65;

/// The model used as the base color for color conversions.
pub type Base = models::Xyz<BaseWhitePoint>;

/// Used to convert any model to a base color space.
pub trait ToBase {
    /// Convert the model to a base color space.
    fn to_base(&self) -> Base;
}

impl<S> ToBase for models::Rgb<S, models::encoding::LinearLight>
where
    S: models::rgb::space::Space,
    models::Rgb<S, models::encoding::LinearLight>: ToXyz,
    <models::Rgb<S, models::encoding::LinearLight> as ToXyz>::WhitePoint:
        models::xyz::TransferWhitePoint<BaseWhitePoint>,
{
    fn to_base(&self) -> Base {
        self.to_xyz().transfer()
    }
}

impl<S> ToBase for models::Rgb<S, models::encoding::GammaEncoded>
where
    S: models::rgb::space::Space + models::encoding::GammaConversion,
    models::Rgb<S, models::encoding::LinearLight>: ToXyz,
    <models::Rgb<S, models::encoding::LinearLight> as ToXyz>::WhitePoint:
        models::xyz::TransferWhitePoint<BaseWhitePoint>,
{
    fn to_base(&self) -> Base {
        self.to_linear_light().to_xyz().transfer()
    }
}

impl ToBase for models::Hsl {
    fn to_base(&self) -> Base {
        self.to_srgb().to_base()
    }
}

impl ToBase for models::Hsv {
    fn to_base(&self) -> Base {
        self.to_srgb().to_base()
    }
}

impl ToBase for models::Hwb {
    fn to_base(&self) -> Base {
        self.to_srgb().to_base()
    }
}

impl ToBase for models::Okhsl {
    fn to_base(&self) -> Base {
        self.to_srgb().to_base()
    }
}

impl ToBase for models::Okhsv {
    fn to_base(&self) -> Base {
        self.to_srgb().to_base()
    }
}

impl ToBase for models::Hsluv {
    fn to_base(&self) -> Base {
        self.to_xyz().transfer()
    }
}

impl<S> ToBase for models::Rectangular<S>
where
    S: models::lab::space::Space,
    models::Rectangular<S>: ToXyz,
    <models::Rectangular<S> as ToXyz>::WhitePoint:
        models::xyz::TransferWhitePoint<BaseWhitePoint>,
{
    fn to_base(&self) -> Base {
        self.to_xyz().transfer()
    }
}

impl<S> ToBase for models::Polar<S>
where
    S: models::lab::space::Space,
    models::Rectangular<S>: ToBase,
{
    fn to_base(&self) -> Base {
        self.to_rectangular().to_base()
    }
}

impl<W: models::WhitePoint> ToBase for models::Xyz<W>
where
    W: models::xyz::TransferWhitePoint<BaseWhitePoint>,
{
    fn to_base(&self) -> Base {
        self.transfer()
    }
}
