//! Model a color in the CIE-XYZ color space.

use crate::color::{Component, Components, HasSpace, Space};
use crate::math::{transform, transform_3x3, Transform};

/// Marker for the reference white point an XYZ color is relative to.
pub trait WhitePoint {
    /// The white point's XYZ coordinates.
    const WHITE_POINT: Components;
}

/// The D50 standard illuminant.
#[derive(Clone, Debug)]
pub struct D50;

impl WhitePoint for D50 {
    #[allow(clippy::excessive_precision)]
    const WHITE_POINT: Components = Components(0.9642956764295677, 1.0, 0.8251046025104602);
}

/// The D65 standard illuminant.
#[derive(Clone, Debug)]
pub struct D65;

impl WhitePoint for D65 {
    #[allow(clippy::excessive_precision)]
    const WHITE_POINT: Components = Components(0.9504559270516716, 1.0, 1.0890577507598784);
}

/// Specify that a color model supports conversion to CIE-XYZ.
pub trait ToXyz {
    /// The white point the produced XYZ color is relative to.
    type WhitePoint: WhitePoint;

    /// Convert this color to CIE-XYZ.
    fn to_xyz(&self) -> Xyz<Self::WhitePoint>;
}

/// Chromatic adaptation from one white point to another, using the Bradford
/// method with the css-color-4 matrices.
pub trait TransferWhitePoint<To: WhitePoint>: WhitePoint + Sized {
    /// Adapt `from` to the `To` white point.
    fn transfer(from: &Xyz<Self>) -> Xyz<To>;
}

impl TransferWhitePoint<D50> for D65 {
    fn transfer(from: &Xyz<D65>) -> Xyz<D50> {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const MAT: Transform = transform_3x3(
             1.0479298208405488,    0.029627815688159344, -0.009243058152591178,
             0.022946793341019088,  0.990434484573249,     0.015055144896577895,
            -0.05019222954313557,  -0.01707382502938514,   0.7518742899580008,
        );

        transform(&MAT, from.to_components()).into()
    }
}

impl TransferWhitePoint<D65> for D50 {
    fn transfer(from: &Xyz<D50>) -> Xyz<D65> {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const MAT: Transform = transform_3x3(
             0.9554734527042182,   -0.028369706963208136,  0.012314001688319899,
            -0.023098536874261423,  1.0099954580058226,   -0.020507696433477912,
             0.0632593086610217,    0.021041398966943008,  1.3303659366080753,
        );

        transform(&MAT, from.to_components()).into()
    }
}

impl TransferWhitePoint<D50> for D50 {
    fn transfer(from: &Xyz<D50>) -> Xyz<D50> {
        from.clone()
    }
}

impl TransferWhitePoint<D65> for D65 {
    fn transfer(from: &Xyz<D65>) -> Xyz<D65> {
        from.clone()
    }
}

tinct_macros::gen_model! {
    /// A model for a color in the CIE-XYZ color space with a specified white
    /// point reference.
    pub struct Xyz<W: WhitePoint> {
        /// The X component of the color.
        pub x: Component,
        /// The Y component of the color.
        pub y: Component,
        /// The Z component of the color.
        pub z: Component,
    }
}

impl<W: WhitePoint> Xyz<W> {
    /// Adapt this color to another white point.
    pub fn transfer<To: WhitePoint>(&self) -> Xyz<To>
    where
        W: TransferWhitePoint<To>,
    {
        W::transfer(self)
    }
}

/// Model for a color in the CIE-XYZ color space with a D50 white point.
pub type XyzD50 = Xyz<D50>;

impl HasSpace for XyzD50 {
    const SPACE: Space = Space::XyzD50;
}

/// Model for a color in the CIE-XYZ color space with a D65 white point.
pub type XyzD65 = Xyz<D65>;

impl HasSpace for XyzD65 {
    const SPACE: Space = Space::XyzD65;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn white_point_adaptation_round_trips() {
        let d65 = XyzD65::new(0.318634, 0.239006, 0.041637);
        let d50 = d65.transfer::<D50>();

        assert_component_eq!(d50.x, 0.337301);
        assert_component_eq!(d50.y, 0.245449);
        assert_component_eq!(d50.z, 0.031959);

        let back = d50.transfer::<D65>();
        assert_component_eq!(back.x, d65.x);
        assert_component_eq!(back.y, d65.y);
        assert_component_eq!(back.z, d65.z);
    }

    #[test]
    fn transfer_to_same_white_point_is_identity() {
        let d65 = XyzD65::new(0.1, 0.2, 0.3);
        let same = d65.transfer::<D65>();
        assert_eq!(same.to_components(), d65.to_components());
    }
}
