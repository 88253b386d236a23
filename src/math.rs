//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};

use crate::color::{Component, Components};

/// The transform type all conversion matrices are stored as.
pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Build a [`Transform`] from the 9 elements of a 3x3 matrix.
#[allow(clippy::too_many_arguments)]
pub const fn transform_3x3(
    m11: Component,
    m12: Component,
    m13: Component,
    m21: Component,
    m22: Component,
    m23: Component,
    m31: Component,
    m32: Component,
    m33: Component,
) -> Transform {
    Transform::new(
        m11, m12, m13, 0.0, //
        m21, m22, m23, 0.0, //
        m31, m32, m33, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(transform: &Transform, components: Components) -> Components {
    let Vector { x, y, z, .. } =
        transform.transform_vector3d(Vector::new(components.0, components.1, components.2));
    Components(x, y, z)
}

/// Whether the value is close enough to zero to be treated as zero.
pub fn almost_zero(value: Component) -> bool {
    value.abs() < 1.0e-6
}

/// Replace a NaN (missing component fed into arithmetic) with zero.
pub fn normalize(value: Component) -> Component {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Normalize a hue, in degrees, into the range [0, 360).
pub fn normalize_hue(hue: Component) -> Component {
    hue.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_normalization_wraps_both_directions() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(540.0), 180.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
    }

    #[test]
    fn transform_multiplies_rows() {
        let identity = transform_3x3(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let c = transform(&identity, Components(0.25, 0.5, 0.75));
        assert_eq!(c, Components(0.25, 0.5, 0.75));
    }
}
