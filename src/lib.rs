//! tinct is the color management engine behind a widget toolkit: parsing,
//! conversion between color spaces, gamut mapping, serialization and
//! interpolation of color values.
//!
//! Everything operates on the immutable [`Color`] struct; the space registry
//! is the closed [`Space`] enumeration and is compiled in, so the whole
//! crate is safe to share across threads without locks.
//!
//! ```rust
//! use tinct::{Color, Space};
//!
//! let coral = Color::parse("coral").unwrap();
//! let oklch = coral.to_space(Space::Oklch);
//! assert!(oklch.in_gamut(Space::Srgb));
//! ```

#![deny(missing_docs)]

mod color;
mod convert;
mod gamut;
mod interpolate;
mod math;
pub mod models;
mod named;
mod parse;
mod serialize;

#[cfg(test)]
mod test;

pub use color::{Color, Component, Components, Dialect, Flags, Space, White};
pub use gamut::{GamutHint, GAMUT_EPSILON};
pub use interpolate::Interpolation;
pub use parse::ParseError;
pub use serialize::{Format, SerializeError, SerializeOptions};

/// Parse a textual color representation. See [`Color::parse`].
pub fn parse_color(text: &str) -> Result<Color, ParseError> {
    Color::parse(text)
}

/// Convert a color to the target space, optionally mapping the result into
/// the target's gamut. See [`Color::to_space`] and
/// [`Color::to_space_in_gamut`].
pub fn convert_color(color: &Color, target: Space, in_gamut: bool) -> Color {
    if in_gamut {
        color.to_space_in_gamut(target)
    } else {
        color.to_space(target)
    }
}

/// Serialize a color to text. See [`Color::serialize`].
pub fn serialize_color(
    color: &Color,
    opts: &SerializeOptions,
) -> Result<String, SerializeError> {
    color.serialize(opts)
}

/// Whether a color is displayable in the given space. See
/// [`Color::in_gamut`].
pub fn is_color_in_gamut(color: &Color, space: Space) -> bool {
    color.in_gamut(space)
}

/// Resolve a color space name in the given naming dialect to its registry
/// id.
pub fn normalize_color_space_name(name: &str, dialect: Dialect) -> Result<Space, ParseError> {
    Space::from_name(name, dialect).ok_or_else(|| ParseError::UnknownSpace(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_functions_delegate() {
        let p3_red = parse_color("color(display-p3 1 0 0)").unwrap();
        assert!(!is_color_in_gamut(&p3_red, Space::Srgb));

        let mapped = convert_color(&p3_red, Space::Srgb, true);
        assert_eq!(mapped.space, Space::Srgb);
        assert!(is_color_in_gamut(&mapped, Space::Srgb));

        let unmapped = convert_color(&p3_red, Space::Srgb, false);
        assert!(!is_color_in_gamut(&unmapped, Space::Srgb));

        let text = serialize_color(&mapped, &SerializeOptions::default()).unwrap();
        assert!(text.starts_with("rgb("));

        assert_eq!(
            normalize_color_space_name("display-p3", Dialect::Css),
            Ok(Space::DisplayP3)
        );
        assert_eq!(
            normalize_color_space_name("prophoto", Dialect::Config),
            Ok(Space::ProPhotoRgb)
        );
        assert_eq!(
            normalize_color_space_name("display-p3", Dialect::Config),
            Err(ParseError::UnknownSpace("display-p3".to_string()))
        );
    }

    #[test]
    fn parse_convert_serialize_scenario() {
        // hsl(0 100% 50%) is pure red; serializing the sRGB form as hex
        // gives back #ff0000.
        let red = parse_color("hsl(0 100% 50%)").unwrap();
        let srgb = convert_color(&red, Space::Srgb, false);
        let hex = serialize_color(&srgb, &SerializeOptions::with_format(Format::Hex)).unwrap();
        assert_eq!(hex, "#ff0000");
    }
}
