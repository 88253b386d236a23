//! Render a [`Color`] back to text.
//!
//! Every format matches what the parser accepts, so serializing and
//! re-parsing a color is lossless up to the requested precision. Formats
//! never convert: a format that cannot represent the color's space is a
//! typed error, not a best effort guess.

use std::fmt::Write;

use thiserror::Error;

use crate::color::{Color, Component, Space};

/// The notations a [`Color`] can be serialized to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// `#rrggbb` / `#rrggbbaa`; sRGB only, rounds to 8-bit channels.
    Hex,
    /// `rgb(R G B / A)`; sRGB only.
    Rgb,
    /// `rgb()` with the alpha term dropped when it carries no information.
    RgbCompact,
    /// `hsl(H S% L% / A)`.
    Hsl,
    /// `hsl()` with plain numbers and no redundant alpha.
    HslCompact,
    /// `hwb(H W% B% / A)`.
    Hwb,
    /// `hwb()` with plain numbers and no redundant alpha.
    HwbCompact,
    /// `lab(L a b / A)`.
    Lab,
    /// `lch(L C H / A)`.
    Lch,
    /// `oklab(L a b / A)`.
    Oklab,
    /// `oklch(L C H / A)`.
    Oklch,
    /// The generic `color(<space-id> c0 c1 c2 / A)` form, for any space.
    ColorFunction,
    /// `color()` with the alpha term dropped when it carries no information.
    ColorFunctionCompact,
    /// The space-appropriate modern functional form.
    #[default]
    Default,
}

/// Options controlling serialization.
#[derive(Clone, Debug)]
pub struct SerializeOptions {
    /// The requested notation.
    pub format: Format,
    /// Significant decimal digits for numeric components.
    pub precision: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            format: Format::Default,
            precision: 5,
        }
    }
}

impl SerializeOptions {
    /// Options for the given format with the default precision.
    pub fn with_format(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }
}

/// The ways serialization can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SerializeError {
    /// The requested format cannot represent colors in the given space.
    #[error("format {format:?} cannot represent a color in the {space:?} color space")]
    IncompatibleFormat {
        /// The requested format.
        format: Format,
        /// The color's space.
        space: Space,
    },
}

/// Round a value to `precision` significant decimal digits and render it
/// with no trailing zeros.
fn fmt_number(value: Component, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (precision as i32 - 1 - magnitude).max(0) as usize;
    let formatted = format!("{:.*}", decimals, value);

    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// One component as text: a number, a percentage, or `none` when missing.
fn component(value: Option<Component>, scale: Component, percent: bool, precision: usize) -> String {
    match value {
        None => "none".to_string(),
        Some(v) => {
            let number = fmt_number(v * scale, precision);
            if percent {
                format!("{}%", number)
            } else {
                number
            }
        }
    }
}

/// The ` / alpha` suffix. Alpha of 1 is always omitted; a missing alpha is
/// omitted in compact forms and serialized as `none` otherwise.
fn alpha_term(color: &Color, compact: bool, precision: usize) -> String {
    match color.alpha() {
        None => {
            if compact {
                String::new()
            } else {
                " / none".to_string()
            }
        }
        Some(alpha) if alpha == 1.0 => String::new(),
        Some(alpha) => format!(" / {}", fmt_number(alpha, precision)),
    }
}

fn write_function(
    name: &str,
    prelude: Option<&str>,
    components: [String; 3],
    alpha: String,
) -> String {
    let mut out = String::new();
    write!(out, "{}(", name).unwrap();
    if let Some(prelude) = prelude {
        write!(out, "{} ", prelude).unwrap();
    }
    write!(
        out,
        "{} {} {}{})",
        components[0], components[1], components[2], alpha
    )
    .unwrap();
    out
}

fn serialize_hex(color: &Color) -> String {
    let channel = |value: Component| ((value.clamp(0.0, 1.0) * 255.0).round()) as u8;

    let r = channel(color.components.0);
    let g = channel(color.components.1);
    let b = channel(color.components.2);

    match color.alpha() {
        Some(alpha) if alpha != 1.0 => {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, channel(alpha))
        }
        _ => format!("#{:02x}{:02x}{:02x}", r, g, b),
    }
}

impl Color {
    /// Serialize this color with the given options.
    pub fn serialize(&self, opts: &SerializeOptions) -> Result<String, SerializeError> {
        let format = match opts.format {
            Format::Default => match self.space {
                Space::Srgb => Format::Rgb,
                Space::Hsl => Format::Hsl,
                Space::Hwb => Format::Hwb,
                Space::Lab => Format::Lab,
                Space::Lch => Format::Lch,
                Space::Oklab => Format::Oklab,
                Space::Oklch => Format::Oklch,
                _ => Format::ColorFunction,
            },
            other => other,
        };

        let incompatible = || SerializeError::IncompatibleFormat {
            format: opts.format,
            space: self.space,
        };
        let require = |space: Space| -> Result<(), SerializeError> {
            if self.space == space {
                Ok(())
            } else {
                Err(incompatible())
            }
        };

        let p = opts.precision;
        let c = |value, scale, percent| component(value, scale, percent, p);

        Ok(match format {
            Format::Hex => {
                require(Space::Srgb)?;
                serialize_hex(self)
            }
            Format::Rgb | Format::RgbCompact => {
                require(Space::Srgb)?;
                let compact = format == Format::RgbCompact;
                write_function(
                    "rgb",
                    None,
                    [
                        c(self.c0(), 255.0, false),
                        c(self.c1(), 255.0, false),
                        c(self.c2(), 255.0, false),
                    ],
                    alpha_term(self, compact, p),
                )
            }
            Format::Hsl | Format::HslCompact => {
                require(Space::Hsl)?;
                let compact = format == Format::HslCompact;
                write_function(
                    "hsl",
                    None,
                    [
                        c(self.c0(), 1.0, false),
                        c(self.c1(), 100.0, !compact),
                        c(self.c2(), 100.0, !compact),
                    ],
                    alpha_term(self, compact, p),
                )
            }
            Format::Hwb | Format::HwbCompact => {
                require(Space::Hwb)?;
                let compact = format == Format::HwbCompact;
                write_function(
                    "hwb",
                    None,
                    [
                        c(self.c0(), 1.0, false),
                        c(self.c1(), 100.0, !compact),
                        c(self.c2(), 100.0, !compact),
                    ],
                    alpha_term(self, compact, p),
                )
            }
            Format::Lab => {
                require(Space::Lab)?;
                self.plain_function("lab", p)
            }
            Format::Lch => {
                require(Space::Lch)?;
                self.plain_function("lch", p)
            }
            Format::Oklab => {
                require(Space::Oklab)?;
                self.plain_function("oklab", p)
            }
            Format::Oklch => {
                require(Space::Oklch)?;
                self.plain_function("oklch", p)
            }
            Format::ColorFunction | Format::ColorFunctionCompact => {
                let compact = format == Format::ColorFunctionCompact;
                let id = self.space.css_name().unwrap_or(self.space.config_name());
                write_function(
                    "color",
                    Some(id),
                    [
                        c(self.c0(), 1.0, false),
                        c(self.c1(), 1.0, false),
                        c(self.c2(), 1.0, false),
                    ],
                    alpha_term(self, compact, p),
                )
            }
            Format::Default => unreachable!("resolved above"),
        })
    }

    fn plain_function(&self, name: &str, precision: usize) -> String {
        write_function(
            name,
            None,
            [
                component(self.c0(), 1.0, false, precision),
                component(self.c1(), 1.0, false, precision),
                component(self.c2(), 1.0, false, precision),
            ],
            alpha_term(self, false, precision),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    fn serialize(color: &Color, format: Format) -> String {
        color
            .serialize(&SerializeOptions::with_format(format))
            .unwrap()
    }

    #[test]
    fn hex_serialization() {
        let red = Color::parse("hsl(0 100% 50%)").unwrap().to_space(Space::Srgb);
        assert_eq!(serialize(&red, Format::Hex), "#ff0000");

        let translucent = Color::new(Space::Srgb, 1.0, 0.0, 0.0, 0.5);
        assert_eq!(serialize(&translucent, Format::Hex), "#ff000080");

        // Channels clamp to the 8-bit range.
        let loud = Color::new(Space::Srgb, 1.2, -0.5, 0.5, 1.0);
        assert_eq!(serialize(&loud, Format::Hex), "#ff0080");
    }

    #[test]
    fn default_formats_per_space() {
        let cases = [
            (Color::new(Space::Srgb, 1.0, 0.0, 0.0, 1.0), "rgb(255 0 0)"),
            (
                Color::new(Space::Hsl, 120.0, 1.0, 0.5, 1.0),
                "hsl(120 100% 50%)",
            ),
            (
                Color::new(Space::Hwb, 40.0, 0.3, 0.4, 1.0),
                "hwb(40 30% 40%)",
            ),
            (
                Color::new(Space::Lab, 56.6293, 39.2371, 57.5538, 1.0),
                "lab(56.629 39.237 57.554)",
            ),
            (
                Color::new(Space::Oklch, 0.634398, 0.154992, 50.266483, 1.0),
                "oklch(0.6344 0.15499 50.266)",
            ),
            (
                Color::new(Space::DisplayP3, 1.0, 0.0, 0.5, 1.0),
                "color(display-p3 1 0 0.5)",
            ),
            (
                Color::new(Space::Okhsl, 120.0, 0.5, 0.5, 1.0),
                "color(okhsl 120 0.5 0.5)",
            ),
        ];

        for (color, expected) in cases {
            assert_eq!(
                color.serialize(&SerializeOptions::default()).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn alpha_policy() {
        let opaque = Color::new(Space::Srgb, 1.0, 0.0, 0.0, 1.0);
        assert_eq!(serialize(&opaque, Format::Rgb), "rgb(255 0 0)");

        let translucent = Color::new(Space::Srgb, 1.0, 0.0, 0.0, 0.25);
        assert_eq!(serialize(&translucent, Format::Rgb), "rgb(255 0 0 / 0.25)");
        assert_eq!(
            serialize(&translucent, Format::RgbCompact),
            "rgb(255 0 0 / 0.25)"
        );

        // Missing alpha round-trips in the non-compact form and is dropped
        // in the compact one.
        let missing = Color::new(Space::Srgb, 1.0, 0.0, 0.0, None);
        assert_eq!(serialize(&missing, Format::Rgb), "rgb(255 0 0 / none)");
        assert_eq!(serialize(&missing, Format::RgbCompact), "rgb(255 0 0)");
    }

    #[test]
    fn missing_components_serialize_as_none() {
        let c = Color::new(Space::Oklch, 0.6, 0.2, None, 1.0);
        assert_eq!(serialize(&c, Format::Oklch), "oklch(0.6 0.2 none)");

        let c = Color::new(Space::Hsl, None, 1.0, 0.5, 1.0);
        assert_eq!(serialize(&c, Format::Hsl), "hsl(none 100% 50%)");
    }

    #[test]
    fn compact_collapses_percentages() {
        let c = Color::new(Space::Hsl, 120.0, 1.0, 0.5, 1.0);
        assert_eq!(serialize(&c, Format::HslCompact), "hsl(120 100 50)");
    }

    #[test]
    fn precision_controls_significant_digits() {
        let c = Color::new(Space::Oklab, 0.6343981, 0.0990742, 0.1191934, 1.0);
        let two = c
            .serialize(&SerializeOptions {
                format: Format::Oklab,
                precision: 2,
            })
            .unwrap();
        assert_eq!(two, "oklab(0.63 0.099 0.12)");
    }

    #[test]
    fn incompatible_formats_are_typed_errors() {
        let lab = Color::new(Space::Lab, 50.0, 10.0, 10.0, 1.0);
        assert_eq!(
            lab.serialize(&SerializeOptions::with_format(Format::Hex)),
            Err(SerializeError::IncompatibleFormat {
                format: Format::Hex,
                space: Space::Lab,
            })
        );
        assert!(lab
            .serialize(&SerializeOptions::with_format(Format::Oklab))
            .is_err());
        // The generic form accepts every space.
        assert!(lab
            .serialize(&SerializeOptions::with_format(Format::ColorFunction))
            .is_ok());
    }

    #[test]
    fn serialization_round_trips_through_the_parser() {
        let colors = [
            Color::new(Space::Srgb, 0.25, 0.5, 0.75, 0.5),
            Color::new(Space::Hsl, 120.0, 0.4, 0.6, 1.0),
            Color::new(Space::Hwb, 300.0, 0.1, 0.2, None),
            Color::new(Space::Lab, 56.6293, 39.2371, 57.5538, 1.0),
            Color::new(Space::Lch, 56.6293, 69.6562, 55.7159, 0.25),
            Color::new(Space::Oklab, 0.6344, 0.0991, 0.1192, 1.0),
            Color::new(Space::Oklch, 0.6344, 0.155, None, 1.0),
            Color::new(Space::Rec2020, 0.6693, 0.4019, 0.1427, 1.0),
            Color::new(Space::Hsluv, 12.177, 1.0, 0.532, 1.0),
            Color::new(Space::XyzD50, 0.3373, 0.2454, 0.032, 0.75),
        ];

        for color in colors {
            for format in [Format::Default, Format::ColorFunction, Format::ColorFunctionCompact] {
                let text = color
                    .serialize(&SerializeOptions {
                        format,
                        precision: 6,
                    })
                    .unwrap();
                let parsed = Color::parse(&text).unwrap();
                assert_eq!(parsed.space, color.space, "{}", text);
                approx::assert_abs_diff_eq!(
                    parsed.components.0,
                    color.components.0,
                    epsilon = 1.0e-3
                );
                approx::assert_abs_diff_eq!(
                    parsed.components.1,
                    color.components.1,
                    epsilon = 1.0e-3
                );
                approx::assert_abs_diff_eq!(
                    parsed.components.2,
                    color.components.2,
                    epsilon = 1.0e-3
                );
                let component_flags = crate::color::Flags::C0_IS_NONE
                    | crate::color::Flags::C1_IS_NONE
                    | crate::color::Flags::C2_IS_NONE;
                assert_eq!(
                    parsed.flags & component_flags,
                    color.flags & component_flags,
                    "{}",
                    text
                );
                if format != Format::ColorFunctionCompact {
                    assert_eq!(parsed.flags, color.flags, "{}", text);
                    assert_component_eq!(parsed.alpha, color.alpha);
                }
            }
        }
    }
}
