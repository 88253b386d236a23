//! Parse textual color representations into a [`Color`].
//!
//! The recognized grammar follows css-color-4: hex notations, the legacy
//! comma separated `rgb()`/`hsl()` forms, the modern space separated
//! functional forms, the generic `color()` form for any registered space and
//! the named color keywords.

use std::str::FromStr;

use thiserror::Error;

use crate::color::{Color, Component, Dialect, Space};
use crate::math::normalize_hue;
use crate::named;

/// The closed set of ways parsing a color can fail.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    /// The function name is not a recognized color function.
    #[error("unknown color function `{0}`")]
    UnknownFunction(String),
    /// The space id inside `color()` is not registered.
    #[error("unknown color space `{0}`")]
    UnknownSpace(String),
    /// The input is a keyword, but not a named color.
    #[error("unknown color keyword `{0}`")]
    UnknownKeyword(String),
    /// A numeric token could not be read as a number for its position.
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    /// The function body holds the wrong number of color components.
    #[error("expected {expected} color components, found {found}")]
    ComponentCountMismatch {
        /// How many components the notation requires.
        expected: usize,
        /// How many components were present.
        found: usize,
    },
    /// A `/` alpha separator with no alpha value after it.
    #[error("expected an alpha value after `/`")]
    UnterminatedAlpha,
    /// A function body with no closing parenthesis.
    #[error("missing closing `)`")]
    MissingClosingParen,
}

/// A single numeric-ish token from a function body.
enum Token {
    Number(Component),
    Percent(Component),
    Angle(Component),
    None,
}

fn parse_token(token: &str) -> Result<Token, ParseError> {
    if token.eq_ignore_ascii_case("none") {
        return Ok(Token::None);
    }

    if let Some(number) = token.strip_suffix('%') {
        let value: Component = number
            .parse()
            .map_err(|_| ParseError::MalformedNumber(token.to_string()))?;
        return Ok(Token::Percent(value / 100.0));
    }

    // `grad` must be checked before `rad`.
    const ANGLE_UNITS: [(&str, Component); 4] = [
        ("grad", 0.9),
        ("deg", 1.0),
        ("rad", 180.0 / std::f64::consts::PI as Component),
        ("turn", 360.0),
    ];
    let lower = token.to_ascii_lowercase();
    for (unit, scale) in ANGLE_UNITS {
        if let Some(number) = lower.strip_suffix(unit) {
            let value: Component = number
                .parse()
                .map_err(|_| ParseError::MalformedNumber(token.to_string()))?;
            return Ok(Token::Angle(value * scale));
        }
    }

    token
        .parse()
        .map(Token::Number)
        .map_err(|_| ParseError::MalformedNumber(token.to_string()))
}

/// Resolve a hue token to degrees in [0, 360).
fn hue(token: &str) -> Result<Option<Component>, ParseError> {
    match parse_token(token)? {
        Token::Number(v) | Token::Angle(v) => Ok(Some(normalize_hue(v))),
        Token::Percent(_) => Err(ParseError::MalformedNumber(token.to_string())),
        Token::None => Ok(None),
    }
}

/// Resolve a component where a percentage maps onto `percent_scale` and a
/// bare number is taken as is.
fn scaled(token: &str, percent_scale: Component) -> Result<Option<Component>, ParseError> {
    match parse_token(token)? {
        Token::Number(v) => Ok(Some(v)),
        Token::Percent(v) => Ok(Some(v * percent_scale)),
        Token::Angle(_) => Err(ParseError::MalformedNumber(token.to_string())),
        Token::None => Ok(None),
    }
}

/// Resolve a component where both a percentage and a bare number map onto
/// the fraction range, e.g. `50` meaning `50%` in `hsl()`.
fn fraction(token: &str) -> Result<Option<Component>, ParseError> {
    match parse_token(token)? {
        Token::Number(v) => Ok(Some(v / 100.0)),
        Token::Percent(v) => Ok(Some(v)),
        Token::Angle(_) => Err(ParseError::MalformedNumber(token.to_string())),
        Token::None => Ok(None),
    }
}

/// Resolve an alpha token; alpha always clamps to [0, 1].
fn alpha_value(token: &str) -> Result<Option<Component>, ParseError> {
    match parse_token(token)? {
        Token::Number(v) | Token::Percent(v) => Ok(Some(v.clamp(0.0, 1.0))),
        Token::Angle(_) => Err(ParseError::MalformedNumber(token.to_string())),
        Token::None => Ok(None),
    }
}

/// Split a modern function body into component tokens and an optional alpha
/// token. Commas are accepted as soft whitespace.
fn split_modern(body: &str) -> Result<(Vec<&str>, Option<&str>), ParseError> {
    let (components, alpha) = match body.split_once('/') {
        Some((components, alpha)) => {
            let mut tokens = alpha.split(|c: char| c.is_whitespace() || c == ',');
            let alpha = tokens
                .by_ref()
                .find(|t| !t.is_empty())
                .ok_or(ParseError::UnterminatedAlpha)?;
            if let Some(extra) = tokens.find(|t| !t.is_empty()) {
                return Err(ParseError::MalformedNumber(extra.to_string()));
            }
            (components, Some(alpha))
        }
        None => (body, None),
    };

    let components = components
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    Ok((components, alpha))
}

fn expect_three(components: &[&str]) -> Result<(), ParseError> {
    if components.len() != 3 {
        return Err(ParseError::ComponentCountMismatch {
            expected: 3,
            found: components.len(),
        });
    }
    Ok(())
}

fn parse_hex(hex: &str) -> Result<Color, ParseError> {
    let malformed = || ParseError::MalformedNumber(format!("#{}", hex));

    let digit = |index: usize| -> Result<Component, ParseError> {
        let value =
            u8::from_str_radix(&hex[index..index + 1], 16).map_err(|_| malformed())? as Component;
        Ok(value * 17.0 / 255.0)
    };
    let pair = |index: usize| -> Result<Component, ParseError> {
        let value = u8::from_str_radix(&hex[index..index + 2], 16).map_err(|_| malformed())?;
        Ok(value as Component / 255.0)
    };

    if !hex.is_ascii() {
        return Err(malformed());
    }

    let (r, g, b, a) = match hex.len() {
        3 => (digit(0)?, digit(1)?, digit(2)?, 1.0),
        4 => (digit(0)?, digit(1)?, digit(2)?, digit(3)?),
        6 => (pair(0)?, pair(2)?, pair(4)?, 1.0),
        8 => (pair(0)?, pair(2)?, pair(4)?, pair(6)?),
        _ => return Err(malformed()),
    };

    Ok(Color::new(Space::Srgb, r, g, b, a))
}

/// The legacy comma separated `rgb()`/`rgba()` form: channels are 0-255
/// numbers or percentages and clamp at parse time, `none` is not allowed.
fn parse_legacy_rgb(body: &str) -> Result<Color, ParseError> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ParseError::ComponentCountMismatch {
            expected: 3,
            found: parts.len(),
        });
    }

    let channel = |token: &str| -> Result<Component, ParseError> {
        match parse_token(token)? {
            Token::Number(v) => Ok((v / 255.0).clamp(0.0, 1.0)),
            Token::Percent(v) => Ok(v.clamp(0.0, 1.0)),
            _ => Err(ParseError::MalformedNumber(token.to_string())),
        }
    };

    let alpha = match parts.get(3) {
        Some(token) => match parse_token(token)? {
            Token::Number(v) | Token::Percent(v) => v.clamp(0.0, 1.0),
            _ => return Err(ParseError::MalformedNumber(token.to_string())),
        },
        None => 1.0,
    };

    Ok(Color::new(
        Space::Srgb,
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

/// The legacy comma separated `hsl()`/`hsla()` form.
fn parse_legacy_hsl(body: &str) -> Result<Color, ParseError> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ParseError::ComponentCountMismatch {
            expected: 3,
            found: parts.len(),
        });
    }

    let require = |value: Option<Component>, token: &str| -> Result<Component, ParseError> {
        value.ok_or_else(|| ParseError::MalformedNumber(token.to_string()))
    };

    let h = require(hue(parts[0])?, parts[0])?;
    let s = require(fraction(parts[1])?, parts[1])?;
    let l = require(fraction(parts[2])?, parts[2])?;
    let alpha = match parts.get(3) {
        Some(token) => require(alpha_value(token)?, token)?,
        None => 1.0,
    };

    Ok(Color::new(Space::Hsl, h, s, l, alpha))
}

fn parse_function(name: &str, body: &str) -> Result<Color, ParseError> {
    if !matches!(
        name,
        "rgb" | "rgba" | "hsl" | "hsla" | "hwb" | "lab" | "lch" | "oklab" | "oklch" | "color"
    ) {
        return Err(ParseError::UnknownFunction(name.to_string()));
    }

    // The legacy comma separated notations keep their own value rules.
    if matches!(name, "rgb" | "rgba" | "hsl" | "hsla") && body.contains(',') {
        return match name {
            "rgb" | "rgba" => parse_legacy_rgb(body),
            _ => parse_legacy_hsl(body),
        };
    }

    let (components, alpha) = split_modern(body)?;
    let alpha = match alpha {
        Some(token) => alpha_value(token)?,
        None => Some(1.0),
    };

    if name == "color" {
        if components.len() != 4 {
            return Err(ParseError::ComponentCountMismatch {
                expected: 3,
                found: components.len().saturating_sub(1),
            });
        }
        let space = Space::from_name(components[0], Dialect::Css)
            .or_else(|| Space::from_name(components[0], Dialect::Config))
            .ok_or_else(|| ParseError::UnknownSpace(components[0].to_string()))?;

        let component = |index: usize| -> Result<Option<Component>, ParseError> {
            let token = components[index + 1];
            if space.hue_index() == Some(index) {
                hue(token)
            } else {
                scaled(token, 1.0)
            }
        };

        return Ok(Color::new(
            space,
            component(0)?,
            component(1)?,
            component(2)?,
            alpha,
        ));
    }

    expect_three(&components)?;

    match name {
        "rgb" | "rgba" => {
            let channel = |token: &str| -> Result<Option<Component>, ParseError> {
                match parse_token(token)? {
                    Token::Number(v) => Ok(Some(v / 255.0)),
                    Token::Percent(v) => Ok(Some(v)),
                    Token::Angle(_) => Err(ParseError::MalformedNumber(token.to_string())),
                    Token::None => Ok(None),
                }
            };
            Ok(Color::new(
                Space::Srgb,
                channel(components[0])?,
                channel(components[1])?,
                channel(components[2])?,
                alpha,
            ))
        }
        "hsl" | "hsla" => Ok(Color::new(
            Space::Hsl,
            hue(components[0])?,
            fraction(components[1])?,
            fraction(components[2])?,
            alpha,
        )),
        "hwb" => Ok(Color::new(
            Space::Hwb,
            hue(components[0])?,
            fraction(components[1])?,
            fraction(components[2])?,
            alpha,
        )),
        "lab" => Ok(Color::new(
            Space::Lab,
            scaled(components[0], 100.0)?,
            scaled(components[1], 125.0)?,
            scaled(components[2], 125.0)?,
            alpha,
        )),
        "lch" => Ok(Color::new(
            Space::Lch,
            scaled(components[0], 100.0)?,
            scaled(components[1], 150.0)?,
            hue(components[2])?,
            alpha,
        )),
        "oklab" => Ok(Color::new(
            Space::Oklab,
            scaled(components[0], 1.0)?,
            scaled(components[1], 0.4)?,
            scaled(components[2], 0.4)?,
            alpha,
        )),
        "oklch" => Ok(Color::new(
            Space::Oklch,
            scaled(components[0], 1.0)?,
            scaled(components[1], 0.4)?,
            hue(components[2])?,
            alpha,
        )),
        _ => Err(ParseError::UnknownFunction(name.to_string())),
    }
}

impl Color {
    /// Parse a textual color representation.
    pub fn parse(input: &str) -> Result<Color, ParseError> {
        let input = input.trim();

        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex);
        }

        if let Some(open) = input.find('(') {
            let name = input[..open].trim().to_ascii_lowercase();
            let body = input[open + 1..]
                .strip_suffix(')')
                .ok_or(ParseError::MissingClosingParen)?;
            return parse_function(&name, body.trim());
        }

        let keyword = input.to_ascii_lowercase();
        if keyword == "transparent" {
            return Ok(Color::new(Space::Srgb, 0.0, 0.0, 0.0, 0.0));
        }
        if let Some([r, g, b]) = named::lookup(&keyword) {
            return Ok(Color::new(
                Space::Srgb,
                r as Component / 255.0,
                g as Component / 255.0,
                b as Component / 255.0,
                1.0,
            ));
        }

        Err(ParseError::UnknownKeyword(input.to_string()))
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Color::parse(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;
    use crate::color::Flags;

    #[test]
    fn hex_notations() {
        let c = Color::parse("#ff0080").unwrap();
        assert_eq!(c.space, Space::Srgb);
        assert_component_eq!(c.components.0, 1.0);
        assert_component_eq!(c.components.1, 0.0);
        assert_component_eq!(c.components.2, 128.0 / 255.0);
        assert_eq!(c.alpha, 1.0);

        let c = Color::parse("#f08").unwrap();
        assert_component_eq!(c.components.2, 136.0 / 255.0);

        let c = Color::parse("#ff008040").unwrap();
        assert_component_eq!(c.alpha, 64.0 / 255.0);

        let c = Color::parse("#f084").unwrap();
        assert_component_eq!(c.alpha, 68.0 / 255.0);

        assert!(Color::parse("#ff00f").is_err());
        assert!(Color::parse("#ggg").is_err());
    }

    #[test]
    fn named_keywords() {
        let c = Color::parse("rebeccapurple").unwrap();
        assert_component_eq!(c.components.0, 102.0 / 255.0);

        let c = Color::parse("RED").unwrap();
        assert_component_eq!(c.components.0, 1.0);

        let c = Color::parse("transparent").unwrap();
        assert_eq!(c.alpha, 0.0);

        assert_eq!(
            Color::parse("currentcolor"),
            Err(ParseError::UnknownKeyword("currentcolor".to_string()))
        );
    }

    #[test]
    fn legacy_forms() {
        let c = Color::parse("rgb(255, 0, 128)").unwrap();
        assert_component_eq!(c.components.2, 128.0 / 255.0);

        let c = Color::parse("rgba(255, 0, 0, 0.5)").unwrap();
        assert_component_eq!(c.alpha, 0.5);

        // Legacy channels clamp at parse time.
        let c = Color::parse("rgb(300, -20, 0)").unwrap();
        assert_component_eq!(c.components.0, 1.0);
        assert_component_eq!(c.components.1, 0.0);

        let c = Color::parse("hsl(120, 50%, 25%)").unwrap();
        assert_eq!(c.space, Space::Hsl);
        assert_component_eq!(c.components.0, 120.0);
        assert_component_eq!(c.components.1, 0.5);
        assert_component_eq!(c.components.2, 0.25);

        let c = Color::parse("hsla(120, 50%, 25%, 10%)").unwrap();
        assert_component_eq!(c.alpha, 0.1);

        // `none` belongs to the modern forms only.
        assert!(Color::parse("rgb(none, 0, 0)").is_err());
    }

    #[test]
    fn modern_forms() {
        let c = Color::parse("rgb(255 0 128 / 0.5)").unwrap();
        assert_component_eq!(c.components.2, 128.0 / 255.0);
        assert_component_eq!(c.alpha, 0.5);

        // Modern channels stay unclamped.
        let c = Color::parse("rgb(300 0 0)").unwrap();
        assert!(c.components.0 > 1.0);

        let c = Color::parse("hsl(0 100% 50%)").unwrap();
        let srgb = c.to_space(Space::Srgb);
        assert_component_eq!(srgb.components.0, 1.0);
        assert_component_eq!(srgb.components.1, 0.0);
        assert_component_eq!(srgb.components.2, 0.0);

        // Percentages are optional for saturation and lightness.
        let c = Color::parse("hsl(0 100 50)").unwrap();
        assert_component_eq!(c.components.1, 1.0);

        let c = Color::parse("hwb(40deg 30% 40%)").unwrap();
        assert_eq!(c.space, Space::Hwb);
        assert_component_eq!(c.components.0, 40.0);

        let c = Color::parse("lab(56.6293 39.2371 57.5538)").unwrap();
        assert_eq!(c.space, Space::Lab);
        assert_component_eq!(c.components.0, 56.6293);

        // Percentage reference ranges per component.
        let c = Color::parse("lab(50% 100% -100%)").unwrap();
        assert_component_eq!(c.components.0, 50.0);
        assert_component_eq!(c.components.1, 125.0);
        assert_component_eq!(c.components.2, -125.0);

        let c = Color::parse("lch(52.2% 72.2% 50deg)").unwrap();
        assert_component_eq!(c.components.1, 0.722 * 150.0);

        let c = Color::parse("oklch(60% 50% 120)").unwrap();
        assert_component_eq!(c.components.0, 0.6);
        assert_component_eq!(c.components.1, 0.2);
        assert_component_eq!(c.components.2, 120.0);

        let c = Color::parse("oklab(0.6 0.1 -0.1 / 50%)").unwrap();
        assert_eq!(c.space, Space::Oklab);
        assert_component_eq!(c.alpha, 0.5);
    }

    #[test]
    fn angle_units_normalize_to_degrees() {
        assert_component_eq!(
            Color::parse("hsl(0.5turn 100% 50%)").unwrap().components.0,
            180.0
        );
        assert_component_eq!(
            Color::parse("hsl(200grad 100% 50%)").unwrap().components.0,
            180.0
        );
        let rad = Color::parse("hsl(3.14159265rad 100% 50%)").unwrap();
        approx::assert_abs_diff_eq!(rad.components.0, 180.0, epsilon = 1.0e-3);

        // Out of range hues wrap.
        assert_component_eq!(
            Color::parse("hsl(-90 100% 50%)").unwrap().components.0,
            270.0
        );
        assert_component_eq!(
            Color::parse("hsl(540deg 100% 50%)").unwrap().components.0,
            180.0
        );
    }

    #[test]
    fn none_components_are_missing() {
        let c = Color::parse("oklch(none 0.2 30 / none)").unwrap();
        assert!(c.flags.contains(Flags::C0_IS_NONE));
        assert!(c.flags.contains(Flags::ALPHA_IS_NONE));
        assert_eq!(c.components.0, 0.0);

        let c = Color::parse("rgb(none 0 0)").unwrap();
        assert!(c.c0().is_none());
    }

    #[test]
    fn color_function() {
        let c = Color::parse("color(display-p3 1 0 0)").unwrap();
        assert_eq!(c.space, Space::DisplayP3);
        assert_component_eq!(c.components.0, 1.0);

        // Config dialect ids work too.
        let c = Color::parse("color(p3 1 0 0)").unwrap();
        assert_eq!(c.space, Space::DisplayP3);

        let c = Color::parse("color(srgb 100% 0% 50% / 50%)").unwrap();
        assert_component_eq!(c.components.2, 0.5);
        assert_component_eq!(c.alpha, 0.5);

        let c = Color::parse("color(xyz 0.2 0.3 0.4)").unwrap();
        assert_eq!(c.space, Space::XyzD65);

        // Spaces without a CSS id are reachable through their config key,
        // with the hue component accepting angles.
        let c = Color::parse("color(okhsl 120deg 0.5 0.5)").unwrap();
        assert_eq!(c.space, Space::Okhsl);
        assert_component_eq!(c.components.0, 120.0);

        assert_eq!(
            Color::parse("color(notaspace 0 0 0)"),
            Err(ParseError::UnknownSpace("notaspace".to_string()))
        );
    }

    #[test]
    fn error_taxonomy() {
        assert_eq!(
            Color::parse("huebrightness(1 2 3)"),
            Err(ParseError::UnknownFunction("huebrightness".to_string()))
        );
        assert_eq!(
            Color::parse("rgb(1 2 3"),
            Err(ParseError::MissingClosingParen)
        );
        assert_eq!(
            Color::parse("rgb(1 2)"),
            Err(ParseError::ComponentCountMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Color::parse("rgb(1 2 3 4)"),
            Err(ParseError::ComponentCountMismatch {
                expected: 3,
                found: 4
            })
        );
        assert_eq!(
            Color::parse("rgb(1 2 3 /)"),
            Err(ParseError::UnterminatedAlpha)
        );
        assert_eq!(
            Color::parse("rgb(a 2 3)"),
            Err(ParseError::MalformedNumber("a".to_string()))
        );
        // A percentage is not a valid hue.
        assert_eq!(
            Color::parse("hsl(50% 100% 50%)"),
            Err(ParseError::MalformedNumber("50%".to_string()))
        );
    }

    #[test]
    fn from_str_round_trip() {
        let c: Color = "oklch(0.6 0.2 30)".parse().unwrap();
        assert_eq!(c.space, Space::Oklch);
    }
}
