//! A [`Color`] represents a color that was specified in any of the supported
//! color spaces, along with the space registry ([`Space`]) describing them.

use bitflags::bitflags;

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value that all components are stored as.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value that all components are stored as.
pub type Component = f64;

/// Represent the three components that describe any color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Components(pub Component, pub Component, pub Component);

impl Components {
    /// Return new components with each component mapped with the given
    /// function.
    pub fn map(&self, f: impl Fn(Component) -> Component) -> Self {
        Self(f(self.0), f(self.1), f(self.2))
    }
}

bitflags! {
    /// Flags to mark any missing components on a [`Color`]
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct Flags : u8 {
        /// Set when the first component of a [`Color`] is missing.
        const C0_IS_NONE = 1 << 0;
        /// Set when the second component of a [`Color`] is missing.
        const C1_IS_NONE = 1 << 1;
        /// Set when the third component of a [`Color`] is missing.
        const C2_IS_NONE = 1 << 2;
        /// Set when the alpha component of a [`Color`] is missing.
        const ALPHA_IS_NONE = 1 << 3;
    }
}

/// The reference white point a color space is defined against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum White {
    /// The D50 standard illuminant.
    D50,
    /// The D65 standard illuminant.
    D65,
}

/// The naming convention used when a color space is referred to by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// The ids used by CSS (`display-p3`, `prophoto-rgb`, ...).
    Css,
    /// The engine's configuration keys (`p3`, `prophoto`, ...).
    Config,
}

/// The closed set of color spaces and notations the engine supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Space {
    /// The sRGB color space.
    Srgb = 0,
    /// The sRGB color space with no gamma mapping.
    SrgbLinear,
    /// The Adobe 1998 RGB color space.
    A98Rgb,
    /// The Display-P3 color space.
    DisplayP3,
    /// The ITU-R BT.2020 color space.
    Rec2020,
    /// The ProPhoto RGB color space.
    ProPhotoRgb,
    /// CIE-XYZ with a D65 white point.
    XyzD65,
    /// CIE-XYZ with a D50 white point.
    XyzD50,
    /// The CIE-Lab color space.
    Lab,
    /// CIE-Lab in its cylindrical (lightness, chroma, hue) form.
    Lch,
    /// The Oklab color space.
    Oklab,
    /// Oklab in its cylindrical (lightness, chroma, hue) form.
    Oklch,
    /// The HSL (hue, saturation, lightness) notation of the sRGB color space.
    Hsl,
    /// The HSV (hue, saturation, value) notation of the sRGB color space.
    Hsv,
    /// The HWB (hue, whiteness, blackness) notation of the sRGB color space.
    Hwb,
    /// Okhsv, the perceptual HSV notation of the sRGB gamut through Oklab.
    Okhsv,
    /// Okhsl, the perceptual HSL notation of the sRGB gamut through Oklab.
    Okhsl,
    /// HSLuv, the cylindrical CIE-Luv notation of the sRGB gamut.
    Hsluv,
}

impl Space {
    /// Every registered space, in registry order.
    pub const ALL: [Space; 18] = [
        Space::Srgb,
        Space::SrgbLinear,
        Space::A98Rgb,
        Space::DisplayP3,
        Space::Rec2020,
        Space::ProPhotoRgb,
        Space::XyzD65,
        Space::XyzD50,
        Space::Lab,
        Space::Lch,
        Space::Oklab,
        Space::Oklch,
        Space::Hsl,
        Space::Hsv,
        Space::Hwb,
        Space::Okhsv,
        Space::Okhsl,
        Space::Hsluv,
    ];

    /// The reference white point the space's coordinates are defined against.
    pub fn reference_white(self) -> White {
        match self {
            Space::ProPhotoRgb | Space::XyzD50 | Space::Lab | Space::Lch => White::D50,
            _ => White::D65,
        }
    }

    /// The bounded space a gamut check on this space is performed in.
    ///
    /// RGB based spaces check their own `[0, 1]` cube; the cylindrical
    /// notations of the sRGB gamut check sRGB; unbounded spaces return
    /// `None` and are always in gamut for themselves.
    pub fn gamut_space(self) -> Option<Space> {
        match self {
            Space::Srgb
            | Space::SrgbLinear
            | Space::A98Rgb
            | Space::DisplayP3
            | Space::Rec2020
            | Space::ProPhotoRgb => Some(self),
            Space::Hsl | Space::Hsv | Space::Hwb | Space::Okhsv | Space::Okhsl | Space::Hsluv => {
                Some(Space::Srgb)
            }
            Space::XyzD65 | Space::XyzD50 | Space::Lab | Space::Lch | Space::Oklab
            | Space::Oklch => None,
        }
    }

    /// The index of the hue component for cylindrical spaces.
    pub fn hue_index(self) -> Option<usize> {
        match self {
            Space::Hsl | Space::Hsv | Space::Hwb | Space::Okhsv | Space::Okhsl | Space::Hsluv => {
                Some(0)
            }
            Space::Lch | Space::Oklch => Some(2),
            _ => None,
        }
    }

    /// The id CSS uses for this space, if CSS has one.
    pub fn css_name(self) -> Option<&'static str> {
        Some(match self {
            Space::Srgb => "srgb",
            Space::SrgbLinear => "srgb-linear",
            Space::A98Rgb => "a98-rgb",
            Space::DisplayP3 => "display-p3",
            Space::Rec2020 => "rec2020",
            Space::ProPhotoRgb => "prophoto-rgb",
            Space::XyzD65 => "xyz-d65",
            Space::XyzD50 => "xyz-d50",
            Space::Lab => "lab",
            Space::Lch => "lch",
            Space::Oklab => "oklab",
            Space::Oklch => "oklch",
            Space::Hsl => "hsl",
            Space::Hwb => "hwb",
            Space::Hsv | Space::Okhsv | Space::Okhsl | Space::Hsluv => return None,
        })
    }

    /// The engine's configuration key for this space.
    pub fn config_name(self) -> &'static str {
        match self {
            Space::Srgb => "srgb",
            Space::SrgbLinear => "srgb-linear",
            Space::A98Rgb => "a98rgb",
            Space::DisplayP3 => "p3",
            Space::Rec2020 => "rec2020",
            Space::ProPhotoRgb => "prophoto",
            Space::XyzD65 => "xyz-d65",
            Space::XyzD50 => "xyz-d50",
            Space::Lab => "lab",
            Space::Lch => "lch",
            Space::Oklab => "oklab",
            Space::Oklch => "oklch",
            Space::Hsl => "hsl",
            Space::Hsv => "hsv",
            Space::Hwb => "hwb",
            Space::Okhsv => "okhsv",
            Space::Okhsl => "okhsl",
            Space::Hsluv => "hsluv",
        }
    }

    /// Look up a space by name in the given dialect. Matching is ASCII
    /// case-insensitive. The CSS dialect additionally accepts `xyz` as an
    /// alias for `xyz-d65`, per css-color-4.
    pub fn from_name(name: &str, dialect: Dialect) -> Option<Space> {
        let name = name.to_ascii_lowercase();
        if dialect == Dialect::Css && name == "xyz" {
            return Some(Space::XyzD65);
        }
        Space::ALL.iter().copied().find(|space| match dialect {
            Dialect::Css => space.css_name() == Some(name.as_str()),
            Dialect::Config => space.config_name() == name,
        })
    }
}

/// Implemented by models that correspond to exactly one registered [`Space`].
pub trait HasSpace {
    /// The space the implementing model represents.
    const SPACE: Space;
}

/// Struct that can hold a color of any color space.
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    /// The three components that make up any color.
    pub components: Components,
    /// The alpha component of the color.
    pub alpha: Component,
    /// Holds any flags that might be enabled for this color.
    pub flags: Flags,
    /// The color space in which the components are set.
    pub space: Space,
}

impl Color {
    /// Create a new [`Color`]. Each color or alpha component can take values
    /// that can be converted into a [`ComponentDetails`]. This automates the
    /// process of setting values to missing. For example:
    /// ```rust
    /// use tinct::{Color, Space};
    /// let c = Color::new(Space::Srgb, None, None, None, 1.0);
    /// ```
    /// will set all the color components to missing.
    pub fn new(
        space: Space,
        c0: impl Into<ComponentDetails>,
        c1: impl Into<ComponentDetails>,
        c2: impl Into<ComponentDetails>,
        alpha: impl Into<ComponentDetails>,
    ) -> Self {
        let mut flags = Flags::empty();

        let c0 = c0.into().value_and_flag(&mut flags, Flags::C0_IS_NONE);
        let c1 = c1.into().value_and_flag(&mut flags, Flags::C1_IS_NONE);
        let c2 = c2.into().value_and_flag(&mut flags, Flags::C2_IS_NONE);
        let alpha = alpha
            .into()
            .value_and_flag(&mut flags, Flags::ALPHA_IS_NONE);

        Self {
            components: Components(c0, c1, c2),
            alpha,
            flags,
            space,
        }
    }

    /// Return the first component of the color.
    pub fn c0(&self) -> Option<Component> {
        if self.flags.contains(Flags::C0_IS_NONE) {
            None
        } else {
            Some(self.components.0)
        }
    }

    /// Return the second component of the color.
    pub fn c1(&self) -> Option<Component> {
        if self.flags.contains(Flags::C1_IS_NONE) {
            None
        } else {
            Some(self.components.1)
        }
    }

    /// Return the third component of the color.
    pub fn c2(&self) -> Option<Component> {
        if self.flags.contains(Flags::C2_IS_NONE) {
            None
        } else {
            Some(self.components.2)
        }
    }

    /// Return the alpha component of the color.
    pub fn alpha(&self) -> Option<Component> {
        if self.flags.contains(Flags::ALPHA_IS_NONE) {
            None
        } else {
            Some(self.alpha)
        }
    }
}

/// A struct that holds details about a component passed to any of the `new`
/// functions for color models. Any component that can be passed implements
/// a `From<?> for ComponentDetails`.
pub struct ComponentDetails {
    value: Component,
    is_none: bool,
}

impl ComponentDetails {
    /// Extract the value and set the given flag if the component is none.
    pub fn value_and_flag(&self, flags: &mut Flags, flag: Flags) -> Component {
        if self.is_none {
            *flags |= flag;
        }
        self.value
    }
}

impl From<Component> for ComponentDetails {
    fn from(value: Component) -> Self {
        Self {
            value,
            is_none: false,
        }
    }
}

impl From<Option<Component>> for ComponentDetails {
    fn from(value: Option<Component>) -> Self {
        if let Some(value) = value {
            Self::from(value)
        } else {
            Self {
                value: 0.0,
                is_none: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_color_with_correct_components() {
        let c = Color::new(Space::Srgb, 0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.components, Components(0.1, 0.2, 0.3));
        assert_eq!(c.alpha, 0.4);
        assert_eq!(c.flags, Flags::empty());
        assert_eq!(c.space, Space::Srgb);

        let c = Color::new(Space::Srgb, 0.1, 0.2, None, 0.4);
        assert_eq!(c.components.2, 0.0);
        assert_eq!(c.alpha, 0.4);
        assert_eq!(c.flags, Flags::C2_IS_NONE);
        assert_eq!(c.space, Space::Srgb);

        let c = Color::new(Space::Srgb, 0.1, 0.2, 0.3, None);
        assert_eq!(c.components, Components(0.1, 0.2, 0.3));
        assert_eq!(c.alpha, 0.0);
        assert_eq!(c.flags, Flags::ALPHA_IS_NONE);
        assert_eq!(c.space, Space::Srgb);
    }

    #[test]
    fn test_component_details() {
        let cd = ComponentDetails::from(10.0);
        assert_eq!(cd.value, 10.0);
        assert!(!cd.is_none);

        let cd = ComponentDetails::from(Component::NAN);
        assert!(cd.value.is_nan());
        assert!(!cd.is_none);

        let cd = ComponentDetails::from(Some(20.0));
        assert_eq!(cd.value, 20.0);
        assert!(!cd.is_none);

        let cd = ComponentDetails::from(None);
        assert_eq!(cd.value, 0.0);
        assert!(cd.is_none);
    }

    #[test]
    fn space_names_round_trip_in_both_dialects() {
        for space in Space::ALL {
            assert_eq!(
                Space::from_name(space.config_name(), Dialect::Config),
                Some(space)
            );
            if let Some(css) = space.css_name() {
                assert_eq!(Space::from_name(css, Dialect::Css), Some(space));
            }
        }

        assert_eq!(Space::from_name("xyz", Dialect::Css), Some(Space::XyzD65));
        assert_eq!(Space::from_name("p3", Dialect::Config), Some(Space::DisplayP3));
        assert_eq!(
            Space::from_name("display-p3", Dialect::Css),
            Some(Space::DisplayP3)
        );
        assert_eq!(Space::from_name("hsv", Dialect::Css), None);
        assert_eq!(Space::from_name("bogus", Dialect::Config), None);
    }

    #[test]
    fn registry_descriptors() {
        assert_eq!(Space::Lab.reference_white(), White::D50);
        assert_eq!(Space::Oklab.reference_white(), White::D65);
        assert_eq!(Space::Hsl.gamut_space(), Some(Space::Srgb));
        assert_eq!(Space::Rec2020.gamut_space(), Some(Space::Rec2020));
        assert_eq!(Space::Oklch.gamut_space(), None);
        assert_eq!(Space::Lch.hue_index(), Some(2));
        assert_eq!(Space::Hsluv.hue_index(), Some(0));
        assert_eq!(Space::Srgb.hue_index(), None);
    }
}
