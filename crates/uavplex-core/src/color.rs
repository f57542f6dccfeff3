//! Color handling for rendered charts.
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Palette`] that maps component types to
//! colors.

use std::{collections::BTreeMap, fmt, str::FromStr};

use color::DynamicColor;

use crate::design::ComponentType;

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uavplex_core::color::Color;
    ///
    /// let hub = Color::new("#FF6B6B").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha value in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

/// Fill colors per component type, with a fallback for unlisted types.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: BTreeMap<String, Color>,
    fallback: Color,
}

impl Palette {
    /// Builds a palette from type names to colors.
    pub fn new(colors: BTreeMap<String, Color>, fallback: Color) -> Self {
        Self { colors, fallback }
    }

    /// Overrides the color of one component type.
    pub fn with_color(mut self, type_name: impl Into<String>, color: Color) -> Self {
        self.colors.insert(type_name.into(), color);
        self
    }

    /// Returns the fill color for a component type.
    pub fn color_for(&self, kind: &ComponentType) -> Color {
        self.colors
            .get(kind.as_str())
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Returns the color used for unlisted types.
    pub fn fallback(&self) -> Color {
        self.fallback
    }
}

impl Default for Palette {
    fn default() -> Self {
        const DEFAULTS: [(&str, &str); 11] = [
            ("MainHub", "#FF6B6B"),
            ("Arm", "#4ECDC4"),
            ("Motor", "#45B7D1"),
            ("Propeller", "#FFA07A"),
            ("Flange", "#98D8C8"),
            ("Tube", "#C7CEEA"),
            ("Sensor", "#FFD93D"),
            ("Battery", "#6BCB77"),
            ("Fuselage", "#D4A5A5"),
            ("BatteryController", "#9D84B7"),
            ("LandingGear", "#A8E6CF"),
        ];

        let colors = DEFAULTS
            .iter()
            .map(|(name, hex)| {
                let color = Color::new(hex).expect("default palette colors are valid");
                ((*name).to_string(), color)
            })
            .collect();
        let fallback = Color::new("#CCCCCC").expect("fallback color is valid");

        Self { colors, fallback }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_garbage() {
        assert!(Color::new("#12345G").is_err());
        assert!(Color::new("steelblue").is_ok());
    }

    #[test]
    fn test_with_alpha() {
        let color = Color::new("red").unwrap().with_alpha(0.5);
        assert_eq!(color.alpha(), 0.5);
    }

    #[test]
    fn test_palette_known_type() {
        let palette = Palette::default();
        let motor = palette.color_for(&ComponentType::Motor);
        assert_eq!(motor, Color::new("#45B7D1").unwrap());
    }

    #[test]
    fn test_palette_fallback_for_unknown_type() {
        let palette = Palette::default();
        let other = palette.color_for(&ComponentType::from("Wing"));
        assert_eq!(other, palette.fallback());
    }

    #[test]
    fn test_palette_override() {
        let blue = Color::new("blue").unwrap();
        let palette = Palette::default().with_color("Wing", blue);
        assert_eq!(palette.color_for(&ComponentType::from("Wing")), blue);
    }
}
