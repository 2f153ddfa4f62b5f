//! User-facing grid parameters.
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit sRGB color, serialised as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("Invalid color '{s}': expected #rrggbb"));
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(format!("Invalid color '{s}': expected #rrggbb")),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|e| format!("Invalid color '{s}': {e}"))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Default grid stroke color.
pub const DEFAULT_GRID_COLOR: Rgb = Rgb::new(0x0b, 0x84, 0xff);

/// Diagonals always use this color so they stay distinct from the grid.
pub const DIAGONAL_COLOR: Rgb = Rgb::new(0xff, 0x6b, 0x6b);

/// Which cell diagonals to draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalStyle {
    None,
    /// Top-left to bottom-right.
    #[serde(alias = "tl-br")]
    TopLeftToBottomRight,
    /// Top-right to bottom-left.
    #[serde(alias = "tr-bl")]
    TopRightToBottomLeft,
    #[default]
    Both,
}

impl DiagonalStyle {
    pub fn draws_tl_br(self) -> bool {
        matches!(
            self,
            DiagonalStyle::TopLeftToBottomRight | DiagonalStyle::Both
        )
    }

    pub fn draws_tr_bl(self) -> bool {
        matches!(
            self,
            DiagonalStyle::TopRightToBottomLeft | DiagonalStyle::Both
        )
    }
}

/// Physical grid parameters. Immutable for the duration of one render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Row pitch (cell height) in millimetres, > 0.
    pub row_pitch_mm: f64,
    /// Column pitch (cell width) in millimetres, > 0.
    pub col_pitch_mm: f64,
    /// Extra spacing added to both pitches, >= 0.
    pub gap_mm: f64,
    /// Stroke width in output pixels, > 0.
    pub stroke_width_px: f64,
    pub show_grid: bool,
    pub show_diagonal: bool,
    /// Ignored unless `show_diagonal` is set.
    pub diagonal_style: DiagonalStyle,
    pub color: Rgb,
    pub grayscale: bool,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            row_pitch_mm: 10.0,
            col_pitch_mm: 10.0,
            gap_mm: 0.0,
            stroke_width_px: 1.0,
            show_grid: true,
            show_diagonal: false,
            diagonal_style: DiagonalStyle::Both,
            color: DEFAULT_GRID_COLOR,
            grayscale: false,
        }
    }
}

impl GridSpec {
    /// Check the invariants user input must satisfy. Rendering never calls
    /// this; degenerate values there just produce an empty grid.
    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("row_pitch_mm", self.row_pitch_mm),
            ("col_pitch_mm", self.col_pitch_mm),
            ("stroke_width_px", self.stroke_width_px),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidSpec(format!(
                    "{name} must be > 0, got {value}"
                )));
            }
        }
        if !self.gap_mm.is_finite() || self.gap_mm < 0.0 {
            return Err(Error::InvalidSpec(format!(
                "gap_mm must be >= 0, got {}",
                self.gap_mm
            )));
        }
        Ok(())
    }

    /// Diagonal style in effect, folding in the `show_diagonal` toggle.
    pub fn effective_diagonals(&self) -> DiagonalStyle {
        if self.show_diagonal {
            self.diagonal_style
        } else {
            DiagonalStyle::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_and_print() {
        assert_eq!(Rgb::from_hex("#0b84ff").unwrap(), DEFAULT_GRID_COLOR);
        assert_eq!(Rgb::from_hex("f00").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(DIAGONAL_COLOR.to_hex(), "#ff6b6b");
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
    }

    #[test]
    fn spec_deserializes_with_defaults() {
        let spec: GridSpec =
            serde_json::from_str(r##"{"gap_mm": 2.5, "color": "#000000", "diagonal_style": "tl-br"}"##)
                .unwrap();
        assert_eq!(spec.gap_mm, 2.5);
        assert_eq!(spec.row_pitch_mm, 10.0);
        assert_eq!(spec.color, Rgb::new(0, 0, 0));
        assert_eq!(spec.diagonal_style, DiagonalStyle::TopLeftToBottomRight);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(GridSpec::default().validate().is_ok());
        let bad_pitch = GridSpec {
            col_pitch_mm: 0.0,
            ..Default::default()
        };
        assert!(bad_pitch.validate().is_err());
        let bad_gap = GridSpec {
            gap_mm: -1.0,
            ..Default::default()
        };
        assert!(bad_gap.validate().is_err());
        let bad_stroke = GridSpec {
            stroke_width_px: f64::NAN,
            ..Default::default()
        };
        assert!(bad_stroke.validate().is_err());
    }

    #[test]
    fn diagonals_off_unless_toggled() {
        let mut spec = GridSpec::default();
        assert_eq!(spec.effective_diagonals(), DiagonalStyle::None);
        spec.show_diagonal = true;
        assert_eq!(spec.effective_diagonals(), DiagonalStyle::Both);
        assert!(spec.effective_diagonals().draws_tl_br());
        assert!(spec.effective_diagonals().draws_tr_bl());
    }
}
