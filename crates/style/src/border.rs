use crate::dimension::length;
use crate::parsers::{self, run_parser};
use folio_types::Color;
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    pub width: f32,
    pub style: BorderStyle,
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Self {
            width,
            style: BorderStyle::Solid,
            color,
        }
    }

    /// The width the border occupies; hidden borders take no space.
    pub fn visible_width(&self) -> f32 {
        if self.style == BorderStyle::None || self.width <= 0.0 {
            0.0
        } else {
            self.width
        }
    }
}

impl<'de> Deserialize<'de> for Border {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BorderDef {
            Shorthand(String),
            #[serde(rename_all = "camelCase")]
            Full {
                #[serde(deserialize_with = "length::deserialize")]
                width: f32,
                #[serde(default)]
                style: BorderStyle,
                #[serde(default)]
                color: Color,
            },
        }

        match BorderDef::deserialize(deserializer)? {
            BorderDef::Shorthand(s) => run_parser(parsers::border, &s).map_err(de::Error::custom),
            BorderDef::Full {
                width,
                style,
                color,
            } => Ok(Border {
                width,
                style,
                color,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    Top,
    Bottom,
    Left,
    Right,
    DiagonalDown,
    DiagonalUp,
}

/// The borders of a cell or table. A missing side is not drawn and takes no space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Borders {
    pub top: Option<Border>,
    pub bottom: Option<Border>,
    pub left: Option<Border>,
    pub right: Option<Border>,
    pub diagonal_down: Option<Border>,
    pub diagonal_up: Option<Border>,
}

impl Borders {
    /// The same border on all four edges, no diagonals.
    pub fn all(border: Border) -> Self {
        Self {
            top: Some(border),
            bottom: Some(border),
            left: Some(border),
            right: Some(border),
            diagonal_down: None,
            diagonal_up: None,
        }
    }

    pub fn get(&self, side: BorderSide) -> Option<&Border> {
        match side {
            BorderSide::Top => self.top.as_ref(),
            BorderSide::Bottom => self.bottom.as_ref(),
            BorderSide::Left => self.left.as_ref(),
            BorderSide::Right => self.right.as_ref(),
            BorderSide::DiagonalDown => self.diagonal_down.as_ref(),
            BorderSide::DiagonalUp => self.diagonal_up.as_ref(),
        }
    }

    pub fn set(&mut self, side: BorderSide, border: Option<Border>) {
        let slot = match side {
            BorderSide::Top => &mut self.top,
            BorderSide::Bottom => &mut self.bottom,
            BorderSide::Left => &mut self.left,
            BorderSide::Right => &mut self.right,
            BorderSide::DiagonalDown => &mut self.diagonal_down,
            BorderSide::DiagonalUp => &mut self.diagonal_up,
        };
        *slot = border;
    }

    pub fn width(&self, side: BorderSide) -> f32 {
        self.get(side).map_or(0.0, Border::visible_width)
    }

    pub fn is_empty(&self) -> bool {
        [
            BorderSide::Top,
            BorderSide::Bottom,
            BorderSide::Left,
            BorderSide::Right,
            BorderSide::DiagonalDown,
            BorderSide::DiagonalUp,
        ]
        .iter()
        .all(|side| self.get(*side).is_none())
    }
}

impl<'de> Deserialize<'de> for Borders {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize, Default)]
        #[serde(rename_all = "camelCase", default)]
        struct Sides {
            top: Option<Border>,
            bottom: Option<Border>,
            left: Option<Border>,
            right: Option<Border>,
            diagonal_down: Option<Border>,
            diagonal_up: Option<Border>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BordersDef {
            Uniform(String),
            Sides(Sides),
        }

        match BordersDef::deserialize(deserializer)? {
            BordersDef::Uniform(s) => run_parser(parsers::border, &s)
                .map(Borders::all)
                .map_err(de::Error::custom),
            BordersDef::Sides(s) => Ok(Borders {
                top: s.top,
                bottom: s.bottom,
                left: s.left,
                right: s.right,
                diagonal_down: s.diagonal_down,
                diagonal_up: s.diagonal_up,
            }),
        }
    }
}

/// A background fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shading {
    pub color: Color,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl Shading {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.color.is_transparent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borders_from_shorthand_and_sides() {
        let uniform: Borders = serde_json::from_str(r#""1pt solid #000""#).unwrap();
        assert_eq!(uniform.width(BorderSide::Left), 1.0);
        assert_eq!(uniform.width(BorderSide::DiagonalUp), 0.0);

        let sides: Borders =
            serde_json::from_str(r#"{ "bottom": "2pt", "diagonalDown": { "width": 0.5 } }"#).unwrap();
        assert_eq!(sides.width(BorderSide::Bottom), 2.0);
        assert_eq!(sides.width(BorderSide::Top), 0.0);
        assert_eq!(sides.width(BorderSide::DiagonalDown), 0.5);
    }

    #[test]
    fn hidden_borders_take_no_space() {
        let mut borders = Borders::all(Border::new(3.0, Color::BLACK));
        borders.set(
            BorderSide::Top,
            Some(Border {
                style: BorderStyle::None,
                ..Border::new(3.0, Color::BLACK)
            }),
        );
        assert_eq!(borders.width(BorderSide::Top), 0.0);
        assert_eq!(borders.width(BorderSide::Bottom), 3.0);
    }
}
