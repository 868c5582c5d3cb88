//! Lengths, margins and page sizes.
use crate::parsers::{self, run_parser};
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Serde adapters for lengths given either as a number of points or as a
/// string with a unit, e.g. `"2cm"`.
///
/// ```ignore
/// #[serde(deserialize_with = "folio_style::length::deserialize")]
/// pub width: f32,
/// ```
pub mod length {
    use super::*;

    struct LengthVisitor;

    impl<'de> de::Visitor<'de> for LengthVisitor {
        type Value = f32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number of points or a string like '12pt' or '2cm'")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<f32, E> {
            Ok(value as f32)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<f32, E> {
            Ok(value as f32)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<f32, E> {
            Ok(value as f32)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<f32, E> {
            run_parser(parsers::length, value).map_err(E::custom)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f32, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LengthVisitor)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(deserialize_with = "deserialize")] f32);

        Option::<Wrapped>::deserialize(deserializer).map(|wrapped| wrapped.map(|w| w.0))
    }
}

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsVisitor;
        impl<'de> de::Visitor<'de> for MarginsVisitor {
            type Value = Margins;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, a string like '10pt' or '1cm 2cm', or a map")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Margins, E> {
                run_parser(parsers::margins, value).map_err(E::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margins, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                #[derive(Deserialize)]
                struct Side(#[serde(deserialize_with = "length::deserialize")] f32);

                let mut margins = Margins::default();
                while let Some(key) = map.next_key::<String>()? {
                    let Side(value) = map.next_value()?;
                    match key.as_str() {
                        "top" => margins.top = value,
                        "right" => margins.right = value,
                        "bottom" => margins.bottom = value,
                        "left" => margins.left = value,
                        other => {
                            return Err(de::Error::unknown_field(
                                other,
                                &["top", "right", "bottom", "left"],
                            ))
                        }
                    }
                }
                Ok(margins)
            }
        }
        deserializer.deserialize_any(MarginsVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Named(String),
            Custom {
                #[serde(deserialize_with = "length::deserialize")]
                width: f32,
                #[serde(deserialize_with = "length::deserialize")]
                height: f32,
            },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Named(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Custom { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}
