//! Configuration from element attribute text.
//!
//! Hosts that describe bars in markup can hand the attribute list of a
//! `<candy-progress>` tag straight to [`parse`]:
//!
//! ```rust
//! use candy_progress::attributes;
//!
//! let attrs = attributes::parse(r#"class="blue" progress="50" loop"#).unwrap();
//! let config = attrs.config();
//! assert_eq!(config.progress, 50.0);
//! assert!(config.looping);
//!
//! let theme = attrs.theme().unwrap();
//! assert_eq!(theme.color, "#3d9bff");
//! ```
//!
//! Values convert the way element properties do. Numbers follow JavaScript's
//! `Number()`: surrounding whitespace is ignored, an empty value is `0`, and
//! anything unparseable becomes NaN. Booleans are true whenever the attribute
//! is present, whatever its value. Unknown attributes are kept but ignored.
//!
//! Theming comes from the `class` attribute, which may name one of the
//! [palettes](crate::theme::PALETTES), and from `--candy-progress-*` custom
//! properties in the `style` attribute.

use crate::animator::Config;
use crate::theme::Theme;
use thiserror::Error;

const COLOR_VAR: &str = "--candy-progress-color";
const SECONDARY_COLOR_VAR: &str = "--candy-progress-secondary-color";
const WIDTH_VAR: &str = "--candy-progress-width";
const HEIGHT_VAR: &str = "--candy-progress-height";

/// Errors from malformed attribute text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A quoted value ran to the end of the input.
    #[error("unterminated quote in value of `{0}`")]
    UnterminatedQuote(String),
    /// An `=` or quote appeared where a name should start.
    #[error("expected attribute name at offset {0}")]
    MissingName(usize),
    /// Nothing followed `name=`.
    #[error("missing value after `{0}=`")]
    MissingValue(String),
    /// A width or height was not a cell count.
    #[error("invalid {property} `{value}`: expected a whole number of cells")]
    InvalidDimension {
        /// Custom property being read.
        property: String,
        /// The rejected value.
        value: String,
    },
}

/// An ordered attribute list. Names are lowercased; values are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

/// Parses attribute text such as `progress="50" loop speed=90`.
pub fn parse(input: &str) -> Result<Attributes, Error> {
    let mut entries = Vec::new();
    let mut chars = input.char_indices().peekable();

    loop {
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some(&(start, first)) = chars.peek() else {
            break;
        };
        if first == '=' || first == '"' || first == '\'' {
            return Err(Error::MissingName(start));
        }

        let mut name = String::new();
        while let Some((_, c)) =
            chars.next_if(|(_, c)| !c.is_whitespace() && *c != '=' && *c != '"' && *c != '\'')
        {
            name.extend(c.to_lowercase());
        }

        if chars.next_if(|(_, c)| *c == '=').is_none() {
            entries.push((name, None));
            continue;
        }

        let value = match chars.peek().map(|&(_, c)| c) {
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((_, c)) if c == quote => break,
                        Some((_, c)) => value.push(c),
                        None => return Err(Error::UnterminatedQuote(name)),
                    }
                }
                value
            }
            Some(c) if !c.is_whitespace() => {
                let mut value = String::new();
                while let Some((_, c)) = chars.next_if(|(_, c)| !c.is_whitespace()) {
                    value.push(c);
                }
                value
            }
            _ => return Err(Error::MissingValue(name)),
        };
        entries.push((name, Some(value)));
    }

    Ok(Attributes { entries })
}

impl Attributes {
    /// Whether the attribute is present. Names match case-insensitively.
    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Value of the first attribute with this name; empty for a bare name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.find(name)
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    /// Number of attributes, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attributes were given.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Behavior settings, falling back to defaults for missing attributes.
    pub fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            progress: self.get("progress").map_or(defaults.progress, js_number),
            looping: self.has("loop"),
            fill: self.has("fill"),
            speed: self.get("speed").map_or(defaults.speed, js_number),
        }
    }

    /// Visual settings from `class` and `style`.
    pub fn theme(&self) -> Result<Theme, Error> {
        let mut theme = self
            .get("class")
            .into_iter()
            .flat_map(str::split_whitespace)
            .find_map(Theme::palette)
            .unwrap_or_default();

        let Some(style) = self.get("style") else {
            return Ok(theme);
        };

        for declaration in style.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let property = property.trim();
            let value = value.trim();
            match property {
                COLOR_VAR => theme.color = value.to_string(),
                SECONDARY_COLOR_VAR => theme.secondary_color = value.to_string(),
                WIDTH_VAR => theme.width = dimension(property, value)?,
                HEIGHT_VAR => theme.height = dimension(property, value)?,
                _ => {}
            }
        }

        Ok(theme)
    }

    fn find(&self, name: &str) -> Option<&(String, Option<String>)> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
    }
}

impl std::str::FromStr for Attributes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Converts text to a number the way JavaScript's `Number()` does.
pub fn js_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }

    // Rust also accepts spellings like "inf" or "nan" that Number() rejects.
    let decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

fn dimension(property: &str, value: &str) -> Result<usize, Error> {
    let digits = value.strip_suffix("px").unwrap_or(value).trim();
    digits.parse().map_err(|_| Error::InvalidDimension {
        property: property.to_string(),
        value: value.to_string(),
    })
}
