//! Weight variants

use std::fmt;

/// OS/2 weight class for each named weight
const WEIGHTS: &[(&str, u16)] = &[
    ("Thin", 250),
    ("ExtraLight", 275),
    ("Light", 300),
    ("Normal", 400),
    ("Regular", 400),
    ("Medium", 500),
    ("SemiBold", 600),
    ("Bold", 700),
    ("ExtraBold", 800),
    ("Black", 900),
];

const DEFAULT_WEIGHT: u16 = 400;

/// A weight variant name such as `Light` or `BoldItalic`.
///
/// The name doubles as the file name suffix of the input fonts and as the
/// subfamily name of the generated font.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variant(String);

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_regular(&self) -> bool {
        self.0 == "Regular"
    }

    pub fn is_italic(&self) -> bool {
        self.0.ends_with("Italic")
    }

    /// The weight part of the name, `Regular` for a bare `Italic`
    pub fn weight_name(&self) -> &str {
        match self.0.strip_suffix("Italic") {
            Some("") => "Regular",
            Some(weight) => weight,
            None => &self.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight_name() == "Bold"
    }

    /// OS/2 `usWeightClass`; unknown weights fall back to 400
    pub fn os2_weight(&self) -> u16 {
        let weight = self.weight_name();
        WEIGHTS
            .iter()
            .find(|(name, _)| *name == weight)
            .map(|(_, class)| *class)
            .unwrap_or(DEFAULT_WEIGHT)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Variant {
    fn from(name: String) -> Self {
        Self(name)
    }
}
