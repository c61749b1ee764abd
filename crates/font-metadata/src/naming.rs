//! Naming scheme for merged fonts

use hanmono_font_ops::NameString;

use crate::Variant;

/// Name table IDs.
pub const NAME_ID_COPYRIGHT: u16 = 0;
pub const NAME_ID_FAMILY: u16 = 1;
pub const NAME_ID_SUBFAMILY: u16 = 2;
pub const NAME_ID_UNIQUE_ID: u16 = 3;
pub const NAME_ID_FULL_NAME: u16 = 4;
pub const NAME_ID_VERSION: u16 = 5;
pub const NAME_ID_POSTSCRIPT: u16 = 6;
pub const NAME_ID_MANUFACTURER: u16 = 8;
pub const NAME_ID_DESCRIPTION: u16 = 10;
pub const NAME_ID_TYPOGRAPHIC_FAMILY: u16 = 16;

/// Languages the name table is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    EnglishUs,
    ChinesePrc,
}

impl Language {
    /// Windows language ID
    pub fn windows_id(self) -> u16 {
        match self {
            Language::EnglishUs => 0x0409,
            Language::ChinesePrc => 0x0804,
        }
    }
}

/// One localized name string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub language: Language,
    pub name_id: u16,
    pub value: String,
}

impl NameEntry {
    pub fn new(language: Language, name_id: u16, value: impl Into<String>) -> Self {
        Self { language, name_id, value: value.into() }
    }

    pub fn to_name_string(&self) -> NameString {
        NameString::new(self.language.windows_id(), self.name_id, self.value.clone())
    }
}

/// Input font files named in the description string
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    pub base: &'a str,
    pub aux: &'a str,
}

/// Names and vendor strings of the merged family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingScheme {
    /// English family name
    pub family_en: String,
    /// Simplified Chinese family name
    pub family_zh: String,
    /// PostScript name prefix; the variant is appended as is
    pub postscript_prefix: String,
    pub manufacturer: String,
    /// OS/2 `achVendID`, at most four ASCII characters
    pub vendor_id: String,
    pub copyright: String,
    /// `major.minor`, written to name ID 5 and `head.fontRevision`
    pub version: String,
}

impl NamingScheme {
    /// A scheme whose family names join two parts with a space
    pub fn from_parts(
        en: (&str, &str),
        zh: (&str, &str),
        postscript_prefix: impl Into<String>,
    ) -> Self {
        Self {
            family_en: format!("{} {}", en.0, en.1),
            family_zh: format!("{} {}", zh.0, zh.1),
            postscript_prefix: postscript_prefix.into(),
            manufacturer: String::new(),
            vendor_id: String::new(),
            copyright: String::new(),
            version: "1.0".to_string(),
        }
    }

    pub fn postscript_name(&self, variant: &Variant) -> String {
        format!("{}{}", self.postscript_prefix, variant)
    }

    pub fn full_name(&self, variant: &Variant) -> String {
        weighted(&self.family_en, variant)
    }

    pub fn version_string(&self) -> String {
        format!("Version {}", self.version)
    }

    pub fn unique_id(&self, variant: &Variant) -> String {
        format!("{};{};{}", self.version, self.vendor_id.trim(), self.postscript_name(variant))
    }

    /// Every name record the merged font carries.
    ///
    /// The Regular variant is named after the bare family. Other variants get
    /// a family of their own (`"{family} {variant}"`, which keeps them apart in
    /// applications that only read name ID 1) and point back to the bare
    /// family through the typographic family (ID 16). The typographic
    /// subfamily (ID 17) is never written.
    pub fn entries(&self, variant: &Variant, sources: Option<Sources>) -> Vec<NameEntry> {
        use Language::*;

        let family_en = weighted(&self.family_en, variant);
        let family_zh = weighted(&self.family_zh, variant);
        let subfamily = variant.as_str();

        let mut entries = vec![
            NameEntry::new(EnglishUs, NAME_ID_FAMILY, family_en.clone()),
            NameEntry::new(EnglishUs, NAME_ID_SUBFAMILY, subfamily),
            NameEntry::new(EnglishUs, NAME_ID_FULL_NAME, family_en),
            NameEntry::new(EnglishUs, NAME_ID_POSTSCRIPT, self.postscript_name(variant)),
        ];
        if !variant.is_regular() {
            entries.push(NameEntry::new(EnglishUs, NAME_ID_TYPOGRAPHIC_FAMILY, &*self.family_en));
        }

        entries.extend([
            NameEntry::new(ChinesePrc, NAME_ID_FAMILY, family_zh.clone()),
            NameEntry::new(ChinesePrc, NAME_ID_SUBFAMILY, subfamily),
            NameEntry::new(ChinesePrc, NAME_ID_FULL_NAME, family_zh),
        ]);
        if !variant.is_regular() {
            entries.push(NameEntry::new(ChinesePrc, NAME_ID_TYPOGRAPHIC_FAMILY, &*self.family_zh));
        }

        if !self.manufacturer.is_empty() {
            entries.push(NameEntry::new(EnglishUs, NAME_ID_MANUFACTURER, &*self.manufacturer));
            entries.push(NameEntry::new(ChinesePrc, NAME_ID_MANUFACTURER, &*self.manufacturer));
        }
        if !self.copyright.is_empty() {
            entries.push(NameEntry::new(EnglishUs, NAME_ID_COPYRIGHT, &*self.copyright));
        }
        entries.push(NameEntry::new(EnglishUs, NAME_ID_VERSION, self.version_string()));
        entries.push(NameEntry::new(EnglishUs, NAME_ID_UNIQUE_ID, self.unique_id(variant)));
        if let Some(sources) = sources {
            entries.push(NameEntry::new(
                EnglishUs,
                NAME_ID_DESCRIPTION,
                format!("Merged font: {} + {}", sources.base, sources.aux),
            ));
        }

        entries
    }
}

fn weighted(family: &str, variant: &Variant) -> String {
    if variant.is_regular() { family.to_string() } else { format!("{family} {variant}") }
}
