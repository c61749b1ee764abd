//! Summaries of generated fonts, in the spirit of `fc-query`.

use std::fmt;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use read_fonts::{FontRef, TableProvider};

use hanmono_font_merger::{Source, read_mappings};
use hanmono_font_metadata::{
    NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_POSTSCRIPT, NAME_ID_SUBFAMILY,
    NAME_ID_TYPOGRAPHIC_FAMILY, NAME_ID_VERSION,
};
use hanmono_font_ops::{PLATFORM_WINDOWS, read_name_strings};

/// Windows name strings of one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedNames {
    pub family: Option<String>,
    pub subfamily: Option<String>,
    pub full_name: Option<String>,
    pub typographic_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontSummary {
    pub glyph_count: u16,
    pub codepoint_count: usize,
    /// Keyed by Windows language ID, in name table order
    pub names: IndexMap<u16, LocalizedNames>,
    pub postscript_name: Option<String>,
    pub version: Option<String>,
    pub weight_class: Option<u16>,
    pub width_class: Option<u16>,
    pub vendor: Option<String>,
}

/// Summarize a font's names, weight and coverage
pub fn describe_font(data: &[u8]) -> Result<FontSummary> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let mut summary = FontSummary {
        glyph_count: font.maxp().map(|maxp| maxp.num_glyphs()).unwrap_or(0),
        codepoint_count: read_mappings(&font, Source::Base).map(|m| m.len()).unwrap_or(0),
        ..FontSummary::default()
    };

    if let Ok(os2) = font.os2() {
        summary.weight_class = Some(os2.us_weight_class());
        summary.width_class = Some(os2.us_width_class());
        summary.vendor = Some(os2.ach_vend_id().to_string().trim_end().to_string());
    }

    for (platform, language, name_id, value) in read_name_strings(&font).unwrap_or_default() {
        if platform != PLATFORM_WINDOWS {
            continue;
        }
        match name_id {
            NAME_ID_POSTSCRIPT => {
                summary.postscript_name.get_or_insert(value);
            }
            NAME_ID_VERSION => {
                summary.version.get_or_insert(value);
            }
            _ => {
                let names = summary.names.entry(language).or_default();
                let slot = match name_id {
                    NAME_ID_FAMILY => &mut names.family,
                    NAME_ID_SUBFAMILY => &mut names.subfamily,
                    NAME_ID_FULL_NAME => &mut names.full_name,
                    NAME_ID_TYPOGRAPHIC_FAMILY => &mut names.typographic_family,
                    _ => continue,
                };
                slot.get_or_insert(value);
            }
        }
    }
    summary.names.retain(|_, names| *names != LocalizedNames::default());

    Ok(summary)
}

impl FontSummary {
    fn quoted<'a>(&'a self, field: impl Fn(&'a LocalizedNames) -> Option<&'a String>) -> String {
        self.names
            .values()
            .filter_map(field)
            .map(|value| format!("\"{value}\"(s)"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FontSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tfamily: {}", self.quoted(|n| n.family.as_ref()))?;
        writeln!(f, "\tstyle: {}", self.quoted(|n| n.subfamily.as_ref()))?;
        writeln!(f, "\tfullname: {}", self.quoted(|n| n.full_name.as_ref()))?;
        let typographic = self.quoted(|n| n.typographic_family.as_ref());
        if !typographic.is_empty() {
            writeln!(f, "\ttypographic family: {typographic}")?;
        }
        if let Some(name) = &self.postscript_name {
            writeln!(f, "\tpostscriptname: \"{name}\"(s)")?;
        }
        if let Some(version) = &self.version {
            writeln!(f, "\tversion: \"{version}\"(s)")?;
        }
        if let Some(weight) = self.weight_class {
            writeln!(f, "\tweight: {weight}(i)")?;
        }
        if let Some(width) = self.width_class {
            writeln!(f, "\twidth: {width}(i)")?;
        }
        if let Some(vendor) = &self.vendor {
            writeln!(f, "\tfoundry: \"{vendor}\"(s)")?;
        }
        writeln!(f, "\tglyphs: {}(i)", self.glyph_count)?;
        write!(f, "\tcodepoints: {}(i)", self.codepoint_count)
    }
}

#[cfg(test)]
mod tests {
    use write_fonts::FontBuilder;

    use hanmono_font_ops::{NameString, build_name_table};

    use super::*;

    fn font_with_names(strings: &[NameString]) -> Vec<u8> {
        let mut builder = FontBuilder::new();
        builder.add_table(&build_name_table(strings)).unwrap();
        builder.build()
    }

    #[test]
    fn test_describe_names() {
        let data = font_with_names(&[
            NameString::new(0x0409, 1, "Family Light"),
            NameString::new(0x0409, 2, "Light"),
            NameString::new(0x0409, 6, "Family-Light"),
            NameString::new(0x0409, 16, "Family"),
            NameString::new(0x0804, 1, "家族 Light"),
            NameString::new(0x0804, 8, "Vendor"),
        ]);
        let summary = describe_font(&data).unwrap();

        assert_eq!(summary.names.len(), 2);
        assert_eq!(summary.names[&0x0409].family.as_deref(), Some("Family Light"));
        assert_eq!(summary.names[&0x0409].typographic_family.as_deref(), Some("Family"));
        assert_eq!(summary.names[&0x0804].family.as_deref(), Some("家族 Light"));
        assert_eq!(summary.postscript_name.as_deref(), Some("Family-Light"));
        assert_eq!(summary.weight_class, None);
        assert_eq!(summary.glyph_count, 0);
    }

    #[test]
    fn test_display() {
        let data = font_with_names(&[
            NameString::new(0x0409, 1, "Family"),
            NameString::new(0x0804, 1, "家族"),
        ]);
        let text = describe_font(&data).unwrap().to_string();
        assert!(text.contains("family: \"Family\"(s) \"家族\"(s)"));
        assert!(!text.contains("typographic family"));
        assert!(text.ends_with("codepoints: 0(i)"));
    }

    #[test]
    fn test_describe_real_font() {
        let summary = describe_font(font_test_data::CMAP12_FONT1).unwrap();
        assert!(summary.codepoint_count > 0);
    }

    #[test]
    fn test_describe_garbage() {
        assert!(describe_font(b"not a font").is_err());
    }
}
