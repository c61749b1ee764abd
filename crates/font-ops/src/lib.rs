//! Table-level font rewriting helpers.

use anyhow::{Context, Result};
use read_fonts::{
    FontRef, TableProvider,
    types::{NameId, Tag},
};
use write_fonts::{
    FontBuilder,
    tables::name::{Name, NameRecord},
};

/// Windows platform ID.
pub const PLATFORM_WINDOWS: u16 = 3;
/// Windows Unicode BMP encoding ID.
pub const ENCODING_UNICODE_BMP: u16 = 1;

/// Rewrite font data by applying a transformation function.
///
/// Copies every table of the source font except the ones listed in `drop`,
/// then calls `f`, which may replace or add tables on the builder.
pub fn rewrite_font(
    data: &[u8],
    drop: &[Tag],
    f: impl FnOnce(&FontRef, &mut FontBuilder) -> Result<()>,
) -> Result<Vec<u8>> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if drop.contains(&tag) {
            continue;
        }
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    f(&font, &mut builder)?;
    Ok(builder.build())
}

/// A single Windows-platform name string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameString {
    pub language_id: u16,
    pub name_id: u16,
    pub value: String,
}

impl NameString {
    pub fn new(language_id: u16, name_id: u16, value: impl Into<String>) -> Self {
        Self { language_id, name_id, value: value.into() }
    }

    fn to_record(&self) -> NameRecord {
        NameRecord::new(
            PLATFORM_WINDOWS,
            ENCODING_UNICODE_BMP,
            self.language_id,
            NameId::new(self.name_id),
            self.value.clone().into(),
        )
    }
}

/// Build a fresh `name` table holding exactly the given strings.
///
/// Records are sorted by language and name ID. A later entry with the same
/// language and name ID replaces an earlier one.
pub fn build_name_table(strings: &[NameString]) -> Name {
    let mut records: Vec<NameRecord> = Vec::with_capacity(strings.len());
    for string in strings {
        let record = string.to_record();
        match records
            .iter_mut()
            .find(|r| r.language_id == record.language_id && r.name_id == record.name_id)
        {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }
    records.sort_by_key(|r| (r.platform_id, r.encoding_id, r.language_id, r.name_id.to_u16()));
    Name::new(records)
}

/// Read every decodable name record as `(platform, language, name_id, string)`.
pub fn read_name_strings(font: &FontRef) -> Result<Vec<(u16, u16, u16, String)>> {
    let name = font.name().context("Font has no name table")?;
    let mut strings = Vec::new();

    for record in name.name_record() {
        let Ok(value) = record.string(name.string_data()) else {
            continue;
        };
        strings.push((
            record.platform_id(),
            record.language_id(),
            record.name_id().to_u16(),
            value.chars().collect::<String>(),
        ));
    }

    Ok(strings)
}

/// Look up a Windows-platform name string for the given language.
pub fn localized_name(font: &FontRef, name_id: u16, language_id: u16) -> Option<String> {
    read_name_strings(font)
        .ok()?
        .into_iter()
        .find(|(platform, language, id, _)| {
            *platform == PLATFORM_WINDOWS && *language == language_id && *id == name_id
        })
        .map(|(_, _, _, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_with_names(strings: &[NameString]) -> Vec<u8> {
        let mut builder = FontBuilder::new();
        builder.add_table(&build_name_table(strings)).unwrap();
        builder.build()
    }

    #[test]
    fn test_rewrite_font_copies_tables() {
        let data = font_test_data::CMAP12_FONT1;
        let original = FontRef::new(data).unwrap();
        let rewritten = rewrite_font(data, &[], |_, _| Ok(())).unwrap();
        let font = FontRef::new(&rewritten).unwrap();
        assert_eq!(
            font.table_directory.table_records().len(),
            original.table_directory.table_records().len()
        );
    }

    #[test]
    fn test_rewrite_font_drops_tables() {
        let data = font_test_data::CMAP12_FONT1;
        let rewritten = rewrite_font(data, &[Tag::new(b"cmap")], |_, _| Ok(())).unwrap();
        let font = FontRef::new(&rewritten).unwrap();
        assert!(font.table_data(Tag::new(b"cmap")).is_none());
    }

    #[test]
    fn test_build_name_table_replaces_duplicates() {
        let data = font_with_names(&[
            NameString::new(0x0409, 1, "First"),
            NameString::new(0x0409, 1, "Second"),
            NameString::new(0x0804, 1, "中文"),
        ]);
        let font = FontRef::new(&data).unwrap();

        assert_eq!(localized_name(&font, 1, 0x0409).as_deref(), Some("Second"));
        assert_eq!(localized_name(&font, 1, 0x0804).as_deref(), Some("中文"));
        assert_eq!(read_name_strings(&font).unwrap().len(), 2);
    }

    #[test]
    fn test_build_name_table_sorted() {
        let data = font_with_names(&[
            NameString::new(0x0804, 4, "b"),
            NameString::new(0x0409, 6, "c"),
            NameString::new(0x0409, 1, "a"),
        ]);
        let font = FontRef::new(&data).unwrap();
        let keys: Vec<(u16, u16)> = read_name_strings(&font)
            .unwrap()
            .into_iter()
            .map(|(_, language, id, _)| (language, id))
            .collect();
        assert_eq!(keys, vec![(0x0409, 1), (0x0409, 6), (0x0804, 4)]);
    }
}
