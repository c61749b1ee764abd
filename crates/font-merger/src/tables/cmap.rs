//! cmap reading and building

use std::collections::BTreeMap;

use read_fonts::{
    FontRef, TableProvider,
    tables::cmap::{Cmap as ReadCmap, CmapSubtable, PlatformId},
};
use write_fonts::tables::cmap::{
    Cmap, Cmap12, CmapSubtable as WriteCmapSubtable, EncodingRecord,
    PlatformId as WritePlatformId, SequentialMapGroup,
};

use crate::{
    MergeError, Result,
    types::{Codepoint, GlyphId, MegaGlyphId, Source},
};

/// Read the Unicode mappings of a font from its best subtable
///
/// Mappings to `.notdef` are skipped. A codepoint appears at most once.
pub fn read_mappings(font: &FontRef, source: Source) -> Result<BTreeMap<Codepoint, GlyphId>> {
    let cmap = font
        .cmap()
        .map_err(|_| MergeError::MissingTable { table: "cmap", font: source })?;

    let mut mappings = BTreeMap::new();
    if let Some(subtable) = find_best_subtable(&cmap) {
        for (codepoint, gid) in iter_subtable(&subtable) {
            mappings.entry(codepoint).or_insert(gid);
        }
    }
    Ok(mappings)
}

/// Build the merged cmap from sorted codepoint mappings
///
/// Only format 12 is written, under both the Unicode (0, 4) and the Windows
/// (3, 10) encodings. A CJK repertoire overflows the segment arithmetic of
/// format 4, so no BMP-only subtable is emitted.
pub fn build_cmap(mappings: &BTreeMap<Codepoint, MegaGlyphId>) -> Cmap {
    let groups = sequential_groups(mappings.iter().map(|(cp, gid)| (cp.to_u32(), gid.to_u32())));
    let cmap12 = Cmap12 { language: 0, groups };

    let unicode = WriteCmapSubtable::Format12(cmap12.clone());
    let windows = WriteCmapSubtable::Format12(cmap12);
    Cmap::new(vec![
        EncodingRecord::new(WritePlatformId::Unicode, 4, unicode),
        EncodingRecord::new(WritePlatformId::Windows, 10, windows),
    ])
}

/// Group runs of consecutive codepoints mapping to consecutive glyph IDs
fn sequential_groups(mappings: impl IntoIterator<Item = (u32, u32)>) -> Vec<SequentialMapGroup> {
    let mut groups = Vec::new();
    let mut current: Option<(u32, u32, u32)> = None;

    for (cp, gid) in mappings {
        current = match current {
            Some((start_cp, end_cp, start_gid))
                if cp == end_cp + 1 && gid == start_gid + (cp - start_cp) =>
            {
                Some((start_cp, cp, start_gid))
            }
            Some((start_cp, end_cp, start_gid)) => {
                groups.push(SequentialMapGroup::new(start_cp, end_cp, start_gid));
                Some((cp, cp, gid))
            }
            None => Some((cp, cp, gid)),
        };
    }

    if let Some((start_cp, end_cp, start_gid)) = current {
        groups.push(SequentialMapGroup::new(start_cp, end_cp, start_gid));
    }

    groups
}

/// Prefer a full-repertoire format 12 subtable, then a BMP format 4, then anything
fn find_best_subtable<'a>(cmap: &'a ReadCmap<'a>) -> Option<CmapSubtable<'a>> {
    let records = cmap.encoding_records();
    let is_unicode = |platform: PlatformId, encoding: u16, windows_encoding: u16| {
        platform == PlatformId::Unicode
            || (platform == PlatformId::Windows && encoding == windows_encoding)
    };

    let full = records.iter().find_map(|record| {
        if !is_unicode(record.platform_id(), record.encoding_id(), 10) {
            return None;
        }
        record
            .subtable(cmap.offset_data())
            .ok()
            .filter(|s| matches!(s, CmapSubtable::Format12(_)))
    });

    full.or_else(|| {
        records.iter().find_map(|record| {
            if !is_unicode(record.platform_id(), record.encoding_id(), 1) {
                return None;
            }
            record
                .subtable(cmap.offset_data())
                .ok()
                .filter(|s| matches!(s, CmapSubtable::Format4(_)))
        })
    })
    .or_else(|| records.iter().find_map(|r| r.subtable(cmap.offset_data()).ok()))
}

fn iter_subtable(subtable: &CmapSubtable) -> Vec<(Codepoint, GlyphId)> {
    let mut mappings = Vec::new();

    match subtable {
        CmapSubtable::Format4(f4) => {
            let end_codes = f4.end_code();
            let start_codes = f4.start_code();
            let id_deltas = f4.id_delta();
            let id_range_offsets = f4.id_range_offsets();
            let glyph_id_array = f4.glyph_id_array();
            let seg_count = f4.seg_count_x2() as usize / 2;

            for seg in 0..seg_count {
                let start = start_codes.get(seg).map(|v| v.get()).unwrap_or(0xFFFF);
                let end = end_codes.get(seg).map(|v| v.get()).unwrap_or(0xFFFF);
                let delta = id_deltas.get(seg).map(|v| v.get()).unwrap_or(0);
                let range_offset = id_range_offsets.get(seg).map(|v| v.get()).unwrap_or(0);

                if start == 0xFFFF || start > end {
                    continue;
                }

                for cp in start..=end {
                    let raw = if range_offset == 0 {
                        cp
                    } else {
                        let index = (range_offset as usize / 2 + (cp - start) as usize)
                            .checked_sub(seg_count - seg);
                        match index.and_then(|i| glyph_id_array.get(i)).map(|g| g.get()) {
                            Some(0) | None => continue,
                            Some(gid) => gid,
                        }
                    };
                    let gid = raw.wrapping_add(delta as u16);
                    if gid != 0 {
                        mappings.push((Codepoint::new(cp as u32), GlyphId::new(gid)));
                    }
                }
            }
        }
        CmapSubtable::Format12(f12) => {
            for group in f12.groups() {
                let start_gid = group.start_glyph_id();
                for cp in group.start_char_code()..=group.end_char_code() {
                    let gid = start_gid + (cp - group.start_char_code());
                    if gid != 0 && gid <= u16::MAX as u32 {
                        mappings.push((Codepoint::new(cp), GlyphId::new(gid as u16)));
                    }
                }
            }
        }
        CmapSubtable::Format6(f6) => {
            let first = f6.first_code() as u32;
            for (i, gid) in f6.glyph_id_array().iter().enumerate() {
                let gid = gid.get();
                if gid != 0 {
                    mappings.push((Codepoint::new(first + i as u32), GlyphId::new(gid)));
                }
            }
        }
        _ => {}
    }

    mappings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_groups() {
        let groups = sequential_groups([(0x41, 1), (0x42, 2), (0x43, 3), (0x45, 4), (0x46, 9)]);
        let spans: Vec<(u32, u32, u32)> = groups
            .iter()
            .map(|g| (g.start_char_code, g.end_char_code, g.start_glyph_id))
            .collect();
        assert_eq!(spans, vec![(0x41, 0x43, 1), (0x45, 0x45, 4), (0x46, 0x46, 9)]);
    }

    #[test]
    fn test_sequential_groups_empty() {
        assert!(sequential_groups([]).is_empty());
    }
}
