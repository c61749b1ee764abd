//! Font metadata for merged fonts (names, weight, vendor, revision).

mod naming;
mod variant;

use anyhow::{Context, Result, bail};
use log::debug;
use read_fonts::{TableProvider, types::Tag};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{
        head::{Head, MacStyle},
        name::Name,
        os2::{Os2, SelectionFlags},
    },
    types::{Fixed, LongDateTime},
};

use hanmono_font_ops::{build_name_table, rewrite_font};

pub use naming::{
    Language, NAME_ID_COPYRIGHT, NAME_ID_DESCRIPTION, NAME_ID_FAMILY, NAME_ID_FULL_NAME,
    NAME_ID_MANUFACTURER, NAME_ID_POSTSCRIPT, NAME_ID_SUBFAMILY, NAME_ID_TYPOGRAPHIC_FAMILY,
    NAME_ID_UNIQUE_ID, NAME_ID_VERSION, NameEntry, NamingScheme, Sources,
};
pub use variant::Variant;

/// OS/2 `usWidthClass` for normal width
const WIDTH_CLASS_NORMAL: u16 = 5;

/// Seconds between the OpenType epoch (1904-01-01) and the Unix epoch
const SECONDS_1904_TO_1970: i64 = 2_082_844_800;

/// Rewrite the metadata of a merged font for one variant.
///
/// Every existing name record is replaced by the scheme's entries. OS/2 and
/// head are patched in place; all other tables are copied unchanged.
pub fn apply_metadata(
    data: &[u8],
    scheme: &NamingScheme,
    variant: &Variant,
    sources: Option<Sources>,
) -> Result<Vec<u8>> {
    let vendor = vendor_tag(&scheme.vendor_id)?;
    let revision = parse_revision(&scheme.version)?;
    let modified = now();

    let entries = scheme.entries(variant, sources);
    debug!("Writing {} name records for {variant}", entries.len());
    let name: Name =
        build_name_table(&entries.iter().map(NameEntry::to_name_string).collect::<Vec<_>>());

    rewrite_font(data, &[], |font, builder| {
        builder.add_table(&name)?;

        let head = font.head().context("Font has no head table")?;
        let mut head: Head = head.to_owned_table();
        head.mac_style = mac_style(head.mac_style, variant);
        head.font_revision = revision;
        head.modified = modified;
        builder.add_table(&head)?;

        if let Ok(os2) = font.os2() {
            let mut os2: Os2 = os2.to_owned_table();
            os2.s_family_class = 0;
            os2.us_weight_class = variant.os2_weight();
            os2.us_width_class = WIDTH_CLASS_NORMAL;
            os2.ach_vend_id = vendor;
            os2.fs_selection = fs_selection(os2.fs_selection, variant);
            builder.add_table(&os2)?;
        } else {
            debug!("Font has no OS/2 table, skipping weight and vendor");
        }

        Ok(())
    })
}

/// OS/2 vendor tag, padded with spaces
pub fn vendor_tag(vendor: &str) -> Result<Tag> {
    if vendor.len() > 4 || !vendor.is_ascii() {
        bail!("Invalid vendor ID '{vendor}': expected at most four ASCII characters");
    }
    let mut bytes = [b' '; 4];
    bytes[..vendor.len()].copy_from_slice(vendor.as_bytes());
    Ok(Tag::new(&bytes))
}

/// Parse a `major.minor` version into a `head.fontRevision` value
pub fn parse_revision(version: &str) -> Result<Fixed> {
    let value: f64 = version
        .trim()
        .parse()
        .with_context(|| format!("Invalid version '{version}'. Expected MAJOR.MINOR."))?;
    if !(0.0..32768.0).contains(&value) {
        bail!("Version '{version}' is out of range");
    }
    Ok(Fixed::from_f64(value))
}

fn now() -> LongDateTime {
    LongDateTime::new(chrono::Utc::now().timestamp() + SECONDS_1904_TO_1970)
}

/// RIBBI bits of `fsSelection` for a variant; other bits are kept
fn fs_selection(current: SelectionFlags, variant: &Variant) -> SelectionFlags {
    let ribbi = SelectionFlags::ITALIC.bits()
        | SelectionFlags::BOLD.bits()
        | SelectionFlags::REGULAR.bits();
    let mut bits = current.bits() & !ribbi;
    if variant.is_italic() {
        bits |= SelectionFlags::ITALIC.bits();
    }
    if variant.is_bold() {
        bits |= SelectionFlags::BOLD.bits();
    }
    if variant.is_regular() {
        bits |= SelectionFlags::REGULAR.bits();
    }
    SelectionFlags::from_bits_truncate(bits)
}

fn mac_style(current: MacStyle, variant: &Variant) -> MacStyle {
    let mut bits = current.bits() & !(MacStyle::BOLD.bits() | MacStyle::ITALIC.bits());
    if variant.is_bold() {
        bits |= MacStyle::BOLD.bits();
    }
    if variant.is_italic() {
        bits |= MacStyle::ITALIC.bits();
    }
    MacStyle::from_bits_truncate(bits)
}
