//! Configuration constants for hanmono font builds.

/// Directory holding the input fonts (and, by default, the output).
pub const DEFAULT_FONT_DIR: &str = ".";

/// File extension of input and output fonts.
pub const FONT_EXTENSION: &str = "ttf";

/// File name prefix of the base (Latin) fonts.
pub const BASE_FONT_PREFIX: &str = "JetBrainsMonoNerdFontMono-";

/// File name prefix of the auxiliary (CJK) fonts.
pub const AUX_FONT_PREFIX: &str = "LXGWWenKaiMono-";

/// File name prefix of the generated fonts.
pub const OUTPUT_FONT_PREFIX: &str = "LXWenKaiJetBrMonoNF-";

/// PostScript name prefix of the generated fonts.
pub const POSTSCRIPT_PREFIX: &str = "LXWenKaiJetBrMonoNF-";

/// English family name, in two parts.
pub const FAMILY_EN: (&str, &str) = ("LXWenKai", "JetBr Nerd Mono");

/// Simplified Chinese family name, in two parts.
pub const FAMILY_ZH: (&str, &str) = ("霞鹜文楷", "JetBrains 等宽");

pub const MANUFACTURER: &str = "LXGW + Nerd Fonts";

/// OS/2 vendor ID.
pub const VENDOR_ID: &str = "LXGW";

pub const COPYRIGHT: &str = "Merged font";

/// Font version, written as "Version 1.0" and as `head.fontRevision`.
pub const VERSION: &str = "1.0";

/// Variants built when none are given.
pub const DEFAULT_VARIANTS: &[&str] = &["Light", "Medium", "Regular"];
