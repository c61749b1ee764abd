//! End-to-end builds from synthesized Latin and CJK fonts

use std::{fs, path::Path};

use font_types::{FWord, Fixed, LongDateTime, Tag, UfWord};
use hanmono_core::{BuildConfig, Variant, build_all, describe_font, discover_variants};
use read_fonts::{FontRef, TableProvider, tables::glyf::CurvePoint, types::GlyphId};
use tempfile::tempdir;
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{Bbox, Contour, GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::{Flags, Head, MacStyle},
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        os2::{Os2, SelectionFlags},
        post::Post,
    },
};

/// A glyf font with one square glyph per codepoint
fn make_font(codepoints: &[char], advance: u16, weight_class: u16) -> Vec<u8> {
    let num_glyphs = codepoints.len() as u16 + 1;

    let mut glyf_builder = GlyfLocaBuilder::new();
    for _ in 0..num_glyphs {
        let contour: Contour = vec![
            CurvePoint { x: 0, y: 0, on_curve: true },
            CurvePoint { x: 400, y: 0, on_curve: true },
            CurvePoint { x: 400, y: 400, on_curve: true },
        ]
        .into();
        let glyph = Glyph::Simple(SimpleGlyph {
            bbox: Bbox { x_min: 0, y_min: 0, x_max: 400, y_max: 400 },
            contours: vec![contour],
            instructions: vec![],
        });
        glyf_builder.add_glyph(&glyph).unwrap();
    }
    let (glyf, loca, loca_format) = glyf_builder.build();

    let mappings: Vec<(char, GlyphId)> = codepoints
        .iter()
        .enumerate()
        .map(|(i, c)| (*c, GlyphId::new(i as u32 + 1)))
        .collect();
    let cmap = Cmap::from_mappings(mappings).expect("cmap");

    let head = Head {
        font_revision: Fixed::from_f64(2.0),
        checksum_adjustment: 0,
        magic_number: 0x5F0F3CF5,
        flags: Flags::empty(),
        units_per_em: 1000,
        created: LongDateTime::new(0),
        modified: LongDateTime::new(0),
        x_min: 0,
        y_min: 0,
        x_max: 400,
        y_max: 400,
        mac_style: MacStyle::empty(),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            write_fonts::tables::loca::LocaFormat::Short => 0,
            write_fonts::tables::loca::LocaFormat::Long => 1,
        },
    };

    let hhea = Hhea {
        ascender: FWord::new(800),
        descender: FWord::new(-200),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(advance),
        min_left_side_bearing: FWord::new(0),
        min_right_side_bearing: FWord::new(0),
        x_max_extent: FWord::new(400),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
    };

    let hmtx = Hmtx {
        h_metrics: (0..num_glyphs).map(|_| LongMetric { advance, side_bearing: 0 }).collect(),
        left_side_bearings: vec![],
    };

    let maxp = Maxp {
        num_glyphs,
        max_points: Some(3),
        max_contours: Some(1),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    };

    let names: Vec<String> = std::iter::once(".notdef".to_string())
        .chain(codepoints.iter().map(|c| format!("uni{:04X}", *c as u32)))
        .collect();
    let post = Post::new_v2(names.iter().map(String::as_str).collect::<Vec<_>>());

    let os2 = Os2 {
        x_avg_char_width: advance as i16,
        us_weight_class: weight_class,
        us_width_class: 5,
        fs_type: 0,
        y_subscript_x_size: 650,
        y_subscript_y_size: 600,
        y_subscript_x_offset: 0,
        y_subscript_y_offset: 75,
        y_superscript_x_size: 650,
        y_superscript_y_size: 600,
        y_superscript_x_offset: 0,
        y_superscript_y_offset: 350,
        y_strikeout_size: 50,
        y_strikeout_position: 300,
        s_family_class: 0,
        panose_10: [0; 10],
        ul_unicode_range_1: 0,
        ul_unicode_range_2: 0,
        ul_unicode_range_3: 0,
        ul_unicode_range_4: 0,
        ach_vend_id: Tag::new(b"NONE"),
        fs_selection: SelectionFlags::REGULAR,
        us_first_char_index: 0x20,
        us_last_char_index: 0x7E,
        s_typo_ascender: 800,
        s_typo_descender: -200,
        s_typo_line_gap: 0,
        us_win_ascent: 900,
        us_win_descent: 200,
        ul_code_page_range_1: Some(0),
        ul_code_page_range_2: Some(0),
        sx_height: Some(500),
        s_cap_height: Some(700),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(0),
        us_lower_optical_point_size: None,
        us_upper_optical_point_size: None,
    };

    let mut builder = FontBuilder::new();
    builder.add_table(&head).unwrap();
    builder.add_table(&hhea).unwrap();
    builder.add_table(&hmtx).unwrap();
    builder.add_table(&maxp).unwrap();
    builder.add_table(&cmap).unwrap();
    builder.add_table(&post).unwrap();
    builder.add_table(&glyf).unwrap();
    builder.add_table(&loca).unwrap();
    builder.add_table(&os2).unwrap();
    builder.build()
}

fn write_sources(dir: &Path, variant: &str) {
    let latin = make_font(&['A', 'B'], 600, 400);
    let cjk = make_font(&['A', '中', '文'], 1000, 400);
    fs::write(dir.join(format!("JetBrainsMonoNerdFontMono-{variant}.ttf")), latin).unwrap();
    fs::write(dir.join(format!("LXGWWenKaiMono-{variant}.ttf")), cjk).unwrap();
}

#[test]
fn test_build_light_and_regular() {
    let temp = tempdir().unwrap();
    let dir = temp.path();
    write_sources(dir, "Light");
    write_sources(dir, "Regular");

    let config = BuildConfig::in_dir(dir);
    let variants = discover_variants(&config).unwrap();
    assert_eq!(variants, vec![Variant::new("Light"), Variant::new("Regular")]);

    let result = build_all(&config, &variants);
    assert!(result.all_succeeded(), "{result:?}");

    let light = fs::read(dir.join("LXWenKaiJetBrMonoNF-Light.ttf")).unwrap();
    let summary = describe_font(&light).unwrap();
    assert_eq!(summary.glyph_count, 5);
    assert_eq!(summary.codepoint_count, 4);
    assert_eq!(summary.weight_class, Some(300));
    assert_eq!(summary.vendor.as_deref(), Some("LXGW"));
    assert_eq!(summary.postscript_name.as_deref(), Some("LXWenKaiJetBrMonoNF-Light"));
    assert_eq!(
        summary.names[&0x0409].family.as_deref(),
        Some("LXWenKai JetBr Nerd Mono Light")
    );
    assert_eq!(
        summary.names[&0x0804].typographic_family.as_deref(),
        Some("霞鹜文楷 JetBrains 等宽")
    );

    let regular = fs::read(dir.join("LXWenKaiJetBrMonoNF-Regular.ttf")).unwrap();
    let summary = describe_font(&regular).unwrap();
    assert_eq!(summary.weight_class, Some(400));
    assert_eq!(summary.names[&0x0409].family.as_deref(), Some("LXWenKai JetBr Nerd Mono"));
    assert_eq!(summary.names[&0x0409].typographic_family, None);

    let font = FontRef::new(&regular).unwrap();
    assert_eq!(font.head().unwrap().font_revision(), Fixed::from_f64(1.0));
    let cmap = font.cmap().unwrap();
    assert_eq!(cmap.map_codepoint('A'), Some(GlyphId::new(1)));
    assert_eq!(cmap.map_codepoint('中'), Some(GlyphId::new(3)));
}

#[test]
fn test_build_separate_output_dir() {
    let temp = tempdir().unwrap();
    let dir = temp.path();
    write_sources(dir, "Medium");

    let config = BuildConfig { output_dir: dir.join("dist"), ..BuildConfig::in_dir(dir) };
    let result = build_all(&config, &[Variant::new("Medium")]);
    assert!(result.ok_or_bail("Build").is_ok());
    assert!(dir.join("dist/LXWenKaiJetBrMonoNF-Medium.ttf").is_file());
}

#[test]
fn test_one_failing_variant_does_not_stop_others() {
    let temp = tempdir().unwrap();
    let dir = temp.path();
    write_sources(dir, "Light");
    fs::write(dir.join("JetBrainsMonoNerdFontMono-Medium.ttf"), b"not a font").unwrap();
    fs::write(dir.join("LXGWWenKaiMono-Medium.ttf"), b"not a font").unwrap();

    let config = BuildConfig::in_dir(dir);
    let result = build_all(&config, &[Variant::new("Light"), Variant::new("Medium")]);
    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failed, 1);
    assert!(result.ok_or_bail("Build").is_err());
    assert!(dir.join("LXWenKaiJetBrMonoNF-Light.ttf").is_file());
    assert!(!dir.join("LXWenKaiJetBrMonoNF-Medium.ttf").exists());
}
