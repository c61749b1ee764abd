//! post table merging

use read_fonts::{FontRef, TableProvider};
use write_fonts::tables::post::Post;

use crate::{Result, types::GlyphName};

/// A version 2.0 post table carrying the merged glyph names
///
/// Metric fields come from the base font.
pub fn merge_post(base: &FontRef, names: &[GlyphName]) -> Result<Post> {
    let base_post = base.post()?;

    let glyph_names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
    let mut post = Post::new_v2(glyph_names);
    post.italic_angle = base_post.italic_angle();
    post.underline_position = base_post.underline_position();
    post.underline_thickness = base_post.underline_thickness();
    post.is_fixed_pitch = base_post.is_fixed_pitch();
    post.min_mem_type42 = base_post.min_mem_type42();
    post.max_mem_type42 = base_post.max_mem_type42();
    post.min_mem_type1 = base_post.min_mem_type1();
    post.max_mem_type1 = base_post.max_mem_type1();

    Ok(post)
}
