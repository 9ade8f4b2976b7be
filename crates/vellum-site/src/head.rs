//! Head injection list assembly.

use vellum_renderer::HeadTag;

/// Declared head tags followed by extension head tags.
///
/// Order is preserved. An extension tag whose `src` matches a declared tag's
/// `src` is dropped so a script pinned in configuration is not loaded twice.
#[must_use]
pub fn assemble_head(declared: &[HeadTag], extension: Vec<HeadTag>) -> Vec<HeadTag> {
    let mut head = declared.to_vec();
    for tag in extension {
        let duplicate = tag
            .attr("src")
            .is_some_and(|src| declared.iter().any(|d| d.attr("src") == Some(src)));
        if duplicate {
            tracing::debug!(tag = %tag.tag, src = ?tag.attr("src"), "Skipping duplicate head tag");
            continue;
        }
        head.push(tag);
    }
    head
}
