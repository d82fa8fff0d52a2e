//! Embed Size Fitting
//!
//! Enforces Discord's hard embed limits deterministically. `fit_embed` is
//! pure and total: it always produces a compliant embed, degrading content
//! instead of failing. Priority order when over the combined ceiling:
//! title (carries the verdict) > leading fields (primary identity) >
//! trailing fields > description.
//!
//! All limits are counted in characters, not bytes.

use crate::embed::Embed;

pub const TITLE_LIMIT: usize = 256;
pub const DESCRIPTION_LIMIT: usize = 4096;
pub const FIELD_NAME_LIMIT: usize = 256;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const MAX_FIELDS: usize = 25;
/// Combined ceiling across title, description, and all field names/values.
pub const TOTAL_LIMIT: usize = 6000;
/// Appended on truncation; counts toward the limit it fits into.
pub const TRUNCATION_MARKER: char = '…';

/// Produce a compliant copy of the embed.
///
/// Idempotent: an already-compliant embed passes through unchanged.
pub fn fit_embed(mut embed: Embed) -> Embed {
    embed.title = embed.title.map(|t| truncate_chars(t, TITLE_LIMIT));
    embed.description = embed
        .description
        .map(|d| truncate_chars(d, DESCRIPTION_LIMIT));

    for field in &mut embed.fields {
        field.name = truncate_chars(std::mem::take(&mut field.name), FIELD_NAME_LIMIT);
        field.value = truncate_chars(std::mem::take(&mut field.value), FIELD_VALUE_LIMIT);
    }

    // Trailing fields carry the least context; earlier ones keep priority.
    embed.fields.truncate(MAX_FIELDS);

    while embed_text_len(&embed) > TOTAL_LIMIT && !embed.fields.is_empty() {
        embed.fields.pop();
    }

    // With per-part limits already applied this only triggers for extreme
    // descriptions; the title is never touched here.
    let over = embed_text_len(&embed).saturating_sub(TOTAL_LIMIT);
    if over > 0 {
        if let Some(description) = embed.description.take() {
            let budget = description.chars().count().saturating_sub(over);
            embed.description = Some(truncate_chars(description, budget));
        }
    }

    embed
}

/// Combined character count of title, description, and all field
/// names/values.
pub fn embed_text_len(embed: &Embed) -> usize {
    let opt_len = |s: &Option<String>| s.as_deref().map_or(0, |s| s.chars().count());
    opt_len(&embed.title)
        + opt_len(&embed.description)
        + embed
            .fields
            .iter()
            .map(|f| f.name.chars().count() + f.value.chars().count())
            .sum::<usize>()
}

/// Truncate to at most `limit` characters. A truncated result is exactly
/// `limit` characters long and ends in the marker.
fn truncate_chars(s: String, limit: usize) -> String {
    if s.chars().count() <= limit {
        return s;
    }
    let mut out: String = s.chars().take(limit.saturating_sub(1)).collect();
    out.push(TRUNCATION_MARKER);
    out
}
