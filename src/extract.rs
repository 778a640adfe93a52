//! Question extraction from raw study notes.
//!
//! Notes are split into sentence-sized fragments on `.`, `?`, `!`, and
//! newlines; each surviving fragment becomes one quiz prompt. A declarative
//! sentence is still a valid prompt (the player is asked to recall/confirm
//! it), so no grammatical filtering happens here.

/// Characters treated as sentence/line terminators. Runs of consecutive
/// terminators collapse to a single boundary.
const TERMINATORS: [char; 4] = ['.', '?', '!', '\n'];

/// Split raw notes into an ordered list of quiz prompts.
///
/// Pure and deterministic: identical input always yields identical output.
/// Returns an empty vector when the text contains no qualifying segment;
/// callers must treat that as "cannot proceed" and not start a battle.
///
/// Duplicate sentences in the source produce duplicate prompts; uniqueness
/// is not enforced.
pub fn extract_prompts(text: &str) -> Vec<String> {
    text.split(|c: char| TERMINATORS.contains(&c))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
