//! Merge adjacent text fragments into logical copy lines.
//!
//! Designers often split one piece of copy across several text layers: a
//! price and its billing period, or a button label broken over two layers.
//! [`combine_fragments`] makes a single left-to-right pass with one fragment
//! of lookahead and glues such pairs back together.
//!
//! Rules, first match wins at each position:
//! 1. blank fragment: dropped
//! 2. `$<amount>` followed by `/<period>`: joined with no separator
//! 3. two short labels forming (part of) a known button phrase: joined with a space
//! 4. anything else: emitted trimmed, on its own

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Multi-word UI phrases that are commonly split across layers.
pub const BUTTON_PHRASES: &[&str] = &["Get Started", "Learn More", "Sign Up", "Add to Cart", "See all"];

/// Longest label (in characters) eligible for button-phrase joining.
const SHORT_LABEL_MAX_CHARS: usize = 10;

/// Matches a bare dollar amount such as `$14` or `$14.99`.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\d+\.?\d*$").expect("price regex"));

/// Combine raw fragments into copy lines, preserving order.
pub fn combine_fragments<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    let mut combined = Vec::with_capacity(fragments.len());
    let mut i = 0;

    while i < fragments.len() {
        let current = fragments[i].as_ref().trim();
        let next = fragments.get(i + 1).map(|s| s.as_ref().trim());
        i += 1;

        if current.is_empty() {
            continue;
        }

        if let Some(next) = next {
            if is_price(current) && next.starts_with('/') {
                combined.push(format!("{current}{next}"));
                i += 1;
                continue;
            }

            if is_short_label(current) && is_short_label(next) {
                let phrase = format!("{current} {next}");
                if is_button_phrase(&phrase) {
                    combined.push(phrase);
                    i += 1;
                    continue;
                }
            }
        }

        combined.push(current.to_string());
    }

    debug!(
        fragments = fragments.len(),
        lines = combined.len(),
        "fragments combined"
    );

    combined
}

fn is_price(text: &str) -> bool {
    PRICE_RE.is_match(text)
}

fn is_short_label(text: &str) -> bool {
    text.chars().count() <= SHORT_LABEL_MAX_CHARS && !text.contains('.') && !text.starts_with('$')
}

/// Case-insensitive containment: the candidate only has to appear somewhere
/// inside a known phrase, so `"to Cart"` is accepted as well as `"Add to Cart"`.
fn is_button_phrase(candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    BUTTON_PHRASES
        .iter()
        .any(|phrase| phrase.to_lowercase().contains(&candidate))
}
