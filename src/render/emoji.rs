//! `:shortcode:` emoji substitution
//!
//! Only the codes the deck uses plus a handful of common ones. Unknown codes
//! are left as written.

use std::borrow::Cow;

use regex::{Captures, Regex};

fn shortcode() -> &'static Regex {
    lazy_static::lazy_static! {
        static ref REGEX: Regex = Regex::new(r":([a-z0-9_+\-]+):").unwrap();
    }
    &REGEX
}

/// Emoji for a shortcode without the surrounding colons
pub fn lookup(code: &str) -> Option<&'static str> {
    let emoji = match code {
        "star-struck" | "star_struck" => "🤩",
        "100" => "💯",
        "stuck_out_tongue_winking_eye" => "😜",
        "triumph" => "😤",
        "floppy_disk" => "💾",
        "sunglasses" => "😎",
        "heavy_check_mark" => "✔",
        "white_check_mark" => "✅",
        "x" => "❌",
        "police_car_light" | "rotating_light" => "🚨",
        "arrow_down_small" => "🔽",
        "smiley" => "😃",
        "thumbs_up" | "+1" => "👍",
        "rocket" => "🚀",
        "crab" => "🦀",
        "sparkles" => "✨",
        "warning" => "⚠",
        "fire" => "🔥",
        "tada" => "🎉",
        "goose" => "🪿",
        _ => return None,
    };
    Some(emoji)
}

/// Replace every known `:code:` in `text`
pub fn replace(text: &str) -> Cow<'_, str> {
    shortcode().replace_all(text, |caps: &Captures| {
        lookup(&caps[1]).map_or_else(|| caps[0].to_string(), ToString::to_string)
    })
}
