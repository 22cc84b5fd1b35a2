use regex::Regex;
use std::sync::LazyLock;

/// Prompt-injection and markup-injection heuristics, matched against the trimmed raw input.
///
/// A small fixed list meant to catch casual attempts, not a security boundary.
static INJECTION_PATTERNS: LazyLock<[Regex; 6]> = LazyLock::new(|| {
    [
        r"(?i)ignore\s+(?:all\s+)?previous\s+instructions",
        r"(?i)forget\s+everything",
        r"(?i)you\s+are\s+now",
        r"(?i)<\s*script",
        r"(?i)javascript\s*:",
        r"(?i)\bon\w+\s*=",
    ]
    .map(|pattern| Regex::new(pattern).expect("injection regex is valid"))
});

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script block regex is valid")
});

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup tag regex is valid"));

static JS_PROTOCOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("protocol regex is valid"));

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bon\w+\s*=").expect("event handler regex is valid"));

pub(crate) fn is_suspicious(text: &str) -> bool {
    INJECTION_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}

/// Strips script blocks, then remaining tags, then `javascript:` prefixes, then inline
/// event-handler attributes, and trims the result.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(text, "");
    let text = MARKUP_TAG.replace_all(&text, "");
    let text = JS_PROTOCOL.replace_all(&text, "");
    let text = EVENT_HANDLER.replace_all(&text, "");
    text.trim().to_owned()
}
