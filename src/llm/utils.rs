//! Helpers for post-processing LLM output

const HTML_FENCE: &str = "```html";
const FENCE: &str = "```";

/// Strip a Markdown code fence wrapped around model output.
///
/// A ```` ```html ```` fence wins over a bare ```` ``` ```` fence. The text
/// between the opening fence and the next closing fence is returned trimmed.
/// Text without any fence is returned unmodified.
pub fn strip_code_fence(text: &str) -> String {
    let inner = text
        .split_once(HTML_FENCE)
        .or_else(|| text.split_once(FENCE))
        .map(|(_, rest)| rest);

    match inner {
        Some(rest) => rest.split(FENCE).next().unwrap_or_default().trim().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_fence() {
        let raw = "Here you go:\n```html\n<html><body>chart</body></html>\n```\nEnjoy!";
        assert_eq!(strip_code_fence(raw), "<html><body>chart</body></html>");
    }

    #[test]
    fn test_bare_fence() {
        let raw = "```\n<!DOCTYPE html><html></html>\n```";
        assert_eq!(strip_code_fence(raw), "<!DOCTYPE html><html></html>");
    }

    #[test]
    fn test_html_fence_preferred_over_earlier_bare_fence() {
        let raw = "```js\nx\n``` then ```html\n<p>y</p>\n```";
        assert_eq!(strip_code_fence(raw), "<p>y</p>");
    }

    #[test]
    fn test_unclosed_fence() {
        assert_eq!(strip_code_fence("```html\n<p>open</p>\n"), "<p>open</p>");
    }

    #[test]
    fn test_no_fence_is_untouched() {
        let raw = "  <html></html>\n";
        assert_eq!(strip_code_fence(raw), raw);
        assert_eq!(strip_code_fence("Google API key not provided"), "Google API key not provided");
    }
}
