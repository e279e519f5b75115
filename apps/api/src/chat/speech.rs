use std::sync::OnceLock;

use regex::Regex;

/// Speech features available to the chat client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechCapabilities {
    /// Voice input (speech-to-text).
    pub recognition: bool,
    /// Spoken replies (text-to-speech).
    pub synthesis: bool,
}

impl Default for SpeechCapabilities {
    fn default() -> Self {
        Self {
            recognition: true,
            synthesis: true,
        }
    }
}

impl SpeechCapabilities {
    /// Plain text to narrate for `reply`, or `None` when synthesis is off.
    pub fn narration(&self, reply: &str) -> Option<String> {
        self.synthesis.then(|| markdown_to_plain_text(reply))
    }
}

struct MarkdownPatterns {
    heading: Regex,
    bullet: Regex,
    numbered: Regex,
    bold: Regex,
    italic: Regex,
}

fn patterns() -> &'static MarkdownPatterns {
    static PATTERNS: OnceLock<MarkdownPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MarkdownPatterns {
        heading: Regex::new(r"(?m)^#+[ \t]+").expect("valid heading pattern"),
        bullet: Regex::new(r"(?m)^[ \t]*[*\-][ \t]+").expect("valid bullet pattern"),
        numbered: Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").expect("valid numbered pattern"),
        bold: Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern"),
        italic: Regex::new(r"\*(.*?)\*").expect("valid italic pattern"),
    })
}

/// Strips headings, bullet and numbered list markers, bold and italic emphasis.
pub fn markdown_to_plain_text(markdown: &str) -> String {
    let p = patterns();
    let text = p.heading.replace_all(markdown, "");
    let text = p.bullet.replace_all(&text, "");
    let text = p.numbered.replace_all(&text, "");
    let text = p.bold.replace_all(&text, "$1");
    p.italic.replace_all(&text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_headings_and_lists() {
        let md = "## Next steps\n- Learn **SQL**\n* Build a *portfolio*\n1. Apply";
        assert_eq!(
            markdown_to_plain_text(md),
            "Next steps\nLearn SQL\nBuild a portfolio\nApply"
        );
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let text = "Salary ranges vary by city.";
        assert_eq!(markdown_to_plain_text(text), text);
    }

    #[test]
    fn test_narration_respects_synthesis_flag() {
        let off = SpeechCapabilities {
            recognition: true,
            synthesis: false,
        };
        assert_eq!(off.narration("**hi**"), None);
        assert_eq!(
            SpeechCapabilities::default().narration("**hi**").as_deref(),
            Some("hi")
        );
    }
}
