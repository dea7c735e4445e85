//! Code-block segmentation for message rendering
//!
//! Replies from the advisor service are free-form text with optional
//! fenced code blocks. The renderer gets the message pre-split into an
//! ordered list of plain and code segments; the raw code body is also
//! what a copy action receives.

/// One rendered piece of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Prose outside any code fence
    Plain(String),
    /// A fenced code block
    Code {
        /// Language tag, `"plaintext"` when the fence carried none
        language: String,
        /// Block body with surrounding whitespace trimmed
        body: String,
    },
}

const FENCE: &str = "```";
const DEFAULT_LANGUAGE: &str = "plaintext";

struct Opener<'a> {
    start: usize,
    body_start: usize,
    language: &'a str,
}

/// Split a message into plain-text and fenced-code segments.
///
/// A fence opens with three backticks, an optional language tag and a
/// newline, and closes at the next three backticks. The first closer
/// wins; fences do not nest. An opener that never closes is not a code
/// block, its text stays in the plain stream. Plain slices are emitted
/// even when empty, so a message that is a single code block still
/// yields a leading and a trailing plain segment.
pub fn segments(content: &str) -> Vec<Segment> {
    let mut parts = Vec::new();
    let mut cursor = 0;
    let mut search = 0;

    while let Some(opener) = find_opener(content, search) {
        let close = match content[opener.body_start..].find(FENCE) {
            Some(offset) => opener.body_start + offset,
            // No closing fence ahead means no later block can open either
            None => break,
        };

        parts.push(Segment::Plain(content[cursor..opener.start].to_string()));
        parts.push(Segment::Code {
            language: opener.language.to_string(),
            body: content[opener.body_start..close].trim().to_string(),
        });

        cursor = close + FENCE.len();
        search = cursor;
    }

    parts.push(Segment::Plain(content[cursor..].to_string()));
    parts
}

/// Find the next well-formed fence opening at or after `from`.
///
/// The shape is strict: three backticks, an optional ASCII word tag,
/// then a bare `\n`. A candidate failing the shape restarts the search
/// one byte further, so a run of four backticks can still open a fence
/// at its second backtick.
fn find_opener(content: &str, mut from: usize) -> Option<Opener<'_>> {
    let bytes = content.as_bytes();

    while let Some(offset) = content[from..].find(FENCE) {
        let start = from + offset;
        let tag_start = start + FENCE.len();

        let mut tag_end = tag_start;
        while tag_end < bytes.len()
            && (bytes[tag_end].is_ascii_alphanumeric() || bytes[tag_end] == b'_')
        {
            tag_end += 1;
        }

        if bytes.get(tag_end) == Some(&b'\n') {
            let language = if tag_end == tag_start {
                DEFAULT_LANGUAGE
            } else {
                &content[tag_start..tag_end]
            };
            return Some(Opener {
                start,
                body_start: tag_end + 1,
                language,
            });
        }

        from = start + 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Segment {
        Segment::Plain(text.to_string())
    }

    fn code(language: &str, body: &str) -> Segment {
        Segment::Code {
            language: language.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_plain_text_only() {
        assert_eq!(segments("hello world"), vec![plain("hello world")]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(segments(""), vec![plain("")]);
    }

    #[test]
    fn test_block_between_text() {
        let parts = segments("a ```js\nconsole.log(1)\n``` b");
        assert_eq!(
            parts,
            vec![plain("a "), code("js", "console.log(1)"), plain(" b")]
        );
    }

    #[test]
    fn test_unterminated_fence_stays_plain() {
        let parts = segments("x ```py\nprint(1)");
        assert_eq!(parts, vec![plain("x ```py\nprint(1)")]);
    }

    #[test]
    fn test_language_defaults_to_plaintext() {
        let parts = segments("```\ncode here\n```");
        assert_eq!(
            parts,
            vec![plain(""), code("plaintext", "code here"), plain("")]
        );
    }

    #[test]
    fn test_body_is_trimmed() {
        let parts = segments("```rust\n\n  let x = 1;\n\n```");
        assert_eq!(parts[1], code("rust", "let x = 1;"));
    }

    #[test]
    fn test_empty_block_body() {
        let parts = segments("```\n\n```");
        assert_eq!(parts, vec![plain(""), code("plaintext", ""), plain("")]);
    }

    #[test]
    fn test_multiple_blocks() {
        let parts = segments("one ```a\nfirst\n``` two ```b\nsecond\n``` three");
        assert_eq!(
            parts,
            vec![
                plain("one "),
                code("a", "first"),
                plain(" two "),
                code("b", "second"),
                plain(" three"),
            ]
        );
    }

    #[test]
    fn test_first_closer_wins() {
        let parts = segments("```a\nx```y```");
        assert_eq!(parts, vec![plain(""), code("a", "x"), plain("y```")]);
    }

    #[test]
    fn test_symbol_tag_is_not_a_fence() {
        // "c++" is not a word tag, so the fence never opens
        let parts = segments("```c++\ncode\n```");
        assert_eq!(parts, vec![plain("```c++\ncode\n```")]);
    }

    #[test]
    fn test_crlf_fence_is_not_recognized() {
        let parts = segments("```js\r\ncode\r\n```");
        assert_eq!(parts, vec![plain("```js\r\ncode\r\n```")]);
    }

    #[test]
    fn test_extra_backtick_opens_one_in() {
        let parts = segments("````rust\nlet y = 2;\n```");
        assert_eq!(parts, vec![plain("`"), code("rust", "let y = 2;"), plain("")]);
    }

    #[test]
    fn test_underscore_language_tag() {
        let parts = segments("```obj_c\nid x;\n```");
        assert_eq!(parts[1], code("obj_c", "id x;"));
    }
}
