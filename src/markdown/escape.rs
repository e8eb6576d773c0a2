//! Pure markdown escaping utilities.
//!
//! These functions escape text for Markdown output and size the fences of
//! code blocks so arbitrary payloads stay inside them.

/// Escape special Markdown characters in text.
///
/// Escapes characters that have special meaning in Markdown:
/// - Backslash: `\\`
/// - Emphasis: `*`, `_`
/// - Links: `[`, `]`
/// - Code: `` ` ``
/// - Headings: `#` (only at line start)
/// - Tables: `|`
/// - HTML: `<`, `>`
/// - Images: `!` (when followed by `[`)
///
/// # Examples
///
/// ```
/// use cardmark::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
/// assert_eq!(escape_markdown("[link]"), "\\[link\\]");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let mut chars = text.chars().peekable();
    let mut at_line_start = true;

    while let Some(c) = chars.next() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' | '|' | '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            '#' if at_line_start => {
                result.push('\\');
                result.push(c);
            }
            '!' if chars.peek() == Some(&'[') => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
        at_line_start = c == '\n';
    }

    result
}

/// Calculate the fence length needed for a code block.
///
/// Runs of `fence_char` are counted per line and never carry across a line
/// break; `\r\n` and a lone `\r` both end a line. The result is one more than
/// the longest run, and at least 3.
///
/// # Examples
///
/// ```
/// use cardmark::markdown::calculate_fence_length;
///
/// // Normal content needs 3 backticks
/// assert_eq!(calculate_fence_length("let x = 1;", '`'), 3);
///
/// // Content with 3 backticks needs 4
/// assert_eq!(calculate_fence_length("```rust\ncode\n```", '`'), 4);
///
/// // Runs on different lines are not joined
/// assert_eq!(calculate_fence_length("``\n``", '`'), 3);
/// ```
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    let max_run = content
        .split(['\n', '\r'])
        .map(|line| longest_run(line, fence_char))
        .max()
        .unwrap_or(0);

    max_run.max(2) + 1
}

fn longest_run(line: &str, fence_char: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in line.chars() {
        if c == fence_char {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run
}

/// Escape `[` and `]` for use inside link or image text.
///
/// A bracket already preceded by a backslash in the input is left alone, so
/// applying this twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use cardmark::markdown::escape_brackets;
///
/// assert_eq!(escape_brackets("a [b] c"), "a \\[b\\] c");
/// assert_eq!(escape_brackets("already \\[ok\\]"), "already \\[ok\\]");
/// ```
pub fn escape_brackets(text: &str) -> String {
    let (escaped, _) = text.chars().fold(
        (String::with_capacity(text.len() + 2), None),
        |(mut out, prev), c| {
            if matches!(c, '[' | ']') && prev != Some('\\') {
                out.push('\\');
            }
            out.push(c);
            (out, Some(c))
        },
    );
    escaped
}
