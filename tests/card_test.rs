//! End-to-end conversion of documents containing editor cards.
//!
//! Card values below are copied from real editor exports, or built with
//! `encode_value` when the payload is easier to read as a struct.

use std::thread;

use cardmark::plugin::card::{CodeBlockPayload, ImagePayload, encode_value};
use cardmark::{Converter, convert_string};

fn code_card(mode: &str, code: &str) -> String {
    let value = encode_value(&CodeBlockPayload {
        mode: mode.to_string(),
        code: code.to_string(),
    })
    .unwrap();
    format!(r#"<card type="inline" name="codeblock" value="{value}"></card>"#)
}

fn image_card(src: &str, title: &str) -> String {
    let value = encode_value(&ImagePayload {
        src: src.to_string(),
        title: title.to_string(),
    })
    .unwrap();
    format!(r#"<card type="inline" name="image" value="{value}"></card>"#)
}

// ============================================================================
// Single cards
// ============================================================================

#[test]
fn test_code_block_card() {
    let input = r#"<card type="inline" name="codeblock" value="data:%7B%22mode%22%3A%22python%22%2C%22code%22%3A%22def%20hello()%3A%5Cn%20%20%20%20print(%5C%22Hello%5C%22)%22%7D"></card>"#;

    assert_eq!(
        convert_string(input).unwrap(),
        "```python\ndef hello():\n    print(\"Hello\")\n```"
    );
}

#[test]
fn test_json_code_block_card() {
    let input = r#"<card type="inline" name="codeblock" value="data:%7B%22mode%22%3A%22json%22%2C%22code%22%3A%22%7B%5Cn%20%20%5C%22name%5C%22%3A%20%5C%22test%5C%22%5Cn%7D%22%7D"></card>"#;

    assert_eq!(
        convert_string(input).unwrap(),
        "```json\n{\n  \"name\": \"test\"\n}\n```"
    );
}

#[test]
fn test_image_card() {
    let input = r#"<card type="inline" name="image" value="data:%7B%22src%22%3A%22https%3A//example.com/image.png%22%2C%22title%22%3A%22Test%20Image%22%7D"></card>"#;

    assert_eq!(
        convert_string(input).unwrap(),
        "![Test Image](https://example.com/image.png)"
    );
}

#[test]
fn test_code_with_triple_backticks_gets_longer_fence() {
    let input = code_card("markdown", "Example:\n```rust\nfn main() {}\n```\n");

    assert_eq!(
        convert_string(&input).unwrap(),
        "````markdown\nExample:\n```rust\nfn main() {}\n```\n````"
    );
}

#[test]
fn test_code_of_only_backticks() {
    let input = code_card("", "``````````");

    assert_eq!(
        convert_string(&input).unwrap(),
        "```````````\n``````````\n```````````"
    );
}

#[test]
fn test_code_block_keeps_blank_lines_and_indentation() {
    let input = code_card("py", "  indented\n\n\n\nspaced  \n\ttabbed");

    assert_eq!(
        convert_string(&input).unwrap(),
        "```py\n  indented\n\n\n\nspaced  \n\ttabbed\n```"
    );
}

#[test]
fn test_image_title_newline_becomes_space() {
    let input = image_card("https://example.com/a.png", "first\nsecond [draft]");

    assert_eq!(
        convert_string(&input).unwrap(),
        "![first second \\[draft\\]](https://example.com/a.png)"
    );
}

// ============================================================================
// Deferred cards
// ============================================================================

#[test]
fn test_unknown_card_renders_nothing() {
    let input = r#"<card type="inline" name="unknown" value="test"></card>"#;
    assert_eq!(convert_string(input).unwrap(), "");

    let input = r#"<card type="inline" name="mindmap" value="data:%7B%7D"></card>"#;
    assert_eq!(convert_string(input).unwrap(), "");
}

#[test]
fn test_value_without_prefix_renders_nothing() {
    for name in ["codeblock", "image"] {
        let input = format!(
            r#"<card name="{name}" value="%7B%22src%22%3A%22a.png%22%2C%22code%22%3A%22x%22%7D"></card>"#
        );
        assert_eq!(convert_string(&input).unwrap(), "", "card {name}");
    }
}

#[test]
fn test_corrupt_cards_do_not_stop_conversion() {
    let input = [
        "<p>start</p>",
        r#"<card name="codeblock" value="data:%7B%22code"></card>"#,
        r#"<card name="codeblock" value="data:%E0%A4%A"></card>"#,
        r#"<card name="image" value="data:%7B%22src%22%3A%22%20%22%7D"></card>"#,
        r#"<card value="data:%7B%7D"></card>"#,
        "<p>end</p>",
    ]
    .concat();

    assert_eq!(convert_string(&input).unwrap(), "start\n\nend");
}

#[test]
fn test_deferred_card_falls_back_to_its_children() {
    let input = r#"<p><card name="unknown" value="data:%7B%7D">fallback text</card></p>"#;
    assert_eq!(convert_string(input).unwrap(), "fallback text");
}

// ============================================================================
// Documents
// ============================================================================

#[test]
fn test_mixed_content() {
    let input = r#"
	<h1>标题</h1>
	<p>这是一段文本</p>
	<card type="inline" name="codeblock" value="data:%7B%22mode%22%3A%22go%22%2C%22code%22%3A%22package%20main%5Cn%5Cnfunc%20main()%20%7B%7D%22%7D"></card>
	<p>更多文本</p>
	<card type="inline" name="image" value="data:%7B%22src%22%3A%22https%3A//example.com/img.png%22%2C%22title%22%3A%22%22%7D"></card>
	"#;

    assert_eq!(
        convert_string(input).unwrap(),
        "标题\n\n这是一段文本\n\n```go\npackage main\n\nfunc main() {}\n```\n\n更多文本\n\n![](https://example.com/img.png)"
    );
}

#[test]
fn test_image_inside_paragraph_stays_inline() {
    let input = format!("<p>see {} here</p>", image_card("a.png", "A"));
    assert_eq!(convert_string(&input).unwrap(), "see ![A](a.png) here");
}

#[test]
fn test_relative_image_with_domain() {
    let converter = Converter::builder()
        .with_default_plugins()
        .domain("https://www.yuque.com")
        .build()
        .unwrap();

    let input = image_card("/attachments/a.png", "A");
    assert_eq!(
        converter.convert_string(&input),
        "![A](https://www.yuque.com/attachments/a.png)"
    );
}

#[test]
fn test_reserved_markers_in_input_are_dropped() {
    let input = "<p>a\u{E001}b</p>";
    assert_eq!(convert_string(input).unwrap(), "ab");
}

#[test]
fn test_reserved_markers_from_character_references_are_dropped() {
    assert_eq!(convert_string("<p>a&#xE001;b</p>").unwrap(), "ab");
    assert_eq!(convert_string("<p>a&#57345;b</p>").unwrap(), "ab");
}

#[test]
fn test_reserved_markers_in_card_payloads_are_dropped() {
    // Percent-encoded as %EE%80%81 by encode_value.
    let input = image_card("a.png", "x\u{E001}y");
    assert_eq!(convert_string(&input).unwrap(), "![xy](a.png)");

    let input = code_card("", "a\u{E001}b");
    assert_eq!(convert_string(&input).unwrap(), "```\nab\n```");

    // The record spells the marker as a JSON escape: "title":"x\ue001y"
    let input = r#"<card name="image" value="data:%7B%22src%22%3A%22a.png%22%2C%22title%22%3A%22x%5Cue001y%22%7D"></card>"#;
    assert_eq!(convert_string(input).unwrap(), "![xy](a.png)");
}

#[test]
fn test_parallel_conversion() {
    let converter = Converter::builder().with_default_plugins().build().unwrap();
    let documents: Vec<_> = (0..8)
        .map(|i| code_card("txt", &format!("line {i}\n```\nend")))
        .collect();

    let converter = &converter;
    let results: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = documents
            .iter()
            .map(|doc| s.spawn(move || converter.convert_string(doc)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, result) in results.iter().enumerate() {
        assert_eq!(result, &format!("````txt\nline {i}\n```\nend\n````"));
    }
}
