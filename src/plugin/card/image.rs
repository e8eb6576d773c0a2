//! Image cards → inline Markdown images.

use crate::converter::{Context, RenderStatus, UrlKind, Writer};
use crate::markdown::escape_brackets;
use crate::marker::strip_reserved;

use super::payload::ImagePayload;

/// Render a decoded `image` payload.
///
/// Defers on an invalid record or an empty `src`. Reserved markers in the
/// record are removed so the image stays on one line.
pub fn render(ctx: &Context<'_>, w: &mut Writer, payload: &str) -> RenderStatus {
    let data: ImagePayload = match serde_json::from_str(payload) {
        Ok(data) => data,
        Err(e) => {
            tracing::trace!(error = %e, "Invalid image payload");
            return RenderStatus::TryNext;
        }
    };

    let src = strip_reserved(&data.src);
    let src = src.trim();
    if src.is_empty() {
        tracing::trace!("Image card without src");
        return RenderStatus::TryNext;
    }
    let src = ctx.assemble_absolute_url(UrlKind::Image, src);
    let alt = escape_brackets(&single_line(&strip_reserved(&data.title)));

    w.write_str("![");
    w.write_str(&alt);
    w.write_str("](");
    w.write_str(&src);
    w.write_char(')');
    RenderStatus::Success
}

/// Replace each line break (`\n`, `\r\n` or `\r`) with one space.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{DomainResolver, Registry};
    use crate::dom::Dom;

    fn render_with(resolver: &DomainResolver, payload: &str) -> (RenderStatus, String) {
        let dom = Dom::new();
        let registry = Registry::new();
        let ctx = Context::new(&dom, &registry, resolver);
        let mut w = Writer::new();
        let status = render(&ctx, &mut w, payload);
        (status, w.into_string())
    }

    fn render_payload(payload: &str) -> (RenderStatus, String) {
        render_with(&DomainResolver::new(), payload)
    }

    #[test]
    fn test_basic_image() {
        assert_eq!(
            render_payload(r#"{"src":"https://example.com/image.png","title":"Test Image"}"#),
            (
                RenderStatus::Success,
                "![Test Image](https://example.com/image.png)".to_string()
            )
        );
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(render_payload(r#"{"src":"a.png"}"#).1, "![](a.png)");
    }

    #[test]
    fn test_title_newlines_become_spaces() {
        assert_eq!(
            render_payload(r#"{"src":"a.png","title":"line one\nline two\r\nthree"}"#).1,
            "![line one line two three](a.png)"
        );
    }

    #[test]
    fn test_markers_in_payload_are_removed() {
        assert_eq!(
            render_payload(r#"{"src":"a\ue001.png","title":"x\ue001y"}"#).1,
            "![xy](a.png)"
        );
        assert_eq!(
            render_payload(r#"{"src":"\ue001","title":"t"}"#).0,
            RenderStatus::TryNext
        );
    }

    #[test]
    fn test_title_brackets_are_escaped() {
        assert_eq!(
            render_payload(r#"{"src":"a.png","title":"[draft] v2 \\[ok\\]"}"#).1,
            "![\\[draft\\] v2 \\[ok\\]](a.png)"
        );
    }

    #[test]
    fn test_src_is_trimmed_and_resolved() {
        let resolver = DomainResolver::with_domain("https://cdn.example.com").unwrap();
        assert_eq!(
            render_with(&resolver, r#"{"src":"  /img/a.png \n","title":"a"}"#).1,
            "![a](https://cdn.example.com/img/a.png)"
        );
    }

    #[test]
    fn test_empty_src_defers() {
        assert_eq!(
            render_payload(r#"{"src":"   ","title":"t"}"#),
            (RenderStatus::TryNext, String::new())
        );
    }

    #[test]
    fn test_invalid_payload_defers() {
        assert_eq!(render_payload("[]").0, RenderStatus::TryNext);
        assert_eq!(render_payload(r#"{"title":"t"}"#).0, RenderStatus::TryNext);
    }
}
