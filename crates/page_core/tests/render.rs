use page_core::{escape_html, format_content, Avatar, ErrorNode, MessageRenderer, Role};
use pretty_assertions::assert_eq;
use scraper::{Html, Selector};

#[test]
fn escapes_all_five_markup_characters() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );
}

#[test]
fn ampersand_is_escaped_once() {
    assert_eq!(escape_html("&lt;"), "&amp;lt;");
    assert_eq!(escape_html("<"), "&lt;");
}

#[test]
fn newlines_become_breaks_after_escaping() {
    assert_eq!(format_content("a < b\nc"), "a &lt; b<br>c");
    // A literal "<br>" typed by the user stays text.
    assert_eq!(format_content("<br>\n"), "&lt;br&gt;<br>");
}

#[test]
fn role_selects_layout_but_not_escaping() {
    let renderer = MessageRenderer::new("AB");
    let user = renderer.render(Role::User, "<b>hi</b>");
    let assistant = renderer.render(Role::Assistant, "<b>hi</b>");

    assert_eq!(user.body_html, assistant.body_html);
    assert_eq!(user.avatar, Avatar::Initials("AB".to_string()));
    assert_eq!(assistant.avatar, Avatar::AssistantBadge);
    assert_ne!(user.wrapper_class, assistant.wrapper_class);
    assert!(user.wrapper_class.contains("flex-row-reverse"));
}

#[test]
fn user_initials_are_escaped() {
    let renderer = MessageRenderer::new("<i>");
    let node = renderer.render(Role::User, "x");
    assert_eq!(node.avatar, Avatar::Initials("&lt;i&gt;".to_string()));
}

#[test]
fn rendered_markup_never_contains_injected_elements() {
    let renderer = MessageRenderer::new("<script>alert(1)</script>");
    let hostile = "<script>alert('x')</script>\n<img src=x onerror=\"alert(1)\">";

    for role in [Role::User, Role::Assistant] {
        let html = renderer.render(role, hostile).to_html();
        let fragment = Html::parse_fragment(&html);

        for tag in ["script", "img"] {
            let selector = Selector::parse(tag).unwrap();
            assert_eq!(fragment.select(&selector).count(), 0, "{tag} injected for {role}");
        }
        let breaks = Selector::parse("br").unwrap();
        assert_eq!(fragment.select(&breaks).count(), 1);

        let text: String = fragment.root_element().text().collect();
        assert!(text.contains("<script>alert('x')</script>"));
    }
}

#[test]
fn error_node_is_plain_text() {
    let node = ErrorNode::new("<b>boom</b>");
    assert_eq!(node.text, "<b>boom</b>");

    let fragment = Html::parse_fragment(&node.to_html());
    let bold = Selector::parse("b").unwrap();
    assert_eq!(fragment.select(&bold).count(), 0);
    assert!(node.class.contains("text-red-200"));
}
