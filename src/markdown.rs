//! AI Response Markdown
//!
//! The AI endpoints answer in Markdown; the editor surface wants styled
//! HTML. Transforms the pulldown-cmark event stream so the generated HTML
//! carries inline styles that survive copy/paste into external editors.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Convert AI Markdown to styled HTML ready for the editor surface.
pub fn to_styled_html(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Inline variant (strips the outer <p> tags) for one-line corrections.
pub fn to_styled_html_inline(text: &str) -> String {
    let html = to_styled_html(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

/// Swap structural tags for inline-styled equivalents
fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut in_table_head = false;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let size = match level as usize {
                    1 => "1.3em",
                    2 => "1.15em",
                    _ => "1.05em",
                };
                events.push(Event::Html(CowStr::from(format!(
                    r#"<p style="font-weight: bold; font-size: {}; margin: 0.4em 0;">"#,
                    size
                ))));
            }
            Event::End(TagEnd::Heading(_)) => {
                events.push(Event::Html(CowStr::from("</p>")));
            }
            Event::Start(Tag::Table(_)) => {
                events.push(Event::Html(CowStr::from(
                    r#"<table style="border-collapse: collapse; width: 100%;">"#,
                )));
            }
            Event::Start(Tag::TableHead) => {
                in_table_head = true;
                events.push(Event::Start(Tag::TableHead));
            }
            Event::End(TagEnd::TableHead) => {
                in_table_head = false;
                events.push(Event::End(TagEnd::TableHead));
            }
            // Both ends are emitted by hand so the open/close tags agree
            Event::Start(Tag::TableCell) => {
                let tag = if in_table_head { "th" } else { "td" };
                events.push(Event::Html(CowStr::from(format!(
                    r#"<{} style="border: 1px solid #ccc; padding: 2px 6px;">"#,
                    tag
                ))));
            }
            Event::End(TagEnd::TableCell) => {
                let tag = if in_table_head { "</th>" } else { "</td>" };
                events.push(Event::Html(CowStr::from(tag)));
            }
            other => events.push(other),
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_becomes_styled_paragraph() {
        let html = to_styled_html("# Achados");
        assert!(html.contains("font-weight: bold"));
        assert!(html.contains("Achados"));
        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn test_bold_survives() {
        let html = to_styled_html("Fígado **normal**.");
        assert!(html.contains("<strong>normal</strong>"));
    }

    #[test]
    fn test_table_cells_open_and_close_with_the_same_tag() {
        let html = to_styled_html("| Col |\n| --- |\n| val |");
        assert!(html
            .contains(r#"<th style="border: 1px solid #ccc; padding: 2px 6px;">Col</th>"#));
        assert!(html
            .contains(r#"<td style="border: 1px solid #ccc; padding: 2px 6px;">val</td>"#));
    }

    #[test]
    fn test_inline_strips_paragraph() {
        let html = to_styled_html_inline("texto corrigido");
        assert_eq!(html, "texto corrigido");
    }
}
