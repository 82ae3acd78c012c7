use std::collections::HashSet;
use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

static DISABLE: LazyLock<Regex> = LazyLock::new(|| directive("disable"));
static ENABLE: LazyLock<Regex> = LazyLock::new(|| directive("enable"));
static DISABLE_LINE: LazyLock<Regex> = LazyLock::new(|| directive("disable-line"));
static DISABLE_NEXT_LINE: LazyLock<Regex> = LazyLock::new(|| directive("disable-next-line"));

/// `<!-- markdown-link-check-<name> -->`, with any whitespace inside the
/// comment markers
fn directive(name: &str) -> Regex {
    Regex::new(&format!(r"<!--\s*markdown-link-check-{name}\s*-->"))
        .expect("disable comment regex should be valid")
}

/// Extract link and image destinations from a Markdown string, in document
/// order and without duplicates.
///
/// Unless `honor_disable_comments` is `false`, links inside regions switched
/// off by `markdown-link-check-disable` comments are skipped.
pub(crate) fn extract_links(markdown: &str, honor_disable_comments: bool) -> Vec<String> {
    let input = if honor_disable_comments {
        strip_disabled(markdown)
    } else {
        markdown.to_string()
    };

    let mut seen = HashSet::new();
    Parser::new(&input)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. }) => {
                Some(dest_url.to_string())
            }
            _ => None,
        })
        .filter(|link| !link.is_empty() && seen.insert(link.clone()))
        .collect()
}

/// Anchors of all headings in a Markdown string, slugified the way GitHub
/// renders them (`## Getting Started` becomes `getting-started`).
pub(crate) fn heading_anchors(markdown: &str) -> HashSet<String> {
    let mut anchors = HashSet::new();
    let mut heading: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) => heading = Some(String::new()),
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = heading.take() {
                    anchors.insert(slugify(&text));
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = heading.as_mut() {
                    heading.push_str(&text);
                }
            }
            _ => {}
        }
    }
    anchors
}

fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// Remove the text covered by disable comments.
///
/// A `disable` comment switches checking off from the comment onward and an
/// `enable` comment switches it back on right after the comment, even in the
/// middle of a line. `disable-line` and `disable-next-line` cover whole lines.
/// Removed lines are kept as empty lines so the rest of the document parses
/// the same way.
fn strip_disabled(markdown: &str) -> String {
    let mut disabled = false;
    let mut skip_next = false;

    markdown
        .lines()
        .map(|line| {
            let skip_this = std::mem::take(&mut skip_next);
            if DISABLE_NEXT_LINE.is_match(line) {
                skip_next = true;
            }
            if skip_this || DISABLE_LINE.is_match(line) {
                // Keep toggles on a skipped line in effect
                strip_regions(line, &mut disabled);
                return String::new();
            }
            strip_regions(line, &mut disabled)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The parts of `line` outside disabled regions; `disabled` carries the
/// state across lines
fn strip_regions(mut line: &str, disabled: &mut bool) -> String {
    let mut kept = String::new();
    loop {
        if *disabled {
            let Some(enable) = ENABLE.find(line) else {
                return kept;
            };
            *disabled = false;
            line = &line[enable.end()..];
        } else {
            let Some(disable) = DISABLE.find(line) else {
                kept.push_str(line);
                return kept;
            };
            kept.push_str(&line[..disable.start()]);
            *disabled = true;
            line = &line[disable.end()..];
        }
    }
}
