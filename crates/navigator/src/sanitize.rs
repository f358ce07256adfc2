//! Allow-list HTML sanitizing and search-term highlighting for transcript text
//!
//! Upstream transcript snippets are untrusted HTML. [`sanitize`] reduces them
//! to a small set of text-markup elements; [`highlight`] then wraps matches of
//! a search term in `<mark>` while touching text content only. Always sanitize
//! before highlighting: [`sanitize_and_highlight`] enforces the order.

use ammonia::Builder;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::{HashMap, HashSet};

pub const HIGHLIGHT_CLASS: &str = "highlight-match";

const ALLOWED_TAGS: &[&str] = &[
  "b", "i", "em", "strong", "a", "p", "br", "ul", "ol", "li", "span", "div", "mark", "sub", "sup",
  "blockquote",
];
const ALLOWED_LINK_ATTRIBUTES: &[&str] = &["href", "target", "rel"];
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];
// Elements removed together with everything inside them
const STRIPPED_WITH_CONTENT: &[&str] = &["script", "style", "iframe", "noscript", "template"];

static SANITIZER: Lazy<Builder<'static>> = Lazy::new(|| {
  let mut builder = Builder::empty();
  builder
    .tags(ALLOWED_TAGS.iter().copied().collect())
    .generic_attributes(HashSet::from(["class"]))
    .tag_attributes(HashMap::from([("a", ALLOWED_LINK_ATTRIBUTES.iter().copied().collect())]))
    .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
    .url_relative(ammonia::UrlRelative::PassThrough)
    .clean_content_tags(STRIPPED_WITH_CONTENT.iter().copied().collect())
    .link_rel(None)
    .strip_comments(true);
  builder
});

/// Strip everything outside the allow-list. Idempotent; empty in, empty out.
pub fn sanitize(html: &str) -> String {
  if html.trim().is_empty() {
    return String::new();
  }
  SANITIZER.clean(html).to_string()
}

/// Wrap every case-insensitive occurrence of `term` in a highlight `<mark>`.
///
/// `html` must already be sanitized. Tags and attribute values are copied
/// through untouched and matches never span a tag boundary. The term is
/// matched literally.
pub fn highlight(html: &str, term: &str) -> String {
  let Some(pattern) = term_pattern(term) else {
    return html.to_string();
  };

  let mut output = String::with_capacity(html.len() + 32);
  for segment in Segments::new(html) {
    match segment {
      Segment::Markup(markup) => output.push_str(markup),
      Segment::Text(text) => highlight_raw_segment(&mut output, text, &pattern),
    }
  }
  output
}

/// Sanitize untrusted HTML, then highlight `term` in what survives
pub fn sanitize_and_highlight(html: &str, term: &str) -> String {
  highlight(&sanitize(html), term)
}

/// Escape plain text as HTML and highlight `term` in it
pub fn highlight_text(text: &str, term: &str) -> String {
  let Some(pattern) = term_pattern(term) else {
    return escape(text);
  };
  let mut output = String::with_capacity(text.len() + 32);
  highlight_segment(&mut output, text, &pattern);
  output
}

/// Whether a snippet carries markup and therefore needs the HTML path
pub fn looks_like_html(text: &str) -> bool {
  text.contains('<')
}

fn term_pattern(term: &str) -> Option<Regex> {
  if term.is_empty() {
    return None;
  }
  RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build().ok()
}

fn highlight_segment(output: &mut String, text: &str, pattern: &Regex) {
  let mut last = 0;
  for found in pattern.find_iter(text) {
    output.push_str(&escape(&text[last..found.start()]));
    output.push_str(&format!(r#"<mark class="{HIGHLIGHT_CLASS}">"#));
    output.push_str(&escape(found.as_str()));
    output.push_str("</mark>");
    last = found.end();
  }
  output.push_str(&escape(&text[last..]));
}

/// Highlight inside serialized text. Matching runs on the decoded text but
/// everything outside a match is copied through exactly as it came in.
fn highlight_raw_segment(output: &mut String, raw: &str, pattern: &Regex) {
  let (decoded, offsets) = decode_mapped(raw);
  let mut last = 0;
  for found in pattern.find_iter(&decoded) {
    output.push_str(&raw[offsets[last]..offsets[found.start()]]);
    output.push_str(&format!(r#"<mark class="{HIGHLIGHT_CLASS}">"#));
    output.push_str(&escape(found.as_str()));
    output.push_str("</mark>");
    last = found.end();
  }
  output.push_str(&raw[offsets[last]..]);
}

enum Segment<'a> {
  Markup(&'a str),
  Text(&'a str),
}

/// Splits serialized HTML into tags and the text between them. Quote-aware,
/// since serialized attribute values may contain a literal `>`.
struct Segments<'a> {
  rest: &'a str,
}

impl<'a> Segments<'a> {
  fn new(html: &'a str) -> Self {
    Self { rest: html }
  }
}

impl<'a> Iterator for Segments<'a> {
  type Item = Segment<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.rest.is_empty() {
      return None;
    }

    if !self.rest.starts_with('<') {
      let end = self.rest.find('<').unwrap_or(self.rest.len());
      let (text, rest) = self.rest.split_at(end);
      self.rest = rest;
      return Some(Segment::Text(text));
    }

    let mut quote: Option<char> = None;
    let mut end = self.rest.len();
    for (index, ch) in self.rest.char_indices().skip(1) {
      match (quote, ch) {
        (Some(open), c) if c == open => quote = None,
        (None, '"' | '\'') => quote = Some(ch),
        (None, '>') => {
          end = index + 1;
          break;
        }
        _ => {}
      }
    }

    let (markup, rest) = self.rest.split_at(end);
    self.rest = rest;
    Some(Segment::Markup(markup))
  }
}

fn escape(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '\u{a0}' => escaped.push_str("&nbsp;"),
      _ => escaped.push(ch),
    }
  }
  escaped
}

const ENTITIES: &[(&str, char)] = &[
  ("&amp;", '&'),
  ("&lt;", '<'),
  ("&gt;", '>'),
  ("&quot;", '"'),
  ("&nbsp;", '\u{a0}'),
  ("&#39;", '\''),
];

/// Reverse of [`escape`] for the entities the sanitizer's serializer emits.
/// Unknown entities are left verbatim.
pub(crate) fn unescape(text: &str) -> String {
  decode_mapped(text).0
}

/// Decoded text plus, for every decoded byte, the offset in `text` it came
/// from. The final entry is `text.len()`.
fn decode_mapped(text: &str) -> (String, Vec<usize>) {
  let mut decoded = String::with_capacity(text.len());
  let mut offsets = Vec::with_capacity(text.len() + 1);
  let mut at = 0;
  while let Some(rest) = text.get(at..).filter(|rest| !rest.is_empty()) {
    let (ch, width) = match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
      Some((entity, ch)) => (*ch, entity.len()),
      None => match rest.chars().next() {
        Some(ch) => (ch, ch.len_utf8()),
        None => break,
      },
    };
    offsets.extend(std::iter::repeat(at).take(ch.len_utf8()));
    decoded.push(ch);
    at += width;
  }
  offsets.push(text.len());
  (decoded, offsets)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sanitize_strips_scripts_and_handlers() {
    let clean = sanitize(r#"<p onclick="steal()">Hello <script>alert(1)</script><b>world</b></p>"#);
    assert_eq!(clean, "<p>Hello <b>world</b></p>");
  }

  #[test]
  fn test_sanitize_drops_disallowed_elements_but_keeps_text() {
    let clean = sanitize(r#"<h1 style="color:red">Title</h1><table><tr><td>cell</td></tr></table>"#);
    assert!(!clean.contains("<h1"));
    assert!(!clean.contains("style"));
    assert!(clean.contains("Title"));
    assert!(clean.contains("cell"));
  }

  #[test]
  fn test_sanitize_keeps_safe_links_only() {
    let clean = sanitize(r#"<a href="https://example.com" target="_blank" class="ext">x</a>"#);
    assert_eq!(clean, r#"<a href="https://example.com" target="_blank" class="ext">x</a>"#);

    let clean = sanitize(r#"<a href="javascript:alert(1)">x</a>"#);
    assert!(!clean.contains("javascript"));
  }

  #[test]
  fn test_sanitize_removes_iframes_and_styles_with_content() {
    let clean = sanitize("<iframe src=\"https://evil\">inner</iframe><style>p{}</style><p>ok</p>");
    assert_eq!(clean, "<p>ok</p>");
  }

  #[test]
  fn test_sanitize_is_idempotent() {
    let inputs = [
      r#"<p>One &amp; two <i>three</i></p>"#,
      r#"<div class="x"><span onmouseover="x()">hover</span> < unclosed"#,
      r#"<a href="/relative?a=1&b=2" rel="nofollow">link</a><img src=x onerror=alert(1)>"#,
      "plain text with no markup",
    ];
    for input in inputs {
      let once = sanitize(input);
      assert_eq!(sanitize(&once), once, "not idempotent for {input}");
    }
  }

  #[test]
  fn test_sanitize_empty_input() {
    assert_eq!(sanitize(""), "");
    assert_eq!(sanitize("   "), "");
  }

  #[test]
  fn test_highlight_empty_term_is_identity() {
    let html = "<p>Some <b>text</b></p>";
    assert_eq!(highlight(html, ""), html);
  }

  #[test]
  fn test_highlight_is_case_insensitive() {
    assert_eq!(
      highlight("<p>NHS funding for the nhs</p>", "nhs"),
      r#"<p><mark class="highlight-match">NHS</mark> funding for the <mark class="highlight-match">nhs</mark></p>"#
    );
  }

  #[test]
  fn test_highlight_treats_metacharacters_literally() {
    let out = highlight("<p>It cost $100 (not 1000)</p>", "$100");
    assert_eq!(out, r#"<p>It cost <mark class="highlight-match">$100</mark> (not 1000)</p>"#);

    let out = highlight("<p>a.c abc</p>", "a.c");
    assert_eq!(out.matches("<mark").count(), 1);

    // would be an invalid pattern if not escaped
    assert_eq!(highlight("<p>x</p>", "(["), "<p>x</p>");
  }

  #[test]
  fn test_highlight_never_touches_tags_or_attributes() {
    let html = r#"<a href="https://mark.example/class" class="mark">mark</a>"#;
    let out = highlight(html, "mark");
    assert_eq!(
      out,
      r#"<a href="https://mark.example/class" class="mark"><mark class="highlight-match">mark</mark></a>"#
    );
  }

  #[test]
  fn test_highlight_matches_entities_as_text() {
    let out = highlight("<p>Fish &amp; chips</p>", "&");
    assert_eq!(out, r#"<p>Fish <mark class="highlight-match">&amp;</mark> chips</p>"#);

    let out = highlight("<p>Fish &amp; chips</p>", "amp");
    assert_eq!(out, "<p>Fish &amp; chips</p>");
  }

  #[test]
  fn test_highlight_copies_unmatched_text_verbatim() {
    let html = "<p>say &quot;hi&quot; &eacute;</p>";
    assert_eq!(highlight(html, "zzz"), html);

    assert_eq!(
      highlight("<p>caf&eacute; &quot;hi&quot;</p>", "hi"),
      r#"<p>caf&eacute; &quot;<mark class="highlight-match">hi</mark>&quot;</p>"#
    );
  }

  #[test]
  fn test_unescape_leaves_unknown_entities() {
    assert_eq!(unescape("&lt;b&gt; &amp;eacute; &eacute; caf\u{e9}"), "<b> &eacute; &eacute; caf\u{e9}");
  }

  #[test]
  fn test_sanitize_then_highlight_does_not_revive_removed_markup() {
    let out = sanitize_and_highlight("<script>x</script><p>find me</p>", "find");
    assert_eq!(out, r#"<p><mark class="highlight-match">find</mark> me</p>"#);
    assert_eq!(out.matches("<mark").count(), 1);
    assert!(!out.contains("script"));
  }

  #[test]
  fn test_highlight_text_escapes_plain_text() {
    assert_eq!(
      highlight_text("5 < 6 and 6 > 5", "6"),
      r#"5 &lt; <mark class="highlight-match">6</mark> and <mark class="highlight-match">6</mark> &gt; 5"#
    );
    assert_eq!(highlight_text("<b>", ""), "&lt;b&gt;");
  }

  #[test]
  fn test_looks_like_html() {
    assert!(looks_like_html("<p>x</p>"));
    assert!(!looks_like_html("plain"));
  }
}
