//! Display formatting utilities for CLI output

use colored::*;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::DebateSpeaker;
use crate::models::{ContributionResult, Member, SearchResultRecord, SpeakerAggregate, TopicGroup};
use crate::sanitize::{self, HIGHLIGHT_CLASS};
use crate::upstream::party_color;

const WRAP_WIDTH: usize = 88;

static MARK: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(r#"<mark class="{HIGHLIGHT_CLASS}">(.*?)</mark>"#)).expect("highlight pattern is valid")
});
static BLOCK_BREAK: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</(p|div|li|blockquote)>").expect("block pattern is valid"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Untrusted upstream HTML as terminal text, with `term` highlighted
pub fn render_html(html: &str, term: Option<&str>) -> String {
  let marked = sanitize::sanitize_and_highlight(html, term.unwrap_or_default());

  // each span is decoded on its own so decoded text is never read as markup
  let mut rendered = String::with_capacity(marked.len());
  let mut last = 0;
  for caps in MARK.captures_iter(&marked) {
    let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    rendered.push_str(&plain_text(&marked[last..whole.start()]));
    rendered.push_str(&plain_text(inner.as_str()).yellow().bold().to_string());
    last = whole.end();
  }
  rendered.push_str(&plain_text(&marked[last..]));
  rendered.replace('\u{a0}', " ").trim().to_string()
}

fn plain_text(html: &str) -> String {
  let broken = BLOCK_BREAK.replace_all(html, "\n");
  sanitize::unescape(&TAG.replace_all(&broken, ""))
}

/// Upstream snippet that may or may not be HTML
pub fn render_snippet(snippet: &str, term: Option<&str>) -> String {
  if sanitize::looks_like_html(snippet) {
    return render_html(snippet, term);
  }
  let marked = sanitize::highlight_text(snippet, term.unwrap_or_default());
  render_html(&marked, None)
}

/// Party name in its branding colour
pub fn party_label(party: &str) -> ColoredString {
  match hex_rgb(party_color(Some(party))) {
    Some((r, g, b)) => party.truecolor(r, g, b),
    None => party.normal(),
  }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
  let hex = hex.strip_prefix('#')?;
  if hex.len() != 6 {
    return None;
  }
  let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
  Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Wrap text to fit within a specified width
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    if paragraph.trim().is_empty() {
      continue;
    }

    let mut current_line = String::new();
    for word in paragraph.split_whitespace() {
      if current_line.is_empty() {
        current_line = word.to_string();
      } else if current_line.chars().count() + 1 + word.chars().count() <= width {
        current_line.push(' ');
        current_line.push_str(word);
      } else {
        lines.push(current_line);
        current_line = word.to_string();
      }
    }

    if !current_line.is_empty() {
      lines.push(current_line);
    }
  }

  lines
}

fn print_wrapped(text: &str, indent: &str) {
  for line in wrap_text(text, WRAP_WIDTH) {
    println!("{indent}{line}");
  }
}

/// Date header for a group of results
pub fn display_date_header(date: &str) {
  println!("{}", format!("── {date} ──").blue().bold());
}

/// One search hit: title, speaker and highlighted snippet
pub fn display_search_result(record: &SearchResultRecord, term: Option<&str>) {
  println!("  {} {}", record.title.bold(), format!("[{}]", record.house).dimmed());

  if let Some(speaker) = &record.speaker_name {
    let party = record.speaker_party.as_deref().map(party_label).map(|p| format!(" ({p})")).unwrap_or_default();
    println!("    {}{}", speaker.cyan(), party);
  }
  if let Some(snippet) = &record.text_highlight {
    print_wrapped(&render_snippet(snippet, term), "    ");
  }
  println!("    {}", record.id.dimmed());
}

pub fn display_contribution(contribution: &ContributionResult) {
  let date = contribution.sitting_date.as_deref().and_then(|d| d.split('T').next()).unwrap_or("Unknown");
  println!("  {} {}", date.blue(), contribution.debate_section.bold());
  if let Some(snippet) = &contribution.text_highlight {
    print_wrapped(&render_snippet(snippet, None), "    ");
  }
  println!("    {}", contribution.debate_id.dimmed());
}

/// Member summary line. `watched` adds a marker for tracked members.
pub fn display_member(member: &Member, watched: bool) {
  let marker = if watched { "★".yellow() } else { " ".normal() };
  let party = member.latest_party.as_ref().map(|p| party_label(&p.name).to_string()).unwrap_or_default();
  let seat = member.latest_house_membership.as_ref().map(|m| m.summary()).unwrap_or_default();

  println!("{marker} {} {} {}", format!("{:>6}", member.id).dimmed(), member.name_display_as.bold(), party);
  if !seat.is_empty() {
    println!("         {}", seat.dimmed());
  }
}

pub fn display_synopsis(synopsis: &str) {
  print_wrapped(&render_html(synopsis, None), "  ");
}

/// Ranked speakers from a topic analysis
pub fn display_speaker_ranking(speakers: &[SpeakerAggregate]) {
  for (rank, speaker) in speakers.iter().enumerate() {
    let party = speaker.party.as_deref().map(party_label).map(|p| p.to_string()).unwrap_or_default();
    let seat = speaker.constituency.as_deref().unwrap_or_default();
    println!(
      "{:>3}. {} {} {} {}",
      rank + 1,
      speaker.name.bold(),
      party,
      seat.dimmed(),
      format!("({} mentions)", speaker.count).cyan()
    );
  }
}

/// Speaker sidebar of a debate transcript
pub fn display_debate_speakers(speakers: &[DebateSpeaker]) {
  for speaker in speakers {
    let id = speaker.id.map(|id| format!("#{id}")).unwrap_or_else(|| "-".to_string());
    let party = speaker.party.as_deref().map(party_label).map(|p| p.to_string()).unwrap_or_default();
    println!("  {} {} {} {}", format!("{id:>7}").dimmed(), speaker.name.bold(), party, format!("×{}", speaker.count).cyan());
  }
}

pub fn display_topic(topic: &TopicGroup) {
  println!("{} {}", topic.name.blue().bold(), format!("({})", topic.id).dimmed());
  println!("    {}", topic.keywords.join(", "));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_html_strips_markup_and_unsafe_content() {
    colored::control::set_override(false);
    let text = render_html("<p>Fish &amp; chips<script>alert(1)</script></p><p>second</p>", None);
    assert_eq!(text, "Fish & chips\nsecond");
  }

  #[test]
  fn test_render_html_keeps_highlighted_text() {
    colored::control::set_override(false);
    assert_eq!(render_html("<p>The <b>NHS</b> budget</p>", Some("nhs")), "The NHS budget");
  }

  #[test]
  fn test_render_html_highlighted_angle_bracket_keeps_following_text() {
    colored::control::set_override(false);
    assert_eq!(
      render_html("<p>5 &lt; 6 is true</p><p>next para</p>", Some("<")),
      "5 < 6 is true\nnext para"
    );
  }

  #[test]
  fn test_render_snippet_plain_text() {
    colored::control::set_override(false);
    assert_eq!(render_snippet("5 > 4 & net zero", Some("zero")), "5 > 4 & net zero");
  }

  #[test]
  fn test_hex_rgb() {
    assert_eq!(hex_rgb("#E4003B"), Some((0xE4, 0x00, 0x3B)));
    assert_eq!(hex_rgb("grey"), None);
  }

  #[test]
  fn test_wrap_text() {
    let lines = wrap_text("one two three four", 9);
    assert_eq!(lines, vec!["one two", "three", "four"]);
  }
}
