//! Reading-time estimates

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Average adult reading speed
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated time needed to read a post body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadTime {
    pub words: usize,
    pub minutes: f64,
}

impl ReadTime {
    /// Estimate from a Markdown body. Code, inline code and raw HTML are not
    /// read.
    ///
    /// Text events are joined without a separator, so markup inside a word
    /// (`un*believ*able`, `AT&amp;T`) does not split it. Line breaks and
    /// block boundaries separate words.
    pub fn from_markdown(markdown: &str) -> Self {
        let mut text = String::new();
        let mut in_code_block = false;

        for event in Parser::new(markdown) {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    in_code_block = true;
                    text.push(' ');
                }
                Event::End(TagEnd::CodeBlock) => in_code_block = false,
                Event::Text(t) if !in_code_block => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak | Event::Rule => text.push(' '),
                Event::Start(tag) if !is_inline(&tag) => text.push(' '),
                Event::End(end) if !is_inline_end(&end) => text.push(' '),
                _ => {}
            }
        }

        Self::from_words(count_words(&text))
    }

    pub fn from_words(words: usize) -> Self {
        Self {
            words,
            minutes: words as f64 / WORDS_PER_MINUTE as f64,
        }
    }

    /// Whole minutes shown to readers, rounded up
    pub fn display_minutes(&self) -> u64 {
        self.minutes.ceil() as u64
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs_f64(self.minutes * 60.0)
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.display_minutes())
    }
}

impl Serialize for ReadTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Count words: whitespace-separated runs, with each CJK ideograph as one word
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            in_word = true;
            count += 1;
        }
    }

    count
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_end(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{AC00}'..='\u{D7AF}')
}
