//! Style marker insertion
//!
//! String-based backends cannot receive style bits alongside the text, so
//! styles are expressed as marker strings inserted into the text before
//! translation. A processor sees the whole context so that a style run
//! crossing a fragment boundary is opened and closed exactly once.

use crate::error::BoxError;
use std::collections::HashMap;
use tactus_core::AttributeSpan;

/// Inserts style markers into text fragments
pub trait MarkerContextProcessor: Send + Sync {
    /// Process `current` with its surrounding text.
    ///
    /// `attributes` covers the concatenation of `preceding`, `current` and
    /// `following`. The result holds one string per `current` entry.
    fn process(
        &self,
        attributes: &AttributeSpan,
        preceding: &[String],
        current: &[String],
        following: &[String],
    ) -> Result<Vec<String>, BoxError>;
}

/// Begin/end markers for one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMarker {
    /// Inserted before the first character of a run
    pub begin: String,
    /// Inserted after the last character of a run
    pub end: String,
}

/// Processor wrapping every styled run in configured begin/end strings
#[derive(Debug, Clone, Default)]
pub struct StyleMarkers {
    markers: HashMap<String, StyleMarker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Edge {
    End,
    Begin,
}

struct Event<'a> {
    position: usize,
    edge: Edge,
    rank: isize,
    text: &'a str,
}

impl StyleMarkers {
    /// Create a processor with no markers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add markers for `style`
    pub fn with_style(
        mut self,
        style: impl Into<String>,
        begin: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.markers.insert(
            style.into(),
            StyleMarker {
                begin: begin.into(),
                end: end.into(),
            },
        );
        self
    }

    /// Whether no style has markers
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers of every styled run, sorted by position.
    ///
    /// At one position runs are closed before others are opened; nested
    /// runs close innermost first and open outermost first.
    fn events(&self, attributes: &AttributeSpan) -> Vec<Event<'_>> {
        let mut events = Vec::new();
        let mut order = 0isize;
        attributes.walk(|offset, span| {
            order += 1;
            let Some(marker) = span.style().and_then(|s| self.markers.get(s)) else {
                return;
            };
            if span.width() == 0 {
                return;
            }
            events.push(Event {
                position: offset,
                edge: Edge::Begin,
                rank: order,
                text: &marker.begin,
            });
            events.push(Event {
                position: offset + span.width(),
                edge: Edge::End,
                rank: -order,
                text: &marker.end,
            });
        });
        events.sort_by_key(|e| (e.position, e.edge, e.rank));
        events
    }
}

impl MarkerContextProcessor for StyleMarkers {
    fn process(
        &self,
        attributes: &AttributeSpan,
        preceding: &[String],
        current: &[String],
        following: &[String],
    ) -> Result<Vec<String>, BoxError> {
        let texts: Vec<&String> = preceding.iter().chain(current).chain(following).collect();
        let total: usize = texts.iter().map(|t| t.chars().count()).sum();
        if attributes.width() != total {
            return Err(format!(
                "attributes cover {} code points, text has {total}",
                attributes.width()
            )
            .into());
        }

        let events = self.events(attributes);
        let mut next = 0;
        let mut start = 0;
        let mut out = Vec::with_capacity(current.len());

        for (index, text) in texts.iter().enumerate() {
            let len = text.chars().count();
            let end = start + len;
            let mut processed = String::with_capacity(text.len());

            for (i, ch) in (start..end).zip(text.chars()) {
                while let Some(event) = events.get(next).filter(|e| e.position == i) {
                    // Run ends at a fragment start belong to the previous fragment
                    if !(event.edge == Edge::End && i == start) {
                        processed.push_str(event.text);
                    }
                    next += 1;
                }
                processed.push(ch);
            }
            if len > 0 {
                while let Some(event) = events
                    .get(next)
                    .filter(|e| e.position == end && e.edge == Edge::End)
                {
                    processed.push_str(event.text);
                    next += 1;
                }
            }

            if (preceding.len()..preceding.len() + current.len()).contains(&index) {
                out.push(processed);
            }
            start = end;
        }

        Ok(out)
    }
}
