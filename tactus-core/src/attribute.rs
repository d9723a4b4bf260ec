//! Hierarchical text attributes
//!
//! An attribute tree describes which named styles (emphasis, strong, ...)
//! apply to which code points of a text. Every span covers a width in code
//! points; the children of a node cover the node exactly, in order.

use crate::error::{CoreError, Result};

/// A node of an attribute tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SpanRepr", into = "SpanRepr")
)]
pub enum AttributeSpan {
    /// A span without children
    Leaf {
        /// Style name, if any
        style: Option<String>,
        /// Number of code points covered
        width: usize,
    },
    /// A span subdivided into ordered children
    Node {
        /// Style name, if any
        style: Option<String>,
        /// Number of code points covered (equals the sum of the children)
        width: usize,
        /// Child spans, in text order
        children: Vec<AttributeSpan>,
    },
}

impl AttributeSpan {
    /// An unstyled leaf
    pub fn plain(width: usize) -> Self {
        AttributeSpan::Leaf { style: None, width }
    }

    /// A styled leaf
    pub fn styled(style: impl Into<String>, width: usize) -> Self {
        AttributeSpan::Leaf {
            style: Some(style.into()),
            width,
        }
    }

    /// Start building an unstyled node
    pub fn builder() -> SpanBuilder {
        SpanBuilder::default()
    }

    /// Start building a node carrying `style`
    pub fn styled_builder(style: impl Into<String>) -> SpanBuilder {
        SpanBuilder {
            style: Some(style.into()),
            children: Vec::new(),
        }
    }

    /// Number of code points covered
    pub fn width(&self) -> usize {
        match self {
            AttributeSpan::Leaf { width, .. } | AttributeSpan::Node { width, .. } => *width,
        }
    }

    /// Style name of this span
    pub fn style(&self) -> Option<&str> {
        match self {
            AttributeSpan::Leaf { style, .. } | AttributeSpan::Node { style, .. } => {
                style.as_deref()
            }
        }
    }

    /// Child spans (empty for leaves)
    pub fn children(&self) -> &[AttributeSpan] {
        match self {
            AttributeSpan::Leaf { .. } => &[],
            AttributeSpan::Node { children, .. } => children,
        }
    }

    /// Whether the span is subdivided
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Children paired with their offset relative to the start of this span
    pub fn children_with_offsets(&self) -> ChildOffsets<'_> {
        ChildOffsets {
            children: self.children(),
            index: 0,
            offset: 0,
        }
    }

    /// Visit every span depth-first, in text order, with its absolute offset
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &AttributeSpan),
    {
        self.walk_at(0, &mut visit);
    }

    fn walk_at<F>(&self, offset: usize, visit: &mut F)
    where
        F: FnMut(usize, &AttributeSpan),
    {
        visit(offset, self);
        for (child_offset, child) in self.children_with_offsets() {
            child.walk_at(offset + child_offset, visit);
        }
    }
}

/// Iterator over the children of a span and their relative offsets
#[derive(Debug, Clone)]
pub struct ChildOffsets<'a> {
    children: &'a [AttributeSpan],
    index: usize,
    offset: usize,
}

impl<'a> Iterator for ChildOffsets<'a> {
    type Item = (usize, &'a AttributeSpan);

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.children.get(self.index)?;
        let offset = self.offset;
        self.index += 1;
        self.offset += child.width();
        Some((offset, child))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.children.len() - self.index;
        (remaining, Some(remaining))
    }
}

/// Immutable builder for attribute trees
///
/// The declared width is checked against the children when the span is
/// built, so every tree obtained from a builder satisfies the width
/// invariant.
#[derive(Debug, Clone, Default)]
pub struct SpanBuilder {
    style: Option<String>,
    children: Vec<AttributeSpan>,
}

impl SpanBuilder {
    /// Append a child span
    pub fn add(mut self, span: AttributeSpan) -> Self {
        self.children.push(span);
        self
    }

    /// Append an unstyled child covering `width` code points
    pub fn add_width(self, width: usize) -> Self {
        self.add(AttributeSpan::plain(width))
    }

    /// Finish the span with the declared `width`.
    ///
    /// Without children the result is a leaf; otherwise the children must
    /// cover exactly `width` code points.
    pub fn build(self, width: usize) -> Result<AttributeSpan> {
        if self.children.is_empty() {
            return Ok(AttributeSpan::Leaf {
                style: self.style,
                width,
            });
        }
        let covered: usize = self.children.iter().map(AttributeSpan::width).sum();
        if covered != width {
            return Err(CoreError::WidthMismatch {
                declared: width,
                children: covered,
            });
        }
        Ok(AttributeSpan::Node {
            style: self.style,
            width,
            children: self.children,
        })
    }
}

/// Serialized form: `{ "style": "em", "width": 4, "children": [...] }`
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SpanRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<SpanRepr>,
}

#[cfg(feature = "serde")]
impl TryFrom<SpanRepr> for AttributeSpan {
    type Error = CoreError;

    fn try_from(repr: SpanRepr) -> Result<Self> {
        let children = repr
            .children
            .into_iter()
            .map(AttributeSpan::try_from)
            .collect::<Result<Vec<_>>>()?;
        let width = repr
            .width
            .unwrap_or_else(|| children.iter().map(AttributeSpan::width).sum());
        let builder = children.into_iter().fold(
            SpanBuilder {
                style: repr.style,
                children: Vec::new(),
            },
            SpanBuilder::add,
        );
        builder.build(width)
    }
}

#[cfg(feature = "serde")]
impl From<AttributeSpan> for SpanRepr {
    fn from(span: AttributeSpan) -> Self {
        match span {
            AttributeSpan::Leaf { style, width } => SpanRepr {
                style,
                width: Some(width),
                children: Vec::new(),
            },
            AttributeSpan::Node {
                style,
                width,
                children,
            } => SpanRepr {
                style,
                width: Some(width),
                children: children.into_iter().map(SpanRepr::from).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AttributeSpan {
        AttributeSpan::builder()
            .add_width(5)
            .add(
                AttributeSpan::styled_builder("italic")
                    .add_width(2)
                    .add(AttributeSpan::styled("bold", 2))
                    .build(4)
                    .unwrap(),
            )
            .add(AttributeSpan::styled("bold", 5))
            .build(14)
            .unwrap()
    }

    #[test]
    fn test_builder_checks_widths() {
        let result = AttributeSpan::builder().add_width(2).add_width(2).build(5);
        assert_eq!(
            result,
            Err(CoreError::WidthMismatch {
                declared: 5,
                children: 4
            })
        );
    }

    #[test]
    fn test_builder_without_children_is_leaf() {
        let span = AttributeSpan::styled_builder("em").build(3).unwrap();
        assert_eq!(span, AttributeSpan::styled("em", 3));
        assert!(!span.has_children());
    }

    #[test]
    fn test_children_with_offsets() {
        let tree = sample();
        let offsets: Vec<usize> = tree.children_with_offsets().map(|(o, _)| o).collect();
        assert_eq!(offsets, vec![0, 5, 9]);
    }

    #[test]
    fn test_walk_reports_absolute_offsets() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.walk(|offset, span| {
            if let Some(style) = span.style() {
                seen.push((style.to_string(), offset, span.width()));
            }
        });
        assert_eq!(
            seen,
            vec![
                ("italic".to_string(), 5, 4),
                ("bold".to_string(), 7, 2),
                ("bold".to_string(), 9, 5),
            ]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_infers_node_width() {
        let json = r#"{"children":[{"width":3},{"style":"em","width":2}]}"#;
        let span: AttributeSpan = serde_json::from_str(json).unwrap();
        assert_eq!(span.width(), 5);
        assert_eq!(span.children()[1].style(), Some("em"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_inconsistent_width() {
        let json = r#"{"width":6,"children":[{"width":3},{"width":2}]}"#;
        assert!(serde_json::from_str::<AttributeSpan>(json).is_err());
    }
}
