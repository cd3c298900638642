//! Stack of currently open passthrough tags.

use crate::error::MarkupError;
use crate::parser::tag::Tag;

/// Open passthrough tags at a scan position, innermost last.
///
/// Each parse owns its own stack; nothing here is shared between scans.
#[derive(Clone, Debug, Default)]
pub struct TagStack {
    tags: Vec<Tag>,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Remove the innermost open tag without checking its type.
    ///
    /// Use [`close`](Self::close) when handling a closing tag from the
    /// markup; `pop` is for unwinding, where there is nothing to match against.
    pub fn pop(&mut self) -> Option<Tag> {
        self.tags.pop()
    }

    /// Close the innermost open tag with `closing`.
    ///
    /// The top entry is removed even when its type disagrees with `closing`;
    /// the disagreement is reported as [`MarkupError::MismatchedClose`] so the
    /// caller can log it and carry on.
    pub fn close(&mut self, closing: &Tag) -> Result<Tag, MarkupError> {
        let Some(popped) = self.pop() else {
            return Err(MarkupError::UnopenedClose(closing.type_name().to_string()));
        };

        if popped.is_type(closing.type_name()) {
            Ok(popped)
        } else {
            Err(MarkupError::MismatchedClose {
                expected: popped.type_name().to_string(),
                found: closing.type_name().to_string(),
            })
        }
    }

    /// Closing text for every open tag, innermost first.
    ///
    /// Appending this to a partial reveal keeps the output well-formed.
    pub fn closing_suffix(&self) -> String {
        self.tags
            .iter()
            .rev()
            .map(|tag| tag.closing_text())
            .collect()
    }

    /// Open tags from innermost to outermost.
    pub fn iter_innermost_first(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Open tags from outermost to innermost.
    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(raw: &str) -> Tag {
        Tag::parse(raw).unwrap()
    }

    #[test]
    fn push_and_close_matching() {
        let mut stack = TagStack::new();
        stack.push(tag("<b>"));
        stack.push(tag("<color=red>"));

        let popped = stack.close(&tag("</color>")).unwrap();
        assert_eq!(popped.parameter(), "red");
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn mismatch_still_pops() {
        let mut stack = TagStack::new();
        stack.push(tag("<b>"));
        stack.push(tag("<i>"));

        let err = stack.close(&tag("</b>")).unwrap_err();
        assert_eq!(
            err,
            MarkupError::MismatchedClose {
                expected: "i".into(),
                found: "b".into()
            }
        );
        assert_eq!(stack.len(), 1);
        assert!(stack.as_slice()[0].is_type("b"));
    }

    #[test]
    fn close_on_empty_stack() {
        let mut stack = TagStack::new();
        let err = stack.close(&tag("</i>")).unwrap_err();
        assert_eq!(err, MarkupError::UnopenedClose("i".into()));
    }

    #[test]
    fn pop_unwinds_without_matching() {
        let mut stack = TagStack::new();
        stack.push(tag("<b>"));
        stack.push(tag("<i>"));

        while let Some(popped) = stack.pop() {
            assert!(popped.is_opening());
        }
        assert!(stack.is_empty());
        assert!(stack.pop().is_none());
    }

    #[test]
    fn closing_suffix_is_innermost_first() {
        let mut stack = TagStack::new();
        stack.push(tag("<b>"));
        stack.push(tag("<size=40>"));
        stack.push(tag("<i>"));
        assert_eq!(stack.closing_suffix(), "</i></size></b>");

        stack.clear();
        assert_eq!(stack.closing_suffix(), "");
    }
}
