use serde::Serialize;

use crate::{GraphError, QuestionKind};

/// Which input widget the view layer should show.
///
/// Exactly one flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFlags {
    pub render_button: bool,
    pub render_multi_select: bool,
    pub render_text: bool,
}

impl RenderFlags {
    /// Select the widget for a question kind.
    pub fn for_kind(kind: QuestionKind) -> Self {
        Self {
            render_button: kind == QuestionKind::Button,
            render_multi_select: kind == QuestionKind::MultiSelect,
            render_text: kind == QuestionKind::Text,
        }
    }

    /// Select the widget for a raw type tag, rejecting unknown tags.
    pub fn for_tag(tag: &str) -> Result<Self, GraphError> {
        tag.parse().map(Self::for_kind)
    }

    /// The kind whose widget is active.
    pub fn active(self) -> QuestionKind {
        if self.render_multi_select {
            QuestionKind::MultiSelect
        } else if self.render_text {
            QuestionKind::Text
        } else {
            QuestionKind::Button
        }
    }
}

impl From<QuestionKind> for RenderFlags {
    fn from(kind: QuestionKind) -> Self {
        Self::for_kind(kind)
    }
}
