//! Which comments are shown on the detail page, and how many at a time.

use serde::{Deserialize, Serialize};

use crate::product::Comment;

/// Comments revealed per "show more" step.
pub const COMMENT_PAGE_SIZE: usize = 6;

/// Which comments qualify for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentPolicy {
    /// Non-empty text and a valid 1–5 rating.
    #[default]
    Strict,
    /// Non-empty text only.
    Lenient,
}

impl CommentPolicy {
    pub fn is_displayable(&self, comment: &Comment) -> bool {
        match self {
            CommentPolicy::Strict => comment.has_text() && comment.valid_rating().is_some(),
            CommentPolicy::Lenient => comment.has_text(),
        }
    }
}

/// Displayable comments in source order.
pub fn eligible_comments(comments: &[Comment], policy: CommentPolicy) -> Vec<&Comment> {
    comments.iter().filter(|c| policy.is_displayable(c)).collect()
}

/// How many eligible comments are currently revealed.
///
/// Starts at one page and only grows; a fresh detail load starts a new
/// cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentCursor {
    visible: usize,
}

impl Default for CommentCursor {
    fn default() -> Self {
        Self {
            visible: COMMENT_PAGE_SIZE,
        }
    }
}

impl CommentCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested visible count; may exceed the number of comments.
    pub fn requested(&self) -> usize {
        self.visible
    }

    pub fn show_more(&mut self) {
        self.visible = self.visible.saturating_add(COMMENT_PAGE_SIZE);
    }

    /// Number of comments shown out of `total` eligible ones.
    pub fn visible_count(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    /// Cut `eligible` down to the revealed prefix.
    pub fn page<'a>(&self, mut eligible: Vec<&'a Comment>) -> CommentPage<'a> {
        let total = eligible.len();
        eligible.truncate(self.visible_count(total));
        CommentPage {
            visible: eligible,
            total,
        }
    }
}

/// The revealed part of the comment list.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentPage<'a> {
    pub visible: Vec<&'a Comment>,
    pub total: usize,
}

impl CommentPage<'_> {
    /// Comments not yet revealed ("N more" label).
    pub fn remaining(&self) -> usize {
        self.total - self.visible.len()
    }

    /// Whether the "show more" control is rendered.
    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
