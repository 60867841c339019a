//! Local post interactions
//!
//! Likes in the community feed are purely local: the viewer toggles a post
//! and the displayed count is the server count plus one while liked.

use crate::models::{CommunityPost, PostId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of posts the viewer has liked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeSet {
    liked: BTreeSet<PostId>,
}

impl LikeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a post, returning whether it is liked afterwards
    pub fn toggle(&mut self, post_id: PostId) -> bool {
        if self.liked.remove(&post_id) {
            false
        } else {
            self.liked.insert(post_id);
            true
        }
    }

    /// Whether a post is liked
    pub fn is_liked(&self, post_id: PostId) -> bool {
        self.liked.contains(&post_id)
    }

    /// Like count to display for a post
    pub fn display_count(&self, post: &CommunityPost) -> u32 {
        post.likes.saturating_add(u32::from(self.is_liked(post.id)))
    }

    /// Number of liked posts
    pub fn len(&self) -> usize {
        self.liked.len()
    }

    /// Whether nothing is liked
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogProvider, MockCatalog};

    #[test]
    fn test_toggle() {
        let mut likes = LikeSet::new();
        assert!(likes.toggle(1));
        assert!(likes.is_liked(1));
        assert!(!likes.toggle(1));
        assert!(!likes.is_liked(1));
        assert!(likes.is_empty());
    }

    #[test]
    fn test_display_count() {
        let catalog = MockCatalog::new();
        let post = &catalog.posts()[0];
        let mut likes = LikeSet::new();

        assert_eq!(likes.display_count(post), 234);
        likes.toggle(post.id);
        assert_eq!(likes.display_count(post), 235);
        likes.toggle(post.id);
        assert_eq!(likes.display_count(post), 234);
    }

    #[test]
    fn test_display_count_saturates() {
        let mut post = MockCatalog::new().posts()[0].clone();
        post.likes = u32::MAX;
        let mut likes = LikeSet::new();
        likes.toggle(post.id);
        assert_eq!(likes.display_count(&post), u32::MAX);
    }

    #[test]
    fn test_independent_posts() {
        let mut likes = LikeSet::new();
        likes.toggle(1);
        likes.toggle(2);
        likes.toggle(1);
        assert!(!likes.is_liked(1));
        assert!(likes.is_liked(2));
        assert_eq!(likes.len(), 1);
    }
}
