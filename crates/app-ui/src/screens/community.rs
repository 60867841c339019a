//! Community feed with shoppable tags

use super::{ScreenAction, ScreenContext};
use app_core::interactions::LikeSet;
use app_core::models::{CommunityPost, PostId};
use serde::Serialize;

const EARNED_BADGE: &str = "Earned 10%";
const BANNER_TITLE: &str = "🎉 You earned a 10% discount at Zara!";
const BANNER_SUBTITLE: &str = "Someone bought through your post";

/// A product tag pinned on a post image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagView {
    /// "Zara Sweater - $89"
    pub label: String,
    /// Horizontal position (% of image width)
    pub x: u8,
    /// Vertical position (% of image height)
    pub y: u8,
}

/// A rendered post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    /// Post id
    pub id: PostId,
    /// Author display name
    pub author: String,
    /// "@handle • 2h"
    pub byline: String,
    /// Avatar fallback letter
    pub initial: Option<char>,
    /// Image reference
    pub image: String,
    /// Caption
    pub caption: String,
    /// Displayed like count
    pub likes: u32,
    /// Whether the viewer liked it
    pub liked: bool,
    /// Comment count
    pub comments: u32,
    /// Affiliate badge
    pub earned_badge: Option<&'static str>,
    /// Shoppable tags
    pub tags: Vec<TagView>,
}

/// Rendered community screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityView {
    /// Header title
    pub title: &'static str,
    /// Feed
    pub posts: Vec<PostView>,
    /// Affiliate banner headline
    pub banner_title: &'static str,
    /// Affiliate banner detail
    pub banner_subtitle: &'static str,
}

/// Community screen
pub struct CommunityScreen {
    posts: Vec<CommunityPost>,
    likes: LikeSet,
}

impl CommunityScreen {
    /// Mount the screen with the catalog's posts
    pub fn mount(ctx: &ScreenContext) -> Self {
        Self {
            posts: ctx.catalog.posts().to_vec(),
            likes: LikeSet::new(),
        }
    }

    /// Toggle a like
    ///
    /// Returns the new liked state, or `None` for an unknown post.
    pub fn toggle_like(&mut self, post_id: PostId) -> Option<bool> {
        if !self.posts.iter().any(|p| p.id == post_id) {
            return None;
        }
        Some(self.likes.toggle(post_id))
    }

    /// Header back button
    pub fn back(&self) -> ScreenAction {
        ScreenAction::Back
    }

    /// Render the screen
    pub fn view(&self) -> CommunityView {
        let posts = self
            .posts
            .iter()
            .map(|post| PostView {
                id: post.id,
                author: post.user.name.clone(),
                byline: format!("{} • {}", post.user.handle, post.time_ago),
                initial: post.user.initial(),
                image: post.image.clone(),
                caption: post.caption.clone(),
                likes: self.likes.display_count(post),
                liked: self.likes.is_liked(post.id),
                comments: post.comments,
                earned_badge: post.earned.then_some(EARNED_BADGE),
                tags: post
                    .products
                    .iter()
                    .map(|tag| TagView {
                        label: tag.label(),
                        x: tag.x,
                        y: tag.y,
                    })
                    .collect(),
            })
            .collect();

        CommunityView {
            title: "Community",
            posts,
            banner_title: BANNER_TITLE,
            banner_subtitle: BANNER_SUBTITLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing;

    #[tokio::test]
    async fn test_like_adds_one_to_display() {
        let (ctx, _backend, _rx) = testing::context();
        let mut screen = CommunityScreen::mount(&ctx);
        let base = screen.view().posts[0].likes;

        assert_eq!(screen.toggle_like(1), Some(true));
        let post = &screen.view().posts[0];
        assert!(post.liked);
        assert_eq!(post.likes, base + 1);

        assert_eq!(screen.toggle_like(1), Some(false));
        assert_eq!(screen.view().posts[0].likes, base);
    }

    #[tokio::test]
    async fn test_unknown_post() {
        let (ctx, _backend, _rx) = testing::context();
        let mut screen = CommunityScreen::mount(&ctx);
        assert_eq!(screen.toggle_like(99), None);
    }

    #[tokio::test]
    async fn test_badges_tags_and_banner() {
        let (ctx, _backend, _rx) = testing::context();
        let view = CommunityScreen::mount(&ctx).view();

        assert_eq!(view.posts[0].earned_badge, Some("Earned 10%"));
        assert_eq!(view.posts[1].earned_badge, None);
        assert!(view.posts.iter().flat_map(|p| &p.tags).all(|t| t.x <= 100 && t.y <= 100));
        assert!(view.posts[0].tags[0].label.contains(" - $"));
        assert_eq!(view.banner_title, "🎉 You earned a 10% discount at Zara!");
        assert_eq!(view.banner_subtitle, "Someone bought through your post");
    }
}
