use tracing::{debug, info};

use crate::core::errors::{StoreError, StoreResult};
use crate::core::helpers::non_empty_text;
use crate::core::kv::KeyValue;
use crate::media::{ImageChange, ImageRef};
use crate::models::models::{Comment, Post};
use crate::store::PersistedStore;

impl<K: KeyValue> PersistedStore<K> {
    pub fn create_post(
        &mut self,
        author_id: i64,
        text: &str,
        image: Option<ImageRef>,
    ) -> StoreResult<Post> {
        let text = non_empty_text(text).ok_or(StoreError::EmptyContent)?;
        let author_name = self
            .user(author_id)
            .map(|u| u.name.clone())
            .ok_or_else(|| StoreError::user_not_found(author_id))?;

        let post = Post {
            id: self.next_id(),
            author_id,
            author_name,
            text,
            image_ref: image.map(ImageRef::into_string),
            created_at: self.now(),
            edited_at: None,
            liked_by: Vec::new(),
            comments: Vec::new(),
        };

        // prepend newest
        self.posts.insert(0, post.clone());
        self.persist_posts();

        info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    pub fn edit_post(
        &mut self,
        post_id: i64,
        editor_id: i64,
        new_text: &str,
        image: ImageChange,
    ) -> StoreResult<Post> {
        let now = self.now();
        let post = self.owned_post_mut(post_id, editor_id)?;
        let text = non_empty_text(new_text).ok_or(StoreError::EmptyContent)?;

        let image_ref = match image {
            ImageChange::Keep => post.image_ref.clone(),
            ImageChange::Replace(image) => Some(image.into_string()),
            ImageChange::Remove => None,
        };

        // Skip the write if nothing changed
        if post.text == text && post.image_ref == image_ref {
            return Ok(post.clone());
        }

        post.text = text;
        post.image_ref = image_ref;
        post.edited_at = Some(now);
        let updated = post.clone();
        self.persist_posts();

        info!(post_id, "post edited");
        Ok(updated)
    }

    pub fn delete_post(&mut self, post_id: i64, requester_id: i64) -> StoreResult<()> {
        self.owned_post_mut(post_id, requester_id)?;
        self.posts.retain(|p| p.id != post_id);
        self.persist_posts();

        info!(post_id, "post deleted");
        Ok(())
    }

    /// Likes the post, or takes the like back if the user already liked it.
    pub fn toggle_like(&mut self, post_id: i64, user_id: i64) -> StoreResult<Post> {
        let post = self.post_mut(post_id)?;
        match post.liked_by.iter().position(|id| *id == user_id) {
            Some(idx) => {
                post.liked_by.remove(idx);
            }
            None => post.liked_by.push(user_id),
        }
        let updated = post.clone();
        self.persist_posts();

        debug!(post_id, user_id, likes = updated.like_count(), "like toggled");
        Ok(updated)
    }

    pub fn add_comment(&mut self, post_id: i64, author_id: i64, text: &str) -> StoreResult<Comment> {
        self.post_mut(post_id)?;
        let text = non_empty_text(text).ok_or(StoreError::EmptyContent)?;

        let comment = Comment {
            id: self.next_id(),
            author_id,
            text,
            created_at: self.now(),
        };
        self.post_mut(post_id)?.comments.push(comment.clone());
        self.persist_posts();

        debug!(post_id, comment_id = comment.id, "comment added");
        Ok(comment)
    }

    fn post_mut(&mut self, post_id: i64) -> StoreResult<&mut Post> {
        self.posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| StoreError::post_not_found(post_id))
    }

    fn owned_post_mut(&mut self, post_id: i64, user_id: i64) -> StoreResult<&mut Post> {
        let post = self.post_mut(post_id)?;
        if post.author_id != user_id {
            return Err(StoreError::NotOwner);
        }
        Ok(post)
    }
}
