use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{Comment, CommentId, TicketId},
    ports::outbound::CommentRepository,
    StoreError,
};

const ENTITY: &str = "comment";

#[derive(Default)]
pub struct InMemoryCommentStore {
    comments: RwLock<HashMap<CommentId, Comment>>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentStore {
    async fn get_by_ticket(&self, ticket_id: &TicketId) -> Vec<Comment> {
        let mut list: Vec<_> = self
            .comments
            .read()
            .await
            .values()
            .filter(|c| &c.ticket_id == ticket_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        list
    }

    async fn create(&self, comment: Comment) -> Result<(), StoreError> {
        let mut comments = self.comments.write().await;
        if comments.contains_key(&comment.id) {
            return Err(StoreError::already_exists(ENTITY, &comment.id));
        }
        comments.insert(comment.id.clone(), comment);
        Ok(())
    }

    async fn delete(&self, id: &CommentId) -> Result<(), StoreError> {
        self.comments
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn delete_by_ticket(&self, ticket_id: &TicketId) -> usize {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|_, c| &c.ticket_id != ticket_id);
        before - comments.len()
    }
}
