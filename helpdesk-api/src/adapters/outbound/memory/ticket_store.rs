use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{Ticket, TicketId},
    ports::outbound::TicketRepository,
    StoreError,
};

const ENTITY: &str = "ticket";

#[derive(Default)]
pub struct InMemoryTicketStore {
    tickets: RwLock<HashMap<TicketId, Ticket>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn list_all(&self) -> Vec<Ticket> {
        let mut list: Vec<_> = self.tickets.read().await.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        list
    }

    async fn get_by_id(&self, id: &TicketId) -> Result<Ticket, StoreError> {
        self.tickets
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn create(&self, ticket: Ticket) -> Result<(), StoreError> {
        let mut tickets = self.tickets.write().await;
        if tickets.contains_key(&ticket.id) {
            return Err(StoreError::already_exists(ENTITY, &ticket.id));
        }
        tickets.insert(ticket.id.clone(), ticket);
        Ok(())
    }

    async fn update(&self, ticket: Ticket) -> Result<(), StoreError> {
        let mut tickets = self.tickets.write().await;
        let existing = tickets
            .get_mut(&ticket.id)
            .ok_or_else(|| StoreError::not_found(ENTITY, &ticket.id))?;
        *existing = ticket;
        Ok(())
    }

    async fn delete(&self, id: &TicketId) -> Result<(), StoreError> {
        self.tickets
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn is_empty(&self) -> bool {
        self.tickets.read().await.is_empty()
    }
}
