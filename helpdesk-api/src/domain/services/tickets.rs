use std::sync::Arc;

use itertools::Itertools;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::{
    models::{
        Comment, CommentId, Identity, Ticket, TicketId, TicketInput, UserActivity, UserId,
    },
    ports::outbound::{CommentRepository, TicketRepository},
    TicketError,
};

/// Ticket and comment CRUD with owner-or-admin access rules.
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl TicketService {
    pub fn new(tickets: Arc<dyn TicketRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { tickets, comments }
    }

    /// Tickets visible to `caller`, optionally only those assigned to `assigned_to`.
    pub async fn list(&self, caller: &Identity, assigned_to: Option<&UserId>) -> Vec<Ticket> {
        self.tickets
            .list_all()
            .await
            .into_iter()
            .filter(|t| caller.is_admin() || t.is_owned_by(&caller.user_id))
            .filter(|t| assigned_to.map_or(true, |a| t.assigned_to.as_ref() == Some(a)))
            .collect()
    }

    pub async fn list_all(&self) -> Vec<Ticket> {
        self.tickets.list_all().await
    }

    /// Open a ticket owned by the caller. New tickets are never assigned.
    pub async fn create(&self, caller: &Identity, input: TicketInput) -> Result<Ticket, TicketError> {
        validate(&input)?;

        let ticket = Ticket {
            id: TicketId::generate(),
            title: input.title,
            description: input.description,
            category: input.category,
            status: input.status,
            resolution: input.resolution,
            created_at: OffsetDateTime::now_utc(),
            user_id: caller.user_id.clone(),
            assigned_to: None,
        };
        self.tickets.create(ticket.clone()).await?;

        info!(ticket_id = %ticket.id, user_id = %caller.user_id, "Created ticket");
        Ok(ticket)
    }

    pub async fn get(&self, caller: &Identity, id: &TicketId) -> Result<Ticket, TicketError> {
        let ticket = self.tickets.get_by_id(id).await?;
        authorize(caller, &ticket)?;
        Ok(ticket)
    }

    /// Replace a ticket's fields. Only an admin may change the assignee.
    pub async fn update(
        &self,
        caller: &Identity,
        id: &TicketId,
        input: TicketInput,
    ) -> Result<Ticket, TicketError> {
        validate(&input)?;

        let mut ticket = self.get(caller, id).await?;
        if !caller.is_admin() && input.assigned_to != ticket.assigned_to {
            return Err(TicketError::Forbidden("cannot reassign ticket"));
        }

        ticket.title = input.title;
        ticket.description = input.description;
        ticket.category = input.category;
        ticket.status = input.status;
        ticket.resolution = input.resolution;
        ticket.assigned_to = input.assigned_to;

        self.tickets.update(ticket.clone()).await?;
        Ok(ticket)
    }

    /// Delete a ticket together with its comments.
    pub async fn delete(&self, caller: &Identity, id: &TicketId) -> Result<(), TicketError> {
        self.get(caller, id).await?;
        self.tickets.delete(id).await?;
        let comments = self.comments.delete_by_ticket(id).await;

        info!(ticket_id = %id, comments, "Deleted ticket");
        Ok(())
    }

    /// Comments of a ticket, oldest first.
    pub async fn comments(
        &self,
        caller: &Identity,
        ticket_id: &TicketId,
    ) -> Result<Vec<Comment>, TicketError> {
        self.get(caller, ticket_id).await?;
        Ok(self.comments.get_by_ticket(ticket_id).await)
    }

    pub async fn add_comment(
        &self,
        caller: &Identity,
        ticket_id: &TicketId,
        content: String,
    ) -> Result<Comment, TicketError> {
        if content.trim().is_empty() {
            return Err(TicketError::InvalidInput("content is required".into()));
        }
        self.get(caller, ticket_id).await?;

        let comment = Comment {
            id: CommentId::generate(),
            ticket_id: ticket_id.clone(),
            author_id: caller.user_id.clone(),
            content,
            created_at: OffsetDateTime::now_utc(),
        };
        self.comments.create(comment.clone()).await?;
        Ok(comment)
    }

    /// Remove one comment of a ticket. Admin access is checked by the caller.
    pub async fn delete_comment(
        &self,
        ticket_id: &TicketId,
        comment_id: &CommentId,
    ) -> Result<(), TicketError> {
        let belongs = self
            .comments
            .get_by_ticket(ticket_id)
            .await
            .iter()
            .any(|c| &c.id == comment_id);
        if !belongs {
            return Err(TicketError::NotFound(format!("comment not found: {comment_id}")));
        }
        Ok(self.comments.delete(comment_id).await?)
    }

    /// Ticket counts per owner, sorted by user id.
    pub async fn user_activity(&self) -> Vec<UserActivity> {
        self.tickets
            .list_all()
            .await
            .into_iter()
            .map(|t| t.user_id)
            .counts()
            .into_iter()
            .map(|(user_id, ticket_count)| UserActivity {
                user_id,
                ticket_count,
            })
            .sorted_by(|a, b| a.user_id.cmp(&b.user_id))
            .collect()
    }
}

fn authorize(caller: &Identity, ticket: &Ticket) -> Result<(), TicketError> {
    if caller.is_admin() || ticket.is_owned_by(&caller.user_id) {
        Ok(())
    } else {
        Err(TicketError::Forbidden("not the ticket owner"))
    }
}

fn validate(input: &TicketInput) -> Result<(), TicketError> {
    let required = [
        ("title", &input.title),
        ("description", &input.description),
        ("category", &input.category),
        ("status", &input.status),
    ];
    match required.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(TicketError::InvalidInput(format!("{field} is required"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::{InMemoryCommentStore, InMemoryTicketStore};

    fn service() -> TicketService {
        TicketService::new(
            Arc::new(InMemoryTicketStore::new()),
            Arc::new(InMemoryCommentStore::new()),
        )
    }

    fn user(id: &str) -> Identity {
        Identity::new(id, vec![])
    }

    fn admin() -> Identity {
        Identity::new("root", vec!["admin".to_string()])
    }

    fn input(title: &str) -> TicketInput {
        TicketInput {
            title: title.into(),
            description: "It broke".into(),
            category: "ops".into(),
            status: "open".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn users_see_only_their_own_tickets() {
        let service = service();
        let alice = user("alice");
        let bob = user("bob");
        let ticket = service.create(&alice, input("VPN down")).await.unwrap();
        service.create(&bob, input("Printer jam")).await.unwrap();

        assert_eq!(service.list(&alice, None).await.len(), 1);
        assert_eq!(service.list(&admin(), None).await.len(), 2);
        assert!(matches!(
            service.get(&bob, &ticket.id).await,
            Err(TicketError::Forbidden(_))
        ));
        assert!(service.get(&admin(), &ticket.id).await.is_ok());
    }

    #[tokio::test]
    async fn missing_required_field_is_invalid() {
        let service = service();
        let err = service.create(&user("alice"), input("  ")).await.unwrap_err();
        assert_eq!(err, TicketError::InvalidInput("title is required".into()));
    }

    #[tokio::test]
    async fn only_admin_may_reassign() {
        let service = service();
        let alice = user("alice");
        let ticket = service.create(&alice, input("VPN down")).await.unwrap();

        let mut reassign = input("VPN down");
        reassign.assigned_to = Some(UserId::new("eng-1"));
        assert!(matches!(
            service.update(&alice, &ticket.id, reassign.clone()).await,
            Err(TicketError::Forbidden(_))
        ));

        let updated = service.update(&admin(), &ticket.id, reassign).await.unwrap();
        assert_eq!(updated.assigned_to, Some(UserId::new("eng-1")));

        let assigned = service
            .list(&admin(), Some(&UserId::new("eng-1")))
            .await;
        assert_eq!(assigned.len(), 1);
        assert!(service
            .list(&admin(), Some(&UserId::new("eng-2")))
            .await
            .is_empty());

        let mut resolve = input("VPN down");
        resolve.status = "resolved".into();
        resolve.resolution = "Renew the certificate".into();
        resolve.assigned_to = Some(UserId::new("eng-1"));
        let resolved = service.update(&alice, &ticket.id, resolve).await.unwrap();
        assert!(resolved.is_promotable());
    }

    #[tokio::test]
    async fn delete_cascades_to_comments() {
        let tickets = Arc::new(InMemoryTicketStore::new());
        let comments = Arc::new(InMemoryCommentStore::new());
        let service = TicketService::new(tickets.clone(), comments.clone());
        let alice = user("alice");
        let ticket = service.create(&alice, input("VPN down")).await.unwrap();
        service
            .add_comment(&alice, &ticket.id, "any news?".into())
            .await
            .unwrap();

        service.delete(&alice, &ticket.id).await.unwrap();

        assert!(comments.get_by_ticket(&ticket.id).await.is_empty());
        assert!(matches!(
            service.get(&alice, &ticket.id).await,
            Err(TicketError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn comments_follow_ticket_access() {
        let service = service();
        let alice = user("alice");
        let ticket = service.create(&alice, input("VPN down")).await.unwrap();

        assert!(matches!(
            service
                .add_comment(&user("mallory"), &ticket.id, "hi".into())
                .await,
            Err(TicketError::Forbidden(_))
        ));
        assert!(matches!(
            service.add_comment(&alice, &ticket.id, " ".into()).await,
            Err(TicketError::InvalidInput(_))
        ));

        let comment = service
            .add_comment(&alice, &ticket.id, "first".into())
            .await
            .unwrap();
        assert_eq!(service.comments(&alice, &ticket.id).await.unwrap().len(), 1);

        assert!(matches!(
            service
                .delete_comment(&TicketId::new("other"), &comment.id)
                .await,
            Err(TicketError::NotFound(_))
        ));
        service.delete_comment(&ticket.id, &comment.id).await.unwrap();
        assert!(service.comments(&alice, &ticket.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn user_activity_counts_per_owner() {
        let service = service();
        service.create(&user("bob"), input("a")).await.unwrap();
        service.create(&user("alice"), input("b")).await.unwrap();
        service.create(&user("bob"), input("c")).await.unwrap();

        let activity = service.user_activity().await;
        assert_eq!(
            activity,
            vec![
                UserActivity {
                    user_id: UserId::new("alice"),
                    ticket_count: 1
                },
                UserActivity {
                    user_id: UserId::new("bob"),
                    ticket_count: 2
                },
            ]
        );
    }
}
