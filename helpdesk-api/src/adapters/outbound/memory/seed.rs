use time::OffsetDateTime;
use tracing::info;

use crate::domain::{
    models::{Ticket, TicketId, UserId, RESOLVED_STATUS},
    ports::outbound::TicketRepository,
    StoreError,
};

const SAMPLE_OWNER: &str = "sample-customer";

/// (title, description, category, status, resolution)
const SAMPLE_TICKETS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Unable to deploy to prod",
        "Deployment process fails with unexpected error code.",
        "deployment",
        RESOLVED_STATUS,
        "Clear the stale build cache on the runner and re-run the pipeline.",
    ),
    (
        "Email sending failure",
        "Users are not receiving email notifications.",
        "email",
        "open",
        "",
    ),
    (
        "Slow database queries",
        "Database queries are taking too long to complete.",
        "database",
        "in_progress",
        "",
    ),
    (
        "Login page crash",
        "Application crashes when loading the login page.",
        "frontend",
        "open",
        "",
    ),
    (
        "API returning 500",
        "API endpoints returning server error 500.",
        "api",
        "open",
        "",
    ),
];

/// Fill an empty ticket store with sample tickets. Returns how many were added.
///
/// A store that already holds tickets is left untouched.
pub async fn seed_sample_tickets<R>(tickets: &R) -> Result<usize, StoreError>
where
    R: TicketRepository + ?Sized,
{
    if !tickets.is_empty().await {
        return Ok(0);
    }

    let now = OffsetDateTime::now_utc();
    for (title, description, category, status, resolution) in SAMPLE_TICKETS {
        tickets
            .create(Ticket {
                id: TicketId::generate(),
                title: title.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                status: status.to_string(),
                resolution: resolution.to_string(),
                created_at: now,
                user_id: UserId::new(SAMPLE_OWNER),
                assigned_to: None,
            })
            .await?;
    }

    info!(count = SAMPLE_TICKETS.len(), "Seeded sample tickets");
    Ok(SAMPLE_TICKETS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::InMemoryTicketStore;
    use crate::domain::models::sample_ticket;

    #[tokio::test]
    async fn seeds_once_with_one_promotable_ticket() {
        let store = InMemoryTicketStore::new();

        let added = seed_sample_tickets(&store).await.unwrap();
        assert_eq!(added, SAMPLE_TICKETS.len());

        let promotable = store
            .list_all()
            .await
            .into_iter()
            .filter(Ticket::is_promotable)
            .count();
        assert_eq!(promotable, 1);

        assert_eq!(seed_sample_tickets(&store).await.unwrap(), 0);
        assert_eq!(store.list_all().await.len(), SAMPLE_TICKETS.len());
    }

    #[tokio::test]
    async fn non_empty_store_is_left_alone() {
        let store = InMemoryTicketStore::new();
        store.create(sample_ticket("t1", "open", "")).await.unwrap();

        assert_eq!(seed_sample_tickets(&store).await.unwrap(), 0);
        assert_eq!(store.list_all().await.len(), 1);
    }
}
