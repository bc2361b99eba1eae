use std::{collections::HashSet, sync::Arc};

use tracing::warn;

use crate::domain::{
    models::IndexStatus,
    ports::outbound::TicketRepository,
    services::SuggestionService,
};

/// Counters for one promotion tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromotionStats {
    /// Resolved tickets turned into new suggestions.
    pub promoted: usize,
    /// Earlier suggestions whose indexing succeeded on retry.
    pub reindexed: usize,
    /// Resolved tickets that already had a suggestion.
    pub skipped: usize,
    /// Promotions or retries that left a suggestion unindexed or unstored.
    pub failed: usize,
}

/// Turns resolved tickets into unapproved suggestions.
///
/// Tickets are processed one at a time. A ticket is promoted at most once: a
/// suggestion already pointing at it as source means it is skipped, whatever
/// its current resolution text says.
pub struct PromotionScanner {
    tickets: Arc<dyn TicketRepository>,
    suggestions: Arc<SuggestionService>,
}

impl PromotionScanner {
    pub fn new(tickets: Arc<dyn TicketRepository>, suggestions: Arc<SuggestionService>) -> Self {
        Self {
            tickets,
            suggestions,
        }
    }

    /// Run one full scan, then retry indexing of older pending or failed suggestions.
    pub async fn scan_once(&self) -> PromotionStats {
        let mut stats = PromotionStats::default();
        let mut promoted_now = HashSet::new();

        for ticket in self.tickets.list_all().await {
            if !ticket.is_promotable() {
                continue;
            }

            if !self
                .suggestions
                .find_by_source_ticket(&ticket.id)
                .await
                .is_empty()
            {
                stats.skipped += 1;
                continue;
            }

            match self.suggestions.create_from_ticket(&ticket).await {
                Ok(suggestion) => {
                    stats.promoted += 1;
                    if suggestion.index_status == IndexStatus::Failed {
                        stats.failed += 1;
                    }
                    promoted_now.insert(suggestion.id);
                }
                Err(err) => {
                    warn!(ticket_id = %ticket.id, error = %err, "Failed to promote ticket");
                    stats.failed += 1;
                }
            }
        }

        let retry = self.suggestions.retry_unindexed(&promoted_now).await;
        stats.reindexed = retry.reindexed;
        stats.failed += retry.failed;

        stats
    }
}
