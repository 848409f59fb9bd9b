//! Sequential phase release
//!
//! Phases go to the board one at a time in integer order. A phase's cards
//! are created on a list named `Phase <key>`, then the list is polled until
//! every card is complete before the next phase is released.

use crate::board::{BoardClient, ListId, NewCard};
use crate::error::ReleaseError;
use crate::segment::PhaseBuckets;
use crate::state::{PhaseRelease, ReleaseState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Board used when none is configured
pub const DEFAULT_BOARD: &str = "My Project Manager Crew";

/// Release workflow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Board name passed to the client
    pub board: String,
    /// Delay between completion polls
    pub poll_interval: Duration,
    /// Give up on a phase after this many polls; unlimited when `None`
    pub max_polls: Option<u32>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            board: DEFAULT_BOARD.to_string(),
            poll_interval: Duration::from_secs(5),
            max_polls: None,
        }
    }
}

impl ReleaseConfig {
    /// With board name
    #[must_use]
    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = board.into();
        self
    }

    /// With poll interval
    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// With poll limit
    #[inline]
    #[must_use]
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }
}

/// Counts from a completed release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseReport {
    /// Phases released
    pub phases: usize,
    /// Cards created across all phases
    pub cards: usize,
    /// Completion polls across all phases
    pub polls: u32,
}

/// Releases phase buckets to a board
pub struct ReleaseWorkflow<B: BoardClient> {
    board: B,
    config: ReleaseConfig,
    buckets: PhaseBuckets,
    release: Arc<PhaseRelease>,
}

impl<B: BoardClient> ReleaseWorkflow<B> {
    /// Create a workflow over buckets
    pub fn new(board: B, config: ReleaseConfig, buckets: PhaseBuckets) -> Self {
        let keys = buckets.sorted_keys().into_iter().map(str::to_string).collect();
        Self {
            board,
            config,
            buckets,
            release: Arc::new(PhaseRelease::new(keys)),
        }
    }

    /// Shared progress handle for status readers
    #[must_use]
    pub fn progress(&self) -> Arc<PhaseRelease> {
        Arc::clone(&self.release)
    }

    /// Board client
    #[inline]
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Release every phase and wait for each to complete
    pub async fn run(&self) -> Result<ReleaseReport, ReleaseError> {
        let mut report = ReleaseReport::default();
        let mut state = self.release.advance(&ReleaseState::Idle)?;

        while let ReleaseState::Released(key) = &state {
            tracing::info!("Releasing phase {}", key);
            let list = self
                .board
                .get_or_create_list(&self.config.board, &format!("Phase {key}"))
                .await?;

            for task in self.buckets.get(key).unwrap_or_default() {
                let card = self.board.create_card(&list, &NewCard::from_task(task)).await?;
                tracing::debug!("Created card {} for '{}'", card, task.task_name);
                report.cards += 1;
            }

            let waiting = self.release.advance(&state)?;
            report.polls += self.wait_for_completion(key, &list).await?;
            report.phases += 1;

            let advancing = self.release.advance(&waiting)?;
            state = self.release.advance(&advancing)?;
        }

        tracing::info!(
            "Release finished: {} phases, {} cards",
            report.phases,
            report.cards
        );
        Ok(report)
    }

    /// Poll until every card on the list is complete; returns polls made
    async fn wait_for_completion(&self, key: &str, list: &ListId) -> Result<u32, ReleaseError> {
        let mut polls = 0;
        loop {
            let cards = self.board.list_cards(list).await?;
            polls += 1;
            let open = cards.iter().filter(|c| !c.complete).count();
            if open == 0 {
                tracing::info!("Phase {} complete", key);
                return Ok(polls);
            }
            if self.config.max_polls.is_some_and(|max| polls >= max) {
                return Err(ReleaseError::PollLimitExceeded {
                    phase: key.to_string(),
                    polls,
                });
            }
            tracing::debug!("Phase {}: {} of {} cards open", key, open, cards.len());
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
