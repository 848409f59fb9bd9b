//! Testing utilities for the crewplan workspace
//!
//! Sample plans in markdown and structured form, and an in-memory board.

#![allow(missing_docs)]

use crewplan_model::{AllocationPlan, FlatTask, Phase, Task};
use crewplan_release::{BoardClient, BoardError, Card, CardId, ListId, NewCard};
use indexmap::IndexMap;
use parking_lot::Mutex;

/// Single phase, single task, tab-indented details
pub const SETUP_PLAN_MD: &str =
    "**Phase 1: Setup**\n* Task 1.1: Init repo\n\t+ Assigned to: Alice\n\t+ Estimated time: 2 days";

/// Mixed header and label styles, fenced, with rules and narrative lines
pub const MIXED_PLAN_MD: &str = r"```
Here is the resource allocation plan for the project.

* Task 0.1: Orphan task before any phase

## Phase 1: Discovery (Weeks 1-2)

- **Task 1.1:** Stakeholder interviews
  - **Assigned to:** Priya, Marco
  - **Duration:** 5 days
  - **Resources:** Zoom, Miro

- **Task 1.2:** Requirements draft
  - **Responsible:** TBD
  - **Timeframe:** 1 week

---

**Architecture & Design (Phase 2)**

### 2.1 Data model
Team Member: Marco
Time: 3 days
Tools: dbdiagram
Depends on: 1.2

### Task 2.2 - UI mockups (optional)
+ Assignee: n/a
+ Estimated time: to be determined
+ Equipment: none

### 10. Launch Phase
* Task 10.1: Go live
	+ Assigned to: Ops Team
	+ Duration: 2 days
```";

/// Two phases built in code, already normalized
pub fn sample_plan() -> AllocationPlan {
    let mut setup = Phase::new(1, "Setup");
    setup.tasks.push(
        Task::new("1.1", "Init repo")
            .with_assignees(&["Alice"])
            .with_duration("2 days")
            .with_resources(&["GitHub"]),
    );
    setup.tasks.push(
        Task::new("1.2", "CI pipeline")
            .with_assignees(&["Bob", "Carol"])
            .with_duration("1 week"),
    );

    let mut build = Phase::new(2, "Build");
    let mut api = Task::new("2.1", "REST API")
        .with_assignees(&["Alice"])
        .with_duration("3 weeks")
        .with_resources(&["Rust", "Postgres"]);
    api.dependencies = vec!["1.1".to_string(), "1.2".to_string()];
    build.tasks.push(api);
    build.tasks.push(Task::new("2.2", "Load testing"));

    let mut plan = AllocationPlan {
        phases: vec![setup, build],
    };
    plan.normalize();
    plan
}

/// Flat tasks labelled `"2. Design"`, `"10. Launch"` and `""`
pub fn sample_flat_tasks() -> Vec<FlatTask> {
    vec![
        FlatTask::new("Wireframes", "2. Design"),
        FlatTask::new("Go live", "10. Launch"),
        FlatTask::new("Retro", ""),
    ]
}

/// Board call that [`InMemoryBoard`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    GetOrCreateList,
    CreateCard,
    ListCards,
}

#[derive(Debug)]
struct StoredCard {
    id: CardId,
    card: NewCard,
}

#[derive(Debug, Default)]
struct BoardState {
    lists: IndexMap<(String, String), ListId>,
    cards: IndexMap<ListId, Vec<StoredCard>>,
    polls: IndexMap<ListId, usize>,
    next_id: u64,
}

impl BoardState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn list_by_name(&self, name: &str) -> Option<&ListId> {
        self.lists
            .iter()
            .find(|((_, list), _)| list == name)
            .map(|(_, id)| id)
    }
}

/// Board kept in memory
///
/// Cards report open for the first `open_polls` reads of their list and
/// complete afterwards.
#[derive(Debug, Default)]
pub struct InMemoryBoard {
    state: Mutex<BoardState>,
    open_polls: usize,
    fail_on: Option<(FailOn, BoardError)>,
}

impl InMemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards stay open for this many polls of their list
    #[must_use]
    pub fn with_open_polls(mut self, polls: usize) -> Self {
        self.open_polls = polls;
        self
    }

    /// Cards never complete
    #[must_use]
    pub fn never_complete(self) -> Self {
        self.with_open_polls(usize::MAX)
    }

    /// Fail every call of one kind with `error`
    #[must_use]
    pub fn failing(mut self, call: FailOn, error: BoardError) -> Self {
        self.fail_on = Some((call, error));
        self
    }

    fn check(&self, call: FailOn) -> Result<(), BoardError> {
        match &self.fail_on {
            Some((failing, error)) if *failing == call => Err(error.clone()),
            _ => Ok(()),
        }
    }

    /// List names in creation order
    pub fn list_names(&self) -> Vec<String> {
        self.state.lock().lists.keys().map(|(_, name)| name.clone()).collect()
    }

    /// Cards created on a list, by list name
    pub fn cards_on(&self, list: &str) -> Vec<NewCard> {
        let state = self.state.lock();
        state
            .list_by_name(list)
            .and_then(|id| state.cards.get(id))
            .map(|cards| cards.iter().map(|c| c.card.clone()).collect())
            .unwrap_or_default()
    }

    /// Times a list was polled, by list name
    pub fn polls_on(&self, list: &str) -> usize {
        let state = self.state.lock();
        state
            .list_by_name(list)
            .and_then(|id| state.polls.get(id))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl BoardClient for InMemoryBoard {
    async fn get_or_create_list(&self, board: &str, name: &str) -> Result<ListId, BoardError> {
        self.check(FailOn::GetOrCreateList)?;
        let mut state = self.state.lock();
        let key = (board.to_string(), name.to_string());
        if let Some(id) = state.lists.get(&key) {
            return Ok(id.clone());
        }
        let id = ListId(state.next_id("list"));
        state.lists.insert(key, id.clone());
        Ok(id)
    }

    async fn create_card(&self, list: &ListId, card: &NewCard) -> Result<CardId, BoardError> {
        self.check(FailOn::CreateCard)?;
        let mut state = self.state.lock();
        if !state.lists.values().any(|id| id == list) {
            return Err(BoardError::NotFound(format!("list {list}")));
        }
        let id = CardId(state.next_id("card"));
        state.cards.entry(list.clone()).or_default().push(StoredCard {
            id: id.clone(),
            card: card.clone(),
        });
        Ok(id)
    }

    async fn list_cards(&self, list: &ListId) -> Result<Vec<Card>, BoardError> {
        self.check(FailOn::ListCards)?;
        let mut state = self.state.lock();
        let polls = state.polls.entry(list.clone()).or_default();
        *polls += 1;
        let complete = *polls > self.open_polls;
        Ok(state
            .cards
            .get(list)
            .map(|cards| {
                cards
                    .iter()
                    .map(|c| Card {
                        id: c.id.clone(),
                        name: c.card.name.clone(),
                        complete,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
