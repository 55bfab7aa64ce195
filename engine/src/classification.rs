//! Intro sorting game: drop items into the Natural or Man-Made basket.
//!
//! # Invariants
//!
//! - Every item lives in exactly one of `pool`, the natural bin or the
//!   man-made bin.
//! - A bin only ever receives items of its own category.
//! - Completion is edge-triggered: it is armed by the drop that empties the
//!   pool and fires once, `completion_delay` later. Drops after that point
//!   cannot re-arm it.

use std::time::{Duration, Instant};

use matter_types::{Category, INTRO_ITEMS, Item, NonEmptyStaticStr};

use crate::timing::{COMPLETION_DELAY, Deadline};

const PROMPT: NonEmptyStaticStr = NonEmptyStaticStr::new("Drag items to the correct basket!");
const TRY_AGAIN: NonEmptyStaticStr = NonEmptyStaticStr::new("Oops! Try the other basket.");
const ALL_SORTED: NonEmptyStaticStr =
    NonEmptyStaticStr::new("You did it! Let's explore States of Matter!");

/// Result of a drop onto a basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Correct {
        category: Category,
        /// This drop emptied the pool.
        finished: bool,
    },
    Incorrect,
}

/// The line of text shown above the item pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Prompt,
    Correct(Category),
    Incorrect,
    Complete,
}

impl Feedback {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Feedback::Prompt => PROMPT.to_string(),
            Feedback::Correct(category) => format!("Yay! That is {category}!"),
            Feedback::Incorrect => TRY_AGAIN.to_string(),
            Feedback::Complete => ALL_SORTED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Sorting,
    Pending(Deadline),
    Fired,
}

/// Proof that the session finished and its completion delay elapsed.
/// Yielded exactly once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionComplete;

#[derive(Debug, Clone)]
pub struct ClassificationSession {
    items: Vec<Item>,
    pool: Vec<Item>,
    natural_bin: Vec<Item>,
    man_made_bin: Vec<Item>,
    feedback: Feedback,
    completion: Completion,
    completion_delay: Duration,
}

impl Default for ClassificationSession {
    fn default() -> Self {
        Self::new(INTRO_ITEMS, COMPLETION_DELAY)
    }
}

impl ClassificationSession {
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = Item>, completion_delay: Duration) -> Self {
        let items: Vec<Item> = items.into_iter().collect();
        Self {
            pool: items.clone(),
            items,
            natural_bin: Vec::new(),
            man_made_bin: Vec::new(),
            feedback: Feedback::Prompt,
            completion: Completion::Sorting,
            completion_delay,
        }
    }

    /// Start over with the session's items. Any pending completion is discarded.
    pub fn reset(&mut self) {
        self.pool.clone_from(&self.items);
        self.natural_bin.clear();
        self.man_made_bin.clear();
        self.feedback = Feedback::Prompt;
        self.completion = Completion::Sorting;
    }

    /// Try to drop `item_id` into the basket for `target`.
    ///
    /// Returns `None` when the item is not in the pool: a late or duplicate
    /// drop is a normal event, not an error, and leaves the session untouched.
    pub fn submit_drop(
        &mut self,
        item_id: &str,
        target: Category,
        now: Instant,
    ) -> Option<DropOutcome> {
        let Some(index) = self.pool.iter().position(|i| i.id.as_str() == item_id) else {
            tracing::debug!(item_id, "Ignoring drop of item not in pool");
            return None;
        };

        if self.pool[index].category != target {
            tracing::debug!(item_id, ?target, "Incorrect drop");
            self.feedback = Feedback::Incorrect;
            return Some(DropOutcome::Incorrect);
        }

        let item = self.pool.remove(index);
        match target {
            Category::Natural => self.natural_bin.push(item),
            Category::ManMade => self.man_made_bin.push(item),
        }
        self.feedback = Feedback::Correct(target);
        tracing::debug!(item_id, ?target, remaining = self.pool.len(), "Correct drop");

        let finished = self.pool.is_empty() && self.completion == Completion::Sorting;
        if finished {
            self.feedback = Feedback::Complete;
            self.completion = Completion::Pending(Deadline::after(now, self.completion_delay));
            tracing::debug!("All items sorted; completion armed");
        }

        Some(DropOutcome::Correct {
            category: target,
            finished,
        })
    }

    /// Fire the completion once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<SessionComplete> {
        match self.completion {
            Completion::Pending(deadline) if deadline.is_due(now) => {
                self.completion = Completion::Fired;
                Some(SessionComplete)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn pool(&self) -> &[Item] {
        &self.pool
    }

    #[must_use]
    pub fn bin(&self, category: Category) -> &[Item] {
        match category {
            Category::Natural => &self.natural_bin,
            Category::ManMade => &self.man_made_bin,
        }
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pool.is_empty()
    }

    /// When the pending completion will fire, if one is armed.
    #[must_use]
    pub fn completion_due(&self) -> Option<Instant> {
        match self.completion {
            Completion::Pending(deadline) => Some(deadline.at()),
            Completion::Sorting | Completion::Fired => None,
        }
    }
}
