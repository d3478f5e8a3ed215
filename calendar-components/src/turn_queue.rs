//! Deferred work executed on the next event-loop turn.
//!
//! Components push follow-up work here instead of running it inside the
//! handler that produced it. The host drains one turn at a time, so work
//! deferred while a turn runs lands in the following turn.

use std::collections::VecDeque;

/// FIFO queue of tasks grouped into turns.
#[derive(Debug)]
pub struct TurnQueue<T> {
    tasks: VecDeque<T>,
}

impl<T> Default for TurnQueue<T> {
    fn default() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }
}

impl<T> TurnQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` for the next turn.
    pub fn defer(&mut self, task: T) {
        self.tasks.push_back(task);
    }

    /// Removes every task scheduled so far, oldest first.
    pub fn take_turn(&mut self) -> Vec<T> {
        self.tasks.drain(..).collect()
    }

    /// Drops all pending tasks.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
