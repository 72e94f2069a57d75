//! In-memory task store.
//!
//! Single source of truth for all task records. Insertion order is
//! preserved so listings stay stable across mutations and reloads.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Ordered collection of tasks with id lookup.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Append a task and return a reference to the stored record.
    pub fn insert(&mut self, task: Task) -> &Task {
        self.tasks.push(task);
        self.tasks.last().expect("just pushed")
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove and return the task with the given id, if present.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Tasks without a scheduled start, in insertion order.
    pub fn inbox(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_scheduled())
    }

    /// Tasks with a scheduled start, in insertion order.
    pub fn scheduled(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_scheduled())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}
