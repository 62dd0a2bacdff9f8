use chrono::NaiveDate;

use crate::error::CommandError;
use crate::persistence::FIELD_DELIMITER;
use crate::task::Task;

/// Ordered task collection. Insertion order is display order and storage order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub items: Vec<Task>,
}

impl TodoList {
    pub fn from_tasks(items: Vec<Task>) -> Self {
        Self { items }
    }

    pub fn add_todo(&mut self, name: &str) -> Result<&Task, CommandError> {
        let name = checked_name(name, "Todo task")?;
        Ok(self.push(Task::todo(name)))
    }

    pub fn add_deadline(&mut self, name: &str, by: NaiveDate) -> Result<&Task, CommandError> {
        let name = checked_name(name, "Deadline task")?;
        Ok(self.push(Task::deadline(name, by)))
    }

    pub fn add_event(
        &mut self,
        name: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<&Task, CommandError> {
        let name = checked_name(name, "Event task")?;
        Ok(self.push(Task::event(name, from, to)))
    }

    fn push(&mut self, task: Task) -> &Task {
        self.items.push(task);
        &self.items[self.items.len() - 1]
    }

    /// `number` is 1-based.
    pub fn mark_done(&mut self, number: usize) -> Result<&Task, CommandError> {
        let task = self.get_mut(number)?;
        task.mark_as_done();
        Ok(task)
    }

    /// `number` is 1-based.
    pub fn mark_undone(&mut self, number: usize) -> Result<&Task, CommandError> {
        let task = self.get_mut(number)?;
        task.mark_as_undone();
        Ok(task)
    }

    /// Removes the task at 0-based `idx`; later tasks shift down by one.
    pub fn delete(&mut self, idx: usize) -> Result<Task, CommandError> {
        if idx < self.items.len() {
            Ok(self.items.remove(idx))
        } else {
            Err(CommandError::TaskNotFound(idx + 1))
        }
    }

    /// Tasks whose name contains `query`, case-sensitively, in list order.
    pub fn find(&self, query: &str) -> Vec<&Task> {
        self.items
            .iter()
            .filter(|t| t.name().contains(query))
            .collect()
    }

    fn get_mut(&mut self, number: usize) -> Result<&mut Task, CommandError> {
        number
            .checked_sub(1)
            .and_then(|idx| self.items.get_mut(idx))
            .ok_or(CommandError::TaskNotFound(number))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|t| t.is_done()).count()
    }
}

/// Names must be non-blank and free of the storage delimiter.
fn checked_name<'a>(name: &'a str, what: &'static str) -> Result<&'a str, CommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::EmptyDescription(what));
    }
    if name.contains(FIELD_DELIMITER) {
        return Err(CommandError::ReservedCharacter);
    }
    Ok(name)
}
