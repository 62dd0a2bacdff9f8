use std::fmt;

use chrono::NaiveDate;

/// Calendar date format used for input, display and storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Variant-specific part of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { by: NaiveDate },
    Event { from: NaiveDate, to: NaiveDate },
}

impl TaskKind {
    /// One-letter tag shown in listings and written to the data file.
    pub fn tag(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    /// Builds a task as given. Name validation happens in
    /// [`TodoList`](crate::todolist::TodoList) and the data-file reader.
    pub fn new(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            name: name.into(),
            done: false,
            kind,
        }
    }

    pub fn todo(name: impl Into<String>) -> Self {
        Self::new(name, TaskKind::Todo)
    }

    pub fn deadline(name: impl Into<String>, by: NaiveDate) -> Self {
        Self::new(name, TaskKind::Deadline { by })
    }

    pub fn event(name: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(name, TaskKind::Event { from, to })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_as_done(&mut self) {
        self.done = true;
    }

    pub fn mark_as_undone(&mut self) {
        self.done = false;
    }

    /// The display line including its trailing newline.
    pub fn render(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.done { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.kind.tag(), check, self.name)?;
        match self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by.format(DATE_FORMAT)),
            TaskKind::Event { from, to } => write!(
                f,
                " (from: {} to: {})",
                from.format(DATE_FORMAT),
                to.format(DATE_FORMAT)
            ),
        }
    }
}
