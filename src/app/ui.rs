//! Reply text shown to the user.

use crate::task::Task;

pub const EMPTY_LIST: &str = "There is currently nothing on the list!";
pub const NO_MATCHES: &str = "No tasks match that search.";
pub const FAREWELL: &str = "Bye! Your tasks are saved. See you soon.";

pub const USAGE: &str = "\
Commands:
  todo <description>
  deadline <description> /by <YYYY-MM-DD>
  event <description> /from <YYYY-MM-DD> /to <YYYY-MM-DD>
  mark <number>
  unmark <number>
  delete <number>
  list
  find <text>
  help
  bye";

pub fn greeting(total: usize, done: usize) -> String {
    match total {
        0 => "Hello! Your list is empty. What shall we do?".to_string(),
        1 => format!("Hello! You have 1 task on the list ({done} done). What shall we do?"),
        n => format!("Hello! You have {n} tasks on the list ({done} done). What shall we do?"),
    }
}

/// Numbered lines, `1.[T][ ] name`, one per task.
pub fn numbered<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    tasks
        .into_iter()
        .enumerate()
        .map(|(i, t)| format!("{}.{}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        EMPTY_LIST.to_string()
    } else {
        format!("Here are the tasks on your list:\n{}", numbered(tasks))
    }
}

pub fn search_results(matches: &[&Task]) -> String {
    if matches.is_empty() {
        NO_MATCHES.to_string()
    } else {
        format!(
            "Here are the matching tasks:\n{}",
            numbered(matches.iter().copied())
        )
    }
}

pub fn added(task: &Task, total: usize) -> String {
    format!("Added:\n  {task}\nNow there {}.", count_phrase(total))
}

pub fn marked(task: &Task) -> String {
    format!("Marked this task as done:\n  {task}")
}

pub fn unmarked(task: &Task) -> String {
    format!("Marked this task as not done yet:\n  {task}")
}

pub fn deleted(task: &Task, remaining: usize) -> String {
    format!("Removed:\n  {task}\nNow there {}.", count_phrase(remaining))
}

pub fn unknown_command(keyword: &str) -> String {
    format!("Unknown command `{keyword}`.\n{USAGE}")
}

pub fn failure(err: &dyn std::fmt::Display) -> String {
    format!("Something went wrong: {err}")
}

fn count_phrase(n: usize) -> String {
    match n {
        1 => "is 1 task on the list".to_string(),
        n => format!("are {n} tasks on the list"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_from_one() {
        let mut b = Task::todo("b");
        b.mark_as_done();
        let tasks = vec![Task::todo("a"), b];
        assert_eq!(numbered(&tasks), "1.[T][ ] a\n2.[T][X] b");
    }

    #[test]
    fn empty_states() {
        assert_eq!(task_list(&[]), EMPTY_LIST);
        assert_eq!(search_results(&[]), NO_MATCHES);
    }

    #[test]
    fn pluralises_counts() {
        assert_eq!(
            greeting(1, 0),
            "Hello! You have 1 task on the list (0 done). What shall we do?"
        );
        assert_eq!(
            greeting(3, 2),
            "Hello! You have 3 tasks on the list (2 done). What shall we do?"
        );
        assert!(added(&Task::todo("x"), 2).ends_with("Now there are 2 tasks on the list."));
        assert!(deleted(&Task::todo("x"), 1).ends_with("Now there is 1 task on the list."));
    }
}
