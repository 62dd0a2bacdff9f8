pub mod input;
pub mod ui;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::{CommandError, PersistError};
use crate::persistence::{self, StoreLock};
use crate::todolist::TodoList;
use input::{parse_command, Command};

/// Result of handling one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keep_running: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keep_running: true,
        }
    }

    fn last(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keep_running: false,
        }
    }
}

#[derive(Debug)]
enum Failure {
    Command(CommandError),
    Save(PersistError),
}

impl From<CommandError> for Failure {
    fn from(err: CommandError) -> Self {
        Failure::Command(err)
    }
}

/// One task list bound to one data file for the lifetime of a run.
///
/// The session holds an exclusive lock on the file, so a second session on
/// the same path (another `repl`, or an `exec`) is refused until this one ends.
#[derive(Debug)]
pub struct Session {
    list: TodoList,
    path: PathBuf,
    _lock: StoreLock,
}

impl Session {
    /// Locks `path` and loads the list from it. Fails with
    /// [`PersistError::Busy`] if another session holds the file. A missing or
    /// unreadable file starts the session with an empty list; that failure
    /// is only logged.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let lock = StoreLock::acquire(&path)?;
        let list = match persistence::load(&path) {
            Ok(tasks) => {
                info!(path = %path.display(), count = tasks.len(), "task list loaded");
                TodoList::from_tasks(tasks)
            }
            Err(PersistError::NotFound(_)) => {
                info!(path = %path.display(), "no data file yet, starting with an empty list");
                TodoList::default()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not load task list, starting empty");
                TodoList::default()
            }
        };
        Ok(Self {
            list,
            path,
            _lock: lock,
        })
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn greeting(&self) -> String {
        ui::greeting(self.list.len(), self.list.done_count())
    }

    /// Processes one raw input line and returns the text to show.
    ///
    /// Errors never escape: they are rendered into the reply. A mutation whose
    /// save fails is rolled back, so memory and disk stay in step.
    pub fn handle(&mut self, line: &str) -> Reply {
        debug!(input = line, "handling command");
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                debug!(error = %err, "rejected input");
                return Reply::say(err.to_string());
            }
        };

        let snapshot = command.is_mutation().then(|| self.list.clone());
        match self.execute(command) {
            Ok(reply) => reply,
            Err(failure) => {
                if let Some(previous) = snapshot {
                    self.list = previous;
                }
                match failure {
                    Failure::Command(err) => {
                        debug!(error = %err, "command failed");
                        Reply::say(err.to_string())
                    }
                    Failure::Save(err) => {
                        error!(path = %self.path.display(), error = %err, "could not save task list");
                        Reply::say(ui::failure(&err))
                    }
                }
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Reply, Failure> {
        let text = match command {
            Command::List => return Ok(Reply::say(ui::task_list(&self.list.items))),
            Command::Find { query } => {
                return Ok(Reply::say(ui::search_results(&self.list.find(&query))));
            }
            Command::Help => return Ok(Reply::say(ui::USAGE)),
            Command::Unknown(keyword) => return Ok(Reply::say(ui::unknown_command(&keyword))),
            Command::Exit => return Ok(Reply::last(ui::FAREWELL)),

            Command::Todo { name } => {
                let task = self.list.add_todo(&name)?.clone();
                ui::added(&task, self.list.len())
            }
            Command::Deadline { name, by } => {
                let task = self.list.add_deadline(&name, by)?.clone();
                ui::added(&task, self.list.len())
            }
            Command::Event { name, from, to } => {
                let task = self.list.add_event(&name, from, to)?.clone();
                ui::added(&task, self.list.len())
            }
            Command::Mark(n) => ui::marked(self.list.mark_done(n)?),
            Command::Unmark(n) => ui::unmarked(self.list.mark_undone(n)?),
            Command::Delete(n) => {
                let task = self.list.delete(n.saturating_sub(1))?;
                ui::deleted(&task, self.list.len())
            }
        };
        persistence::save(&self.path, &self.list.items).map_err(Failure::Save)?;
        Ok(Reply::say(text))
    }
}

/// Interactive loop: greet, then answer each line until `bye` or end of input.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "{}", session.greeting())?;
    output.flush()?;
    for line in input.lines() {
        let reply = session.handle(&line?);
        writeln!(output, "{}", reply.text)?;
        output.flush()?;
        if !reply.keep_running {
            return Ok(());
        }
    }
    info!("input closed, ending session");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(dir.path().join("tasks.txt")).unwrap();
        (dir, session)
    }

    #[test]
    fn starts_empty_without_a_file() {
        let (_dir, mut s) = session();
        assert!(s.list().is_empty());
        assert_eq!(s.handle("list").text, ui::EMPTY_LIST);
    }

    #[test]
    fn mutations_are_saved() {
        let (_dir, mut s) = session();
        s.handle("todo Buy honey");
        s.handle("mark 1");
        let stored = persistence::load(s.path()).unwrap();
        assert_eq!(stored, s.list().items);
        assert!(stored[0].is_done());
    }

    #[test]
    fn failed_commands_do_not_touch_the_list() {
        let (_dir, mut s) = session();
        s.handle("todo a");
        let reply = s.handle("delete 2");
        assert_eq!(reply.text, CommandError::TaskNotFound(2).to_string());
        assert!(reply.keep_running);
        assert_eq!(s.list().len(), 1);
    }

    #[test]
    fn bye_ends_the_session() {
        let (_dir, mut s) = session();
        let reply = s.handle("bye");
        assert!(!reply.keep_running);
        assert_eq!(reply.text, ui::FAREWELL);
    }

    #[test]
    fn unknown_keywords_show_usage() {
        let (_dir, mut s) = session();
        let reply = s.handle("dance");
        assert!(reply.text.starts_with("Unknown command `dance`."));
        assert!(reply.text.contains("deadline <description> /by <YYYY-MM-DD>"));
        assert!(reply.keep_running);
    }

    #[test]
    fn save_failure_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the data file should be makes the rename fail.
        let path = dir.path().join("tasks.txt");
        std::fs::create_dir(&path).unwrap();
        let mut s = Session::open(&path).unwrap();
        let reply = s.handle("todo doomed");
        assert!(reply.text.starts_with("Something went wrong:"));
        assert!(s.list().is_empty());
        assert!(path.is_dir());
    }

    #[test]
    fn failed_save_keeps_previous_file_and_list() {
        let (dir, mut s) = session();
        s.handle("todo keep me");
        s.handle("deadline file taxes /by 2025-04-15");
        let path = dir.path().join("tasks.txt");
        let file_before = std::fs::read_to_string(&path).unwrap();
        let list_before = s.list().clone();

        // The temp file cannot be created while a directory sits in its place.
        std::fs::create_dir(dir.path().join("tasks.txt.tmp")).unwrap();
        for line in ["todo lost", "mark 1", "delete 2"] {
            let reply = s.handle(line);
            assert!(reply.text.starts_with("Something went wrong:"), "{line}");
            assert_eq!(std::fs::read_to_string(&path).unwrap(), file_before, "{line}");
            assert_eq!(s.list(), &list_before, "{line}");
        }
    }

    #[test]
    fn second_session_on_same_file_is_refused() {
        let (dir, mut first) = session();
        let path = dir.path().join("tasks.txt");
        first.handle("todo from first");

        let err = Session::open(&path).unwrap_err();
        assert!(matches!(err, PersistError::Busy(ref p) if p == &path));

        first.handle("mark 1");
        drop(first);

        let mut second = Session::open(&path).unwrap();
        second.handle("todo from second");
        let names: Vec<String> = persistence::load(&path)
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, ["from first", "from second"]);
        assert!(second.list().items[0].is_done());
    }

    #[test]
    fn run_stops_at_bye() {
        let (_dir, mut s) = session();
        let input = b"todo a\nbye\ntodo never\n";
        let mut out = Vec::new();
        run(&mut s, &input[..], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with(&ui::greeting(0, 0)));
        assert!(out.trim_end().ends_with(ui::FAREWELL));
        assert_eq!(s.list().len(), 1);
    }

    #[test]
    fn run_ends_at_end_of_input() {
        let (_dir, mut s) = session();
        let mut out = Vec::new();
        run(&mut s, &b"todo a\ntodo b"[..], &mut out).unwrap();
        assert_eq!(s.list().len(), 2);
    }
}
