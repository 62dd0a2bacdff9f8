use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use fs2::FileExt;
use tracing::debug;

use crate::error::PersistError;
use crate::task::{Task, TaskKind, DATE_FORMAT};

/// Separates fields on a stored line. Task names may not contain it.
pub const FIELD_DELIMITER: char = '|';

pub fn load(path: &Path) -> Result<Vec<Task>, PersistError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(PersistError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let mut tasks = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let task = decode_line(line).map_err(|reason| PersistError::Malformed {
            line: idx + 1,
            reason,
        })?;
        tasks.push(task);
    }
    debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
    Ok(tasks)
}

/// Rewrites the whole file. The new content goes to a sibling temp file first
/// and is renamed over the target, so the old file survives a failed write.
pub fn save(path: &Path, tasks: &[Task]) -> Result<(), PersistError> {
    let mut body = String::new();
    for task in tasks {
        body.push_str(&encode_line(task));
        body.push('\n');
    }

    create_parent(path)?;
    let tmp = temp_path(path);
    let file = File::create(&tmp)?;
    let written = write_synced(file, body.as_bytes()).and_then(|()| fs::rename(&tmp, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    debug!(path = %path.display(), count = tasks.len(), "saved tasks");
    Ok(())
}

fn write_synced(mut file: File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.sync_all()
}

/// Exclusive hold on a data file for as long as the value lives.
///
/// The lock sits on a sibling `<file>.lock`, since `save` replaces the data
/// file itself. Released when dropped.
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
    path: PathBuf,
}

impl StoreLock {
    pub fn acquire(data_path: &Path) -> Result<Self, PersistError> {
        create_parent(data_path)?;
        let path = sibling(data_path, ".lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => {}
            Err(err) if err.kind() == fs2::lock_contended_error().kind() => {
                return Err(PersistError::Busy(data_path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        }
        debug!(lock = %path.display(), "store locked");
        Ok(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    sibling(path, ".tmp")
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("tasks"));
    name.push(suffix);
    path.with_file_name(name)
}

fn encode_line(task: &Task) -> String {
    let done = if task.is_done() { '1' } else { '0' };
    let mut line = format!("{} | {} | {}", task.kind().tag(), done, task.name());
    match task.kind() {
        TaskKind::Todo => {}
        TaskKind::Deadline { by } => {
            line.push_str(&format!(" | {}", by.format(DATE_FORMAT)));
        }
        TaskKind::Event { from, to } => {
            line.push_str(&format!(
                " | {} | {}",
                from.format(DATE_FORMAT),
                to.format(DATE_FORMAT)
            ));
        }
    }
    line
}

fn decode_line(line: &str) -> Result<Task, String> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    let [tag, done, name, dates @ ..] = fields.as_slice() else {
        return Err(format!("expected at least 3 fields, found {}", fields.len()));
    };

    let done = match *done {
        "1" => true,
        "0" => false,
        other => return Err(format!("invalid done flag `{other}`")),
    };
    if name.is_empty() {
        return Err("empty task name".to_string());
    }

    let kind = match (*tag, dates) {
        ("T", []) => TaskKind::Todo,
        ("D", [by]) => TaskKind::Deadline { by: decode_date(by)? },
        ("E", [from, to]) => TaskKind::Event {
            from: decode_date(from)?,
            to: decode_date(to)?,
        },
        ("T" | "D" | "E", _) => {
            return Err(format!("wrong number of fields for `{tag}` task"));
        }
        (other, _) => return Err(format!("unknown task tag `{other}`")),
    };

    let mut task = Task::new(*name, kind);
    if done {
        task.mark_as_done();
    }
    Ok(task)
}

fn decode_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| format!("invalid date `{s}`"))
}
