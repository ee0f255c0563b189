//! Maildir-backed message source.
//!
//! Unread mail lives in `new/`; once processed a message is moved to `cur/`
//! with the Maildir "seen" flag, the same way a mail client marks it read.

use crate::error::Result;
use crate::models::RawMessage;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const NEW: &str = "new";
const CUR: &str = "cur";
const SEEN_SUFFIX: &str = ":2,S";

pub struct Maildir {
    root: PathBuf,
}

impl Maildir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Unread messages in file-name order, read lazily one at a time.
    pub fn unread(&self) -> Result<UnreadMessages> {
        let new_dir = self.root.join(NEW);
        let mut paths = Vec::new();
        for entry in fs::read_dir(&new_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();
        debug!(dir = %new_dir.display(), count = paths.len(), "found unread messages");
        Ok(UnreadMessages {
            paths: paths.into_iter(),
        })
    }

    /// Moves message `id` from `new/` to `cur/` with the seen flag.
    pub fn mark_seen(&self, id: &str) -> Result<PathBuf> {
        let cur_dir = self.root.join(CUR);
        fs::create_dir_all(&cur_dir)?;
        let target = cur_dir.join(format!("{id}{SEEN_SUFFIX}"));
        fs::rename(self.root.join(NEW).join(id), &target)?;
        Ok(target)
    }
}

/// Iterator over the files in `new/`.
pub struct UnreadMessages {
    paths: std::vec::IntoIter<PathBuf>,
}

impl Iterator for UnreadMessages {
    type Item = Result<RawMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(
            fs::read(&path)
                .map(|bytes| RawMessage { id, bytes })
                .map_err(Into::into),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}
