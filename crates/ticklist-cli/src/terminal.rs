use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use ticklist_core::{Frontend, Level, Notification, Snapshot};
use tracing::{debug, info};

use crate::render::Renderer;

/// [`Frontend`] for a one-shot terminal command.
///
/// Renders are buffered: only the last snapshot is printed once the
/// command finishes. Notifications go straight to stderr.
#[derive(Debug)]
pub struct TerminalFrontend {
    renderer: Renderer,
    assume_yes: bool,
    export_dir: PathBuf,
    last: RefCell<Option<Snapshot>>,
    saved: RefCell<Option<PathBuf>>,
    saw_error: Cell<bool>,
}

impl TerminalFrontend {
    pub fn new(renderer: Renderer, assume_yes: bool, export_dir: PathBuf) -> Self {
        Self {
            renderer,
            assume_yes,
            export_dir,
            last: RefCell::new(None),
            saved: RefCell::new(None),
            saw_error: Cell::new(false),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn last_snapshot(&self) -> Option<Snapshot> {
        self.last.borrow().clone()
    }

    /// Path of the most recent successful export.
    pub fn saved_export(&self) -> Option<PathBuf> {
        self.saved.borrow().clone()
    }

    /// Whether an error notification was raised.
    pub fn saw_error(&self) -> bool {
        self.saw_error.get()
    }

    fn ask<R: BufRead, W: Write>(prompt: &str, mut input: R, mut out: W) -> io::Result<bool> {
        write!(out, "{prompt} (yes/no) ")?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

impl Frontend for TerminalFrontend {
    fn render(&self, snapshot: &Snapshot) {
        *self.last.borrow_mut() = Some(snapshot.clone());
    }

    fn notify(&self, notification: Notification) {
        if notification.level == Level::Error {
            self.saw_error.set(true);
        }
        let line = self.renderer.notification_line(&notification);
        let _ = writeln!(io::stderr().lock(), "{line}");
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            debug!(prompt, "confirmation assumed");
            return true;
        }
        let stdin = io::stdin();
        Self::ask(prompt, stdin.lock(), io::stderr().lock()).unwrap_or(false)
    }

    fn save_export(&self, file_name: &str, contents: &str) -> Result<(), String> {
        let path = write_export(&self.export_dir, file_name, contents)?;
        info!(path = %path.display(), "export written");
        *self.saved.borrow_mut() = Some(path);
        Ok(())
    }
}

fn write_export(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, String> {
    fs::create_dir_all(dir).map_err(|err| format!("cannot create {}: {err}", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(|err| format!("cannot write {}: {err}", path.display()))?;
    Ok(path)
}
