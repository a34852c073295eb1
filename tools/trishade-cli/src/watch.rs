//! Watch command - re-validate (and re-render) a WGSL file on every save
//!
//! The parent directory is watched non-recursively and events are filtered
//! down to the shader file, so editors that save via rename still trigger.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{DebouncedEventKind, new_debouncer};
use trishade_core::{ColorConfig, Config, LoadedShader, ShaderSource, TriangleRenderer};

use crate::render::RenderOverrides;

/// Debounce duration for file changes (batches rapid saves)
const DEBOUNCE_DURATION: Duration = Duration::from_millis(100);

#[derive(Args)]
pub struct WatchArgs {
    /// WGSL file to watch
    pub path: PathBuf,

    /// Re-render to this PNG after every valid change
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

/// Event received from the file watcher
#[derive(Debug)]
pub enum WatchEvent {
    /// The watched file was written, created or replaced
    Changed,
    /// Watch error occurred
    Error(String),
    /// The watcher thread is gone
    Closed,
}

/// Debounced watcher for a single file.
pub struct FileWatcher {
    rx: mpsc::Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    /// The debouncer (holds the watcher)
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
    /// Canonical path of the watched file
    target: PathBuf,
}

impl FileWatcher {
    pub fn new(path: &Path) -> Result<Self> {
        let target = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let dir = target
            .parent()
            .with_context(|| format!("{} has no parent directory", target.display()))?
            .to_path_buf();

        let (tx, rx) = mpsc::channel();
        let mut debouncer =
            new_debouncer(DEBOUNCE_DURATION, tx).context("Failed to create file watcher")?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", dir.display()))?;

        Ok(Self {
            rx,
            _debouncer: debouncer,
            target,
        })
    }

    /// Path of the file being watched.
    pub fn target(&self) -> &Path {
        &self.target
    }

    fn touches_target(&self, events: &[notify_debouncer_mini::DebouncedEvent]) -> bool {
        events.iter().any(|event| {
            matches!(event.kind, DebouncedEventKind::Any)
                && (event.path == self.target
                    || event.path.canonicalize().is_ok_and(|p| p == self.target))
        })
    }

    /// Block until the file changes or an error occurs.
    pub fn wait_for_changes(&self) -> WatchEvent {
        loop {
            match self.rx.recv() {
                Ok(Ok(events)) => {
                    if self.touches_target(&events) {
                        return WatchEvent::Changed;
                    }
                    // Another file in the directory; keep waiting
                }
                Ok(Err(e)) => return WatchEvent::Error(format!("Watch error: {}", e)),
                Err(_) => return WatchEvent::Closed,
            }
        }
    }

    /// Non-blocking check for changes
    ///
    /// Returns None if no changes detected yet.
    pub fn try_recv(&self) -> Option<WatchEvent> {
        match self.rx.try_recv() {
            Ok(Ok(events)) => self.touches_target(&events).then_some(WatchEvent::Changed),
            Ok(Err(e)) => Some(WatchEvent::Error(format!("Watch error: {}", e))),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(WatchEvent::Closed),
        }
    }
}

/// State carried between reloads.
struct Session {
    source: ShaderSource,
    out: Option<PathBuf>,
    config: Config,
    renderer: Option<TriangleRenderer>,
}

impl Session {
    fn new(path: PathBuf, out: Option<PathBuf>, config: Config) -> Self {
        Self {
            source: ShaderSource::File(path),
            out,
            config,
            renderer: None,
        }
    }

    /// Validate the file and, if an output is set, render it.
    ///
    /// A failed reload leaves the previous pipeline in place.
    fn refresh(&mut self) -> Result<()> {
        let shader = LoadedShader::load(&self.source)?;
        println!("OK  {}", self.source.label());

        let Some(out) = &self.out else {
            return Ok(());
        };
        let renderer = match &mut self.renderer {
            Some(renderer) => {
                renderer.reload(&shader)?;
                renderer
            }
            None => self
                .renderer
                .insert(TriangleRenderer::new(&self.config.render, &shader)?),
        };

        let ColorConfig {
            triangle,
            background,
        } = self.config.colors;
        renderer.render_to_png(triangle, background, out)?;
        println!("    wrote {}", out.display());
        Ok(())
    }
}

pub fn execute(args: WatchArgs, mut config: Config) -> Result<()> {
    args.overrides.apply(&mut config);
    config.render.validate()?;

    let watcher = FileWatcher::new(&args.path)?;
    tracing::info!("Watching {}", watcher.target().display());

    let mut session = Session::new(args.path, args.out, config);
    if let Err(e) = session.refresh() {
        println!("ERR {:#}", e);
    }

    loop {
        match watcher.wait_for_changes() {
            WatchEvent::Changed => {
                tracing::debug!("Change detected");
                if let Err(e) = session.refresh() {
                    println!("ERR {:#}", e);
                }
            }
            WatchEvent::Error(e) => tracing::warn!("{}", e),
            WatchEvent::Closed => anyhow::bail!("File watcher stopped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Instant;
    use tempfile::TempDir;
    use trishade_shader::TRIANGLE_WGSL;

    #[test]
    fn test_refresh_without_output_only_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("triangle.wgsl");
        fs::write(&path, TRIANGLE_WGSL).unwrap();

        let mut session = Session::new(path.clone(), None, Config::default());
        assert!(session.refresh().is_ok());
        assert!(session.renderer.is_none());

        fs::write(&path, "@vertex fn vs_main(").unwrap();
        assert!(session.refresh().is_err());
    }

    #[test]
    fn test_watcher_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        assert!(FileWatcher::new(&dir.path().join("missing.wgsl")).is_err());
    }

    #[test]
    fn test_watcher_sees_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("triangle.wgsl");
        fs::write(&path, TRIANGLE_WGSL).unwrap();

        let watcher = FileWatcher::new(&path).unwrap();
        assert_eq!(watcher.target(), path.canonicalize().unwrap());
        fs::write(&path, TRIANGLE_WGSL.replace("vs_main", "vs_main ")).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut changed = false;
        while Instant::now() < deadline {
            if let Some(WatchEvent::Changed) = watcher.try_recv() {
                changed = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(changed, "no change event within 5s");
    }
}
