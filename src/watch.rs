//! `--watch`: re-highlight whenever a document, the word map or the
//! settings file changes on disk.
//!
//! File system notifications arrive on notify's own thread. They are
//! forwarded as paths over a channel and turned into [`HostEvent`]s on the
//! runtime's single thread, where the highlighter handles them one by one.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use wordlight_core::{
    Command, Document, EventBus, EventHandler, Host, HostEvent, Settings, WordHighlighter,
};

use crate::host::TerminalHost;

pub async fn run<W: Write>(
    mut host: TerminalHost<W>,
    documents: Vec<Document>,
    settings_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let bus = EventBus::new();
    let mut events = EventHandler::new(bus.subscribe());

    let (tx, mut changes) = mpsc::unbounded_channel::<PathBuf>();
    let mut watcher = DirWatcher::new(tx)?;

    let mut highlighter = WordHighlighter::activate(&mut host);
    for doc in documents {
        if let Some(path) = doc.path() {
            watcher.watch_file(path);
        }
        host.open(doc);
    }
    for id in host.document_ids() {
        host.focus(id);
        let _ = highlighter.handle_event(&HostEvent::ActiveDocumentChanged(Some(id)), &mut host);
    }
    if let Some(path) = host.config_path() {
        watcher.watch_file(&path);
    }
    if let Some(path) = &settings_path {
        watcher.watch_file(path);
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut stopping = false;

    loop {
        tokio::select! {
            event = events.next() => {
                let Some(event) = event else { break };
                if highlighter.handle_event(&event, &mut host).is_break() {
                    break;
                }
            }
            Some(path) = changes.recv() => {
                on_file_changed(&path, &mut host, &bus, &mut watcher, settings_path.as_deref());
            }
            _ = &mut shutdown, if !stopping => {
                stopping = true;
                bus.emit(HostEvent::Shutdown);
            }
        }
    }

    highlighter.deactivate(&mut host);
    Ok(())
}

/// Translates a changed path into host events.
fn on_file_changed<W: Write>(
    path: &Path,
    host: &mut TerminalHost<W>,
    bus: &EventBus,
    watcher: &mut DirWatcher,
    settings_path: Option<&Path>,
) {
    if settings_path.is_some_and(|p| same_file(p, path)) {
        match Settings::load_from(path) {
            Ok(settings) => {
                let affects_config_path = host.set_settings(settings);
                if affects_config_path {
                    if let Some(config) = host.config_path() {
                        watcher.watch_file(&config);
                    }
                }
                bus.emit(HostEvent::ConfigurationChanged { affects_config_path });
            }
            Err(err) => tracing::warn!(path = %path.display(), "Ignoring settings change: {err}"),
        }
        return;
    }

    if host.config_path().is_some_and(|p| same_file(&p, path)) {
        bus.emit(HostEvent::Command(Command::Reload));
        return;
    }

    let Some(id) = host
        .document_ids()
        .into_iter()
        .find(|&id| host.document_path(id).is_some_and(|p| same_file(p, path)))
    else {
        return;
    };

    if let Err(err) = host.reload_document(id) {
        tracing::warn!(path = %path.display(), "Cannot reload document: {err}");
        return;
    }
    if host.focus(id) {
        bus.emit(HostEvent::ActiveDocumentChanged(Some(id)));
    }
    bus.emit(HostEvent::DocumentChanged(id));
}

/// Compares paths after resolving symlinks and relative components.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Watches parent directories, so files replaced by rename-on-save keep
/// being noticed.
struct DirWatcher {
    inner: RecommendedWatcher,
    dirs: HashSet<PathBuf>,
}

impl DirWatcher {
    fn new(tx: mpsc::UnboundedSender<PathBuf>) -> notify::Result<Self> {
        let inner = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Ok(_) => {}
                Err(err) => tracing::warn!("File watcher error: {err}"),
            }
        })?;
        Ok(Self {
            inner,
            dirs: HashSet::new(),
        })
    }

    fn watch_file(&mut self, file: &Path) {
        let file = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
        let Some(dir) = file.parent().map(Path::to_path_buf) else {
            return;
        };
        if self.dirs.contains(&dir) {
            return;
        }
        match self.inner.watch(&dir, RecursiveMode::NonRecursive) {
            Ok(()) => {
                tracing::debug!(dir = %dir.display(), "Watching");
                self.dirs.insert(dir);
            }
            Err(err) => tracing::warn!(dir = %dir.display(), "Cannot watch: {err}"),
        }
    }
}
