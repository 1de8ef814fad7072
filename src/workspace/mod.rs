// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Tabbed workspace — the keyed directory of open editor and viewer
//! instances.
//!
//! Every tab has a structural identity key; opening a key that is already
//! live focuses the existing instance instead of building a second one, and
//! closing is idempotent because teardown can be triggered both by the user
//! and by navigation. A tab is either mounted (present in the directory,
//! receiving events) or destroyed (removed); there is no cached-but-hidden
//! state, so closing always fully releases.
//!
//! The workspace is shared with relay handlers as `Arc<Mutex<Workspace>>`;
//! [`lock_workspace`] acquires the lock with poison recovery. Mounting
//! installs the workspace as the open-request relay's sole consumer,
//! unmounting clears it.

pub mod editor;
pub mod viewer;

pub use editor::{EditorTab, OutlineRequest, PreviewRequest};
pub use viewer::ViewerTab;

use crate::model::{BackendError, FontBackend, GlyphOutline};
use crate::relay::{GlyphSaved, OpenRequest, Relay, SaveRelay};
use kurbo::Size;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

// ============================================================================
// IDENTITY
// ============================================================================

/// Composite identity of an open tab.
///
/// Structural equality over the real components — never a concatenated
/// string, so a file path or table name containing any separator sequence
/// cannot collide with another key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TabKey {
    /// A read-only table viewer
    Table { file: PathBuf, table: String },
    /// A glyph editor
    Glyph { file: PathBuf, glyph_id: u32 },
}

// ============================================================================
// TABS
// ============================================================================

/// Enum wrapping the open tab kinds
#[derive(Debug)]
pub enum Tab {
    Editor(EditorTab),
    Viewer(ViewerTab),
}

impl Tab {
    /// This tab's identity key
    pub fn key(&self) -> TabKey {
        match self {
            Tab::Editor(tab) => tab.key(),
            Tab::Viewer(tab) => tab.key(),
        }
    }

    /// Propagate a container resize
    pub fn resize(&mut self, size: Size) {
        match self {
            Tab::Editor(tab) => tab.resize(size),
            Tab::Viewer(tab) => tab.resize(size),
        }
    }
}

/// A transient, non-blocking report for the host to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

// ============================================================================
// WORKSPACE
// ============================================================================

/// The keyed directory of live tabs
pub struct Workspace {
    tabs: HashMap<TabKey, Tab>,
    /// Focus order, most recently focused last
    focus_order: Vec<TabKey>,
    open_relay: Relay<OpenRequest>,
    save_relay: SaveRelay,
    canvas_size: Size,
    /// Outline fetches queued for the host to run against the backend
    pending_fetches: Vec<OutlineRequest>,
    notifications: Vec<Notification>,
}

impl Workspace {
    pub fn new(open_relay: Relay<OpenRequest>, save_relay: SaveRelay) -> Self {
        Self {
            tabs: HashMap::new(),
            focus_order: Vec::new(),
            open_relay,
            save_relay,
            canvas_size: Size::ZERO,
            pending_fetches: Vec::new(),
            notifications: Vec::new(),
        }
    }

    // ========================================================================
    // DIRECTORY OPERATIONS
    // ========================================================================

    /// Open the tab for `key`, or focus it if it is already live.
    ///
    /// The factory runs exactly once per live key, no matter how many call
    /// sites request the same key before it closes.
    pub fn open(&mut self, key: TabKey, factory: impl FnOnce() -> Tab) -> &mut Tab {
        if !self.tabs.contains_key(&key) {
            tracing::info!(?key, "opening tab");
        }
        // Bring to front unconditionally: the entry below ensures the tab
        // exists either way
        self.focus_order.retain(|k| k != &key);
        self.focus_order.push(key.clone());

        let canvas_size = self.canvas_size;
        self.tabs.entry(key).or_insert_with(|| {
            let mut tab = factory();
            tab.resize(canvas_size);
            tab
        })
    }

    /// Tear down the tab for `key`, releasing everything it owns.
    /// Closing a key that is not live is a no-op.
    pub fn close(&mut self, key: &TabKey) {
        if self.tabs.remove(key).is_some() {
            tracing::info!(?key, "closing tab");
        }
        self.focus_order.retain(|k| k != key);
    }

    /// Bring a live tab to the front. Unknown keys are ignored.
    pub fn focus(&mut self, key: &TabKey) {
        if !self.tabs.contains_key(key) {
            return;
        }
        self.focus_order.retain(|k| k != key);
        self.focus_order.push(key.clone());
    }

    /// The frontmost tab's key, if any tab is open
    pub fn focused(&self) -> Option<&TabKey> {
        self.focus_order.last()
    }

    pub fn is_open(&self, key: &TabKey) -> bool {
        self.tabs.contains_key(key)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn get(&self, key: &TabKey) -> Option<&Tab> {
        self.tabs.get(key)
    }

    pub fn get_mut(&mut self, key: &TabKey) -> Option<&mut Tab> {
        self.tabs.get_mut(key)
    }

    /// The editor tab for `key`, if it is live and is an editor
    pub fn editor_mut(&mut self, key: &TabKey) -> Option<&mut EditorTab> {
        match self.tabs.get_mut(key) {
            Some(Tab::Editor(tab)) => Some(tab),
            _ => None,
        }
    }

    /// Propagate a container size change to every live tab
    pub fn resize(&mut self, size: Size) {
        self.canvas_size = size;
        for tab in self.tabs.values_mut() {
            tab.resize(size);
        }
    }

    // ========================================================================
    // NOTIFICATIONS
    // ========================================================================

    fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{message}");
        self.notifications.push(Notification { message });
    }

    /// Drain the pending notifications for display
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ========================================================================
    // GLYPH EDITORS AND FETCH COMPLETION
    // ========================================================================

    /// Open (or focus) the editor for a glyph. A newly created tab queues
    /// an outline fetch for the host to run.
    pub fn open_glyph_editor(&mut self, file: PathBuf, glyph_id: u32) -> TabKey {
        let key = TabKey::Glyph {
            file: file.clone(),
            glyph_id,
        };
        let was_open = self.tabs.contains_key(&key);
        self.open(key.clone(), || {
            Tab::Editor(EditorTab::new(file, glyph_id))
        });

        if !was_open
            && let Some(tab) = self.editor_mut(&key)
        {
            let request = tab.begin_outline_load();
            self.pending_fetches.push(request);
        }
        key
    }

    /// Open (or focus) the viewer for a table
    pub fn open_table_viewer(&mut self, file: PathBuf, table: impl Into<String>) -> TabKey {
        let table = table.into();
        let key = TabKey::Table {
            file: file.clone(),
            table: table.clone(),
        };
        self.open(key.clone(), || Tab::Viewer(ViewerTab::new(file, table)));
        key
    }

    /// Re-fetch an editor tab's outline, invalidating any in-flight fetch
    pub fn reload_glyph(&mut self, key: &TabKey) {
        if let Some(tab) = self.editor_mut(key) {
            tab.invalidate_fetches();
            let request = tab.begin_outline_load();
            self.pending_fetches.push(request);
        }
    }

    /// Drain the outline fetches the host should run against the backend
    pub fn take_pending_fetches(&mut self) -> Vec<OutlineRequest> {
        std::mem::take(&mut self.pending_fetches)
    }

    /// Feed a completed outline fetch back in.
    ///
    /// Results whose target tab has closed, or whose context has been
    /// superseded, are discarded silently; fetch failures become transient
    /// notifications and leave the tab's state untouched.
    pub fn complete_outline(
        &mut self,
        request: &OutlineRequest,
        result: Result<GlyphOutline, BackendError>,
    ) {
        let key = TabKey::Glyph {
            file: request.file.clone(),
            glyph_id: request.glyph_id,
        };
        let Some(tab) = self.editor_mut(&key) else {
            tracing::debug!(?key, "outline result for a closed tab, discarding");
            return;
        };

        match result {
            Ok(outline) => {
                tab.apply_outline(request, outline);
            }
            Err(err) => {
                self.notify(format!("Failed to load glyph outline: {err}"));
            }
        }
    }

    // ========================================================================
    // SAVE
    // ========================================================================

    /// Persist an editor tab's outline through the backend.
    ///
    /// On success the save relay broadcasts to every subscribed grid so the
    /// glyph's thumbnail refreshes. On failure the edits stay pending in
    /// the tab and a notification is raised; nothing is rolled back.
    pub fn commit_save(&mut self, key: &TabKey, backend: &dyn FontBackend) -> bool {
        let Some(tab) = self.editor_mut(key) else {
            tracing::warn!(?key, "save requested for a tab that is not an editor");
            return false;
        };
        let file = tab.file().to_path_buf();
        let glyph_id = tab.glyph_id();
        let outline = tab.session.paths().to_vec();

        match backend.save_glyph(&file, glyph_id, &outline) {
            Ok(()) => {
                tracing::info!(glyph_id, file = %file.display(), "glyph saved");
                self.save_relay.broadcast(&GlyphSaved {
                    file,
                    glyph_id,
                    outline,
                });
                true
            }
            Err(err) => {
                self.notify(format!("Failed to save glyph: {err}"));
                false
            }
        }
    }

    /// Handle of the save broadcast channel (for grids to subscribe to)
    pub fn save_relay(&self) -> SaveRelay {
        self.save_relay.clone()
    }
}

// ============================================================================
// MOUNTING AND LOCK HELPERS
// ============================================================================

/// Acquire the workspace lock, recovering from poison.
///
/// If the lock is poisoned (a thread panicked while holding it), this
/// recovers the inner data instead of panicking, keeping the app running.
pub fn lock_workspace(ws: &Arc<Mutex<Workspace>>) -> MutexGuard<'_, Workspace> {
    ws.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Workspace Mutex was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Install the workspace as the open-request relay's sole consumer.
///
/// The handler holds only a weak reference: if the workspace is dropped
/// without unmounting, emits degrade to silent drops instead of keeping the
/// directory alive.
pub fn mount(ws: &Arc<Mutex<Workspace>>) {
    let relay = lock_workspace(ws).open_relay.clone();
    let weak = Arc::downgrade(ws);
    relay.set_handler(move |request: OpenRequest| {
        if let Some(ws) = weak.upgrade() {
            lock_workspace(&ws).open_glyph_editor(request.file, request.glyph_id);
        }
    });
}

/// Deregister the workspace from the open-request relay
pub fn unmount(ws: &Arc<Mutex<Workspace>>) {
    lock_workspace(ws).open_relay.clear_handler();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GlyphPage, GlyphSlot};
    use crate::path::EditablePath;
    use kurbo::{Point, Rect};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn workspace() -> Workspace {
        Workspace::new(Relay::new(), SaveRelay::new())
    }

    fn glyph_key(id: u32) -> TabKey {
        TabKey::Glyph {
            file: PathBuf::from("font.ttf"),
            glyph_id: id,
        }
    }

    fn outline() -> GlyphOutline {
        GlyphOutline {
            paths: vec![EditablePath::from_start(Point::new(5.0, 5.0))],
            advance_width: 600.0,
            bounds: Rect::new(0.0, 0.0, 500.0, 700.0),
            is_composite: false,
            component_glyph_ids: Vec::new(),
        }
    }

    /// Backend stub whose save either succeeds or fails wholesale
    struct StubBackend {
        save_ok: bool,
    }

    impl FontBackend for StubBackend {
        fn fetch_glyph_outline(
            &self,
            _file: &Path,
            _glyph_id: u32,
        ) -> Result<GlyphOutline, BackendError> {
            Ok(outline())
        }

        fn fetch_glyph_page(
            &self,
            _file: &Path,
            _offset: usize,
            _limit: usize,
        ) -> Result<GlyphPage, BackendError> {
            Ok(GlyphPage {
                glyphs: vec![GlyphSlot {
                    glyph_id: 0,
                    name: ".notdef".into(),
                    preview: Vec::new(),
                    advance_width: 600.0,
                }],
                total_count: 1,
                units_per_em: 1000.0,
            })
        }

        fn fetch_hinted_outlines(
            &self,
            _file: &Path,
            _glyph_id: u32,
            pixel_sizes: &[u32],
        ) -> Result<Vec<Vec<EditablePath>>, BackendError> {
            Ok(pixel_sizes.iter().map(|_| Vec::new()).collect())
        }

        fn save_glyph(
            &self,
            file: &Path,
            glyph_id: u32,
            _paths: &[EditablePath],
        ) -> Result<(), BackendError> {
            if self.save_ok {
                Ok(())
            } else {
                Err(BackendError::Io {
                    path: file.to_path_buf(),
                    message: format!("write failed for glyph {glyph_id}"),
                })
            }
        }
    }

    #[test]
    fn open_twice_invokes_factory_once() {
        let mut ws = workspace();
        let calls = AtomicUsize::new(0);

        let key = glyph_key(5);
        ws.open(key.clone(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            Tab::Editor(EditorTab::new(PathBuf::from("font.ttf"), 5))
        });
        ws.open(key.clone(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            Tab::Editor(EditorTab::new(PathBuf::from("font.ttf"), 5))
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(ws.tab_count(), 1);
        assert_eq!(ws.focused(), Some(&key));
    }

    #[test]
    fn close_is_idempotent() {
        let mut ws = workspace();
        let key = ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);

        ws.close(&key);
        assert!(!ws.is_open(&key));
        ws.close(&key); // second close: no-op, no panic
        assert_eq!(ws.tab_count(), 0);
        assert_eq!(ws.focused(), None);
    }

    #[test]
    fn reopen_after_close_builds_a_fresh_instance() {
        let mut ws = workspace();
        let key = ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        let req = ws.take_pending_fetches().remove(0);
        ws.complete_outline(&req, Ok(outline()));
        assert!(ws.editor_mut(&key).unwrap().is_seeded());

        ws.close(&key);
        ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        // No cached state survives a close
        assert!(!ws.editor_mut(&key).unwrap().is_seeded());
    }

    #[test]
    fn focus_moves_reopened_tab_to_front() {
        let mut ws = workspace();
        let key5 = ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        let key6 = ws.open_glyph_editor(PathBuf::from("font.ttf"), 6);
        assert_eq!(ws.focused(), Some(&key6));

        ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        assert_eq!(ws.focused(), Some(&key5));
        assert_eq!(ws.tab_count(), 2);
    }

    #[test]
    fn distinct_files_same_glyph_id_are_distinct_tabs() {
        let mut ws = workspace();
        ws.open_glyph_editor(PathBuf::from("a.ttf"), 5);
        ws.open_glyph_editor(PathBuf::from("b.ttf"), 5);
        assert_eq!(ws.tab_count(), 2);
    }

    #[test]
    fn viewer_and_editor_keys_do_not_collide() {
        let mut ws = workspace();
        ws.open_table_viewer(PathBuf::from("font.ttf"), "name");
        ws.open_table_viewer(PathBuf::from("font.ttf"), "cmap");
        ws.open_glyph_editor(PathBuf::from("font.ttf"), 0);
        assert_eq!(ws.tab_count(), 3);
    }

    #[test]
    fn resize_propagates_to_all_tabs() {
        let mut ws = workspace();
        ws.open_table_viewer(PathBuf::from("font.ttf"), "name");
        ws.resize(Size::new(640.0, 480.0));

        let key = TabKey::Table {
            file: PathBuf::from("font.ttf"),
            table: "name".into(),
        };
        match ws.get(&key).unwrap() {
            Tab::Viewer(tab) => assert_eq!(tab.canvas_size(), Size::new(640.0, 480.0)),
            _ => panic!("expected viewer"),
        }
    }

    #[test]
    fn newly_opened_tab_gets_current_canvas_size() {
        let mut ws = workspace();
        ws.resize(Size::new(640.0, 480.0));
        ws.open_table_viewer(PathBuf::from("font.ttf"), "name");

        let key = TabKey::Table {
            file: PathBuf::from("font.ttf"),
            table: "name".into(),
        };
        match ws.get(&key).unwrap() {
            Tab::Viewer(tab) => assert_eq!(tab.canvas_size(), Size::new(640.0, 480.0)),
            _ => panic!("expected viewer"),
        }
    }

    #[test]
    fn open_queues_one_fetch_and_refocus_queues_none() {
        let mut ws = workspace();
        ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        assert_eq!(ws.take_pending_fetches().len(), 1);

        ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        assert!(ws.take_pending_fetches().is_empty());
    }

    #[test]
    fn stale_result_does_not_touch_another_glyphs_tab() {
        // The §8 scenario: fetch issued for glyph 5, user navigates to
        // glyph 6 (closing 5) before it resolves
        let mut ws = workspace();
        ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        let req5 = ws.take_pending_fetches().remove(0);

        ws.close(&glyph_key(5));
        let key6 = ws.open_glyph_editor(PathBuf::from("font.ttf"), 6);
        let _req6 = ws.take_pending_fetches();

        ws.complete_outline(&req5, Ok(outline()));
        let tab6 = ws.editor_mut(&key6).unwrap();
        assert!(!tab6.is_seeded());
        assert!(tab6.session.paths().is_empty());
        // Stale discard is not an error: no notification raised
        assert!(ws.take_notifications().is_empty());
    }

    #[test]
    fn fetch_failure_raises_notification_and_keeps_state() {
        let mut ws = workspace();
        let key = ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        let req = ws.take_pending_fetches().remove(0);
        ws.complete_outline(&req, Ok(outline()));

        // A reload that fails must leave the applied outline in place
        ws.reload_glyph(&key);
        let retry = ws.take_pending_fetches().remove(0);
        ws.complete_outline(
            &retry,
            Err(BackendError::Io {
                path: PathBuf::from("font.ttf"),
                message: "disk on fire".into(),
            }),
        );

        let notes = ws.take_notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.contains("disk on fire"));
        assert_eq!(ws.editor_mut(&key).unwrap().session.paths().len(), 1);
    }

    #[test]
    fn reload_invalidates_the_previous_fetch() {
        let mut ws = workspace();
        let key = ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        let original = ws.take_pending_fetches().remove(0);

        ws.reload_glyph(&key);
        ws.complete_outline(&original, Ok(outline()));
        assert!(!ws.editor_mut(&key).unwrap().is_seeded());

        let retry = ws.take_pending_fetches().remove(0);
        ws.complete_outline(&retry, Ok(outline()));
        assert!(ws.editor_mut(&key).unwrap().is_seeded());
    }

    #[test]
    fn successful_save_broadcasts_to_grids() {
        let mut ws = workspace();
        let key = ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        let req = ws.take_pending_fetches().remove(0);
        ws.complete_outline(&req, Ok(outline()));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        ws.save_relay().subscribe(move |event: &GlyphSaved| {
            sink.lock().unwrap().push((event.glyph_id, event.outline.len()));
        });

        assert!(ws.commit_save(&key, &StubBackend { save_ok: true }));
        assert_eq!(*seen.lock().unwrap(), vec![(5, 1)]);
        assert!(ws.take_notifications().is_empty());
    }

    #[test]
    fn failed_save_leaves_edits_pending() {
        let mut ws = workspace();
        let key = ws.open_glyph_editor(PathBuf::from("font.ttf"), 5);
        let req = ws.take_pending_fetches().remove(0);
        ws.complete_outline(&req, Ok(outline()));

        assert!(!ws.commit_save(&key, &StubBackend { save_ok: false }));
        assert_eq!(ws.take_notifications().len(), 1);
        // Local edits are retained for retry
        assert_eq!(ws.editor_mut(&key).unwrap().session.paths().len(), 1);
    }

    #[test]
    fn mounted_workspace_consumes_open_requests() {
        let relay: Relay<OpenRequest> = Relay::new();
        let ws = Arc::new(Mutex::new(Workspace::new(relay.clone(), SaveRelay::new())));
        mount(&ws);

        relay.emit(OpenRequest {
            file: PathBuf::from("font.ttf"),
            glyph_id: 3,
        });
        assert!(lock_workspace(&ws).is_open(&glyph_key(3)));

        unmount(&ws);
        relay.emit(OpenRequest {
            file: PathBuf::from("font.ttf"),
            glyph_id: 4,
        });
        assert!(!lock_workspace(&ws).is_open(&glyph_key(4)));
    }
}
