use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::drag::{CaptureRegistry, DragController, DropRequest, HitMap};
use crate::io::store::{AgendaStore, save_store};
use crate::model::{Config, Item, ItemId, ProjectStore, Status};
use crate::ops::reorder::move_item;

use super::input;
use super::notify::Notifier;
use super::pointer::CellMetrics;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Single-line text entry in the status row or on a card
    Edit,
    StatusPick,
    Confirm,
}

/// What the edit buffer will be applied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditField {
    Title(ItemId),
    Minutes(ItemId),
    NewProject,
    RenameProject,
    SavePath,
    LoadPath,
    ExportPath,
}

impl EditField {
    /// Prompt shown in the status row for fields edited there
    pub fn prompt(&self) -> &'static str {
        match self {
            EditField::Title(_) => "Title",
            EditField::Minutes(_) => "Minutes",
            EditField::NewProject => "Enter project name",
            EditField::RenameProject => "Enter new project name",
            EditField::SavePath => "Save projects to",
            EditField::LoadPath => "Load projects from",
            EditField::ExportPath => "Export agenda to",
        }
    }

    /// Fields edited in place on their card rather than in the status row
    pub fn is_inline(&self) -> bool {
        matches!(self, EditField::Title(_) | EditField::Minutes(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub field: EditField,
    pub buffer: String,
    /// Byte offset into `buffer`
    pub cursor: usize,
}

impl EditState {
    pub fn new(field: EditField, initial: &str) -> Self {
        EditState {
            field,
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }
}

#[derive(Debug)]
pub enum ConfirmAction {
    DeleteProject(String),
    /// Parsed backup waiting to replace every project
    LoadBackup(Box<ProjectStore>),
}

#[derive(Debug)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPicker {
    pub item: ItemId,
    /// Index into `Status::ALL`
    pub cursor: usize,
}

/// Clickable regions recorded by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Title(ItemId),
    Status(ItemId),
    Minutes(ItemId),
    Delete(ItemId),
    Tab(usize),
    NewTab,
    AddItem,
    PickStatus(Status),
}

/// Main application state
pub struct App {
    pub store: ProjectStore,
    backend: Box<dyn AgendaStore>,
    pub config: Config,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Selected card in the current project
    pub cursor: usize,
    pub drag: DragController,
    /// Item boxes from the last frame, in pointer units
    pub hit_map: HitMap,
    /// Clickable regions from the last frame, in cells
    pub controls: Vec<(Control, Rect)>,
    pub metrics: CellMetrics,
    pub edit: Option<EditState>,
    pub picker: Option<StatusPicker>,
    pub confirm: Option<ConfirmState>,
    pub notifier: Notifier,
    pub show_help: bool,
    /// Directory offered for backup and export files
    pub files_dir: PathBuf,
}

impl App {
    pub fn new(store: ProjectStore, backend: Box<dyn AgendaStore>, config: Config) -> Self {
        Self::with_captures(store, backend, config, CaptureRegistry::new())
    }

    pub fn with_captures(
        store: ProjectStore,
        backend: Box<dyn AgendaStore>,
        config: Config,
        captures: CaptureRegistry,
    ) -> Self {
        let theme = Theme::from_config(&config.ui);
        let metrics = CellMetrics::from_config(&config.pointer);
        let drag = DragController::new(config.drag.threshold, captures);
        let files_dir = config
            .storage
            .backup_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        App {
            store,
            backend,
            config,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            drag,
            hit_map: HitMap::new(),
            controls: Vec::new(),
            metrics,
            edit: None,
            picker: None,
            confirm: None,
            notifier: Notifier::new(),
            show_help: false,
            files_dir,
        }
    }

    pub fn backend(&self) -> &dyn AgendaStore {
        self.backend.as_ref()
    }

    pub fn current_items(&self) -> &[Item] {
        self.store.current_items()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.current_items().get(self.cursor)
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected_item().map(|item| item.id)
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.current_items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn select(&mut self, id: ItemId) {
        if let Some(idx) = self.current_items().iter().position(|i| i.id == id) {
            self.cursor = idx;
        }
    }

    /// Write the store through the persistence service
    pub fn persist(&mut self) {
        if let Err(err) = save_store(self.backend.as_ref(), &self.store) {
            warn!(%err, "failed to save agenda");
            self.notifier.error(format!("Could not save: {err}"));
        }
    }

    /// Apply a finished drag to the current project. Stale or self drops
    /// leave the list untouched.
    pub fn commit_drop(&mut self, request: DropRequest) -> bool {
        let zone = request.zone;
        match move_item(
            self.store.current_items_mut(),
            request.dragged,
            zone.target,
            zone.side,
        ) {
            Ok(moved) => {
                self.cursor = moved.to;
                if !moved.is_noop() {
                    info!(item = %request.dragged, from = moved.from, to = moved.to, "item reordered");
                    self.persist();
                }
                true
            }
            Err(err) => {
                debug!(%err, "drop discarded");
                false
            }
        }
    }

    /// End any drag session without committing
    pub fn cancel_drag(&mut self) {
        self.drag.abort();
    }

    /// Topmost control under a cell
    pub fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        self.controls
            .iter()
            .rev()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(control, _)| *control)
    }

    pub fn begin_edit(&mut self, field: EditField, initial: &str) {
        self.cancel_drag();
        self.picker = None;
        self.edit = Some(EditState::new(field, initial));
        self.mode = Mode::Edit;
    }

    pub fn open_picker(&mut self, item: ItemId) {
        let Some(status) = self.current_items().iter().find(|i| i.id == item).map(|i| i.status)
        else {
            return;
        };
        self.cancel_drag();
        let cursor = Status::ALL.iter().position(|s| *s == status).unwrap_or(0);
        self.picker = Some(StatusPicker { item, cursor });
        self.mode = Mode::StatusPick;
    }

    pub fn ask_confirm(&mut self, message: impl Into<String>, action: ConfirmAction) {
        self.cancel_drag();
        self.confirm = Some(ConfirmState {
            message: message.into(),
            action,
        });
        self.mode = Mode::Confirm;
    }
}

/// Run the TUI application
pub fn run(
    store: ProjectStore,
    backend: Box<dyn AgendaStore>,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let captures = CaptureRegistry::new();
    if let Err(err) = execute!(stdout, EnableMouseCapture) {
        warn!(%err, "mouse capture unavailable; drag reordering disabled");
        captures.set_available(false);
    }
    let _ = execute!(stdout, EnableFocusChange);
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let mut app = App::with_captures(store, backend, config, captures);
    info!(project = app.store.current_name(), "tui started");

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.notifier.expire(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::FocusLost => input::handle_focus_lost(app),
                Event::Resize(_, _) => input::handle_resize(app),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
