use travelogue::cli::Args;
use travelogue::config;
use travelogue::content::{ImageStore, Journal};
use travelogue::core::event_bus::EventBus;
use travelogue::core::modal_events::{ModalNextEvent, ModalPrevEvent};
use travelogue::core::rotator::DEFAULT_PERIOD;
use travelogue::core::{GalleryRegistry, ModalHost, PageScroll, RevealTracker};
use travelogue::help;
use travelogue::main_events;
use travelogue::main_events::{
    AdjustFontScaleEvent, LoadJournalEvent, ResetFontScaleEvent, ScrollToBottomEvent,
    ScrollToTopEvent, ShowOpenDialogEvent, ToggleFullscreenEvent, ToggleHelpEvent,
};
use travelogue::theme;
use travelogue::widgets;
use travelogue::widgets::chrome::Notice;
use travelogue::widgets::navbar::NAVBAR_HEIGHT;

use clap::Parser;
use eframe::egui;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Main application state
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct TravelogueApp {
    /// UI font scale (persistent)
    font_scale: f32,
    /// Last opened journal, reopened on next launch (persistent)
    last_journal: Option<PathBuf>,
    #[serde(skip)]
    journal: Journal,
    #[serde(skip)]
    store: Option<ImageStore>,
    #[serde(skip)]
    registry: GalleryRegistry,
    #[serde(skip)]
    modal: ModalHost,
    #[serde(skip)]
    scroll: PageScroll,
    #[serde(skip)]
    reveal: RevealTracker,
    /// Global event bus for application-wide events
    #[serde(skip)]
    event_bus: EventBus,
    #[serde(skip)]
    notice: Option<Notice>,
    #[serde(skip)]
    show_help: bool,
    #[serde(skip)]
    menu_open: bool,
    #[serde(skip)]
    is_fullscreen: bool,
    #[serde(skip)]
    fullscreen_dirty: bool,
}

impl Default for TravelogueApp {
    fn default() -> Self {
        // Demo journal until the user opens their own
        let journal = Journal::sample();
        let mut registry = GalleryRegistry::new(DEFAULT_PERIOD);
        registry.rebuild(&journal, Instant::now());

        Self {
            font_scale: 1.0,
            last_journal: None,
            journal,
            store: None,
            registry,
            modal: ModalHost::new(),
            scroll: PageScroll::new(),
            reveal: RevealTracker::new(),
            event_bus: EventBus::new(),
            notice: None,
            show_help: false,
            menu_open: false,
            is_fullscreen: false,
            fullscreen_dirty: false,
        }
    }
}

impl TravelogueApp {
    /// Load a journal from a JSON file, replacing the current document
    fn load_journal(&mut self, path: PathBuf) {
        match Journal::load(&path) {
            Ok(journal) => {
                info!("Loaded journal from {}", path.display());
                self.journal = journal;
                self.last_journal = Some(path);
                self.notice = None;
                self.after_journal_change(Instant::now());
            }
            Err(e) => {
                error!("{:#}", e);
                self.notice = Some(Notice::new(format!("{:#}", e)));
            }
        }
    }

    /// Reset all per-document runtime state after the journal was replaced
    fn after_journal_change(&mut self, now: Instant) {
        self.registry.rebuild(&self.journal, now);
        self.modal.clear();
        self.reveal.reset();
        self.menu_open = false;
        self.scroll = PageScroll::new();

        // Warm the decode pipeline so images pop in as the reader scrolls
        if let Some(store) = self.store.as_mut() {
            for image in self.journal.all_images() {
                if !image.is_empty() {
                    store.prefetch(&image.path);
                }
            }
        }
    }

    /// Show open journal dialog
    fn show_open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Journal", &["json"])
            .pick_file()
        {
            self.load_journal(path);
        }
    }

    /// Handle events from event bus.
    fn handle_events(&mut self, now: Instant) {
        // Deferred actions to execute after event loop
        let mut deferred_load_journal: Option<PathBuf> = None;
        let mut deferred_show_open = false;

        // Poll all events from the bus
        let events = self.event_bus.poll();
        for event in events {
            if let Some(result) = main_events::handle_app_event(
                &event,
                &self.journal,
                &mut self.registry,
                &mut self.modal,
                &mut self.scroll,
                &mut self.font_scale,
                &mut self.show_help,
                &mut self.is_fullscreen,
                &mut self.fullscreen_dirty,
                now,
            ) {
                if let Some(path) = result.load_journal {
                    deferred_load_journal = Some(path);
                }
                if result.show_open_dialog {
                    deferred_show_open = true;
                }
            }
        }

        // Execute deferred actions outside the event loop (to avoid borrow conflicts)
        if let Some(path) = deferred_load_journal {
            self.load_journal(path);
        }
        if deferred_show_open {
            self.show_open_dialog();
        }
    }

    fn set_fullscreen(&mut self, ctx: &egui::Context, enabled: bool) {
        self.is_fullscreen = enabled;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(enabled));
        ctx.request_repaint();
    }

    fn handle_keyboard_input(&mut self, ctx: &egui::Context, now: Instant) {
        // Don't process hotkeys when text input is active (typing in fields)
        if ctx.wants_keyboard_input() {
            return;
        }

        let input = ctx.input(|i| i.clone());

        // Viewer navigation while it is open
        if self.modal.is_open() {
            if input.key_pressed(egui::Key::ArrowRight) {
                self.event_bus.emit(ModalNextEvent);
            }
            if input.key_pressed(egui::Key::ArrowLeft) {
                self.event_bus.emit(ModalPrevEvent);
            }
        }

        if input.key_pressed(egui::Key::F1) {
            self.event_bus.emit(ToggleHelpEvent);
        }
        if input.key_pressed(egui::Key::Z) {
            self.event_bus.emit(ToggleFullscreenEvent);
        }
        if input.modifiers.command && input.key_pressed(egui::Key::O) {
            self.event_bus.emit(ShowOpenDialogEvent);
        }
        if input.key_pressed(egui::Key::Home) {
            self.event_bus.emit(ScrollToTopEvent);
        }
        if input.key_pressed(egui::Key::End) {
            self.event_bus.emit(ScrollToBottomEvent);
        }
        if input.modifiers.command
            && (input.key_pressed(egui::Key::Equals) || input.key_pressed(egui::Key::Plus))
        {
            self.event_bus.emit(AdjustFontScaleEvent(0.1));
        }
        if input.modifiers.command && input.key_pressed(egui::Key::Minus) {
            self.event_bus.emit(AdjustFontScaleEvent(-0.1));
        }
        if input.modifiers.command && input.key_pressed(egui::Key::Num0) {
            self.event_bus.emit(ResetFontScaleEvent);
        }

        // ESC: priority-based handler. help -> viewer -> fullscreen -> quit
        if input.key_pressed(egui::Key::Escape) {
            if self.show_help {
                self.show_help = false;
            } else if self.modal.is_open() {
                self.modal.close(now);
            } else if self.is_fullscreen {
                self.set_fullscreen(ctx, false);
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    /// Render the scrolling page: hero banner plus the journal body.
    /// While the page glides to an anchor or the viewer holds the scroll
    /// lock, the offset is forced; otherwise the reader drives it.
    fn render_page(&mut self, ui: &mut egui::Ui, now: Instant) {
        let Some(store) = self.store.as_mut() else {
            return;
        };

        let mut area = egui::ScrollArea::vertical().auto_shrink([false, false]);
        if self.scroll.is_gliding() || self.modal.scroll_locked() {
            area = area.vertical_scroll_offset(self.scroll.offset());
        }

        let output = area.show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 0.0;
            let origin_y = ui.next_widget_position().y;

            let hero_actions = widgets::hero::render(
                ui,
                &self.journal,
                &mut self.reveal,
                self.scroll.parallax_shift(),
                now,
            );
            let article_actions = widgets::article::render(
                ui,
                &self.journal,
                &self.registry,
                &mut self.reveal,
                store,
                origin_y,
                now,
            );
            (hero_actions, article_actions)
        });

        let (hero_actions, article_actions) = output.inner;
        for evt in hero_actions.events {
            self.event_bus.emit_boxed(evt);
        }
        for evt in article_actions.events {
            self.event_bus.emit_boxed(evt);
        }

        self.scroll.set_sections(article_actions.spans);
        self.scroll.set_metrics(
            output.state.offset.y,
            output.inner_rect.height(),
            output.content_size.y,
        );
    }
}

impl eframe::App for TravelogueApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if self.store.is_none() {
            self.store = Some(ImageStore::new(ctx));
            self.after_journal_change(now);
        }
        if let Some(store) = self.store.as_mut() {
            store.drain();
        }

        // Process all events from the event bus
        self.handle_events(now);

        // Advance the clocks
        if self.registry.tick_all(now) {
            ctx.request_repaint();
        }
        if self.modal.tick(now) {
            ctx.request_repaint();
        }
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        if self.scroll.tick(dt) {
            ctx.request_repaint();
        }

        // A real wheel or trackpad gesture takes the page back from a glide
        if ctx.input(|i| i.raw_scroll_delta.y != 0.0) {
            self.scroll.cancel_glide();
        }

        theme::apply(ctx, self.font_scale);

        // Apply pending fullscreen changes requested via events
        if self.fullscreen_dirty {
            self.set_fullscreen(ctx, self.is_fullscreen);
            self.fullscreen_dirty = false;
        }

        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }

        // Handle drag-and-drop of a journal file
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if let Some(path) = dropped
            .iter()
            .find(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")))
        {
            info!("Journal dropped: {}", path.display());
            self.event_bus.emit(LoadJournalEvent(path.clone()));
        } else if !dropped.is_empty() {
            warn!("Dropped files are not a journal: {:?}", dropped);
            self.notice = Some(Notice::new("Drop a journal .json file to open it"));
        }

        // Page content scrolls under the fixed chrome
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(theme::PAGE))
            .show(ctx, |ui| {
                self.render_page(ui, now);
            });

        // Fixed overlays, painted over the page
        let navbar_actions = widgets::navbar::render(
            ctx,
            &self.journal,
            self.scroll.active_section(),
            self.scroll.navbar_elevated(),
            &mut self.menu_open,
        );
        for evt in navbar_actions.events {
            self.event_bus.emit_boxed(evt);
        }

        let chrome_actions = widgets::chrome::render(ctx, &self.scroll, self.notice.as_ref(), now);
        for evt in chrome_actions.events {
            self.event_bus.emit_boxed(evt);
        }

        // Photo viewer above everything
        if let Some(store) = self.store.as_mut() {
            let lightbox_actions =
                widgets::lightbox::render(ctx, &self.journal, &self.modal, store, now);
            for evt in lightbox_actions.events {
                self.event_bus.emit_boxed(evt);
            }
        }

        if self.show_help {
            egui::Area::new(egui::Id::new("help_overlay"))
                .order(egui::Order::Foreground)
                .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, NAVBAR_HEIGHT + 16.0))
                .show(ctx, |ui| {
                    help::render_help_overlay(ui, &help::all_help_sections());
                });
        }

        // Process keyboard input after hover states were updated by rendering
        self.handle_keyboard_input(ctx, now);

        // Wake exactly when the next slideshow is due; animations repaint
        // continuously until they settle
        if let Some(wait) = self.registry.until_next_deadline(now) {
            ctx.request_repaint_after(wait);
        }
        if self.scroll.is_gliding()
            || self.modal.is_open()
            || self
                .reveal
                .any_animating(now, self.journal.max_cards_per_section())
        {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
            debug!(
                "App state saved: font_scale={}, last_journal={:?}",
                self.font_scale, self.last_journal
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Check if running without arguments (GUI mode) and print help
    let has_any_args = args.journal_path.is_some()
        || args.fullscreen
        || args.period_ms != 3000
        || args.log_file.is_some()
        || args.verbosity > 0
        || args.config_dir.is_some();

    if !has_any_args {
        // Print help in GUI mode (no CLI arguments provided)
        use clap::CommandFactory;
        let mut cmd = Args::command();
        let _ = cmd.print_help();
        println!("\n");
    }

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        // File logging with specified verbosity level
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::data_file("travelogue.log", &path_config));

        let file = std::fs::File::create(&log_path)?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        // Console logging with specified verbosity level (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }

    info!("Travelogue journal presenter starting...");
    debug!("Command-line args: {:?}", args);

    info!(
        "Config path: {}",
        config::config_file("travelogue.json", &path_config).display()
    );

    if let Some(ref path) = args.journal_path {
        info!("Journal file: {}", path.display());
    } else {
        info!("No journal provided, starting with the demo journal (drag-and-drop supported)");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Travelogue v{} • F1 for help",
                env!("CARGO_PKG_VERSION")
            ))
            .with_inner_size(egui::vec2(1100.0, 800.0))
            .with_resizable(true)
            .with_drag_and_drop(true),
        persist_window: true,
        #[cfg(not(target_arch = "wasm32"))]
        persistence_path: Some(config::config_file("travelogue.json", &path_config)),
        ..Default::default()
    };

    info!("Starting Travelogue with window persistence and drag-and-drop enabled");

    // Run the app
    eframe::run_native(
        "Travelogue",
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, otherwise create default
            let mut app: TravelogueApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    TravelogueApp::default()
                });

            // Rebuild the slideshow clocks with the CLI-configured period
            let period = Duration::from_millis(args.period_ms.max(100));
            if period != DEFAULT_PERIOD {
                info!("Slideshow period override: {:?}", period);
            }
            app.registry = GalleryRegistry::new(period);
            app.store = Some(ImageStore::new(&cc.egui_ctx));
            app.after_journal_change(Instant::now());

            // CLI journal has priority over the one from last session
            let startup = args.journal_path.clone().or_else(|| app.last_journal.clone());
            if let Some(path) = startup {
                if path.exists() {
                    app.load_journal(path);
                } else {
                    warn!("Journal {} is gone, falling back to demo", path.display());
                }
            }

            if args.fullscreen {
                app.set_fullscreen(&cc.egui_ctx, true);
            }

            Ok(Box::new(app))
        }),
    )?;

    info!("Application exiting");
    Ok(())
}
