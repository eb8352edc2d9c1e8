//! DeadTree Map Viewer.
//!
//! Rust-basierter Desktop-Viewer für geogetaggte Totholz-Meldungen.
//! Interaktive Weltkarte mit Marker-Clustering auf egui + wgpu.

use dead_tree_map::{
    render, ui, AppController, AppIntent, AppState, LifecyclePhase, SceneEngine, ViewerOptions,
};
use eframe::egui;
use eframe::egui_wgpu;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "DeadTree Map Viewer v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("DeadTree Map Viewer"),
            renderer: eframe::Renderer::Wgpu,
            multisampling: 4,
            ..Default::default()
        };

        eframe::run_native(
            "DeadTree Map Viewer",
            options,
            Box::new(|cc| {
                let render_state = cc.wgpu_render_state.as_ref().ok_or_else(|| {
                    anyhow::anyhow!(
                        "wgpu nicht verfügbar: Renderer konnte nicht initialisiert werden"
                    )
                })?;
                // Bild-Loader für Popup-Fotos (HTTP + Dateiformate)
                egui_extras::install_image_loaders(&cc.egui_ctx);
                Ok(Box::new(ViewerApp::new(render_state)))
            }),
        )
    }
}

/// Konkreter App-Zustand über der Szenen-Engine.
type ViewerState = AppState<SceneEngine>;

/// Haupt-Anwendungsstruktur
struct ViewerApp {
    state: ViewerState,
    controller: AppController,
    render_state: egui_wgpu::RenderState,
    device: eframe::wgpu::Device,
    queue: eframe::wgpu::Queue,
    initial_fetch_started: bool,
}

impl ViewerApp {
    fn new(render_state: &egui_wgpu::RenderState) -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = ViewerOptions::config_path();
        let viewer_options = ViewerOptions::load_from_file(&config_path);

        Self {
            state: AppState::new(viewer_options),
            controller: AppController::new(),
            render_state: render_state.clone(),
            device: render_state.device.clone(),
            queue: render_state.queue.clone(),
            initial_fetch_started: false,
        }
    }

    /// Montiert die Karten-Komponente, sobald die Zeichenfläche steht.
    /// Gibt `true` zurück, wenn der Mount in diesem Frame passiert ist.
    fn ensure_mounted(&mut self) -> bool {
        if self.state.map_view.phase() != LifecyclePhase::Unmounted {
            return false;
        }
        self.state.surface.attach();

        let render_state = self.render_state.clone();
        let options = self.state.options.clone();
        let surface = self.state.surface.clone();
        self.state
            .map_view
            .mount(&surface, move || SceneEngine::new(&render_state, options));

        self.state.map_view.phase() == LifecyclePhase::AwaitingReady
    }

    /// Pollt laufende Hintergrund-Anfragen (Entries, Contributors).
    fn poll_background(&mut self, events: &mut Vec<AppIntent>) {
        if let Some(request) = &self.state.entries_request {
            if let Some(result) = request.poll() {
                self.state.entries_request = None;
                match result {
                    Ok(entries) => events.push(AppIntent::EntriesLoaded { entries }),
                    Err(e) => events.push(AppIntent::EntriesLoadFailed {
                        message: format!("{:#}", e),
                    }),
                }
            }
        }

        if let Some(request) = &self.state.contributors_request {
            if let Some(result) = request.poll() {
                self.state.contributors_request = None;
                if let Ok(contributors) = result {
                    events.push(AppIntent::ContributorsLoaded { contributors });
                }
                // Fehler beim Leaderboard sind nicht kritisch (bereits geloggt)
            }
        }
    }

    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        ui::render_status_bar(ctx, &self.state);
        events.extend(ui::render_menu(ctx, &self.state));
        events.extend(ui::show_options_dialog(ctx, &mut self.state));
        if self.state.ui.show_leaderboard {
            ui::render_leaderboard(ctx, &self.state.contributors);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                let viewport_size = [rect.width(), rect.height()];

                // Drag = Pan (Karte folgt dem Cursor)
                if response.dragged() {
                    let delta = response.drag_delta();
                    if delta != egui::Vec2::ZERO {
                        events.push(AppIntent::CameraPan {
                            delta: [-delta.x, -delta.y],
                        });
                    }
                }

                // Scroll = Zoom auf den Cursor
                let scroll = ctx.input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 && response.hovered() {
                    let focus_px = response.hover_pos().map(|p| {
                        let rel = p - rect.min;
                        [rel.x, rel.y]
                    });
                    events.push(AppIntent::CameraZoom {
                        steps: (scroll as f64 / 50.0) * self.state.options.scroll_zoom_step,
                        focus_px,
                    });
                }

                // Klick = Marker/Cluster-Hit-Test
                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let rel = pos - rect.min;
                        events.push(AppIntent::MapClicked {
                            pos: [rel.x, rel.y],
                        });
                    }
                }

                let popup_id = self.state.ui.popup_entry_id.clone();
                if let Some(engine) = self.state.map_view.engine_mut() {
                    let scene = engine.handle_frame(viewport_size);

                    let callback = egui_wgpu::Callback::new_paint_callback(
                        rect,
                        render::MapPaintCallback::new(
                            engine.renderer(),
                            scene.clone(),
                            self.device.clone(),
                            self.queue.clone(),
                        ),
                    );
                    ui.painter().add(callback);

                    // Cluster-Zahlen als Text-Overlay über den Badges
                    ui::draw_cluster_counts(ui.painter(), rect, &scene);

                    // Popup über dem angeklickten Marker
                    if let Some(id) = popup_id {
                        if let (Some(marker), Some(anchor)) =
                            (engine.marker_popup(&id), engine.marker_screen_pos(&id))
                        {
                            events.extend(ui::show_entry_popup(ctx, rect, &marker.popup, anchor));
                        }
                    }
                } else {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Initializing map...",
                        egui::FontId::proportional(20.0),
                        egui::Color32::WHITE,
                    );
                }
            });

        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    fn maybe_request_repaint(&self, ctx: &egui::Context, has_meaningful_events: bool) {
        if has_meaningful_events || ctx.input(|i| i.pointer.is_moving()) {
            ctx.request_repaint();
            return;
        }

        let pending_tiles = self
            .state
            .map_view
            .engine()
            .is_some_and(|e| e.has_pending_tiles());
        let pending_data =
            self.state.entries_request.is_some() || self.state.contributors_request.is_some();

        if pending_tiles || pending_data || self.state.map_view.phase() == LifecyclePhase::AwaitingReady
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            // Abbau vor dem Schließen: Fläche abhängen, Komponente unmounten
            self.state.surface.detach();
            self.state.map_view.unmount();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let mounted_this_frame = self.ensure_mounted();

        let mut events = Vec::new();

        // Ready-Signal einen Tick nach dem Mount ausliefern
        if !mounted_this_frame && self.state.map_view.phase() == LifecyclePhase::AwaitingReady {
            events.push(AppIntent::EngineReady);
        }

        // Erststart: Entries + Leaderboard laden
        if !self.initial_fetch_started {
            self.initial_fetch_started = true;
            events.push(AppIntent::RefreshRequested);
        }

        self.poll_background(&mut events);
        events.extend(self.collect_ui_events(ctx));

        let has_meaningful_events = !events.is_empty();
        self.process_events(events);
        self.maybe_request_repaint(ctx, has_meaningful_events);
    }
}

impl Drop for ViewerApp {
    fn drop(&mut self) {
        // Fenster-Schließen ohne Exit-Intent: Komponente sauber abbauen
        self.state.surface.detach();
        self.state.map_view.unmount();
    }
}
