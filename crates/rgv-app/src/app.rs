//! eframe application: lays out panels and routes view intents to the controller

use std::path::PathBuf;

use eframe::egui::{self, CentralPanel, Context, SidePanel, TopBottomPanel};
use rgv_data::ViewerConfig;
use rgv_ui::{FooterTab, HeaderAction, Theme, UiState};
use rgv_views::{
    MessageLogView, NodeTableView, ResourceTableView, SpaceView, StatisticsView, TimelineView, ViewerContext,
};
use tracing::info;

use crate::controller::ViewerController;
use crate::demo::demo_artifacts;

/// Main application state
pub struct RenderGraphViewerApp {
    controller: ViewerController,
    config: ViewerConfig,
    ui_state: UiState,

    timeline: TimelineView,
    statistics: StatisticsView,
    messages: MessageLogView,
    nodes: NodeTableView,
    resources: ResourceTableView,
}

impl RenderGraphViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig, demo: bool) -> Self {
        rgv_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let mut app = Self {
            controller: ViewerController::new(&config),
            config,
            ui_state: UiState::default(),
            timeline: TimelineView::new(),
            statistics: StatisticsView::new(),
            messages: MessageLogView::new(),
            nodes: NodeTableView::new(),
            resources: ResourceTableView::new(),
        };

        for path in app.config.artifacts.clone() {
            app.controller.load_path(&path);
        }
        if demo {
            info!("Loading demo artifacts");
            for (origin, value) in demo_artifacts() {
                app.controller.load_value(&origin, value);
            }
        }

        app
    }

    fn select(&mut self, index: usize) {
        if self.controller.select(index) {
            self.timeline.on_artifact_change();
            self.statistics.on_artifact_change();
            self.messages.on_artifact_change();
            self.nodes.on_artifact_change();
            self.resources.on_artifact_change();
        }
    }

    fn open_artifact_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Compilation artifact", &["json"])
            .pick_file()
        {
            self.open_path(path);
        }
    }

    fn open_path(&mut self, path: PathBuf) {
        if let Some(index) = self.controller.load_path(&path) {
            self.select(index);
        }
    }

    fn collect_rejections(&mut self) {
        for rejection in self.controller.take_rejections() {
            self.ui_state
                .push_error(format!("Rejected {}", rejection.source_name), rejection.error);
        }
    }

    fn show_header(&mut self, ctx: &Context) {
        let names = self.controller.registry().names();
        let resource_count = self
            .controller
            .active()
            .map_or(0, |a| a.artifact().resource_templates.len());

        match rgv_ui::header(ctx, &names, self.controller.state().active_artifact(), resource_count) {
            Some(HeaderAction::SelectArtifact(index)) => self.select(index),
            Some(HeaderAction::OpenArtifact) => self.open_artifact_dialog(),
            None => {}
        }
    }
}

impl eframe::App for RenderGraphViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Dropped files are opened like dialog picks
        let dropped: Vec<PathBuf> = ctx.input(|i| i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect());
        for path in dropped {
            self.open_path(path);
        }

        self.collect_rejections();
        self.show_header(ctx);

        let Some(artifact) = self.controller.active() else {
            let mut open = false;
            CentralPanel::default().show(ctx, |ui| {
                rgv_ui::show_error_messages(ui, &mut self.ui_state);
                open = rgv_ui::show_welcome_screen(ui);
            });
            if open {
                self.open_artifact_dialog();
            }
            return;
        };

        let settings = self.controller.state().settings.clone();
        let visible_types = self.controller.state().visible_types().clone();
        let view_ctx = ViewerContext {
            artifact: &artifact,
            visible_types: &visible_types,
            chart_style: &self.config.chart,
        };
        let mut actions = Vec::new();

        if settings.show_footer {
            TopBottomPanel::bottom("footer")
                .resizable(true)
                .default_height(256.0)
                .min_height(128.0)
                .show(ctx, |ui| {
                    rgv_ui::footer_tabs(ui, &mut self.ui_state);
                    let view: &mut dyn SpaceView = match self.ui_state.footer_tab {
                        FooterTab::Output => &mut self.messages,
                        FooterTab::Nodes => &mut self.nodes,
                        FooterTab::Resources => &mut self.resources,
                    };
                    actions.extend(view.ui(&view_ctx, ui));
                });
        }

        if settings.show_stats_panel {
            SidePanel::right("stats_panel")
                .resizable(false)
                .min_width(280.0)
                .show(ctx, |ui| {
                    ui.add_space(16.0);
                    actions.extend(self.statistics.ui(&view_ctx, ui));
                });
        }

        CentralPanel::default().show(ctx, |ui| {
            rgv_ui::show_error_messages(ui, &mut self.ui_state);
            actions.extend(self.timeline.ui(&view_ctx, ui));
        });

        for action in actions {
            self.controller.apply(action);
        }

        // Keyboard shortcuts
        ctx.input(|i| {
            let settings = &mut self.controller.state_mut().settings;
            if i.key_pressed(egui::Key::F2) {
                settings.show_stats_panel = !settings.show_stats_panel;
            }
            if i.key_pressed(egui::Key::F3) {
                settings.show_footer = !settings.show_footer;
            }
        });

        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::O)) {
            self.open_artifact_dialog();
        }
    }
}
