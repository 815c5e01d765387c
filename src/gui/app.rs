//! Main advsearch application: the host window plus the floating builder panel

use std::time::Instant;

use eframe::egui;

use crate::executor::SearchExecutor;
use crate::gui::colors;
use crate::gui::controller::PanelController;
use crate::gui::form::{show_form, FormAction};
use crate::gui::panel::{PanelState, SnapConfig};
use crate::gui::toast::Toasts;
use crate::{AppConfig, Result};

const PANEL_WIDTH: f32 = 380.0;

pub struct SearchBuilderApp {
    /// Form, verdicts, toasts and the executor
    controller: PanelController,
    /// Position, minimized flag, pending snap/persist
    panel: PanelState,
}

impl SearchBuilderApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self> {
        let mut panel = PanelState::new(SnapConfig::from(&config), config.start_minimized);
        if let Some(storage) = cc.storage {
            panel.restore(storage);
        }

        let controller = PanelController::new(
            SearchExecutor::from_config(&config)?,
            Toasts::new(config.toast_duration()),
            today(),
        );
        Ok(Self { controller, panel })
    }

    /// Render the window body: the latest query and any hand-off text
    fn render_host(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                ui.add_space(8.0);
                if let Some(text) = self.controller.manual_text.as_mut() {
                    ui.add(egui::TextEdit::singleline(text).desired_width(f32::INFINITY));
                    ui.label("Copy or open by hand:");
                }
                if !self.controller.last_query.is_empty() {
                    let mut query = self.controller.last_query.as_str();
                    ui.add(egui::TextEdit::singleline(&mut query).desired_width(f32::INFINITY));
                    ui.label("Last query:");
                }
            });
        });
    }

    /// Render the floating panel and apply drag/minimize. Returns the form action.
    fn render_panel(&mut self, ctx: &egui::Context, viewport: egui::Rect) -> FormAction {
        let mut action = FormAction::None;

        let area = egui::Area::new(egui::Id::new("advsearch_panel"))
            .fixed_pos(self.panel.position)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::window(ui.style())
                    .fill(colors::PANEL_BG)
                    .corner_radius(egui::CornerRadius::same(16))
                    .inner_margin(egui::Margin::same(16))
                    .show(ui, |ui| {
                        ui.set_width(PANEL_WIDTH);

                        let header = ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new("Advanced Search Builder")
                                    .size(18.0)
                                    .strong()
                                    .color(colors::TEXT_PRIMARY),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let (icon, tip) = if self.panel.minimized {
                                        ("+", "Expand")
                                    } else {
                                        ("\u{2212}", "Minimize")
                                    };
                                    if ui.button(icon).on_hover_text(tip).clicked() {
                                        self.panel.toggle_minimized();
                                    }
                                },
                            );
                        });

                        let handle = ui.interact(
                            header.response.rect,
                            ui.id().with("panel_drag_handle"),
                            egui::Sense::drag(),
                        );

                        if !self.panel.minimized {
                            ui.separator();
                            let controller = &mut self.controller;
                            action = show_form(ui, &mut controller.draft, &controller.verdicts);
                        }
                        handle
                    })
                    .inner
            });

        let handle = area.inner;
        let size = area.response.rect.size();

        if handle.hovered() || handle.dragged() {
            ctx.set_cursor_icon(if handle.dragged() {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            });
        }
        if handle.dragged() {
            self.panel.drag_by(handle.drag_delta());
        }
        if handle.drag_stopped() || self.panel.take_settle() {
            self.panel.end_drag(size, viewport);
            ctx.request_repaint();
        }

        self.render_toast(ctx, area.response.rect);
        action
    }

    fn render_toast(&self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let now = Instant::now();
        let toasts = &self.controller.toasts;
        let Some(toast) = toasts.active(now) else {
            return;
        };

        egui::Area::new(egui::Id::new("advsearch_toast"))
            .order(egui::Order::Tooltip)
            .pivot(egui::Align2::CENTER_TOP)
            .fixed_pos(panel_rect.center_bottom() + egui::vec2(0.0, 10.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(colors::toast_fill(toast.kind))
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::symmetric(16, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&toast.message).color(egui::Color32::WHITE));
                    });
            });

        if let Some(remaining) = toasts.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

impl eframe::App for SearchBuilderApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.render_host(ctx);

        let viewport = ctx.content_rect();
        let action = self.render_panel(ctx, viewport);
        self.controller.handle(action, today(), Instant::now());

        if self.panel.take_dirty() {
            if let Some(storage) = frame.storage_mut() {
                self.panel.persist(storage);
            }
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.panel.persist(storage);
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
