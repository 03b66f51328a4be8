use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::measure::{
    EguiMeasure, PAGINATION_HEIGHT, PANEL_PADDING, TAB_PADDING_Y, TRACK_GAP, TRACK_HEIGHT,
};
use super::watch::SourceWatcher;
use crate::config::Config;
use crate::slider::{
    Action, BreakpointPolicy, Outcome, ResizeDebouncer, SliderInstance, Viewport,
};
use crate::source::{self, SlideRecord};
use crate::theme::Theme;

const MARGIN: f32 = 32.0;
const PROGRESS_EASE: f32 = 12.0;
const WATCH_POLL: Duration = Duration::from_millis(250);

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < 1.5 {
            1.0
        } else {
            (1.0 - (elapsed - 1.5) / 0.5).max(0.0)
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 2.0
    }
}

/// Clickable regions from the last painted frame.
#[derive(Default)]
struct HitAreas {
    tabs: Vec<egui::Rect>,
    previous: Option<egui::Rect>,
    next: Option<egui::Rect>,
}

struct PreviewApp {
    file: PathBuf,
    theme: Theme,
    policy: BreakpointPolicy,
    pending_records: Option<Vec<SlideRecord>>,
    instance: Option<SliderInstance>,
    debouncer: ResizeDebouncer,
    observed: Viewport,
    watcher: Option<SourceWatcher>,
    progress_shown: f32,
    last_frame: Instant,
    hits: HitAreas,
    toast: Option<Toast>,
}

impl PreviewApp {
    fn new(
        file: PathBuf,
        records: Vec<SlideRecord>,
        config: &Config,
        watcher: Option<SourceWatcher>,
    ) -> Self {
        Self {
            file,
            theme: Theme::from_name(config.theme_name()),
            policy: config.policy(),
            pending_records: Some(records),
            instance: None,
            debouncer: ResizeDebouncer::new(config.resize_debounce()),
            observed: Viewport::uniform(0.0),
            watcher,
            progress_shown: 0.0,
            last_frame: Instant::now(),
            hits: HitAreas::default(),
            toast: None,
        }
    }

    fn reload_if_changed(&mut self, measure: &EguiMeasure<'_>) {
        let Some(watcher) = &self.watcher else {
            return;
        };
        if !watcher.changed() {
            return;
        }
        match source::load(&self.file) {
            Ok(records) => {
                let count = records.len();
                let policy = Config::load_or_default().policy();
                if let Some(instance) = &mut self.instance {
                    instance.set_policy(policy.clone());
                    instance.replace_slides(records, measure);
                }
                self.policy = policy;
                self.progress_shown = 0.0;
                info!(slides = count, "reloaded slide source");
                self.toast = Some(Toast::new(format!("Reloaded: {count} slides")));
            }
            Err(e) => {
                warn!("keeping previous slides: {e}");
                self.toast = Some(Toast::new(format!("Reload failed: {e}")));
            }
        }
    }

    fn collect_actions(&self, ctx: &egui::Context) -> (Vec<Action>, bool) {
        let mut actions = Vec::new();
        let mut toggle_theme = false;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::Space) {
                actions.push(Action::Next);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                actions.push(Action::Previous);
            }
            let digits = [
                egui::Key::Num1,
                egui::Key::Num2,
                egui::Key::Num3,
                egui::Key::Num4,
                egui::Key::Num5,
                egui::Key::Num6,
                egui::Key::Num7,
                egui::Key::Num8,
                egui::Key::Num9,
            ];
            for (tab, key) in digits.iter().enumerate() {
                if i.key_pressed(*key) {
                    actions.push(Action::ActivateTab(tab));
                }
            }
            if i.key_pressed(egui::Key::D) {
                toggle_theme = true;
            }

            if i.pointer.primary_clicked() {
                if let Some(pos) = i.pointer.interact_pos() {
                    if let Some(tab) = self.hits.tabs.iter().position(|r| r.contains(pos)) {
                        actions.push(Action::ActivateTab(tab));
                    } else if self.hits.previous.is_some_and(|r| r.contains(pos)) {
                        actions.push(Action::Previous);
                    } else if self.hits.next.is_some_and(|r| r.contains(pos)) {
                        actions.push(Action::Next);
                    }
                }
            }
        });
        (actions, toggle_theme)
    }

    fn observe_viewport(&mut self, viewport: Viewport, now: Instant) -> Option<Viewport> {
        let moved = (viewport.width - self.observed.width).abs() > 0.5
            || (viewport.container - self.observed.container).abs() > 0.5;
        if moved {
            self.observed = viewport;
            self.debouncer.observe(viewport, now);
        }
        self.debouncer.poll(now)
    }

    fn animate_progress(&mut self, target: f32, dt: f32) -> bool {
        let t = 1.0 - (-dt * PROGRESS_EASE).exp();
        self.progress_shown += (target - self.progress_shown) * t;
        if (target - self.progress_shown).abs() < 0.5 {
            self.progress_shown = target;
            false
        } else {
            true
        }
    }

    fn draw_slider(&mut self, ui: &egui::Ui, rect: egui::Rect) {
        self.hits = HitAreas::default();
        let Some(instance) = self.instance.as_ref().filter(|i| i.is_mounted()) else {
            return;
        };

        let Some(group) = instance.active_group() else {
            let galley = ui.painter().layout_no_wrap(
                format!("No slides in {}", self.file.display()),
                egui::FontId::proportional(self.theme.body_size),
                self.theme.muted,
            );
            let pos = rect.center() - galley.rect.size() / 2.0;
            ui.painter().galley(pos, galley, self.theme.muted);
            return;
        };

        let painter = ui.painter();
        let height = instance.min_height();
        let container = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), height));
        painter.rect_filled(container, 8.0, self.theme.panel);

        // Tab strip
        let tab_font = egui::FontId::proportional(self.theme.tab_size);
        let mut x = container.left();
        let mut tab_bottom = container.top();
        for (slide, width) in group.slides.iter().zip(instance.tab_widths()) {
            let color = if slide.is_active {
                self.theme.accent
            } else {
                self.theme.muted
            };
            let galley = painter.layout_no_wrap(slide.title.clone(), tab_font.clone(), color);
            let tab_h = galley.rect.height() + TAB_PADDING_Y * 2.0;
            let tab_rect = egui::Rect::from_min_size(
                egui::pos2(x, container.top()),
                egui::vec2(*width, tab_h),
            );
            let text_pos = tab_rect.center() - galley.rect.size() / 2.0;
            painter.galley(text_pos, galley, color);
            self.hits.tabs.push(tab_rect.intersect(container));
            tab_bottom = tab_bottom.max(tab_rect.bottom());
            x += width;
        }

        // Timeline track and progress
        let track_y = tab_bottom + TRACK_GAP;
        let track = egui::Rect::from_min_size(
            egui::pos2(container.left(), track_y),
            egui::vec2(container.width(), TRACK_HEIGHT),
        );
        painter.rect_filled(track, 1.0, self.theme.track);
        if instance.timeline().is_some() {
            let progress = egui::Rect::from_min_size(
                track.min,
                egui::vec2(self.progress_shown.min(track.width()), TRACK_HEIGHT),
            );
            painter.rect_filled(progress, 1.0, self.theme.accent);
        }

        // Active slide body
        if let Some(slide) = group.slides.iter().find(|s| s.is_active) {
            let wrap = (container.width() - PANEL_PADDING * 2.0).max(1.0);
            let galley = painter.layout(
                slide.content.clone(),
                egui::FontId::proportional(self.theme.body_size),
                self.theme.foreground,
                wrap,
            );
            let pos = egui::pos2(
                container.left() + PANEL_PADDING,
                track.bottom() + TRACK_GAP + PANEL_PADDING,
            );
            painter.galley(pos, galley, self.theme.foreground);
        }

        // Pagination
        if let Some(controls) = instance.controls() {
            let bar = egui::Rect::from_min_max(
                egui::pos2(container.left(), container.bottom() - PAGINATION_HEIGHT),
                container.max,
            );
            let arrow_font = egui::FontId::proportional(self.theme.arrow_size);
            let button = egui::vec2(PAGINATION_HEIGHT * 1.5, PAGINATION_HEIGHT);
            let prev_rect = egui::Rect::from_min_size(bar.min, button);
            let next_rect =
                egui::Rect::from_min_size(egui::pos2(bar.right() - button.x, bar.top()), button);
            for (rect, glyph, disabled) in [
                (prev_rect, "\u{2190}", controls.previous_disabled),
                (next_rect, "\u{2192}", controls.next_disabled),
            ] {
                let color = if disabled {
                    Theme::with_opacity(self.theme.muted, 0.4)
                } else {
                    self.theme.accent
                };
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    glyph,
                    arrow_font.clone(),
                    color,
                );
            }
            self.hits.previous = (!controls.previous_disabled).then_some(prev_rect);
            self.hits.next = (!controls.next_disabled).then_some(next_rect);

            let counter = format!(
                "{} / {}",
                instance.state().group + 1,
                instance.groups().len()
            );
            painter.text(
                bar.center(),
                egui::Align2::CENTER_CENTER,
                counter,
                egui::FontId::proportional(self.theme.tab_size * 0.8),
                self.theme.muted,
            );
        }
    }

    fn draw_toast(&mut self, ui: &egui::Ui, rect: egui::Rect) {
        let Some(toast) = &self.toast else {
            return;
        };
        if toast.is_expired() {
            self.toast = None;
            return;
        }
        let color = Theme::with_opacity(self.theme.foreground, toast.opacity());
        ui.painter().text(
            egui::pos2(rect.center().x, rect.bottom() - MARGIN / 2.0),
            egui::Align2::CENTER_CENTER,
            &toast.message,
            egui::FontId::proportional(self.theme.tab_size * 0.8),
            color,
        );
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let (actions, toggle_theme) = self.collect_actions(ctx);
        if toggle_theme {
            self.theme = self.theme.toggled();
            self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            if let Some(instance) = &mut self.instance {
                instance.teardown();
            }
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let full = ui.max_rect();
                let rect = full.shrink(MARGIN);
                let theme = self.theme.clone();
                let measure = EguiMeasure::new(ui.painter(), &theme);

                let viewport = Viewport::new(full.width(), rect.width());
                if self.instance.is_none() {
                    let records = self.pending_records.take().unwrap_or_default();
                    self.observed = viewport;
                    self.instance = Some(SliderInstance::init(
                        records,
                        self.policy.clone(),
                        viewport,
                        &measure,
                    ));
                } else if let Some(viewport) = self.observe_viewport(viewport, now) {
                    if let Some(instance) = &mut self.instance {
                        let outcome = instance.dispatch(Action::Resize(viewport), &measure);
                        if outcome == Outcome::Rebuilt {
                            self.progress_shown = 0.0;
                        }
                    }
                }

                self.reload_if_changed(&measure);

                if let Some(instance) = &mut self.instance {
                    for action in &actions {
                        instance.dispatch(*action, &measure);
                    }
                }

                let target = self
                    .instance
                    .as_ref()
                    .and_then(|i| i.timeline())
                    .map(|t| t.width)
                    .unwrap_or(0.0);
                if self.animate_progress(target, dt) {
                    ctx.request_repaint();
                }

                self.draw_slider(ui, rect);
                self.draw_toast(ui, full);
            });

        if self.debouncer.is_pending() || self.toast.is_some() {
            ctx.request_repaint();
        } else if self.watcher.is_some() {
            ctx.request_repaint_after(WATCH_POLL);
        }
    }
}

pub fn run(file: PathBuf, windowed: bool, watch: Option<bool>) -> anyhow::Result<()> {
    let records = source::load(&file)?;
    let config = Config::load_or_default();

    let watcher = if watch.unwrap_or_else(|| config.watch()) {
        match SourceWatcher::new(&file) {
            Ok(w) => Some(w),
            Err(e) => {
                warn!("live reload disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    let title = format!(
        "tslider: {}",
        file.file_name().unwrap_or_default().to_string_lossy()
    );
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_maximized(true)
            .with_title(&title)
    };
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    info!(slides = records.len(), file = %file.display(), "opening preview");
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PreviewApp::new(file, records, &config, watcher)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
