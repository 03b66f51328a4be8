use eframe::egui::{self, Color32, FontId};

use crate::slider::{Measure, Renderable, Size};
use crate::theme::Theme;

pub const TAB_PADDING_X: f32 = 18.0;
pub const TAB_PADDING_Y: f32 = 10.0;
pub const PANEL_PADDING: f32 = 24.0;
pub const TRACK_HEIGHT: f32 = 3.0;
pub const TRACK_GAP: f32 = 8.0;
pub const PAGINATION_HEIGHT: f32 = 44.0;

/// Lays text out with egui's font system without painting it.
pub struct EguiMeasure<'a> {
    painter: &'a egui::Painter,
    body: FontId,
    tab: FontId,
    color: Color32,
}

impl<'a> EguiMeasure<'a> {
    pub fn new(painter: &'a egui::Painter, theme: &Theme) -> Self {
        Self {
            painter,
            body: FontId::proportional(theme.body_size),
            tab: FontId::proportional(theme.tab_size),
            color: theme.foreground,
        }
    }

    fn tab_size(&self, label: &str) -> Size {
        let galley = self
            .painter
            .layout_no_wrap(label.to_string(), self.tab.clone(), self.color);
        Size::new(
            galley.rect.width() + TAB_PADDING_X * 2.0,
            galley.rect.height() + TAB_PADDING_Y * 2.0,
        )
    }
}

impl Measure for EguiMeasure<'_> {
    fn measure(&self, item: Renderable<'_>, available_width: f32) -> Size {
        match item {
            Renderable::SlideContent(text) => {
                let wrap = (available_width - PANEL_PADDING * 2.0).max(1.0);
                let galley =
                    self.painter
                        .layout(text.to_string(), self.body.clone(), self.color, wrap);
                Size::new(available_width, galley.rect.height() + PANEL_PADDING * 2.0)
            }
            Renderable::Tab(label) => self.tab_size(label),
            Renderable::Chrome(labels) => {
                let tab_row = labels
                    .iter()
                    .map(|l| self.tab_size(l).height)
                    .fold(0.0_f32, f32::max);
                Size::new(
                    available_width,
                    tab_row + TRACK_GAP * 2.0 + TRACK_HEIGHT + PAGINATION_HEIGHT,
                )
            }
        }
    }
}
