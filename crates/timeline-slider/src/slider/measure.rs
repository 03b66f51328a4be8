use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Something the slider needs the natural size of before it is shown.
#[derive(Debug, Clone, Copy)]
pub enum Renderable<'a> {
    /// The body of one slide, wrapped to the container width.
    SlideContent(&'a str),
    /// A single tab button.
    Tab(&'a str),
    /// Tab strip, progress track and pagination buttons for a group with these tab labels.
    Chrome(&'a [String]),
}

/// Layout capability supplied by the host.
///
/// Implementations measure off-screen: nothing measured here is ever shown,
/// so measuring cannot cause flicker.
pub trait Measure {
    fn measure(&self, item: Renderable<'_>, available_width: f32) -> Size;
}

/// Deterministic measurement on a grid of fixed-size character cells.
///
/// Used where there is no real text layout engine (terminal output, HTML export)
/// and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CharCellMeasure {
    pub cell_width: f32,
    pub line_height: f32,
    pub tab_padding: f32,
    pub panel_padding: f32,
    pub track_height: f32,
    pub pagination_height: f32,
}

impl Default for CharCellMeasure {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            line_height: 20.0,
            tab_padding: 12.0,
            panel_padding: 16.0,
            track_height: 4.0,
            pagination_height: 36.0,
        }
    }
}

impl CharCellMeasure {
    fn columns(&self, width: f32) -> usize {
        ((width / self.cell_width).floor() as usize).max(1)
    }

    fn wrapped_lines(&self, text: &str, width: f32) -> usize {
        let columns = self.columns(width);
        text.lines()
            .map(|line| line.chars().count().div_ceil(columns).max(1))
            .sum()
    }

    fn tab_height(&self) -> f32 {
        self.line_height + self.tab_padding
    }
}

impl Measure for CharCellMeasure {
    fn measure(&self, item: Renderable<'_>, available_width: f32) -> Size {
        match item {
            Renderable::SlideContent(text) => {
                let inner = (available_width - self.panel_padding * 2.0).max(self.cell_width);
                let lines = self.wrapped_lines(text.trim_end(), inner);
                Size::new(
                    available_width,
                    lines as f32 * self.line_height + self.panel_padding * 2.0,
                )
            }
            Renderable::Tab(label) => Size::new(
                label.chars().count() as f32 * self.cell_width + self.tab_padding * 2.0,
                self.tab_height(),
            ),
            Renderable::Chrome(labels) => {
                let tabs = if labels.is_empty() {
                    0.0
                } else {
                    self.tab_height()
                };
                Size::new(
                    available_width,
                    tabs + self.track_height + self.pagination_height,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_content_wraps_by_columns() {
        let m = CharCellMeasure::default();
        // 160px wide panel leaves 128px = 16 columns.
        let short = m.measure(Renderable::SlideContent("0123456789"), 160.0);
        let long = m.measure(Renderable::SlideContent(&"x".repeat(40)), 160.0);
        assert_eq!(short.height, 20.0 + 32.0);
        assert_eq!(long.height, 3.0 * 20.0 + 32.0);
    }

    #[test]
    fn test_blank_lines_count_and_empty_content_is_padding_only() {
        let m = CharCellMeasure::default();
        let gaps = m.measure(Renderable::SlideContent("a\n\nb"), 400.0);
        assert_eq!(gaps.height, 3.0 * 20.0 + 32.0);
        let empty = m.measure(Renderable::SlideContent(""), 400.0);
        assert_eq!(empty.height, 32.0);
    }

    #[test]
    fn test_tab_width_grows_with_label() {
        let m = CharCellMeasure::default();
        assert_eq!(m.measure(Renderable::Tab("abcd"), 500.0).width, 32.0 + 24.0);
    }

    #[test]
    fn test_chrome_height() {
        let m = CharCellMeasure::default();
        let labels = vec!["A".to_string()];
        assert_eq!(m.measure(Renderable::Chrome(&labels), 500.0).height, 32.0 + 4.0 + 36.0);
    }
}
