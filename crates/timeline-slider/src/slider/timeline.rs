use serde::Serialize;

/// Extent of the progress line under a tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineIndicator {
    /// Left offset from the start of the tab strip.
    pub offset: f32,
    pub width: f32,
}

impl TimelineIndicator {
    /// Inline style written onto the progress element.
    pub fn style(&self) -> String {
        format!("left: {:.1}px; width: {:.1}px;", self.offset, self.width)
    }
}

/// Place the right edge of the progress line at the horizontal midpoint of the
/// active tab, clamped to the strip width.
///
/// Returns `None` when there is no tab at `active`.
pub fn indicator(tab_widths: &[f32], active: usize, strip_width: f32) -> Option<TimelineIndicator> {
    let active_width = *tab_widths.get(active)?;
    let through_active: f32 = tab_widths[..=active].iter().sum();
    let midpoint = through_active - active_width / 2.0;
    let width = midpoint.clamp(0.0, strip_width.max(0.0));
    Some(TimelineIndicator { offset: 0.0, width })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_of_active_tab() {
        let widths = [100.0, 80.0, 120.0];
        assert_eq!(indicator(&widths, 0, 1000.0).unwrap().width, 50.0);
        assert_eq!(indicator(&widths, 1, 1000.0).unwrap().width, 140.0);
        assert_eq!(indicator(&widths, 2, 1000.0).unwrap().width, 240.0);
    }

    #[test]
    fn test_width_is_clamped_to_strip() {
        let widths = [300.0, 300.0, 300.0];
        let bar = indicator(&widths, 2, 500.0).unwrap();
        assert_eq!(bar.width, 500.0);
    }

    #[test]
    fn test_missing_tab_yields_none() {
        assert_eq!(indicator(&[], 0, 400.0), None);
        assert_eq!(indicator(&[10.0], 1, 400.0), None);
    }

    #[test]
    fn test_style_is_inline_pixels() {
        let bar = TimelineIndicator {
            offset: 0.0,
            width: 42.0,
        };
        assert_eq!(bar.style(), "left: 0.0px; width: 42.0px;");
    }
}
