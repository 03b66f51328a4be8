use super::grouping::Group;
use super::measure::{Measure, Renderable};

/// Minimum container height that fits the tallest slide plus the navigation chrome.
///
/// Every slide of every group is measured, not just the visible ones, so switching
/// tabs or groups never changes the container height. The chrome is measured once
/// using the first group as the representative.
pub fn min_height<M: Measure + ?Sized>(measure: &M, groups: &[Group], width: f32) -> f32 {
    let Some(first) = groups.first() else {
        return 0.0;
    };

    let tallest = groups
        .iter()
        .flat_map(|g| g.slides.iter())
        .map(|slide| {
            measure
                .measure(Renderable::SlideContent(&slide.content), width)
                .height
        })
        .fold(0.0_f32, f32::max);

    let labels = first.titles();
    let chrome = measure.measure(Renderable::Chrome(&labels), width).height;

    tallest + chrome
}
