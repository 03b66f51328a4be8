
use super::grouping::Group;
use super::{Action, BreakpointPolicy, CharCellMeasure, Outcome, SliderInstance, Viewport};
use crate::source::SlideRecord;

/// Desktop width under the default breakpoint table (3 slides per group).
const DESKTOP: f32 = 1024.0;
/// Mobile width under the default breakpoint table (1 slide per group).
const MOBILE: f32 = 400.0;

/// Helper to create `n` slides with identities `s0..sN` so order is traceable.
fn records(n: usize) -> Vec<SlideRecord> {
    (0..n)
        .map(|i| {
            SlideRecord::new(format!("Body of slide {i}"))
                .with_identity(format!("s{i}"))
                .with_title(format!("Step {}", i + 1))
        })
        .collect()
}

/// Helper to mount an instance with the default policy and character-cell layout.
fn mount(n: usize, width: f32) -> SliderInstance {
    SliderInstance::init(
        records(n),
        BreakpointPolicy::default(),
        width,
        &CharCellMeasure::default(),
    )
}

/// Helper to dispatch with the default character-cell layout.
fn dispatch(instance: &mut SliderInstance, action: Action) -> Outcome {
    instance.dispatch(action, &CharCellMeasure::default())
}

/// Resize where the container spans the whole viewport.
fn resize(width: f32) -> Action {
    Action::Resize(Viewport::uniform(width))
}

/// Identities of every grouped slide, in group order.
fn flat_ids(groups: &[Group]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|g| g.slides.iter().map(|s| s.identity.clone()))
        .collect()
}

/// Assert exactly one active group, exactly one active slide in it, and that
/// both agree with the navigation state.
fn assert_single_active(instance: &SliderInstance) {
    let groups = instance.groups();
    if groups.is_empty() {
        return;
    }
    let active: Vec<&Group> = groups.iter().filter(|g| g.is_active).collect();
    assert_eq!(active.len(), 1, "expected one active group, got {}", active.len());
    let state = instance.state();
    assert_eq!(active[0].index, state.group);
    let active_slides: Vec<usize> = active[0]
        .slides
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_active)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(active_slides, vec![state.tab]);
}
