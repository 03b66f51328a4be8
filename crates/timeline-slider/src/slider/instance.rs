use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, trace};

use super::group::{self, RenderedGroup};
use super::grouping::{self, Group};
use super::height;
use super::measure::{Measure, Renderable};
use super::navigation::{self, Action, Controls, NavigationState};
use super::responsive::{self, BreakpointPolicy, Viewport};
use super::timeline::{self, TimelineIndicator};
use crate::source::SlideRecord;

/// What a dispatched action did to the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (boundary move, out-of-range tab, torn-down instance).
    Unchanged,
    /// A different tab in the visible group became active.
    TabActivated,
    /// Navigation crossed into another group.
    GroupChanged,
    /// Width changed without changing the group size; layout was recomputed.
    Relaid,
    /// Group size changed; groups were rebuilt and navigation reset.
    Rebuilt,
}

/// Serializable picture of everything a host needs to draw the slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSnapshot {
    pub viewport: Viewport,
    pub group_size: usize,
    pub state: NavigationState,
    pub controls: Option<Controls>,
    pub timeline: Option<TimelineIndicator>,
    pub tab_widths: Vec<f32>,
    pub min_height: f32,
    pub groups: Vec<RenderedGroup>,
}

/// One mounted slider: its slides, grouping, navigation state and derived layout.
///
/// All layout work goes through the [`Measure`] passed to each call, so the
/// instance itself never touches a rendering backend.
#[derive(Debug)]
pub struct SliderInstance {
    records: Vec<SlideRecord>,
    policy: BreakpointPolicy,
    viewport: Viewport,
    group_size: NonZeroUsize,
    groups: Vec<Group>,
    state: NavigationState,
    tab_widths: Vec<f32>,
    timeline: Option<TimelineIndicator>,
    min_height: f32,
    mounted: bool,
}

impl SliderInstance {
    pub fn init<M: Measure + ?Sized>(
        records: Vec<SlideRecord>,
        policy: BreakpointPolicy,
        viewport: impl Into<Viewport>,
        measure: &M,
    ) -> Self {
        let viewport = viewport
            .into()
            .sanitized()
            .unwrap_or(Viewport::uniform(0.0));
        let mut instance = Self {
            group_size: policy.group_size(viewport.width),
            records,
            policy,
            viewport,
            groups: Vec::new(),
            state: NavigationState::default(),
            tab_widths: Vec::new(),
            timeline: None,
            min_height: 0.0,
            mounted: false,
        };
        instance.rebuild(measure);
        instance
    }

    /// Discard every group and regroup from the slide records at the current
    /// viewport width.
    pub fn rebuild<M: Measure + ?Sized>(&mut self, measure: &M) {
        self.group_size = self.policy.group_size(self.viewport.width);
        self.groups = grouping::partition(&self.records, self.group_size);
        self.state = NavigationState::default();
        self.mounted = true;
        self.relayout(measure);
        debug!(
            slides = self.records.len(),
            groups = self.groups.len(),
            group_size = self.group_size.get(),
            viewport = self.viewport.width,
            container = self.viewport.container,
            "rebuilt slider"
        );
    }

    pub fn replace_slides<M: Measure + ?Sized>(&mut self, records: Vec<SlideRecord>, measure: &M) {
        self.records = records;
        self.rebuild(measure);
    }

    /// Swap the breakpoint table. Groups keep their size until the next
    /// `rebuild`, `replace_slides` or a resize that crosses a breakpoint.
    pub fn set_policy(&mut self, policy: BreakpointPolicy) {
        self.policy = policy;
    }

    pub fn teardown(&mut self) {
        self.groups.clear();
        self.tab_widths.clear();
        self.timeline = None;
        self.min_height = 0.0;
        self.state = NavigationState::default();
        self.mounted = false;
        debug!("slider torn down");
    }

    pub fn dispatch<M: Measure + ?Sized>(&mut self, action: Action, measure: &M) -> Outcome {
        if !self.mounted {
            return Outcome::Unchanged;
        }
        if let Action::Resize(viewport) = action {
            return self.resize(viewport, measure);
        }
        if self.groups.is_empty() {
            return Outcome::Unchanged;
        }

        let next = navigation::reduce(self.state, &action, &self.group_sizes());
        if next == self.state {
            return Outcome::Unchanged;
        }

        let group_changed = next.group != self.state.group;
        if group_changed {
            for group in &mut self.groups {
                group.is_active = group.index == next.group;
            }
        }
        self.groups[next.group].activate(next.tab);
        self.state = next;
        self.update_timeline(measure);
        trace!(group = next.group, tab = next.tab, ?action, "navigated");

        if group_changed {
            Outcome::GroupChanged
        } else {
            Outcome::TabActivated
        }
    }

    fn resize<M: Measure + ?Sized>(&mut self, viewport: Viewport, measure: &M) -> Outcome {
        let Some(viewport) = viewport.sanitized() else {
            return Outcome::Unchanged;
        };
        self.viewport = viewport;
        let next = self.policy.group_size(viewport.width);
        if responsive::needs_rebuild(self.group_size, next) {
            self.rebuild(measure);
            Outcome::Rebuilt
        } else {
            self.relayout(measure);
            Outcome::Relaid
        }
    }

    fn relayout<M: Measure + ?Sized>(&mut self, measure: &M) {
        self.update_timeline(measure);
        self.min_height = height::min_height(measure, &self.groups, self.viewport.container);
    }

    fn update_timeline<M: Measure + ?Sized>(&mut self, measure: &M) {
        self.tab_widths.clear();
        self.timeline = None;
        let Some(group) = self.groups.get(self.state.group) else {
            return;
        };
        self.tab_widths = group
            .slides
            .iter()
            .map(|slide| {
                measure
                    .measure(Renderable::Tab(&slide.title), self.viewport.container)
                    .width
            })
            .collect();
        self.timeline =
            timeline::indicator(&self.tab_widths, self.state.tab, self.viewport.container);
    }

    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Group::len).collect()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn active_group(&self) -> Option<&Group> {
        self.groups.get(self.state.group)
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Pagination state; `None` when there is nothing to paginate.
    pub fn controls(&self) -> Option<Controls> {
        (!self.groups.is_empty()).then(|| self.state.controls(&self.group_sizes()))
    }

    pub fn timeline(&self) -> Option<TimelineIndicator> {
        self.timeline
    }

    pub fn tab_widths(&self) -> &[f32] {
        &self.tab_widths
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    pub fn group_size(&self) -> NonZeroUsize {
        self.group_size
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn policy(&self) -> &BreakpointPolicy {
        &self.policy
    }

    pub fn slide_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn snapshot(&self) -> SliderSnapshot {
        SliderSnapshot {
            viewport: self.viewport,
            group_size: self.group_size.get(),
            state: self.state,
            controls: self.controls(),
            timeline: self.timeline,
            tab_widths: self.tab_widths.clone(),
            min_height: self.min_height,
            groups: self.groups.iter().map(group::render).collect(),
        }
    }
}
