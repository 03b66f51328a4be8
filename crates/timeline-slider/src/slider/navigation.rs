use serde::Serialize;

use super::responsive::Viewport;

/// A discrete UI event consumed by a slider instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A tab in the visible group was clicked.
    ActivateTab(usize),
    Next,
    Previous,
    /// The viewport or the container was resized.
    Resize(Viewport),
}

/// Position of the active slide: which group is visible and which tab in it is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub group: usize,
    pub tab: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl NavigationState {
    pub fn new(group: usize, tab: usize) -> Self {
        Self { group, tab }
    }

    pub fn is_first(&self) -> bool {
        self.group == 0 && self.tab == 0
    }

    pub fn is_last(&self, group_sizes: &[usize]) -> bool {
        match group_sizes.len().checked_sub(1) {
            Some(last_group) => {
                self.group == last_group && self.tab + 1 >= group_sizes[last_group]
            }
            None => true,
        }
    }

    pub fn controls(&self, group_sizes: &[usize]) -> Controls {
        Controls {
            previous_disabled: self.is_first(),
            next_disabled: self.is_last(group_sizes),
        }
    }

    fn is_valid(&self, group_sizes: &[usize]) -> bool {
        group_sizes
            .get(self.group)
            .is_some_and(|&len| self.tab < len)
    }

    pub fn next(self, group_sizes: &[usize]) -> Self {
        if !self.is_valid(group_sizes) {
            return self;
        }
        if self.tab + 1 < group_sizes[self.group] {
            Self::new(self.group, self.tab + 1)
        } else if self.group + 1 < group_sizes.len() {
            Self::new(self.group + 1, 0)
        } else {
            self
        }
    }

    pub fn previous(self, group_sizes: &[usize]) -> Self {
        if !self.is_valid(group_sizes) {
            return self;
        }
        if self.tab > 0 {
            Self::new(self.group, self.tab - 1)
        } else if self.group > 0 {
            let group = self.group - 1;
            Self::new(group, group_sizes[group].saturating_sub(1))
        } else {
            self
        }
    }

    pub fn activate_tab(self, tab: usize, group_sizes: &[usize]) -> Self {
        match group_sizes.get(self.group) {
            Some(&len) if tab < len => Self::new(self.group, tab),
            _ => self,
        }
    }
}

/// Apply one action to the navigation state.
///
/// Boundary moves and out-of-range tabs return the state unchanged. `Resize`
/// never moves the state here; regrouping is decided by the owning instance.
pub fn reduce(state: NavigationState, action: &Action, group_sizes: &[usize]) -> NavigationState {
    match *action {
        Action::ActivateTab(tab) => state.activate_tab(tab, group_sizes),
        Action::Next => state.next(group_sizes),
        Action::Previous => state.previous(group_sizes),
        Action::Resize(_) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: &[usize] = &[3, 3, 1];

    #[test]
    fn test_next_walks_tabs_then_groups() {
        let mut state = NavigationState::default();
        let mut visited = vec![state];
        for _ in 0..10 {
            state = reduce(state, &Action::Next, SIZES);
            visited.push(state);
        }
        assert_eq!(visited[1], NavigationState::new(0, 1));
        assert_eq!(visited[3], NavigationState::new(1, 0));
        assert_eq!(visited[6], NavigationState::new(2, 0));
        assert_eq!(visited[10], NavigationState::new(2, 0));
    }

    #[test]
    fn test_previous_enters_last_tab_of_previous_group() {
        let state = NavigationState::new(2, 0);
        assert_eq!(state.previous(SIZES), NavigationState::new(1, 2));
    }

    #[test]
    fn test_activate_tab_out_of_range_is_noop() {
        let state = NavigationState::new(2, 0);
        assert_eq!(reduce(state, &Action::ActivateTab(1), SIZES), state);
        assert_eq!(
            reduce(NavigationState::default(), &Action::ActivateTab(2), SIZES),
            NavigationState::new(0, 2)
        );
    }

    #[test]
    fn test_resize_does_not_move() {
        let state = NavigationState::new(1, 1);
        assert_eq!(reduce(state, &Action::Resize(Viewport::uniform(300.0)), SIZES), state);
    }

    #[test]
    fn test_controls_at_boundaries() {
        let first = NavigationState::default().controls(SIZES);
        assert!(first.previous_disabled);
        assert!(!first.next_disabled);

        let last = NavigationState::new(2, 0).controls(SIZES);
        assert!(!last.previous_disabled);
        assert!(last.next_disabled);

        let single = NavigationState::default().controls(&[1]);
        assert!(single.previous_disabled && single.next_disabled);
    }

    #[test]
    fn test_no_groups_is_inert() {
        let state = NavigationState::default();
        assert_eq!(state.next(&[]), state);
        assert_eq!(state.previous(&[]), state);
        assert!(state.is_last(&[]));
    }
}
