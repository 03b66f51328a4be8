//! Tab strip and content panels for one group.
//!
//! The rendered form is a pure view of a [`Group`]: it is rebuilt from the
//! group whenever a host needs to draw or serialize it, so tab and panel
//! activation can never drift apart.

use serde::Serialize;

use super::grouping::Group;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub label: String,
    /// Identity of the slide this tab activates.
    pub target: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabStrip {
    /// Styling hook encoding the number of tabs, e.g. `tabs-count-3`.
    pub class: String,
    pub tabs: Vec<Tab>,
}

#[cfg(test)]
impl TabStrip {
    pub fn active_index(&self) -> Option<usize> {
        self.tabs.iter().position(|t| t.active)
    }

    pub fn labels(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.label.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub slide_id: String,
    pub content: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedGroup {
    pub index: usize,
    pub visible: bool,
    pub tab_strip: TabStrip,
    pub panels: Vec<Panel>,
}

pub fn tab_count_class(count: usize) -> String {
    format!("tabs-count-{count}")
}

pub fn render(group: &Group) -> RenderedGroup {
    let tabs = group
        .slides
        .iter()
        .map(|slide| Tab {
            label: slide.title.clone(),
            target: slide.identity.clone(),
            active: slide.is_active,
        })
        .collect();
    let panels = group
        .slides
        .iter()
        .map(|slide| Panel {
            slide_id: slide.identity.clone(),
            content: slide.content.clone(),
            active: slide.is_active,
        })
        .collect();

    RenderedGroup {
        index: group.index,
        visible: group.is_active,
        tab_strip: TabStrip {
            class: tab_count_class(group.len()),
            tabs,
        },
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::grouping::partition;
    use crate::source::SlideRecord;
    use std::num::NonZeroUsize;

    #[test]
    fn test_fresh_group_marks_first_tab_and_panel() {
        let records = vec![
            SlideRecord::new("one").with_title("One").with_identity("a"),
            SlideRecord::new("two").with_title("Two").with_identity("b"),
        ];
        let groups = partition(&records, NonZeroUsize::new(3).unwrap());
        let rendered = render(&groups[0]);

        assert!(rendered.visible);
        assert_eq!(rendered.tab_strip.class, "tabs-count-2");
        assert_eq!(rendered.tab_strip.labels(), vec!["One", "Two"]);
        assert_eq!(rendered.tab_strip.tabs[1].target, "b");
        assert_eq!(rendered.tab_strip.active_index(), Some(0));
        assert!(rendered.panels[0].active);
        assert!(!rendered.panels[1].active);
    }

    #[test]
    fn test_render_follows_group_activation() {
        let records = vec![SlideRecord::new("x"); 3];
        let mut groups = partition(&records, NonZeroUsize::new(3).unwrap());
        groups[0].activate(1);
        let rendered = render(&groups[0]);
        assert_eq!(rendered.tab_strip.active_index(), Some(1));
        let active_panels: Vec<&str> = rendered
            .panels
            .iter()
            .filter(|p| p.active)
            .map(|p| p.slide_id.as_str())
            .collect();
        assert_eq!(active_panels, vec!["slide-0-1"]);
    }
}
