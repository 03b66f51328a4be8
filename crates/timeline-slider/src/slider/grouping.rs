use std::collections::HashSet;
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::source::SlideRecord;

/// A slide placed into a group, with identity and title resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub identity: String,
    pub title: String,
    pub content: String,
    pub is_active: bool,
}

/// One page of slides. Every group except possibly the last holds exactly
/// `group_size` slides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub index: usize,
    pub slides: Vec<Slide>,
    pub is_active: bool,
}

impl Group {
    /// Make the slide at `position` the only active slide of this group.
    /// Returns `false` and changes nothing if `position` is out of range.
    pub fn activate(&mut self, position: usize) -> bool {
        if position >= self.slides.len() {
            return false;
        }
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.is_active = i == position;
        }
        true
    }

    #[cfg(test)]
    pub fn active_position(&self) -> Option<usize> {
        self.slides.iter().position(|s| s.is_active)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn titles(&self) -> Vec<String> {
        self.slides.iter().map(|s| s.title.clone()).collect()
    }
}

/// Split `records` into consecutive groups of `group_size`, in source order.
///
/// The first group is active and the first slide of every group is active.
/// Zero records produce zero groups.
pub fn partition(records: &[SlideRecord], group_size: NonZeroUsize) -> Vec<Group> {
    let size = group_size.get();
    let mut used: HashSet<String> = HashSet::with_capacity(records.len());

    records
        .chunks(size)
        .enumerate()
        .map(|(group_index, chunk)| {
            let slides = chunk
                .iter()
                .enumerate()
                .map(|(position, record)| {
                    let ordinal = group_index * size + position + 1;
                    Slide {
                        identity: resolve_identity(record, group_index, position, &mut used),
                        title: resolve_title(record, ordinal),
                        content: record.content.clone(),
                        is_active: position == 0,
                    }
                })
                .collect();
            Group {
                index: group_index,
                slides,
                is_active: group_index == 0,
            }
        })
        .collect()
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn resolve_title(record: &SlideRecord, ordinal: usize) -> String {
    non_blank(record.title.as_ref())
        .or_else(|| non_blank(record.heading.as_ref()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Slide {ordinal}"))
}

fn resolve_identity(
    record: &SlideRecord,
    group_index: usize,
    position: usize,
    used: &mut HashSet<String>,
) -> String {
    let base = non_blank(record.identity.as_ref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("slide-{group_index}-{position}"));

    let mut candidate = base.clone();
    let mut suffix = 0;
    while used.contains(&candidate) {
        suffix += 1;
        candidate = format!("{base}-{suffix}");
    }
    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_title_falls_back_to_heading_then_ordinal() {
        let mut with_heading = SlideRecord::new("body");
        with_heading.heading = Some("From heading".to_string());
        let records = vec![
            SlideRecord::new("a").with_title("Explicit"),
            with_heading,
            SlideRecord::new("c").with_title("   "),
            SlideRecord::new("d"),
        ];
        let groups = partition(&records, size(3));
        assert_eq!(groups[0].slides[0].title, "Explicit");
        assert_eq!(groups[0].slides[1].title, "From heading");
        assert_eq!(groups[0].slides[2].title, "Slide 3");
        assert_eq!(groups[1].slides[0].title, "Slide 4");
    }

    #[test]
    fn test_generated_identity_uses_group_and_position() {
        let records = vec![SlideRecord::new("a"); 4];
        let groups = partition(&records, size(3));
        let ids: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.slides.iter().map(|s| s.identity.as_str()))
            .collect();
        assert_eq!(ids, vec!["slide-0-0", "slide-0-1", "slide-0-2", "slide-1-0"]);
    }

    #[test]
    fn test_activate_is_exclusive_and_bounded() {
        let records = vec![SlideRecord::new("a"); 3];
        let mut group = partition(&records, size(3)).remove(0);
        assert_eq!(group.active_position(), Some(0));
        assert!(group.activate(2));
        assert_eq!(group.active_position(), Some(2));
        assert_eq!(group.slides.iter().filter(|s| s.is_active).count(), 1);
        assert!(!group.activate(3));
        assert_eq!(group.active_position(), Some(2));
    }

    #[test]
    fn test_content_is_untouched() {
        let records = vec![SlideRecord::new("  <b>raw</b>\n\n")];
        let groups = partition(&records, size(1));
        assert_eq!(groups[0].slides[0].content, "  <b>raw</b>\n\n");
    }
}
