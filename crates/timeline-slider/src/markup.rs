//! HTML fragment for a slider snapshot.
//!
//! Class names match what the front-end stylesheet targets: `slide-wrap`,
//! `tabs`, `slide-content`, `nav-arrows` and the `active` state class.

use std::fmt::Write;

use crate::slider::SliderSnapshot;
use crate::slider::group::RenderedGroup;

pub fn render(snapshot: &SliderSnapshot) -> String {
    if snapshot.groups.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    let _ = writeln!(
        html,
        r#"<div class="timeline-slider" data-group-size="{}" style="min-height: {:.1}px;">"#,
        snapshot.group_size, snapshot.min_height
    );
    for group in &snapshot.groups {
        write_group(&mut html, snapshot, group);
    }
    if let Some(controls) = snapshot.controls {
        html.push_str("  <div class=\"nav-arrows\">\n");
        let _ = writeln!(
            html,
            r#"    <button type="button" class="prev" aria-label="Previous"{}>&larr;</button>"#,
            disabled(controls.previous_disabled)
        );
        let _ = writeln!(
            html,
            r#"    <button type="button" class="next" aria-label="Next"{}>&rarr;</button>"#,
            disabled(controls.next_disabled)
        );
        html.push_str("  </div>\n");
    }
    html.push_str("</div>\n");
    html
}

fn write_group(html: &mut String, snapshot: &SliderSnapshot, group: &RenderedGroup) {
    let _ = writeln!(
        html,
        r#"  <div class="slide-wrap{}" data-group="{}"{}>"#,
        active(group.visible),
        group.index,
        if group.visible { "" } else { " hidden" }
    );

    let _ = writeln!(
        html,
        r#"    <div class="tabs {}" role="tablist">"#,
        escape(&group.tab_strip.class)
    );
    for tab in &group.tab_strip.tabs {
        let _ = writeln!(
            html,
            r#"      <button type="button" role="tab" class="tab{}" data-target="{}" aria-selected="{}">{}</button>"#,
            active(tab.active),
            escape(&tab.target),
            tab.active,
            escape(&tab.label)
        );
    }
    html.push_str("    </div>\n");

    let style = match snapshot.timeline {
        Some(bar) if group.visible => format!(r#" style="{}""#, bar.style()),
        _ => String::new(),
    };
    let _ = writeln!(
        html,
        r#"    <div class="timeline"><div class="timeline-progress"{style}></div></div>"#
    );

    for panel in &group.panels {
        let _ = writeln!(
            html,
            r#"    <div class="slide-content{}" id="{}" data-slide-id="{}" role="tabpanel">{}</div>"#,
            active(panel.active),
            escape(&panel.slide_id),
            escape(&panel.slide_id),
            escape(&panel.content)
        );
    }
    html.push_str("  </div>\n");
}

fn active(is_active: bool) -> &'static str {
    if is_active { " active" } else { "" }
}

fn disabled(is_disabled: bool) -> &'static str {
    if is_disabled { " disabled" } else { "" }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
