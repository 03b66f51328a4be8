use std::path::Path;

use colored::Colorize;

use crate::config::Config;
use crate::slider::{
    Action, BreakpointPolicy, CharCellMeasure, Outcome, SliderInstance, Viewport,
};
use crate::source;

pub fn run(
    file: &Path,
    viewport: Viewport,
    actions: &[String],
    breakpoints: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let actions = actions
        .iter()
        .map(|a| parse_action(a))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let policy = match breakpoints {
        Some(table) => BreakpointPolicy::parse(table)
            .map_err(|e| anyhow::anyhow!("Invalid --breakpoints: {e}"))?,
        None => Config::load_or_default().policy(),
    };

    let records = source::load(file)?;
    let measure = CharCellMeasure::default();
    let mut instance = SliderInstance::init(records, policy, viewport, &measure);

    let mut outcomes = Vec::with_capacity(actions.len());
    for action in actions {
        outcomes.push((action, instance.dispatch(action, &measure)));
    }

    let snapshot = instance.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let viewport = instance.viewport();
    println!(
        "{} {}  {} {}px  {} {}px  {} {}  {} {}",
        "Source:".bold(),
        file.display(),
        "Viewport:".bold(),
        viewport.width,
        "Container:".bold(),
        viewport.container,
        "Slides per group:".bold(),
        instance.group_size(),
        "Policy:".bold(),
        instance.policy()
    );
    if instance.is_empty() {
        println!("{}", "No slides.".yellow());
        return Ok(());
    }

    for (action, outcome) in &outcomes {
        println!("  {} {}", describe(action).dimmed(), outcome_label(*outcome));
    }
    if !outcomes.is_empty() {
        println!();
    }

    for group in &snapshot.groups {
        let marker = if group.visible { "▶" } else { " " };
        println!(
            "{} {} {}",
            marker.cyan(),
            format!("Group {}", group.index + 1).bold(),
            group.tab_strip.class.dimmed()
        );
        for (tab, panel) in group.tab_strip.tabs.iter().zip(&group.panels) {
            let label = if tab.active {
                tab.label.green().bold().to_string()
            } else {
                tab.label.clone()
            };
            println!("    {label}  {}", format!("#{}", panel.slide_id).dimmed());
        }
    }

    println!();
    if let Some(controls) = snapshot.controls {
        println!(
            "{} group {}, tab {}  {} {}  {} {}",
            "Active:".bold(),
            snapshot.state.group + 1,
            snapshot.state.tab + 1,
            "prev".bold(),
            enabled_label(!controls.previous_disabled),
            "next".bold(),
            enabled_label(!controls.next_disabled)
        );
    }
    if let Some(timeline) = snapshot.timeline {
        println!("{} {}", "Timeline:".bold(), timeline.style());
    }
    println!("{} {:.1}px", "Min height:".bold(), snapshot.min_height);
    Ok(())
}

/// Parse one replayed action: `next`, `prev`, `tab:N` (1-based), `resize:W`
/// or `resize:W/C` for a container narrower than the viewport.
pub fn parse_action(input: &str) -> anyhow::Result<Action> {
    let input = input.trim();
    match input.split_once(':') {
        None => match input {
            "next" | "n" => Ok(Action::Next),
            "prev" | "previous" | "p" => Ok(Action::Previous),
            _ => anyhow::bail!("Unknown action: {input}. Expected next, prev, tab:N or resize:W."),
        },
        Some(("tab", n)) => {
            let n: usize = n
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid tab number in {input}"))?;
            if n == 0 {
                anyhow::bail!("Tab numbers start at 1: {input}");
            }
            Ok(Action::ActivateTab(n - 1))
        }
        Some(("resize", widths)) => {
            let viewport = match widths.split_once('/') {
                Some((width, container)) => {
                    Viewport::new(parse_width(width, input)?, parse_width(container, input)?)
                }
                None => Viewport::uniform(parse_width(widths, input)?),
            };
            Ok(Action::Resize(viewport))
        }
        Some(_) => {
            anyhow::bail!("Unknown action: {input}. Expected next, prev, tab:N or resize:W.")
        }
    }
}

fn parse_width(text: &str, input: &str) -> anyhow::Result<f32> {
    let width: f32 = text
        .trim()
        .trim_end_matches("px")
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid width in {input}"))?;
    if !width.is_finite() || width < 0.0 {
        anyhow::bail!("Width must be a non-negative number: {input}");
    }
    Ok(width)
}

fn describe(action: &Action) -> String {
    match action {
        Action::ActivateTab(i) => format!("tab:{}", i + 1),
        Action::Next => "next".to_string(),
        Action::Previous => "prev".to_string(),
        Action::Resize(v) if v.width == v.container => format!("resize:{}", v.width),
        Action::Resize(v) => format!("resize:{}/{}", v.width, v.container),
    }
}

fn outcome_label(outcome: Outcome) -> String {
    match outcome {
        Outcome::Unchanged => "unchanged".dimmed().to_string(),
        Outcome::TabActivated => "tab activated".green().to_string(),
        Outcome::GroupChanged => "group changed".green().to_string(),
        Outcome::Relaid => "relaid".cyan().to_string(),
        Outcome::Rebuilt => "rebuilt".yellow().to_string(),
    }
}

fn enabled_label(enabled: bool) -> String {
    if enabled {
        "enabled".green().to_string()
    } else {
        "disabled".dimmed().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_actions() {
        assert_eq!(parse_action("next").unwrap(), Action::Next);
        assert_eq!(parse_action(" prev ").unwrap(), Action::Previous);
        assert_eq!(parse_action("previous").unwrap(), Action::Previous);
    }

    #[test]
    fn test_parse_tab_is_one_based() {
        assert_eq!(parse_action("tab:1").unwrap(), Action::ActivateTab(0));
        assert_eq!(parse_action("tab:3").unwrap(), Action::ActivateTab(2));
        assert!(parse_action("tab:0").is_err());
        assert!(parse_action("tab:x").is_err());
    }

    #[test]
    fn test_parse_resize_accepts_px_suffix() {
        assert_eq!(
            parse_action("resize:400").unwrap(),
            Action::Resize(Viewport::uniform(400.0))
        );
        assert_eq!(
            parse_action("resize:1024px").unwrap(),
            Action::Resize(Viewport::uniform(1024.0))
        );
        assert!(parse_action("resize:-5").is_err());
        assert!(parse_action("resize:wide").is_err());
    }

    #[test]
    fn test_parse_resize_with_container() {
        assert_eq!(
            parse_action("resize:464/400").unwrap(),
            Action::Resize(Viewport::new(464.0, 400.0))
        );
        assert!(parse_action("resize:464/").is_err());
        assert!(parse_action("resize:464/-1").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_actions() {
        assert!(parse_action("jump").is_err());
        assert!(parse_action("goto:3").is_err());
    }

    #[test]
    fn test_describe_matches_parse_syntax() {
        for input in ["next", "prev", "tab:2", "resize:400", "resize:464/400"] {
            let action = parse_action(input).unwrap();
            assert_eq!(describe(&action), input);
        }
    }
}
