pub mod splitter;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][A-Za-z0-9_-]*):\s*(.*)$").unwrap());
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)(?:\s+#+)?\s*$").unwrap());

/// One slide as supplied by the authoring side. Never modified by the slider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// First heading in the content, used when no explicit title is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
impl SlideRecord {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML slide list: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON slide list: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Markdown,
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Markdown,
        }
    }
}

/// Structured sources may be a bare list or a mapping with a `slides` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<SlideRecord>),
    Wrapped { slides: Vec<SlideRecord> },
}

impl Document {
    fn into_records(self) -> Vec<SlideRecord> {
        let records = match self {
            Self::List(records) | Self::Wrapped { slides: records } => records,
        };
        records.into_iter().map(fill_heading).collect()
    }
}

pub fn load(path: &Path) -> Result<Vec<SlideRecord>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse(&content, Format::from_path(path))?;
    info!(path = %path.display(), slides = records.len(), "loaded slide source");
    Ok(records)
}

pub fn parse(content: &str, format: Format) -> Result<Vec<SlideRecord>, SourceError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    match format {
        Format::Markdown => Ok(parse_markdown(content)),
        Format::Yaml => Ok(serde_yaml::from_str::<Document>(content)?.into_records()),
        Format::Json => Ok(serde_json::from_str::<Document>(content)?.into_records()),
    }
}

pub fn parse_markdown(content: &str) -> Vec<SlideRecord> {
    splitter::split(content)
        .into_iter()
        .map(|raw| parse_slide(&raw))
        .collect()
}

fn parse_slide(raw: &str) -> SlideRecord {
    let mut record = SlideRecord::default();
    let mut body: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if let Some(caps) = DIRECTIVE.captures(line.trim()) {
            let value = caps[2].trim().to_string();
            match &caps[1] {
                "id" => {
                    record.identity = Some(value);
                    continue;
                }
                "title" => {
                    record.title = Some(value);
                    continue;
                }
                other => debug!(directive = other, "ignoring unknown slide directive"),
            }
        }
        body.push(line);
    }

    record.content = body.join("\n").trim().to_string();
    fill_heading(record)
}

fn fill_heading(mut record: SlideRecord) -> SlideRecord {
    if record.heading.is_none() {
        record.heading = first_heading(&record.content);
    }
    record
}

/// Sub-headings take precedence over a top-level `#` heading.
pub fn first_heading(content: &str) -> Option<String> {
    let mut h1 = None;
    let mut in_fence = false;
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let Some(caps) = HEADING.captures(trimmed) else {
            continue;
        };
        let text = caps[2].trim().to_string();
        if text.is_empty() {
            continue;
        }
        if caps[1].len() > 1 {
            return Some(text);
        }
        h1.get_or_insert(text);
    }
    h1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_markdown_directives_become_fields() {
        let md = "@id: launch\n@title: Launch Day\n## Ignored heading\n\nWe shipped.\n\n---\n\n## Second\n\nMore.";
        let records = parse(md, Format::Markdown).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identity.as_deref(), Some("launch"));
        assert_eq!(records[0].title.as_deref(), Some("Launch Day"));
        assert!(!records[0].content.contains("@id"));
        assert_eq!(records[1].identity, None);
        assert_eq!(records[1].heading.as_deref(), Some("Second"));
    }

    #[test]
    fn test_subheading_preferred_over_h1() {
        assert_eq!(
            first_heading("# Big\n\n### Small\n\ntext").as_deref(),
            Some("Small")
        );
        assert_eq!(first_heading("# Only\n\ntext").as_deref(), Some("Only"));
        assert_eq!(first_heading("no headings"), None);
    }

    #[test]
    fn test_heading_inside_code_fence_is_not_a_title() {
        let content = "```sh\n# comment\n```\nplain";
        assert_eq!(first_heading(content), None);
    }

    #[test]
    fn test_unknown_directive_stays_in_content() {
        let records = parse_markdown("@layout: wide\nBody");
        assert_eq!(records[0].content, "@layout: wide\nBody");
    }

    #[test]
    fn test_yaml_list_and_wrapped_forms() {
        let list = "- id: a\n  title: First\n  content: one\n- content: \"## Two\\ntext\"\n";
        let records = parse(list, Format::Yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identity.as_deref(), Some("a"));
        assert_eq!(records[1].heading.as_deref(), Some("Two"));

        let wrapped = "slides:\n  - title: Only\n    content: body\n";
        let records = parse(wrapped, Format::Yaml).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Only"));
    }

    #[test]
    fn test_json_source() {
        let json = r#"{"slides": [{"identity": "x", "content": "hello"}, {"content": "world"}]}"#;
        let records = parse(json, Format::Json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identity.as_deref(), Some("x"));
    }

    #[test]
    fn test_empty_source_is_valid() {
        assert!(parse("", Format::Yaml).unwrap().is_empty());
        assert!(parse("   \n", Format::Markdown).unwrap().is_empty());
    }

    #[test]
    fn test_load_picks_format_from_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "- content: from yaml").unwrap();
        let records = load(file.path()).unwrap();
        assert_eq!(records[0].content, "from yaml");

        let missing = load(Path::new("/definitely/not/here.md"));
        assert!(matches!(missing, Err(SourceError::Io { .. })));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(matches!(
            parse("slides: [unclosed", Format::Yaml),
            Err(SourceError::Yaml(_))
        ));
    }
}
