use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Width below which every group holds a single slide.
pub const MOBILE_BREAKPOINT: f32 = 425.0;

const MOBILE_SLIDES: NonZeroUsize = NonZeroUsize::MIN;
const DESKTOP_SLIDES: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PolicyError {
    #[error("breakpoint table is empty")]
    Empty,
    #[error("breakpoint width {0} is not a finite, non-negative number")]
    InvalidWidth(f32),
    #[error("breakpoint widths must be strictly increasing ({previous} then {next})")]
    Unordered { previous: f32, next: f32 },
    #[error("slides per group must be at least 1")]
    ZeroSlides,
    #[error("invalid breakpoint entry `{0}`, expected WIDTH:SLIDES")]
    Malformed(String),
}

/// One row of the breakpoint table: from `min_width` upward, groups hold `slides` slides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: f32,
    pub slides: NonZeroUsize,
}

/// Maps a viewport width to the number of slides per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Breakpoint>", into = "Vec<Breakpoint>")]
pub struct BreakpointPolicy {
    breakpoints: Vec<Breakpoint>,
}

impl Default for BreakpointPolicy {
    fn default() -> Self {
        Self {
            breakpoints: vec![
                Breakpoint {
                    min_width: 0.0,
                    slides: MOBILE_SLIDES,
                },
                Breakpoint {
                    min_width: MOBILE_BREAKPOINT,
                    slides: DESKTOP_SLIDES,
                },
            ],
        }
    }
}

impl BreakpointPolicy {
    pub fn new(breakpoints: Vec<Breakpoint>) -> Result<Self, PolicyError> {
        if breakpoints.is_empty() {
            return Err(PolicyError::Empty);
        }
        for bp in &breakpoints {
            if !bp.min_width.is_finite() || bp.min_width < 0.0 {
                return Err(PolicyError::InvalidWidth(bp.min_width));
            }
        }
        for pair in breakpoints.windows(2) {
            if pair[1].min_width <= pair[0].min_width {
                return Err(PolicyError::Unordered {
                    previous: pair[0].min_width,
                    next: pair[1].min_width,
                });
            }
        }
        Ok(Self { breakpoints })
    }

    /// Parse the compact `WIDTH:SLIDES,WIDTH:SLIDES` form used on the command line
    /// and by `config set breakpoints`.
    pub fn parse(table: &str) -> Result<Self, PolicyError> {
        let mut breakpoints = Vec::new();
        for entry in table.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (width, slides) = entry
                .split_once(':')
                .ok_or_else(|| PolicyError::Malformed(entry.to_string()))?;
            let min_width: f32 = width
                .trim()
                .parse()
                .map_err(|_| PolicyError::Malformed(entry.to_string()))?;
            let slides: usize = slides
                .trim()
                .parse()
                .map_err(|_| PolicyError::Malformed(entry.to_string()))?;
            let slides = NonZeroUsize::new(slides).ok_or(PolicyError::ZeroSlides)?;
            breakpoints.push(Breakpoint { min_width, slides });
        }
        Self::new(breakpoints)
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn group_size(&self, width: f32) -> NonZeroUsize {
        self.breakpoints
            .iter()
            .rev()
            .find(|bp| bp.min_width <= width)
            .or_else(|| self.breakpoints.first())
            .map(|bp| bp.slides)
            .unwrap_or(MOBILE_SLIDES)
    }
}

impl TryFrom<Vec<Breakpoint>> for BreakpointPolicy {
    type Error = PolicyError;

    fn try_from(breakpoints: Vec<Breakpoint>) -> Result<Self, Self::Error> {
        Self::new(breakpoints)
    }
}

impl From<BreakpointPolicy> for Vec<Breakpoint> {
    fn from(policy: BreakpointPolicy) -> Self {
        policy.breakpoints
    }
}

impl std::fmt::Display for BreakpointPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .breakpoints
            .iter()
            .map(|bp| format!("{}:{}", bp.min_width, bp.slides))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

pub fn needs_rebuild(current: NonZeroUsize, next: NonZeroUsize) -> bool {
    current != next
}

/// Widths a slider is laid out against.
///
/// The viewport picks the slides per group; the container bounds the tab
/// strip, the progress line and text wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub container: f32,
}

impl Viewport {
    pub fn new(width: f32, container: f32) -> Self {
        Self { width, container }
    }

    /// A container spanning the whole viewport.
    pub fn uniform(width: f32) -> Self {
        Self::new(width, width)
    }

    /// `None` if either width is not finite; negative widths clamp to zero.
    pub fn sanitized(self) -> Option<Self> {
        (self.width.is_finite() && self.container.is_finite())
            .then(|| Self::new(self.width.max(0.0), self.container.max(0.0)))
    }
}

impl From<f32> for Viewport {
    fn from(width: f32) -> Self {
        Self::uniform(width)
    }
}

/// Trailing-edge debounce for resize events.
///
/// The host reports every viewport it observes; `poll` yields the last one once
/// nothing new has arrived for `delay`.
#[derive(Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(Viewport, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn observe(&mut self, viewport: Viewport, now: Instant) {
        self.pending = Some((viewport, now));
    }

    pub fn poll(&mut self, now: Instant) -> Option<Viewport> {
        let (viewport, at) = self.pending?;
        if now.duration_since(at) >= self.delay {
            self.pending = None;
            Some(viewport)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
