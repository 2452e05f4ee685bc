// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name → constructor tables for filters and sinks.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chime_backends::{desktop_sink, Backend, CommandSink, LogSink, Timeout};
use chime_config::{FilterSpec, SinkSpec};
use chime_core::{ChimeError, Sink, TagSet};
use chime_router::{Filter, Operator};
use tracing::debug;

/// Names a suggestion must resemble at least this closely.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Operator names people reach for that have no meaningful priority
/// semantics here.
const UNSUPPORTED_OPERATORS: [&str; 3] = ["mul", "div", "xor"];

/// How a filter kind is constructed.
#[derive(Debug, Clone, Copy)]
pub enum FilterFactory {
    /// Built from the node's own parameters. The flag is the default
    /// pattern case sensitivity.
    Leaf(fn(&FilterSpec, bool) -> Result<Filter, ChimeError>),
    /// Built from the node's children with an operator.
    Combinator(Operator),
}

/// Compiled-in filter kinds.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    entries: HashMap<&'static str, FilterFactory>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl FilterRegistry {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Every leaf and combinator the engine implements.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("tag", FilterFactory::Leaf(tag_filter));
        registry.register("text", FilterFactory::Leaf(text_filter));
        registry.register("sender", FilterFactory::Leaf(sender_filter));
        registry.register("highlight", FilterFactory::Leaf(|_, _| Ok(Filter::Highlight)));
        registry.register("private", FilterFactory::Leaf(|_, _| Ok(Filter::Private)));
        registry.register("constant", FilterFactory::Leaf(constant_filter));
        for op in Operator::ALL {
            registry.register(op.as_str(), FilterFactory::Combinator(op));
        }
        registry
    }

    pub fn register(&mut self, kind: &'static str, factory: FilterFactory) {
        self.entries.insert(kind, factory);
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.entries.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Build a whole tree.
    pub fn build(&self, spec: &FilterSpec, default_ignore_case: bool) -> Result<Filter, ChimeError> {
        let Some(factory) = self.entries.get(spec.kind.as_str()) else {
            return Err(self.unknown(spec));
        };

        match *factory {
            FilterFactory::Leaf(build) => {
                if !spec.children.is_empty() {
                    return Err(ChimeError::Config(format!(
                        "filter `{}` does not take children",
                        spec.kind
                    )));
                }
                build(spec, default_ignore_case)
            }
            FilterFactory::Combinator(op) => {
                let children = spec
                    .children
                    .iter()
                    .map(|child| self.build(child, default_ignore_case))
                    .collect::<Result<Vec<_>, _>>()?;
                Filter::combine(op, children, spec.factor)
            }
        }
    }

    /// Operator-looking requests (a known-unsupported name, or any unknown
    /// kind given children) are unknown operators; the rest are unknown
    /// components.
    fn unknown(&self, spec: &FilterSpec) -> ChimeError {
        let kind = spec.kind.to_ascii_lowercase();
        if UNSUPPORTED_OPERATORS.contains(&kind.as_str()) || !spec.children.is_empty() {
            return ChimeError::UnknownOperator {
                operator: spec.kind.clone(),
            };
        }
        ChimeError::UnknownComponent {
            kind: "filter",
            name: spec.kind.clone(),
            suggestion: suggest(&spec.kind, self.entries.keys().copied()),
        }
    }
}

fn require<'a, T: ?Sized>(
    value: Option<&'a T>,
    kind: &str,
    field: &str,
) -> Result<&'a T, ChimeError> {
    value.ok_or_else(|| ChimeError::Config(format!("filter `{kind}` requires `{field}`")))
}

fn tag_filter(spec: &FilterSpec, _: bool) -> Result<Filter, ChimeError> {
    Ok(Filter::tag(require(spec.tag.as_deref(), "tag", "tag")?))
}

fn text_filter(spec: &FilterSpec, default_ignore_case: bool) -> Result<Filter, ChimeError> {
    let pattern = require(spec.pattern.as_deref(), "text", "pattern")?;
    Filter::text(pattern, spec.ignore_case.unwrap_or(default_ignore_case))
}

fn sender_filter(spec: &FilterSpec, default_ignore_case: bool) -> Result<Filter, ChimeError> {
    let pattern = require(spec.pattern.as_deref(), "sender", "pattern")?;
    Filter::sender(pattern, spec.ignore_case.unwrap_or(default_ignore_case))
}

fn constant_filter(spec: &FilterSpec, _: bool) -> Result<Filter, ChimeError> {
    Ok(Filter::constant(*require(spec.value.as_ref(), "constant", "value")?))
}

/// Constructor for one sink kind.
pub type SinkFactory = fn(&SinkSpec) -> Result<Arc<dyn Sink>, ChimeError>;

/// Compiled-in sink kinds.
#[derive(Debug, Clone)]
pub struct SinkRegistry {
    entries: HashMap<&'static str, SinkFactory>,
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl SinkRegistry {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("log", log_sink);
        registry.register("command", command_sink);
        registry.register("desktop", desktop);
        registry
    }

    pub fn register(&mut self, kind: &'static str, factory: SinkFactory) {
        self.entries.insert(kind, factory);
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.entries.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn build(&self, spec: &SinkSpec) -> Result<Arc<dyn Sink>, ChimeError> {
        let factory = self.entries.get(spec.kind.as_str()).ok_or_else(|| {
            ChimeError::UnknownComponent {
                kind: "sink",
                name: spec.kind.clone(),
                suggestion: suggest(&spec.kind, self.entries.keys().copied()),
            }
        })?;
        let sink = factory(spec)?;
        debug!(kind = %spec.kind, name = sink.name(), "sink built");
        Ok(sink)
    }
}

fn interest(spec: &SinkSpec) -> Option<TagSet> {
    spec.tags.as_ref().map(|tags| tags.iter().cloned().collect())
}

fn log_sink(spec: &SinkSpec) -> Result<Arc<dyn Sink>, ChimeError> {
    let mut sink = LogSink::new(spec.effective_name());
    if let Some(tags) = interest(spec) {
        sink = sink.with_interest(tags);
    }
    Ok(Arc::new(sink))
}

fn command_sink(spec: &SinkSpec) -> Result<Arc<dyn Sink>, ChimeError> {
    let program = spec
        .program
        .as_deref()
        .ok_or_else(|| ChimeError::Config("sink `command` requires `program`".to_string()))?;
    let sink = CommandSink::new(spec.effective_name(), program, spec.args.iter().cloned())?;
    Ok(Arc::new(configure(sink, spec)))
}

fn desktop(spec: &SinkSpec) -> Result<Arc<dyn Sink>, ChimeError> {
    let preferences = match &spec.backends {
        Some(names) => names
            .iter()
            .map(|name| parse_backend(name))
            .collect::<Result<Vec<_>, _>>()?,
        None => Backend::all(),
    };
    let sink = desktop_sink(spec.effective_name(), &preferences)?;
    Ok(Arc::new(configure(sink, spec)))
}

fn parse_backend(name: &str) -> Result<Backend, ChimeError> {
    Backend::from_str(name).map_err(|_| ChimeError::UnknownComponent {
        kind: "desktop backend",
        name: name.to_string(),
        suggestion: suggest(
            name,
            Backend::all().into_iter().map(|b| -> &'static str { b.into() }),
        ),
    })
}

/// Options shared by every helper-backed sink.
fn configure(mut sink: CommandSink, spec: &SinkSpec) -> CommandSink {
    sink = sink
        .with_icon(spec.icon.clone())
        .with_display_timeout(Timeout::from_millis(spec.timeout_ms));
    if let Some(ms) = spec.wait_ms {
        sink = sink.with_wait(Duration::from_millis(ms));
    }
    if let Some(status) = spec.success_status {
        sink = sink.with_success_status(status);
    }
    if let Some(tags) = interest(spec) {
        sink = sink.with_interest(tags);
    }
    sink
}

/// Closest known name by Jaro-Winkler similarity.
fn suggest(unknown: &str, known: impl Iterator<Item = &'static str>) -> Option<String> {
    known
        .map(|name| (strsim::jaro_winkler(unknown, name), name))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name.to_string())
}
