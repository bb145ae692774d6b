//! The coordinator: owns the dataset, query state, current projection and
//! subscribers, and routes events through [`transition`].

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use shelf_ingest::{ParseReport, Parser, Source};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::dataset::{Dataset, FilterOptions};
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::event::{Event, TextEdit};
use crate::projection::{Projection, Rules};
use crate::state::QueryState;
use crate::transition::{apply, transition};

/// What a rendering layer should show besides the rows themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// No dataset yet.
    Loading,
    /// The source failed. Nothing will be shown until a new load succeeds.
    LoadFailed,
    /// Data is loaded but nothing matches the filters.
    NoResults,
    /// At least one record matches.
    Results,
}

impl Indicator {
    /// Default user-facing text, if the indicator shows any.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Indicator::Loading => Some("Loading..."),
            Indicator::LoadFailed => Some("Error loading data."),
            Indicator::NoResults => Some("No results found."),
            Indicator::Results => None,
        }
    }
}

/// Counts from the most recent successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub records: usize,
    pub rows_seen: usize,
    pub dropped: usize,
    pub quote_recovered: bool,
}

impl From<&ParseReport> for LoadSummary {
    fn from(report: &ParseReport) -> Self {
        Self {
            records: report.records.len(),
            rows_seen: report.rows_seen,
            dropped: report.dropped(),
            quote_recovered: report.quote_recovered,
        }
    }
}

enum LoadState {
    Loading,
    Failed(String),
    Ready(Arc<Dataset>),
}

/// Callback notified with every recomputed projection.
pub type Subscriber = Box<dyn FnMut(&Projection)>;

/// Single-threaded query engine over one catalog.
///
/// ```
/// use shelf::{Engine, EngineConfig, Event, Indicator};
/// use shelf_ingest::TextSource;
///
/// let mut engine = Engine::new(&EngineConfig::default()).unwrap();
/// assert_eq!(engine.indicator(), Indicator::Loading);
///
/// let mut source = TextSource::new(
///     "Name,Link,Category,License,Tags\n\
///      SDL,https://libsdl.org,Libraries,Custom,input\n\
///      Kenney,https://kenney.nl,Assets,CC0,\"2d, ui\"\n",
/// );
/// engine.load(&mut source).unwrap();
///
/// let names: Vec<_> = engine.projection().unwrap().records().map(|r| r.name()).collect();
/// assert_eq!(names, ["Kenney", "SDL"]);
///
/// engine.dispatch(Event::tags("ui"));
/// assert_eq!(engine.projection().unwrap().matched(), 1);
/// ```
pub struct Engine {
    rules: Rules,
    parser: Parser,
    state: QueryState,
    load: LoadState,
    summary: Option<LoadSummary>,
    projection: Option<Projection>,
    text: Debouncer<TextEdit>,
    subscribers: Vec<Subscriber>,
}

impl Engine {
    /// Creates an engine waiting for its first load.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rules: Rules {
                paginator: config.paginator()?,
                licenses: config.rank_table(),
            },
            parser: config.parser()?,
            state: QueryState::with_sort(config.sort.clone()),
            load: LoadState::Loading,
            summary: None,
            projection: None,
            text: Debouncer::new(config.debounce_window()),
            subscribers: Vec::new(),
        })
    }

    /// Registers a callback for every future projection.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Projection) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Fetches from `source` and installs the result.
    pub fn load<S: Source + ?Sized>(&mut self, source: &mut S) -> Result<&Projection> {
        self.begin_load();
        info!(source = %source.name(), "loading catalog");
        let fetched = source.fetch();
        self.complete_load(fetched)
    }

    /// Marks a load as in flight. Events keep updating the query state.
    pub fn begin_load(&mut self) {
        self.load = LoadState::Loading;
        self.projection = None;
    }

    /// Installs fetched text, replacing any previous dataset, or records the
    /// failure.
    pub fn complete_load(&mut self, fetched: shelf_ingest::Result<String>) -> Result<&Projection> {
        let text = match fetched {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "catalog load failed");
                self.load = LoadState::Failed(err.to_string());
                self.projection = None;
                return Err(err.into());
            }
        };

        let report = self.parser.parse(&text);
        let summary = LoadSummary::from(&report);
        let dataset = Arc::new(Dataset::new(report.into_records(), &self.rules.licenses));
        info!(
            records = summary.records,
            dropped = summary.dropped,
            categories = dataset.options().categories.len(),
            licenses = dataset.options().licenses.len(),
            "catalog loaded"
        );

        self.summary = Some(summary);
        self.load = LoadState::Ready(Arc::clone(&dataset));
        let projection = Projection::compute(&self.rules, &self.state, &dataset);
        self.state.page = projection.page().number;
        Ok(self.publish(projection))
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Applies an event and, once data is loaded, publishes the new projection.
    ///
    /// Before the data arrives the query state still changes and the
    /// projection is computed from it when the load completes. Page
    /// navigation has nothing to move through yet and only `GoToPage` is
    /// remembered.
    pub fn dispatch(&mut self, event: Event) -> Option<&Projection> {
        let dataset = match &self.load {
            LoadState::Ready(dataset) => Arc::clone(dataset),
            _ => {
                debug!(?event, "deferring event until data is loaded");
                self.state = apply(&self.state, &event).0;
                return None;
            }
        };

        let (state, projection) = transition(&self.rules, &self.state, &dataset, &event);
        self.state = state;
        Some(self.publish(projection))
    }

    /// Records a name edit; it takes effect once the input goes quiet.
    pub fn edit_name(&mut self, text: impl Into<String>, now: Instant) {
        self.schedule_text(
            TextEdit {
                name: Some(text.into()),
                tags: None,
            },
            now,
        );
    }

    /// Records a tags edit; it takes effect once the input goes quiet.
    pub fn edit_tags(&mut self, text: impl Into<String>, now: Instant) {
        self.schedule_text(
            TextEdit {
                name: None,
                tags: Some(text.into()),
            },
            now,
        );
    }

    /// Applies pending text edits whose quiet window has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<&Projection> {
        let draft = self.text.poll(now)?;
        self.dispatch(Event::SetText(draft))
    }

    /// Applies pending text edits immediately.
    pub fn flush(&mut self) -> Option<&Projection> {
        let draft = self.text.flush()?;
        self.dispatch(Event::SetText(draft))
    }

    /// Returns `true` while a text edit is waiting for its quiet window.
    pub fn has_pending_edit(&self) -> bool {
        self.text.is_pending()
    }

    fn schedule_text(&mut self, edit: TextEdit, now: Instant) {
        let mut draft = self.text.cancel().unwrap_or_default();
        draft.merge(edit);
        self.text.schedule(draft, now);
    }

    fn publish(&mut self, projection: Projection) -> &Projection {
        for subscriber in &mut self.subscribers {
            subscriber(&projection);
        }
        self.projection.insert(projection)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn indicator(&self) -> Indicator {
        match (&self.load, &self.projection) {
            (LoadState::Loading, _) => Indicator::Loading,
            (LoadState::Failed(_), _) => Indicator::LoadFailed,
            (LoadState::Ready(_), Some(projection)) if !projection.is_empty() => Indicator::Results,
            (LoadState::Ready(_), _) => Indicator::NoResults,
        }
    }

    /// The most recently published projection.
    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match &self.load {
            LoadState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    /// Category and license choices for the current dataset.
    pub fn filter_options(&self) -> Option<&FilterOptions> {
        self.dataset().map(|dataset| dataset.options())
    }

    pub fn summary(&self) -> Option<LoadSummary> {
        self.summary
    }

    /// Why the last load failed, if it did.
    pub fn load_error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("indicator", &self.indicator())
            .field("summary", &self.summary)
            .field("pending_edit", &self.text.is_pending())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
