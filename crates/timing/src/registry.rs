use crate::clock::{Clock, SystemClock};
use common::{Entry, EntryType, RequestStart, TimingError};

/// Name of the synthetic mark every registry starts with.
pub const REQUEST_START: &str = "requestStart";

/// Name-keyed store of marks and measures for one request.
///
/// Each name maps to at most one entry; writing a name again replaces the
/// old entry and moves it to the end of the insertion order. Not thread-safe:
/// a registry belongs to the request that created it.
#[derive(Debug)]
pub struct TimingRegistry<C: Clock = SystemClock> {
    clock: C,
    start_source: RequestStart,
    // Insertion order is the order of last write.
    entries: Vec<Entry>,
}

impl TimingRegistry<SystemClock> {
    /// Registry whose `requestStart` is the time of construction.
    pub fn new() -> Self {
        Self::with_clock(SystemClock, RequestStart::default())
    }

    pub fn with_request_start(start: RequestStart) -> Self {
        Self::with_clock(SystemClock, start)
    }
}

impl Default for TimingRegistry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimingRegistry<C> {
    pub fn with_clock(clock: C, start: RequestStart) -> Self {
        let mut registry = Self {
            clock,
            start_source: start,
            entries: Vec::new(),
        };
        registry.reset();
        registry
    }

    /// Reference time used by measures that name no start mark, or `None`
    /// once the `requestStart` entry has been cleared by name.
    pub fn request_start(&self) -> Option<f64> {
        self.entry_by_name(REQUEST_START).map(|e| e.start_time)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records the current time under `name`, replacing any entry of that name.
    pub fn mark(&mut self, name: impl Into<String>) -> Entry {
        let entry = Entry::mark(name, self.clock.now());
        tracing::debug!(name = %entry.name, start_time = entry.start_time, "mark");
        self.insert(entry.clone());
        entry
    }

    /// Removes the named entry, or resets the registry when `name` is `None`.
    ///
    /// A full reset leaves only a fresh `requestStart` mark. Removing a name
    /// that is not present does nothing.
    pub fn clear_marks(&mut self, name: Option<&str>) {
        match name {
            Some(name) => {
                let before = self.entries.len();
                self.entries.retain(|e| e.name != name);
                let removed = before != self.entries.len();
                tracing::debug!(mark = name, removed, "clear mark");
            }
            None => {
                let request_start = self.reset();
                tracing::debug!(request_start, "clear all marks");
            }
        }
    }

    /// Records the time between two marks under `name`.
    ///
    /// `start_mark` defaults to `requestStart`; a missing `end_mark` means now.
    /// Fails with [`TimingError::UnknownMark`] if either mark is absent, in
    /// which case nothing is recorded.
    pub fn measure(
        &mut self,
        name: impl Into<String>,
        start_mark: Option<&str>,
        end_mark: Option<&str>,
    ) -> Result<Entry, TimingError> {
        let start_time = self.lookup(start_mark.unwrap_or(REQUEST_START))?;
        let end_time = match end_mark {
            Some(end) => self.lookup(end)?,
            None => self.clock.now(),
        };

        let entry = Entry::measure(name, start_time, end_time - start_time);
        tracing::debug!(
            name = %entry.name,
            start_time = entry.start_time,
            duration = entry.duration,
            "measure"
        );
        self.insert(entry.clone());
        Ok(entry)
    }

    /// All entries in ascending `start_time` order; ties keep insertion order.
    pub fn entries(&self) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        sorted
    }

    pub fn entries_by_type(&self, entry_type: EntryType) -> Vec<&Entry> {
        let want_marks = entry_type == EntryType::Mark;
        let mut sorted = self.entries();
        sorted.retain(|e| e.is_mark() == want_marks);
        sorted
    }

    pub fn entry_by_name(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    fn lookup(&self, name: &str) -> Result<f64, TimingError> {
        match self.entry_by_name(name) {
            Some(entry) => Ok(entry.start_time),
            None => {
                tracing::warn!(mark = name, "measure references unknown mark");
                Err(TimingError::UnknownMark(name.to_string()))
            }
        }
    }

    fn insert(&mut self, entry: Entry) {
        self.entries.retain(|e| e.name != entry.name);
        self.entries.push(entry);
    }

    fn reset(&mut self) -> f64 {
        let request_start = self
            .start_source
            .resolve()
            .unwrap_or_else(|| self.clock.now());
        self.entries.clear();
        self.entries.push(Entry::mark(REQUEST_START, request_start));
        request_start
    }
}
