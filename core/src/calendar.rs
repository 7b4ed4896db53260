// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The calendar aggregate: the parsed event list plus per-day lookup state.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use icalq_ical::CalendarEvent;

use crate::recurrence::Occurs;

const DAY_KEY: &str = "%Y%m%d";

#[derive(Debug, Default)]
struct DayCache {
    /// Event indices per day key, sorted by time-of-day once resolved.
    by_day: HashMap<String, Vec<usize>>,
    /// Day keys whose recurring-event scan has already run. A resolved day
    /// is never rescanned, so recurring events added afterwards do not
    /// appear in that day's results.
    resolved: HashSet<String>,
}

/// All events of one parsed document, with lazy per-day indexing.
///
/// The event list itself is append-only and read without synchronization;
/// only the day cache and the loaded-day flags mutate behind shared
/// references, each behind its own lock. A poisoned lock is absorbed since
/// the cached data stays structurally valid regardless of where a panicking
/// reader stopped.
#[derive(Debug, Default)]
pub struct Calendar {
    events: Vec<Arc<CalendarEvent>>,
    day_cache: RwLock<DayCache>,
    loaded_days: RwLock<HashSet<String>>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    ///
    /// A non-recurring event with a start instant is indexed under its start
    /// day immediately, skipped when that day already holds an event with
    /// the same UID. Recurring events are resolved lazily per queried day.
    pub fn add_event(&mut self, event: CalendarEvent) {
        let event = Arc::new(event);
        let index = self.events.len();

        if !event.repeats()
            && let Some(start) = event.start
        {
            let key = start.format(DAY_KEY).to_string();
            let mut cache = write(&self.day_cache);
            let slot = cache.by_day.entry(key).or_default();
            if !slot.iter().any(|&held| self.events[held].uid == event.uid) {
                slot.push(index);
            }
        }

        self.events.push(event);
    }

    /// Every parsed event, in document order.
    pub fn events(&self) -> &[Arc<CalendarEvent>] {
        &self.events
    }

    /// The events occurring on the given day, sorted by start time-of-day
    /// (events without a start instant sort first).
    ///
    /// The first call for a day unions the day's indexed events with a full
    /// occurrence scan and caches the result; later calls serve the cache.
    pub fn events_for(&self, day: NaiveDate) -> Vec<Arc<CalendarEvent>> {
        let key = day.format(DAY_KEY).to_string();

        {
            let cache = read(&self.day_cache);
            if cache.resolved.contains(&key) {
                let indices = cache.by_day.get(&key).cloned().unwrap_or_default();
                return self.collect(&indices);
            }
        }

        let anchored = read(&self.day_cache).by_day.get(&key).cloned().unwrap_or_default();
        let mut seen = HashSet::new();
        let mut indices = Vec::new();
        for &index in &anchored {
            if seen.insert(self.events[index].uid.clone()) {
                indices.push(index);
            }
        }
        for (index, event) in self.events.iter().enumerate() {
            if event.occurs_on_day(day) && seen.insert(event.uid.clone()) {
                indices.push(index);
            }
        }
        indices.sort_by_key(|&index| self.start_time_of_day(index));

        let mut cache = write(&self.day_cache);
        cache.by_day.insert(key.clone(), indices.clone());
        cache.resolved.insert(key);
        drop(cache);

        self.collect(&indices)
    }

    /// Whether any event's occurrence window contains the instant.
    pub fn contains_event_at(&self, at: DateTime<Utc>) -> bool {
        self.events.iter().any(|event| event.covers(at))
    }

    /// Whether the day has been marked fully loaded by the caller.
    pub fn has_loaded_all_events_for(&self, day: NaiveDate) -> bool {
        read(&self.loaded_days).contains(&day.format(DAY_KEY).to_string())
    }

    /// Record that every event for the day has been supplied. Purely a
    /// coordination flag for callers that page events in; nothing inside the
    /// calendar consults it.
    pub fn mark_loaded_all_events_for(&self, day: NaiveDate) {
        write(&self.loaded_days).insert(day.format(DAY_KEY).to_string());
    }

    fn collect(&self, indices: &[usize]) -> Vec<Arc<CalendarEvent>> {
        indices.iter().map(|&index| Arc::clone(&self.events[index])).collect()
    }

    fn start_time_of_day(&self, index: usize) -> Option<NaiveTime> {
        self.events[index].start.map(|start| start.time())
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
