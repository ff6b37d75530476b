//! Ordered, duplicate-free history list plus the pagination cursor.
//!
//! Entries live in a `BTreeMap` keyed by a position sequence: appends take a
//! slot after the current tail, promotions take a slot before the current
//! head. A side index maps each `EntryId` to its slot, so membership checks
//! and removal never scan the list. Iterating the map yields display order.

use std::collections::{BTreeMap, HashMap};

use crate::{Cursor, EntryId, HistoryEntry, HistoryPage};

type Slot = i64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryStore {
    entries: BTreeMap<Slot, HistoryEntry>,
    index: HashMap<EntryId, Slot>,
    // Next free slots at either end. `head` is always below every used slot,
    // `tail` always above.
    head: Slot,
    tail: Slot,
    cursor: Option<Cursor>,
    pages_merged: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every entry of `page` whose id is not present yet, keeping the
    /// page's relative order, then replaces the cursor with the page's
    /// `next_cursor`. Entries already present keep their stored version.
    ///
    /// Returns how many entries were appended.
    pub fn merge_page(&mut self, page: HistoryPage) -> usize {
        let HistoryPage {
            results,
            next_cursor,
        } = page;

        let mut appended = 0;
        for entry in results {
            if self.index.contains_key(&entry.id) {
                continue;
            }
            let slot = self.take_tail_slot();
            self.index.insert(entry.id.clone(), slot);
            self.entries.insert(slot, entry);
            appended += 1;
        }

        self.cursor = next_cursor;
        self.pages_merged += 1;
        appended
    }

    /// Removes any stored entry with the same id and inserts `entry` at the
    /// front. The cursor is left untouched.
    ///
    /// Returns the displaced version, if there was one.
    pub fn promote_submission(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        let displaced = self
            .index
            .remove(&entry.id)
            .and_then(|slot| self.entries.remove(&slot));

        let slot = self.take_head_slot();
        self.index.insert(entry.id.clone(), slot);
        self.entries.insert(slot, entry);
        displaced
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.values()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries().cloned().collect()
    }

    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.values().next()
    }

    pub fn get(&self, id: &EntryId) -> Option<&HistoryEntry> {
        self.index.get(id).and_then(|slot| self.entries.get(slot))
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// True when a further page can be requested.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn pages_merged(&self) -> usize {
        self.pages_merged
    }

    fn take_head_slot(&mut self) -> Slot {
        if self.entries.is_empty() {
            self.reset_slots();
        }
        let slot = self.head;
        self.head -= 1;
        slot
    }

    fn take_tail_slot(&mut self) -> Slot {
        if self.entries.is_empty() {
            self.reset_slots();
        }
        let slot = self.tail;
        self.tail += 1;
        slot
    }

    fn reset_slots(&mut self) {
        self.head = 0;
        self.tail = 1;
    }
}
