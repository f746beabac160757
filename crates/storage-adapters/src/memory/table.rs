//! Identity-keyed table shared by the three in-memory repositories.
//!
//! Every operation touches one `DashMap` entry under its shard lock, so a
//! reader never sees a half-written entity. Reads hand out owned clones.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::{AppError, Entity, Mutation, Result};
use uuid::Uuid;

struct Row<T> {
    /// Stamped on first insert; drives snapshot order and tie-breaking
    seq: u64,
    entity: T,
}

pub(crate) struct Table<T: Entity> {
    rows: DashMap<Uuid, Row<T>>,
    next_seq: AtomicU64,
}

impl<T: Entity> Table<T> {
    pub(crate) fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert-or-overwrite. Overwriting keeps the row's original position.
    pub(crate) fn upsert(&self, mut entity: T) -> T {
        if entity.id().is_nil() {
            entity.assign_id(Uuid::now_v7());
        }

        match self.rows.entry(entity.id()) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().entity = entity.clone();
            }
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Row {
                    seq,
                    entity: entity.clone(),
                });
            }
        }
        entity
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<T> {
        self.rows.get(&id).map(|row| row.entity.clone())
    }

    /// Entities matching `keep`, in insertion order.
    pub(crate) fn select(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut hits: Vec<(u64, T)> = self
            .rows
            .iter()
            .filter(|row| keep(&row.entity))
            .map(|row| (row.seq, row.entity.clone()))
            .collect();
        hits.sort_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, entity)| entity).collect()
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.select(|_| true)
    }

    /// Earliest inserted entity matching `keep`.
    pub(crate) fn first(&self, keep: impl Fn(&T) -> bool) -> Option<T> {
        self.rows
            .iter()
            .filter(|row| keep(&row.entity))
            .map(|row| (row.seq, row.entity.clone()))
            .min_by_key(|(seq, _)| *seq)
            .map(|(_, entity)| entity)
    }

    pub(crate) fn replace(&self, entity: T) -> Result<T> {
        match self.rows.get_mut(&entity.id()) {
            Some(mut row) => {
                row.entity = entity.clone();
                Ok(entity)
            }
            None => Err(AppError::not_found(T::KIND, entity.id())),
        }
    }

    /// Runs `change` against a copy while holding the entry lock and commits
    /// only on success. `change` must not call back into this table.
    pub(crate) fn apply(&self, id: Uuid, change: Mutation<T>) -> Result<T> {
        let mut row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(T::KIND, id))?;

        let mut draft = row.entity.clone();
        change(&mut draft)?;
        if draft.id() != id {
            return Err(AppError::Internal(format!(
                "{} mutation changed identity {id} to {}",
                T::KIND,
                draft.id()
            )));
        }

        row.entity = draft.clone();
        Ok(draft)
    }

    pub(crate) fn remove(&self, id: Uuid) -> bool {
        self.rows.remove(&id).is_some()
    }
}
