// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Time source for deletion stamps.

use chrono::{DateTime, SubsecRound, Utc};

/// Source of the current instant.
///
/// Instants are truncated to microseconds before use so that the value kept
/// on the entity matches what a `timestamptz` column stores.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Truncate an instant to the precision stored by the database.
pub(crate) fn to_storage_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}
