// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use soft_cascade::SoftDelete;
use uuid::Uuid;

#[derive(SoftDelete)]
pub struct Site {
    #[id]
    pub id: Uuid,
    #[id]
    pub legacy_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

fn main() {}
