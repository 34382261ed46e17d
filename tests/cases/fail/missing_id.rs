// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use soft_cascade::SoftDelete;
use uuid::Uuid;

#[derive(SoftDelete)]
pub struct Site {
    pub id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

fn main() {}
