// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use soft_cascade::SoftDelete;
use uuid::Uuid;

#[derive(SoftDelete)]
pub struct Site {
    #[id]
    pub id: Uuid,
    pub name: String,
}

fn main() {}
