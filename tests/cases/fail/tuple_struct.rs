// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use soft_cascade::SoftDelete;
use uuid::Uuid;

#[derive(SoftDelete)]
#[soft_delete(table = "sites")]
pub struct Site(Uuid);

fn main() {}
