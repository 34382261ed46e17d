// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use soft_cascade::SoftDelete;

#[derive(SoftDelete)]
pub enum Status {
    Live,
    Deleted,
}

fn main() {}
