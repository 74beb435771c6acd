// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod batch;
mod inspect;

pub use batch::BatchCmd;
pub use inspect::InspectCmd;
