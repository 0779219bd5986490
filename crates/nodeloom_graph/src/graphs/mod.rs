// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node sets for specific graph domains.

pub mod material;
