//! CLI subcommand modules.
//!
//! This module contains the implementations for all factorlake CLI subcommands.

pub(crate) mod backtest;
pub(crate) mod factors;
pub(crate) mod sectors;
