//! Shared test harness modules for the Collegiate CLI.

use super::*;

mod helpers;
mod rank_steps;
