//! # taskpick Core Library
//!
//! This library provides the algorithmic core of taskpick: choosing which
//! tasks to do within a time budget, and ordering task lists consistently for
//! display. Everything here is synchronous and pure; the CLI (and any other
//! front end) owns task storage and presentation.
//!
//! ## Architecture
//!
//! - **Selector**: exact 0/1 knapsack over whole-unit task costs, with a
//!   single-task fallback when nothing fits
//! - **Orderer**: stable merge sort over a closed set of task fields
//! - **Board**: filtering helpers the presentation layer runs before selecting
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TaskSelector`]: Budgeted selection
//! - [`order()`]: Stable ordering by [`SortKey`]
//! - [`Config`]: Application configuration management

pub mod board;
pub mod error;
pub mod order;
pub mod selector;
pub mod storage;
pub mod task;

pub use error::{ConfigError, CoreError, ValidationError};
pub use order::{order, order_by, SortDirection, SortKey};
pub use selector::{
    max_value, select, SelectionResult, SelectionStrategy, SelectorConfig, TaskSelector,
};
pub use storage::Config;
pub use task::{Task, TaskId};
