//! # dirsync-core
//!
//! Core library for one-directional directory synchronization.
//!
//! A [`task::Task`] pairs a source root with a target root. Its diff is the
//! lazy sequence of relative paths present in the source but missing or
//! different in the target, produced by [`comparison::DirectoryComparator`].
//! [`sync::TaskGroups`] turn configuration entries into ordered task lists and
//! [`sync::SyncEngine`] drives them in list, confirm or apply mode.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error taxonomy and result alias
pub mod error;

/// Directory and file comparison
pub mod comparison;

/// JSON configuration loading, discovery and validation
pub mod config;

/// Copy and removal tasks
pub mod task;

/// Task groups and the sync engine
pub mod sync;
