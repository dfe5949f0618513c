//! Core library for browsing, searching, sorting and comparing college
//! placement statistics from a static JSON dataset.
//!
//! The dataset is normalized once at load and never mutated; every view
//! (listing query, cross-institution comparison, per-branch trend) is a pure
//! function of the dataset and the current selection parameters.

pub mod data;
pub mod recent;
pub mod state;
