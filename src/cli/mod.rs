//! CLI operation mode handlers.
//!
//! This module contains the implementations for the two operation modes:
//! - [`activity_report`]: Print the GitHub activity as JSON
//! - [`summary`]: Gather calendar and GitHub inputs and summarise them
//!
//! Output formatting utilities are in [`output`].

pub mod activity_report;
pub mod output;
pub mod summary;
