//! Top languages of a GitHub user
//!
//! # Overview
//!
//! Every repository on GitHub carries a breakdown of its code size per programming language.
//! Given a user, this library sums those breakdowns over the user's repositories and ranks the languages by total bytes, largest first.
//!
//! Repositories can be left out by name, and private repositories can be left out altogether.
//! Languages with equal totals keep the order in which they were first seen while walking the repositories.
//!
//! [`aggregator`] holds the pure pipeline, [`api`] the data model and the [`api::Client`] seam to the data source.
//! With the `fetcher` feature, [`fetcher::TopLanguagesFetcher`] ties both together.

pub mod aggregator;
pub mod api;
#[cfg(feature = "fetcher")]
pub mod fetcher;

pub use aggregator::{Language, LanguageMap, TopLanguages};
