//! Core logic of the capstone-project showcase.
//!
//! Students submit project surveys, the public browses them by major and
//! term, administrators curate winners. Everything stateful lives behind the
//! gateway (the survey HTTP API over the relational store); this crate holds
//! the logic layered on top of it.
//!
//!
//!
//! # General Flow
//! - UI lands on a page with no explicit term selection
//! - [`resolver`] decides which (semester, year) to query, walking backwards
//!   through terms until one with entries is found
//! - [`remote`] fetches the full project list for the resolved term
//! - [`majors`] re-applies the interdisciplinary title-prefix rule
//! - [`filter`] applies free-text search and the sponsor filter
//! - [`pagination`] slices the filtered list into fixed-size pages
//!
//! The resolver is the only async stage; filtering and pagination are pure
//! functions over already-fetched data.
//!
//!
//!
//! # Term Conventions
//!
//! The gateway buckets submissions into terms by submit date, and it does so
//! with two different month-range conventions depending on the route. The
//! survey listing routes use narrow windows (spring = April, fall =
//! November); the editorial routes use wide windows (spring = Jan-Apr,
//! summer = May-Aug, fall = Sep-Dec). Both are kept in [`windows`] as
//! explicit configurations and call sites pick one.
//!
//! Separately, the winners display groups by a four-season mapping
//! (Dec/Jan/Feb = Winter, and so on) that is wider than either query
//! convention. That one lives in [`winners`] and must not be merged with
//! the query buckets.

pub mod filter;
pub mod majors;
pub mod media;
pub mod pagination;
pub mod project;
pub mod remote;
pub mod resolver;
pub mod term;
pub mod windows;
pub mod winners;
