//! Term resolution: deciding which (semester, year) to display when the
//! user has not picked one.
//!
//!
//!
//! # Precedence
//! - Explicit query parameters win verbatim, no existence check
//! - A stored preference is adopted if its term still has entries
//! - Otherwise walk backward from the date-based default, at most 8
//!   checks, and adopt the first term with entries
//! - If every candidate misses, fail open with the default term so the UI
//!   always has something to query
//!
//! Existence checks run strictly one at a time; each step's decision needs
//! the previous result. A failed or timed-out check means "no data for
//! this candidate, keep walking", never a fatal error. Pages without a
//! major (landing, about, winners) skip the checks entirely.
//!
//!
//!
//! # Staleness
//!
//! A navigation can supersede a walk that is still in flight. Each
//! resolution holds a [`ResolveGuard`] from the shared [`ResolveEra`];
//! once a newer resolution begins, the older guard goes stale, its walk
//! stops, and none of its store writes land. The superseded call still
//! returns a term, it just commits nothing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::majors::Major;
use crate::remote::GatewayError;
use crate::term::{Term, default_term};

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum existence checks in the backward walk.
    pub walk_limit: u32,
    /// Per-check bound; a timeout counts as a miss.
    pub check_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            walk_limit: 8,
            check_timeout: Duration::from_secs(5),
        }
    }
}

/// The "has data" predicate behind the walk, backed by the gateway in
/// production and by fakes in tests.
#[async_trait]
pub trait EntrySource: Sync {
    async fn has_entries(&self, major: Major, term: Term) -> Result<bool, GatewayError>;
}

/// Persisted last-used term. Injected so the resolver stays testable with
/// a fake store.
pub trait TermStore: Send + Sync {
    fn load(&self) -> Option<Term>;
    fn save(&self, term: Term);
}

#[derive(Default)]
pub struct MemoryTermStore {
    term: Mutex<Option<Term>>,
}

impl MemoryTermStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TermStore for MemoryTermStore {
    fn load(&self) -> Option<Term> {
        *self.term.lock().expect("term store poisoned")
    }

    fn save(&self, term: Term) {
        *self.term.lock().expect("term store poisoned") = Some(term);
    }
}

/// Generation counter for in-flight resolutions. `begin` hands out a
/// guard and invalidates every earlier one.
#[derive(Default)]
pub struct ResolveEra {
    generation: AtomicU64,
}

impl ResolveEra {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> ResolveGuard<'_> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        ResolveGuard {
            era: self,
            generation,
        }
    }
}

pub struct ResolveGuard<'a> {
    era: &'a ResolveEra,
    generation: u64,
}

impl ResolveGuard<'_> {
    pub fn is_current(&self) -> bool {
        self.era.generation.load(Ordering::SeqCst) == self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    /// Caller-supplied term, adopted verbatim.
    Explicit,
    /// Stored preference that still has entries.
    Stored,
    /// Backward walk; `steps` is how many backward steps were taken
    /// (0 means the default term itself had data).
    Walked { steps: u32 },
    /// Every candidate missed; the default term is used anyway.
    Fallback,
}

impl ResolvedVia {
    pub fn label(self) -> &'static str {
        match self {
            ResolvedVia::Explicit => "explicit",
            ResolvedVia::Stored => "stored",
            ResolvedVia::Walked { .. } => "walked",
            ResolvedVia::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub term: Term,
    pub via: ResolvedVia,
}

/// Resolve the term to display. Always returns a term, whatever the
/// gateway does.
pub async fn resolve_term(
    major: Option<Major>,
    explicit: Option<Term>,
    today: NaiveDate,
    source: &impl EntrySource,
    store: &dyn TermStore,
    guard: &ResolveGuard<'_>,
    config: &ResolverConfig,
) -> Resolution {
    if let Some(term) = explicit {
        if guard.is_current() {
            store.save(term);
        }

        return Resolution {
            term,
            via: ResolvedVia::Explicit,
        };
    }

    if let Some(stored) = store.load() {
        if check_entries(major, stored, source, config).await {
            debug!("stored term {stored} still has entries");

            return Resolution {
                term: stored,
                via: ResolvedVia::Stored,
            };
        }
    }

    let fallback = default_term(today);
    let mut candidate = fallback;

    for step in 0..config.walk_limit {
        if !guard.is_current() {
            debug!("resolution superseded after {step} steps, dropping walk");
            break;
        }

        if check_entries(major, candidate, source, config).await {
            if guard.is_current() {
                store.save(candidate);
            }

            return Resolution {
                term: candidate,
                via: ResolvedVia::Walked { steps: step },
            };
        }

        candidate = candidate.previous();
    }

    // Fail open: an empty-but-valid result beats a stuck UI.
    Resolution {
        term: fallback,
        via: ResolvedVia::Fallback,
    }
}

async fn check_entries(
    major: Option<Major>,
    term: Term,
    source: &impl EntrySource,
    config: &ResolverConfig,
) -> bool {
    // Pages with no major have no per-major existence signal; skip the call.
    let Some(major) = major else {
        return true;
    };

    match timeout(config.check_timeout, source.has_entries(major, term)).await {
        Ok(Ok(has_entries)) => has_entries,
        Ok(Err(err)) => {
            warn!("existence check failed for {} {term}: {err}", major.slug());
            false
        }
        Err(_) => {
            warn!("existence check timed out for {} {term}", major.slug());
            false
        }
    }
}
