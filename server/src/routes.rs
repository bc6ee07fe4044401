use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use showcase::filter::{ListingFilter, SponsorFilter, filter_projects, unique_sponsors};
use showcase::majors::Major;
use showcase::pagination::{PageMark, Pagination};
use showcase::project::Project;
use showcase::resolver::{Resolution, resolve_term};
use showcase::term::{
    Semester, SemesterFilter, Term, TermParseError, editorial_term, recent_terms,
};
use showcase::windows::QueryWindows;
use showcase::winners::{Season, WinnerEntry, WinnerFilter, decorate, filter_winners, with_thumbnails};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct ListingParams {
    pub semester: Option<String>,
    pub year: Option<String>,
    pub q: Option<String>,
    pub sponsor: Option<String>,
    pub page: Option<usize>,
    /// Client-chosen session identity; scopes the stored term preference
    /// and resolution supersession to this client alone.
    pub session: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct WinnerParams {
    pub q: Option<String>,
    pub semester: Option<String>,
    pub year: Option<String>,
    pub department: Option<String>,
}

#[derive(Serialize)]
pub struct TermPayload {
    pub semester: Semester,
    pub year: i32,
    pub label: String,
}

impl From<Term> for TermPayload {
    fn from(term: Term) -> Self {
        Self {
            semester: term.semester,
            year: term.year,
            label: term.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPayload {
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub term: TermPayload,
    pub resolved_via: &'static str,
    pub window: Option<WindowPayload>,
    pub available_terms: Vec<TermPayload>,
    pub sponsors: Vec<String>,
    pub total_projects: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_numbers: Vec<PageMark>,
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnersResponse {
    pub total_winners: usize,
    pub winners: Vec<WinnerEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationResponse {
    pub semester: String,
    pub year: i32,
    pub window: Option<WindowPayload>,
    pub total_projects: usize,
    pub projects: Vec<Project>,
    pub winners: Vec<WinnerEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_error: Option<String>,
}

/// Listing of one major's projects for the resolved term, with the
/// interdisciplinary title rule re-applied over whatever the gateway
/// returned.
pub async fn showcase_major_handler(
    State(state): State<Arc<AppState>>,
    Path(major): Path<String>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingResponse>, AppError> {
    let major = Major::from_slug(&major).ok_or(AppError::UnknownMajor(major))?;
    let explicit = listing_term(&params)?;
    let today = Local::now().date_naive();

    let session = state.sessions.session(params.session.as_deref());
    let guard = session.era.begin();
    let resolution = resolve_term(
        Some(major),
        explicit,
        today,
        &state.gateway,
        &session.store,
        &guard,
        &state.resolver,
    )
    .await;

    let (rows, gateway_error) = match state.gateway.survey_by_major(major, resolution.term).await {
        Ok(rows) => (rows, None),
        Err(err) => {
            warn!("listing fetch failed for {}: {err}", major.slug());
            (Vec::new(), Some(err.to_string()))
        }
    };

    let rows: Vec<Project> = rows
        .into_iter()
        .filter(|project| state.matcher.belongs_to(major, project))
        .collect();

    Ok(Json(build_listing(
        &state,
        resolution,
        rows,
        &params,
        today,
        gateway_error,
    )))
}

/// Major-agnostic listing; the resolver runs without existence checks.
pub async fn showcase_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingResponse>, AppError> {
    let explicit = listing_term(&params)?;
    let today = Local::now().date_naive();

    let session = state.sessions.session(params.session.as_deref());
    let guard = session.era.begin();
    let resolution = resolve_term(
        None,
        explicit,
        today,
        &state.gateway,
        &session.store,
        &guard,
        &state.resolver,
    )
    .await;

    let filter = SemesterFilter::One(resolution.term.semester);
    let (rows, gateway_error) = match state.gateway.survey_by_term(filter, resolution.term.year).await
    {
        Ok(rows) => (rows, None),
        Err(err) => {
            warn!("listing fetch failed for {}: {err}", resolution.term);
            (Vec::new(), Some(err.to_string()))
        }
    };

    Ok(Json(build_listing(
        &state,
        resolution,
        rows,
        &params,
        today,
        gateway_error,
    )))
}

pub async fn winners_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WinnerParams>,
) -> Result<Json<WinnersResponse>, AppError> {
    let filter = WinnerFilter {
        query: params.q.unwrap_or_default(),
        semester: season_param(params.semester.as_deref())?,
        year: year_param(params.year.as_deref())?,
        department: department_param(params.department.as_deref())?,
    };

    let (entries, gateway_error) = match state.gateway.winners().await {
        Ok(entries) => (with_thumbnails(entries), None),
        Err(err) => {
            warn!("winners fetch failed: {err}");
            (Vec::new(), Some(err.to_string()))
        }
    };

    let winners: Vec<WinnerEntry> = filter_winners(&entries, &filter, &state.matcher)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(WinnersResponse {
        total_winners: winners.len(),
        winners,
        gateway_error,
    }))
}

/// Editorial view over the wide month buckets: the term's raw rows plus
/// the curated subset in display shape.
pub async fn curation_handler(
    State(state): State<Arc<AppState>>,
    Path((semester, year)): Path<(String, String)>,
) -> Result<Json<CurationResponse>, AppError> {
    let filter: SemesterFilter = semester.parse()?;
    let year: i32 = year
        .parse()
        .map_err(|_| TermParseError::InvalidYear(year))?;

    curation_view(&state, filter, year).await
}

/// `GET /api/curation` defaults to the date-based editorial term.
pub async fn curation_default_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurationResponse>, AppError> {
    let term = editorial_term(Local::now().date_naive());

    curation_view(&state, SemesterFilter::One(term.semester), term.year).await
}

async fn curation_view(
    state: &AppState,
    filter: SemesterFilter,
    year: i32,
) -> Result<Json<CurationResponse>, AppError> {
    let (projects, gateway_error) = match state.gateway.projects_by_term(filter, year).await {
        Ok(rows) => (rows, None),
        Err(err) => {
            warn!("curation fetch failed for {}/{year}: {err}", filter.code());
            (Vec::new(), Some(err.to_string()))
        }
    };

    let window = match filter {
        SemesterFilter::One(semester) => QueryWindows::editorial()
            .span(Term::new(semester, year))
            .map(window_payload),
        SemesterFilter::All => None,
    };

    let winners = decorate(&projects);

    Ok(Json(CurationResponse {
        semester: filter.code().to_string(),
        year,
        window,
        total_projects: projects.len(),
        projects,
        winners,
        gateway_error,
    }))
}

fn build_listing(
    state: &AppState,
    resolution: Resolution,
    rows: Vec<Project>,
    params: &ListingParams,
    today: NaiveDate,
    gateway_error: Option<String>,
) -> ListingResponse {
    let filter = ListingFilter {
        query: params.q.clone().unwrap_or_default(),
        sponsor: params
            .sponsor
            .as_deref()
            .map(SponsorFilter::parse)
            .unwrap_or_default(),
    };

    let sponsors = unique_sponsors(&rows);
    let filtered = filter_projects(&rows, &filter);

    // a fresh pagination per request: a changed list starts back at page 1,
    // and an out-of-range page request stays there
    let mut pagination = Pagination::new(filtered.len(), state.config.per_page);
    if let Some(page) = params.page {
        pagination.go_to(page);
    }

    let projects: Vec<Project> = pagination
        .slice(&filtered)
        .iter()
        .map(|project| (*project).clone())
        .collect();

    let window = QueryWindows::listing()
        .span(resolution.term)
        .map(window_payload);

    ListingResponse {
        term: resolution.term.into(),
        resolved_via: resolution.via.label(),
        window,
        available_terms: recent_terms(today).into_iter().map(Into::into).collect(),
        sponsors,
        total_projects: filtered.len(),
        current_page: pagination.current_page(),
        total_pages: pagination.total_pages(),
        page_numbers: pagination.page_numbers(),
        projects,
        gateway_error,
    }
}

fn window_payload((from, to): (NaiveDateTime, NaiveDateTime)) -> WindowPayload {
    WindowPayload {
        from: from.format("%Y-%m-%d %H:%M:%S").to_string(),
        to: to.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Explicit term parameters for the public listings: both or neither, the
/// two-letter codes only, and no summer.
fn listing_term(params: &ListingParams) -> Result<Option<Term>, AppError> {
    match (params.semester.as_deref(), params.year.as_deref()) {
        (Some(semester), Some(year)) => {
            let term = Term::parse(semester, year)?;

            if term.semester == Semester::Summer {
                return Err(AppError::UnlistedSemester);
            }

            Ok(Some(term))
        }
        (None, None) => Ok(None),
        _ => Err(AppError::IncompleteTerm),
    }
}

fn season_param(raw: Option<&str>) -> Result<Option<Season>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => Season::parse(value)
            .map(Some)
            .ok_or(AppError::UnknownSeason(value.to_string())),
    }
}

fn year_param(raw: Option<&str>) -> Result<Option<i32>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| TermParseError::InvalidYear(value.to_string()).into()),
    }
}

fn department_param(raw: Option<&str>) -> Result<Option<Major>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => Major::from_slug(value)
            .map(Some)
            .ok_or(AppError::UnknownMajor(value.to_string())),
    }
}
