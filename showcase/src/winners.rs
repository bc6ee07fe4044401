//! Winner curation: merging curated survey rows into the display shape the
//! winners page consumes.
//!
//! Display grouping uses a four-season mapping over the submit month --
//! Dec/Jan/Feb is Winter -- which is wider than either query-window
//! convention in [`crate::windows`] and must stay separate from them.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::majors::{Major, TitleMatcher};
use crate::media::youtube_thumbnail;
use crate::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn from_month(month: u32) -> Season {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }

    pub fn parse(raw: &str) -> Option<Season> {
        [Season::Winter, Season::Spring, Season::Summer, Season::Fall]
            .into_iter()
            .find(|season| season.label().eq_ignore_ascii_case(raw))
    }
}

/// The `/winners` wire shape. Key casing mirrors the gateway's column
/// aliases, mixed case and all. `thumbnail` is filled core-side and absent
/// on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerEntry {
    pub id: i64,

    #[serde(default)]
    pub course: String,

    #[serde(default)]
    pub video: Option<String>,

    pub position: i32,

    #[serde(default)]
    pub members: String,

    #[serde(rename = "Sponsor", default)]
    pub sponsor: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "ProjectTitle", default)]
    pub project_title: String,

    #[serde(rename = "winning_pic", default)]
    pub winning_pic: Option<String>,

    pub year: i32,

    pub semester: Season,

    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Build winner entries from raw survey rows: curated rows only
/// (`position` set), year and season derived from the submit date, video
/// thumbnail resolved where a YouTube link exists.
pub fn decorate(projects: &[Project]) -> Vec<WinnerEntry> {
    projects
        .iter()
        .filter_map(|project| {
            let position = project.position?;

            Some(WinnerEntry {
                id: project.id,
                course: project.major.clone(),
                video: project.youtube_link.clone(),
                position,
                members: project.team_member_names.clone(),
                sponsor: project.sponsor.clone(),
                description: project.project_description.clone(),
                project_title: project.project_title.clone(),
                winning_pic: project.winning_pic.clone(),
                year: project.submit_date.year(),
                semester: Season::from_month(project.submit_date.month()),
                thumbnail: project
                    .youtube_link
                    .as_deref()
                    .and_then(youtube_thumbnail),
            })
        })
        .collect()
}

/// Fill in thumbnails on entries that came off the wire without one.
pub fn with_thumbnails(mut entries: Vec<WinnerEntry>) -> Vec<WinnerEntry> {
    for entry in &mut entries {
        if entry.thumbnail.is_none() {
            entry.thumbnail = entry.video.as_deref().and_then(youtube_thumbnail);
        }
    }

    entries
}

#[derive(Debug, Clone, Default)]
pub struct WinnerFilter {
    pub query: String,
    pub semester: Option<Season>,
    pub year: Option<i32>,
    pub department: Option<Major>,
}

/// Free text over title, members, description, and sponsor; season and
/// year by equality; department by native slug or the title-prefix rule.
pub fn filter_winners<'a>(
    entries: &'a [WinnerEntry],
    filter: &WinnerFilter,
    matcher: &TitleMatcher,
) -> Vec<&'a WinnerEntry> {
    let query = filter.query.trim().to_lowercase();

    entries
        .iter()
        .filter(|entry| {
            let matches_search = query.is_empty()
                || entry.project_title.to_lowercase().contains(&query)
                || entry.members.to_lowercase().contains(&query)
                || entry.description.to_lowercase().contains(&query)
                || entry.sponsor.to_lowercase().contains(&query);

            let matches_season = filter
                .semester
                .map_or(true, |season| entry.semester == season);

            let matches_year = filter.year.map_or(true, |year| entry.year == year);

            let matches_department = filter.department.map_or(true, |major| {
                entry.course.eq_ignore_ascii_case(major.slug())
                    || matcher.title_matches(major, &entry.project_title)
            });

            matches_search && matches_season && matches_year && matches_department
        })
        .collect()
}
