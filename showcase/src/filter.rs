//! Free-text search and sponsor filtering over an in-memory project list.
//!
//! Pure over its inputs: no hidden state, the same (list, filter) pair
//! always yields the same result, in the original order.

use crate::project::Project;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SponsorFilter {
    All,
    Named(String),
}

impl SponsorFilter {
    /// `"all"` (any casing) is the sentinel for no sponsor filter.
    pub fn parse(raw: &str) -> SponsorFilter {
        if raw.eq_ignore_ascii_case("all") {
            SponsorFilter::All
        } else {
            SponsorFilter::Named(raw.to_string())
        }
    }
}

impl Default for SponsorFilter {
    fn default() -> Self {
        SponsorFilter::All
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub query: String,
    pub sponsor: SponsorFilter,
}

/// Retain a project iff the query is empty or a case-insensitive substring
/// of the title, description, or team member names, and the sponsor filter
/// is `All` or equals the project's sponsor case-insensitively, both sides
/// trimmed. Trimming keeps a sponsor stored with stray whitespace
/// selectable through its own `unique_sponsors` entry.
pub fn filter_projects<'a>(projects: &'a [Project], filter: &ListingFilter) -> Vec<&'a Project> {
    let query = filter.query.trim().to_lowercase();

    projects
        .iter()
        .filter(|project| {
            let matches_search = query.is_empty()
                || project.project_title.to_lowercase().contains(&query)
                || project.project_description.to_lowercase().contains(&query)
                || project.team_member_names.to_lowercase().contains(&query);

            let matches_sponsor = match &filter.sponsor {
                SponsorFilter::All => true,
                SponsorFilter::Named(sponsor) => {
                    project.sponsor.trim().eq_ignore_ascii_case(sponsor.trim())
                }
            };

            matches_search && matches_sponsor
        })
        .collect()
}

/// Distinct non-empty sponsors across the full list, sorted
/// case-insensitively, with the `"all"` sentinel always first.
pub fn unique_sponsors(projects: &[Project]) -> Vec<String> {
    let mut sponsors: Vec<String> = projects
        .iter()
        .map(|project| project.sponsor.trim().to_string())
        .filter(|sponsor| !sponsor.is_empty())
        .collect();

    sponsors.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    sponsors.dedup();

    let mut out = vec!["all".to_string()];
    out.extend(sponsors);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn project(id: i64, title: &str, description: &str, team: &str, sponsor: &str) -> Project {
        Project {
            id,
            project_title: title.to_string(),
            project_description: description.to_string(),
            sponsor: sponsor.to_string(),
            team_member_names: team.to_string(),
            major: "informatics".to_string(),
            submit_date: NaiveDate::from_ymd_opt(2024, 11, 5)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            position: None,
            winning_pic: None,
            team_picture_path: None,
            poster_picture_path: None,
            youtube_link: None,
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project(1, "Solar Tracker", "Panels that follow the sun", "Ada", "Acme"),
            project(2, "CPI 401 Dashboard", "Campus data dashboards", "Grace", "Initech"),
            project(3, "River Sensor", "Water quality probes", "Alan, Edsger", "acme"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let projects = sample();
        let kept = filter_projects(&projects, &ListingFilter::default());

        let ids: Vec<i64> = kept.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_search_spans_title_description_and_team() {
        let projects = sample();

        let by_title = filter_projects(
            &projects,
            &ListingFilter {
                query: "solar".to_string(),
                sponsor: SponsorFilter::All,
            },
        );
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 1);

        let by_description = filter_projects(
            &projects,
            &ListingFilter {
                query: "DASHBOARDS".to_string(),
                sponsor: SponsorFilter::All,
            },
        );
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, 2);

        let by_team = filter_projects(
            &projects,
            &ListingFilter {
                query: "edsger".to_string(),
                sponsor: SponsorFilter::All,
            },
        );
        assert_eq!(by_team.len(), 1);
        assert_eq!(by_team[0].id, 3);
    }

    #[test]
    fn test_sponsor_filter_is_case_insensitive() {
        let projects = sample();
        let kept = filter_projects(
            &projects,
            &ListingFilter {
                query: String::new(),
                sponsor: SponsorFilter::parse("ACME"),
            },
        );

        let ids: Vec<i64> = kept.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let projects = sample();
        let filter = ListingFilter {
            query: "a".to_string(),
            sponsor: SponsorFilter::All,
        };

        let first: Vec<i64> = filter_projects(&projects, &filter)
            .iter()
            .map(|p| p.id)
            .collect();
        let second: Vec<i64> = filter_projects(&projects, &filter)
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sponsor_with_stray_whitespace_is_selectable() {
        let mut projects = sample();
        projects.push(project(4, "Padded", "d", "m", "  Initech  "));

        // the dropdown shows the trimmed value; picking it must match the
        // padded row too
        let sponsors = unique_sponsors(&projects);
        assert!(sponsors.contains(&"Initech".to_string()));
        assert!(!sponsors.contains(&"  Initech  ".to_string()));

        let kept = filter_projects(
            &projects,
            &ListingFilter {
                query: String::new(),
                sponsor: SponsorFilter::parse("Initech"),
            },
        );

        let ids: Vec<i64> = kept.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_unique_sponsors_sentinel_first() {
        let mut projects = sample();
        projects.push(project(4, "t", "d", "m", "  "));

        let sponsors = unique_sponsors(&projects);
        assert_eq!(sponsors[0], "all");
        assert_eq!(
            sponsors.iter().filter(|s| s.as_str() == "all").count(),
            1
        );
        assert!(sponsors.contains(&"Acme".to_string()));
        assert!(!sponsors.contains(&"".to_string()));
    }
}
