//! The fixed major enumeration and the interdisciplinary title-prefix rule.
//!
//! CS and CSE share the `CS/E` course prefix; a project stored under
//! `interdisciplinary` whose title starts with `CS/E 401` still belongs on
//! both of those majors' listings. The rule is purely additive: it never
//! removes a native match.

use regex::{Regex, RegexBuilder, escape};

use crate::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Major {
    ComputerScience,
    ComputerSystemsEngineering,
    BiomedicalEngineering,
    MechanicalEngineering,
    ElectricalEngineering,
    IndustrialEngineering,
    Informatics,
    Interdisciplinary,
}

impl Major {
    pub const ALL: [Major; 8] = [
        Major::ComputerScience,
        Major::ComputerSystemsEngineering,
        Major::BiomedicalEngineering,
        Major::MechanicalEngineering,
        Major::ElectricalEngineering,
        Major::IndustrialEngineering,
        Major::Informatics,
        Major::Interdisciplinary,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Major::ComputerScience => "computer-science",
            Major::ComputerSystemsEngineering => "computer-systems-engineering",
            Major::BiomedicalEngineering => "biomedical-engineering",
            Major::MechanicalEngineering => "mechanical-engineering",
            Major::ElectricalEngineering => "electrical-engineering",
            Major::IndustrialEngineering => "industrial-engineering",
            Major::Informatics => "informatics",
            Major::Interdisciplinary => "interdisciplinary",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Major::ComputerScience => "Computer Science",
            Major::ComputerSystemsEngineering => "Computer Systems Engineering",
            Major::BiomedicalEngineering => "Biomedical Engineering",
            Major::MechanicalEngineering => "Mechanical Engineering",
            Major::ElectricalEngineering => "Electrical Engineering",
            Major::IndustrialEngineering => "Industrial Engineering",
            Major::Informatics => "Informatics",
            Major::Interdisciplinary => "Interdisciplinary",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Major> {
        Major::ALL
            .into_iter()
            .find(|major| major.slug().eq_ignore_ascii_case(slug))
    }

    /// Uppercase course-number prefixes attributed to this major.
    /// Interdisciplinary carries none; it is the source side of the rule.
    pub fn title_prefixes(self) -> &'static [&'static str] {
        match self {
            Major::ComputerScience => &["CS/E"],
            Major::ComputerSystemsEngineering => &["CS/E"],
            Major::ElectricalEngineering => &["EEE"],
            Major::MechanicalEngineering => &["MEE"],
            Major::BiomedicalEngineering => &["BME"],
            Major::IndustrialEngineering => &["IEE"],
            Major::Informatics => &["CPI"],
            Major::Interdisciplinary => &[],
        }
    }
}

/// Compiled title-start patterns, one per major with prefixes. A title
/// matches when, ignoring leading whitespace, it starts with a prefix
/// followed by optional whitespace or a hyphen and a 2-3 digit course
/// number. Matching is case-insensitive, like the store's collation.
pub struct TitleMatcher {
    patterns: Vec<(Major, Regex)>,
}

impl TitleMatcher {
    pub fn new() -> Self {
        let mut patterns = Vec::new();

        for major in Major::ALL {
            let prefixes = major.title_prefixes();
            if prefixes.is_empty() {
                continue;
            }

            // escape() handles the separator in composite prefixes like CS/E
            let alternatives: Vec<String> = prefixes.iter().map(|p| escape(p)).collect();
            let pattern = format!(r"^\s*(?:{})\s*[- ]?\d{{2,3}}", alternatives.join("|"));

            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .expect("major prefix pattern must compile");

            patterns.push((major, regex));
        }

        Self { patterns }
    }

    pub fn title_matches(&self, major: Major, title: &str) -> bool {
        self.patterns
            .iter()
            .any(|(m, regex)| *m == major && regex.is_match(title))
    }

    /// Whether a project belongs on `major`'s listing: native slug match,
    /// or an interdisciplinary row whose title carries the major's prefix.
    pub fn belongs_to(&self, major: Major, project: &Project) -> bool {
        if project.major.eq_ignore_ascii_case(major.slug()) {
            return true;
        }

        project
            .major
            .eq_ignore_ascii_case(Major::Interdisciplinary.slug())
            && self.title_matches(major, &project.project_title)
    }
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self::new()
    }
}
