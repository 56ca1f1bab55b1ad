//! Keyword-based grouping of copy lines into report sections.
//!
//! Classification is a flat, ordered rule table: the first rule whose
//! predicate matches decides the section, and lines matching no rule fall
//! back to [`Section::PlanInformation`].

use std::fmt;

use tracing::debug;

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// Fixed report sections, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    HeaderStatus,
    Features,
    PlanInformation,
    Pricing,
    Actions,
}

impl Section {
    /// All sections in declared order.
    pub const ALL: [Section; 5] = [
        Section::HeaderStatus,
        Section::Features,
        Section::PlanInformation,
        Section::Pricing,
        Section::Actions,
    ];

    /// Heading used in the report.
    pub fn title(self) -> &'static str {
        match self {
            Section::HeaderStatus => "Header/Status",
            Section::Features => "Features",
            Section::PlanInformation => "Plan Information",
            Section::Pricing => "Pricing",
            Section::Actions => "Actions",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A single classification rule. Keyword tests run against the lowercased line.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub section: Section,
    /// Case-insensitive substrings, any of which selects the section.
    pub keywords: &'static [&'static str],
    /// Literal prefix tested on the line as written (e.g. `$`).
    pub prefix: Option<&'static str>,
}

impl Rule {
    /// Whether `line` (and its lowercase form `lower`) matches this rule.
    pub fn matches(&self, line: &str, lower: &str) -> bool {
        self.prefix.is_some_and(|p| line.starts_with(p))
            || self.keywords.iter().any(|k| lower.contains(*k))
    }
}

/// Section for lines that match no rule.
pub const FALLBACK_SECTION: Section = Section::PlanInformation;

/// Rule table, evaluated top to bottom.
pub const RULES: &[Rule] = &[
    Rule {
        section: Section::HeaderStatus,
        keywords: &["premium", "trial", "ended"],
        prefix: None,
    },
    Rule {
        section: Section::Features,
        keywords: &["features", "seo", "domain", "marketing"],
        prefix: None,
    },
    Rule {
        section: Section::PlanInformation,
        keywords: &["basic", "plan", "get started"],
        prefix: None,
    },
    Rule {
        section: Section::Pricing,
        keywords: &["billed", "monthly", "yearly", "save"],
        prefix: Some("$"),
    },
    Rule {
        section: Section::Actions,
        keywords: &["cart", "see all", "learn more"],
        prefix: None,
    },
];

/// Pick the section for one line.
pub fn classify_line(line: &str) -> Section {
    let lower = line.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(line, &lower))
        .map_or(FALLBACK_SECTION, |rule| rule.section)
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Lines grouped by section, each group in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    groups: [Vec<String>; 5],
}

impl Sections {
    /// Lines assigned to `section`.
    pub fn get(&self, section: Section) -> &[String] {
        &self.groups[section.index()]
    }

    /// Append a line to a section.
    pub fn push(&mut self, section: Section, line: String) {
        self.groups[section.index()].push(line);
    }

    /// Non-empty sections in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[String])> {
        Section::ALL
            .into_iter()
            .map(move |s| (s, self.get(s)))
            .filter(|(_, lines)| !lines.is_empty())
    }

    /// Total number of lines across all sections.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assign every line to exactly one section.
pub fn classify_lines<I, S>(lines: I) -> Sections
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut sections = Sections::default();
    for line in lines {
        let line = line.into();
        let section = classify_line(&line);
        sections.push(section, line);
    }

    debug!(
        header = sections.get(Section::HeaderStatus).len(),
        features = sections.get(Section::Features).len(),
        plan = sections.get(Section::PlanInformation).len(),
        pricing = sections.get(Section::Pricing).len(),
        actions = sections.get(Section::Actions).len(),
        "lines classified"
    );

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_decides_ties() {
        // "premium" beats "plan"
        assert_eq!(classify_line("Premium plan"), Section::HeaderStatus);
        // "features" beats "basic"
        assert_eq!(classify_line("Basic features"), Section::Features);
        // "plan" beats "$"
        assert_eq!(classify_line("$5 plan"), Section::PlanInformation);
        // "save" beats "cart"
        assert_eq!(classify_line("Save your cart"), Section::Pricing);
    }

    #[test]
    fn each_rule_matches() {
        assert_eq!(classify_line("Your TRIAL has ENDED"), Section::HeaderStatus);
        assert_eq!(classify_line("Custom Domain"), Section::Features);
        assert_eq!(classify_line("Get Started"), Section::PlanInformation);
        assert_eq!(classify_line("$14.99/mo"), Section::Pricing);
        assert_eq!(classify_line("Billed monthly"), Section::Pricing);
        assert_eq!(classify_line("Add to Cart"), Section::Actions);
        assert_eq!(classify_line("Learn more"), Section::Actions);
    }

    #[test]
    fn dollar_prefix_is_literal_not_substring() {
        // "$" inside the line is not enough; it must lead
        assert_eq!(classify_line("Only $5"), Section::PlanInformation);
    }

    #[test]
    fn unmatched_falls_back_to_plan_information() {
        assert_eq!(classify_line("Hello there"), Section::PlanInformation);
        assert_eq!(classify_line(""), Section::PlanInformation);
    }

    #[test]
    fn classification_is_total_and_ordered() {
        let lines = [
            "Premium",
            "SEO tools",
            "Anything",
            "$9.99/mo",
            "See all",
            "Trial ended",
            "Yearly",
        ];
        let sections = classify_lines(lines);

        assert_eq!(sections.len(), lines.len());
        assert_eq!(sections.get(Section::HeaderStatus), ["Premium", "Trial ended"]);
        assert_eq!(sections.get(Section::Features), ["SEO tools"]);
        assert_eq!(sections.get(Section::PlanInformation), ["Anything"]);
        assert_eq!(sections.get(Section::Pricing), ["$9.99/mo", "Yearly"]);
        assert_eq!(sections.get(Section::Actions), ["See all"]);
    }

    #[test]
    fn iter_skips_empty_sections_in_declared_order() {
        let sections = classify_lines(["$1", "Premium"]);
        let order: Vec<Section> = sections.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![Section::HeaderStatus, Section::Pricing]);
    }

    #[test]
    fn empty_input() {
        let sections = classify_lines(Vec::<String>::new());
        assert!(sections.is_empty());
        assert_eq!(sections.iter().count(), 0);
    }
}
