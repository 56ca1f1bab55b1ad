//! Ticket drafts for implementing extracted copy.
//!
//! A draft is a title plus a Markdown description embedding the copy report.
//! Submitting to an issue tracker is behind [`TicketSink`]; the shipped sink
//! only writes the draft out for manual creation.

use std::io::Write;

use figmacopy_shared::{FigmaCopyError, Result, TicketDefaults};
use tracing::info;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Per-run ticket settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketConfig {
    /// Product area the work belongs to (e.g. `UPP`).
    pub area: String,
    pub requires_ux_review: bool,
    pub requires_translation: bool,
    /// Extra acceptance criteria, one per line.
    pub custom_requirements: Option<String>,
}

impl TicketConfig {
    /// Start from configured defaults, overriding the area when given.
    pub fn from_defaults(defaults: &TicketDefaults, area: Option<&str>) -> Self {
        Self {
            area: area
                .map(str::to_string)
                .unwrap_or_else(|| defaults.default_area.clone()),
            requires_ux_review: defaults.requires_ux_review,
            requires_translation: defaults.requires_translation,
            custom_requirements: defaults.custom_requirements.clone(),
        }
    }
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self::from_defaults(&TicketDefaults::default(), None)
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// A ready-to-file ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
}

impl TicketDraft {
    /// Build the draft around a formatted copy report.
    pub fn new(report: &str, figma_url: &str, config: &TicketConfig) -> Self {
        let area = &config.area;
        let title = format!("{area}: Implement copy for design update");

        let mut ac = vec![
            format!("Implement copy in {area} component/page"),
            "Ensure proper formatting and styling matches Figma design".to_string(),
            "Happy and Sad path testing".to_string(),
            "EIDs needed (impressions and click events)".to_string(),
            "Create Kibana / ESSP board for monitoring".to_string(),
        ];
        if config.requires_translation {
            ac.push("Provide copy to localization for translation".to_string());
        }
        if let Some(extra) = &config.custom_requirements {
            ac.extend(
                extra
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string),
            );
        }

        let mut poc = Vec::new();
        if config.requires_ux_review {
            poc.push("UX team for copy review and design sign-off".to_string());
        }
        poc.push(format!("{area} team leads"));

        let mut ui_design = vec![
            format!("[Figma Design]({figma_url})"),
            "Copy formatting requirements from Figma".to_string(),
        ];
        let mut review = Vec::new();
        let mut done = vec![
            "Copy implemented and styled correctly".to_string(),
            "Matches Figma design exactly".to_string(),
        ];
        if config.requires_ux_review {
            ui_design.push("Finalized UX design review required".to_string());
            review.push("UX sign off for copy accuracy and design compliance".to_string());
            done.push("UX design review completed and approved".to_string());
        }
        review.extend([
            "2 peer reviews (#monetization-prs)".to_string(),
            "QA (#usi-ii-quality-support)".to_string(),
            "ET needed for conversion tracking".to_string(),
        ]);
        done.extend([
            "PR merged".to_string(),
            "ESSP / Kibana Board monitoring active".to_string(),
        ]);

        let mut dependencies = vec!["Figma design finalization".to_string()];
        if config.requires_ux_review {
            dependencies.push("UX copy approval and design review".to_string());
        }
        dependencies.push("Component/page identification".to_string());

        let documentation = [
            "Update component documentation",
            "Document copy implementation patterns",
            "Update README as needed",
        ]
        .map(str::to_string);

        let mut description = format!(
            "**Description:** Implement extracted copy from Figma design for {area} area.\n\n{}\n\n",
            report.trim_end()
        );
        push_block(&mut description, "**AC:** Dev bullet points of what to complete", &ac);
        push_block(&mut description, "**POC:** (point of contact) ", &poc);
        push_block(&mut description, "**Dependencies:** ", &dependencies);
        push_block(&mut description, "**Documentation:** ", &documentation);
        push_block(&mut description, "**UI Design:** ", &ui_design);
        push_block(&mut description, "**Review**", &review);
        push_block(&mut description, "**Done:** ", &done);

        Self {
            title,
            description: description.trim_end().to_string(),
        }
    }
}

fn push_block(out: &mut String, heading: &str, bullets: &[String]) {
    out.push_str(heading);
    out.push('\n');
    for bullet in bullets {
        out.push_str("* ");
        out.push_str(bullet);
        out.push('\n');
    }
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for ticket drafts.
pub trait TicketSink {
    /// File the draft; returns a one-line status for the user.
    fn submit(&mut self, draft: &TicketDraft) -> Result<String>;
}

/// Writes drafts to a stream for manual creation. No tracker API is called.
pub struct WriterTicketSink<W: Write> {
    out: W,
}

impl<W: Write> WriterTicketSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TicketSink for WriterTicketSink<W> {
    fn submit(&mut self, draft: &TicketDraft) -> Result<String> {
        info!(title = %draft.title, "ticket ready for manual creation");

        let write = |out: &mut W| -> std::io::Result<()> {
            writeln!(out, "📋 Ticket ready for creation:")?;
            writeln!(out, "Title: {}", draft.title)?;
            writeln!(out)?;
            writeln!(out, "{}", draft.description)?;
            out.flush()
        };
        write(&mut self.out).map_err(|e| FigmaCopyError::io("<ticket output>", e))?;

        Ok(format!("✅ Ticket details prepared: {}", draft.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "## 🎯 Extracted Copy:\n\n### Pricing:\n- \"$9.99/mo\"\n\n";
    const URL: &str = "https://www.figma.com/design/K/N?node-id=1-2";

    #[test]
    fn defaults_and_area_override() {
        let config = TicketConfig::default();
        assert_eq!(config.area, "UPP");
        assert!(config.requires_ux_review);
        assert!(!config.requires_translation);

        let config = TicketConfig::from_defaults(&TicketDefaults::default(), Some("CHECKOUT"));
        assert_eq!(config.area, "CHECKOUT");
    }

    #[test]
    fn configured_requirements_reach_the_draft() {
        let defaults = TicketDefaults {
            custom_requirements: Some("Update help center article".into()),
            ..TicketDefaults::default()
        };
        let config = TicketConfig::from_defaults(&defaults, None);
        assert_eq!(
            config.custom_requirements.as_deref(),
            Some("Update help center article")
        );

        let draft = TicketDraft::new(REPORT, URL, &config);
        assert!(draft.description.contains("* Update help center article\n"));
    }

    #[test]
    fn draft_embeds_area_report_and_link() {
        let draft = TicketDraft::new(REPORT, URL, &TicketConfig::default());
        assert_eq!(draft.title, "UPP: Implement copy for design update");
        assert!(draft
            .description
            .starts_with("**Description:** Implement extracted copy from Figma design for UPP area."));
        assert!(draft.description.contains("- \"$9.99/mo\""));
        assert!(draft.description.contains("* Implement copy in UPP component/page"));
        assert!(draft.description.contains("* UPP team leads"));
        assert!(draft.description.contains(&format!("* [Figma Design]({URL})")));
        assert!(draft.description.contains("* UX sign off for copy accuracy"));
        assert!(draft.description.ends_with("* ESSP / Kibana Board monitoring active"));
    }

    #[test]
    fn section_order_is_fixed() {
        let draft = TicketDraft::new(REPORT, URL, &TicketConfig::default());
        let headings = [
            "**AC:**",
            "**POC:**",
            "**Dependencies:**",
            "**Documentation:**",
            "**UI Design:**",
            "**Review**",
            "**Done:**",
        ];
        let positions: Vec<usize> = headings
            .iter()
            .map(|h| draft.description.find(*h).expect(h))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn optional_requirements() {
        let config = TicketConfig {
            area: "ACCT".into(),
            requires_ux_review: false,
            requires_translation: true,
            custom_requirements: Some("Support dark mode\n\n  Keep legacy copy behind flag ".into()),
        };
        let draft = TicketDraft::new(REPORT, URL, &config);
        assert!(draft.description.contains("* Provide copy to localization for translation"));
        assert!(draft.description.contains("* Support dark mode\n"));
        assert!(draft.description.contains("* Keep legacy copy behind flag\n"));
        assert!(!draft.description.contains("UX sign off"));
        assert!(!draft.description.contains("UX team"));
    }

    #[test]
    fn writer_sink_prints_draft() {
        let draft = TicketDraft::new(REPORT, URL, &TicketConfig::default());
        let mut sink = WriterTicketSink::new(Vec::new());
        let status = sink.submit(&draft).unwrap();
        assert_eq!(status, "✅ Ticket details prepared: UPP: Implement copy for design update");

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert!(written.starts_with("📋 Ticket ready for creation:\nTitle: UPP: Implement"));
        assert!(written.contains("**Done:**"));
    }
}
