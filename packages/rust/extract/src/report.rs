//! Markdown rendering of classified copy.

use crate::classify::Sections;

/// Render sections as a Markdown block ending with a link to the design.
///
/// Empty sections are left out entirely.
pub fn format_report(sections: &Sections, figma_url: &str) -> String {
    let mut out = String::from("## 🎯 Extracted Copy:\n\n");

    for (section, lines) in sections.iter() {
        out.push_str(&format!("### {section}:\n"));
        for line in lines {
            out.push_str(&format!("- \"{line}\"\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("**🔗 Figma Source:** [Design Link]({figma_url})\n\n"));
    out
}
