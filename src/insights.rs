//! Static insights shown under every chart.
//!
//! These bullets are curated text, not derived from the dataset at
//! runtime: they name specific clusters, stores and products from the
//! sample data and stay the same whichever mode is selected.

/// Section heading for the insights block.
pub const INSIGHTS_HEADING: &str = "Overall Insights & Suggestions";

/// The insight bullets, in display order.
pub const INSIGHTS: [&str; 3] = [
    "Optimize Stock for High-Traffic Stores: Cluster C1 (S001, S003, S005) needs stock prioritization to capture sales opportunities.",
    "Prevent Stockouts Proactively: Monitor real-time inventory to avoid high stockout risks for products like P007.",
    "Improve Marketing for Low Conversions: Enhance marketing and product positioning for stores in Cluster C1 to boost conversion rates.",
];

/// The insights block rendered as markdown.
pub fn insights_markdown() -> String {
    let mut out = format!("## {INSIGHTS_HEADING}\n\n");
    for insight in INSIGHTS {
        let (lead, rest) = insight.split_once(": ").unwrap_or((insight, ""));
        if rest.is_empty() {
            out.push_str(&format!("- {lead}\n"));
        } else {
            out.push_str(&format!("- **{lead}**: {rest}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_are_static() {
        assert_eq!(INSIGHTS.len(), 3);
        assert!(INSIGHTS[0].contains("C1"));
        assert!(INSIGHTS[0].contains("S001, S003, S005"));
        assert!(INSIGHTS[1].contains("P007"));
    }

    #[test]
    fn test_markdown_rendering() {
        let md = insights_markdown();
        assert!(md.starts_with("## Overall Insights & Suggestions"));
        assert!(md.contains("- **Optimize Stock for High-Traffic Stores**:"));
        assert_eq!(md.matches("\n- ").count(), 3);
    }
}
