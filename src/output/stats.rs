//! Console summary of a finished crawl

use crate::state::CrawlResult;

/// Formats the console summary
///
/// The layout is:
///
/// ```text
/// Summary:
/// Total pages visited: 4
/// Broken links found: 2
///
/// Broken links:
/// - https://example.com/missing (HTTP 404)
/// ```
pub fn format_summary(result: &CrawlResult) -> String {
    let mut out = String::new();

    out.push_str("Summary:\n");
    out.push_str(&format!("Total pages visited: {}\n", result.total_visited()));
    out.push_str(&format!("Broken links found: {}\n", result.broken_count()));
    out.push_str(&format!(
        "Duration: {:.1}s ({:.1}% of pages working)\n",
        result.duration_seconds(),
        result.success_rate()
    ));

    if !result.broken_links().is_empty() {
        out.push_str("\nBroken links:\n");
        for link in result.broken_links() {
            out.push_str(&format!("- {} ({})\n", link.url, link.reason));
        }
    }

    out
}

/// Prints the console summary to stdout
pub fn print_summary(result: &CrawlResult) {
    print!("{}", format_summary(result));
}
