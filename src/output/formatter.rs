//! Output formatters for match results and raw backend responses

use crate::api::models::JobsListing;
use crate::api::{JobMatch, ResumeResponse};
use crate::config::OutputFormat;
use crate::error::{Result, SkillSyncError};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

const MATCH_HEADERS: [&str; 8] = [
    "ID",
    "Title",
    "Description",
    "Skills",
    "Matched Skills",
    "Semantic Score",
    "Keyword Score",
    "Final Score",
];
const DESCRIPTION_COLUMN: usize = 2;

/// Trait for formatting a resume upload result
pub trait OutputFormatter {
    fn format_matches(&self, response: &ResumeResponse) -> Result<String>;
}

/// Console formatter with colors and an aligned table
pub struct ConsoleFormatter {
    use_colors: bool,
    show_descriptions: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Picks the formatter for the requested output format
pub struct ResultRenderer {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>SkillSync Results</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f3f4f6; color: #1f2937; }
        .container { max-width: 960px; margin: 40px auto; background: white; padding: 24px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h2 { text-align: center; }
        .recommendation { background: #f9fafb; padding: 16px; border: 1px solid #e5e7eb; border-radius: 8px; white-space: pre-wrap; }
        table { width: 100%; border-collapse: collapse; }
        th { background: #f3f4f6; color: #4b5563; text-align: left; }
        th, td { padding: 8px 16px; border-bottom: 1px solid #e5e7eb; }
        td.title { font-weight: 500; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h2>Upload Resume</h2>
        <h3>Recommendation:</h3>
        <p class="recommendation">{{ recommendation }}</p>
        <h3>Job Matches:</h3>
        <table>
            <thead>
                <tr>{% for header in headers %}<th>{{ header }}</th>{% endfor %}</tr>
            </thead>
            <tbody>
                {% for row in rows %}
                <tr>
                    <td>{{ row.id }}</td>
                    <td class="title">{{ row.title }}</td>
                    <td>{{ row.description }}</td>
                    <td>{{ row.skills }}</td>
                    <td>{{ row.matched_skills }}</td>
                    <td>{{ row.semantic_score }}</td>
                    <td>{{ row.keyword_score }}</td>
                    <td>{{ row.final_score }}</td>
                </tr>
                {% endfor %}
            </tbody>
        </table>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    recommendation: String,
    headers: Vec<&'static str>,
    rows: Vec<MatchRow>,
}

/// One table row, every cell already rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills: String,
    pub matched_skills: String,
    pub semantic_score: String,
    pub keyword_score: String,
    pub final_score: String,
}

impl MatchRow {
    pub fn from_match(job: &JobMatch) -> Self {
        Self {
            id: job.id.to_string(),
            title: job.title.clone(),
            description: job.description.clone(),
            skills: job.skills.join(", "),
            matched_skills: job.matched_skills.join(", "),
            semantic_score: format_score(job.semantic_score),
            keyword_score: job.keyword_score.to_string(),
            final_score: format_score(job.final_score),
        }
    }

    fn cells(&self) -> [&str; 8] {
        [
            &self.id,
            &self.title,
            &self.description,
            &self.skills,
            &self.matched_skills,
            &self.semantic_score,
            &self.keyword_score,
            &self.final_score,
        ]
    }
}

/// Scores are shown with three decimals.
/// Three decimals, with exact ties rounded away from zero.
pub fn format_score(score: f64) -> String {
    if score.is_finite() && is_decimal_tie(score.abs(), 3) {
        // a tie at 3 places is k + 0.5 thousandths, which scales exactly
        let thousandths = (score.abs() * 1000.0).floor() as u64 + 1;
        let sign = if score < 0.0 { "-" } else { "" };
        return format!("{}{}.{:03}", sign, thousandths / 1000, thousandths % 1000);
    }
    format!("{:.3}", score)
}

/// True when the exact decimal expansion of `value` is a 5 followed by zeros past `places`.
fn is_decimal_tie(value: f64, places: usize) -> bool {
    let exact = format!("{:.1100}", value);
    let Some((_, fraction)) = exact.split_once('.') else {
        return false;
    };
    match fraction.get(places..) {
        Some(rest) => rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0'),
        None => false,
    }
}

/// Rows in the order the server returned them.
pub fn match_rows(response: &ResumeResponse) -> Vec<MatchRow> {
    response.matches.iter().map(MatchRow::from_match).collect()
}

fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_descriptions: bool) -> Self {
        Self { use_colors, show_descriptions }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn visible_columns(&self) -> Vec<usize> {
        (0..MATCH_HEADERS.len())
            .filter(|&i| self.show_descriptions || i != DESCRIPTION_COLUMN)
            .collect()
    }

    fn format_table(&self, rows: &[MatchRow]) -> String {
        let columns = self.visible_columns();
        let widths: Vec<usize> = columns
            .iter()
            .map(|&c| {
                rows.iter()
                    .map(|r| display_width(r.cells()[c]))
                    .chain(std::iter::once(display_width(MATCH_HEADERS[c])))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut output = String::new();

        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(&c, &w)| self.colorize(&pad(MATCH_HEADERS[c], w), Color::BrightBlack))
            .collect();
        output.push_str(header.join(" │ ").trim_end());
        output.push('\n');

        let rule: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
        output.push_str(&rule.join("─┼─"));
        output.push('\n');

        for row in rows {
            let cells = row.cells();
            let line: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(&c, &w)| {
                    let padded = pad(cells[c], w);
                    if c == 1 {
                        self.colorize(&padded, Color::White)
                    } else {
                        padded
                    }
                })
                .collect();
            output.push_str(line.join(" │ ").trim_end());
            output.push('\n');
        }

        output
    }
}

impl ConsoleFormatter {
    /// Compact listing of indexed postings: id, title and skills when present.
    pub fn format_listing(&self, listing: &JobsListing) -> String {
        let mut output = self.format_header(&format!("Indexed Jobs ({})", listing.jobs.len()));

        if let Some(message) = &listing.message {
            output.push_str(&self.colorize(message, Color::Yellow));
            output.push('\n');
        }

        for job in &listing.jobs {
            let id = job.get("id").map(value_text).unwrap_or_else(|| "-".to_string());
            let title = job.get("title").map(value_text).unwrap_or_else(|| "(untitled)".to_string());
            output.push_str(&format!("  • {} {}\n", self.colorize(&format!("[{}]", id), Color::BrightBlack), title));

            if let Some(skills) = job.get("skills").and_then(|s| s.as_array()) {
                let skills: Vec<String> = skills.iter().map(value_text).collect();
                output.push_str(&format!("    {}\n", skills.join(", ")));
            }
        }

        output
    }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_matches(&self, response: &ResumeResponse) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("Recommendation:"));
        output.push_str(&self.colorize(&response.recommendation, Color::Cyan));
        output.push('\n');

        output.push_str(&self.format_header("Job Matches:"));
        if response.matches.is_empty() {
            output.push_str(&self.colorize("No matches returned.\n", Color::Yellow));
        } else {
            output.push_str(&self.format_table(&match_rows(response)));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Render any backend response verbatim.
    pub fn format_value(&self, value: &serde_json::Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_matches(&self, response: &ResumeResponse) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(response)?)
        } else {
            Ok(serde_json::to_string(response)?)
        }
    }
}

impl MarkdownFormatter {
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_matches(&self, response: &ResumeResponse) -> Result<String> {
        let mut content = String::new();

        content.push_str("## Recommendation\n\n");
        content.push_str(&response.recommendation);
        content.push_str("\n\n## Job Matches\n\n");

        content.push_str(&format!("| {} |\n", MATCH_HEADERS.join(" | ")));
        content.push_str(&format!("|{}\n", "---|".repeat(MATCH_HEADERS.len())));
        for row in match_rows(response) {
            let cells: Vec<String> = row.cells().iter().map(|c| Self::escape_cell(c)).collect();
            content.push_str(&format!("| {} |\n", cells.join(" | ")));
        }

        Ok(content)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_matches(&self, response: &ResumeResponse) -> Result<String> {
        let template = HtmlTemplate {
            include_styles: self.include_styles,
            recommendation: response.recommendation.clone(),
            headers: MATCH_HEADERS.to_vec(),
            rows: match_rows(response),
        };
        template
            .render()
            .map_err(|e| SkillSyncError::OutputFormatting(e.to_string()))
    }
}

impl ResultRenderer {
    pub fn new(use_colors: bool, show_descriptions: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, show_descriptions),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn render_matches(&self, response: &ResumeResponse, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_matches(response),
            OutputFormat::Json => self.json_formatter.format_matches(response),
            OutputFormat::Markdown => self.markdown_formatter.format_matches(response),
            OutputFormat::Html => self.html_formatter.format_matches(response),
        }
    }

    pub fn render_listing(&self, listing: &JobsListing, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.console_formatter.format_listing(listing)),
            _ => Ok(serde_json::to_string_pretty(listing)?),
        }
    }

    /// Jobs responses have no known shape; always pretty JSON.
    pub fn render_value(&self, value: &serde_json::Value) -> Result<String> {
        self.json_formatter.format_value(value)
    }
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::new(true, true)
    }
}

pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_matches{}.{}", base_name, timestamp_suffix, extension)
}
