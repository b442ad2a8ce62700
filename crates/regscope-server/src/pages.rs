//! HTML page generation for the browse view.

use std::fmt::Write;

use regscope_core::{
    BrowseQuery, Card, ExplanationParts, Facets, Impact, Rule, RuleFilter, StatusFilter,
    result_count,
};

/// Everything the browse page shows.
pub struct PageModel<'a> {
    pub browse: &'a BrowseQuery,
    pub facets: &'a Facets,
    pub cards: &'a [Card],
    /// Shown above the results when data could not be loaded.
    pub notice: Option<&'a str>,
}

/// Escape text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full browse page.
pub fn browse_page(model: &PageModel<'_>) -> String {
    let filters = &model.browse.filters;

    let notice = model
        .notice
        .map(|n| format!(r#"<div class="notice">{}</div>"#, escape(n)))
        .unwrap_or_default();

    let mut grid = String::new();
    for card in model.cards {
        grid.push_str(&render_card(card));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Insurance Regulations</title>
</head>
<body>
    <main>
        <h1>Insurance Regulations</h1>
        <form method="get" action="/" class="controls">
            <input type="search" name="q" placeholder="Search regulations..." value="{query}">
            <select name="state">{states}</select>
            <select name="status">{statuses}</select>
            <select name="rule">{rules}</select>
            <select name="section">{sections}</select>
            <button type="submit">Apply</button>
        </form>
        {notice}
        <p class="count">{count}</p>
        <div class="grid">
{grid}        </div>
    </main>
</body>
</html>"#,
        query = escape(&model.browse.query),
        states = options("All states", &model.facets.states, filters.state.as_deref()),
        statuses = status_options(&filters.status, &model.facets.statuses),
        rules = rule_options(filters.rule_affected),
        sections = options("All sections", &model.facets.sections, filters.section.as_deref()),
        notice = notice,
        count = result_count(model.cards.len()),
        grid = grid,
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}

fn options(any_label: &str, values: &[String], selected: Option<&str>) -> String {
    let mut html = option("", any_label, selected.is_none_or(str::is_empty));
    for value in values {
        html.push_str(&option(value, value, selected == Some(value.as_str())));
    }
    html
}

/// Status categories, then one exact option per known status.
///
/// An exact filter for a status not among the facets keeps its own option so
/// resubmitting the form preserves it.
fn status_options(selected: &StatusFilter, statuses: &[String]) -> String {
    let mut choices: Vec<(StatusFilter, String)> = vec![
        (StatusFilter::All, "All statuses".into()),
        (StatusFilter::Passed, "Passed".into()),
        (StatusFilter::Failed, "Failed".into()),
    ];
    choices.extend(
        statuses
            .iter()
            .map(|s| (StatusFilter::Exact(s.clone()), s.clone())),
    );
    if let StatusFilter::Exact(status) = selected
        && !statuses.contains(status)
    {
        choices.push((selected.clone(), status.clone()));
    }
    choices
        .iter()
        .map(|(f, label)| option(&f.to_string(), label, f == selected))
        .collect()
}

fn rule_options(selected: RuleFilter) -> String {
    [
        (RuleFilter::All, "All rules"),
        (RuleFilter::Affected(Rule::P1), "Rule P1"),
        (RuleFilter::Affected(Rule::P2), "Rule P2"),
    ]
    .iter()
    .map(|(f, label)| option(&f.to_string(), label, *f == selected))
    .collect()
}

fn render_card(card: &Card) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"            <article class="card" data-key="{key}">
                <header>
                    <h2>{title}</h2>
                    <span class="badge badge-{variant}">{label}</span>
                    <span class="section">{section}</span>
                </header>
                <p class="summary">{summary}</p>
"#,
        key = escape(&card.key),
        title = escape(&card.title),
        variant = card.status_variant,
        label = card.status_label,
        section = escape(&card.section),
        summary = escape(&card.summary),
    );
    for rule in Rule::ALL {
        html.push_str(&render_impact(rule, card.impact(rule)));
    }
    html.push_str("            </article>\n");
    html
}

fn render_impact(rule: Rule, impact: &Impact) -> String {
    let class = rule.as_str().to_lowercase();
    match impact {
        Impact::Unaffected { label } => format!(
            "                <div class=\"impact impact-{class} none\"><p>{}</p></div>\n",
            escape(label)
        ),
        Impact::Affected {
            organization_heading,
            underwriting_heading,
            parts,
        } => {
            let ExplanationParts {
                org_impact,
                rules_impact,
                next_steps,
            } = parts;
            let mut html = format!(
                "                <div class=\"impact impact-{class}\">\n                    <h3>Rule {rule} Impact</h3>\n"
            );
            for (heading, text) in [
                (*organization_heading, org_impact),
                (*underwriting_heading, rules_impact),
                ("Next Steps", next_steps),
            ] {
                let _ = writeln!(
                    html,
                    "                    <h4>{}</h4><p>{}</p>",
                    escape(heading),
                    escape(text.as_deref().unwrap_or_default())
                );
            }
            html.push_str("                </div>\n");
            html
        }
    }
}
