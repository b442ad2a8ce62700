//! Prompt text for the enhancement model.

use regscope_core::Rule;

pub const SYSTEM_PROMPT: &str = "You are an expert insurance regulatory analyst.";

const P1_UNDERWRITING: &str = include_str!("../prompts/p1_underwriting.txt");
const P2_UNDERWRITING: &str = include_str!("../prompts/p2_underwriting.txt");

/// Insurance product a rule stands for.
pub fn product(rule: Rule) -> &'static str {
    match rule {
        Rule::P1 => "Wellabe's Short-term Care insurance",
        Rule::P2 => "MassMutual Life Insurance",
    }
}

/// Underwriting guideline digest for the rule's product.
pub fn underwriting_rules(rule: Rule) -> &'static str {
    match rule {
        Rule::P1 => P1_UNDERWRITING,
        Rule::P2 => P2_UNDERWRITING,
    }
}

/// The bill fields a prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct BillContext<'a> {
    pub bill: &'a str,
    pub state: &'a str,
    pub summary: &'a str,
    pub current_explanation: &'a str,
}

const DEPARTMENTS: [&str; 10] = [
    "Sales",
    "New Product Team",
    "Underwriting",
    "Actuaries",
    "Legal",
    "Risk & Compliance",
    "Claims",
    "Policy Administration",
    "Customer Experience",
    "Training",
];

/// User prompt asking for the three-paragraph analysis of `bill` against
/// `rule`'s product.
///
/// Paragraph order matches what the card view splits on: impacted
/// departments, impacted underwriting rules, next steps.
pub fn build_prompt(bill: &BillContext<'_>, rule: Rule) -> String {
    let departments: String = DEPARTMENTS
        .iter()
        .map(|d| format!("   - {d}\n"))
        .collect();
    format!(
        "Analyze this insurance regulatory bill and its impact:

State: {state}
Bill: {number}
Summary: {summary}
Current Analysis: {current}
Insurance product: {product}
Underwriting rules:
{rules}
Think about all the different ways this regulatory bill can impact the insurance company and the underwriting guidelines.
Follow these criteria for your analysis:

1. Which departments are impacted and need to adapt to this change? Consider:
{departments}   (Include only relevant departments)

2. Which pages or guidelines/rules within the underwriting document are related to or impacted by this regulatory change?

3. What are the next steps? What should each impacted team do to ensure compliance with the regulatory change?

Provide a comprehensive yet concise analysis. Write exactly 3 paragraphs separated by blank lines, one per criterion above, \
starting with \"Impact on \" for the first two and \"Suggested Next Steps: \" for the third. Keep the total under 300 words.
",
        state = bill.state,
        number = bill.bill,
        summary = bill.summary,
        current = bill.current_explanation,
        product = product(rule),
        rules = underwriting_rules(rule),
        departments = departments,
    )
}
