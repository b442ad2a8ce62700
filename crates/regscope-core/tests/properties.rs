//! Property tests for the filter and search engines.

use proptest::prelude::*;
use regscope_core::{
    BrowseQuery, Filters, Regulation, Rule, RuleFilter, StatusClass, StatusFilter, filter,
    normalize_bill, search,
};

fn regulation() -> impl Strategy<Value = Regulation> {
    (
        "[A-Z]{2} [0-9]{1,4}",
        prop::sample::select(vec!["IA", "WY", "CO", "TX"]),
        prop::sample::select(vec![
            "Signed by Governor",
            "Assigned to Committee",
            "Failed - Adjourned",
            "Introduced",
            "Vetoed",
        ]),
        any::<bool>(),
        any::<bool>(),
        "[a-z ]{0,30}",
        prop::sample::select(vec!["Life", "Health", "Annuities"]),
    )
        .prop_map(|(bill, state, status, p1, p2, summary, section)| Regulation {
            bill,
            state: state.to_string(),
            status: status.to_string(),
            is_insurance_related: true,
            is_rule_p1_affected: p1,
            is_rule_p2_affected: p2,
            p1_effect_explanation: Rule::P1.default_explanation().to_string(),
            p2_effect_explanation: Rule::P2.default_explanation().to_string(),
            summary,
            section: section.to_string(),
        })
}

fn filters() -> impl Strategy<Value = Filters> {
    (
        prop::option::of(prop::sample::select(vec!["IA", "WY", "CO", ""])),
        prop::sample::select(vec![
            StatusFilter::All,
            StatusFilter::Passed,
            StatusFilter::Failed,
            StatusFilter::Exact("Vetoed".into()),
        ]),
        prop::sample::select(vec![
            RuleFilter::All,
            RuleFilter::Affected(Rule::P1),
            RuleFilter::Affected(Rule::P2),
        ]),
        prop::option::of(prop::sample::select(vec!["Life", "Health", ""])),
    )
        .prop_map(|(state, status, rule_affected, section)| Filters {
            state: state.map(str::to_string),
            status,
            rule_affected,
            section: section.map(str::to_string),
        })
}

/// True when `sub` appears in `full` in the same relative order.
fn is_ordered_subset(sub: &[&Regulation], full: &[&Regulation]) -> bool {
    let mut rest = full.iter();
    sub.iter()
        .all(|s| rest.by_ref().any(|f| std::ptr::eq(*s, *f)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn unconstrained_filter_is_identity(items in prop::collection::vec(regulation(), 0..30)) {
        let out = filter(&items, &Filters::default());
        prop_assert_eq!(out.len(), items.len());
        for (a, b) in out.iter().zip(&items) {
            prop_assert!(std::ptr::eq(*a, b));
        }
    }

    #[test]
    fn empty_search_is_identity(items in prop::collection::vec(regulation(), 0..30), blank in "[ \t]{0,4}") {
        let all: Vec<&Regulation> = items.iter().collect();
        let out = search(&items, &blank);
        prop_assert!(is_ordered_subset(&out, &all));
        prop_assert_eq!(out.len(), items.len());
    }

    #[test]
    fn search_after_filter_is_ordered_subset(
        items in prop::collection::vec(regulation(), 0..30),
        f in filters(),
        q in "[a-z0-9 ]{0,4}",
    ) {
        let filtered = filter(&items, &f);
        let searched = search(filtered.iter().copied(), &q);
        prop_assert!(is_ordered_subset(&searched, &filtered));

        let browse = BrowseQuery { filters: f, query: q };
        prop_assert_eq!(browse.apply(&items), searched);
    }

    #[test]
    fn filtered_items_satisfy_every_constraint(
        items in prop::collection::vec(regulation(), 0..30),
        f in filters(),
    ) {
        for reg in filter(&items, &f) {
            if let Some(state) = f.state.as_deref().filter(|s| !s.is_empty()) {
                prop_assert_eq!(&reg.state, state);
            }
            match &f.status {
                StatusFilter::Passed => {
                    prop_assert_eq!(reg.status_class(), StatusClass::Passed);
                }
                StatusFilter::Failed => {
                    prop_assert_eq!(reg.status_class(), StatusClass::Failed);
                }
                StatusFilter::Exact(s) => {
                    prop_assert_eq!(&reg.status, s);
                }
                StatusFilter::All => {}
            }
            if let RuleFilter::Affected(rule) = f.rule_affected {
                prop_assert!(reg.is_affected_by(rule));
            }
        }
    }

    #[test]
    fn normalized_bill_has_no_runs_or_padding(bill in "[ \tA-Z0-9]{0,20}") {
        let n = normalize_bill(&bill);
        prop_assert!(!n.contains("  "));
        prop_assert_eq!(n.trim(), n.as_str());
        prop_assert_eq!(normalize_bill(&n), n.clone());
    }
}
