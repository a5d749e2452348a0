use leadline_core::timeline::{ReconcileContext, TimelineSource, reconcile};
use proptest::prelude::*;
use std::collections::HashSet;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(2000))]

    #[test]
    fn reconcile_is_idempotent((interactions, remarks, lifecycle) in arb_inputs(), viewer in arb_viewer()) {
        let ctx = ReconcileContext::new(viewer.as_ref());
        let first = reconcile(&interactions, &remarks, &lifecycle, &ctx);
        let second = reconcile(&interactions, &remarks, &lifecycle, &ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn entry_ids_are_unique((interactions, remarks, lifecycle) in arb_inputs()) {
        let feed = reconcile(&interactions, &remarks, &lifecycle, &ReconcileContext::default());
        let ids: HashSet<_> = feed.iter().map(|e| e.id.as_str()).collect();
        prop_assert_eq!(ids.len(), feed.len());
    }

    #[test]
    fn feed_is_newest_first((interactions, remarks, lifecycle) in arb_inputs()) {
        let feed = reconcile(&interactions, &remarks, &lifecycle, &ReconcileContext::default());
        for pair in feed.windows(2) {
            prop_assert!(pair[0].occurred_at >= pair[1].occurred_at);
        }
    }

    #[test]
    fn equal_instants_keep_source_precedence((interactions, remarks, lifecycle) in arb_inputs()) {
        let rank = |source: TimelineSource| match source {
            TimelineSource::Interaction => 0,
            TimelineSource::Remark => 1,
            TimelineSource::Lifecycle => 2,
        };
        let feed = reconcile(&interactions, &remarks, &lifecycle, &ReconcileContext::default());
        for pair in feed.windows(2) {
            if pair[0].occurred_at == pair[1].occurred_at {
                prop_assert!(rank(pair[0].source) <= rank(pair[1].source));
            }
        }
    }

    #[test]
    fn linked_remarks_never_stand_alone((interactions, remarks, lifecycle) in arb_inputs()) {
        let feed = reconcile(&interactions, &remarks, &lifecycle, &ReconcileContext::default());
        let standalone = remarks.iter().filter(|r| r.linked_interaction().is_none()).count();
        let remark_entries = feed.iter().filter(|e| e.source == TimelineSource::Remark).count();
        prop_assert!(remark_entries <= standalone);
        prop_assert!(feed.len() <= interactions.len() + standalone + lifecycle.len());
    }

    #[test]
    fn authors_are_never_blank((interactions, remarks, lifecycle) in arb_inputs(), viewer in arb_viewer()) {
        let ctx = ReconcileContext::new(viewer.as_ref());
        let feed = reconcile(&interactions, &remarks, &lifecycle, &ctx);
        for entry in &feed {
            prop_assert!(!entry.author.trim().is_empty());
        }
    }

    #[test]
    fn transitions_name_both_sides((interactions, remarks, lifecycle) in arb_inputs()) {
        let feed = reconcile(&interactions, &remarks, &lifecycle, &ReconcileContext::default());
        for detail in feed.iter().filter_map(|e| e.transition.as_deref()) {
            let (_, sides) = detail.split_once(": ").unwrap();
            let (from, to) = sides.split_once(" → ").unwrap();
            prop_assert!(!from.is_empty() && !to.is_empty());
        }
    }
}
