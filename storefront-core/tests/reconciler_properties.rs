use storefront_core::{
    Fragrance, OptionGroup, Plan, Reconciler, SelectionSnapshot, default_table, expanded_index,
    recompute_collapse_state, recompute_destination,
};

fn plan_snapshot(plan: Plan) -> SelectionSnapshot {
    SelectionSnapshot::new().with(OptionGroup::PurchasePlan, plan.as_str())
}

/// Snapshot with `fragrance` checked in the group the plan actually reads.
fn combo_snapshot(plan: Plan, fragrance: Fragrance) -> SelectionSnapshot {
    let snapshot = plan_snapshot(plan);
    match plan.fragrance_source() {
        Some(group) => snapshot.with(group, fragrance.as_str()),
        None => snapshot,
    }
}

#[test]
fn wired_combinations_resolve_to_their_own_url() {
    for plan in [Plan::Single, Plan::Double] {
        for fragrance in Fragrance::ALL {
            let dest = recompute_destination(&combo_snapshot(plan, fragrance), default_table());
            assert_eq!(
                dest.url,
                format!("https://example.com/cart/{plan}-{fragrance}")
            );
            assert!(!dest.fell_back);
        }
    }
}

#[test]
fn all_nine_table_entries_are_reachable_by_key() {
    for plan in Plan::ALL {
        for fragrance in Fragrance::ALL {
            let key = storefront_core::LookupKey::of(plan, fragrance);
            assert_eq!(
                default_table().resolve(&key).url,
                format!("https://example.com/cart/{plan}-{fragrance}")
            );
        }
    }
}

#[test]
fn nothing_checked_resolves_to_single_original() {
    let dest = recompute_destination(&SelectionSnapshot::new(), default_table());
    assert_eq!(dest.key.as_str(), "single-original");
    assert_eq!(dest.url, "https://example.com/cart/single-original");
}

#[test]
fn double_plan_uses_first_choice_only() {
    for second in Fragrance::ALL {
        let snapshot = plan_snapshot(Plan::Double)
            .with(OptionGroup::FragranceDoubleChoice1, "rose")
            .with(OptionGroup::FragranceDoubleChoice2, second.as_str());
        let dest = recompute_destination(&snapshot, default_table());
        assert_eq!(dest.url, "https://example.com/cart/double-rose");
    }
}

#[test]
fn triple_plan_always_uses_default_fragrance() {
    let snapshot = plan_snapshot(Plan::Triple)
        .with(OptionGroup::Fragrance, "lily")
        .with(OptionGroup::FragranceDoubleChoice1, "rose")
        .with(OptionGroup::FragranceDoubleChoice2, "lily");
    let dest = recompute_destination(&snapshot, default_table());
    assert_eq!(dest.url, "https://example.com/cart/triple-original");
    assert!(!dest.fell_back);
}

#[test]
fn collapse_state_is_idempotent() {
    let checked = [false, true, false];
    let first = recompute_collapse_state(&checked);
    let second = recompute_collapse_state(&checked);
    assert_eq!(first, second);
    let styles: Vec<_> = first.iter().map(|s| s.style()).collect();
    let again: Vec<_> = second.iter().map(|s| s.style()).collect();
    assert_eq!(styles, again);
}

#[test]
fn checking_a_plan_leaves_exactly_one_expanded() {
    let mut checked = [true, false, false];
    assert_eq!(expanded_index(&recompute_collapse_state(&checked)), Some(0));

    // radio semantics: checking the third unchecks the rest
    checked = [false, false, true];
    let states = recompute_collapse_state(&checked);
    assert_eq!(states.iter().filter(|s| s.expanded).count(), 1);
    assert_eq!(expanded_index(&states), Some(2));
}

#[test]
fn nothing_checked_collapses_everything() {
    let states = recompute_collapse_state(&[false, false, false]);
    assert!(states.iter().all(|s| !s.expanded));
}

#[test]
fn reconciler_rereads_full_state_each_call() {
    let reconciler = Reconciler::default();
    let mut snapshot = combo_snapshot(Plan::Single, Fragrance::Lily);
    assert_eq!(
        reconciler.destination(&snapshot).url,
        "https://example.com/cart/single-lily"
    );
    snapshot.check(OptionGroup::PurchasePlan, "double");
    assert_eq!(
        reconciler.destination(&snapshot).url,
        "https://example.com/cart/double-original"
    );
}
