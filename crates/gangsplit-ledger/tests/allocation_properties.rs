//! Behavioural properties of the allocation ledger.
//!
//! Worked examples for clamp, split, removal, duplicate rejection, the
//! finalize gate and total reduction, plus randomized edit sequences that
//! must never leave the ledger over-allocated.

use gangsplit_ledger::{AllocationLedger, EditState, input, invariants};
use gangsplit_types::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn pounds(major: i64) -> Money {
    Money::from_major(major)
}

/// Helper: ledger over `total` pounds with named freeform members.
fn ledger(total: i64, members: &[(&str, i64)]) -> AllocationLedger {
    let mut ledger = AllocationLedger::new(pounds(total));
    for (i, (name, amount)) in members.iter().enumerate() {
        ledger
            .add_member(MemberIdentity::freeform(*name), Role::Labourer)
            .unwrap();
        ledger.set_amount(i, pounds(*amount)).unwrap();
    }
    ledger
}

fn amount_of(ledger: &AllocationLedger, index: usize) -> Money {
    ledger.member(index).unwrap().amount
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn clamp_caps_request_at_what_others_leave() {
    let mut l = ledger(100, &[("A", 30), ("B", 40)]);
    l.set_amount(0, pounds(1_000)).unwrap();
    assert_eq!(amount_of(&l, 0), pounds(60));
    assert_eq!(l.remaining(), Money::ZERO);
}

#[test]
fn split_reclaims_unallocated_balance() {
    let mut l = ledger(100, &[("A", 20), ("B", 10)]);
    assert_eq!(l.remaining(), pounds(70));
    l.split_adjacent_pair(0).unwrap();
    assert_eq!(amount_of(&l, 0), pounds(50));
    assert_eq!(amount_of(&l, 1), pounds(50));
    assert_eq!(l.remaining(), Money::ZERO);
}

#[test]
fn odd_pool_split_differs_by_at_most_one_penny() {
    let mut l = AllocationLedger::new(Money::from_minor(101));
    l.add_member(MemberIdentity::freeform("A"), Role::Labourer)
        .unwrap();
    l.add_member(MemberIdentity::freeform("B"), Role::Labourer)
        .unwrap();
    l.set_amount(1, Money::from_minor(7)).unwrap();

    l.split_adjacent_pair(0).unwrap();
    let a = amount_of(&l, 0);
    let b = amount_of(&l, 1);
    assert!((a - b).abs() <= Money::ONE_MINOR);
    let remaining = l.remaining();
    assert!(remaining == Money::ZERO || remaining == Money::ONE_MINOR);
    assert!(!remaining.is_negative());
}

#[test]
fn repeated_pairwise_splits_converge_on_even_total() {
    let mut l = ledger(90, &[("A", 90), ("B", 0), ("C", 0)]);
    for _ in 0..40 {
        l.split_adjacent_pair(0).unwrap();
        l.split_adjacent_pair(1).unwrap();
    }
    let amounts: Vec<Money> = l.members().iter().map(|m| m.amount).collect();
    let max = *amounts.iter().max().unwrap();
    let min = *amounts.iter().min().unwrap();
    assert!(max - min <= Money::from_minor(2), "{amounts:?}");
    assert!(l.total_allocated() <= l.total());
}

#[test]
fn removal_frees_amount_without_redistribution() {
    let mut l = ledger(100, &[("A", 40), ("B", 60)]);
    l.remove_member(1).unwrap();
    assert_eq!(l.len(), 1);
    assert_eq!(amount_of(&l, 0), pounds(40));
    assert_eq!(l.remaining(), pounds(60));
}

#[test]
fn duplicate_saved_party_leaves_length_unchanged() {
    let party = SavedParty::dummy("Dave");
    let mut l = AllocationLedger::new(pounds(100));
    l.add_member(party.identity(), party.role.clone()).unwrap();
    let before = l.len();
    let err = l.add_member(party.identity(), Role::Labourer).unwrap_err();
    assert!(matches!(err, GangSplitError::DuplicateParty(id) if id == party.id));
    assert_eq!(l.len(), before);
}

#[test]
fn finalize_gate_with_one_penny_tolerance() {
    let config = LedgerConfig::default().with_tolerance(Money::ONE_MINOR);

    let empty = AllocationLedger::with_config(pounds(100), config.clone());
    assert!(!empty.ready_to_finalize());

    let mut zero = AllocationLedger::with_config(Money::ZERO, config.clone());
    zero.add_member(MemberIdentity::freeform("A"), Role::Labourer)
        .unwrap();
    assert!(!zero.ready_to_finalize());

    let mut l = AllocationLedger::with_config(pounds(100), config);
    l.add_member(MemberIdentity::freeform("A"), Role::Labourer)
        .unwrap();
    l.add_member(MemberIdentity::freeform("B"), Role::Labourer)
        .unwrap();

    l.set_amount(0, Money::from_minor(5_000)).unwrap();
    l.set_amount(1, Money::from_minor(5_000)).unwrap();
    assert!(l.ready_to_finalize(), "exactly 100.00");

    l.set_amount(1, Money::from_minor(4_999)).unwrap();
    assert!(l.ready_to_finalize(), "99.99 within 0.01");

    l.set_amount(1, Money::from_minor(4_998)).unwrap();
    assert!(!l.ready_to_finalize(), "99.98 outside 0.01");
}

#[test]
fn finalize_gate_is_exact_by_default() {
    let mut l = ledger(100, &[("A", 100)]);
    assert!(l.ready_to_finalize());
    l.set_amount(0, Money::from_minor(9_999)).unwrap();
    assert!(!l.ready_to_finalize());
}

#[test]
fn total_reduction_reclamps_to_new_total() {
    let mut l = ledger(100, &[("A", 60), ("B", 40)]);
    l.set_total(pounds(50));
    assert!(l.total_allocated() <= pounds(50));
    assert!(invariants::verify(&l).is_ok());
}

#[test]
fn percentage_total_feeds_ledger() {
    // A 35% share of a fixed 1,999.99 lift price.
    let total = Money::from_minor(199_999).percentage(rust_decimal::Decimal::new(35, 0));
    assert_eq!(total, Money::from_minor(69_999));

    let mut l = AllocationLedger::new(total);
    l.add_member(MemberIdentity::freeform("A"), Role::Bricklayer)
        .unwrap();
    l.add_member(MemberIdentity::freeform("B"), Role::Labourer)
        .unwrap();
    l.split_adjacent_pair(0).unwrap();
    assert_eq!(l.remaining(), Money::ONE_MINOR);
    l.set_amount(0, amount_of(&l, 0) + Money::ONE_MINOR).unwrap();
    let breakdown = l.finalize().unwrap();
    assert_eq!(breakdown.allocated(), total);
}

#[test]
fn slider_and_typed_inputs_share_the_clamp() {
    let mut l = ledger(100, &[("A", 0), ("B", 70)]);
    l.set_amount(0, input::normalize_slider(55.5)).unwrap();
    assert_eq!(amount_of(&l, 0), pounds(30));

    let a = l.member(0).unwrap().id;
    let mut edits = EditState::new();
    edits.begin(a, amount_of(&l, 0).to_string());
    edits.update_draft(a, "12.345");
    edits.commit(&mut l, a).unwrap();
    assert_eq!(amount_of(&l, 0), Money::from_minor(1_234));
}

// =============================================================================
// Randomized edit sequences
// =============================================================================

#[test]
fn random_edit_sequences_never_over_allocate() {
    let mut rng = StdRng::seed_from_u64(0x6a6e_6773);
    let saved: Vec<SavedParty> = (0..6).map(|i| SavedParty::dummy(&format!("p{i}"))).collect();

    for _round in 0..200 {
        let mut l = AllocationLedger::new(Money::from_minor(rng.gen_range(0..50_000)));

        for _step in 0..60 {
            match rng.gen_range(0..6) {
                0 => {
                    let party = &saved[rng.gen_range(0..saved.len())];
                    let _ = l.add_member(party.identity(), party.role.clone());
                }
                1 => {
                    let _ = l.add_member(MemberIdentity::freeform("walk-in"), Role::Labourer);
                }
                2 if !l.is_empty() => {
                    let index = rng.gen_range(0..l.len());
                    let requested = Money::from_minor(rng.gen_range(-1_000..80_000));
                    l.set_amount(index, requested).unwrap();
                }
                3 if !l.is_empty() => {
                    l.remove_member(rng.gen_range(0..l.len())).unwrap();
                }
                4 if l.len() >= 2 => {
                    l.split_adjacent_pair(rng.gen_range(0..l.len() - 1))
                        .unwrap();
                }
                5 => {
                    l.set_total(Money::from_minor(rng.gen_range(0..50_000)));
                }
                _ => {}
            }

            assert!(
                l.total_allocated() <= l.total(),
                "allocated {} > total {}",
                l.total_allocated(),
                l.total()
            );
            assert!(l.members().iter().all(|m| !m.amount.is_negative()));
            invariants::verify(&l).unwrap();
        }
    }
}

#[test]
fn random_splits_keep_remaining_within_one_penny() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let total = Money::from_minor(rng.gen_range(1..1_000_000));
        let mut l = AllocationLedger::new(total);
        for name in ["a", "b", "c"] {
            l.add_member(MemberIdentity::freeform(name), Role::Labourer)
                .unwrap();
        }
        l.set_amount(2, Money::from_minor(rng.gen_range(0..total.minor_units() + 1)))
            .unwrap();
        l.split_adjacent_pair(0).unwrap();
        assert!(l.remaining() <= Money::ONE_MINOR);
        assert!(!l.remaining().is_negative());
        assert_eq!(amount_of(&l, 0), amount_of(&l, 1));
    }
}
