//! Reconciliation of local edits against server-backed snapshots.
//!
//! The reconciled list is a fold over one ordered stream that interleaves
//! enriched base snapshots with edit intents. Each input is tagged, so the
//! transition is an exhaustive match:
//!
//! - `Snapshot(products)` replaces the state wholesale. Edits folded before it
//!   are dropped and never replayed; local edits only last until the next base refresh.
//! - `Add(item)` appends `item`.
//! - `Update(item)` replaces every element with `item.id`; no match is a no-op.
//! - `Delete(item)` removes every element with `item.id`; no match is a no-op.

use catalogsync_events::Reducer;

use crate::intent::EditIntent;
use crate::product::{Product, ProductCollection};

/// One input of the reconciliation fold.
#[derive(Debug, Clone, PartialEq)]
pub enum FoldInput {
    /// A full, authoritative replacement from the enriched base stream.
    Snapshot(ProductCollection),
    /// A single local edit.
    Edit(EditIntent),
}

impl From<EditIntent> for FoldInput {
    fn from(intent: EditIntent) -> Self {
        FoldInput::Edit(intent)
    }
}

impl From<ProductCollection> for FoldInput {
    fn from(snapshot: ProductCollection) -> Self {
        FoldInput::Snapshot(snapshot)
    }
}

/// Transition function of the reconciled product list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductReconciler;

impl Reducer for ProductReconciler {
    type State = ProductCollection;
    type Input = FoldInput;

    fn apply(&self, state: &mut ProductCollection, input: FoldInput) {
        match input {
            FoldInput::Snapshot(snapshot) => *state = snapshot,
            FoldInput::Edit(EditIntent::Add(item)) => state.push(item),
            FoldInput::Edit(EditIntent::Update(item)) => {
                for slot in state.iter_mut().filter(|p| p.id == item.id) {
                    *slot = item.clone();
                }
            }
            FoldInput::Edit(EditIntent::Delete(item)) => state.retain(|p| p.id != item.id),
        }
    }
}

/// Pure single-step form of the fold: `state` after `input`.
pub fn reconcile(state: &[Product], input: FoldInput) -> ProductCollection {
    let mut next = state.to_vec();
    ProductReconciler.apply(&mut next, input);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogsync_core::{CategoryId, ProductId};
    use catalogsync_events::Fold;

    fn product(id: i64, name: &str) -> Product {
        Product::new(ProductId::new(id), name, format!("CODE-{id}"))
    }

    fn base() -> ProductCollection {
        vec![product(1, "A"), product(2, "B"), product(3, "C")]
    }

    #[test]
    fn snapshot_replaces_state_wholesale() {
        let next = reconcile(&[product(9, "old")], FoldInput::Snapshot(base()));
        assert_eq!(next, base());
    }

    #[test]
    fn add_appends_at_the_end() {
        let next = reconcile(&base(), EditIntent::Add(product(4, "D")).into());
        assert_eq!(next.len(), 4);
        assert_eq!(next[3].id, ProductId::new(4));
        assert_eq!(&next[..3], &base()[..]);
    }

    #[test]
    fn update_replaces_matching_element_in_place() {
        let updated = product(2, "B").with_stock(1);
        let next = reconcile(&base(), EditIntent::Update(updated.clone()).into());
        assert_eq!(next, vec![product(1, "A"), updated, product(3, "C")]);
    }

    #[test]
    fn update_without_match_is_a_no_op() {
        let next = reconcile(&base(), EditIntent::Update(product(77, "ghost")).into());
        assert_eq!(next, base());
    }

    #[test]
    fn delete_removes_every_match() {
        let mut state = base();
        state.push(product(2, "B again"));

        let next = reconcile(&state, EditIntent::delete(&product(2, "B")).into());
        assert_eq!(next, vec![product(1, "A"), product(3, "C")]);
    }

    #[test]
    fn delete_without_match_is_a_no_op() {
        let next = reconcile(&base(), EditIntent::delete(&product(77, "ghost")).into());
        assert_eq!(next, base());
    }

    #[test]
    fn edits_before_a_snapshot_are_discarded() {
        let mut fold = Fold::new(ProductReconciler);
        fold.apply(FoldInput::Snapshot(base()));
        fold.apply(EditIntent::Add(product(4, "D")).into());
        fold.apply(EditIntent::delete(&product(1, "A")).into());

        let refreshed = vec![product(5, "E").in_category(CategoryId::new(1))];
        assert_eq!(fold.apply(FoldInput::Snapshot(refreshed.clone())), &refreshed);
        assert_eq!(fold.applied(), 4);
    }

    #[test]
    fn edits_before_any_snapshot_apply_to_the_empty_list() {
        let mut fold = Fold::new(ProductReconciler);
        assert_eq!(fold.apply(EditIntent::Add(product(4, "D")).into()).len(), 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_product() -> impl Strategy<Value = Product> {
            (1i64..12, proptest::option::of(0i64..50)).prop_map(|(id, stock)| {
                let mut p = product(id, "P");
                p.quantity_in_stock = stock;
                p
            })
        }

        fn arb_collection() -> impl Strategy<Value = ProductCollection> {
            proptest::collection::vec(arb_product(), 0..8)
        }

        fn arb_input() -> impl Strategy<Value = FoldInput> {
            prop_oneof![
                1 => arb_collection().prop_map(FoldInput::Snapshot),
                3 => arb_product().prop_map(|p| EditIntent::Add(p).into()),
                3 => arb_product().prop_map(|p| EditIntent::Update(p).into()),
                3 => arb_product().prop_map(|p| EditIntent::Delete(p).into()),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: add appends exactly once.
            #[test]
            fn add_is_append(state in arb_collection(), item in arb_product()) {
                let next = reconcile(&state, EditIntent::Add(item.clone()).into());
                let mut expected = state.clone();
                expected.push(item);
                prop_assert_eq!(next, expected);
            }

            /// Property: update of an absent id leaves the state untouched.
            #[test]
            fn update_on_miss_is_identity(state in arb_collection(), item in arb_product()) {
                prop_assume!(state.iter().all(|p| p.id != item.id));
                let next = reconcile(&state, EditIntent::Update(item).into());
                prop_assert_eq!(next, state);
            }

            /// Property: delete leaves no element with the id and keeps the rest in order.
            #[test]
            fn delete_removes_all_matches(state in arb_collection(), item in arb_product()) {
                let next = reconcile(&state, EditIntent::Delete(item.clone()).into());
                prop_assert!(next.iter().all(|p| p.id != item.id));
                let expected: Vec<Product> = state.into_iter().filter(|p| p.id != item.id).collect();
                prop_assert_eq!(next, expected);
            }

            /// Property: the final state equals folding the edits after the last snapshot over it.
            #[test]
            fn final_state_depends_only_on_last_snapshot_and_later_edits(
                inputs in proptest::collection::vec(arb_input(), 0..20)
            ) {
                let full = Fold::replay(ProductReconciler, inputs.clone());

                let last_snapshot = inputs
                    .iter()
                    .rposition(|i| matches!(i, FoldInput::Snapshot(_)));
                let tail = match last_snapshot {
                    Some(pos) => inputs[pos..].to_vec(),
                    None => inputs.clone(),
                };
                let from_tail = Fold::replay(ProductReconciler, tail);

                prop_assert_eq!(full, from_tail);
            }
        }
    }
}
