// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PROPERTY-BASED TESTS - oramm-ledger
//
// Supply conservation and all-or-nothing behaviour of ledger calls under
// arbitrary sequences of transfers, approvals and mints.
//
// Run: cargo test --release -p oramm-ledger --test prop_ledger
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use oramm_ledger::{AssetLedger, FungibleLedger, LpShareLedger};
use proptest::prelude::*;

const HOLDERS: [&str; 4] = ["alice", "bob", "carol", "pool"];

#[derive(Debug, Clone)]
enum Op {
    Transfer(usize, usize, u128),
    Approve(usize, usize, u128),
    TransferFrom(usize, usize, usize, u128),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize, 0..4usize, 0u128..5_000).prop_map(|(a, b, n)| Op::Transfer(a, b, n)),
        (0..4usize, 0..4usize, 0u128..5_000).prop_map(|(a, b, n)| Op::Approve(a, b, n)),
        (0..4usize, 0..4usize, 0..4usize, 0u128..5_000)
            .prop_map(|(s, o, t, n)| Op::TransferFrom(s, o, t, n)),
    ]
}

proptest! {
    /// PROPERTY: no sequence of ledger calls creates or destroys supply
    #[test]
    fn prop_transfers_conserve_supply(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut ledger = FungibleLedger::new("Token A", "TKA", 18, 10_000, "alice").unwrap();
        for op in ops {
            let before = ledger.clone();
            let result = match op {
                Op::Transfer(a, b, n) => ledger.transfer(HOLDERS[a], HOLDERS[b], n),
                Op::Approve(a, b, n) => ledger.approve(HOLDERS[a], HOLDERS[b], n),
                Op::TransferFrom(s, o, t, n) => {
                    ledger.transfer_from(HOLDERS[s], HOLDERS[o], HOLDERS[t], n)
                }
            };
            if result.is_err() {
                prop_assert_eq!(&ledger, &before, "failed call must not mutate state");
            }
            prop_assert_eq!(ledger.sum_of_balances(), Some(10_000));
            prop_assert_eq!(ledger.total_supply(), 10_000);
        }
    }

    /// PROPERTY: LP supply always equals the sum of holder balances
    #[test]
    fn prop_lp_supply_matches_balances(
        mints in prop::collection::vec((0..4usize, 1u128..1_000_000), 1..30),
        burns in prop::collection::vec((0..4usize, 1u128..1_000_000), 0..30),
    ) {
        let (mut lp, auth) = LpShareLedger::new("0xlp", "Pool Share", "OLP", 18).unwrap();
        lp.install_authority(&auth).unwrap();
        for (h, n) in mints {
            lp.mint(&auth, HOLDERS[h], n).unwrap();
        }
        for (h, n) in burns {
            let _ = lp.burn(&auth, HOLDERS[h], n);
            prop_assert_eq!(lp.sum_of_balances(), Some(lp.total_supply()));
        }
    }
}
