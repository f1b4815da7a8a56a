//! Property tests for the history manager's invariants.

use proptest::prelude::*;

use pagewright::History;

#[derive(Debug, Clone)]
enum Op {
    Push(u32),
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u32>().prop_map(Op::Push),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

proptest! {
    /// Length never exceeds the configured maximum and the current index
    /// always addresses a real entry once anything was pushed.
    #[test]
    fn bounded_and_addressable(
        max in 1usize..8,
        ops in proptest::collection::vec(op_strategy(), 1..60),
    ) {
        let mut history = History::new(max);
        let mut pushed_any = false;
        for op in ops {
            match op {
                Op::Push(v) => { history.push(v, "push", None); pushed_any = true; }
                Op::Undo => { history.undo(); }
                Op::Redo => { history.redo(); }
            }
            prop_assert!(history.len() <= max);
            if pushed_any {
                prop_assert!(history.current().is_some());
                let index = history.current_index().expect("current index");
                prop_assert!(index < history.len());
            }
        }
    }

    /// Undo after a push returns to the snapshot before that push, as long
    /// as nothing was evicted.
    #[test]
    fn undo_inverts_push(
        base in proptest::collection::vec(any::<u32>(), 1..5),
        last in any::<u32>(),
    ) {
        let mut history = History::new(16);
        for v in &base {
            history.push(*v, "base", None);
        }
        let before = *history.current().expect("base snapshot");

        history.push(last, "last", None);
        prop_assert!(history.undo());
        prop_assert_eq!(*history.current().expect("snapshot"), before);

        // And redo restores it.
        prop_assert!(history.redo());
        prop_assert_eq!(*history.current().expect("snapshot"), last);
    }

    /// After undo + push, the discarded branch is gone for good.
    #[test]
    fn redo_branch_discard(
        values in proptest::collection::vec(any::<u32>(), 2..6),
        replacement in any::<u32>(),
    ) {
        let mut history = History::new(16);
        for v in &values {
            history.push(*v, "v", None);
        }
        prop_assert!(history.undo());
        history.push(replacement, "replacement", None);

        prop_assert!(!history.can_redo());
        prop_assert!(!history.redo());
        prop_assert_eq!(*history.current().expect("snapshot"), replacement);
    }

    /// Repeated undo from the newest entry lands on the oldest retained
    /// entry and stops there.
    #[test]
    fn undo_walks_to_the_oldest_survivor(
        max in 1usize..6,
        count in 1usize..20,
    ) {
        let mut history = History::new(max);
        for i in 0..count {
            history.push(i as u32, "v", None);
        }
        let retained = count.min(max);
        for _ in 0..retained - 1 {
            prop_assert!(history.undo());
        }
        prop_assert!(!history.can_undo());
        prop_assert!(!history.undo());
        prop_assert_eq!(
            *history.current().expect("snapshot"),
            (count - retained) as u32
        );
    }
}
