use organic_queue::BoundedSampleQueue;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u32),
    Sample,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u32>().prop_map(Op::Add),
        1 => Just(Op::Sample),
    ]
}

// ── Capacity invariant holds after every operation ─────────────────────

proptest! {
    #[test]
    fn size_never_exceeds_capacity(
        capacity in 1usize..32,
        ops in prop::collection::vec(arb_op(), 0..200),
    ) {
        let queue = BoundedSampleQueue::new(capacity).unwrap();
        for op in ops {
            match op {
                Op::Add(v) => { queue.add(v); }
                Op::Sample => { queue.sample(); }
            }
            prop_assert!(queue.size() <= capacity);
        }
    }
}

// ── Adds alone keep exactly the newest `capacity` items ────────────────

proptest! {
    #[test]
    fn adds_keep_newest_suffix(
        capacity in 1usize..16,
        values in prop::collection::vec(any::<u32>(), 0..64),
    ) {
        let queue = BoundedSampleQueue::new(capacity).unwrap();
        for v in &values {
            queue.add(*v);
        }
        let start = values.len().saturating_sub(capacity);
        prop_assert_eq!(queue.snapshot(), values[start..].to_vec());
    }
}

// ── Random pop removes exactly one member ──────────────────────────────

proptest! {
    #[test]
    fn pop_removes_one_member(values in prop::collection::vec(0u32..1000, 1..50)) {
        let queue = BoundedSampleQueue::new(values.len()).unwrap();
        for v in &values {
            queue.add(*v);
        }
        let before = queue.snapshot();
        let popped = queue.sample().unwrap();
        prop_assert!(before.contains(&popped));
        prop_assert_eq!(queue.size(), before.len() - 1);

        let mut expected = before.clone();
        let pos = expected.iter().position(|v| *v == popped).unwrap();
        expected.remove(pos);
        let mut after = queue.snapshot();
        expected.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(after, expected);
    }
}
