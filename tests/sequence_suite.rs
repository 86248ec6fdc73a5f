use fatnode::{OutOfRange, PersistentArray, PersistentList, PersistentSequence};

fn numbers<S: PersistentSequence<u32>>(n: u32) -> S {
    (0..n).collect()
}

fn history_is_immutable<S: PersistentSequence<u32>>() {
    let base: S = numbers(6);
    let before: Vec<u32> = base.iter().collect();
    let version = base.version();

    let _edits = [
        base.plus(99),
        base.insert(0, 98).unwrap(),
        base.insert(3, 97).unwrap(),
        base.remove(2).unwrap(),
        base.set(5, 96).unwrap(),
        base.minus(&4),
        base.minus_all([0, 5]),
        base.slice(1, 4).unwrap(),
    ];

    assert_eq!(base.iter().collect::<Vec<_>>(), before);
    assert_eq!(base.version(), version);
    for (i, expected) in before.iter().enumerate() {
        assert_eq!(base.get(i).unwrap(), *expected);
    }
}

fn versions_are_consecutive<S: PersistentSequence<u32>>() {
    let mut current = S::empty();
    let mut seen = Vec::new();
    for step in 0..10u32 {
        current = match step % 5 {
            0 => current.plus(step),
            1 => current.insert(0, step).unwrap(),
            2 => current.minus(&1000),
            3 => current.set(0, step).unwrap(),
            _ => current.slice(0, current.len()).unwrap(),
        };
        seen.push(current.version().get());
    }
    assert_eq!(seen, (1..=10).collect::<Vec<_>>());
}

fn sizes_follow_operations<S: PersistentSequence<u32>>() {
    let base: S = numbers(5);
    assert_eq!(base.plus(1).len(), 6);
    assert_eq!(base.plus_all([1, 2, 3]).len(), 8);
    assert_eq!(base.insert_all(2, [7, 8]).unwrap().len(), 7);
    assert_eq!(base.remove(4).unwrap().len(), 4);
    assert_eq!(base.minus(&3).len(), 4);
    assert_eq!(base.minus(&30).len(), 5);
    assert_eq!(base.minus_all([1, 1, 2, 40]).len(), 3);
    assert_eq!(base.set(1, 100).unwrap().len(), 5);
}

fn full_slice_round_trips<S: PersistentSequence<u32>>() {
    let base = numbers::<S>(7).remove(3).unwrap().insert(1, 50).unwrap();
    let copy = base.slice(0, base.len()).unwrap();
    assert_eq!(copy.len(), base.len());
    assert!(copy.version() > base.version());
    for i in 0..base.len() {
        assert_eq!(copy.get(i), base.get(i));
    }
    let empty = base.slice(3, 3).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.plus(1).get(0), Ok(1));
}

fn bounds_are_enforced<S: PersistentSequence<u32>>() {
    let base: S = numbers(4);
    let len = 4;

    assert_eq!(
        base.insert(5, 0).err(),
        Some(OutOfRange::Index { index: 5, len })
    );
    for index in [4, 5, usize::MAX] {
        let expected = OutOfRange::Index { index, len };
        let err = base.get(index).unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(err.snapshot_len(), len);
        assert_eq!(base.remove(index).err(), Some(expected));
        assert_eq!(base.set(index, 0).err(), Some(expected));
    }
    assert_eq!(
        base.slice(3, 2).err(),
        Some(OutOfRange::Range { from: 3, to: 2, len })
    );
    assert_eq!(
        base.slice(0, 5).err(),
        Some(OutOfRange::Range { from: 0, to: 5, len })
    );
    assert_eq!(base.slice(0, 5).err().map(|e| e.snapshot_len()), Some(len));

    // None of the failures above took a version.
    assert_eq!(base.plus(0).version().get(), base.version().get() + 1);

    for index in 0..=len {
        assert!(base.insert(index, 9).is_ok());
    }
    for index in 0..len {
        assert!(base.get(index).is_ok());
        let removed = base.remove(index).unwrap();
        let mut expected: Vec<u32> = (0..4).collect();
        expected.remove(index);
        assert_eq!(removed.iter().collect::<Vec<_>>(), expected);
        assert_eq!(removed.get(2), Ok(expected[2]));
        assert!(base.set(index, 9).is_ok());
    }
}

fn membership<S: PersistentSequence<u32>>() {
    let base: S = [3, 1, 4, 1, 5].into_iter().collect();
    assert!(base.contains(&4));
    assert!(!base.contains(&9));
    assert!(base.contains_all(&[1, 5]));
    assert!(!base.contains_all(&[1, 9]));
    assert!(base.contains_all(&[]));

    let once = base.minus(&1);
    assert_eq!(once.iter().collect::<Vec<_>>(), vec![3, 4, 1, 5]);
    let twice = base.minus_all([1, 1, 1]);
    assert_eq!(twice.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
}

fn empty_collect_takes_a_version<S: PersistentSequence<u32>>() {
    let empty: S = std::iter::empty().collect();
    assert!(empty.is_empty());
    assert_eq!(empty.version().get(), 1);
    assert_eq!(S::empty().version().get(), 0);
}

macro_rules! sequence_suite {
    ($name:ident, $ty:ty) => {
        mod $name {
            use super::*;

            #[test]
            fn history_is_immutable() {
                super::history_is_immutable::<$ty>();
            }

            #[test]
            fn versions_are_consecutive() {
                super::versions_are_consecutive::<$ty>();
            }

            #[test]
            fn sizes_follow_operations() {
                super::sizes_follow_operations::<$ty>();
            }

            #[test]
            fn full_slice_round_trips() {
                super::full_slice_round_trips::<$ty>();
            }

            #[test]
            fn bounds_are_enforced() {
                super::bounds_are_enforced::<$ty>();
            }

            #[test]
            fn membership() {
                super::membership::<$ty>();
            }

            #[test]
            fn empty_collect_takes_a_version() {
                super::empty_collect_takes_a_version::<$ty>();
            }
        }
    };
}

sequence_suite!(array, PersistentArray<u32>);
sequence_suite!(list, PersistentList<u32>);
