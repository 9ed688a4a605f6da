use core::cmp::Ordering;

/// Chooses which end of the priority order sits at the root of the heap.
///
/// The engine only ever asks one question, "is `a` better than `b`?", so an
/// orientation is just a total order on priorities. `compare` is also the
/// order used for sorted snapshots, so the best item always comes first.
pub trait Orientation {
    /// Orders `a` relative to `b`, best first.
    fn compare<P: Ord>(a: &P, b: &P) -> Ordering;

    /// Returns true if `a` belongs strictly closer to the root than `b`.
    #[inline]
    fn is_better<P: Ord>(a: &P, b: &P) -> bool {
        Self::compare(a, b) == Ordering::Less
    }
}

/// The smallest priority is extremal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MinFirst;

/// The largest priority is extremal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MaxFirst;

impl Orientation for MinFirst {
    #[inline]
    fn compare<P: Ord>(a: &P, b: &P) -> Ordering {
        Ord::cmp(a, b)
    }
}

impl Orientation for MaxFirst {
    #[inline]
    fn compare<P: Ord>(a: &P, b: &P) -> Ordering {
        Ord::cmp(b, a)
    }
}
