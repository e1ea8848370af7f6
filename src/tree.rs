//! Prefix-minimum segment tree (PMT).
//!
//! The tree indexes `n` ordered keys and supports the operations the
//! cordon drivers need: global minimum, leftmost-minimum index, point
//! removal (set a leaf to the sentinel), and the prefix-min cascade.
//!
//! Two leaf modes share the one implementation:
//! - **key mode** ([`MinTree::from_keys`]): leaves hold caller keys; used
//!   by the LIS scheduler and the LCS-as-LIS reduction.
//! - **arrow-head mode** ([`MinTree::from_arrows`]): leaf `i` holds the
//!   head `rows[i][cursor[i]]` of a strictly-increasing row, or the
//!   sentinel once the row is exhausted. Only this mode supports
//!   [`MinTree::cascade`].
//!
//! Nodes are stored in a dense first-child layout: a subtree over `w`
//! leaves occupies `2w − 1` contiguous slots, node first, then the left
//! subtree, then the right. Handing each child recursion its own slot
//! slice is what lets the build and the cascade fork without sharing
//! mutable state.

use crate::arrows::validate_rows;
use crate::error::{Error, Result};
use crate::utils::{join_if, should_spawn};

/// Ordering key stored in the tree.
///
/// `infinity` must compare strictly greater than every real key the caller
/// will ever store; it encodes "absent".
pub trait Key: Clone + Ord + Send + Sync {
    /// The sentinel greater than all real values.
    fn infinity() -> Self;
}

macro_rules! impl_key_for_int {
    ($($t:ty),*) => {
        $(impl Key for $t {
            #[inline]
            fn infinity() -> Self {
                <$t>::MAX
            }
        })*
    };
}

impl_key_for_int!(u32, u64, usize, i32, i64);

impl Key for String {
    /// Workaround sentinel for string keys: longer than any realistic key
    /// and lexicographically above plain ASCII content.
    fn infinity() -> Self {
        "z".repeat(64)
    }
}

impl Key for (usize, usize) {
    #[inline]
    fn infinity() -> Self {
        (usize::MAX, usize::MAX)
    }
}

#[derive(Debug)]
enum LeafMode<K> {
    Keys,
    Arrows {
        rows: Vec<Vec<K>>,
        cursors: Vec<usize>,
    },
}

/// Prefix-minimum segment tree over `n` leaves.
#[derive(Debug)]
pub struct MinTree<K: Key> {
    slots: Vec<K>,
    len: usize,
    parallel: bool,
    granularity: usize,
    mode: LeafMode<K>,
}

impl<K: Key> MinTree<K> {
    /// Build a key-mode tree over `keys`.
    ///
    /// Spawns the two child builds whenever the subtree width exceeds
    /// `granularity` (and `parallel` holds); a granularity of zero keeps
    /// the build sequential.
    pub fn from_keys(keys: &[K], parallel: bool, granularity: usize) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut slots = vec![K::infinity(); 2 * keys.len() - 1];
        build_slots(&mut slots, keys, parallel, granularity);
        Ok(Self {
            slots,
            len: keys.len(),
            parallel,
            granularity,
            mode: LeafMode::Keys,
        })
    }

    /// Build an arrow-head-mode tree: leaf `i` starts at the first entry
    /// of `rows[i]` (sentinel if the row is empty).
    ///
    /// Rows must be strictly increasing.
    pub fn from_arrows(rows: Vec<Vec<K>>, parallel: bool, granularity: usize) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyInput);
        }
        validate_rows(&rows)?;
        let heads: Vec<K> = rows
            .iter()
            .map(|row| row.first().cloned().unwrap_or_else(K::infinity))
            .collect();
        let mut slots = vec![K::infinity(); 2 * rows.len() - 1];
        build_slots(&mut slots, &heads, parallel, granularity);
        let cursors = vec![0; rows.len()];
        Ok(Self {
            slots,
            len: rows.len(),
            parallel,
            granularity,
            mode: LeafMode::Arrows { rows, cursors },
        })
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.len
    }

    /// A built tree always has at least one leaf.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The minimum over all leaves (the root key).
    pub fn global_min(&self) -> &K {
        &self.slots[0]
    }

    /// Whether every leaf has been removed or exhausted.
    pub fn is_drained(&self) -> bool {
        *self.global_min() == K::infinity()
    }

    /// The smallest leaf index attaining the global minimum.
    ///
    /// Walks down from the root, preferring the left child on ties.
    pub fn leftmost_min_index(&self) -> usize {
        let mut offset = 0;
        let mut width = self.len;
        let mut base = 0;
        while width > 1 {
            let left_width = width.div_ceil(2);
            let left_root = offset + 1;
            let right_root = offset + 2 * left_width;
            if self.slots[left_root] <= self.slots[right_root] {
                offset = left_root;
                width = left_width;
            } else {
                offset = right_root;
                base += left_width;
                width -= left_width;
            }
        }
        base
    }

    /// Current key of leaf `index`.
    pub fn leaf(&self, index: usize) -> Result<&K> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let mut offset = 0;
        let mut width = self.len;
        let mut local = index;
        while width > 1 {
            let left_width = width.div_ceil(2);
            if local < left_width {
                offset += 1;
                width = left_width;
            } else {
                offset += 2 * left_width;
                local -= left_width;
                width -= left_width;
            }
        }
        Ok(&self.slots[offset])
    }

    /// Set leaf `index` to the sentinel and re-minimise up to the root.
    ///
    /// Removing a leaf that is already at the sentinel is a contract
    /// violation and is reported as [`Error::LeafAlreadyRemoved`].
    pub fn remove(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        if remove_slots(&mut self.slots, self.len, index) {
            Ok(())
        } else {
            Err(Error::LeafAlreadyRemoved { index })
        }
    }

    /// Run one prefix-min cascade wave over the whole tree.
    ///
    /// Every leaf whose head is dominated by the running prefix minimum of
    /// the heads to its left advances its cursor past all dominated
    /// entries; subtree minima are recomputed on the way back up. Only
    /// meaningful in arrow-head mode.
    pub fn cascade(&mut self) -> Result<()> {
        let LeafMode::Arrows { rows, cursors } = &mut self.mode else {
            return Err(Error::WrongTreeMode);
        };
        let rows: &[Vec<K>] = rows;
        cascade_slots(
            &mut self.slots,
            cursors,
            rows,
            0,
            &K::infinity(),
            self.parallel,
            self.granularity,
        );
        Ok(())
    }

    /// Cursor positions, if the tree is in arrow-head mode.
    pub fn cursors(&self) -> Option<&[usize]> {
        match &self.mode {
            LeafMode::Keys => None,
            LeafMode::Arrows { cursors, .. } => Some(cursors),
        }
    }
}

/// Recursive divide-and-conquer build over a contiguous subtree slice.
fn build_slots<K: Key>(slots: &mut [K], keys: &[K], parallel: bool, granularity: usize) {
    let width = keys.len();
    if width == 1 {
        slots[0] = keys[0].clone();
        return;
    }
    let left_width = width.div_ceil(2);
    let (node, rest) = slots.split_first_mut().expect("subtree slice is non-empty");
    {
        let (left, right) = rest.split_at_mut(2 * left_width - 1);
        let (left_keys, right_keys) = keys.split_at(left_width);
        join_if(
            should_spawn(parallel, granularity, width),
            || build_slots(left, left_keys, parallel, granularity),
            || build_slots(right, right_keys, parallel, granularity),
        );
    }
    *node = min_key(&rest[0], &rest[2 * left_width - 1]);
}

/// Returns whether the leaf was still live before removal.
fn remove_slots<K: Key>(slots: &mut [K], width: usize, index: usize) -> bool {
    if width == 1 {
        let was_live = slots[0] < K::infinity();
        slots[0] = K::infinity();
        return was_live;
    }
    let left_width = width.div_ceil(2);
    let (node, rest) = slots.split_first_mut().expect("subtree slice is non-empty");
    let (left, right) = rest.split_at_mut(2 * left_width - 1);
    let was_live = if index < left_width {
        remove_slots(left, left_width, index)
    } else {
        remove_slots(right, width - left_width, index - left_width)
    };
    *node = min_key(&left[0], &right[0]);
    was_live
}

/// One wave of the prefix-min cascade over the subtree rooted at
/// `slots[0]`, whose leaves are rows `first_row ..` of `rows`.
///
/// `pre` is the running prefix minimum of the heads strictly left of this
/// subtree, as they were before the wave started. The left-first ordering
/// and the threshold handed to the right child are what make a single walk
/// equivalent to sweeping the leaves left to right.
fn cascade_slots<K: Key>(
    slots: &mut [K],
    cursors: &mut [usize],
    rows: &[Vec<K>],
    first_row: usize,
    pre: &K,
    parallel: bool,
    granularity: usize,
) {
    // No leaf below this node is dominated by the prefix.
    if slots[0] > *pre {
        return;
    }

    let width = cursors.len();
    if width == 1 {
        let row = &rows[first_row][..];
        advance_cursor(&mut cursors[0], row, pre);
        slots[0] = row
            .get(cursors[0])
            .cloned()
            .unwrap_or_else(K::infinity);
        return;
    }

    let left_width = width.div_ceil(2);
    let (node, rest) = slots.split_first_mut().expect("subtree slice is non-empty");
    {
        let (left, right) = rest.split_at_mut(2 * left_width - 1);
        let (left_cursors, right_cursors) = cursors.split_at_mut(left_width);

        if *node == right[0] {
            // Minimum sits in the right half (possibly tied with the left).
            if left[0] <= *pre && left[0] < K::infinity() {
                // The left half advances under the incoming prefix; the
                // right half sees the tightened prefix, which is exactly
                // the left half's minimum before it advanced. The two
                // walks touch disjoint leaves, so they may run as
                // parallel tasks.
                let tightened = left[0].clone();
                join_if(
                    should_spawn(parallel, granularity, width),
                    || {
                        cascade_slots(
                            left,
                            left_cursors,
                            rows,
                            first_row,
                            pre,
                            parallel,
                            granularity,
                        )
                    },
                    || {
                        cascade_slots(
                            right,
                            right_cursors,
                            rows,
                            first_row + left_width,
                            &tightened,
                            parallel,
                            granularity,
                        )
                    },
                );
            } else {
                cascade_slots(
                    right,
                    right_cursors,
                    rows,
                    first_row + left_width,
                    pre,
                    parallel,
                    granularity,
                );
            }
        } else {
            // Strict minimum in the left half: no right-half head can be
            // dominated by the prefix it would see.
            cascade_slots(
                left,
                left_cursors,
                rows,
                first_row,
                pre,
                parallel,
                granularity,
            );
        }
    }

    *node = min_key(&rest[0], &rest[2 * left_width - 1]);
}

/// Advance `cursor` past every row entry `<= pre`.
///
/// Hybrid policy: if the entry eight steps ahead still satisfies the
/// threshold, jump with a binary search; otherwise step linearly.
fn advance_cursor<K: Key>(cursor: &mut usize, row: &[K], pre: &K) {
    if *cursor + 8 >= row.len() || row[*cursor + 8] > *pre {
        while *cursor < row.len() && row[*cursor] <= *pre {
            *cursor += 1;
        }
    } else {
        *cursor += row[*cursor..].partition_point(|value| value <= pre);
    }
}

#[inline]
fn min_key<K: Key>(a: &K, b: &K) -> K {
    if a <= b {
        a.clone()
    } else {
        b.clone()
    }
}
