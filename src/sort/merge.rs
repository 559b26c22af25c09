//! Stable merge sort with a fallible comparison.
//!
//! Top-down merge sort over `Copy` items with insertion sort for short runs.
//! The first comparison error stops the sort and is returned; the slice is
//! left in an unspecified order.

/// Runs at or below this length are insertion sorted.
const INSERTION_SORT_THRESHOLD: usize = 20;

/// Sorts `v` stably. `is_less` must return `Ok(true)` iff `a` orders
/// strictly before `b`.
pub(crate) fn try_merge_sort<T, E, F>(v: &mut [T], is_less: &mut F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(&T, &T) -> Result<bool, E>,
{
    if v.len() <= INSERTION_SORT_THRESHOLD {
        return insertion_sort(v, is_less);
    }

    let mut scratch = v.to_vec();
    sort_run(v, &mut scratch, is_less)
}

fn sort_run<T, E, F>(v: &mut [T], scratch: &mut [T], is_less: &mut F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(&T, &T) -> Result<bool, E>,
{
    let len = v.len();
    if len <= INSERTION_SORT_THRESHOLD {
        return insertion_sort(v, is_less);
    }

    let mid = len / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        sort_run(left, left_scratch, is_less)?;
        sort_run(right, right_scratch, is_less)?;
    }

    // Already in order across the seam.
    if !is_less(&v[mid], &v[mid - 1])? {
        return Ok(());
    }

    merge(v, mid, &mut scratch[..len], is_less)
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]`. Ties take the left run.
fn merge<T, E, F>(v: &mut [T], mid: usize, scratch: &mut [T], is_less: &mut F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(&T, &T) -> Result<bool, E>,
{
    scratch.copy_from_slice(v);
    let (left, right) = scratch.split_at(mid);

    let (mut l, mut r) = (0, 0);
    for slot in v.iter_mut() {
        let take_right = if l == left.len() {
            true
        } else if r == right.len() {
            false
        } else {
            is_less(&right[r], &left[l])?
        };

        if take_right {
            *slot = right[r];
            r += 1;
        } else {
            *slot = left[l];
            l += 1;
        }
    }

    Ok(())
}

fn insertion_sort<T, E, F>(v: &mut [T], is_less: &mut F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(&T, &T) -> Result<bool, E>,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && is_less(&v[j], &v[j - 1])? {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}
