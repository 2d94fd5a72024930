//! n largest / n smallest selection over a slice.
//!
//! Both strategies return equal-priority items in input order and, at the
//! selection boundary, keep the ones that appear first.

use super::heapq::HeapQ;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// score everything, stable sort, truncate. O(m log m)
    Sort,
    /// keep a min-heap of the best n seen so far. O(m log n)
    Heap,
}

impl Strategy {
    /// sort when more than about half of the items are selected
    pub fn choose(n: usize, len: usize) -> Self {
        if n.saturating_mul(2) >= len {
            Strategy::Sort
        } else {
            Strategy::Heap
        }
    }
}

/// the `n` items with the greatest priority, greatest first
///
/// ```
/// use rankkits::collections_ext::n_largest;
///
/// let numbers = [1, 30, 4, 21, 100, 50, 32, 99, 2, 43];
/// let largest = n_largest(3, &numbers, |x| *x as f64);
/// assert_eq!(largest, vec![100, 99, 50]);
/// ```
pub fn n_largest<T, F>(n: usize, items: &[T], priority_fn: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    n_largest_with_strategy(n, items, priority_fn, None)
}

/// `strategy`: None picks one with `Strategy::choose`
pub fn n_largest_with_strategy<T, F>(
    n: usize,
    items: &[T],
    priority_fn: F,
    strategy: Option<Strategy>,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    if n == 0 || items.is_empty() {
        return vec![];
    }
    let strategy = strategy.unwrap_or_else(|| Strategy::choose(n, items.len()));
    tracing::debug!(
        "n_largest. n:{}, num_items:{}, strategy:{:?}",
        n,
        items.len(),
        strategy
    );

    match strategy {
        Strategy::Sort => largest_by_sort(n, items, &priority_fn),
        Strategy::Heap => largest_by_heap(n, items, &priority_fn),
    }
}

/// the `n` items with the smallest priority, smallest first
pub fn n_smallest<T, F>(n: usize, items: &[T], priority_fn: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    n_smallest_with_strategy(n, items, priority_fn, None)
}

pub fn n_smallest_with_strategy<T, F>(
    n: usize,
    items: &[T],
    priority_fn: F,
    strategy: Option<Strategy>,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    n_largest_with_strategy(n, items, |item| -priority_fn(item), strategy)
}

fn largest_by_sort<T, F>(n: usize, items: &[T], priority_fn: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let mut scored = items
        .iter()
        .map(|item| (priority_fn(item), item))
        .collect::<Vec<_>>();
    // stable, so ties keep input order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(n)
        .map(|(_, item)| item.clone())
        .collect()
}

fn largest_by_heap<T, F>(n: usize, items: &[T], priority_fn: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let n = n.min(items.len());
    let (head, rest) = items.split_at(n);

    let mut heap = HeapQ::with_capacity(n);
    for item in head {
        heap.push(item, priority_fn(item));
    }

    // the root is the floor of the current top n. push_pop only stores an
    // item that beats it, evicting the floor.
    let mut replaced = 0_usize;
    for item in rest {
        let priority = priority_fn(item);
        if heap.peek_priority().map_or(true, |floor| priority.total_cmp(&floor).is_gt()) {
            heap.push_pop(item, priority);
            replaced += 1;
        }
    }
    tracing::trace!("largest_by_heap. scanned:{}, replaced:{}", rest.len(), replaced);

    let mut res = heap.into_sorted_vec();
    res.reverse();
    res.into_iter().cloned().collect()
}

#[cfg(test)]
mod test {
    use super::{n_largest, n_largest_with_strategy, n_smallest, n_smallest_with_strategy, Strategy};

    fn lcg_values(n: usize, seed: u64, modulo: u64) -> Vec<i64> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 33) % modulo) as i64
            })
            .collect()
    }

    #[test]
    fn test_n_largest() {
        let numbers = vec![1, 30, 4, 21, 100, 50, 32, 99, 2, 43];
        let largest = n_largest(3, &numbers, |x| *x as f64);
        assert_eq!(largest, vec![100, 99, 50]);
    }

    #[test]
    fn test_n_smallest() {
        let numbers = vec![1, 30, 4, 21, 100, 50, 32, 99, 2, 43];
        assert_eq!(n_smallest(3, &numbers, |x| *x as f64), vec![1, 2, 4]);
        assert_eq!(
            n_smallest(8, &numbers, |x| *x as f64),
            vec![1, 2, 4, 21, 30, 32, 43, 50]
        );
    }

    #[test]
    fn test_degenerate_sizes() {
        let numbers = vec![3, 1, 2];
        assert!(n_largest(0, &numbers, |x| *x as f64).is_empty());
        assert!(n_largest(5, &Vec::<i32>::new(), |x| *x as f64).is_empty());
        assert_eq!(n_largest(10, &numbers, |x| *x as f64), vec![3, 2, 1]);
        assert_eq!(
            n_largest_with_strategy(10, &numbers, |x| *x as f64, Some(Strategy::Heap)),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn test_choose() {
        assert_eq!(Strategy::choose(3, 10), Strategy::Heap);
        assert_eq!(Strategy::choose(5, 10), Strategy::Sort);
        assert_eq!(Strategy::choose(4, 9), Strategy::Heap);
        assert_eq!(Strategy::choose(usize::MAX, 10), Strategy::Sort);
    }

    #[test]
    fn test_strategies_agree() {
        // few distinct values so ties are common around the boundary
        let values = lcg_values(200, 42, 17);
        for n in [1, 2, 5, 17, 50, 99, 100, 101, 150, 200, 250] {
            let by_sort =
                n_largest_with_strategy(n, &values, |x| *x as f64, Some(Strategy::Sort));
            let by_heap =
                n_largest_with_strategy(n, &values, |x| *x as f64, Some(Strategy::Heap));
            assert_eq!(by_sort, by_heap, "n={}", n);

            let by_sort =
                n_smallest_with_strategy(n, &values, |x| *x as f64, Some(Strategy::Sort));
            let by_heap =
                n_smallest_with_strategy(n, &values, |x| *x as f64, Some(Strategy::Heap));
            assert_eq!(by_sort, by_heap, "n={}", n);
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = vec![("a", 1), ("b", 2), ("c", 1), ("d", 2), ("e", 1), ("f", 0)];
        for strategy in [Strategy::Sort, Strategy::Heap] {
            let res = n_largest_with_strategy(4, &items, |x| x.1 as f64, Some(strategy));
            let names = res.iter().map(|x| x.0).collect::<Vec<_>>();
            assert_eq!(names, vec!["b", "d", "a", "c"], "{:?}", strategy);

            let res = n_largest_with_strategy(2, &items, |x| x.1 as f64, Some(strategy));
            let names = res.iter().map(|x| x.0).collect::<Vec<_>>();
            assert_eq!(names, vec!["b", "d"], "{:?}", strategy);
        }
    }

    #[test]
    fn test_output_properties() {
        let values = lcg_values(333, 5, 1000);
        for n in [0, 1, 3, 10, 100, 166, 167, 333, 400] {
            let res = n_largest(n, &values, |x| *x as f64);
            assert_eq!(res.len(), n.min(values.len()));
            assert!(res.windows(2).all(|w| w[0] >= w[1]));

            // subset of the input as a multiset
            let mut pool = values.clone();
            for v in &res {
                let pos = pool.iter().position(|p| p == v).unwrap();
                pool.swap_remove(pos);
            }

            // nothing left behind beats the smallest selected
            if let Some(floor) = res.last() {
                if res.len() < values.len() {
                    assert!(pool.iter().all(|p| p <= floor));
                }
            }
        }
    }

    #[test]
    fn test_priority_fn_not_identity() {
        let words = vec!["pear", "fig", "banana", "kiwi", "apple", "plum", "date", "cherry"];
        let longest = n_largest(2, &words, |w| w.len() as f64);
        assert_eq!(longest, vec!["banana", "cherry"]);
    }
}
