use std::cmp::Ordering;

/// element stored in `HeapQ`
#[derive(Debug, Clone)]
struct Item<T> {
    value: T,
    priority: f64,
    // insertion order, breaks priority ties
    seq: u64,
    // slot of this item in `HeapQ::queue`
    position: usize,
}

impl<T> Item<T> {
    /// heap order: priority ascending (`f64::total_cmp`, so NaN is ordered too),
    /// then the most recently pushed item first.
    fn less(&self, other: &Item<T>) -> bool {
        match self.priority.total_cmp(&other.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.seq > other.seq,
        }
    }
}

/// Binary min-heap of values keyed by an explicit `f64` priority.
///
/// The smallest priority sits at the root. Among equal priorities the most
/// recently pushed value pops first, which keeps the "n largest" selection
/// built on top of it stable with respect to input order.
///
/// ```
/// use rankkits::collections_ext::HeapQ;
///
/// let mut heap = HeapQ::new();
/// heap.push("five", 5.0);
/// heap.push("three", 3.0);
/// heap.push("eight", 8.0);
/// assert_eq!(heap.peek(), Some(&"three"));
/// assert_eq!(heap.push_pop("one", 1.0), "one");
/// assert_eq!(heap.push_pop("nine", 9.0), "three");
/// assert_eq!(heap.into_sorted_vec(), vec!["five", "eight", "nine"]);
/// ```
#[derive(Debug, Clone)]
pub struct HeapQ<T> {
    queue: Vec<Item<T>>,
    next_seq: u64,
}

impl<T> Default for HeapQ<T> {
    fn default() -> Self {
        Self {
            queue: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> HeapQ<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// build a heap from `items` in linear time
    pub fn heapify<I, F>(items: I, priority_fn: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> f64,
    {
        let mut heap = HeapQ::new();
        for value in items {
            let priority = priority_fn(&value);
            let item = heap.new_item(value, priority, heap.queue.len());
            heap.queue.push(item);
        }
        for idx in (0..heap.queue.len() / 2).rev() {
            heap.sift_down(idx);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn push(&mut self, value: T, priority: f64) {
        let position = self.queue.len();
        let item = self.new_item(value, priority, position);
        self.queue.push(item);
        self.sift_up(position);
    }

    /// remove and return the value with the smallest priority
    pub fn pop(&mut self) -> Option<T> {
        if self.queue.is_empty() {
            return None;
        }
        let last = self.queue.len() - 1;
        self.swap(0, last);
        let item = self.queue.pop()?;
        if !self.queue.is_empty() {
            self.sift_down(0);
        }
        Some(item.value)
    }

    /// Push `value` then pop the minimum, in one sift.
    ///
    /// When `priority` is not strictly greater than the current minimum, `value`
    /// would be popped right back, so it is returned without touching the heap.
    /// An empty heap returns `value` and stays empty.
    pub fn push_pop(&mut self, value: T, priority: f64) -> T {
        let replace = match self.queue.first() {
            Some(root) => priority.total_cmp(&root.priority).is_gt(),
            None => false,
        };
        if !replace {
            return value;
        }

        let seq = self.bump_seq();
        let root = &mut self.queue[0];
        root.priority = priority;
        root.seq = seq;
        let old = std::mem::replace(&mut root.value, value);
        self.sift_down(0);
        old
    }

    pub fn peek(&self) -> Option<&T> {
        self.queue.first().map(|item| &item.value)
    }

    pub fn peek_priority(&self) -> Option<f64> {
        self.queue.first().map(|item| item.priority)
    }

    /// drain the heap, smallest priority first
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut res = Vec::with_capacity(self.queue.len());
        while let Some(value) = self.pop() {
            res.push(value);
        }
        res
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn new_item(&mut self, value: T, priority: f64, position: usize) -> Item<T> {
        Item {
            value,
            priority,
            seq: self.bump_seq(),
            position,
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.queue[pos].less(&self.queue[parent]) {
                break;
            }
            self.swap(parent, pos);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.queue.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.queue[left].less(&self.queue[smallest]) {
                smallest = left;
            }
            if right < len && self.queue[right].less(&self.queue[smallest]) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        debug_assert_eq!(self.queue[i].position, i);
        debug_assert_eq!(self.queue[j].position, j);
        self.queue.swap(i, j);
        self.queue[i].position = i;
        self.queue[j].position = j;
    }

    #[cfg(test)]
    fn check_invariant(&self) {
        for (idx, item) in self.queue.iter().enumerate() {
            assert_eq!(item.position, idx);
            if idx > 0 {
                let parent = &self.queue[(idx - 1) / 2];
                assert!(!item.less(parent), "heap order broken at {}", idx);
            }
        }
    }
}
