pub mod counter;
pub mod heapq;
pub mod select;

pub use counter::{count_tokens, CountItem, Counter};
pub use heapq::HeapQ;
pub use select::{n_largest, n_largest_with_strategy, n_smallest, n_smallest_with_strategy, Strategy};
