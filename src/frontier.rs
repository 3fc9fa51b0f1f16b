use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// A frontier entry as handed back by [Frontier::pop]: the flat cell index and the cost the cell
/// had when it was pushed. Entries whose cost no longer matches the recorded cost are stale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontierEntry {
    pub index: usize,
    pub cost: f64,
}

/// Heap element of [Frontier::Priority].
pub struct SmallestCostHolder {
    estimated_cost: f64,
    cost: f64,
    sequence: usize,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then the larger cost (deeper node), then whichever entry
        // was pushed first so that ties resolve the same way on every run.
        other
            .estimated_cost
            .total_cmp(&self.estimated_cost)
            .then_with(|| self.cost.total_cmp(&other.cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Ordering policy for discovered-but-not-yet-expanded cells.
pub enum Frontier {
    /// First-in-first-out queue; the key is ignored.
    Fifo(VecDeque<FrontierEntry>),
    /// Min-priority queue on the key. A cell may be present several times.
    Priority {
        heap: BinaryHeap<SmallestCostHolder>,
        pushed: usize,
    },
}

impl Frontier {
    pub fn fifo() -> Frontier {
        Frontier::Fifo(VecDeque::new())
    }

    pub fn priority() -> Frontier {
        Frontier::Priority {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }

    /// Adds the cell at `index`, reached with `cost`, ordered by `key`.
    pub fn push(&mut self, index: usize, cost: f64, key: f64) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(FrontierEntry { index, cost }),
            Frontier::Priority { heap, pushed } => {
                heap.push(SmallestCostHolder {
                    estimated_cost: key,
                    cost,
                    sequence: *pushed,
                    index,
                });
                *pushed += 1;
            }
        }
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Priority { heap, .. } => heap.pop().map(|holder| FrontierEntry {
                index: holder.index,
                cost: holder.cost,
            }),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Fifo(queue) => queue.len(),
            Frontier::Priority { heap, .. } => heap.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(frontier: &mut Frontier) -> Vec<usize> {
        std::iter::from_fn(|| frontier.pop().map(|e| e.index)).collect()
    }

    #[test]
    fn fifo_ignores_key() {
        let mut frontier = Frontier::fifo();
        frontier.push(3, 0.0, 9.0);
        frontier.push(1, 0.0, 1.0);
        frontier.push(2, 0.0, 5.0);
        assert_eq!(frontier.len(), 3);
        assert_eq!(drain(&mut frontier), vec![3, 1, 2]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn priority_pops_smallest_key() {
        let mut frontier = Frontier::priority();
        frontier.push(0, 4.0, 4.0);
        frontier.push(1, 1.5, 1.5);
        frontier.push(2, 2.0, 2.0);
        assert_eq!(drain(&mut frontier), vec![1, 2, 0]);
    }

    #[test]
    fn priority_ties_prefer_larger_cost_then_insertion_order() {
        let mut frontier = Frontier::priority();
        frontier.push(0, 1.0, 5.0);
        frontier.push(1, 3.0, 5.0);
        frontier.push(2, 1.0, 5.0);
        assert_eq!(drain(&mut frontier), vec![1, 0, 2]);
    }

    #[test]
    fn pop_returns_pushed_cost() {
        let mut frontier = Frontier::priority();
        frontier.push(7, 2.5, 3.5);
        assert_eq!(frontier.pop(), Some(FrontierEntry { index: 7, cost: 2.5 }));
        assert_eq!(frontier.pop(), None);
    }
}
