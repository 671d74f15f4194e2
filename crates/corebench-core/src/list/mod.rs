//! Takeuchi-style list benchmark.
//!
//! Three descending lists are merged by the mutually recursive `tail`
//! function. The call tree is sensitive to the exact list lengths, which is
//! what makes the result a good probe for call/return correctness.
//!
//! Nodes live in a per-run [`ListArena`] and link to their successor by
//! index. The empty chain is `None`.

use crate::benchmark::{Benchmark, DepthGuard, DEFAULT_MAX_DEPTH};
use crate::error::{BenchError, Result};


/// Lengths of the `x`, `y` and `z` lists.
pub const LIST_SIZES: [usize; 3] = [15, 10, 6];

/// Length of the chain `tail` returns for [`LIST_SIZES`].
pub const EXPECTED_LENGTH: usize = 10;

/// Index of a node inside its [`ListArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    value: i64,
    next: Option<NodeId>,
}

/// Owner of every node built during one run.
#[derive(Debug, Default)]
pub struct ListArena {
    nodes: Vec<Node>,
}

impl ListArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds `length -> length-1 -> ... -> 1` and returns its head.
    ///
    /// # Example
    ///
    /// ```
    /// use corebench_core::list::ListArena;
    ///
    /// let mut arena = ListArena::new();
    /// let head = arena.make_list(3);
    /// assert_eq!(arena.len(head), 3);
    /// assert_eq!(arena.values(head), vec![3, 2, 1]);
    /// assert_eq!(arena.make_list(0), None);
    /// ```
    pub fn make_list(&mut self, length: usize) -> Option<NodeId> {
        (1..=length).fold(None, |next, value| Some(self.alloc(value as i64, next)))
    }

    fn alloc(&mut self, value: i64, next: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { value, next });
        id
    }

    pub fn value(&self, node: NodeId) -> i64 {
        self.nodes[node.0].value
    }

    pub fn next(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].next
    }

    /// Number of nodes reachable from `head`.
    pub fn len(&self, head: Option<NodeId>) -> usize {
        let mut length = 0;
        let mut cursor = head;
        while let Some(node) = cursor {
            length += 1;
            cursor = self.next(node);
        }
        length
    }

    /// Values along the chain starting at `head`.
    pub fn values(&self, head: Option<NodeId>) -> Vec<i64> {
        let mut values = Vec::new();
        let mut cursor = head;
        while let Some(node) = cursor {
            values.push(self.value(node));
            cursor = self.next(node);
        }
        values
    }

    /// True when `x` runs out while `y` still has elements.
    pub fn is_shorter_than(&self, x: Option<NodeId>, y: Option<NodeId>) -> bool {
        self.walk_lockstep(x, y).0
    }

    /// Lockstep comparison that also reports how many steps it took.
    ///
    /// Stops as soon as either chain is exhausted, so the step count never
    /// exceeds `min(len(x), len(y)) + 1`.
    pub fn walk_lockstep(&self, x: Option<NodeId>, y: Option<NodeId>) -> (bool, usize) {
        let mut x_tail = x;
        let mut y_tail = y;
        let mut steps = 0;

        while let Some(y_node) = y_tail {
            steps += 1;
            let Some(x_node) = x_tail else {
                return (true, steps);
            };
            x_tail = self.next(x_node);
            y_tail = self.next(y_node);
        }
        (false, steps)
    }
}

/// Statistics of one `tail` evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailTrace {
    /// Length of the returned chain.
    pub length: usize,
    /// Number of `tail` invocations.
    pub calls: u64,
    /// Deepest recursion reached.
    pub peak_depth: usize,
}

struct TailContext<'a> {
    arena: &'a ListArena,
    depth: DepthGuard,
    calls: u64,
}

impl TailContext<'_> {
    fn tail(
        &mut self,
        x: Option<NodeId>,
        y: Option<NodeId>,
        z: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        self.depth.enter()?;
        let result = self.tail_frame(x, y, z);
        self.depth.leave();
        result
    }

    fn tail_frame(
        &mut self,
        x: Option<NodeId>,
        y: Option<NodeId>,
        z: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        self.calls += 1;
        if !self.arena.is_shorter_than(y, x) {
            return Ok(z);
        }
        let first = self.tail(self.next_of(x)?, y, z)?;
        let second = self.tail(self.next_of(y)?, z, x)?;
        let third = self.tail(self.next_of(z)?, x, y)?;
        self.tail(first, second, third)
    }

    fn next_of(&self, node: Option<NodeId>) -> Result<Option<NodeId>> {
        node.map(|n| self.arena.next(n))
            .ok_or_else(|| BenchError::IllegalState("next of an empty list".to_string()))
    }
}

/// Builds three lists, merges them with `tail` and measures the result.
#[derive(Debug, Clone)]
pub struct ListBenchmark {
    sizes: [usize; 3],
    max_depth: usize,
}

impl ListBenchmark {
    pub fn new() -> Self {
        Self {
            sizes: LIST_SIZES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the list lengths. [`verify`](Benchmark::verify) only knows
    /// the answer for [`LIST_SIZES`].
    pub fn with_sizes(mut self, sizes: [usize; 3]) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn sizes(&self) -> [usize; 3] {
        self.sizes
    }

    /// Runs the benchmark and reports call statistics alongside the length.
    pub fn trace(&self) -> Result<TailTrace> {
        let mut arena = ListArena::new();
        let [x_len, y_len, z_len] = self.sizes;
        let x = arena.make_list(x_len);
        let y = arena.make_list(y_len);
        let z = arena.make_list(z_len);

        let mut ctx = TailContext {
            arena: &arena,
            depth: DepthGuard::new(self.max_depth),
            calls: 0,
        };
        let result = ctx.tail(x, y, z)?;

        Ok(TailTrace {
            length: arena.len(result),
            calls: ctx.calls,
            peak_depth: ctx.depth.peak(),
        })
    }
}

impl Default for ListBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

impl Benchmark for ListBenchmark {
    type Output = usize;

    fn name(&self) -> &'static str {
        "list"
    }

    fn params(&self) -> String {
        let [x, y, z] = self.sizes;
        format!("sizes={x}/{y}/{z}")
    }

    fn run(&self) -> Result<usize> {
        self.trace().map(|trace| trace.length)
    }

    fn verify(&self, output: &usize) -> Result<bool> {
        if self.sizes != LIST_SIZES {
            return Err(BenchError::Configuration(format!(
                "no list oracle for sizes {:?}",
                self.sizes
            )));
        }
        Ok(*output == EXPECTED_LENGTH)
    }
}
