//! Graph search over implicitly defined state spaces.
//!
//! All four algorithms share one skeleton: pop a node from the open
//! frontier, count it as a step, report it to the [`Observer`], stop if it
//! matches the target, otherwise expand it through [`expand_acyclic`] and
//! feed the survivors back into the frontier.
//!
//! `steps` counts nodes popped from the frontier. BFS and bounded DFS also
//! test freshly generated children against the target; a hit there ends the
//! search without adding a step.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use log::{debug, info, trace};

use crate::frontier::PriorityFrontier;
use crate::node::{Arena, Node, NodeId};

/// What a type must provide to be searched.
pub trait SearchState: Clone + Eq + Hash {
    /// Every state reachable in one move, in a fixed order.
    fn expand(&self) -> impl Iterator<Item = Self> + '_;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

/// The outcome of one search, the number of steps it took and, on success,
/// the states from start to target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<S> {
    outcome: Outcome,
    steps: u64,
    path: Vec<S>,
}

impl<S> SearchResult<S> {
    fn found(steps: u64, path: Vec<S>) -> Self {
        Self {
            outcome: Outcome::Success,
            steps,
            path,
        }
    }

    fn failed(steps: u64) -> Self {
        Self {
            outcome: Outcome::Failed,
            steps,
            path: Vec::new(),
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Moves from start to target, if the target was reached.
    pub fn depth(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }

    /// Start, intermediate states and target. Empty on failure.
    pub fn path(&self) -> &[S] {
        &self.path
    }
}

impl<S> Default for SearchResult<S> {
    fn default() -> Self {
        Self::failed(0)
    }
}

/// Receives every node a search examines.
pub trait Observer<S> {
    fn examine(&mut self, step: u64, node: &Node<S>);
}

impl<S, F> Observer<S> for F
where
    F: FnMut(u64, &Node<S>),
{
    fn examine(&mut self, step: u64, node: &Node<S>) {
        self(step, node)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl<S> Observer<S> for Silent {
    fn examine(&mut self, _step: u64, _node: &Node<S>) {}
}

fn examine<S, O: Observer<S>>(observer: &mut O, step: u64, node: &Node<S>) {
    trace!(
        "step {} depth {} cost {}",
        step,
        node.depth(),
        node.cost()
    );
    observer.examine(step, node);
}

/// Children of `id` with parent and depth assigned, minus any child equal
/// to `id` itself or one of its ancestors.
///
/// Only the node's own path is checked. A state reached earlier along a
/// different branch is generated again.
pub fn expand_acyclic<S: SearchState>(arena: &Arena<S>, id: NodeId) -> Vec<Node<S>> {
    let parent = arena.get(id);
    let depth = parent.depth() + 1;
    parent
        .expand()
        .filter(|child| !arena.lineage(id).any(|ancestor| ancestor == child))
        .map(|mut child| {
            child.set_parent(Some(id));
            child.set_depth(depth);
            child
        })
        .collect()
}

/// Breadth-first search. Children are tested against the target as soon as
/// they are generated.
pub fn bfs<S, O>(start: &S, target: &S, mut observer: O) -> SearchResult<S>
where
    S: SearchState,
    O: Observer<S>,
{
    if start == target {
        return SearchResult::found(0, vec![start.clone()]);
    }

    let mut arena = Arena::new();
    let mut open = VecDeque::new();
    let mut steps = 0;
    open.push_back(arena.insert(Node::new(start.clone())));

    while let Some(id) = open.pop_front() {
        steps += 1;
        examine(&mut observer, steps, arena.get(id));
        if arena.get(id).state() == target {
            return finish("bfs", steps, &arena, id);
        }

        for child in expand_acyclic(&arena, id) {
            let hit = child.state() == target;
            let child = arena.insert(child);
            if hit {
                examine(&mut observer, steps, arena.get(child));
                return finish("bfs", steps, &arena, child);
            }
            open.push_back(child);
        }
    }

    exhausted("bfs", steps, arena.len())
}

/// Depth-first search that never expands past `max_depth`.
///
/// Children at the bound are only tested against the target. Shallower
/// children are stacked in reverse so the first-generated one is popped
/// next.
pub fn dfs<S, O>(start: &S, target: &S, max_depth: usize, mut observer: O) -> SearchResult<S>
where
    S: SearchState,
    O: Observer<S>,
{
    if start == target {
        return SearchResult::found(0, vec![start.clone()]);
    }

    let mut arena = Arena::new();
    let mut open = vec![arena.insert(Node::new(start.clone()))];
    let mut steps = 0;

    while let Some(id) = open.pop() {
        steps += 1;
        examine(&mut observer, steps, arena.get(id));
        if arena.get(id).state() == target {
            return finish("dfs", steps, &arena, id);
        }
        if arena.get(id).depth() >= max_depth {
            continue;
        }

        for child in expand_acyclic(&arena, id).into_iter().rev() {
            if child.depth() < max_depth {
                open.push(arena.insert(child));
                continue;
            }
            examine(&mut observer, steps, &child);
            if child.state() == target {
                let leaf = arena.insert(child);
                return finish("dfs", steps, &arena, leaf);
            }
        }
    }

    exhausted("dfs", steps, arena.len())
}

/// Decides how a priority search orders nodes and when a new path to a known
/// state counts as an improvement.
trait Ranking<S> {
    const NAME: &'static str;

    /// `(key, cost)` for a freshly generated child: `key` is compared against
    /// [`Ranking::key`] of a known node, `cost` orders the frontier.
    fn rank(&self, child: &Node<S>) -> (usize, usize);

    fn key(&self, known: &Node<S>) -> usize;
}

struct Greedy<E>(E);

impl<S, E> Ranking<S> for Greedy<E>
where
    E: Fn(&Node<S>) -> usize,
{
    const NAME: &'static str = "best-first";

    fn rank(&self, child: &Node<S>) -> (usize, usize) {
        let cost = (self.0)(child);
        (cost, cost)
    }

    fn key(&self, known: &Node<S>) -> usize {
        known.cost()
    }
}

struct PathCost<G, H> {
    g: G,
    h: H,
}

impl<S, G, H> Ranking<S> for PathCost<G, H>
where
    G: Fn(&Node<S>) -> usize,
    H: Fn(&Node<S>) -> usize,
{
    const NAME: &'static str = "a*";

    fn rank(&self, child: &Node<S>) -> (usize, usize) {
        let g = (self.g)(child);
        (g, g + (self.h)(child))
    }

    fn key(&self, known: &Node<S>) -> usize {
        (self.g)(known)
    }
}

/// Greedy best-first search ordered by `evaluator`.
///
/// When a child matches a state already open or closed with a higher
/// recorded cost, that node is re-parented and re-costed instead; a closed
/// one is reopened. Otherwise the child is opened as a new node.
pub fn best_first<S, E, O>(start: &S, target: &S, evaluator: E, observer: O) -> SearchResult<S>
where
    S: SearchState,
    E: Fn(&Node<S>) -> usize,
    O: Observer<S>,
{
    priority_search(start, target, Greedy(evaluator), observer)
}

/// A* search. `g` is the path cost so far and `h` the remaining estimate.
///
/// A known node is revised only when the new path strictly improves its
/// `g`; its frontier cost then becomes the new `g + h`. With an admissible
/// `h` the first time the target is popped it is reached along a shortest
/// path.
pub fn a_star<S, G, H, O>(start: &S, target: &S, g: G, h: H, observer: O) -> SearchResult<S>
where
    S: SearchState,
    G: Fn(&Node<S>) -> usize,
    H: Fn(&Node<S>) -> usize,
    O: Observer<S>,
{
    priority_search(start, target, PathCost { g, h }, observer)
}

fn priority_search<S, R, O>(start: &S, target: &S, ranking: R, mut observer: O) -> SearchResult<S>
where
    S: SearchState,
    R: Ranking<S>,
    O: Observer<S>,
{
    if start == target {
        return SearchResult::found(0, vec![start.clone()]);
    }

    let mut arena = Arena::new();
    let mut frontier = PriorityFrontier::new();
    // Lowest-key node known for each state.
    let mut best: HashMap<S, NodeId> = HashMap::new();
    let mut steps = 0;

    let root = arena.insert(Node::new(start.clone()));
    best.insert(start.clone(), root);
    frontier.push(root, 0);

    while let Some(id) = frontier.pop() {
        steps += 1;
        examine(&mut observer, steps, arena.get(id));
        if arena.get(id).state() == target {
            debug!(
                "{}: {} open, {} closed, high water {}",
                R::NAME,
                frontier.len(),
                frontier.closed_len(),
                frontier.high_water()
            );
            return finish(R::NAME, steps, &arena, id);
        }

        for mut child in expand_acyclic(&arena, id) {
            let (key, cost) = ranking.rank(&child);
            let improved = best
                .get(child.state())
                .copied()
                .filter(|&known| key < ranking.key(arena.get(known)));

            match improved {
                Some(known) if frontier.is_open(known) => {
                    revise(&mut arena, known, &child, cost);
                    frontier.update(known, cost);
                    debug!("{}: revised open node {} to cost {}", R::NAME, known, cost);
                }
                Some(known) if frontier.is_closed(known) => {
                    revise(&mut arena, known, &child, cost);
                    frontier.reopen(known, cost);
                    debug!("{}: reopened node {} at cost {}", R::NAME, known, cost);
                }
                _ => {
                    child.set_cost(cost);
                    let unseen = (!best.contains_key(child.state())).then(|| child.state().clone());
                    let child = arena.insert(child);
                    frontier.push(child, cost);
                    if let Some(state) = unseen {
                        best.insert(state, child);
                    }
                }
            }
        }
    }

    exhausted(R::NAME, steps, arena.len())
}

/// Points `known` at the better path that `child` just found.
fn revise<S>(arena: &mut Arena<S>, known: NodeId, child: &Node<S>, cost: usize) {
    let node = arena.get_mut(known);
    node.set_parent(child.parent());
    node.set_depth(child.depth());
    node.set_cost(cost);
}

fn finish<S: Clone>(name: &str, steps: u64, arena: &Arena<S>, id: NodeId) -> SearchResult<S> {
    let path = arena.path(id);
    info!(
        "{}: reached target at depth {} after {} steps, {} nodes generated",
        name,
        path.len().saturating_sub(1),
        steps,
        arena.len()
    );
    SearchResult::found(steps, path)
}

fn exhausted<S>(name: &str, steps: u64, generated: usize) -> SearchResult<S> {
    info!(
        "{}: frontier exhausted after {} steps, {} nodes generated",
        name, steps, generated
    );
    SearchResult::failed(steps)
}
