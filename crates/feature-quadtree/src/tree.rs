//! Quadtree builder: subdivision, pruning and traversal
//!
//! [`QuadTree::build`] drives the three passes over a root [`Node`]:
//!
//! 1. **Subdivide**: grow children wherever the root's feature asks for it
//! 2. **Prune**: drop child slots that lead to no leaf (see [`PruneMode`])
//! 3. **Traverse**: flatten the survivors in pre-order into all nodes and leaves

use crate::{Config, Feature, Node, PruneMode, Result, bounds};
use rayon::prelude::*;
use smallvec::SmallVec;

/// Summary of a completed build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildStats {
    /// Nodes surviving pruning, root included
    pub node_count: usize,
    /// Leaf nodes surviving pruning
    pub leaf_count: usize,
    /// Deepest leaf, never below the configured initial max depth
    pub max_depth: u32,
    /// Child slots cleared by pruning
    pub pruned_count: usize,
}

/// A built and pruned quadtree
#[derive(Debug, Clone)]
pub struct QuadTree<F> {
    /// Root of the pruned hierarchy
    root: Node<F>,
    /// Configuration the tree was built with
    config: Config,
    /// Counts gathered right after pruning
    stats: BuildStats,
}

/// Pre-order flattening of a node hierarchy
///
/// Every call to [`Traversal::visit`] appends; visiting the same hierarchy
/// twice lists every node twice.
#[derive(Debug)]
pub struct Traversal<'a, F> {
    all_nodes: Vec<&'a Node<F>>,
    leaves: Vec<&'a Node<F>>,
    max_depth: u32,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<F: Feature> QuadTree<F> {
    /// Subdivide, prune and index the hierarchy below `root`
    ///
    /// Fails before touching the root when the configuration or the root
    /// rectangle is unusable.
    pub fn build(mut root: Node<F>, config: Config) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("quadtree::build");

        config.validate()?;
        bounds::validate(&root.bounds())?;
        bounds::check_splittable(&root.bounds())?;

        if !bounds::is_square(&root.bounds()) {
            tracing::warn!(
                "Root rectangle {:?} is taller than wide; quadrant heights are derived from the width",
                root.bounds()
            );
        }

        root.subdivide(config.min_size);

        let mut pruned_count = 0;
        prune(&mut root, config.prune_mode, &mut pruned_count);

        let traversal = Traversal::from_root(&root, config.initial_max_depth);
        let stats = BuildStats {
            node_count: traversal.all_nodes.len(),
            leaf_count: traversal.leaves.len(),
            max_depth: traversal.max_depth,
            pruned_count,
        };

        tracing::debug!(
            "Built quadtree: {} nodes, {} leaves, max depth {}, {} pruned ({:?})",
            stats.node_count,
            stats.leaf_count,
            stats.max_depth,
            stats.pruned_count,
            config.prune_mode
        );

        Ok(Self {
            root,
            config,
            stats,
        })
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<F: Feature + Send> QuadTree<F> {
    /// Build several independent trees in parallel
    ///
    /// All trees share `config`. Results keep the order of `roots`; the first
    /// failing root aborts the batch with its error.
    pub fn build_many(roots: Vec<Node<F>>, config: &Config) -> Result<Vec<Self>> {
        #[cfg(feature = "profiling")]
        profiling::scope!("quadtree::build_many");

        config.validate()?;

        roots
            .into_par_iter()
            .map(|root| Self::build(root, config.clone()))
            .collect()
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<F> QuadTree<F> {
    /// Root of the pruned hierarchy
    pub fn root(&self) -> &Node<F> {
        &self.root
    }

    /// Take back ownership of the pruned hierarchy
    pub fn into_root(self) -> Node<F> {
        self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Deepest leaf depth, starting from the configured initial max depth
    pub fn max_depth(&self) -> u32 {
        self.stats.max_depth
    }

    /// Flatten the tree into all nodes and leaves
    ///
    /// Each call starts from empty sequences.
    pub fn traverse(&self) -> Traversal<'_, F> {
        Traversal::from_root(&self.root, self.config.initial_max_depth)
    }

    /// Leaf nodes in pre-order
    pub fn leaves(&self) -> Vec<&Node<F>> {
        self.traverse().leaves
    }

    /// All surviving nodes in pre-order
    pub fn all_nodes(&self) -> Vec<&Node<F>> {
        self.traverse().all_nodes
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<'a, F> Traversal<'a, F> {
    /// Empty traversal whose max depth starts at `initial_max_depth`
    pub fn new(initial_max_depth: u32) -> Self {
        Self {
            all_nodes: Vec::new(),
            leaves: Vec::new(),
            max_depth: initial_max_depth,
        }
    }

    fn from_root(root: &'a Node<F>, initial_max_depth: u32) -> Self {
        let mut traversal = Self::new(initial_max_depth);
        traversal.visit(root);
        traversal
    }

    /// Append `node` and its present descendants in pre-order
    ///
    /// A node comes before its children; children follow slot order. Leaves
    /// are also appended to the leaf list and may raise the max depth.
    pub fn visit(&mut self, node: &'a Node<F>) {
        let mut stack: SmallVec<[&'a Node<F>; 32]> = SmallVec::new();
        stack.push(node);

        while let Some(node) = stack.pop() {
            self.all_nodes.push(node);
            if node.is_leaf() {
                self.leaves.push(node);
                if node.depth() > self.max_depth {
                    self.max_depth = node.depth();
                }
            }

            // Reversed so the lowest slot is popped first
            let children: SmallVec<[&'a Node<F>; 4]> = node.children().collect();
            stack.extend(children.into_iter().rev());
        }
    }

    /// All visited nodes in pre-order
    pub fn all_nodes(&self) -> &[&'a Node<F>] {
        &self.all_nodes
    }

    /// Visited leaf nodes, in the same order as [`Traversal::all_nodes`]
    pub fn leaves(&self) -> &[&'a Node<F>] {
        &self.leaves
    }

    /// Deepest visited leaf, or the initial value if no leaf went deeper
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

/// Clear child slots leading to no leaf and return the leaf count below `node`
///
/// Post-order. A leaf counts as one and is never removed. Which children are
/// removed depends on `mode`:
///
/// - [`PruneMode::Cumulative`]: a child goes when the running total is still
///   zero after adding its count, so once a sibling earlier in slot order
///   contributed a leaf no later sibling is removed.
/// - [`PruneMode::PerChild`]: a child goes when its own count is zero.
pub(crate) fn prune<F>(node: &mut Node<F>, mode: PruneMode, pruned_count: &mut usize) -> usize {
    if node.is_leaf() {
        return 1;
    }

    let mut leaf_count = 0;
    for slot in node.children_mut().iter_mut() {
        let Some(child) = slot.as_deref_mut() else {
            continue;
        };

        let child_leaves = prune(child, mode, pruned_count);
        leaf_count += child_leaves;

        let remove = match mode {
            PruneMode::Cumulative => leaf_count == 0,
            PruneMode::PerChild => child_leaves == 0,
        };
        if remove {
            tracing::trace!(
                "Pruning {:?} at depth {} ({:?})",
                child.bounds(),
                child.depth(),
                mode
            );
            *slot = None;
            *pruned_count += 1;
        }
    }

    leaf_count
}
