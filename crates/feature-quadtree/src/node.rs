//! Quadtree nodes and feature-driven subdivision
//!
//! A [`Node`] covers one rectangle and owns up to four child quadrants. Nodes
//! only grow children where their [`Feature`] payload reports that a quadrant
//! spans a feature of interest.

use crate::bounds;
use geo::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extension point deciding where a tree subdivides
///
/// The payload of a node is asked once per candidate quadrant whether that
/// quadrant spans a feature. When it does, [`Feature::instance`] produces the
/// payload of the new child, which is then asked the same question one level
/// down.
pub trait Feature: Sized {
    /// Whether `rect` contains anything that needs finer subdivision.
    ///
    /// Must give the same answer for the same rectangle during one build.
    fn spans_feature(&self, _rect: &Rect<f64>) -> bool {
        false
    }

    /// Payload for a new child covering `rect`.
    ///
    /// Called only for quadrants that span a feature. Must not subdivide.
    fn instance(&self, rect: &Rect<f64>) -> Self;
}

/// A plain node never subdivides past the root.
impl Feature for () {
    fn instance(&self, _rect: &Rect<f64>) -> Self {}
}

/// Classification of a node, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    /// The node without parent
    Root,
    /// A non-root node wider than the minimum cell size
    Branch,
    /// A non-root node at or below the minimum cell size
    Leaf,
}

/// Position of a child inside its parent, matching the child slot index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    BottomLeft = 0,
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in slot order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::BottomLeft,
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
    ];

    /// Child slot index of this quadrant
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single node in the feature quadtree
#[derive(Debug, Clone)]
pub struct Node<F> {
    /// Region covered by this node
    bounds: Rect<f64>,
    /// Depth level in the tree (0 = root)
    depth: u32,
    /// Classification computed at construction
    kind: NodeKind,
    /// Child quadrants in [`Quadrant`] order, absent where nothing spans a feature
    children: [Option<Box<Node<F>>>; 4],
    /// Domain payload driving subdivision
    feature: F,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<F> Node<F> {
    /// Create a root node covering `bounds`
    pub fn root(bounds: Rect<f64>, feature: F) -> Self {
        Self {
            bounds,
            depth: 0,
            kind: NodeKind::Root,
            children: [None, None, None, None],
            feature,
        }
    }

    /// Create a child of `parent` covering `bounds`
    ///
    /// Only the width is compared against `min_size`; height plays no role.
    pub(crate) fn new_child(parent: &Node<F>, bounds: Rect<f64>, feature: F, min_size: f64) -> Self {
        let kind = if bounds.width() <= min_size {
            NodeKind::Leaf
        } else {
            NodeKind::Branch
        };

        Self {
            bounds,
            depth: parent.depth + 1,
            kind,
            children: [None, None, None, None],
            feature,
        }
    }

    /// Region covered by this node
    #[inline]
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    /// Depth level (0 = root)
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// Payload attached to this node
    #[inline]
    pub fn feature(&self) -> &F {
        &self.feature
    }

    /// Child in the given quadrant, if present
    pub fn child(&self, quadrant: Quadrant) -> Option<&Node<F>> {
        self.children[quadrant.index()].as_deref()
    }

    /// Present children in slot order
    pub fn children(&self) -> impl Iterator<Item = &Node<F>> + '_ {
        self.children.iter().filter_map(|child| child.as_deref())
    }

    /// Number of present children
    pub fn child_count(&self) -> usize {
        self.children.iter().filter(|child| child.is_some()).count()
    }

    /// Whether the point lies inside this node, edges included
    ///
    /// Points on an edge shared with a sibling are contained by both.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        bounds::contains(&self.bounds, x, y)
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Option<Box<Node<F>>>; 4] {
        &mut self.children
    }
}

impl<F: Feature> Node<F> {
    /// Recursively subdivide this node where quadrants span a feature
    ///
    /// Leaves are never subdivided. For every other node each quadrant is
    /// tested in slot order; spanning quadrants get a child which is then
    /// subdivided in turn, the others stay absent. Recursion ends only at
    /// leaves, so `min_size` must be positive; [`crate::QuadTree::build`]
    /// validates it before calling this.
    pub(crate) fn subdivide(&mut self, min_size: f64) {
        if self.kind == NodeKind::Leaf {
            return;
        }

        for (slot, rect) in bounds::quadrants(&self.bounds).into_iter().enumerate() {
            if !self.feature.spans_feature(&rect) {
                continue;
            }

            let feature = self.feature.instance(&rect);
            let mut child = Node::new_child(self, rect, feature, min_size);
            child.subdivide(min_size);
            self.children[slot] = Some(Box::new(child));
        }
    }
}
