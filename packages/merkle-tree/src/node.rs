use crate::hash::{Digest, Hasher};

/// An immutable tree vertex.
///
/// A node exclusively owns its children. The shape is one of three kinds, so
/// a leaf can never carry children and an internal node can never be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    digest: Digest,
    kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum NodeKind {
    Leaf,
    /// Unpaired last node of an odd-length level, carried up unchanged.
    Promoted(Box<Node>),
    Inner(Box<Node>, Box<Node>),
}

impl Node {
    pub(crate) fn leaf(digest: Digest) -> Self {
        Self {
            digest,
            kind: NodeKind::Leaf,
        }
    }

    /// Wraps `child` one level up without rehashing.
    pub(crate) fn promoted(child: Node) -> Self {
        Self {
            digest: child.digest,
            kind: NodeKind::Promoted(Box::new(child)),
        }
    }

    pub(crate) fn inner<H: Hasher>(hasher: &H, left: Node, right: Node) -> Self {
        Self {
            digest: hasher.combine(&left.digest, &right.digest),
            kind: NodeKind::Inner(Box::new(left), Box::new(right)),
        }
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    pub fn left(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Leaf => None,
            NodeKind::Promoted(left) | NodeKind::Inner(left, _) => Some(&**left),
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Inner(_, right) => Some(&**right),
            _ => None,
        }
    }

    /// Iterates over the present children, left first.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.left().into_iter().chain(self.right())
    }
}
