//! The closed set of constraint variants.

use std::fmt;

use fixity_core::{ModelResult, NodeCatalog, NodeId};

use crate::multi::MultiFreedom;
use crate::retained::MultiRetained;
use crate::row::LinearRow;
use crate::single::SingleFreedom;

/// Which collection a constraint lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    SingleFreedom,
    MultiFreedom,
    MultiRetained,
}

impl ConstraintKind {
    /// All kinds, in the order the container serializes them.
    pub const ALL: [ConstraintKind; 3] = [
        ConstraintKind::SingleFreedom,
        ConstraintKind::MultiFreedom,
        ConstraintKind::MultiRetained,
    ];

    /// Label prefix used on the wire.
    pub fn prefix(&self) -> &'static str {
        match self {
            ConstraintKind::SingleFreedom => "sfreedom",
            ConstraintKind::MultiFreedom => "mfreedom",
            ConstraintKind::MultiRetained => "mrmfreedom",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.prefix() == prefix)
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// An owned constraint of any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Single(SingleFreedom),
    Multi(MultiFreedom),
    Retained(MultiRetained),
}

impl Constraint {
    /// Borrow as a variant view.
    pub fn view(&self) -> ConstraintRef<'_> {
        match self {
            Constraint::Single(c) => ConstraintRef::Single(c),
            Constraint::Multi(c) => ConstraintRef::Multi(c),
            Constraint::Retained(c) => ConstraintRef::Retained(c),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.view().kind()
    }

    pub fn node(&self) -> NodeId {
        self.view().node()
    }

    pub fn dof_count(&self) -> usize {
        self.view().dof_count()
    }

    pub fn retained_nodes(&self) -> Vec<NodeId> {
        self.view().retained_nodes()
    }

    pub fn rows(&self) -> Vec<LinearRow> {
        self.view().rows()
    }

    /// Check coefficient shapes. Single-freedom constraints have none to check.
    pub fn check_shape(&self) -> ModelResult<()> {
        match self {
            Constraint::Single(_) => Ok(()),
            Constraint::Multi(c) => c.check_shape(),
            Constraint::Retained(c) => c.check_shape(),
        }
    }

    /// Move the owning node, validating the constrained DOFs against the catalog.
    pub fn set_node<C: NodeCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        node: NodeId,
    ) -> ModelResult<()> {
        match self {
            Constraint::Single(c) => c.set_node(catalog, node),
            Constraint::Multi(c) => c.set_node(catalog, node),
            Constraint::Retained(c) => c.set_node(catalog, node),
        }
    }

    pub fn as_single(&self) -> Option<&SingleFreedom> {
        match self {
            Constraint::Single(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&MultiFreedom> {
        match self {
            Constraint::Multi(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_retained(&self) -> Option<&MultiRetained> {
        match self {
            Constraint::Retained(c) => Some(c),
            _ => None,
        }
    }
}

impl From<SingleFreedom> for Constraint {
    fn from(c: SingleFreedom) -> Self {
        Constraint::Single(c)
    }
}

impl From<MultiFreedom> for Constraint {
    fn from(c: MultiFreedom) -> Self {
        Constraint::Multi(c)
    }
}

impl From<MultiRetained> for Constraint {
    fn from(c: MultiRetained) -> Self {
        Constraint::Retained(c)
    }
}

/// A borrowed constraint of any variant, as returned by container lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintRef<'a> {
    Single(&'a SingleFreedom),
    Multi(&'a MultiFreedom),
    Retained(&'a MultiRetained),
}

impl<'a> ConstraintRef<'a> {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            ConstraintRef::Single(_) => ConstraintKind::SingleFreedom,
            ConstraintRef::Multi(_) => ConstraintKind::MultiFreedom,
            ConstraintRef::Retained(_) => ConstraintKind::MultiRetained,
        }
    }

    /// The owning (constrained) node.
    pub fn node(&self) -> NodeId {
        match self {
            ConstraintRef::Single(c) => c.node(),
            ConstraintRef::Multi(c) => c.node(),
            ConstraintRef::Retained(c) => c.node(),
        }
    }

    /// Number of constrained DOFs.
    pub fn dof_count(&self) -> usize {
        match self {
            ConstraintRef::Single(c) => c.dof_count(),
            ConstraintRef::Multi(c) => c.dof_count(),
            ConstraintRef::Retained(c) => c.dof_count(),
        }
    }

    /// Nodes the constrained node depends on (empty for single-freedom).
    pub fn retained_nodes(&self) -> Vec<NodeId> {
        match self {
            ConstraintRef::Single(_) => Vec::new(),
            ConstraintRef::Multi(c) => c.retained_nodes(),
            ConstraintRef::Retained(c) => c.retained_nodes(),
        }
    }

    /// Rows this constraint contributes to the reduced system.
    pub fn rows(&self) -> Vec<LinearRow> {
        match self {
            ConstraintRef::Single(c) => c.rows(),
            ConstraintRef::Multi(c) => c.rows(),
            ConstraintRef::Retained(c) => c.rows(),
        }
    }

    pub fn to_constraint(&self) -> Constraint {
        match *self {
            ConstraintRef::Single(c) => Constraint::Single(c.clone()),
            ConstraintRef::Multi(c) => Constraint::Multi(c.clone()),
            ConstraintRef::Retained(c) => Constraint::Retained(c.clone()),
        }
    }

    pub fn as_single(&self) -> Option<&'a SingleFreedom> {
        match *self {
            ConstraintRef::Single(c) => Some(c),
            _ => None,
        }
    }
}
