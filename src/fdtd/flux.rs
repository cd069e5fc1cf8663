//! Flux planes: surfaces through which the Poynting flux is integrated.

use std::ops::Range;

/// A flux plane resolved onto a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FluxPlane {
    /// Single node of a 1D volume
    OneD {
        /// Index of the electric node the plane passes through
        k: usize,
    },
    /// Constant-z annulus of a cylindrical volume
    Cylindrical {
        /// Axial index of the plane
        k: usize,
        /// Radial cells covered by the plane
        i_range: Range<usize>,
    },
}

/// Handle to a flux plane registered on a `Fields` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FluxPlaneId(pub(crate) usize);

impl FluxPlaneId {
    /// Registration order of this plane.
    pub fn index(&self) -> usize {
        self.0
    }
}
