//! Cell types and their topology.
//!
//! Point ordering follows the usual unstructured-grid conventions: polygons are
//! listed counter-clockwise, a hexahedron lists its bottom face (0-3) then its
//! top face (4-7) with vertex `i + 4` above vertex `i`.

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// The kind of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// A single point.
    Vertex,
    /// A straight segment (2 points).
    Line,
    /// A triangle (3 points).
    Triangle,
    /// A quadrilateral (4 points).
    Quad,
    /// A planar polygon (3 or more points).
    Polygon,
    /// A tetrahedron (4 points).
    Tetra,
    /// A hexahedron (8 points).
    Hexahedron,
}

impl CellKind {
    /// Returns the topological dimension of the cell kind.
    pub fn dimension(self) -> u8 {
        match self {
            Self::Vertex => 0,
            Self::Line => 1,
            Self::Triangle | Self::Quad | Self::Polygon => 2,
            Self::Tetra | Self::Hexahedron => 3,
        }
    }

    fn arity(self) -> Option<usize> {
        match self {
            Self::Vertex => Some(1),
            Self::Line => Some(2),
            Self::Triangle => Some(3),
            Self::Quad | Self::Tetra => Some(4),
            Self::Hexahedron => Some(8),
            Self::Polygon => None,
        }
    }
}

const TET_EDGES: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];

const HEX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

// Outward-facing (counter-clockwise seen from outside) for a positively oriented cell.
const TET_FACES: [[usize; 3]; 4] = [[0, 1, 3], [1, 2, 3], [2, 0, 3], [0, 2, 1]];

const HEX_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

// Six tetrahedra around the 0-6 diagonal. Face diagonals of neighbouring
// hexahedra in a structured grid coincide, so the decomposition is conforming.
const HEX_TO_TET_PATTERN: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

/// A cell: a kind plus the ids of its points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    kind: CellKind,
    points: Vec<u32>,
}

impl Cell {
    /// Creates a cell, checking the point count against the kind.
    pub fn new(kind: CellKind, points: Vec<u32>) -> Result<Self> {
        let ok = match kind.arity() {
            Some(n) => points.len() == n,
            None => points.len() >= 3,
        };
        if !ok {
            return Err(FilterError::InvalidArgument(format!(
                "{kind:?} cell cannot have {} points",
                points.len()
            )));
        }
        Ok(Self { kind, points })
    }

    /// Creates a cell whose arity the caller already guarantees.
    pub(crate) fn from_raw(kind: CellKind, points: Vec<u32>) -> Self {
        debug_assert!(Self::new(kind, points.clone()).is_ok());
        Self { kind, points }
    }

    pub fn vertex(p: u32) -> Self {
        Self {
            kind: CellKind::Vertex,
            points: vec![p],
        }
    }

    pub fn line(a: u32, b: u32) -> Self {
        Self {
            kind: CellKind::Line,
            points: vec![a, b],
        }
    }

    pub fn triangle(points: [u32; 3]) -> Self {
        Self {
            kind: CellKind::Triangle,
            points: points.to_vec(),
        }
    }

    pub fn quad(points: [u32; 4]) -> Self {
        Self {
            kind: CellKind::Quad,
            points: points.to_vec(),
        }
    }

    pub fn tetra(points: [u32; 4]) -> Self {
        Self {
            kind: CellKind::Tetra,
            points: points.to_vec(),
        }
    }

    pub fn hexahedron(points: [u32; 8]) -> Self {
        Self {
            kind: CellKind::Hexahedron,
            points: points.to_vec(),
        }
    }

    /// Creates the best-fitting 2D cell for a ring of points.
    ///
    /// Rings of 3 and 4 points become triangles and quads, longer rings polygons.
    /// The ring must have at least 3 points; [`Cell::new`] validates arbitrary
    /// input.
    pub(crate) fn from_ring(points: Vec<u32>) -> Self {
        debug_assert!(points.len() >= 3, "a ring needs at least 3 points");
        let kind = match points.len() {
            3 => CellKind::Triangle,
            4 => CellKind::Quad,
            _ => CellKind::Polygon,
        };
        Self { kind, points }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn points(&self) -> &[u32] {
        &self.points
    }

    pub fn dimension(&self) -> u8 {
        self.kind.dimension()
    }

    /// Returns the edges of the cell as point-id pairs.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let p = &self.points;
        match self.kind {
            CellKind::Vertex => Vec::new(),
            CellKind::Line => vec![[p[0], p[1]]],
            CellKind::Triangle | CellKind::Quad | CellKind::Polygon => (0..p.len())
                .map(|i| [p[i], p[(i + 1) % p.len()]])
                .collect(),
            CellKind::Tetra => TET_EDGES.iter().map(|[a, b]| [p[*a], p[*b]]).collect(),
            CellKind::Hexahedron => HEX_EDGES.iter().map(|[a, b]| [p[*a], p[*b]]).collect(),
        }
    }

    /// Returns the boundary faces of a 3D cell as point-id rings.
    ///
    /// Lower-dimensional cells have no faces.
    pub fn faces(&self) -> Vec<Vec<u32>> {
        let p = &self.points;
        match self.kind {
            CellKind::Tetra => TET_FACES
                .iter()
                .map(|f| f.iter().map(|&i| p[i]).collect())
                .collect(),
            CellKind::Hexahedron => HEX_FACES
                .iter()
                .map(|f| f.iter().map(|&i| p[i]).collect())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Decomposes a 3D cell into tetrahedra.
    pub fn tetrahedra(&self) -> Vec<[u32; 4]> {
        let p = &self.points;
        match self.kind {
            CellKind::Tetra => vec![[p[0], p[1], p[2], p[3]]],
            CellKind::Hexahedron => HEX_TO_TET_PATTERN
                .iter()
                .map(|t| [p[t[0]], p[t[1]], p[t[2]], p[t[3]]])
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Decomposes a 2D cell into a triangle fan.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        if self.dimension() != 2 {
            return Vec::new();
        }
        let p = &self.points;
        (1..p.len() - 1).map(|i| [p[0], p[i], p[i + 1]]).collect()
    }
}
