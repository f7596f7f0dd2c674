//! Line-segment primitives for wireframe scenes
use crate::vector::Vector3;

/// A straight line between two world-space points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vector3,
    pub end: Vector3,
}

impl LineSegment {
    pub fn new(start: Vector3, end: Vector3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// A 3D wireframe composed of line segments
#[derive(Debug, Clone, Default)]
pub struct Wireframe {
    pub segments: Vec<LineSegment>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    pub fn extend(&mut self, other: Wireframe) {
        self.segments.extend(other.segments);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Floor grid of unit cells spanning `-extent..extent` on X and Z.
    ///
    /// Every cell contributes its edge along +Z and its edge along +X.
    pub fn grid(extent: i32, height: f64) -> Self {
        let extent = extent.max(0);
        let side = (2 * extent) as usize;
        let mut grid = Self::with_capacity(side * side * 2);

        for z in -extent..extent {
            for x in -extent..extent {
                let corner = Vector3::new(x as f64, height, z as f64);
                grid.push(LineSegment::new(corner, Vector3::new(x as f64, height, (z + 1) as f64)));
            }
        }
        for z in -extent..extent {
            for x in -extent..extent {
                let corner = Vector3::new(x as f64, height, z as f64);
                grid.push(LineSegment::new(corner, Vector3::new((x + 1) as f64, height, z as f64)));
            }
        }

        grid
    }

    /// Axis-aligned cube edges centred on `center`
    pub fn cube(center: Vector3, size: f64) -> Self {
        let half = size / 2.0;
        let corner = |sx: f64, sy: f64, sz: f64| center + Vector3::new(sx * half, sy * half, sz * half);

        let corners = [
            corner(-1.0, -1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(1.0, 1.0, -1.0),
            corner(-1.0, 1.0, -1.0),
            corner(-1.0, -1.0, 1.0),
            corner(1.0, -1.0, 1.0),
            corner(1.0, 1.0, 1.0),
            corner(-1.0, 1.0, 1.0),
        ];
        const EDGES: [(usize, usize); 12] = [
            // back face
            (0, 1), (1, 2), (2, 3), (3, 0),
            // front face
            (4, 5), (5, 6), (6, 7), (7, 4),
            // connecting edges
            (0, 4), (1, 5), (2, 6), (3, 7),
        ];

        let mut cube = Self::with_capacity(EDGES.len());
        for (a, b) in EDGES {
            cube.push(LineSegment::new(corners[a], corners[b]));
        }
        cube
    }
}
