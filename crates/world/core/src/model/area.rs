//! Region predicates over world coordinates.
//!
//! An [`Area`] is used both as a navigation target ("walk into the bank") and
//! as a membership test ("is the actor inside the marketplace?").

use super::Position;

/// A region of tiles on a single plane.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum Area {
    /// Axis-aligned rectangle, inclusive on every edge.
    Rectangle {
        min: (i32, i32),
        max: (i32, i32),
        #[cfg_attr(feature = "serde", serde(default))]
        plane: u8,
    },
    /// Simple polygon; a tile is inside when its centre is inside or on the boundary.
    Polygon {
        vertices: Vec<(i32, i32)>,
        #[cfg_attr(feature = "serde", serde(default))]
        plane: u8,
    },
}

impl Area {
    /// Rectangle spanned by two opposite corners given in any order.
    pub fn rectangle(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::rectangle_on(x1, y1, x2, y2, 0)
    }

    pub fn rectangle_on(x1: i32, y1: i32, x2: i32, y2: i32, plane: u8) -> Self {
        Area::Rectangle {
            min: (x1.min(x2), y1.min(y2)),
            max: (x1.max(x2), y1.max(y2)),
            plane,
        }
    }

    pub fn polygon(vertices: Vec<(i32, i32)>, plane: u8) -> Self {
        Area::Polygon { vertices, plane }
    }

    pub fn plane(&self) -> u8 {
        match self {
            Area::Rectangle { plane, .. } | Area::Polygon { plane, .. } => *plane,
        }
    }

    /// Returns true if `position` lies inside this area.
    pub fn contains(&self, position: Position) -> bool {
        if position.plane != self.plane() {
            return false;
        }
        match self {
            Area::Rectangle { min, max, .. } => {
                // Corners may have been written by hand in a config file.
                let (lx, hx) = (min.0.min(max.0), min.0.max(max.0));
                let (ly, hy) = (min.1.min(max.1), min.1.max(max.1));
                (lx..=hx).contains(&position.x) && (ly..=hy).contains(&position.y)
            }
            Area::Polygon { vertices, .. } => polygon_contains(vertices, position.x, position.y),
        }
    }

    /// A tile that navigation hosts can aim for when walking into this area.
    pub fn anchor(&self) -> Position {
        match self {
            Area::Rectangle { min, max, plane } => {
                Position::on_plane(midpoint(min.0, max.0), midpoint(min.1, max.1), *plane)
            }
            Area::Polygon { vertices, plane } => {
                if vertices.is_empty() {
                    return Position::on_plane(0, 0, *plane);
                }
                let n = vertices.len() as i64;
                let sx: i64 = vertices.iter().map(|v| v.0 as i64).sum();
                let sy: i64 = vertices.iter().map(|v| v.1 as i64).sum();
                let centroid = Position::on_plane((sx / n) as i32, (sy / n) as i32, *plane);
                if self.contains(centroid) {
                    centroid
                } else {
                    Position::on_plane(vertices[0].0, vertices[0].1, *plane)
                }
            }
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Area::Rectangle { min, max, plane } => write!(
                f,
                "rectangle ({}, {})-({}, {}) plane {}",
                min.0, min.1, max.0, max.1, plane
            ),
            Area::Polygon { vertices, plane } => {
                write!(f, "polygon of {} vertices plane {}", vertices.len(), plane)
            }
        }
    }
}

fn polygon_contains(vertices: &[(i32, i32)], x: i32, y: i32) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].0 as i64, vertices[i].1 as i64);
        let (xj, yj) = (vertices[j].0 as i64, vertices[j].1 as i64);
        let (px, py) = (x as i64, y as i64);

        if on_segment((xi, yi), (xj, yj), (px, py)) {
            return true;
        }
        if (yi > py) != (yj > py) {
            // Compare px against the edge's x at py without floating point.
            let lhs = (px - xi) * (yj - yi);
            let rhs = (xj - xi) * (py - yi);
            let crosses = if yj > yi { lhs < rhs } else { lhs > rhs };
            if crosses {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn midpoint(a: i32, b: i32) -> i32 {
    ((i64::from(a) + i64::from(b)) / 2) as i32
}

fn on_segment(a: (i64, i64), b: (i64, i64), p: (i64, i64)) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    cross == 0
        && p.0 >= a.0.min(b.0)
        && p.0 <= a.0.max(b.0)
        && p.1 >= a.1.min(b.1)
        && p.1 <= a.1.max(b.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_normalises_corners() {
        let market = Area::rectangle(3159, 3493, 3169, 3485);
        assert!(market.contains(Position::new(3164, 3489)));
        assert!(market.contains(Position::new(3159, 3485)));
        assert!(market.contains(Position::new(3169, 3493)));
        assert!(!market.contains(Position::new(3170, 3489)));
        assert!(!market.contains(Position::new(3164, 3484)));
    }

    #[test]
    fn hand_written_inverted_rectangle_still_contains() {
        let area = Area::Rectangle {
            min: (10, 20),
            max: (0, 0),
            plane: 0,
        };
        assert!(area.contains(Position::new(5, 5)));
    }

    #[test]
    fn plane_must_match() {
        let upstairs = Area::rectangle_on(3205, 3217, 3210, 3222, 2);
        assert!(upstairs.contains(Position::on_plane(3208, 3220, 2)));
        assert!(!upstairs.contains(Position::on_plane(3208, 3220, 0)));
    }

    #[test]
    fn polygon_membership() {
        // L-shaped room
        let room = Area::polygon(vec![(0, 0), (10, 0), (10, 4), (4, 4), (4, 10), (0, 10)], 0);
        assert!(room.contains(Position::new(2, 8)));
        assert!(room.contains(Position::new(8, 2)));
        assert!(!room.contains(Position::new(8, 8)));
        assert!(room.contains(Position::new(10, 2)), "edge tiles count as inside");
        assert!(!room.contains(Position::new(-1, 5)));
    }

    #[test]
    fn anchor_is_inside() {
        let market = Area::rectangle(3159, 3493, 3169, 3485);
        assert!(market.contains(market.anchor()));

        let room = Area::polygon(vec![(0, 0), (10, 0), (10, 4), (4, 4), (4, 10), (0, 10)], 0);
        assert!(room.contains(room.anchor()));
    }

    #[test]
    fn anchor_of_a_huge_rectangle_does_not_overflow() {
        let area = Area::rectangle(i32::MAX - 1, i32::MAX - 1, i32::MAX, i32::MAX);
        assert!(area.contains(area.anchor()));

        let wide = Area::rectangle(i32::MIN, 0, i32::MAX, 0);
        assert_eq!(wide.anchor(), Position::new(0, 0));
    }
}
