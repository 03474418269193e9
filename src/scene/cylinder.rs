//! Resolving chemical bonds into drawable cylinders.
//!
//! A bond of order n is drawn as ceil(n) parallel cylinders, nudged apart
//! perpendicular to the line of sight so the viewer at the camera can tell
//! them apart. When the order is fractional the last cylinder is broken into
//! dashes.

use glam::DVec3;

use crate::structure::{Atom, Bond};

/// Shortfall below the next integer that makes a bond partial.
const PARTIAL_THRESHOLD: f64 = 0.1;

/// A straight piece of a bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub begin: DVec3,
    /// End point.
    pub end: DVec3,
}

/// A cylinder to draw, with the bond it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondCylinder {
    /// Cylinder geometry.
    pub segment: Segment,
    /// Index of the first bonded atom.
    pub begin_atom: usize,
    /// Index of the second bonded atom.
    pub end_atom: usize,
    /// Zero-based number of the line among the bond's parallel lines.
    pub serial: usize,
    /// Order of the whole bond.
    pub total_order: f64,
    /// Whether this cylinder is a dash of a partial bond.
    pub partial: bool,
}

/// Some unit vector perpendicular to `v`.
fn find_perpendicular(v: DVec3) -> DVec3 {
    if v.length_squared() < 1e-12 {
        return DVec3::X;
    }
    let candidate = if v.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    v.cross(candidate).normalize()
}

/// Direction in which the lines of a multiple bond are spread.
///
/// Perpendicular both to the bond and to the ray from the camera to the
/// bond centre. Falls back to any perpendicular when the bond points at the
/// camera.
#[must_use]
pub fn move_direction(begin: DVec3, end: DVec3, camera: DVec3) -> DVec3 {
    let axis = end - begin;
    let from_camera = (begin + end) / 2.0 - camera;
    let spread = axis.cross(from_camera).normalize_or_zero();
    if spread == DVec3::ZERO {
        find_perpendicular(axis)
    } else {
        spread
    }
}

/// Offsets of the lines of an `n`-fold bond from the bond axis.
///
/// The offsets are `separation` apart and centred on the axis, alternating
/// sides: odd counts start with the axis itself.
#[must_use]
pub fn move_amounts(separation: f64, n: usize) -> Vec<f64> {
    let (mut amounts, first) = if n % 2 == 0 {
        (Vec::with_capacity(n), separation / 2.0)
    } else {
        (vec![0.0], separation)
    };
    for i in 0..n / 2 {
        let amount = first + i as f64 * separation;
        amounts.push(amount);
        amounts.push(-amount);
    }
    amounts
}

/// Parallel lines of a bond, each flagged when it is to be dashed.
#[must_use]
pub fn resolve_multiple_bond(
    begin: DVec3,
    end: DVec3,
    order: f64,
    camera: DVec3,
    separation: f64,
) -> Vec<(Segment, bool)> {
    let n = order.max(0.0).ceil() as usize;
    let partial = n as f64 - order > PARTIAL_THRESHOLD;
    let direction = move_direction(begin, end, camera);
    let amounts = move_amounts(separation, n);
    let last = amounts.len().saturating_sub(1);

    amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| {
            let shift = direction * amount;
            let segment = Segment {
                begin: begin + shift,
                end: end + shift,
            };
            (segment, partial && i == last)
        })
        .collect()
}

/// Break a segment into dashes `dash_size` long with equal gaps.
///
/// The segment always starts with a dash; the final piece is cut short at
/// the end point.
#[must_use]
pub fn to_partial(segment: Segment, dash_size: f64) -> Vec<Segment> {
    let length = segment.begin.distance(segment.end);
    if dash_size <= 0.0 || length <= dash_size {
        return vec![segment];
    }
    let step = (segment.end - segment.begin) / length * dash_size;

    let mut dashes = Vec::new();
    let mut drawing = true;
    let mut covered = 0.0;
    let mut begin = segment.begin;
    while covered + dash_size < length {
        let end = begin + step;
        if drawing {
            dashes.push(Segment { begin, end });
        }
        begin = end;
        covered += dash_size;
        drawing = !drawing;
    }
    if drawing {
        dashes.push(Segment {
            begin,
            end: segment.end,
        });
    }
    dashes
}

/// Cylinders for all bonds as seen from `camera`.
///
/// Bonds referring to missing atoms are skipped with a warning.
#[must_use]
pub fn bonds_to_cylinders(
    bonds: &[Bond],
    atoms: &[Atom],
    camera: DVec3,
    separation: f64,
    dash_size: f64,
) -> Vec<BondCylinder> {
    let mut cylinders = Vec::new();
    for bond in bonds {
        let (Some(a), Some(b)) = (atoms.get(bond.begin), atoms.get(bond.end))
        else {
            log::warn!(
                "skipping bond {}-{}: no such atom",
                bond.begin + 1,
                bond.end + 1
            );
            continue;
        };
        let lines = resolve_multiple_bond(
            a.coord, b.coord, bond.order, camera, separation,
        );
        for (serial, (segment, partial)) in lines.into_iter().enumerate() {
            let pieces = if partial {
                to_partial(segment, dash_size)
            } else {
                vec![segment]
            };
            cylinders.extend(pieces.into_iter().map(|segment| BondCylinder {
                segment,
                begin_atom: bond.begin,
                end_atom: bond.end,
                serial,
                total_order: bond.order,
                partial,
            }));
        }
    }
    cylinders
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn amounts_are_centred() {
        assert_eq!(move_amounts(0.3, 1), vec![0.0]);
        assert_eq!(move_amounts(0.4, 2), vec![0.2, -0.2]);
        assert_eq!(move_amounts(0.3, 3), vec![0.0, 0.3, -0.3]);
        let four = move_amounts(0.2, 4);
        for (got, want) in four.iter().zip([0.1, -0.1, 0.3, -0.3]) {
            assert!((got - want).abs() < EPS);
        }
        assert!(move_amounts(0.3, 0).is_empty());
    }

    #[test]
    fn spread_is_perpendicular_to_view() {
        let begin = DVec3::ZERO;
        let end = DVec3::X;
        let camera = DVec3::new(0.5, 0.0, 10.0);
        let dir = move_direction(begin, end, camera);
        assert!((dir.length() - 1.0).abs() < EPS);
        assert!(dir.dot(DVec3::X).abs() < EPS);
        assert!(dir.dot(DVec3::Z).abs() < EPS);
    }

    #[test]
    fn bond_along_line_of_sight_still_spreads() {
        let camera = DVec3::new(0.0, 0.0, 10.0);
        let dir = move_direction(DVec3::ZERO, DVec3::Z, camera);
        assert!((dir.length() - 1.0).abs() < EPS);
        assert!(dir.dot(DVec3::Z).abs() < EPS);
    }

    #[test]
    fn double_bond_is_two_full_lines() {
        let lines = resolve_multiple_bond(
            DVec3::ZERO,
            DVec3::X,
            2.0,
            DVec3::new(0.5, 0.0, 10.0),
            0.3,
        );
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|(_, partial)| !partial));
        let gap = lines[0].0.begin.distance(lines[1].0.begin);
        assert!((gap - 0.3).abs() < EPS);
        // Centred on the axis.
        let mid = (lines[0].0.begin + lines[1].0.begin) / 2.0;
        assert!(mid.length() < EPS);
    }

    #[test]
    fn aromatic_bond_dashes_last_line() {
        let lines = resolve_multiple_bond(
            DVec3::ZERO,
            DVec3::X,
            1.5,
            DVec3::new(0.5, 0.0, 10.0),
            0.3,
        );
        let flags: Vec<bool> = lines.iter().map(|(_, p)| *p).collect();
        assert_eq!(flags, [false, true]);
    }

    #[test]
    fn near_integer_order_is_full() {
        let lines =
            resolve_multiple_bond(DVec3::ZERO, DVec3::X, 0.95, DVec3::Z, 0.3);
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].1);
    }

    #[test]
    fn dashes_alternate() {
        let segment = Segment {
            begin: DVec3::ZERO,
            end: DVec3::new(1.0, 0.0, 0.0),
        };
        let dashes = to_partial(segment, 0.3);
        // 0-0.3 drawn, 0.3-0.6 gap, 0.6-0.9 drawn, 0.9-1.0 gap.
        assert_eq!(dashes.len(), 2);
        assert!((dashes[0].end.x - 0.3).abs() < EPS);
        assert!((dashes[1].begin.x - 0.6).abs() < EPS);
        assert!((dashes[1].end.x - 0.9).abs() < EPS);
    }

    #[test]
    fn final_dash_ends_at_segment_end() {
        let segment = Segment {
            begin: DVec3::ZERO,
            end: DVec3::new(1.0, 0.0, 0.0),
        };
        let dashes = to_partial(segment, 0.25);
        // 0-0.25 drawn, 0.25-0.5 gap, 0.5-0.75 drawn, 0.75-1.0 is a gap.
        assert_eq!(dashes.len(), 2);

        let dashes = to_partial(segment, 0.4);
        // 0-0.4 drawn, 0.4-0.8 gap, 0.8-1.0 drawn and cut short.
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[1].end, segment.end);
    }

    #[test]
    fn short_segment_is_one_dash() {
        let segment = Segment {
            begin: DVec3::ZERO,
            end: DVec3::new(0.1, 0.0, 0.0),
        };
        assert_eq!(to_partial(segment, 0.15), vec![segment]);
    }

    #[test]
    fn cylinders_keep_bond_metadata() {
        let atoms = vec![
            Atom::new("C", DVec3::ZERO),
            Atom::new("C", DVec3::new(1.4, 0.0, 0.0)),
            Atom::new("O", DVec3::new(0.0, 1.2, 0.0)),
        ];
        let bonds = vec![
            Bond::new(0, 1, 1.0),
            Bond::new(0, 2, 2.0),
            Bond::new(1, 7, 1.0),
        ];
        let cylinders =
            bonds_to_cylinders(&bonds, &atoms, DVec3::Z * 10.0, 0.3, 0.15);
        assert_eq!(cylinders.len(), 3);
        assert_eq!(cylinders[0].serial, 0);
        assert_eq!((cylinders[2].begin_atom, cylinders[2].end_atom), (0, 2));
        assert_eq!(cylinders[2].serial, 1);
        assert_eq!(cylinders[2].total_order, 2.0);
        assert!(cylinders.iter().all(|c| !c.partial));
    }
}
