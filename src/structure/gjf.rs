//! Reader for Gaussian input files.
//!
//! Only Cartesian coordinates are understood. The file is split into
//! blank-line separated sections: route, title, charge/multiplicity with the
//! atom lines, and an optional connectivity table.

use glam::DVec3;

use super::element::{normalize_symbol, symbol_for_number};
use super::{Atom, Bond, Structure};
use crate::error::CcpovizError;

/// Pseudo-atom label used by Gaussian for translation (lattice) vectors.
const LATTICE_LABEL: &str = "Tv";

/// Split the input into sections of non-blank lines.
///
/// Leading whitespace is kept so that indented option blocks in the title
/// survive.
fn sections(content: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in content.lines().map(str::trim_end) {
        if line.trim_start().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Strip Gaussian decorations from an atom label and resolve atomic numbers.
///
/// `C(Fragment=1)`, `C-CA--0.25` and `6` all resolve to `C`.
fn parse_label(label: &str) -> Result<String, CcpovizError> {
    let bare = label
        .split(['(', '-'])
        .next()
        .unwrap_or_default();
    if bare.is_empty() {
        return Err(CcpovizError::StructureParse(format!(
            "invalid atom label '{label}'"
        )));
    }
    if bare.chars().all(|c| c.is_ascii_digit()) {
        let number: usize = bare.parse().map_err(|_| {
            CcpovizError::StructureParse(format!(
                "invalid atomic number '{bare}'"
            ))
        })?;
        return symbol_for_number(number).map(str::to_owned).ok_or_else(
            || {
                CcpovizError::StructureParse(format!(
                    "unknown atomic number {number}"
                ))
            },
        );
    }
    if bare == LATTICE_LABEL {
        return Ok(LATTICE_LABEL.to_owned());
    }
    Ok(normalize_symbol(bare))
}

fn parse_float(field: &str, line: &str) -> Result<f64, CcpovizError> {
    field.parse().map_err(|_| {
        CcpovizError::StructureParse(format!(
            "corrupt atomic coordinate in line '{line}'"
        ))
    })
}

/// Parse an atom line into its label and position.
///
/// A freeze code may sit between the label and the coordinates.
fn parse_atom_line(line: &str) -> Result<(String, DVec3), CcpovizError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let coords = match fields.len() {
        4 => &fields[1..4],
        5 => &fields[2..5],
        _ => {
            return Err(CcpovizError::StructureParse(format!(
                "expected 'symbol x y z' in line '{line}'"
            )))
        }
    };
    let label = parse_label(fields[0])?;
    let coord = DVec3::new(
        parse_float(coords[0], line)?,
        parse_float(coords[1], line)?,
        parse_float(coords[2], line)?,
    );
    Ok((label, coord))
}

/// Parse the molecule specification section.
///
/// Returns the atoms and the lattice vectors (empty for molecules).
fn parse_coords(
    lines: &[&str],
) -> Result<(Vec<Atom>, Vec<DVec3>), CcpovizError> {
    let mut atoms = Vec::new();
    let mut lattice = Vec::new();

    // The first line holds charge and spin multiplicity.
    for line in lines.iter().skip(1) {
        let (label, coord) = parse_atom_line(line)?;
        if label == LATTICE_LABEL {
            lattice.push(coord);
        } else {
            atoms.push(Atom::new(label, coord));
        }
    }
    Ok((atoms, lattice))
}

/// Parse the connectivity section (`geom=connectivity`).
///
/// Each line is a one-based atom index followed by `(partner, order)` pairs.
fn parse_connectivity(
    lines: &[&str],
    n_atoms: usize,
) -> Result<Vec<Bond>, CcpovizError> {
    let corrupt = |line: &str| {
        CcpovizError::StructureParse(format!(
            "corrupt connectivity in line '{line}'"
        ))
    };
    let index = |field: &str, line: &str| -> Result<usize, CcpovizError> {
        let one_based: usize = field.parse().map_err(|_| corrupt(line))?;
        if one_based == 0 || one_based > n_atoms {
            return Err(CcpovizError::StructureParse(format!(
                "atom index {one_based} out of range in line '{line}'"
            )));
        }
        Ok(one_based - 1)
    };

    let mut bonds = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some((first, rest)) = fields.split_first() else {
            continue;
        };
        if rest.len() % 2 != 0 {
            return Err(corrupt(line));
        }
        let start = index(first, line)?;
        for pair in rest.chunks(2) {
            let end = index(pair[0], line)?;
            let order: f64 = pair[1].parse().map_err(|_| corrupt(line))?;
            bonds.push(Bond::new(start, end, order));
        }
    }
    Ok(bonds)
}

/// Parse the content of a Gaussian input file.
pub fn parse(content: &str) -> Result<Structure, CcpovizError> {
    let sections = sections(content);
    if sections.len() < 3 {
        return Err(CcpovizError::StructureParse(
            "there is no atomic coordinate section in the input".to_owned(),
        ));
    }

    let title = sections[1].iter().map(|l| (*l).to_owned()).collect();
    let (atoms, lattice_vectors) = parse_coords(&sections[2])?;
    if atoms.is_empty() {
        return Err(CcpovizError::StructureParse(
            "the coordinate section holds no atoms".to_owned(),
        ));
    }
    let bonds = match sections.get(3) {
        Some(lines) => parse_connectivity(lines, atoms.len())?,
        None => Vec::new(),
    };

    Ok(Structure {
        title,
        atoms,
        bonds,
        lattice_vectors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = "\
%chk=water.chk
# hf/3-21g geom=connectivity

water molecule

0 1
O   0.000000   0.000000   0.117300
H   0.000000   0.757200  -0.469200
H   0.000000  -0.757200  -0.469200

1 2 1.0 3 1.0
2
3

";

    #[test]
    fn parses_water() {
        let s = parse(WATER).unwrap();
        assert_eq!(s.title, vec!["water molecule".to_owned()]);
        assert_eq!(s.atoms.len(), 3);
        assert_eq!(s.atoms[0].symbol, "O");
        assert_eq!(s.atoms[1].coord, DVec3::new(0.0, 0.7572, -0.4692));
        assert_eq!(
            s.bonds,
            vec![Bond::new(0, 1, 1.0), Bond::new(0, 2, 1.0)]
        );
        assert!(s.lattice_vectors.is_empty());
    }

    #[test]
    fn title_indentation_is_kept() {
        let input = "# hf\n\nmol\n---\ncamera:\n  distance: 9\n...\n\n0 1\nC 0 0 0\n";
        let s = parse(input).unwrap();
        assert_eq!(s.title[3], "  distance: 9");
    }

    #[test]
    fn connectivity_is_optional() {
        let input = "# hf\n\ntitle\n\n0 1\nC 0 0 0\n";
        let s = parse(input).unwrap();
        assert_eq!(s.atoms.len(), 1);
        assert!(s.bonds.is_empty());
    }

    #[test]
    fn labels_with_decorations_and_numbers() {
        let input = "# hf\n\nt\n\n0 1\n6 0 0 0\nCL(Fragment=1) 1 0 0\n\
                     N-N3--0.5 0 1 0\nO 0 0.0 0.0 1.0\n";
        let s = parse(input).unwrap();
        let symbols: Vec<&str> =
            s.atoms.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, ["C", "Cl", "N", "O"]);
        assert_eq!(s.atoms[3].coord, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn lattice_vectors_are_separated() {
        let input = "# pbc\n\ncrystal\n\n0 1\nC 0 0 0\nTv 2.5 0 0\n";
        let s = parse(input).unwrap();
        assert_eq!(s.atoms.len(), 1);
        assert_eq!(s.lattice_vectors, vec![DVec3::new(2.5, 0.0, 0.0)]);
    }

    #[test]
    fn missing_coordinates_is_an_error() {
        let err = parse("# hf\n\ntitle only\n").unwrap_err();
        assert!(matches!(err, CcpovizError::StructureParse(_)));
    }

    #[test]
    fn corrupt_coordinates_are_reported() {
        let err = parse("# hf\n\nt\n\n0 1\nC 0 zero 0\n").unwrap_err();
        assert!(err.to_string().contains("corrupt atomic coordinate"));
    }

    #[test]
    fn odd_connectivity_fields_are_rejected() {
        let input = "# hf\n\nt\n\n0 1\nC 0 0 0\nC 1 0 0\n\n1 2\n";
        let err = parse(input).unwrap_err();
        assert!(err.to_string().contains("corrupt connectivity"));
    }

    #[test]
    fn connectivity_index_out_of_range() {
        let input = "# hf\n\nt\n\n0 1\nC 0 0 0\n\n1 7 1.0\n";
        let err = parse(input).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
