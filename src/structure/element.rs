//! Element lookup tables: symbols by atomic number, covalent radii and the
//! element colour schemes.
//!
//! Colours are stored as 24-bit hex values as published for each scheme and
//! converted to POV-Ray `rgb <r, g, b>` literals on lookup.

/// Element symbols indexed by atomic number minus one.
const SYMBOLS: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al",
    "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe",
    "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr",
    "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm",
    "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W",
    "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
];

/// Covalent radii in angstroms (Cordero et al., 2008).
const COVALENT_RADII: &[(&str, f64)] = &[
    ("H", 0.31),
    ("He", 0.28),
    ("Li", 1.28),
    ("Be", 0.96),
    ("B", 0.84),
    ("C", 0.76),
    ("N", 0.71),
    ("O", 0.66),
    ("F", 0.57),
    ("Ne", 0.58),
    ("Na", 1.66),
    ("Mg", 1.41),
    ("Al", 1.21),
    ("Si", 1.11),
    ("P", 1.07),
    ("S", 1.05),
    ("Cl", 1.02),
    ("Ar", 1.06),
    ("K", 2.03),
    ("Ca", 1.76),
    ("Sc", 1.70),
    ("Ti", 1.60),
    ("V", 1.53),
    ("Cr", 1.39),
    ("Mn", 1.39),
    ("Fe", 1.32),
    ("Co", 1.26),
    ("Ni", 1.24),
    ("Cu", 1.32),
    ("Zn", 1.22),
    ("Ga", 1.22),
    ("Ge", 1.20),
    ("As", 1.19),
    ("Se", 1.20),
    ("Br", 1.20),
    ("Kr", 1.16),
    ("Rb", 2.20),
    ("Sr", 1.95),
    ("Y", 1.90),
    ("Zr", 1.75),
    ("Nb", 1.64),
    ("Mo", 1.54),
    ("Tc", 1.47),
    ("Ru", 1.46),
    ("Rh", 1.42),
    ("Pd", 1.39),
    ("Ag", 1.45),
    ("Cd", 1.44),
    ("In", 1.42),
    ("Sn", 1.39),
    ("Sb", 1.39),
    ("Te", 1.38),
    ("I", 1.39),
    ("Xe", 1.40),
    ("Cs", 2.44),
    ("Ba", 2.15),
    ("W", 1.62),
    ("Os", 1.44),
    ("Ir", 1.41),
    ("Pt", 1.36),
    ("Au", 1.36),
    ("Hg", 1.32),
    ("Pb", 1.46),
    ("Bi", 1.48),
];

/// Jmol colours.
const JMOL_COLOURS: &[(&str, u32)] = &[
    ("H", 0xFF_FFFF),
    ("He", 0xD9_FFFF),
    ("Li", 0xCC_80FF),
    ("Be", 0xC2_FF00),
    ("B", 0xFF_B5B5),
    ("C", 0x90_9090),
    ("N", 0x30_50F8),
    ("O", 0xFF_0D0D),
    ("F", 0x90_E050),
    ("Ne", 0xB3_E3F5),
    ("Na", 0xAB_5CF2),
    ("Mg", 0x8A_FF00),
    ("Al", 0xBF_A6A6),
    ("Si", 0xF0_C8A0),
    ("P", 0xFF_8000),
    ("S", 0xFF_FF30),
    ("Cl", 0x1F_F01F),
    ("Ar", 0x80_D1E3),
    ("K", 0x8F_40D4),
    ("Ca", 0x3D_FF00),
    ("Sc", 0xE6_E6E6),
    ("Ti", 0xBF_C2C7),
    ("V", 0xA6_A6AB),
    ("Cr", 0x8A_99C7),
    ("Mn", 0x9C_7AC7),
    ("Fe", 0xE0_6633),
    ("Co", 0xF0_90A0),
    ("Ni", 0x50_D050),
    ("Cu", 0xC8_8033),
    ("Zn", 0x7D_80B0),
    ("Ga", 0xC2_8F8F),
    ("Ge", 0x66_8F8F),
    ("As", 0xBD_80E3),
    ("Se", 0xFF_A100),
    ("Br", 0xA6_2929),
    ("Kr", 0x5C_B8D1),
    ("Rb", 0x70_2EB0),
    ("Sr", 0x00_FF00),
    ("Y", 0x94_FFFF),
    ("Zr", 0x94_E0E0),
    ("Nb", 0x73_C2C9),
    ("Mo", 0x54_B5B5),
    ("Tc", 0x3B_9E9E),
    ("Ru", 0x24_8F8F),
    ("Rh", 0x0A_7D8C),
    ("Pd", 0x00_6985),
    ("Ag", 0xC0_C0C0),
    ("Cd", 0xFF_D98F),
    ("In", 0xA6_7573),
    ("Sn", 0x66_8080),
    ("Sb", 0x9E_63B5),
    ("Te", 0xD4_7A00),
    ("I", 0x94_0094),
    ("Xe", 0x42_9EB0),
    ("Cs", 0x57_178F),
    ("Ba", 0x00_C900),
    ("Pt", 0xD0_D0E0),
    ("Au", 0xFF_D123),
    ("Hg", 0xB8_B8D0),
    ("Pb", 0x57_5961),
    ("Bi", 0x9E_4FB5),
];

/// RasMol CPK colours.
const RASMOL_COLOURS: &[(&str, u32)] = &[
    ("H", 0xFF_FFFF),
    ("He", 0xFF_C0CB),
    ("Li", 0xB2_2222),
    ("B", 0x00_FF00),
    ("C", 0xC8_C8C8),
    ("N", 0x8F_8FFF),
    ("O", 0xF0_0000),
    ("F", 0xDA_A520),
    ("Na", 0x00_00FF),
    ("Mg", 0x22_8B22),
    ("Al", 0x80_8090),
    ("Si", 0xDA_A520),
    ("P", 0xFF_A500),
    ("S", 0xFF_C832),
    ("Cl", 0x00_FF00),
    ("Ca", 0x80_8090),
    ("Ti", 0x80_8090),
    ("Cr", 0x80_8090),
    ("Mn", 0x80_8090),
    ("Fe", 0xFF_A500),
    ("Ni", 0xA5_2A2A),
    ("Cu", 0xA5_2A2A),
    ("Zn", 0xA5_2A2A),
    ("Br", 0xA5_2A2A),
    ("Ag", 0x80_8090),
    ("I", 0xA0_20F0),
    ("Ba", 0xFF_A500),
    ("Au", 0xDA_A520),
];

/// Classic CPK colours.
const CPK_COLOURS: &[(&str, u32)] = &[
    ("H", 0xFF_FFFF),
    ("C", 0x20_2020),
    ("N", 0x22_33FF),
    ("O", 0xFF_2200),
    ("F", 0x1F_F01F),
    ("Cl", 0x1F_F01F),
    ("Br", 0x99_2200),
    ("I", 0x66_0099),
    ("He", 0x00_FFFF),
    ("Ne", 0x00_FFFF),
    ("Ar", 0x00_FFFF),
    ("Kr", 0x00_FFFF),
    ("Xe", 0x00_FFFF),
    ("P", 0xFF_9900),
    ("S", 0xFF_E522),
    ("B", 0xFF_AA77),
    ("Li", 0x77_00FF),
    ("Na", 0x77_00FF),
    ("K", 0x77_00FF),
    ("Rb", 0x77_00FF),
    ("Cs", 0x77_00FF),
    ("Be", 0x00_7700),
    ("Mg", 0x00_7700),
    ("Ca", 0x00_7700),
    ("Sr", 0x00_7700),
    ("Ba", 0x00_7700),
    ("Ti", 0x99_9999),
    ("Fe", 0xDD_7700),
];

/// Colour for elements a scheme does not list (RasMol's "unknown" pink).
const FALLBACK_COLOUR: u32 = 0xFF_1493;

/// Names of the bundled colour schemes.
pub const COLOUR_SCHEMES: &[&str] = &["CPK", "Jmol", "Rasmol"];

/// Element symbol for a one-based atomic number.
#[must_use]
pub fn symbol_for_number(number: usize) -> Option<&'static str> {
    number.checked_sub(1).and_then(|i| SYMBOLS.get(i)).copied()
}

/// Normalise the capitalisation of an element symbol (`CL` → `Cl`).
#[must_use]
pub fn normalize_symbol(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string()
            + &chars.as_str().to_ascii_lowercase()
    })
}

/// Tabulated covalent radius of an element, in angstroms.
#[must_use]
pub fn covalent_radius(symbol: &str) -> Option<f64> {
    COVALENT_RADII
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, r)| *r)
}

/// Format a 24-bit colour as a POV-Ray `rgb` literal.
#[must_use]
pub fn hex_to_pov_rgb(hex: u32) -> String {
    let channel = |shift: u32| f64::from((hex >> shift) & 0xFF) / 255.0;
    format!(
        "rgb <{:4.2}, {:4.2}, {:4.2}>",
        channel(16),
        channel(8),
        channel(0)
    )
}

fn scheme_table(scheme: &str) -> Option<&'static [(&'static str, u32)]> {
    match scheme.to_ascii_lowercase().as_str() {
        "cpk" => Some(CPK_COLOURS),
        "jmol" => Some(JMOL_COLOURS),
        "rasmol" => Some(RASMOL_COLOURS),
        _ => None,
    }
}

/// Whether `scheme` names a bundled colour scheme (case-insensitive).
#[must_use]
pub fn is_colour_scheme(scheme: &str) -> bool {
    scheme_table(scheme).is_some()
}

fn scheme_entry(table: &[(&str, u32)], symbol: &str) -> Option<u32> {
    table.iter().find(|(s, _)| *s == symbol).map(|(_, c)| *c)
}

/// Whether a known scheme lists a colour of its own for `symbol`.
#[must_use]
pub fn has_scheme_colour(scheme: &str, symbol: &str) -> bool {
    scheme_table(scheme)
        .is_some_and(|table| scheme_entry(table, symbol).is_some())
}

/// Colour of an element in a scheme as a POV-Ray literal.
///
/// Returns `None` for an unknown scheme; elements missing from a known scheme
/// get the fallback colour.
#[must_use]
pub fn scheme_colour(scheme: &str, symbol: &str) -> Option<String> {
    let table = scheme_table(scheme)?;
    let hex = scheme_entry(table, symbol).unwrap_or(FALLBACK_COLOUR);
    Some(hex_to_pov_rgb(hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_numbers_map_to_symbols() {
        assert_eq!(symbol_for_number(1), Some("H"));
        assert_eq!(symbol_for_number(6), Some("C"));
        assert_eq!(symbol_for_number(79), Some("Au"));
        assert_eq!(symbol_for_number(0), None);
        assert_eq!(symbol_for_number(200), None);
    }

    #[test]
    fn symbols_are_normalized() {
        assert_eq!(normalize_symbol("CL"), "Cl");
        assert_eq!(normalize_symbol("c"), "C");
        assert_eq!(normalize_symbol(""), "");
    }

    #[test]
    fn hex_colours_format_like_povray() {
        assert_eq!(hex_to_pov_rgb(0xFF_FFFF), "rgb <1.00, 1.00, 1.00>");
        assert_eq!(hex_to_pov_rgb(0xFF_0000), "rgb <1.00, 0.00, 0.00>");
        assert_eq!(hex_to_pov_rgb(0x90_9090), "rgb <0.56, 0.56, 0.56>");
    }

    #[test]
    fn scheme_lookup() {
        assert_eq!(
            scheme_colour("Jmol", "O").as_deref(),
            Some("rgb <1.00, 0.05, 0.05>")
        );
        assert_eq!(
            scheme_colour("jmol", "Og").as_deref(),
            Some("rgb <1.00, 0.08, 0.58>")
        );
        assert!(scheme_colour("pastel", "C").is_none());
        assert!(has_scheme_colour("Jmol", "O"));
        assert!(!has_scheme_colour("jmol", "Og"));
        assert!(!has_scheme_colour("pastel", "C"));
        assert!(COLOUR_SCHEMES.iter().all(|s| is_colour_scheme(s)));
    }

    #[test]
    fn covalent_radius_lookup() {
        assert_eq!(covalent_radius("C"), Some(0.76));
        assert_eq!(covalent_radius("Xx"), None);
    }
}
