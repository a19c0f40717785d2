//! Quick-pick molecules offered next to the SMILES input.

use super::molecule::RenderRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub smiles: &'static str,
}

impl Preset {
    pub fn request(&self) -> RenderRequest {
        RenderRequest::new(self.smiles).with_name(self.name)
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        key: "benzene",
        name: "Benzene",
        smiles: "c1ccccc1",
    },
    Preset {
        key: "caffeine",
        name: "Caffeine",
        smiles: "CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
    },
    Preset {
        key: "aspirin",
        name: "Aspirin",
        smiles: "CC(=O)OC1=CC=CC=C1C(=O)O",
    },
    Preset {
        key: "ethanol",
        name: "Ethanol",
        smiles: "CCO",
    },
    Preset {
        key: "glucose",
        name: "Glucose",
        smiles: "OC[C@H]1OC(O)[C@H](O)[C@@H](O)[C@@H]1O",
    },
    Preset {
        key: "ibuprofen",
        name: "Ibuprofen",
        smiles: "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",
    },
];

/// Case-insensitive lookup by key.
pub fn find_preset(key: &str) -> Option<&'static Preset> {
    let key = key.trim();
    PRESETS
        .iter()
        .find(|preset| preset.key.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_carry_their_display_name() {
        let request = find_preset("Caffeine").expect("preset").request();
        assert_eq!(request.smiles, "CN1C=NC2=C1C(=O)N(C(=O)N2C)C");
        assert_eq!(request.display_name.as_deref(), Some("Caffeine"));
    }

    #[test]
    fn unknown_key_has_no_preset() {
        assert!(find_preset("unobtainium").is_none());
    }
}
