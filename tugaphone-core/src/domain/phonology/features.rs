//! Articulatory feature tables keyed by IPA symbol
//!
//! Features are resolved from the realized IPA of a character rather than
//! from its spelling, so the same lookup serves every dialect. Symbols that
//! are not listed resolve to `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

const COMBINING_TILDE: char = '\u{303}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VowelHeight {
    Close,
    CloseMid,
    Mid,
    OpenMid,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VowelBackness {
    Front,
    Central,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Roundedness {
    Rounded,
    Unrounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Manner {
    Plosive,
    Fricative,
    Affricate,
    Nasal,
    Lateral,
    Rhotic,
    Approximant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Place {
    Bilabial,
    Labiodental,
    Dental,
    Alveolar,
    Postalveolar,
    Palatal,
    Velar,
    Uvular,
    Glottal,
    LabialVelar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voicing {
    Voiced,
    Voiceless,
}

macro_rules! impl_feature_display {
    ($ty:ty { $($variant:ident => $name:expr),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_feature_display!(VowelHeight {
    Close => "close",
    CloseMid => "close-mid",
    Mid => "mid",
    OpenMid => "open-mid",
    Open => "open",
});
impl_feature_display!(VowelBackness {
    Front => "front",
    Central => "central",
    Back => "back",
});
impl_feature_display!(Roundedness {
    Rounded => "rounded",
    Unrounded => "unrounded",
});
impl_feature_display!(Manner {
    Plosive => "plosive",
    Fricative => "fricative",
    Affricate => "affricate",
    Nasal => "nasal",
    Lateral => "lateral",
    Rhotic => "rhotic",
    Approximant => "approximant",
});
impl_feature_display!(Place {
    Bilabial => "bilabial",
    Labiodental => "labiodental",
    Dental => "dental",
    Alveolar => "alveolar",
    Postalveolar => "postalveolar",
    Palatal => "palatal",
    Velar => "velar",
    Uvular => "uvular",
    Glottal => "glottal",
    LabialVelar => "labial-velar",
});
impl_feature_display!(Voicing {
    Voiced => "voiced",
    Voiceless => "voiceless",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VowelFeatures {
    pub height: VowelHeight,
    pub backness: VowelBackness,
    pub roundedness: Roundedness,
    pub nasal: bool,
}

impl VowelFeatures {
    pub fn is_open(&self) -> bool {
        matches!(self.height, VowelHeight::Open | VowelHeight::OpenMid)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.height, VowelHeight::Close | VowelHeight::CloseMid)
    }

    pub fn is_front(&self) -> bool {
        self.backness == VowelBackness::Front
    }

    pub fn is_back(&self) -> bool {
        self.backness == VowelBackness::Back
    }

    pub fn is_rounded(&self) -> bool {
        self.roundedness == Roundedness::Rounded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsonantFeatures {
    pub manner: Manner,
    pub place: Place,
    pub voicing: Voicing,
}

impl ConsonantFeatures {
    pub fn is_sonorant(&self) -> bool {
        matches!(
            self.manner,
            Manner::Nasal | Manner::Lateral | Manner::Rhotic | Manner::Approximant
        )
    }

    pub fn is_obstruent(&self) -> bool {
        !self.is_sonorant()
    }

    pub fn is_sibilant(&self) -> bool {
        match self.manner {
            Manner::Fricative | Manner::Affricate => {
                matches!(self.place, Place::Alveolar | Place::Postalveolar)
            }
            _ => false,
        }
    }

    pub fn is_liquid(&self) -> bool {
        matches!(self.manner, Manner::Lateral | Manner::Rhotic)
    }

    pub fn is_rhotic(&self) -> bool {
        self.manner == Manner::Rhotic
    }
}

/// Split an IPA string into its base symbol and a nasal flag
fn strip_nasality(ipa: &str) -> (Option<char>, bool) {
    let mut chars = ipa.chars();
    let base = chars.next();
    let nasal = chars.any(|c| c == COMBINING_TILDE) || matches!(base, Some('ã' | 'õ' | 'ẽ' | 'ĩ' | 'ũ'));
    (base, nasal)
}

/// Vowel features of the first segment of `ipa`
pub fn vowel_features(ipa: &str) -> Option<VowelFeatures> {
    use Roundedness::*;
    use VowelBackness::*;
    use VowelHeight::*;

    let (base, nasal) = strip_nasality(ipa);
    let (height, backness, roundedness) = match base? {
        'i' | 'ĩ' | 'j' => (Close, Front, Unrounded),
        'e' | 'ẽ' => (CloseMid, Front, Unrounded),
        'ɛ' => (OpenMid, Front, Unrounded),
        'a' | 'ã' => (Open, Central, Unrounded),
        'ɐ' | 'ə' => (Mid, Central, Unrounded),
        'ɨ' => (Close, Central, Unrounded),
        'ɔ' => (OpenMid, Back, Rounded),
        'o' | 'õ' => (CloseMid, Back, Rounded),
        'u' | 'ũ' | 'w' => (Close, Back, Rounded),
        _ => return None,
    };

    Some(VowelFeatures {
        height,
        backness,
        roundedness,
        nasal,
    })
}

/// Consonant features of the first segment of `ipa`
///
/// Affricates are matched on their two-symbol form before falling back to
/// the first symbol.
pub fn consonant_features(ipa: &str) -> Option<ConsonantFeatures> {
    use Manner::*;
    use Place::*;
    use Voicing::*;

    if ipa.starts_with("tʃ") {
        return Some(ConsonantFeatures {
            manner: Affricate,
            place: Postalveolar,
            voicing: Voiceless,
        });
    }
    if ipa.starts_with("dʒ") {
        return Some(ConsonantFeatures {
            manner: Affricate,
            place: Postalveolar,
            voicing: Voiced,
        });
    }

    let (manner, place, voicing) = match ipa.chars().next()? {
        'p' => (Plosive, Bilabial, Voiceless),
        'b' => (Plosive, Bilabial, Voiced),
        't' => (Plosive, Dental, Voiceless),
        'd' => (Plosive, Dental, Voiced),
        'k' => (Plosive, Velar, Voiceless),
        'ɡ' | 'g' => (Plosive, Velar, Voiced),
        'f' => (Fricative, Labiodental, Voiceless),
        'v' => (Fricative, Labiodental, Voiced),
        'β' => (Fricative, Bilabial, Voiced),
        's' => (Fricative, Alveolar, Voiceless),
        'z' => (Fricative, Alveolar, Voiced),
        'ʃ' => (Fricative, Postalveolar, Voiceless),
        'ʒ' => (Fricative, Postalveolar, Voiced),
        'x' => (Fricative, Velar, Voiceless),
        'm' => (Nasal, Bilabial, Voiced),
        'n' => (Nasal, Alveolar, Voiced),
        'ɲ' => (Nasal, Palatal, Voiced),
        'l' => (Lateral, Alveolar, Voiced),
        'ɫ' => (Lateral, Velar, Voiced),
        'ʎ' => (Lateral, Palatal, Voiced),
        'ɾ' | 'r' => (Rhotic, Alveolar, Voiced),
        'ʁ' | 'ʀ' => (Rhotic, Uvular, Voiced),
        'h' => (Rhotic, Glottal, Voiceless),
        'j' => (Approximant, Palatal, Voiced),
        'w' => (Approximant, LabialVelar, Voiced),
        _ => return None,
    };

    Some(ConsonantFeatures {
        manner,
        place,
        voicing,
    })
}
