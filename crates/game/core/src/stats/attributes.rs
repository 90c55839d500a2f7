//! Attributes - Layer 1 of the stat system.
//!
//! Raw attribute input arrives from the host loosely typed and with
//! inconsistent key casing. The normalizer fixes case and type in place; the
//! typed views ([`CoreAttributes`], [`CharacterAttributes`]) then fill absent
//! keys with contextual defaults from [`AttributeDefaults`].

use std::collections::BTreeMap;

use crate::config::AttributeDefaults;

/// Attribute codes understood by the ruleset.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Attribute {
    Str,
    Con,
    Siz,
    Int,
    Pow,
    Dex,
    Cha,
    Lck,
    Age,
}

impl Attribute {
    /// Attributes every actor carries.
    pub const CORE: [Attribute; 6] = [
        Attribute::Str,
        Attribute::Con,
        Attribute::Siz,
        Attribute::Int,
        Attribute::Pow,
        Attribute::Dex,
    ];

    /// Attributes of characters and NPCs.
    pub const CHARACTER: [Attribute; 9] = [
        Attribute::Str,
        Attribute::Con,
        Attribute::Siz,
        Attribute::Int,
        Attribute::Pow,
        Attribute::Dex,
        Attribute::Cha,
        Attribute::Lck,
        Attribute::Age,
    ];

    /// Creatures never have charisma or luck.
    pub const CREATURE: [Attribute; 7] = [
        Attribute::Str,
        Attribute::Con,
        Attribute::Siz,
        Attribute::Int,
        Attribute::Pow,
        Attribute::Dex,
        Attribute::Age,
    ];

    /// Canonical uppercase code.
    pub const fn code(self) -> &'static str {
        match self {
            Attribute::Str => "STR",
            Attribute::Con => "CON",
            Attribute::Siz => "SIZ",
            Attribute::Int => "INT",
            Attribute::Pow => "POW",
            Attribute::Dex => "DEX",
            Attribute::Cha => "CHA",
            Attribute::Lck => "LCK",
            Attribute::Age => "AGE",
        }
    }

    /// Contextual default used when the attribute is absent.
    pub const fn default_value(self, defaults: &AttributeDefaults) -> i32 {
        match self {
            Attribute::Age => defaults.age,
            _ => defaults.core,
        }
    }
}

/// A loosely typed value as stored by the host document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl RawValue {
    /// Interprets the value as a number.
    ///
    /// Follows host semantics: null, `false` and blank text read as zero.
    /// Returns `None` when the value is not a finite number.
    pub fn to_number(&self) -> Option<f64> {
        let number = match self {
            RawValue::Int(value) => *value as f64,
            RawValue::Float(value) => *value,
            RawValue::Bool(value) => f64::from(u8::from(*value)),
            RawValue::Null => 0.0,
            RawValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().ok()?
                }
            }
        };
        number.is_finite().then_some(number)
    }

    /// Coerces to an integer attribute value, substituting 0 when the value
    /// is not numeric.
    pub fn coerce(&self) -> i32 {
        match self {
            RawValue::Int(value) => {
                (*value).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
            }
            other => other.to_number().map_or(0, |number| number.floor() as i32),
        }
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_owned())
    }
}

/// Deserializes an integer leniently, the way the host sheets read numbers:
/// anything that is not a finite number becomes 0.
#[cfg(feature = "serde")]
pub fn deserialize_lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Ok(Option::<RawValue>::deserialize(deserializer)?.map_or(0, |raw| raw.coerce()))
}

/// Deserializes an optional integer leniently: null, blank and non-numeric
/// values read as `None`.
#[cfg(feature = "serde")]
pub fn deserialize_lenient_opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Ok(match Option::<RawValue>::deserialize(deserializer)? {
        None | Some(RawValue::Null) => None,
        Some(RawValue::Text(text)) if text.trim().is_empty() => None,
        Some(raw) => raw
            .to_number()
            .filter(|number| number.is_finite())
            .map(|_| raw.coerce()),
    })
}

/// Raw attribute mapping as edited by the host.
///
/// Keys may use any casing until [`normalize`] canonicalizes them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AttributeInput {
    values: BTreeMap<String, RawValue>,
}

impl AttributeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an input from `(key, value)` pairs, keeping keys verbatim.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Sets a value under the canonical key, dropping other spellings.
    pub fn set(&mut self, attribute: Attribute, value: impl Into<RawValue>) {
        self.remove(attribute);
        self.values.insert(attribute.code().to_owned(), value.into());
    }

    /// Removes every spelling of the attribute.
    pub fn remove(&mut self, attribute: Attribute) -> Option<RawValue> {
        let keys = self.matching_keys(attribute);
        let mut removed = None;
        for key in keys {
            let value = self.values.remove(&key);
            if removed.is_none() {
                removed = value;
            }
        }
        removed
    }

    /// Looks the attribute up case-insensitively and coerces it.
    ///
    /// Returns `None` only when the attribute is absent.
    pub fn get(&self, attribute: Attribute) -> Option<i32> {
        self.matching_keys(attribute)
            .first()
            .and_then(|key| self.values.get(key))
            .map(RawValue::coerce)
    }

    /// Returns the attribute or its contextual default.
    pub fn resolve(&self, attribute: Attribute, defaults: &AttributeDefaults) -> i32 {
        self.get(attribute)
            .unwrap_or_else(|| attribute.default_value(defaults))
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        !self.matching_keys(attribute).is_empty()
    }

    /// Raw value stored under an exact key.
    pub fn raw(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Copies every key from `template` that this input lacks.
    ///
    /// Keys are compared case-insensitively; existing values are never
    /// overwritten.
    pub fn fill_missing(&mut self, template: &AttributeInput) {
        for (key, value) in &template.values {
            let present = self
                .values
                .keys()
                .any(|existing| existing.eq_ignore_ascii_case(key));
            if !present {
                self.values.insert(key.clone(), value.clone());
            }
        }
    }

    /// Keys spelling `attribute`, in lookup priority order: uppercase,
    /// lowercase, then any other casing.
    fn matching_keys(&self, attribute: Attribute) -> Vec<String> {
        let upper = attribute.code();
        let lower = upper.to_ascii_lowercase();
        let mut keys: Vec<String> = self
            .values
            .keys()
            .filter(|key| key.eq_ignore_ascii_case(upper))
            .cloned()
            .collect();
        keys.sort_by_key(|key| {
            if key == upper {
                0
            } else if *key == lower {
                1
            } else {
                2
            }
        });
        keys
    }
}

/// Canonicalizes the required attribute keys of `input` in place.
///
/// For each required attribute the value is looked up case-insensitively,
/// coerced to an integer (0 when malformed) and stored under the uppercase
/// code. Absent attributes stay absent: defaults are the caller's concern.
pub fn normalize<'a>(
    input: &'a mut AttributeInput,
    required: &[Attribute],
) -> &'a mut AttributeInput {
    for &attribute in required {
        if let Some(raw) = input.remove(attribute) {
            input
                .values
                .insert(attribute.code().to_owned(), RawValue::from(raw.coerce()));
        }
    }
    input
}

/// The six attributes every actor carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreAttributes {
    pub str: i32,
    pub con: i32,
    pub siz: i32,
    pub int: i32,
    pub pow: i32,
    pub dex: i32,
}

impl CoreAttributes {
    pub const fn new(str: i32, con: i32, siz: i32, int: i32, pow: i32, dex: i32) -> Self {
        Self {
            str,
            con,
            siz,
            int,
            pow,
            dex,
        }
    }

    /// Resolves the core attributes, filling absent keys with defaults.
    pub fn from_input(input: &AttributeInput, defaults: &AttributeDefaults) -> Self {
        Self {
            str: input.resolve(Attribute::Str, defaults),
            con: input.resolve(Attribute::Con, defaults),
            siz: input.resolve(Attribute::Siz, defaults),
            int: input.resolve(Attribute::Int, defaults),
            pow: input.resolve(Attribute::Pow, defaults),
            dex: input.resolve(Attribute::Dex, defaults),
        }
    }

    /// Combined STR + SIZ used for damage modifiers.
    pub const fn damage_total(&self) -> i32 {
        self.str.saturating_add(self.siz)
    }
}

impl Default for CoreAttributes {
    fn default() -> Self {
        let value = AttributeDefaults::DEFAULT_CORE;
        Self::new(value, value, value, value, value, value)
    }
}

/// Attributes of characters and NPCs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterAttributes {
    pub core: CoreAttributes,
    pub cha: i32,
    pub lck: i32,
    pub age: i32,
}

impl CharacterAttributes {
    /// Resolves character attributes.
    ///
    /// AGE falls back to `details_age` before the configured default.
    pub fn from_input(
        input: &AttributeInput,
        defaults: &AttributeDefaults,
        details_age: Option<i32>,
    ) -> Self {
        let age = input
            .get(Attribute::Age)
            .or(details_age)
            .unwrap_or(defaults.age);
        Self {
            core: CoreAttributes::from_input(input, defaults),
            cha: input.resolve(Attribute::Cha, defaults),
            lck: input.resolve(Attribute::Lck, defaults),
            age,
        }
    }
}
