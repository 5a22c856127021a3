//! Purchase plans, fragrances and the radio groups that select them.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Single,
    Double,
    Triple,
}

impl Plan {
    pub const ALL: [Self; 3] = [Self::Single, Self::Double, Self::Triple];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
        }
    }

    /// Group whose checked value picks the fragrance for this plan.
    ///
    /// Triple plans have no fragrance picker on the page yet, so the
    /// default fragrance always applies.
    #[must_use]
    pub const fn fragrance_source(self) -> Option<OptionGroup> {
        match self {
            Self::Single => Some(OptionGroup::Fragrance),
            Self::Double => Some(OptionGroup::FragranceDoubleChoice1),
            Self::Triple => None,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "triple" => Ok(Self::Triple),
            other => Err(CatalogError::UnknownPlan(other.to_string())),
        }
    }
}

impl From<Plan> for String {
    fn from(value: Plan) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Fragrance {
    #[default]
    Original,
    Lily,
    Rose,
}

impl Fragrance {
    pub const ALL: [Self; 3] = [Self::Original, Self::Lily, Self::Rose];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Lily => "lily",
            Self::Rose => "rose",
        }
    }
}

impl fmt::Display for Fragrance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fragrance {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Self::Original),
            "lily" => Ok(Self::Lily),
            "rose" => Ok(Self::Rose),
            other => Err(CatalogError::UnknownFragrance(other.to_string())),
        }
    }
}

impl From<Fragrance> for String {
    fn from(value: Fragrance) -> Self {
        value.as_str().to_string()
    }
}

/// Radio groups tracked on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionGroup {
    PurchasePlan,
    Fragrance,
    #[serde(rename = "fragrance-double-choice-1")]
    FragranceDoubleChoice1,
    #[serde(rename = "fragrance-double-choice-2")]
    FragranceDoubleChoice2,
}

impl OptionGroup {
    pub const ALL: [Self; 4] = [
        Self::PurchasePlan,
        Self::Fragrance,
        Self::FragranceDoubleChoice1,
        Self::FragranceDoubleChoice2,
    ];

    #[must_use]
    pub const fn logical_name(self) -> &'static str {
        match self {
            Self::PurchasePlan => "purchase-plan",
            Self::Fragrance => "fragrance",
            Self::FragranceDoubleChoice1 => "fragrance-double-choice-1",
            Self::FragranceDoubleChoice2 => "fragrance-double-choice-2",
        }
    }

    /// `name` attribute of the radio inputs in the page markup.
    #[must_use]
    pub const fn input_name(self) -> &'static str {
        match self {
            Self::PurchasePlan => "subscription",
            Self::Fragrance => "fragrance",
            Self::FragranceDoubleChoice1 => "fragrance-double1",
            Self::FragranceDoubleChoice2 => "fragrance-double2",
        }
    }

    /// Value assumed when nothing in the group is checked.
    #[must_use]
    pub const fn default_value(self) -> &'static str {
        match self {
            Self::PurchasePlan => Plan::Single.as_str(),
            Self::Fragrance | Self::FragranceDoubleChoice1 | Self::FragranceDoubleChoice2 => {
                Fragrance::Original.as_str()
            }
        }
    }
}

impl fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.logical_name())
    }
}

/// Composite `{plan}-{fragrance}` key addressing the cart URL table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    #[must_use]
    pub fn new(plan: &str, fragrance: &str) -> Self {
        Self(format!("{plan}-{fragrance}"))
    }

    #[must_use]
    pub fn of(plan: Plan, fragrance: Fragrance) -> Self {
        Self::new(plan.as_str(), fragrance.as_str())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Every key of the declared plan × fragrance space.
    pub fn declared() -> impl Iterator<Item = Self> {
        Plan::ALL
            .into_iter()
            .flat_map(|plan| Fragrance::ALL.into_iter().map(move |f| Self::of(plan, f)))
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ids_roundtrip_through_strings() {
        for plan in Plan::ALL {
            assert_eq!(plan.as_str().parse::<Plan>().unwrap(), plan);
        }
        assert!(matches!(
            "quad".parse::<Plan>(),
            Err(CatalogError::UnknownPlan(v)) if v == "quad"
        ));
    }

    #[test]
    fn fragrance_source_follows_plan() {
        assert_eq!(Plan::Single.fragrance_source(), Some(OptionGroup::Fragrance));
        assert_eq!(
            Plan::Double.fragrance_source(),
            Some(OptionGroup::FragranceDoubleChoice1)
        );
        assert_eq!(Plan::Triple.fragrance_source(), None);
    }

    #[test]
    fn input_names_match_markup() {
        let names: Vec<_> = OptionGroup::ALL.iter().map(|g| g.input_name()).collect();
        assert_eq!(
            names,
            ["subscription", "fragrance", "fragrance-double1", "fragrance-double2"]
        );
        assert_eq!(OptionGroup::PurchasePlan.default_value(), "single");
        assert_eq!(OptionGroup::FragranceDoubleChoice2.default_value(), "original");
    }

    #[test]
    fn declared_keys_cover_nine_combinations() {
        let keys: Vec<String> = LookupKey::declared().map(|k| k.to_string()).collect();
        assert_eq!(keys.len(), 9);
        assert_eq!(keys.first().map(String::as_str), Some("single-original"));
        assert_eq!(keys.last().map(String::as_str), Some("triple-rose"));
    }
}
