use anchor_lang::prelude::*;

use crate::{
    config::PrizeSettings,
    error::LotteryError,
    state::prize::{PrizeLevel, PrizeState, PrizeTable},
};

/// Default prize configuration every new activity is copied from.
///
/// The template is immutable once built. Activities receive their own deep copy
/// through [`PrizeTemplate::instantiate`], so stock consumed in one group never
/// leaks into another group or back into the template.
#[derive(Clone, Debug, PartialEq)]
pub struct PrizeTemplate {
    table: PrizeTable,
}

impl PrizeTemplate {
    /// Builds a template from `(level name, settings)` pairs. Iteration order of
    /// `entries` becomes the template order used by status reports.
    ///
    /// # Errors
    /// - `UnknownPrizeLevel` for a name that is not a prize level
    /// - `NoPrizeNotConfigurable` for the `none` level
    /// - `DuplicatePrizeLevel` when a level appears twice (names compare case-insensitively)
    /// - `InvalidProbability` for a probability outside [0, 1]
    /// - `EmptyTemplate` when no level is configured
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, PrizeSettings)>,
        K: AsRef<str>,
    {
        let mut table = PrizeTable::new();
        for (key, settings) in entries {
            let level = PrizeLevel::from_key(key.as_ref())?;
            require!(level.is_prize(), LotteryError::NoPrizeNotConfigurable);
            require!(!table.contains(level), LotteryError::DuplicatePrizeLevel);
            require!(
                is_valid_probability(settings.probability),
                LotteryError::InvalidProbability
            );
            table.insert(
                level,
                PrizeState::new(settings.probability, settings.count, settings.name),
            );
        }
        require!(!table.is_empty(), LotteryError::EmptyTemplate);

        Ok(Self { table })
    }

    /// Fresh, independent prize table for a new activity.
    pub fn instantiate(&self) -> PrizeTable {
        self.table.clone()
    }

    pub fn get(&self, level: PrizeLevel) -> Option<&PrizeState> {
        self.table.get(level)
    }

    pub fn contains(&self, level: PrizeLevel) -> bool {
        self.table.contains(level)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrizeLevel, &PrizeState)> {
        self.table.iter()
    }
}

pub(crate) fn is_valid_probability(probability: f64) -> bool {
    probability.is_finite() && (0.0..=1.0).contains(&probability)
}

#[cfg(test)]
pub(crate) fn settings(probability: f64, count: u32, name: &str) -> PrizeSettings {
    PrizeSettings {
        probability,
        count,
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{code, error_code_of};

    #[test]
    fn keeps_entry_order() {
        let template = PrizeTemplate::from_entries([
            ("third", settings(0.3, 10, "Sticker")),
            ("SPECIAL", settings(0.01, 1, "Console")),
            ("First", settings(0.1, 2, "Headphones")),
        ])
        .unwrap();

        let order: Vec<_> = template.iter().map(|(level, _)| level).collect();
        assert_eq!(
            order,
            vec![PrizeLevel::Third, PrizeLevel::Special, PrizeLevel::First]
        );
        assert_eq!(template.get(PrizeLevel::Special).unwrap().remaining, 1);
    }

    #[test]
    fn rejects_bad_entries() {
        let cases = [
            (vec![("fifth", settings(0.1, 1, "x"))], LotteryError::UnknownPrizeLevel),
            (vec![("none", settings(0.1, 1, "x"))], LotteryError::NoPrizeNotConfigurable),
            (
                vec![("first", settings(0.1, 1, "x")), ("FIRST", settings(0.2, 1, "y"))],
                LotteryError::DuplicatePrizeLevel,
            ),
            (vec![("first", settings(1.5, 1, "x"))], LotteryError::InvalidProbability),
            (vec![("first", settings(f64::NAN, 1, "x"))], LotteryError::InvalidProbability),
            (vec![], LotteryError::EmptyTemplate),
        ];

        for (entries, expected) in cases {
            let err = PrizeTemplate::from_entries(entries).unwrap_err();
            assert_eq!(error_code_of(&err), code(expected));
        }
    }

    #[test]
    fn instantiated_tables_do_not_alias() {
        let template =
            PrizeTemplate::from_entries([("first", settings(0.5, 2, "Bike"))]).unwrap();
        let mut a = template.instantiate();
        let b = template.instantiate();

        assert!(a.get_mut(PrizeLevel::First).unwrap().consume());
        assert_eq!(a.get(PrizeLevel::First).unwrap().remaining, 1);
        assert_eq!(b.get(PrizeLevel::First).unwrap().remaining, 2);
        assert_eq!(template.get(PrizeLevel::First).unwrap().remaining, 2);
    }
}
