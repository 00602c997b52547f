//! Categorical preference groups and per-institution category shares.
//!
//! Two groups exist: [`FieldOfStudy`] and [`Demographic`]. Each institution
//! carries the share of its degrees attributable to every category of a
//! group, kept in the group's canonical order.
//!
//! # Examples
//! ```
//! use collegiate_core::{Category, FieldOfStudy};
//!
//! assert_eq!(FieldOfStudy::Stem.label(), "STEM");
//! assert_eq!("Arts and Humanities".parse(), Ok(FieldOfStudy::ArtsAndHumanities));
//! ```

use std::fmt;
use std::str::FromStr;

/// A category within a group of share columns.
///
/// `ALL` lists the group's categories in canonical order. Labels are the
/// human-readable names clients send in requests.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// Name of the group, used in error messages and logs.
    const GROUP: &'static str;
    /// Every category of the group in canonical order.
    const ALL: &'static [Self];

    /// Return the label for this category.
    fn label(self) -> &'static str;

    /// Look up a category by its label, ignoring ASCII case.
    fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
    }
}

macro_rules! category_group {
    (
        $(#[$meta:meta])*
        $name:ident, $group:literal {
            $($(#[$variant_meta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($(#[$variant_meta])* #[cfg_attr(feature = "serde", serde(rename = $label))] $variant),+
        }

        impl Category for $name {
            const GROUP: &'static str = $group;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s).ok_or_else(|| format!("unknown {} category '{s}'", $group))
            }
        }
    };
}

category_group! {
    /// Broad field of study used for the `Major` preference.
    FieldOfStudy, "field of study" {
        /// Science, technology, engineering and mathematics.
        Stem => "STEM",
        /// Arts and humanities.
        ArtsAndHumanities => "Arts and Humanities",
    }
}

category_group! {
    /// Demographic group used for the `Race` preference.
    Demographic, "demographic" {
        /// White.
        White => "White",
        /// American Indian or Alaska Native.
        AmericanIndianOrAlaskaNative => "American Indian or Alaska Native",
        /// Asian.
        Asian => "Asian",
        /// Black or African American.
        BlackOrAfricanAmerican => "Black or African American",
        /// Latino.
        Latino => "Latino",
        /// Native Hawaiian or Other Pacific Islander.
        NativeHawaiianOrPacificIslander => "Native Hawaiian or Other Pacific Islander",
    }
}

/// Share of an institution's degrees attributed to each category of a group.
///
/// Entries keep the order they were inserted in; loaders insert them in
/// `C::ALL` order.
///
/// # Examples
/// ```
/// use collegiate_core::{CategoryShares, FieldOfStudy};
///
/// let shares = CategoryShares::new([
///     (FieldOfStudy::Stem, 0.8),
///     (FieldOfStudy::ArtsAndHumanities, 0.2),
/// ]);
/// assert_eq!(shares.share(FieldOfStudy::Stem), Some(0.8));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShares<C: Category> {
    entries: Vec<(C, f64)>,
}

impl<C: Category> Default for CategoryShares<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C: Category> CategoryShares<C> {
    /// Build shares from `(category, share)` pairs.
    ///
    /// A repeated category replaces the earlier value in place.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (C, f64)>,
    {
        let mut shares = Self::default();
        for (category, value) in entries {
            shares.insert(category, value);
        }
        shares
    }

    /// Insert or replace the share for `category`.
    pub fn insert(&mut self, category: C, value: f64) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((category, value)),
        }
    }

    /// Return the share recorded for `category`.
    pub fn share(&self, category: C) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, value)| *value)
    }

    /// Iterate over `(category, share)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (C, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Return the share values in entry order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    /// Number of recorded categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether no shares were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
