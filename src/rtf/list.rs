//! RTF list and numbering support.
//!
//! RTF expresses numbering two ways. Old writers put a `\pn` group in each
//! paragraph; newer ones declare lists once in `\listtable`, point at them
//! from `\listoverridetable`, and select an override per paragraph with
//! `\lsN\ilvlN`. Both resolve to a [`ListStyle`] and a nesting depth.

use serde::{Deserialize, Serialize};

/// Number of levels a list can define.
pub const MAX_LIST_LEVELS: usize = 9;

/// Marker style of a list paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ListStyle {
    /// Not a list paragraph
    #[default]
    None,
    Disc,
    Circle,
    Square,
    /// Arabic numerals (1, 2, 3...)
    Decimal,
    /// Lowercase letters (a, b, c...)
    LowerCaseLetter,
    /// Uppercase letters (A, B, C...)
    UpperCaseLetter,
    /// Lowercase Roman numerals (i, ii, iii...)
    LowerCaseRoman,
    /// Uppercase Roman numerals (I, II, III...)
    UpperCaseRoman,
    /// Paragraph continues a list item without a marker of its own
    Skip,
}

impl ListStyle {
    /// Map the bullet character of a list level to a marker style.
    ///
    /// Characters other than the three known bullets map to a disc.
    pub fn from_bullet(ch: u16) -> Self {
        match ch {
            0x2022 => ListStyle::Disc,
            0x25E6 => ListStyle::Circle,
            0x25AA => ListStyle::Square,
            _ => ListStyle::Disc,
        }
    }

    /// Map a `\levelnfcN` number format to a marker style.
    pub fn from_level_format(format: i32) -> Self {
        match format {
            // 22 is zero-padded decimal
            0 | 22 => ListStyle::Decimal,
            1 => ListStyle::UpperCaseRoman,
            2 => ListStyle::LowerCaseRoman,
            3 => ListStyle::UpperCaseLetter,
            4 => ListStyle::LowerCaseLetter,
            _ => ListStyle::None,
        }
    }
}

/// A list from `\listtable`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDefinition {
    pub id: i32,
    levels: [Option<ListStyle>; MAX_LIST_LEVELS],
}

impl ListDefinition {
    /// Style of a level, 1-based.
    pub fn level(&self, level: usize) -> Option<ListStyle> {
        level
            .checked_sub(1)
            .and_then(|index| self.levels.get(index))
            .copied()
            .flatten()
    }
}

/// List table.
#[derive(Debug, Clone, Default)]
pub struct ListTable {
    lists: Vec<ListDefinition>,
}

impl ListTable {
    #[inline]
    pub fn new() -> Self {
        Self { lists: Vec::new() }
    }

    /// Start a new list definition.
    pub fn define(&mut self) {
        self.lists.push(ListDefinition::default());
    }

    /// Set the id of the list being defined.
    pub fn set_id(&mut self, id: i32) {
        if let Some(list) = self.lists.last_mut() {
            list.id = id;
        }
    }

    /// Record the style of a level of the list being defined.
    ///
    /// The first style recorded for a level sticks. `ListStyle::None`
    /// records nothing, so a bullet from `\leveltext` can still define a
    /// level whose number format had no numeric style.
    pub fn set_style(&mut self, level: usize, style: ListStyle) {
        if style == ListStyle::None || !(1..=MAX_LIST_LEVELS).contains(&level) {
            return;
        }
        if let Some(list) = self.lists.last_mut() {
            let slot = &mut list.levels[level - 1];
            if slot.is_none() {
                *slot = Some(style);
            }
        }
    }

    /// Style of `level` (1-based) in the list with `id`.
    pub fn get(&self, id: i32, level: usize) -> Option<ListStyle> {
        self.lists
            .iter()
            .find(|list| list.id == id)
            .and_then(|list| list.level(level))
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.lists.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// An entry of `\listoverridetable`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOverride {
    pub override_id: i32,
    pub list_id: i32,
}

/// List override table, mapping `\lsN` to a list id.
#[derive(Debug, Clone, Default)]
pub struct ListOverrideTable {
    overrides: Vec<ListOverride>,
}

impl ListOverrideTable {
    #[inline]
    pub fn new() -> Self {
        Self {
            overrides: Vec::new(),
        }
    }

    /// Start a new override.
    pub fn define(&mut self) {
        self.overrides.push(ListOverride::default());
    }

    pub fn set_list_id(&mut self, list_id: i32) {
        if let Some(entry) = self.overrides.last_mut() {
            entry.list_id = list_id;
        }
    }

    pub fn set_override_id(&mut self, override_id: i32) {
        if let Some(entry) = self.overrides.last_mut() {
            entry.override_id = override_id;
        }
    }

    /// List id selected by `override_id`.
    pub fn get(&self, override_id: i32) -> Option<i32> {
        self.overrides
            .iter()
            .find(|entry| entry.override_id == override_id)
            .map(|entry| entry.list_id)
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.overrides.len()
    }
}

/// Accumulates a legacy `\pn` list while its group is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacyList {
    pub style: ListStyle,
    /// 0-based nesting level
    pub level: u32,
}

impl LegacyList {
    /// Apply `\pnlvlN`; levels run 1 to 9.
    pub fn set_level(&mut self, level: i32) {
        self.level = (level.clamp(1, MAX_LIST_LEVELS as i32) - 1) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_mapping() {
        assert_eq!(ListStyle::from_bullet(0x2022), ListStyle::Disc);
        assert_eq!(ListStyle::from_bullet(0x25E6), ListStyle::Circle);
        assert_eq!(ListStyle::from_bullet(0x25AA), ListStyle::Square);
        assert_eq!(ListStyle::from_bullet(b'-' as u16), ListStyle::Disc);
        assert_eq!(ListStyle::from_bullet(0xF0B7), ListStyle::Disc);
    }

    #[test]
    fn test_level_format_mapping() {
        assert_eq!(ListStyle::from_level_format(0), ListStyle::Decimal);
        assert_eq!(ListStyle::from_level_format(22), ListStyle::Decimal);
        assert_eq!(ListStyle::from_level_format(1), ListStyle::UpperCaseRoman);
        assert_eq!(ListStyle::from_level_format(4), ListStyle::LowerCaseLetter);
        assert_eq!(ListStyle::from_level_format(23), ListStyle::None);
    }

    #[test]
    fn test_list_table_first_write_wins() {
        let mut table = ListTable::new();
        table.define();
        table.set_id(7);
        table.set_style(1, ListStyle::None);
        table.set_style(1, ListStyle::Circle);
        table.set_style(1, ListStyle::Decimal);
        table.set_style(2, ListStyle::LowerCaseRoman);
        table.set_style(10, ListStyle::Decimal);

        assert_eq!(table.count(), 1);
        assert_eq!(table.get(7, 1), Some(ListStyle::Circle));
        assert_eq!(table.get(7, 2), Some(ListStyle::LowerCaseRoman));
        assert_eq!(table.get(7, 3), None);
        assert_eq!(table.get(7, 0), None);
        assert_eq!(table.get(8, 1), None);
    }

    #[test]
    fn test_list_table_writes_to_last_list() {
        let mut table = ListTable::new();
        table.set_style(1, ListStyle::Disc);
        table.set_id(1);
        assert!(table.is_empty());

        table.define();
        table.set_id(1);
        table.define();
        table.set_id(2);
        table.set_style(1, ListStyle::Square);

        assert_eq!(table.get(1, 1), None);
        assert_eq!(table.get(2, 1), Some(ListStyle::Square));
    }

    #[test]
    fn test_override_table() {
        let mut table = ListOverrideTable::new();
        table.define();
        table.set_list_id(100);
        table.set_override_id(1);
        table.define();
        table.set_list_id(200);
        table.set_override_id(2);

        assert_eq!(table.count(), 2);
        assert_eq!(table.get(1), Some(100));
        assert_eq!(table.get(2), Some(200));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_legacy_level_clamped() {
        let mut list = LegacyList::default();
        list.set_level(3);
        assert_eq!(list.level, 2);
        list.set_level(0);
        assert_eq!(list.level, 0);
        list.set_level(42);
        assert_eq!(list.level, 8);
    }
}
