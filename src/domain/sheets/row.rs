use std::fmt::Formatter;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row {
    index: u32,
}

impl Row {
    pub fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1), // Convert to zero-based index
        }
    }

    /// The last row of a block of `count` rows starting at row 1.
    /// Values read from a whole-column range start at row 1, so this is the
    /// row of the last value read.
    pub fn last_of(count: usize) -> Self {
        Row::from_row(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// Returns the next row down.
    /// # Examples
    /// ```
    /// use utilities_counter_importer::domain::sheets::row::Row;
    /// assert_eq!(Row::from_row(5).next(), Row::from_row(6));
    /// ```
    pub fn next(&self) -> Self {
        Row::from_index(self.index.saturating_add(1))
    }

    /// Returns the row number as a 1-based index.
    /// # Examples
    /// ```
    /// use utilities_counter_importer::domain::sheets::row::Row;
    /// let row = Row::from_index(0);
    /// assert_eq!(row.row(), 1);
    /// let row = Row::from_index(4);
    /// assert_eq!(row.row(), 5);
    /// ```
    pub fn row(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.row())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.row())
    }
}
