use std::fmt::Formatter;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Column(u32);

impl Column {
    /// Builds a column from a single upper-case letter, usable in constants.
    /// # Examples
    /// ```
    /// use utilities_counter_importer::domain::sheets::column::Column;
    /// assert_eq!(Column::from_letter(b'C').value(), 3);
    /// assert_eq!(Column::from_letter(b'H').to_string(), "H");
    /// ```
    pub const fn from_letter(letter: u8) -> Self {
        Column((letter - b'A') as u32 + 1)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column(u32: {}, letters: {})", self.0, self)
    }
}

fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        let letter = (remainder as u8 + b'A') as char;
        result.push(letter);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}
