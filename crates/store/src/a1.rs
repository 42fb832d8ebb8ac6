//! A1 notation for sheet ranges and cells
//!
//! Supports the forms the roster sheets are addressed with:
//! `pilot_roster`, `pilot_roster!A1:Z`, `pilot_roster!G7`, `'Fleet 2'!A:C`.
//! Columns are bijective base-26 (`A` = 1, `Z` = 26, `AA` = 27) and rows
//! are 1-based.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StoreError};

/// Highest addressable row. A hosted sheet holds at most ten million cells.
pub const MAX_ROW: u32 = 10_000_000;

fn check_row(row: u32, address: &str) -> Result<u32> {
    match row {
        0 => Err(StoreError::invalid_address(address, "rows start at 1")),
        row if row > MAX_ROW => Err(StoreError::invalid_address(
            address,
            format!("rows end at {MAX_ROW}"),
        )),
        row => Ok(row),
    }
}

/// Convert column letters to a 1-based index.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Convert a 1-based column index to letters.
pub fn column_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        index -= 1;
        letters.push((b'A' + (index % 26) as u8) as char);
        index /= 26;
    }
    letters.iter().rev().collect()
}

/// One corner of a range. Either half may be open (`A` or `3`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bound {
    pub column: Option<u32>,
    pub row: Option<u32>,
}

impl Bound {
    fn is_open(&self) -> bool {
        self.column.is_none() && self.row.is_none()
    }

    fn parse(raw: &str, address: &str) -> Result<Self> {
        let split = raw
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(raw.len());
        let (letters, digits) = raw.split_at(split);

        if letters.is_empty() && digits.is_empty() {
            return Err(StoreError::invalid_address(address, "empty cell reference"));
        }

        let column = if letters.is_empty() {
            None
        } else {
            Some(column_index(letters).ok_or_else(|| {
                StoreError::invalid_address(address, format!("bad column `{letters}`"))
            })?)
        };

        let row = if digits.is_empty() {
            None
        } else {
            let row: u32 = digits.parse().map_err(|_| {
                StoreError::invalid_address(address, format!("bad row `{digits}`"))
            })?;
            Some(check_row(row, address)?)
        };

        Ok(Self { column, row })
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(column) = self.column {
            f.write_str(&column_letters(column))?;
        }
        if let Some(row) = self.row {
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

/// A rectangular range on one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
    pub sheet: String,
    pub start: Bound,
    pub end: Option<Bound>,
}

impl RangeRef {
    /// The whole of `sheet`
    pub fn sheet(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            start: Bound::default(),
            end: None,
        }
    }

    /// Inclusive 1-based row window; `None` upper bound is unbounded.
    pub fn rows(&self) -> (u32, Option<u32>) {
        Self::axis(self.start.row, self.end.map(|b| b.row), self.start.is_open())
    }

    /// Inclusive 1-based column window; `None` upper bound is unbounded.
    pub fn columns(&self) -> (u32, Option<u32>) {
        Self::axis(
            self.start.column,
            self.end.map(|b| b.column),
            self.start.is_open(),
        )
    }

    fn axis(start: Option<u32>, end: Option<Option<u32>>, whole_sheet: bool) -> (u32, Option<u32>) {
        match (whole_sheet, end) {
            (true, _) => (1, None),
            (false, Some(end)) => (start.unwrap_or(1), end),
            // Single reference: fixed on the given axis, open on the other.
            (false, None) => match start {
                Some(at) => (at, Some(at)),
                None => (1, None),
            },
        }
    }
}

impl FromStr for RangeRef {
    type Err = StoreError;

    fn from_str(address: &str) -> Result<Self> {
        let (sheet, rest) = split_sheet(address)?;

        let Some(rest) = rest else {
            return Ok(Self::sheet(sheet));
        };

        let (start, end) = match rest.split_once(':') {
            Some((start, end)) => (
                Bound::parse(start, address)?,
                Some(Bound::parse(end, address)?),
            ),
            None => (Bound::parse(rest, address)?, None),
        };

        Ok(Self { sheet, start, end })
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sheet(f, &self.sheet)?;
        if self.start.is_open() && self.end.is_none() {
            return Ok(());
        }
        write!(f, "!{}", self.start)?;
        if let Some(end) = self.end {
            write!(f, ":{end}")?;
        }
        Ok(())
    }
}

/// A single cell on one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub sheet: String,
    pub column: u32,
    pub row: u32,
}

impl CellRef {
    /// Build a cell from a column in letter form and a 1-based row.
    pub fn new(sheet: impl Into<String>, column: &str, row: u32) -> Result<Self> {
        let sheet = sheet.into();
        let address = format!("{sheet}!{column}{row}");
        let column = column_index(column)
            .ok_or_else(|| StoreError::invalid_address(&address, format!("bad column `{column}`")))?;
        let row = check_row(row, &address)?;
        Ok(Self { sheet, column, row })
    }
}

impl FromStr for CellRef {
    type Err = StoreError;

    fn from_str(address: &str) -> Result<Self> {
        let range: RangeRef = address.parse()?;
        match (range.start, range.end) {
            (
                Bound {
                    column: Some(column),
                    row: Some(row),
                },
                None,
            ) => Ok(Self {
                sheet: range.sheet,
                column,
                row,
            }),
            _ => Err(StoreError::invalid_address(address, "expected a single cell")),
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sheet(f, &self.sheet)?;
        write!(f, "!{}{}", column_letters(self.column), self.row)
    }
}

fn split_sheet(address: &str) -> Result<(String, Option<&str>)> {
    let (sheet, rest) = if let Some(quoted) = address.strip_prefix('\'') {
        let mut sheet = String::new();
        let mut chars = quoted.char_indices().peekable();
        let mut close = None;
        while let Some((i, c)) = chars.next() {
            if c == '\'' {
                if matches!(chars.peek(), Some((_, '\''))) {
                    sheet.push('\'');
                    chars.next();
                    continue;
                }
                close = Some(i);
                break;
            }
            sheet.push(c);
        }
        let close = close
            .ok_or_else(|| StoreError::invalid_address(address, "unterminated sheet quote"))?;
        let tail = &quoted[close + 1..];
        let rest = match tail.strip_prefix('!') {
            Some(rest) => Some(rest),
            None if tail.is_empty() => None,
            None => {
                return Err(StoreError::invalid_address(address, "expected `!` after sheet"))
            }
        };
        (sheet, rest)
    } else {
        match address.rsplit_once('!') {
            Some((sheet, rest)) => (sheet.to_string(), Some(rest)),
            None => (address.to_string(), None),
        }
    };

    if sheet.is_empty() {
        return Err(StoreError::invalid_address(address, "missing sheet name"));
    }
    Ok((sheet, rest))
}

fn write_sheet(f: &mut fmt::Formatter<'_>, sheet: &str) -> fmt::Result {
    if sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        f.write_str(sheet)
    } else {
        write!(f, "'{}'", sheet.replace('\'', "''"))
    }
}
