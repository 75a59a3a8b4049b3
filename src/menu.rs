//! Validation of single lines of interactive input.
//!
//! Each function takes one line as typed by the user and either returns
//! the validated value or an [InputError]. Re-prompting is left to the
//! caller.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("input is not a number")]
    NotANumber,
    #[error("{value} is not between {min} and {max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("input is neither Y nor N")]
    NotYesNo,
}

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayAll,
    Edit,
    Quit,
}

impl MenuChoice {
    pub const COUNT: i64 = 3;
}

pub fn parse_menu_choice(input: &str) -> Result<MenuChoice, InputError> {
    match leading_int(input)? {
        1 => Ok(MenuChoice::DisplayAll),
        2 => Ok(MenuChoice::Edit),
        3 => Ok(MenuChoice::Quit),
        value => Err(InputError::OutOfRange {
            value,
            min: 1,
            max: MenuChoice::COUNT,
        }),
    }
}

/// Parses a 1-based record number and returns the 0-based index.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, InputError> {
    let value = leading_int(input)?;
    let max = i64::try_from(count).unwrap_or(i64::MAX);
    if value < 1 || value > max {
        return Err(InputError::OutOfRange { value, min: 1, max });
    }
    usize::try_from(value - 1).map_err(|_| InputError::OutOfRange { value, min: 1, max })
}

/// Only the first non-whitespace character counts, so `yes` and `no`
/// are accepted too.
pub fn parse_yes_no(input: &str) -> Result<bool, InputError> {
    match input.trim_start().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('Y') => Ok(true),
        Some('N') => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

/// Integer at the start of `input`, after leading whitespace. Anything
/// following the digits is ignored.
fn leading_int(input: &str) -> Result<i64, InputError> {
    let s = input.trim_start();
    let digits_start = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return Err(InputError::NotANumber);
    }

    let end = digits_start + digits_len;
    s[..end].parse().map_err(|_| InputError::NotANumber)
}
