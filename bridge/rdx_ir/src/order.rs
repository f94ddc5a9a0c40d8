//! Flat-buffer layout conventions.

use std::fmt;
use std::str::FromStr;

/// How an n-dimensional source array is folded into the target's flat buffer.
///
/// The target runtime always reads buffers with the leftmost index varying
/// fastest. Each order decides which source index ends up where:
///
/// - `RowMajor`: the source `[i0][i1]...` maps straight onto the target
///   indices, so `i0` is the target row. Flat position is
///   `i0 + i1*d0 + i2*d0*d1 + ...`. The dimension vector is kept as is.
/// - `ColumnMajor`: the buffer is the source's natural nesting order
///   (rightmost index fastest). The dimension vector is reversed, so the
///   target sees the transpose.
/// - `ColumnMinor`: like `ColumnMajor`, but the last two source indices are
///   swapped first. A source `[matrix][row][column]` array becomes a target
///   `[row, column, matrix]` array.
///
/// Rank-1 arrays are laid out identically under every order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArrayOrder {
    #[default]
    RowMajor,
    ColumnMajor,
    ColumnMinor,
}

impl ArrayOrder {
    pub const ALL: [ArrayOrder; 3] = [
        ArrayOrder::RowMajor,
        ArrayOrder::ColumnMajor,
        ArrayOrder::ColumnMinor,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ArrayOrder::RowMajor => "row-major",
            ArrayOrder::ColumnMajor => "column-major",
            ArrayOrder::ColumnMinor => "column-minor",
        }
    }
}

impl fmt::Display for ArrayOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known array order.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown array order '{0}' (expected row-major, column-major or column-minor)")]
pub struct ParseArrayOrderError(pub String);

impl FromStr for ArrayOrder {
    type Err = ParseArrayOrderError;

    /// Accepts the kebab-case names plus `_`-separated and squashed spellings,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "rowmajor" => Ok(ArrayOrder::RowMajor),
            "columnmajor" => Ok(ArrayOrder::ColumnMajor),
            "columnminor" => Ok(ArrayOrder::ColumnMinor),
            _ => Err(ParseArrayOrderError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_display_agree() {
        for order in ArrayOrder::ALL {
            assert_eq!(order.to_string().parse::<ArrayOrder>(), Ok(order));
        }
    }

    #[test]
    fn test_parse_loose_spellings() {
        assert_eq!("COLUMN_MINOR".parse(), Ok(ArrayOrder::ColumnMinor));
        assert_eq!(" ColumnMajor ".parse(), Ok(ArrayOrder::ColumnMajor));
        assert_eq!(
            "diagonal".parse::<ArrayOrder>(),
            Err(ParseArrayOrderError("diagonal".to_owned()))
        );
    }

    #[test]
    fn test_default_is_row_major() {
        assert_eq!(ArrayOrder::default(), ArrayOrder::RowMajor);
    }
}
