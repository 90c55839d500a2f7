//! Dice formula parsing.
//!
//! Grammar (whitespace ignored, `d` case-insensitive):
//!
//! ```text
//! formula := sign? term (('+' | '-') term)*
//! term    := count? 'd' faces | constant
//! ```
//!
//! Examples: `1d100`, `2d6+1`, `1d6-1d4`, `d8+1d6`.

use core::fmt;
use core::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::stats::DamageModifier;

/// Errors raised while parsing a dice formula.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaError {
    #[error("dice formula is empty")]
    Empty,

    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("missing die size after 'd' at position {position}")]
    MissingFaces { position: usize },

    #[error("formula ends with a dangling operator")]
    DanglingOperator,

    #[error("dice count must be at least 1")]
    ZeroDice,

    #[error("die size must be at least 1")]
    ZeroFaces,

    #[error("number too large at position {position}")]
    NumberTooLarge { position: usize },

    #[error("formula rolls {count} dice, more than the limit of {limit}")]
    TooManyDice { count: u32, limit: u32 },
}

impl GameError for FormulaError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use FormulaError::*;
        match self {
            Empty => "FORMULA_EMPTY",
            UnexpectedChar { .. } => "FORMULA_UNEXPECTED_CHAR",
            MissingFaces { .. } => "FORMULA_MISSING_FACES",
            DanglingOperator => "FORMULA_DANGLING_OPERATOR",
            ZeroDice => "FORMULA_ZERO_DICE",
            ZeroFaces => "FORMULA_ZERO_FACES",
            NumberTooLarge { .. } => "FORMULA_NUMBER_TOO_LARGE",
            TooManyDice { .. } => "FORMULA_TOO_MANY_DICE",
        }
    }
}

/// One signed term of a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaTerm {
    Dice { negative: bool, count: u32, faces: u32 },
    Constant { negative: bool, value: u32 },
}

impl FormulaTerm {
    pub const fn is_negative(&self) -> bool {
        match self {
            FormulaTerm::Dice { negative, .. } | FormulaTerm::Constant { negative, .. } => {
                *negative
            }
        }
    }

    /// Smallest and largest contribution of this term.
    pub fn range(&self) -> (i64, i64) {
        let (low, high) = match *self {
            FormulaTerm::Dice { count, faces, .. } => {
                (i64::from(count), i64::from(count) * i64::from(faces))
            }
            FormulaTerm::Constant { value, .. } => (i64::from(value), i64::from(value)),
        };
        if self.is_negative() {
            (-high, -low)
        } else {
            (low, high)
        }
    }
}

/// A parsed dice formula.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DiceFormula {
    terms: Vec<FormulaTerm>,
}

impl DiceFormula {
    /// Upper bound on dice rolled by one formula.
    pub const MAX_DICE: u32 = 1000;

    /// The percentile check formula.
    pub fn d100() -> Self {
        Self {
            terms: vec![FormulaTerm::Dice {
                negative: false,
                count: 1,
                faces: 100,
            }],
        }
    }

    /// `count`d`faces` with no modifiers.
    pub fn dice(count: u32, faces: u32) -> Result<Self, FormulaError> {
        Ok(Self {
            terms: vec![dice_term(false, count, faces)?],
        })
    }

    pub fn parse(input: &str) -> Result<Self, FormulaError> {
        Parser::new(input).parse()
    }

    pub fn terms(&self) -> &[FormulaTerm] {
        &self.terms
    }

    /// Appends a damage modifier term (`+1d6`, `-1d4`); no-op when empty.
    ///
    /// Fails if the modifier die is empty or the result exceeds
    /// [`Self::MAX_DICE`].
    pub fn with_modifier(mut self, modifier: &DamageModifier) -> Result<Self, FormulaError> {
        if modifier.is_none() {
            return Ok(self);
        }
        self.terms.push(dice_term(
            modifier.steps < 0,
            modifier.steps.unsigned_abs(),
            modifier.die,
        )?);
        let count = self.dice_count();
        if count > Self::MAX_DICE {
            return Err(FormulaError::TooManyDice {
                count,
                limit: Self::MAX_DICE,
            });
        }
        Ok(self)
    }

    /// Lowest and highest possible totals.
    pub fn bounds(&self) -> (i64, i64) {
        self.terms.iter().fold((0, 0), |(low, high), term| {
            let (term_low, term_high) = term.range();
            (low.saturating_add(term_low), high.saturating_add(term_high))
        })
    }

    /// Total number of dice rolled, saturating at `u32::MAX`.
    pub fn dice_count(&self) -> u32 {
        self.terms.iter().fold(0, |total, term| match term {
            FormulaTerm::Dice { count, .. } => total.saturating_add(*count),
            FormulaTerm::Constant { .. } => total,
        })
    }
}

/// Validates one dice term against the per-formula limits.
fn dice_term(negative: bool, count: u32, faces: u32) -> Result<FormulaTerm, FormulaError> {
    if count == 0 {
        return Err(FormulaError::ZeroDice);
    }
    if faces == 0 {
        return Err(FormulaError::ZeroFaces);
    }
    if count > DiceFormula::MAX_DICE {
        return Err(FormulaError::TooManyDice {
            count,
            limit: DiceFormula::MAX_DICE,
        });
    }
    Ok(FormulaTerm::Dice {
        negative,
        count,
        faces,
    })
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            if term.is_negative() {
                f.write_str("-")?;
            } else if index > 0 {
                f.write_str("+")?;
            }
            match term {
                FormulaTerm::Dice { count, faces, .. } => write!(f, "{count}d{faces}")?,
                FormulaTerm::Constant { value, .. } => write!(f, "{value}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for DiceFormula {
    type Err = FormulaError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl TryFrom<String> for DiceFormula {
    type Error = FormulaError;

    fn try_from(input: String) -> Result<Self, Self::Error> {
        Self::parse(&input)
    }
}

impl From<DiceFormula> for String {
    fn from(formula: DiceFormula) -> Self {
        formula.to_string()
    }
}

/// Single-pass parser over the characters of a formula.
struct Parser {
    chars: Vec<char>,
    position: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().filter(|c| !c.is_whitespace()).collect(),
            position: 0,
        }
    }

    fn parse(mut self) -> Result<DiceFormula, FormulaError> {
        if self.chars.is_empty() {
            return Err(FormulaError::Empty);
        }

        let mut terms = Vec::new();
        let mut dice = 0u32;
        let mut negative = self.sign();
        loop {
            let term = self.term(negative)?;
            if let FormulaTerm::Dice { count, .. } = term {
                dice = dice.saturating_add(count);
                if dice > DiceFormula::MAX_DICE {
                    return Err(FormulaError::TooManyDice {
                        count: dice,
                        limit: DiceFormula::MAX_DICE,
                    });
                }
            }
            terms.push(term);
            match self.peek() {
                None => break,
                Some('+') | Some('-') => {
                    negative = self.sign();
                    if self.peek().is_none() {
                        return Err(FormulaError::DanglingOperator);
                    }
                }
                Some(found) => {
                    return Err(FormulaError::UnexpectedChar {
                        found,
                        position: self.position,
                    });
                }
            }
        }

        Ok(DiceFormula { terms })
    }

    /// Consumes an optional sign; returns true for '-'.
    fn sign(&mut self) -> bool {
        match self.peek() {
            Some('-') => {
                self.position += 1;
                true
            }
            Some('+') => {
                self.position += 1;
                false
            }
            _ => false,
        }
    }

    fn term(&mut self, negative: bool) -> Result<FormulaTerm, FormulaError> {
        let start = self.position;
        let count = self.number()?;

        if matches!(self.peek(), Some('d') | Some('D')) {
            self.position += 1;
            let faces_position = self.position;
            let faces = self
                .number()?
                .ok_or(FormulaError::MissingFaces {
                    position: faces_position,
                })?;
            return dice_term(negative, count.unwrap_or(1), faces);
        }

        match count {
            Some(value) => Ok(FormulaTerm::Constant { negative, value }),
            None => match self.peek() {
                Some(found) => Err(FormulaError::UnexpectedChar {
                    found,
                    position: start,
                }),
                None => Err(FormulaError::DanglingOperator),
            },
        }
    }

    fn number(&mut self) -> Result<Option<u32>, FormulaError> {
        let start = self.position;
        let mut value: Option<u32> = None;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            value = Some(
                value
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or(FormulaError::NumberTooLarge { position: start })?,
            );
            self.position += 1;
        }
        Ok(value)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }
}
