//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For finding and rolling the dice terms written in a request, see
//! [`resolver`].

pub mod resolver;
pub mod roller;

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::{
	resolver::{resolve, scan, Piece, Resolved},
	roller::Roller,
};
use crate::expr::Describe;

/// A set of dice that all have the same number of sides, written as `NdM` in dice notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct Dice {
	/// Number of dice to roll
	pub count: u32,

	/// Number of sides for each die
	pub sides: u32,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of sides.
	#[must_use]
	pub const fn new(count: u32, sides: u32) -> Self {
		Self { count, sides }
	}

	/// Gets the smallest total the dice can roll.
	#[must_use]
	pub const fn min_total(&self) -> u64 {
		self.count as u64
	}

	/// Gets the largest total the dice can roll.
	#[must_use]
	pub const fn max_total(&self) -> u64 {
		(self.count as u64).saturating_mul(self.sides as u64)
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)
	}
}

/// Upper bounds on the dice a single term may ask for
///
/// Every die is a separate random draw, so these cap how much work one term can demand.
///
/// # Examples
/// ```
/// use dicebatch::dice::{Dice, Error, Limits};
///
/// let limits = Limits::default();
/// assert!(limits.check(&Dice::new(400, 2)).is_ok());
/// assert!(limits.check(&Dice::new(2, 400)).is_ok());
/// assert!(matches!(limits.check(&Dice::new(20_000, 6)), Err(Error::LimitExceeded { .. })));
/// assert!(matches!(limits.check(&Dice::new(2, 0)), Err(Error::InvalidSides(..))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct Limits {
	/// Maximum number of dice in one term
	pub max_count: u32,

	/// Maximum number of sides per die
	pub max_sides: u32,
}

impl Limits {
	/// Default maximum number of dice in one term
	pub const DEFAULT_MAX_COUNT: u32 = 10_000;

	/// Default maximum number of sides per die
	pub const DEFAULT_MAX_SIDES: u32 = 10_000;

	/// Checks that a set of dice can be rolled under these limits.
	///
	/// # Errors
	/// If the dice have zero sides or exceed either limit, an error variant is returned.
	pub fn check(&self, dice: &Dice) -> Result<(), Error> {
		if dice.sides == 0 {
			return Err(Error::InvalidSides(*dice));
		}
		if dice.count > self.max_count || dice.sides > self.max_sides {
			return Err(Error::LimitExceeded {
				term: dice.to_string(),
				limits: *self,
			});
		}
		Ok(())
	}
}

impl Default for Limits {
	fn default() -> Self {
		Self {
			max_count: Self::DEFAULT_MAX_COUNT,
			max_sides: Self::DEFAULT_MAX_SIDES,
		}
	}
}

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Rolled {
	/// Each individual die roll that was made
	pub rolls: Vec<u32>,

	/// Dice that were rolled to produce this
	pub dice: Dice,
}

impl Rolled {
	/// Calculates the total of all roll values.
	///
	/// # Errors
	/// If there is an integer overflow while summing the die rolls, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use dicebatch::dice::{roller::{Max as MaxRoller, Roller}, Dice};
	///
	/// let rolled = MaxRoller.roll(&Dice::new(4, 8));
	/// assert_eq!(rolled.total()?, 32);
	/// # Ok::<(), dicebatch::dice::Error>(())
	/// ```
	pub fn total(&self) -> Result<u64, Error> {
		let mut sum: u64 = 0;
		for roll in &self.rolls {
			sum = sum
				.checked_add(u64::from(*roll))
				.ok_or_else(|| Error::Overflow(self.dice))?;
		}
		Ok(sum)
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values.
	#[must_use]
	pub fn from_dice_and_rolls(dice: Dice, rolls: impl IntoIterator<Item = u32>) -> Self {
		Self {
			rolls: rolls.into_iter().collect(),
			dice,
		}
	}
}

impl Describe for Rolled {
	/// Builds a string of the dice the roll is from and a list of all of the individual rolled dice.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use dicebatch::{dice::{Dice, Rolled}, expr::Describe};
	///
	/// let rolled = Rolled::from_dice_and_rolls(Dice::new(4, 6), [6, 2, 5, 3]);
	/// assert_eq!(rolled.describe(None), "4d6[6, 2, 5, 3]");
	/// assert_eq!(rolled.describe(Some(2)), "4d6[6, 2, 2 more...]");
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let total_rolls = self.rolls.len();
		let truncated_rolls = total_rolls.saturating_sub(list_limit);

		format!(
			"{}[{}{}]",
			self.dice,
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

impl fmt::Display for Rolled {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// A `d` is missing the digits for its count, its sides, or both.
	///
	/// # Examples
	/// ```
	/// use dicebatch::dice::{scan, Error, Limits};
	///
	/// assert!(matches!(scan("2d", &Limits::default()), Err(Error::Malformed { .. })));
	/// assert!(matches!(scan("d6", &Limits::default()), Err(Error::Malformed { .. })));
	/// ```
	#[error("malformed dice term \"{term}\"")]
	Malformed {
		/// Text of the term, as written
		term: String,

		/// Byte offset of the term in the scanned text
		offset: usize,
	},

	/// The dice have zero sides, so there is nothing to roll.
	#[error("{0} has no sides to roll")]
	InvalidSides(Dice),

	/// The dice ask for more dice or sides than the configured [`Limits`] allow.
	#[error("dice term \"{term}\" exceeds the limit of {}d{}", .limits.max_count, .limits.max_sides)]
	LimitExceeded {
		/// Text of the term, as written
		term: String,

		/// Limits that were exceeded
		limits: Limits,
	},

	/// There was an integer overflow when summing roll values.
	/// This normally should not ever happen given the types used for die counts, sides, and totals.
	#[error("integer overflow while totalling {0}")]
	Overflow(Dice),
}
