//! Finding the `NdM` dice terms written in a piece of text and replacing them with rolled totals.
//!
//! Scanning and rolling are separate steps so that every term in a request can be checked before a single die is
//! rolled.
//!
//! Terms are found with a left-to-right, maximal-match scan: a term is the full run of digits before a `d`, the `d`,
//! and the full run of digits after it. Matches never overlap, so a digit run belongs to at most one term. In `2d2d2`,
//! the first term `2d2` consumes the middle `2`, which leaves the second `d` without a count and makes the text
//! malformed.

use alloc::{
	borrow::ToOwned,
	string::{String, ToString},
	vec::Vec,
};

use super::{Dice, Error, Limits, Roller, Rolled};

/// A section of scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Piece<'a> {
	/// Text that contains no dice and is kept as-is
	Text(&'a str),

	/// Dice term to be replaced by its rolled total
	Dice {
		/// Dice the term describes
		dice: Dice,

		/// Term exactly as written
		text: &'a str,

		/// Byte offset of the term in the scanned text
		offset: usize,
	},
}

/// Text with all of its dice terms replaced by rolled totals
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[allow(clippy::exhaustive_structs)]
pub struct Resolved {
	/// Dice-free text
	pub text: String,

	/// Every set of dice that was rolled, in the order the terms appear
	pub rolled: Vec<Rolled>,
}

/// Splits text into plain sections and dice terms, checking each term against the limits.
///
/// # Errors
/// If a `d` is missing digits on either side, if a term has zero sides, or if a term exceeds the limits, an error
/// variant is returned. Nothing is rolled in any case.
///
/// # Examples
/// ```
/// use dicebatch::dice::{scan, Dice, Limits, Piece};
///
/// let pieces = scan("2d4+2d4", &Limits::default())?;
/// assert_eq!(pieces.len(), 3);
/// assert!(matches!(pieces[0], Piece::Dice { dice, offset: 0, .. } if dice == Dice::new(2, 4)));
/// assert!(matches!(pieces[1], Piece::Text("+")));
/// assert!(matches!(pieces[2], Piece::Dice { dice, offset: 4, .. } if dice == Dice::new(2, 4)));
/// # Ok::<(), dicebatch::dice::Error>(())
/// ```
pub fn scan<'a>(text: &'a str, limits: &Limits) -> Result<Vec<Piece<'a>>, Error> {
	let bytes = text.as_bytes();
	let mut pieces = Vec::new();
	let mut plain_start = 0;
	let mut pos = 0;

	while pos < bytes.len() {
		let run_start = pos;
		pos = digits_end(bytes, pos);

		if bytes.get(pos) != Some(&b'd') {
			// A lone non-digit character is plain text
			if pos == run_start {
				pos = pos.saturating_add(1);
			}
			continue;
		}

		let count_end = pos;
		let sides_start = pos.saturating_add(1);
		pos = digits_end(bytes, sides_start);

		let term = &text[run_start..pos];
		let count = &text[run_start..count_end];
		let sides = &text[sides_start..pos];
		if count.is_empty() || sides.is_empty() {
			return Err(Error::Malformed {
				term: term.to_owned(),
				offset: run_start,
			});
		}

		let dice = Dice::new(parse_bound(count, term, limits)?, parse_bound(sides, term, limits)?);
		limits.check(&dice)?;

		if run_start > plain_start {
			pieces.push(Piece::Text(&text[plain_start..run_start]));
		}
		pieces.push(Piece::Dice {
			dice,
			text: term,
			offset: run_start,
		});
		plain_start = pos;
	}

	if plain_start < text.len() {
		pieces.push(Piece::Text(&text[plain_start..]));
	}

	Ok(pieces)
}

/// Rolls every dice term among the pieces and joins everything back into dice-free text.
/// Each term is rolled on its own, so identical terms written more than once get independent totals.
///
/// # Errors
/// If totalling the rolls of a term overflows, an error variant is returned.
///
/// # Examples
/// ```
/// use dicebatch::dice::{resolve, roller::Iter as IterRoller, scan, Limits};
///
/// let pieces = scan("3*(2d4+2)", &Limits::default())?;
/// let resolved = resolve(&pieces, &mut IterRoller::new([3, 4]))?;
/// assert_eq!(resolved.text, "3*(7+2)");
/// assert_eq!(resolved.rolled[0].rolls, vec![3, 4]);
/// # Ok::<(), dicebatch::dice::Error>(())
/// ```
pub fn resolve(pieces: &[Piece<'_>], roller: &mut impl Roller) -> Result<Resolved, Error> {
	let mut resolved = Resolved::default();

	for piece in pieces {
		match *piece {
			Piece::Text(text) => resolved.text.push_str(text),
			Piece::Dice { dice, .. } => {
				let rolled = roller.roll(&dice);
				resolved.text.push_str(&rolled.total()?.to_string());
				resolved.rolled.push(rolled);
			}
		}
	}

	Ok(resolved)
}

/// Finds the end of the run of ASCII digits starting at `from`.
fn digits_end(bytes: &[u8], from: usize) -> usize {
	bytes
		.get(from..)
		.and_then(|rest| rest.iter().position(|b| !b.is_ascii_digit()))
		.map_or(bytes.len(), |len| from.saturating_add(len))
}

/// Parses a count or sides digit run, treating anything too large for a `u32` as exceeding the limits.
fn parse_bound(digits: &str, term: &str, limits: &Limits) -> Result<u32, Error> {
	digits.parse().map_err(|_err| Error::LimitExceeded {
		term: term.to_owned(),
		limits: *limits,
	})
}
