//! The permitted alphabet of roll requests and the division marker translation.
//!
//! Requests are checked against an [`Alphabet`] before anything else happens to them, so a request containing a
//! stray character never gets as far as rolling dice.

use alloc::{borrow::Cow, string::String};
use core::fmt;

/// Characters that are always permitted, regardless of the division marker in use
const BASE_CHARS: &str = "1234567890d()*+-,";

/// Character used to mark division in a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DivisionMarker {
	/// Forward slash (`/`), the canonical division operator of the expression grammar
	Slash,

	/// Pipe (`|`), the historic marker for requests passing through URL paths where `/` is a path separator
	#[default]
	Pipe,
}

impl DivisionMarker {
	/// Gets the character this marker is written as.
	#[must_use]
	pub const fn as_char(self) -> char {
		match self {
			Self::Slash => '/',
			Self::Pipe => '|',
		}
	}
}

/// Set of characters a roll request may contain
///
/// The string reported to users in error messages is generated from the same value used for validation.
///
/// # Examples
/// ```
/// use dicebatch::charset::{Alphabet, DivisionMarker};
///
/// let alphabet = Alphabet::default();
/// assert_eq!(alphabet.to_string(), "1234567890d()*|+-,");
/// assert!(alphabet.validate("3*(2d4+2),(2d4-2)|2").is_ok());
/// assert!(alphabet.validate("4d6/2").is_err());
///
/// let alphabet = Alphabet::new(DivisionMarker::Slash);
/// assert_eq!(alphabet.to_string(), "1234567890d()*/+-,");
/// assert!(alphabet.validate("4d6/2").is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::exhaustive_structs)]
pub struct Alphabet {
	/// Marker accepted for division
	pub division: DivisionMarker,
}

impl Alphabet {
	/// Creates an alphabet that accepts the given division marker.
	#[must_use]
	#[inline]
	pub const fn new(division: DivisionMarker) -> Self {
		Self { division }
	}

	/// Checks whether a single character is permitted.
	#[must_use]
	pub fn allows(&self, ch: char) -> bool {
		ch == self.division.as_char() || BASE_CHARS.contains(ch)
	}

	/// Checks that every character of the text is permitted.
	///
	/// # Errors
	/// If a character outside of the alphabet is found, the first such character is returned along with its byte offset.
	pub fn validate(&self, text: &str) -> Result<(), Invalid> {
		match text.char_indices().find(|&(_, ch)| !self.allows(ch)) {
			Some((offset, ch)) => Err(Invalid { ch, offset }),
			None => Ok(()),
		}
	}

	/// Rewrites the division marker to the canonical `/` understood by the expression grammar.
	/// The text is only copied when there is something to rewrite.
	///
	/// # Examples
	/// ```
	/// use dicebatch::charset::Alphabet;
	///
	/// assert_eq!(Alphabet::default().normalize("7|2"), "7/2");
	/// assert_eq!(Alphabet::default().normalize("7*2"), "7*2");
	/// ```
	#[must_use]
	pub fn normalize<'t>(&self, text: &'t str) -> Cow<'t, str> {
		let marker = self.division.as_char();
		if marker != '/' && text.contains(marker) {
			Cow::Owned(text.replace(marker, "/"))
		} else {
			Cow::Borrowed(text)
		}
	}

	/// Builds the full list of permitted characters, in the order they are documented to users.
	#[must_use]
	pub fn chars(&self) -> String {
		let mut chars = String::with_capacity(BASE_CHARS.len().saturating_add(1));
		for ch in BASE_CHARS.chars() {
			chars.push(ch);
			if ch == '*' {
				chars.push(self.division.as_char());
			}
		}
		chars
	}
}

impl fmt::Display for Alphabet {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is the list of every permitted character with no separators, e.g. `1234567890d()*|+-,`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.chars())
	}
}

/// Character found outside of an [`Alphabet`]
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("character {ch:?} at offset {offset} is not allowed")]
#[allow(clippy::exhaustive_structs)]
pub struct Invalid {
	/// Offending character
	pub ch: char,

	/// Byte offset of the character in the validated text
	pub offset: usize,
}
