//! Evaluation of complete roll requests: comma-separated batches of dice expressions.
//!
//! A request is handled in stages. The whole request is checked against the [`Alphabet`], then every segment's dice
//! terms are scanned, and only then is anything rolled. Each segment's dice are replaced by their totals and the
//! remaining arithmetic is parsed and calculated. A single failure anywhere fails the whole request.

use alloc::{
	borrow::ToOwned,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{fmt, ops::Range};

#[cfg(feature = "fastrand")]
use fastrand::Rng;

#[cfg(all(feature = "fastrand", feature = "std"))]
use crate::dice::roller::FastRand as FastRandRoller;
use crate::{
	charset::{Alphabet, DivisionMarker},
	dice::{self, Error as DiceError, Limits, Piece, Roller, Rolled},
	expr::{CalcError, Describe, Value},
	parse::{self, Error as ParseError},
};

/// Evaluates roll requests with a fixed configuration
///
/// # Examples
/// ```
/// use dicebatch::{dice::roller::Iter as IterRoller, expr::Value, Engine};
///
/// let engine = Engine::default();
/// let mut roller = IterRoller::new([3, 4, 1, 2]);
/// let values = engine.evaluate("3*(2d4+2),(2d4-2)|2", &mut roller)?;
/// assert_eq!(values, vec![Some(Value::Int(27)), Some(Value::Float(0.5))]);
/// # Ok::<(), dicebatch::engine::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Engine {
	/// Characters requests may contain
	alphabet: Alphabet,

	/// Bounds on each dice term
	limits: Limits,
}

impl Engine {
	/// Creates an engine with the given alphabet and dice limits.
	#[must_use]
	#[inline]
	pub const fn new(alphabet: Alphabet, limits: Limits) -> Self {
		Self { alphabet, limits }
	}

	/// Creates a new engine builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Gets the alphabet requests are validated against.
	#[must_use]
	#[inline]
	pub const fn alphabet(&self) -> Alphabet {
		self.alphabet
	}

	/// Gets the limits every dice term is checked against.
	#[must_use]
	#[inline]
	pub const fn limits(&self) -> Limits {
		self.limits
	}

	/// Evaluates a request to one value per comma-separated segment, in order.
	/// Empty segments have no value (`None`).
	///
	/// # Errors
	/// If the request contains characters outside of the alphabet, or any segment has a malformed dice term or
	/// expression, or any calculation fails, an error variant describing the first problem is returned and no values
	/// are produced.
	pub fn evaluate(&self, request: &str, roller: &mut impl Roller) -> Result<Vec<Option<Value>>, Error> {
		Ok(self.roll(request, roller)?.into_iter().map(|segment| segment.value).collect())
	}

	/// Evaluates a request like [`Self::evaluate()`], keeping the full details of every segment: the individual dice
	/// that were rolled, the dice-free expression they produced, and its value.
	///
	/// # Errors
	/// See [`Self::evaluate()`].
	///
	/// # Examples
	/// ```
	/// use dicebatch::{dice::roller::Iter as IterRoller, expr::Describe, Engine};
	///
	/// let segments = Engine::default().roll("2d4+2,", &mut IterRoller::new([3, 1]))?;
	/// assert_eq!(segments.len(), 2);
	/// assert_eq!(segments[0].resolved, "4+2");
	/// assert_eq!(segments[0].describe(None), "2d4[3, 1]+2 = 6");
	/// assert_eq!(segments[1].value, None);
	/// # Ok::<(), dicebatch::engine::Error>(())
	/// ```
	pub fn roll(&self, request: &str, roller: &mut impl Roller) -> Result<Vec<Segment>, Error> {
		self.alphabet
			.validate(request)
			.map_err(|invalid| Error::InvalidCharacters {
				request: request.to_owned(),
				alphabet: self.alphabet,
				span: invalid.offset..invalid.offset.saturating_add(invalid.ch.len_utf8()),
			})?;

		// Every dice term in the batch is checked before any of them are rolled
		let mut scanned = Vec::new();
		let mut start: usize = 0;
		for text in request.split(',') {
			let span = start..start.saturating_add(text.len());
			let pieces = dice::scan(text, &self.limits).map_err(|source| Error::Dice {
				request: request.to_owned(),
				segment: text.to_owned(),
				span: dice_error_span(&source, &span),
				source,
			})?;
			start = span.end.saturating_add(1);
			scanned.push((text, span, pieces));
		}

		let mut segments = Vec::with_capacity(scanned.len());
		for (text, span, pieces) in scanned {
			segments.push(self.roll_segment(request, text, span, &pieces, roller)?);
		}
		Ok(segments)
	}

	/// Rolls the dice of a single scanned segment and calculates its value.
	fn roll_segment(
		&self,
		request: &str,
		text: &str,
		span: Range<usize>,
		pieces: &[Piece<'_>],
		roller: &mut impl Roller,
	) -> Result<Segment, Error> {
		if text.is_empty() {
			return Ok(Segment {
				text: String::new(),
				span,
				terms: Vec::new(),
				resolved: String::new(),
				value: None,
			});
		}

		let resolved = dice::resolve(pieces, roller).map_err(|source| Error::Dice {
			request: request.to_owned(),
			segment: text.to_owned(),
			span: span.clone(),
			source,
		})?;
		let normalized = self.alphabet.normalize(&resolved.text).into_owned();

		let expr = parse::parse(&normalized).map_err(|source| Error::Syntax {
			request: request.to_owned(),
			segment: text.to_owned(),
			resolved: normalized.clone(),
			span: span.clone(),
			source,
		})?;
		let value = expr.calc().map_err(|source| Error::Calc {
			request: request.to_owned(),
			segment: text.to_owned(),
			resolved: normalized.clone(),
			span: span.clone(),
			source,
		})?;

		let terms = pieces
			.iter()
			.filter_map(|piece| match *piece {
				Piece::Dice { text: written, offset, .. } => Some(offset..offset.saturating_add(written.len())),
				Piece::Text(..) => None,
			})
			.zip(resolved.rolled)
			.map(|(span, rolled)| Term { span, rolled })
			.collect();

		Ok(Segment {
			text: text.to_owned(),
			span,
			terms,
			resolved: normalized,
			value: Some(value),
		})
	}
}

/// Builds an [`Engine`] with a fluent interface.
///
/// # Examples
/// ```
/// use dicebatch::{charset::DivisionMarker, dice::roller::Max as MaxRoller, engine::ErrorKind, expr::Value, Engine};
///
/// let engine = Engine::builder()
/// 	.division_marker(DivisionMarker::Slash)
/// 	.max_dice_count(100)
/// 	.build();
/// assert_eq!(engine.evaluate("4d6/2", &mut MaxRoller)?, vec![Some(Value::Float(12.0))]);
///
/// let err = engine.evaluate("101d6", &mut MaxRoller).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::DiceLimitExceeded);
/// # Ok::<(), dicebatch::engine::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder(Engine);

impl Builder {
	/// Sets the marker accepted for division.
	#[must_use]
	pub const fn division_marker(mut self, division: DivisionMarker) -> Self {
		self.0.alphabet = Alphabet::new(division);
		self
	}

	/// Sets the maximum number of dice in a single term.
	#[must_use]
	pub const fn max_dice_count(mut self, max_count: u32) -> Self {
		self.0.limits.max_count = max_count;
		self
	}

	/// Sets the maximum number of sides per die.
	#[must_use]
	pub const fn max_dice_sides(mut self, max_sides: u32) -> Self {
		self.0.limits.max_sides = max_sides;
		self
	}

	/// Replaces all dice limits at once.
	#[must_use]
	pub const fn limits(mut self, limits: Limits) -> Self {
		self.0.limits = limits;
		self
	}

	/// Finalizes the engine.
	#[must_use]
	pub const fn build(self) -> Engine {
		self.0
	}
}

/// One evaluated comma-separated segment of a request
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Segment {
	/// Segment text as written in the request
	pub text: String,

	/// Byte range of the segment in the request
	pub span: Range<usize>,

	/// Every dice term of the segment along with its rolls, in order
	pub terms: Vec<Term>,

	/// Dice-free expression the segment resolved to, with division normalized to `/`
	pub resolved: String,

	/// Calculated value, or `None` for an empty segment
	pub value: Option<Value>,
}

/// A rolled dice term within a [`Segment`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Term {
	/// Byte range of the term in the segment text
	pub span: Range<usize>,

	/// Dice rolled for the term
	pub rolled: Rolled,
}

impl Describe for Segment {
	/// Builds the segment text with every dice term replaced by a description of its rolls, followed by the value.
	/// Empty segments are described as an empty string.
	fn describe(&self, list_limit: Option<usize>) -> String {
		let mut description = String::with_capacity(self.text.len());
		let mut pos = 0;
		for term in &self.terms {
			description.push_str(self.text.get(pos..term.span.start).unwrap_or_default());
			description.push_str(&term.rolled.describe(list_limit));
			pos = term.span.end;
		}
		description.push_str(self.text.get(pos..).unwrap_or_default());

		match self.value {
			Some(value) => format!("{description} = {value}"),
			None => description,
		}
	}
}

impl fmt::Display for Segment {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Formats a list of values the way they appear on the wire: a JSON array of numbers and nulls.
///
/// # Examples
/// ```
/// use dicebatch::{engine::format_values, expr::Value};
///
/// let values = [Some(Value::Int(7)), Some(Value::Float(2.0)), None];
/// assert_eq!(format_values(&values), "[7, 2.0, null]");
/// ```
#[must_use]
pub fn format_values(values: &[Option<Value>]) -> String {
	let items = values
		.iter()
		.map(|value| value.map_or_else(|| "null".to_owned(), |value| value.to_string()))
		.collect::<Vec<_>>();
	format!("[{}]", items.join(", "))
}

/// Evaluates a request with the default [`Engine`] and a freshly-seeded fastrand roller.
/// Requires the `std` and `fastrand` features (enabled by default).
///
/// # Errors
/// See [`Engine::evaluate()`].
///
/// # Examples
/// ```
/// use dicebatch::expr::Value;
///
/// assert_eq!(dicebatch::evaluate("1")?, vec![Some(Value::Int(1))]);
/// assert_eq!(dicebatch::evaluate("3|2")?, vec![Some(Value::Float(1.5))]);
/// assert_eq!(dicebatch::evaluate(",")?, vec![None, None]);
///
/// let values = dicebatch::evaluate("400d2")?;
/// assert!(matches!(values[0], Some(Value::Int(400..=800))));
/// # Ok::<(), dicebatch::engine::Error>(())
/// ```
#[cfg(all(feature = "fastrand", feature = "std"))]
pub fn evaluate(request: &str) -> Result<Vec<Option<Value>>, Error> {
	Engine::default().evaluate(request, &mut FastRandRoller::default())
}

/// Evaluates a request with the default [`Engine`], passing along a specific Rng to use for rolling dice.
/// See [`evaluate()`] for more information.
#[cfg(feature = "fastrand")]
#[allow(clippy::missing_errors_doc)]
pub fn evaluate_using_rng(request: &str, rng: &mut Rng) -> Result<Vec<Option<Value>>, Error> {
	Engine::default().evaluate(request, rng)
}

/// Kinds of failure a request can have, for mapping errors to responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
	/// The request contains a character outside of the alphabet.
	InvalidCharacters,

	/// A `d` is missing the digits on one or both sides.
	MalformedDiceTerm,

	/// A dice term has zero sides.
	InvalidDiceSides,

	/// A dice term asks for more dice or sides than allowed.
	DiceLimitExceeded,

	/// The dice-free expression does not follow the grammar.
	SyntaxError,

	/// A division has a zero divisor.
	DivisionByZero,

	/// A calculation overflowed.
	Overflow,
}

/// Error that can occur while evaluating a request
///
/// Every variant names the full request as its first line, matching what is shown to users.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The request contains characters outside of the alphabet. Nothing was rolled.
	#[error("Malformed die roll(s): {request}\nNote: only the following characters are allowed: {alphabet}")]
	InvalidCharacters {
		/// Full request
		request: String,

		/// Alphabet the request was checked against
		alphabet: Alphabet,

		/// Byte range of the first offending character
		span: Range<usize>,
	},

	/// A dice term is malformed, exceeds limits, or could not be totalled.
	#[error("Malformed die roll(s): {request}\nIn \"{segment}\": {source}")]
	Dice {
		/// Full request
		request: String,

		/// Segment containing the term
		segment: String,

		/// Byte range of the offending term (or segment) in the request
		span: Range<usize>,

		/// Underlying dice error
		#[source]
		source: DiceError,
	},

	/// The dice-free expression of a segment does not follow the grammar.
	#[error("Malformed die roll(s): {request}\nIn \"{segment}\" (rolled as \"{resolved}\"): {source}")]
	Syntax {
		/// Full request
		request: String,

		/// Offending segment
		segment: String,

		/// Dice-free expression that failed to parse
		resolved: String,

		/// Byte range of the segment in the request
		span: Range<usize>,

		/// Underlying parse error
		#[source]
		source: ParseError,
	},

	/// The calculation of a segment failed.
	#[error("Malformed die roll(s): {request}\nIn \"{segment}\" (rolled as \"{resolved}\"): {source}")]
	Calc {
		/// Full request
		request: String,

		/// Offending segment
		segment: String,

		/// Dice-free expression that failed to calculate
		resolved: String,

		/// Byte range of the segment in the request
		span: Range<usize>,

		/// Underlying calculation error
		#[source]
		source: CalcError,
	},
}

impl Error {
	/// Gets the kind of failure this error represents.
	#[must_use]
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidCharacters { .. } => ErrorKind::InvalidCharacters,
			Self::Dice { source, .. } => match source {
				DiceError::Malformed { .. } => ErrorKind::MalformedDiceTerm,
				DiceError::InvalidSides(..) => ErrorKind::InvalidDiceSides,
				DiceError::LimitExceeded { .. } => ErrorKind::DiceLimitExceeded,
				DiceError::Overflow(..) => ErrorKind::Overflow,
			},
			Self::Syntax { .. } => ErrorKind::SyntaxError,
			Self::Calc { source, .. } => match source {
				CalcError::DivisionByZero(..) => ErrorKind::DivisionByZero,
				CalcError::Overflow(..) => ErrorKind::Overflow,
			},
		}
	}

	/// Gets the byte range of the offending part of the request.
	#[must_use]
	pub fn span(&self) -> Range<usize> {
		match self {
			Self::InvalidCharacters { span, .. }
			| Self::Dice { span, .. }
			| Self::Syntax { span, .. }
			| Self::Calc { span, .. } => span.clone(),
		}
	}

	/// Gets the full request that failed.
	#[must_use]
	pub fn request(&self) -> &str {
		match self {
			Self::InvalidCharacters { request, .. }
			| Self::Dice { request, .. }
			| Self::Syntax { request, .. }
			| Self::Calc { request, .. } => request,
		}
	}
}

/// Narrows a segment's span down to the offending term of a dice error, when the error knows where it is.
fn dice_error_span(err: &DiceError, segment: &Range<usize>) -> Range<usize> {
	match err {
		DiceError::Malformed { term, offset } => {
			let start = segment.start.saturating_add(*offset);
			start..start.saturating_add(term.len())
		}
		_ => segment.clone(),
	}
}
