//! Parser generators for dice-free arithmetic expressions.
//!
//! The grammar is closed: integers, `+`, `-`, `*`, `/`, a unary `-`, and parentheses. Nothing else is accepted, and
//! there is no whitespace.
//!
//! ```text
//! expr   := term (("+" | "-") term)*
//! term   := factor (("*" | "/") factor)*
//! factor := "-" atom | atom
//! atom   := NUMBER | "(" expr ")"
//! ```

use alloc::{
	boxed::Box,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{ops::Range, str::FromStr};

use chumsky::prelude::*;

use crate::expr::Expr;

/// Generates a parser that handles full expressions including mathematical operations and grouping with parentheses
pub fn expr_part<'src>() -> impl Parser<'src, &'src str, Expr, extra::Err<Rich<'src, char>>> + Clone {
	recursive(|expr| {
		// Parser for numbers, reporting out-of-range literals without abandoning the parse
		let int = text::int(10).validate(|s: &str, extra, emitter| {
			s.parse().map_or_else(
				|err| {
					emitter.emit(Rich::custom(extra.span(), format!("number {s}: {err}")));
					Expr::Num(0)
				},
				Expr::Num,
			)
		});

		// Parser for expressions enclosed in parentheses
		let group = expr
			.delimited_by(just('('), just(')'))
			.map(|inner| Expr::Group(Box::new(inner)));

		let atom = int.or(group);

		// Parser for a single negative sign
		let unary = just('-')
			.ignore_then(atom.clone())
			.map(|x| Expr::Neg(Box::new(x)))
			.or(atom);

		// Parser for multiplication and division
		let product = unary.clone().foldl(
			choice((
				just('*').to(Expr::Mul as fn(_, _) -> _),
				just('/').to(Expr::Div as fn(_, _) -> _),
			))
			.then(unary)
			.repeated(),
			|lhs, (op, rhs)| op(Box::new(lhs), Box::new(rhs)),
		);

		// Parser for addition and subtraction operators
		product.clone().foldl(
			choice((
				just('+').to(Expr::Add as fn(_, _) -> _),
				just('-').to(Expr::Sub as fn(_, _) -> _),
			))
			.then(product)
			.repeated(),
			|lhs, (op, rhs)| op(Box::new(lhs), Box::new(rhs)),
		)
	})
}

/// Generates a parser that handles full expressions including mathematical operations and grouping with parentheses,
/// and expects end of input
///
/// # Examples
/// ```
/// use chumsky::Parser;
/// use dicebatch::{expr::Expr, parse};
///
/// let parsed = parse::expr().parse("1+2*3").into_result().ok();
/// assert_eq!(
/// 	parsed,
/// 	Some(Expr::Add(
/// 		Box::new(Expr::Num(1)),
/// 		Box::new(Expr::Mul(Box::new(Expr::Num(2)), Box::new(Expr::Num(3)))),
/// 	)),
/// );
/// assert!(parse::expr().parse("3(7)").has_errors());
/// ```
pub fn expr<'src>() -> impl Parser<'src, &'src str, Expr, extra::Err<Rich<'src, char>>> + Clone {
	expr_part().then_ignore(end())
}

/// Parses a dice-free expression, collecting any problems into a single [`Error`].
///
/// # Errors
/// If the text does not follow the grammar, an error describing every problem found is returned.
pub fn parse(text: &str) -> Result<Expr, Error> {
	expr().parse(text).into_result().map_err(|errs| Error {
		span: errs
			.first()
			.map_or(0..text.len(), |err| err.span().start..err.span().end),
		fragment: errs
			.first()
			.and_then(|err| text.get(err.span().start..err.span().end))
			.filter(|fragment| !fragment.is_empty())
			.unwrap_or(text)
			.to_string(),
		details: errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
	})
}

/// Error produced when text does not follow the expression grammar
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at \"{fragment}\": {details}")]
#[allow(clippy::exhaustive_structs)]
pub struct Error {
	/// Description of every problem found
	pub details: String,

	/// Text of the first offending fragment
	pub fragment: String,

	/// Byte range of the first offending fragment in the parsed text
	pub span: Range<usize>,
}

impl FromStr for Expr {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}
