//! AST-like data structures for evaluating dice-free arithmetic expressions and working with their results.

use alloc::{
	boxed::Box,
	string::{String, ToString},
};
use core::fmt;

/// Numeric result of an expression
///
/// Sums, differences and products of integers stay integers. Quotients are always floats, and any operation with a
/// float operand produces a float.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
#[allow(clippy::exhaustive_enums)]
pub enum Value {
	/// Whole number
	Int(i64),

	/// Floating-point number
	Float(f64),
}

impl Value {
	/// Gets the value as a float, converting integers.
	#[must_use]
	#[expect(clippy::cast_precision_loss, reason = "Dice totals are nowhere near 2^53")]
	pub const fn as_f64(self) -> f64 {
		match self {
			Self::Int(x) => x as f64,
			Self::Float(x) => x,
		}
	}

	/// Checks whether the value is zero, as either kind of number.
	#[must_use]
	pub fn is_zero(self) -> bool {
		match self {
			Self::Int(x) => x == 0,
			Self::Float(x) => x == 0.0,
		}
	}

	/// Checks whether the value is an integer.
	#[must_use]
	#[inline]
	pub const fn is_int(self) -> bool {
		matches!(self, Self::Int(..))
	}

	/// Checks whether the value is a float.
	#[must_use]
	#[inline]
	pub const fn is_float(self) -> bool {
		matches!(self, Self::Float(..))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl fmt::Display for Value {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// Floats always include a fractional part, even when it is zero, so `2.0` stays distinguishable from `2`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(x) => write!(f, "{x}"),
			Self::Float(x) => write!(f, "{x:?}"),
		}
	}
}

/// Individual elements of a dice-free arithmetic expression
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Expr {
	/// Standalone integer
	Num(i64),

	/// Expression enclosed in parentheses
	Group(Box<Self>),

	/// Negation of an expression (makes the result of it negative)
	Neg(Box<Self>),

	/// Sum of two expressions
	Add(Box<Self>, Box<Self>),

	/// Difference of two expressions
	Sub(Box<Self>, Box<Self>),

	/// Product of two expressions
	Mul(Box<Self>, Box<Self>),

	/// True quotient of two expressions (always a float)
	Div(Box<Self>, Box<Self>),
}

impl Expr {
	/// Calculates the final result of the expression and all of its children (if any).
	///
	/// # Errors
	/// If there is an integer overflow or a division by zero, an error variant will be returned.
	///
	/// # Examples
	/// ```
	/// use dicebatch::expr::{Expr, Value};
	///
	/// let expr: Expr = "3*(7+2)".parse()?;
	/// assert_eq!(expr.calc()?, Value::Int(27));
	///
	/// let expr: Expr = "4/2".parse()?;
	/// assert_eq!(expr.calc()?, Value::Float(2.0));
	/// # Ok::<(), Box<dyn std::error::Error>>(())
	/// ```
	pub fn calc(&self) -> Result<Value, CalcError> {
		match self {
			Self::Num(x) => Ok(Value::Int(*x)),
			Self::Group(x) => x.calc(),

			Self::Neg(x) => match x.calc()? {
				Value::Int(x) => x
					.checked_neg()
					.map(Value::Int)
					.ok_or_else(|| CalcError::Overflow(self.clone())),
				Value::Float(x) => Ok(Value::Float(-x)),
			},

			Self::Add(a, b) => self.arith(a, b, i64::checked_add, |a, b| a + b),
			Self::Sub(a, b) => self.arith(a, b, i64::checked_sub, |a, b| a - b),
			Self::Mul(a, b) => self.arith(a, b, i64::checked_mul, |a, b| a * b),
			Self::Div(a, b) => {
				let a_val = a.calc()?;
				let b_val = b.calc()?;
				if b_val.is_zero() {
					return Err(CalcError::DivisionByZero(self.clone()));
				}
				Ok(Value::Float(a_val.as_f64() / b_val.as_f64()))
			}
		}
	}

	/// Calculates both operands of an additive or multiplicative operation, keeping integers when both are integers
	/// and promoting to floats otherwise.
	fn arith(
		&self,
		a: &Self,
		b: &Self,
		int_op: fn(i64, i64) -> Option<i64>,
		float_op: fn(f64, f64) -> f64,
	) -> Result<Value, CalcError> {
		match (a.calc()?, b.calc()?) {
			(Value::Int(a), Value::Int(b)) => int_op(a, b)
				.map(Value::Int)
				.ok_or_else(|| CalcError::Overflow(self.clone())),
			(a, b) => Ok(Value::Float(float_op(a.as_f64(), b.as_f64()))),
		}
	}

	/// Gets how tightly the expression binds when written out. Higher binds tighter.
	const fn precedence(&self) -> u8 {
		match self {
			Self::Num(..) | Self::Group(..) => 4,
			Self::Neg(..) => 3,
			Self::Mul(..) | Self::Div(..) => 2,
			Self::Add(..) | Self::Sub(..) => 1,
		}
	}

	/// Writes out an operand of a binary operation, wrapping it in parentheses when it would otherwise be read with a
	/// different grouping. Right-hand operands at the same level are wrapped too, since all operators are
	/// left-associative.
	fn describe_operand(&self, operand: &Self, right: bool) -> String {
		let text = operand.to_string();
		if operand.precedence() < self.precedence() || (right && operand.precedence() == self.precedence()) {
			paren_wrap(text)
		} else {
			text
		}
	}

	/// Writes out a binary operation with its operands grouped as needed.
	fn fmt_binary(&self, f: &mut fmt::Formatter<'_>, op: char, a: &Self, b: &Self) -> fmt::Result {
		write!(
			f,
			"{}{op}{}",
			self.describe_operand(a, false),
			self.describe_operand(b, true)
		)
	}
}

impl fmt::Display for Expr {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output uses the same syntax the parser accepts, so it parses back into an equivalent expression.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Num(x) => write!(f, "{x}"),
			Self::Group(x) => write!(f, "({x})"),
			Self::Neg(x) => match x.as_ref() {
				Self::Num(..) | Self::Group(..) => write!(f, "-{x}"),
				_ => write!(f, "-({x})"),
			},
			Self::Add(a, b) => self.fmt_binary(f, '+', a, b),
			Self::Sub(a, b) => self.fmt_binary(f, '-', a, b),
			Self::Mul(a, b) => self.fmt_binary(f, '*', a, b),
			Self::Div(a, b) => self.fmt_binary(f, '/', a, b),
		}
	}
}

/// Error that can occur during [`Expr::calc()`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalcError {
	/// Integer overflow (likely during calculation of a sum or product)
	#[error("integer overflow while calculating {0}")]
	Overflow(Expr),

	/// Division by a zero divisor
	#[error("division by zero while calculating {0}")]
	DivisionByZero(Expr),
}

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed string with additional information about non-deterministic elements.
	/// Any elements that can have a different result between multiple evaluations or multiple results should list all of
	/// the specific individual results that occurred (ideally, up to `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Wraps a string in parentheses.
#[must_use]
fn paren_wrap(mut text: String) -> String {
	text.insert(0, '(');
	text.push(')');
	text
}
