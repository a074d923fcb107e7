//! Abstractions for rolling [`Dice`] using various means.
//!
//! A roller is the only source of randomness in the crate. Every evaluation is handed one explicitly, so callers
//! decide whether rolls come from a fresh RNG, a seeded one, or a fixed script.

use alloc::vec::Vec;
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{Dice, Rolled};

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die, producing a value in `1..=sides`.
	#[must_use]
	fn roll_die(&mut self, sides: u32) -> u32;

	/// Rolls a set of dice, drawing a separate value for every die.
	fn roll(&mut self, dice: &Dice) -> Rolled
	where
		Self: Sized,
	{
		let mut rolls = Vec::with_capacity(dice.count as usize);
		for _ in 0..dice.count {
			rolls.push(self.roll_die(dice.sides));
		}

		Rolled { rolls, dice: *dice }
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use dicebatch::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let mut roller = FastRandRoller::default();
///
/// let dice = Dice::new(4, 6);
/// let _ = roller.roll(&dice);
/// let _ = roller.roll(&dice);
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use dicebatch::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// assert_eq!(first, second);
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		if sides > 0 {
			self.0.u32(1..=sides)
		} else {
			0
		}
	}
}

#[cfg(feature = "fastrand")]
impl Roller for Rng {
	/// Rolls a single die directly with the RNG.
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		if sides > 0 {
			self.u32(1..=sides)
		} else {
			0
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use dicebatch::dice::{roller::{Roller, Val as ValRoller}, Dice};
///
/// let mut roller = ValRoller(42);
///
/// let rolled = roller.roll(&Dice::new(4, 6));
/// assert!(rolled.rolls.iter().all(|&roll| roll == 42));
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use dicebatch::dice::{roller::{Max as MaxRoller, Roller}, Dice};
///
/// let mut roller = MaxRoller;
///
/// let rolled = roller.roll(&Dice::new(2, 20));
/// assert_eq!(rolled.rolls, vec![20, 20]);
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		sides
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use dicebatch::dice::{roller::{Iter as IterRoller, Roller}, Dice};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// assert_eq!(roller.roll(&Dice::new(5, 6)).rolls, vec![1, 2, 3, 4, 10]);
/// assert!(!roller.can_roll());
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}
