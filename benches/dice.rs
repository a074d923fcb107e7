#![feature(test)]

extern crate test;

use test::Bencher;

use dicebatch::{
	dice::{
		resolve,
		roller::{FastRand, Roller},
		scan, Dice, Limits, Rolled,
	},
	expr::Describe,
};

#[bench]
fn roll_4d8(b: &mut Bencher) {
	let dice = Dice::new(4, 8);
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice));
}

#[bench]
fn roll_100d20(b: &mut Bencher) {
	let dice = Dice::new(100, 20);
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice));
}

#[bench]
fn roll_and_total_10000d6(b: &mut Bencher) {
	let dice = Dice::new(10_000, 6);
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice).total().unwrap());
}

#[bench]
fn scan_many_terms(b: &mut Bencher) {
	let limits = Limits::default();
	b.iter(|| scan("3*(2d4+2)-(4d6|2)+10d10*1d20-2d4+2d4", &limits).unwrap());
}

#[bench]
fn scan_and_resolve_many_terms(b: &mut Bencher) {
	let limits = Limits::default();
	let mut rng = FastRand::default();
	b.iter(|| {
		let pieces = scan("3*(2d4+2)-(4d6|2)+10d10*1d20-2d4+2d4", &limits).unwrap();
		resolve(&pieces, &mut rng).unwrap()
	});
}

#[bench]
fn describe_100d20(b: &mut Bencher) {
	let rolled = Rolled::from_dice_and_rolls(Dice::new(100, 20), (1..=100).map(|n| n % 20 + 1));
	b.iter(|| rolled.describe(None));
}

#[bench]
fn describe_100d20_limited(b: &mut Bencher) {
	let rolled = Rolled::from_dice_and_rolls(Dice::new(100, 20), (1..=100).map(|n| n % 20 + 1));
	b.iter(|| rolled.describe(Some(10)));
}
