use crate::dice::{
	resolve,
	roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Roller, Val as ValRoller},
	scan, Dice, Error, Limits, Piece, Rolled,
};

#[test]
fn single_d20() {
	let dice = Dice::new(1, 20);
	let rolled = rolls_in_range(&dice, &mut FastRandRoller::default());
	assert_eq!(rolled.rolls.len(), 1);
	assert_eq!(rolled.dice, dice);
}

#[test]
fn hundred_d42s() {
	let dice = Dice::new(100, 42);
	let rolled = rolls_in_range(&dice, &mut FastRandRoller::default());
	assert_eq!(rolled.rolls.len(), 100);
}

#[test]
fn zero_dice_roll_nothing() {
	let dice = Dice::new(0, 6);
	let mut roller = IterRoller::new(Vec::<u32>::new());
	let rolled = roller.roll(&dice);
	assert!(rolled.rolls.is_empty());
	assert_eq!(rolled.total().unwrap(), 0);
}

#[test]
fn all_dice_sides_occur() {
	let dice = Dice::new(255, 20);
	let mut roller = FastRandRoller::with_seed(0x750c38d574400);
	let mut rolls = Vec::new();

	for _ in 1..=100 {
		rolls.append(&mut rolls_in_range(&dice, &mut roller).rolls);
	}

	for side in 1..=20 {
		assert!(rolls.iter().any(|&roll| roll == side));
	}
}

#[test]
fn totals_stay_within_bounds() {
	for (count, sides) in [(400, 2), (2, 400), (1, 1), (10_000, 10_000)] {
		let dice = Dice::new(count, sides);
		let total = FastRandRoller::default().roll(&dice).total().unwrap();
		assert!((dice.min_total()..=dice.max_total()).contains(&total));
		assert_eq!(MaxRoller.roll(&dice).total().unwrap(), dice.max_total());
		assert_eq!(ValRoller(1).roll(&dice).total().unwrap(), dice.min_total());
	}
}

#[test]
fn large_roll_mean_converges() {
	let dice = Dice::new(10_000, 6);
	let mut roller = FastRandRoller::with_seed(0x5eed);
	let trials = 50;

	let mut sum = 0;
	for _ in 0..trials {
		sum += roller.roll(&dice).total().unwrap();
	}

	// Expected mean is 35,000 with a standard deviation of ~171 per trial
	let mean = sum / trials;
	assert!((34_800..=35_200).contains(&mean), "mean was {mean}");
}

#[test]
fn seeded_rollers_repeat() {
	let dice = Dice::new(8, 12);
	let first = FastRandRoller::with_seed(99).roll(&dice);
	let second = FastRandRoller::with_seed(99).roll(&dice);
	assert_eq!(first, second);
}

#[test]
fn dice_display() {
	assert_eq!(Dice::new(2, 4).to_string(), "2d4");
	assert_eq!(Dice::new(0, 6).to_string(), "0d6");
}

#[test]
fn limits_reject_zero_sides_and_excess() {
	let limits = Limits {
		max_count: 10,
		max_sides: 20,
	};
	assert!(limits.check(&Dice::new(10, 20)).is_ok());
	assert!(limits.check(&Dice::new(0, 20)).is_ok());
	assert_eq!(limits.check(&Dice::new(1, 0)), Err(Error::InvalidSides(Dice::new(1, 0))));
	assert!(matches!(limits.check(&Dice::new(11, 20)), Err(Error::LimitExceeded { .. })));
	assert!(matches!(limits.check(&Dice::new(10, 21)), Err(Error::LimitExceeded { .. })));
}

#[test]
fn scan_splits_text_and_terms() {
	let pieces = scan("3*(2d4+2)-10d12", &Limits::default()).unwrap();
	assert_eq!(
		pieces,
		vec![
			Piece::Text("3*("),
			Piece::Dice {
				dice: Dice::new(2, 4),
				text: "2d4",
				offset: 3,
			},
			Piece::Text("+2)-"),
			Piece::Dice {
				dice: Dice::new(10, 12),
				text: "10d12",
				offset: 10,
			},
		]
	);
}

#[test]
fn scan_without_dice_is_one_text_piece() {
	assert_eq!(scan("12+(3*4)", &Limits::default()).unwrap(), vec![Piece::Text("12+(3*4)")]);
	assert!(scan("", &Limits::default()).unwrap().is_empty());
}

#[test]
fn scan_takes_full_digit_runs() {
	let pieces = scan("400d2", &Limits::default()).unwrap();
	assert!(matches!(pieces[..], [Piece::Dice { dice, .. }] if dice == Dice::new(400, 2)));

	let pieces = scan("2d400", &Limits::default()).unwrap();
	assert!(matches!(pieces[..], [Piece::Dice { dice, .. }] if dice == Dice::new(2, 400)));
}

#[test]
fn scan_rejects_missing_digits() {
	for (text, term, offset) in [("2d", "2d", 0), ("d", "d", 0), ("d6", "d6", 0), ("1+d", "d", 2), ("(d)", "d", 1)] {
		assert_eq!(
			scan(text, &Limits::default()),
			Err(Error::Malformed {
				term: term.to_owned(),
				offset,
			}),
			"scanning {text:?}",
		);
	}
}

#[test]
fn scan_consumes_digit_runs_once() {
	// The first term takes the middle digit, leaving the second d without a count
	assert_eq!(
		scan("2d2d2", &Limits::default()),
		Err(Error::Malformed {
			term: "d2".to_owned(),
			offset: 3,
		})
	);
	assert!(matches!(scan("2d2dd", &Limits::default()), Err(Error::Malformed { .. })));
}

#[test]
fn scan_rejects_zero_sides() {
	assert_eq!(
		scan("1+3d0", &Limits::default()),
		Err(Error::InvalidSides(Dice::new(3, 0)))
	);
}

#[test]
fn scan_rejects_oversized_terms() {
	assert!(matches!(scan("10001d6", &Limits::default()), Err(Error::LimitExceeded { .. })));
	assert!(matches!(scan("2d10001", &Limits::default()), Err(Error::LimitExceeded { .. })));
	assert!(matches!(
		scan("99999999999999999999d6", &Limits::default()),
		Err(Error::LimitExceeded { .. })
	));
}

#[test]
fn scan_accepts_zero_count() {
	let pieces = scan("0d6", &Limits::default()).unwrap();
	assert!(matches!(pieces[..], [Piece::Dice { dice, .. }] if dice == Dice::new(0, 6)));
}

#[test]
fn resolve_replaces_each_term() {
	let pieces = scan("2d4+2d4", &Limits::default()).unwrap();
	let resolved = resolve(&pieces, &mut IterRoller::new([1, 2, 4, 4])).unwrap();
	assert_eq!(resolved.text, "3+8");
	assert_eq!(
		resolved.rolled,
		vec![
			Rolled::from_dice_and_rolls(Dice::new(2, 4), [1, 2]),
			Rolled::from_dice_and_rolls(Dice::new(2, 4), [4, 4]),
		]
	);
}

#[test]
fn resolve_rolls_identical_terms_independently() {
	let pieces = scan("1d1000+1d1000+1d1000+1d1000", &Limits::default()).unwrap();
	let mut roller = FastRandRoller::with_seed(7);

	let mut saw_difference = false;
	for _ in 0..20 {
		let resolved = resolve(&pieces, &mut roller).unwrap();
		let totals = resolved
			.rolled
			.iter()
			.map(|rolled| rolled.total().unwrap())
			.collect::<Vec<_>>();
		assert_eq!(totals.len(), 4);
		assert!(totals.iter().all(|total| (1..=1000).contains(total)));
		saw_difference |= totals.windows(2).any(|pair| pair[0] != pair[1]);
	}
	assert!(saw_difference);
}

#[test]
fn resolve_leaves_other_text_alone() {
	let pieces = scan("(0d6-7)|2", &Limits::default()).unwrap();
	let resolved = resolve(&pieces, &mut IterRoller::new(Vec::<u32>::new())).unwrap();
	assert_eq!(resolved.text, "(0-7)|2");
}

fn rolls_in_range(dice: &Dice, roller: &mut impl Roller) -> Rolled {
	let rolled = roller.roll(dice);
	assert!(rolled.rolls.iter().all(|&roll| roll >= 1 && roll <= dice.sides));
	rolled
}
