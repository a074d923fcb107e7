#![feature(test)]

extern crate test;

use test::Bencher;

use dicebatch::{dice::roller::FastRand, Engine};

#[bench]
fn e2e_basic(b: &mut Bencher) {
	let engine = Engine::default();
	let mut rng = FastRand::default();
	b.iter(|| engine.evaluate("4d8+4", &mut rng).unwrap());
}

#[bench]
fn e2e_complex(b: &mut Bencher) {
	let engine = Engine::default();
	let mut rng = FastRand::default();
	b.iter(|| engine.evaluate("4d8+2d10*(-3d6-6|2)|4", &mut rng).unwrap());
}

#[bench]
fn e2e_batch(b: &mut Bencher) {
	let engine = Engine::default();
	let mut rng = FastRand::default();
	b.iter(|| {
		engine
			.evaluate("1d20+5,2d6+3,3*(2d4+2),(2d4-2)|2,,400d2,2d400", &mut rng)
			.unwrap()
	});
}

#[bench]
fn e2e_rejected(b: &mut Bencher) {
	let engine = Engine::default();
	let mut rng = FastRand::default();
	b.iter(|| engine.evaluate("2d4,2d2d2", &mut rng).unwrap_err());
}
