#![feature(test)]

extern crate test;

use chumsky::Parser;
use dicebatch::expr::Expr;
use test::Bencher;

#[bench]
fn parse_basic(b: &mut Bencher) {
	let parser = dicebatch::parser();
	b.iter(|| parser.parse("17+4").unwrap());
}

#[bench]
fn parse_complex(b: &mut Bencher) {
	let parser = dicebatch::parser();
	b.iter(|| parser.parse("19+11*(-9-6/2)/4").unwrap());
}

#[bench]
fn parse_nested(b: &mut Bencher) {
	let text = format!("{}1{}", "(".repeat(64), "+2)".repeat(64));
	let parser = dicebatch::parser();
	b.iter(|| parser.parse(&text).unwrap());
}

#[bench]
fn parser_creation(b: &mut Bencher) {
	b.iter(dicebatch::parser);
}

#[bench]
fn fromstr_basic(b: &mut Bencher) {
	b.iter(|| "17+4".parse::<Expr>().unwrap());
}

#[bench]
fn fromstr_complex(b: &mut Bencher) {
	b.iter(|| "19+11*(-9-6/2)/4".parse::<Expr>().unwrap());
}
