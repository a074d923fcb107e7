use crate::charset::{Alphabet, DivisionMarker, Invalid};

#[test]
fn default_alphabet_matches_documented_chars() {
	let alphabet = Alphabet::default();
	assert_eq!(alphabet.division, DivisionMarker::Pipe);
	assert_eq!(alphabet.to_string(), "1234567890d()*|+-,");
}

#[test]
fn every_documented_char_is_allowed() {
	for division in [DivisionMarker::Pipe, DivisionMarker::Slash] {
		let alphabet = Alphabet::new(division);
		for ch in alphabet.chars().chars() {
			assert!(alphabet.allows(ch), "{ch:?} is documented but rejected");
		}
		assert!(alphabet.validate(&alphabet.chars()).is_ok());
	}
}

#[test]
fn only_one_division_marker_is_allowed() {
	assert!(Alphabet::new(DivisionMarker::Pipe).validate("4/2").is_err());
	assert!(Alphabet::new(DivisionMarker::Slash).validate("4|2").is_err());
}

#[test]
fn reports_first_offending_char() {
	let result = Alphabet::default().validate("2d4,butts");
	assert_eq!(result, Err(Invalid { ch: 'b', offset: 4 }));
}

#[test]
fn rejects_whitespace_and_letters() {
	let alphabet = Alphabet::default();
	assert!(alphabet.validate("2d4 + 2").is_err());
	assert!(alphabet.validate("2D4").is_err());
	assert!(alphabet.validate("2d4kh1").is_err());
	assert!(alphabet.validate("__import__").is_err());
}

#[test]
fn reports_byte_offset_after_multibyte_chars() {
	let result = Alphabet::default().validate("2d4+é");
	assert_eq!(result, Err(Invalid { ch: 'é', offset: 4 }));
}

#[test]
fn empty_text_is_valid() {
	assert!(Alphabet::default().validate("").is_ok());
}

#[test]
fn normalize_rewrites_pipes_only_when_needed() {
	let alphabet = Alphabet::default();
	assert_eq!(alphabet.normalize("(2|3)|4"), "(2/3)/4");
	assert!(matches!(alphabet.normalize("2+3"), alloc::borrow::Cow::Borrowed("2+3")));

	let alphabet = Alphabet::new(DivisionMarker::Slash);
	assert!(matches!(alphabet.normalize("2/3"), alloc::borrow::Cow::Borrowed("2/3")));
}
