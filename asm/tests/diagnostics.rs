//! Integration tests for the public `compile` surface (spec.md §8).

use accvm_asm::compile;
use accvm_core::numeric::Cell;

#[test]
fn non_monotonic_offset_reports_the_offending_line() {
    let err = compile("Offset 5\nOffset 3\n").unwrap_err();
    assert_eq!(err.line, 2);
}

#[test]
fn unresolved_label_is_reported() {
    let err = compile("Ld missing:\n").unwrap_err();
    assert!(err.message.contains("unresolved label"));
}

#[test]
fn add_two_plus_seven_matches_the_documented_seeded_image() {
    let source = "\
        Ld 253\n\
        Add 254\n\
        St 255\n\
        Int 0\n\
        Offset 253\n\
        2\n\
        7\n\
        0\n";
    let image = compile(source).unwrap();
    assert_eq!(image.len(), 256);
    assert_eq!(image[253], Cell(2));
    assert_eq!(image[254], Cell(7));
}

#[test]
fn offset_sets_the_emission_cursor_exactly() {
    let image = compile("Offset 10\n42\n").unwrap();
    assert_eq!(image.len(), 11);
    assert_eq!(image[10], Cell(42));
    assert!(image[..10].iter().all(|&cell| cell == Cell::ZERO));
}

#[test]
fn label_address_equals_cursor_at_definition_point() {
    let image = compile("Neg\nNeg\nhere:\nJmp here:\n").unwrap();
    // `here:` is defined after two zero-arg instructions, at address 2.
    assert_eq!(image[3], Cell(2));
}
