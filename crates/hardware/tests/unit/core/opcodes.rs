//! # Opcode Semantics
//!
//! One program per opcode, executed from address 0 on a fresh CPU. Every
//! non-prefix case also checks that `O` is cleared afterwards.

use crate::common::builder::with_operand;
use crate::common::harness::TestContext;
use hexcpu_core::isa::Opcode;
use rstest::rstest;

#[test]
fn test_ldam_reads_memory_at_operand() {
    let mut ctx = TestContext::new()
        .load_program(&with_operand(Opcode::Ldam, 0x40))
        .poke(0x40, &[0x99]);
    ctx.steps(2);
    assert_eq!(ctx.regs().a, 0x99);
    assert_eq!(ctx.regs().o, 0);
}

#[test]
fn test_ldbm_reads_memory_at_operand() {
    let mut ctx = TestContext::new()
        .load_program(&with_operand(Opcode::Ldbm, 0x40))
        .poke(0x40, &[0x66]);
    ctx.steps(2);
    assert_eq!(ctx.regs().b, 0x66);
    assert_eq!(ctx.regs().a, 0);
}

#[test]
fn test_stam_writes_a_at_operand() {
    let mut ctx = TestContext::new()
        .load_program(&with_operand(Opcode::Stam, 0x40))
        .with_ab(0x5A, 0);
    ctx.steps(2);
    assert_eq!(ctx.cpu.mem.read(0x40), 0x5A);
    assert_eq!(ctx.regs().o, 0);
}

#[test]
fn test_ldac_and_ldbc_load_constants() {
    let mut ctx = TestContext::new().load_program(&[0x37, 0x4C]);
    ctx.steps(2);
    assert_eq!(ctx.regs().a, 0x07);
    assert_eq!(ctx.regs().b, 0x0C);
}

#[test]
fn test_ldap_is_relative_to_advanced_pc() {
    let mut ctx = TestContext::new().load_program(&[0x30, 0x53]);
    ctx.steps(2);
    // LDAP at address 1: PC is already 2 when O = 3 is added.
    assert_eq!(ctx.regs().a, 5);
}

#[test]
fn test_ldap_wraps() {
    let mut ctx = TestContext::new().at(0xFE).poke(0xFE, &[0x53]);
    ctx.steps(1);
    assert_eq!(ctx.regs().a, 0x02);
}

#[test]
fn test_ldai_indexes_through_a() {
    let mut ctx = TestContext::new()
        .load_program(&[0x63])
        .with_ab(0x10, 0)
        .poke(0x13, &[0x77]);
    ctx.steps(1);
    assert_eq!(ctx.regs().a, 0x77);
}

#[test]
fn test_ldai_address_wraps() {
    let mut ctx = TestContext::new()
        .load_program(&[0x64])
        .with_ab(0xFE, 0)
        .poke(0x02, &[0x21]);
    ctx.steps(1);
    assert_eq!(ctx.regs().a, 0x21);
}

#[test]
fn test_ldbi_indexes_through_b() {
    let mut ctx = TestContext::new()
        .load_program(&[0x75])
        .with_ab(0, 0x20)
        .poke(0x25, &[0x66]);
    ctx.steps(1);
    assert_eq!(ctx.regs().b, 0x66);
}

#[test]
fn test_stai_stores_through_b() {
    let mut ctx = TestContext::new()
        .load_program(&[0x82])
        .with_ab(0xAB, 0x30);
    ctx.steps(1);
    assert_eq!(ctx.cpu.mem.read(0x32), 0xAB);
    assert_eq!(ctx.regs().o, 0);
}

#[test]
fn test_br_jumps_relative() {
    let mut ctx = TestContext::new().load_program(&[0x95]);
    ctx.steps(1);
    assert_eq!(ctx.regs().pc, 6);
    assert!(ctx.cpu.is_running());
}

#[test]
fn test_br_offset_base_is_next_instruction() {
    let mut ctx = TestContext::new().at(10).poke(10, &[0x95]);
    ctx.steps(1);
    assert_eq!(ctx.regs().pc, 16);
}

#[test]
fn test_br_backwards_wraps() {
    // BR 0xF0 from address 0x05 lands at 0x06 + 0xF0 = 0xF6.
    let mut ctx = TestContext::new()
        .at(0x04)
        .poke(0x04, &with_operand(Opcode::Br, 0xF0));
    ctx.steps(2);
    assert_eq!(ctx.regs().pc, 0xF6);
}

#[rstest]
#[case::zero_taken(0x00, 5)]
#[case::nonzero_falls_through(0x01, 1)]
#[case::negative_falls_through(0x80, 1)]
fn test_brz(#[case] a: u8, #[case] pc: u8) {
    let mut ctx = TestContext::new().load_program(&[0xA4]).with_ab(a, 0);
    ctx.steps(1);
    assert_eq!(ctx.regs().pc, pc);
    assert_eq!(ctx.regs().o, 0);
}

#[rstest]
#[case::sign_set_taken(0x80, 5)]
#[case::all_ones_taken(0xFF, 5)]
#[case::positive_falls_through(0x7F, 1)]
#[case::zero_falls_through(0x00, 1)]
fn test_brn(#[case] a: u8, #[case] pc: u8) {
    let mut ctx = TestContext::new().load_program(&[0xB4]).with_ab(a, 0);
    ctx.steps(1);
    assert_eq!(ctx.regs().pc, pc);
    assert_eq!(ctx.regs().o, 0);
}

#[rstest]
#[case::no_operand(0xC0)]
#[case::operand_ignored(0xC7)]
fn test_brb_jumps_to_b(#[case] inst: u8) {
    let mut ctx = TestContext::new().load_program(&[inst]).with_ab(0, 0x42);
    ctx.steps(1);
    assert_eq!(ctx.regs().pc, 0x42);
    assert_eq!(ctx.regs().o, 0);
}

#[rstest]
#[case(0x01, 0x02, 0x03)]
#[case(0xF0, 0x20, 0x10)]
#[case(0xFF, 0x01, 0x00)]
fn test_add_wraps(#[case] a: u8, #[case] b: u8, #[case] sum: u8) {
    let mut ctx = TestContext::new().load_program(&[0xD0]).with_ab(a, b);
    ctx.steps(1);
    assert_eq!(ctx.regs().a, sum);
    assert_eq!(ctx.regs().b, b);
}

#[rstest]
#[case(0x05, 0x02, 0x03)]
#[case(0x01, 0x02, 0xFF)]
#[case(0x00, 0x80, 0x80)]
fn test_sub_wraps(#[case] a: u8, #[case] b: u8, #[case] diff: u8) {
    let mut ctx = TestContext::new().load_program(&[0xE0]).with_ab(a, b);
    ctx.steps(1);
    assert_eq!(ctx.regs().a, diff);
}

#[test]
fn test_alu_operand_nibble_is_discarded() {
    let mut ctx = TestContext::new().load_program(&[0xD9]).with_ab(1, 1);
    ctx.steps(1);
    assert_eq!(ctx.regs().a, 2);
    assert_eq!(ctx.regs().o, 0);
}

#[test]
fn test_pfix_shifts_and_keeps_operand() {
    let mut ctx = TestContext::new().load_program(&[0xF3]);
    ctx.steps(1);
    assert_eq!(ctx.regs().o, 0x30);
}

#[test]
fn test_pfix_drops_high_nibble() {
    let mut ctx = TestContext::new().load_program(&[0xF1, 0xF2, 0xF3]);
    ctx.steps(3);
    assert_eq!(ctx.regs().o, 0x30);
}

#[test]
fn test_prefix_accumulation() {
    let mut ctx = TestContext::new().load_program(&[0xF1, 0xF2, 0x33]);
    ctx.steps(1);
    assert_eq!(ctx.regs().o, 0x10);
    ctx.steps(1);
    assert_eq!(ctx.regs().o, 0x20);
    ctx.steps(1);
    assert_eq!(ctx.regs().a, 0x23);
    assert_eq!(ctx.regs().o, 0);
}
