//! # Statistics

use crate::common::harness::TestContext;
use hexcpu_core::isa::Opcode;
use hexcpu_core::stats::{STATS_SECTIONS, SimStats};
use rstest::rstest;

#[rstest]
#[case(Opcode::Ldam, |s: &SimStats| s.inst_load)]
#[case(Opcode::Ldbm, |s: &SimStats| s.inst_load)]
#[case(Opcode::Stam, |s: &SimStats| s.inst_store)]
#[case(Opcode::Ldai, |s: &SimStats| s.inst_indirect)]
#[case(Opcode::Ldbi, |s: &SimStats| s.inst_indirect)]
#[case(Opcode::Stai, |s: &SimStats| s.inst_indirect)]
#[case(Opcode::Ldap, |s: &SimStats| s.inst_const)]
#[case(Opcode::Sub, |s: &SimStats| s.inst_alu)]
#[case(Opcode::Pfix, |s: &SimStats| s.inst_prefix)]
fn test_record_counts_category(#[case] op: Opcode, #[case] counter: fn(&SimStats) -> u64) {
    let mut stats = SimStats::default();
    stats.record(op, false);
    stats.record(op, false);
    assert_eq!(counter(&stats), 2);
    assert_eq!(stats.per_opcode[op.code() as usize], 2);
}

#[test]
fn test_record_branches() {
    let mut stats = SimStats::default();
    stats.record(Opcode::Brz, true);
    stats.record(Opcode::Brn, false);
    stats.record(Opcode::Brb, true);
    stats.record(Opcode::Br, true);
    stats.record(Opcode::Br, false);
    assert_eq!(stats.branches_taken, 3);
    assert_eq!(stats.branches_not_taken, 1);
    assert_eq!(stats.halts, 1);
}

#[test]
fn test_engine_feeds_stats() {
    let mut ctx = TestContext::new().load_program(&[0x31, 0x20, 0x10, 0xD0, 0xFF, 0x9E]);
    let _ = ctx.run(100);
    let stats = &ctx.cpu.stats;
    assert_eq!(stats.steps, 6);
    assert_eq!(stats.inst_const, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_alu, 1);
    assert_eq!(stats.inst_prefix, 1);
    assert_eq!(stats.halts, 1);
}

#[test]
fn test_write_all_sections() {
    let mut stats = SimStats::default();
    stats.steps = 2;
    stats.record(Opcode::Add, false);
    stats.record(Opcode::Pfix, false);

    let mut out = String::new();
    stats.write_sections(&mut out, &[]).unwrap();
    for heading in ["SUMMARY", "INSTRUCTION MIX", "BRANCHES", "OPCODES"] {
        assert!(out.contains(heading), "missing {heading}");
    }
    assert!(out.contains("sim.steps              2"));
    assert!(out.contains("op.alu                 1 (50.00%)"));
    assert!(out.contains("  ADD"));
    assert!(!out.contains("  SUB"), "unused opcodes are omitted");
}

#[test]
fn test_display_writes_every_section() {
    let mut stats = SimStats::default();
    stats.record(Opcode::Brz, true);
    let text = stats.to_string();
    for heading in ["SUMMARY", "INSTRUCTION MIX", "BRANCHES", "OPCODES"] {
        assert!(text.contains(heading), "missing {heading}");
    }
    assert!(text.contains("br.taken               1"));
}

#[test]
fn test_untimed_sections_are_stable() {
    let mut stats = SimStats::default();
    stats.steps = 4;
    stats.record(Opcode::Ldai, false);
    stats.record(Opcode::Stai, false);
    stats.record(Opcode::Br, false);

    let untimed = ["instruction_mix", "branch", "opcodes"];
    let mut first = String::new();
    let mut second = String::new();
    stats.write_sections(&mut first, &untimed).unwrap();
    stats.write_sections(&mut second, &untimed).unwrap();
    assert_eq!(first, second);
    assert!(!first.contains("sim.seconds"));
}

#[test]
fn test_indirect_accesses_counted_separately() {
    let mut ctx = TestContext::new()
        .load_program(&[0x47, 0x70, 0x80, 0x60, 0xFF, 0x9E]);
    let _ = ctx.run(100);
    let stats = &ctx.cpu.stats;
    assert_eq!(stats.inst_indirect, 3);
    assert_eq!(stats.inst_load, 0);
    assert_eq!(stats.inst_store, 0);

    let mut out = String::new();
    stats.write_sections(&mut out, &["instruction_mix"]).unwrap();
    assert!(out.contains("op.indirect            3 (50.00%)"));
}

#[test]
fn test_write_selected_section() {
    let stats = SimStats::default();
    let mut out = String::new();
    stats.write_sections(&mut out, &["branch"]).unwrap();
    assert!(out.contains("BRANCHES"));
    assert!(!out.contains("SUMMARY"));
    assert!(!out.contains("INSTRUCTION MIX"));
}

#[test]
fn test_unknown_section_names_are_ignored() {
    let stats = SimStats::default();
    let mut out = String::new();
    stats.write_sections(&mut out, &["nonsense"]).unwrap();
    // Only the two framing rules remain.
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_every_named_section_selects_itself() {
    let stats = SimStats::default();
    for section in STATS_SECTIONS {
        let mut out = String::new();
        stats.write_sections(&mut out, &[*section]).unwrap();
        assert!(out.lines().count() > 2, "section {section} wrote nothing");
    }
}

#[test]
fn test_empty_stats_have_zero_throughput() {
    let stats = SimStats::default();
    assert!(stats.steps_per_second().abs() < f64::EPSILON);
}
