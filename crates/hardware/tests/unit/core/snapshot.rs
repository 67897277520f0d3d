//! # Snapshots

use crate::common::builder::halt;
use crate::common::harness::TestContext;
use hexcpu_core::common::{HaltReason, MEMORY_SIZE};
use hexcpu_core::isa::Opcode;
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn test_snapshot_mirrors_registers() {
    let mut ctx = TestContext::new()
        .load_program(&[0x33, 0x45, 0xF2])
        .poke(0x90, &[0x77]);
    ctx.steps(3);
    let snap = ctx.cpu.snapshot();
    assert_eq!(snap.pc, 3);
    assert_eq!(snap.a, 3);
    assert_eq!(snap.b, 5);
    assert_eq!(snap.o, 0x20);
    assert_eq!(snap.inst, 0xF2);
    assert_eq!(snap.opcode(), Some(Opcode::Pfix));
    assert_eq!(snap.mem[0x90], 0x77);
    assert_eq!(snap.steps, 3);
    assert!(snap.running);
}

#[test]
fn test_snapshot_is_detached() {
    let mut ctx = TestContext::new().load_program(&[0x31]);
    let before = ctx.cpu.snapshot();
    ctx.steps(1);
    assert_eq!(before.a, 0);
    assert_eq!(ctx.cpu.snapshot().a, 1);
}

#[test]
fn test_snapshot_records_halt() {
    let mut ctx = TestContext::new().load_program(&halt());
    let _ = ctx.run(10);
    let snap = ctx.cpu.snapshot();
    assert!(!snap.running);
    assert_eq!(snap.halt, Some(HaltReason::Halt { a: 0 }));
}

#[test]
fn test_json_has_full_memory_image() {
    let mut ctx = TestContext::new().load_program(&[0x3A, 0x2F]);
    ctx.steps(2);
    let json: Value = serde_json::from_str(&ctx.cpu.snapshot().to_json().unwrap()).unwrap();

    let mem = json["mem"].as_array().unwrap();
    assert_eq!(mem.len(), MEMORY_SIZE);
    assert_eq!(mem[0], 0x3A);
    assert_eq!(mem[0x0F], 0x0A);
    assert_eq!(json["a"], 10);
    assert_eq!(json["pc"], 2);
    assert_eq!(json["running"], true);
    assert_eq!(json["halt"], Value::Null);
}

#[test]
fn test_json_halt_is_tagged() {
    let mut ctx = TestContext::new().load_program(&[0x34, 0xFF, 0x9E]);
    let _ = ctx.run(10);
    let json: Value = serde_json::from_str(&ctx.cpu.snapshot().to_json().unwrap()).unwrap();
    assert_eq!(json["halt"]["kind"], "halt");
    assert_eq!(json["halt"]["detail"]["a"], 4);
}
