//! Testes integrados para vitals-core

use crate::*;

fn output_of(source: &str) -> (VmResult<RunReport>, String) {
    let mut out = Vec::new();
    let result = run_source(source, MachineConfig::default(), &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_literal_echo() {
    let (result, out) = output_of("SET O2 100\nPRINT O2\nHALT");
    assert!(result.is_ok());
    assert_eq!(out, "O2=100\n");
}

#[test]
fn test_gradual_sensor_convergence() {
    let source = "\
SET O2 0
INC IV
INC IV
INC IV
INC IV
INC IV
PRINT S_SPO2
HALT";
    let (result, out) = output_of(source);
    assert!(result.is_ok());
    // alvo 85; seis ticks a partir de 95
    assert_eq!(out, "S_SPO2=89\n");
}

#[test]
fn test_stack_round_trip() {
    let (result, out) = output_of("SET O2 7\nPUSH O2\nSET O2 0\nPOP O2\nPRINT O2\nHALT");
    let report = result.unwrap();
    assert_eq!(out, "O2=7\n");
    assert!(report.snapshot.stack.is_empty());
}

#[test]
fn test_stack_is_lifo() {
    let source = "\
SET O2 1
PUSH O2
SET O2 2
PUSH O2
POP IV
POP O2
PRINT IV
PRINT O2";
    let (_, out) = output_of(source);
    assert_eq!(out, "IV=2\nO2=1\n");
}

#[test]
fn test_self_loop_hits_step_limit_exactly() {
    for limit in [1u64, 99, 100, 1_000] {
        let program = Program::from_source("loop: GOTO loop").unwrap();
        let mut machine = Machine::new(&program, MachineConfig::default().with_step_limit(limit));
        let mut out = Vec::new();
        let err = machine.run(&mut out).unwrap_err();
        assert_eq!(err, VmError::StepLimitExceeded { limit });
        assert_eq!(machine.state().steps, limit);
    }
}

#[test]
fn test_default_step_limit() {
    let (result, out) = output_of("loop: GOTO loop");
    assert_eq!(result.unwrap_err(), VmError::StepLimitExceeded { limit: 100_000 });
    assert_eq!(out.lines().count(), 1_000);
    assert_eq!(out.lines().last(), Some("--- ciclo 100000 ---"));
}

#[test]
fn test_duplicate_label_fails_translation() {
    let err = Program::from_source("a: INC IV\nHALT\na: HALT").unwrap_err();
    assert!(err.is_translation_error());
    assert!(matches!(err, VmError::DuplicateLabel { line: 3, .. }));
}

#[test]
fn test_forward_reference() {
    let source = "\
GOTO skip
PRINT O2
skip: PRINT IV
HALT";
    let (result, out) = output_of(source);
    assert!(result.is_ok());
    assert_eq!(out, "IV=0\n");
}

#[test]
fn test_countdown_loop() {
    let source = "\
SET O2 3
loop: PRINT O2
DECJZ O2 done
GOTO loop
done: HALT";
    let (result, out) = output_of(source);
    let report = result.unwrap();
    assert_eq!(out, "O2=3\nO2=2\nO2=1\n");
    assert_eq!(report.halt, HaltReason::HaltInstruction);
    assert_eq!(report.snapshot.register(Register::O2), 0);
}

#[test]
fn test_failure_keeps_earlier_output() {
    let (result, out) = output_of("PRINT O2\nPOP O2\nPRINT IV");
    assert_eq!(result.unwrap_err(), VmError::StackUnderflow { line: 2 });
    assert_eq!(out, "O2=0\n");
}

#[test]
fn test_fluid_titration_reaches_target() {
    // IV=60 → S_IVLV sobe 2 por tick de 50 até 60; S_BPM sobe de 80 até 90
    let source = "\
SET IV 60
wait: CJMP S_IVLV LT 60 wait
PRINT S_IVLV
hold: CJMP S_BPM LT 90 hold
PRINT S_BPM
HALT";
    let (result, out) = output_of(source);
    let report = result.unwrap();
    assert_eq!(out, "S_IVLV=60\nS_BPM=90\n");
    assert_eq!(report.snapshot.sensor(Sensor::IvLevel), 60);
}

#[test]
fn test_snapshot_serializes() {
    let (result, _) = output_of("SET O2 5\nPUSH O2\nHALT");
    let report = result.unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["steps"], 2);
    assert_eq!(json["halt"], "HaltInstruction");
    assert_eq!(json["snapshot"]["stack"][0], 5);
    assert_eq!(json["snapshot"]["registers"][0][0], "O2");
}
