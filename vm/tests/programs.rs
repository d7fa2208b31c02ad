use rv32i_common::memory::MemoryProvider;
use rv32i_common::riscv::{encode_instruction, encode_program, BuiltinOpcode, BuiltinOpcode::*};
use rv32i_vm::cpu::HaltReason;
use rv32i_vm::memory::FlatMemory;
use rv32i_vm::{Simulator, StopReason};

fn load(program: &[(BuiltinOpcode, u8, u8, u32)], size: u32) -> Simulator {
    let memory = FlatMemory::from_image(size, &encode_program(program)).unwrap();
    let mut sim = Simulator::new(memory);
    sim.reset();
    sim
}

#[test]
fn test_add_two_immediates() {
    let mut sim = load(&[(ADDI, 1, 0, 5), (ADDI, 2, 0, 7), (ADD, 3, 1, 2), (EBREAK, 0, 0, 0)], 0x100);
    let summary = sim.run(0, None);

    assert_eq!(sim.register(3), 12);
    assert!(sim.is_halted());
    assert_eq!(sim.instruction_counter(), 4);
    assert_eq!(summary.reason, StopReason::Halted(HaltReason::Ebreak { pc: 12 }));
}

#[test]
fn test_branch_target() {
    // twelve nops, then beq x0,x0,+8 at 0x30 skipping the addi at 0x34
    let mut program = vec![(ADDI, 0, 0, 0); 12];
    program.extend([(BEQ, 0, 0, 8), (ADDI, 5, 0, 1), (EBREAK, 0, 0, 0)]);
    let mut sim = load(&program, 0x100);

    sim.run(13, None);
    assert_eq!(sim.pc(), 0x38);

    sim.run(0, None);
    assert_eq!(sim.register(5), 0xf0f0f0f0);
    assert_eq!(sim.halt_reason(), Some(HaltReason::Ebreak { pc: 0x38 }));
}

#[test]
fn test_illegal_instruction_changes_nothing() {
    let mut image = encode_program(&[(ADDI, 1, 0, 1)]);
    image.extend(0xffff_ffffu32.to_le_bytes());
    let memory = FlatMemory::from_image(0x20, &image).unwrap();
    let mut sim = Simulator::new(memory);

    sim.run(0, None);
    let registers = sim.cpu.registers;
    let bytes = sim.memory.as_bytes().to_vec();

    assert!(sim.is_halted());
    assert_eq!(sim.halt_reason(), Some(HaltReason::IllegalInstruction { pc: 4, word: 0xffffffff }));
    assert_eq!(sim.pc(), 4);
    assert_eq!(sim.register(1), 1);

    // running again is a no-op
    sim.run(0, None);
    assert_eq!(sim.cpu.registers, registers);
    assert_eq!(sim.memory.as_bytes(), &bytes[..]);
    assert_eq!(sim.instruction_counter(), 2);
}

#[test]
fn test_running_off_the_end_halts() {
    // the fill pattern 0xa5a5a5a5 is not an instruction
    let mut sim = load(&[(ADDI, 1, 0, 1)], 0x10);
    sim.run(0, None);
    assert_eq!(
        sim.halt_reason(),
        Some(HaltReason::IllegalInstruction { pc: 4, word: 0xa5a5a5a5 })
    );
}

#[test]
fn test_loop_with_memory() {
    // sum 1..=10 into x2, store each partial sum to 0x100 + 4*i, then load the last one back
    let program = [
        (ADDI, 1, 0, 10),            // 0x00 x1 = 10
        (ADDI, 2, 0, 0),             // 0x04 x2 = 0
        (ADDI, 3, 0, 0x100),         // 0x08 x3 = 0x100
        (ADD, 2, 2, 1),              // 0x0c x2 += x1
        (SW, 3, 2, 0),               // 0x10 m32(x3) = x2
        (ADDI, 3, 3, 4),             // 0x14 x3 += 4
        (ADDI, 1, 1, -1i32 as u32),  // 0x18 x1 -= 1
        (BNE, 1, 0, -16i32 as u32),  // 0x1c loop back to 0x0c
        (LW, 4, 3, -4i32 as u32),    // 0x20 x4 = m32(x3 - 4)
        (EBREAK, 0, 0, 0),           // 0x24
    ];
    let mut sim = load(&program, 0x200);
    sim.run(0, None);

    assert_eq!(sim.register(2), 55);
    assert_eq!(sim.register(4), 55);
    assert_eq!(sim.register(3), 0x100 + 4 * 10);
    assert_eq!(sim.memory.get32(0x100), 10);
    assert_eq!(sim.memory.get32(0x104), 19);
}

#[test]
fn test_call_and_return() {
    let program = [
        (JAL, 1, 0, 12),            // 0x00 call 0x0c
        (ADDI, 10, 10, 1),          // 0x04
        (EBREAK, 0, 0, 0),          // 0x08
        (ADDI, 10, 0, 41),          // 0x0c
        (JALR, 0, 1, 0),            // 0x10 ret
    ];
    let mut sim = load(&program, 0x40);
    sim.run(0, None);

    assert_eq!(sim.register(10), 42);
    assert_eq!(sim.register(1), 4);
    assert_eq!(sim.pc(), 8);
}

#[test]
fn test_byte_and_halfword_stores_round_trip() {
    let program = [
        (LUI, 1, 0, 0x12345),       // x1 = 0x12345000
        (ADDI, 1, 1, 0x678),        // x1 = 0x12345678
        (ADDI, 2, 0, 0x80),         // x2 = 0x80
        (SW, 2, 1, 0),              // m32(0x80) = x1
        (SB, 2, 1, 4),              // m8(0x84) = 0x78
        (SH, 2, 1, 6),              // m16(0x86) = 0x5678
        (LB, 3, 2, 3),              // x3 = sx(0x12)
        (LHU, 4, 2, 6),             // x4 = 0x5678
        (LW, 5, 2, 4),              // x5 = 0x5678a578
        (EBREAK, 0, 0, 0),
    ];
    let mut sim = load(&program, 0x100);
    sim.run(0, None);

    assert_eq!(sim.register(3), 0x12);
    assert_eq!(sim.register(4), 0x5678);
    assert_eq!(sim.register(5), 0x5678_a578);
}

#[test]
fn test_lui_decodes_upper_immediate() {
    let mut image = 0xabcde237u32.to_le_bytes().to_vec();
    image.extend(encode_instruction(EBREAK, 0, 0, 0).to_le_bytes());
    let mut sim = Simulator::new(FlatMemory::from_image(16, &image).unwrap());

    sim.run(0, None);
    assert_eq!(sim.register(4), 0xabcde000);
}
