//! Property-based tests for operand parsing, swizzles and symbol tables
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. Operand and instruction text round-trips through parse/print
//! 2. The parsers never panic on arbitrary input
//! 3. Symbol tables hand out gap-free, non-overlapping registers

use proptest::prelude::*;
use shader_ir::compiler::swizzle;
use shader_ir::{Instruction, Ir, Operand, RegisterClass, SimpleDeclaration};

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

fn swizzle_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[xyzw]{1,4}".prop_map(|s| s),
        "[rgba]{1,4}".prop_map(|s| s),
        "[stpq]{1,4}".prop_map(|s| s),
    ]
}

fn base_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("uniform".to_string()),
        Just("attribute".to_string()),
        Just("varying".to_string()),
        Just("temp".to_string()),
        "%[1-9]".prop_map(|s| s),
        "%t[1-9]".prop_map(|s| s),
        "[a-z_][a-z0-9_]{0,8}".prop_map(|s| s),
    ]
}

fn operand_text() -> impl Strategy<Value = String> {
    let symbolic = (
        prop::bool::ANY,
        base_name(),
        prop::option::of(0u32..64),
        prop::option::of(swizzle_string()),
    )
        .prop_map(|(neg, name, address, swz)| {
            let mut text = String::new();
            if neg {
                text.push('-');
            }
            text.push_str(&name);
            if let Some(address) = address {
                text.push_str(&format!("@{}", address));
            }
            if let Some(swz) = swz {
                text.push('.');
                text.push_str(&swz);
            }
            text
        });
    let literal = (-100i32..100, 0u32..100).prop_map(|(i, f)| format!("{}.{}", i, f));
    prop_oneof![4 => symbolic, 1 => literal]
}

// =============================================================================
// PARSER PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn operand_text_round_trips(text in operand_text()) {
        let parsed = Operand::parse(&text).unwrap();
        prop_assert_eq!(parsed.full(), text);
        prop_assert_eq!(Operand::parse(&parsed.full()).unwrap(), parsed);
    }

    #[test]
    fn instruction_text_round_trips(ops in prop::collection::vec(operand_text(), 0..=4)) {
        let text = if ops.is_empty() {
            "NOP".to_string()
        } else {
            format!("NOP {}", ops.join(", "))
        };
        let parsed = Instruction::parse(&text).unwrap();
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn operand_parser_never_panics(text in r"[\x00-\x7F]{0,40}") {
        let _ = Operand::parse(&text);
    }

    #[test]
    fn instruction_parser_never_panics(text in r"[\x00-\x7F]{0,80}") {
        if let Err(err) = Instruction::parse(&text) {
            prop_assert!(err.is_internal());
        }
    }
}

// =============================================================================
// SWIZZLE PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn normalize_preserves_length_and_is_canonical(swz in swizzle_string()) {
        let normalized = swizzle::normalize(&swz).unwrap();
        prop_assert_eq!(normalized.len(), swz.len());
        prop_assert!(swizzle::is_valid_swizzle(&normalized, swizzle::CANONICAL));
        prop_assert_eq!(swizzle::normalize(&normalized).unwrap(), normalized.clone());
    }

    #[test]
    fn build_never_emits_out_of_order_swizzles(swz in swizzle_string()) {
        let mut ir = Ir::new(());
        let src = format!("uniform@0.{}", swz);
        ir.build(&["MOV %1, %2"], &["varying@0", src.as_str()]).unwrap();

        let last = ir.last().unwrap();
        for (_, op) in last.operands() {
            if let Some(s) = &op.swizzle {
                prop_assert!(swizzle::is_canonical(s));
            }
        }
        let expected_len = if swizzle::is_canonical(&swz) { 1 } else { 2 };
        prop_assert_eq!(ir.code().len(), expected_len);
    }
}

// =============================================================================
// SYMBOL TABLE PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn symbol_indices_are_prefix_sums(
        decls in prop::collection::vec(("[a-e]", 0u32..5), 0..30)
    ) {
        let mut ir = Ir::new(());
        let mut seen: Vec<(String, u32, u32)> = Vec::new();
        let mut expected_next = 0;

        for (name, slots) in decls {
            let decl = SimpleDeclaration::new(name.clone(), slots);
            let reg = ir.resolve(RegisterClass::Varying, &decl);
            let known = seen.iter().find(|(n, _, _)| *n == name).map(|(_, _, i)| *i);
            match known {
                Some(index) => prop_assert_eq!(reg.index, index),
                None => {
                    prop_assert_eq!(reg.index, expected_next);
                    expected_next += slots;
                    seen.push((name, slots, reg.index));
                }
            }
            prop_assert_eq!(ir.symbols().varying.next(), expected_next);
        }
    }

    #[test]
    fn temps_never_overlap(sizes in prop::collection::vec(1u32..5, 1..20)) {
        let mut ir = Ir::new(());
        let mut end = 0;
        for n in sizes {
            let reg = ir.temp(n);
            prop_assert_eq!(reg.index, end);
            end += n;
        }
    }
}
