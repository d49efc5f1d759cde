//! The operation dispatcher: a sixteen-way ALU over the two operands,
//! the solution register and the store register.

use base::{Mode, Opcode, Word};

/// Executes one operation, writing the result into the solution
/// register (or, for [`Opcode::Str`], into the store register).
///
/// All arithmetic is unsigned and wrapping; underflow and overflow
/// are not guarded, so a subtraction that goes below zero shows up as
/// a large value, exactly as on the board.  Shift counts are taken
/// modulo the word width.
pub fn dispatch(opcode: Opcode, op1: Word, op2: Word, solution: &mut Word, store: &mut Word) {
    match opcode {
        Opcode::Add => *solution = op1.wrapping_add(op2),
        Opcode::Sub => *solution = op1.wrapping_sub(op2),
        Opcode::Rsb => *solution = op2.wrapping_sub(op1),
        Opcode::Mul => *solution = op1.wrapping_mul(op2),
        Opcode::Mla => *solution = op1.wrapping_mul(op2).wrapping_add(*store),
        Opcode::Teq => *solution = Word::from(op1 == op2),
        Opcode::Lsl => *solution = op1.wrapping_shl(op2),
        Opcode::Lsr => *solution = op1.wrapping_shr(op2),
        Opcode::And => *solution = op1 & op2,
        Opcode::Orr => *solution = op1 | op2,
        Opcode::Eor => *solution = op1 ^ op2,
        Opcode::Bic => *solution = op1 & !op2,
        Opcode::Mvn => *solution = !op1,
        Opcode::Clz => *solution = leading_zero_count(op1),
        Opcode::Str => *store = *solution,
        Opcode::Ldr => *solution = *store,
    }
}

/// Counts leading zero bits the way the board's scan did: bits 31
/// down to 1, stopping at the first set bit.  Bit 0 is never
/// inspected, so an all-zero word (and likewise the word 1) counts 31
/// zeroes where `u32::leading_zeros` would say 32 (or 31).
fn leading_zero_count(word: Word) -> Word {
    let mut count = 0;
    for bit in (1..=31).rev() {
        if (word >> bit) & 1 == 0 {
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// True when a solution does not fit the four-digit window of the
/// active mode.  Subtraction wraparound shows up here as a very large
/// unsigned value; the board treats that identically to a genuine
/// overflow, as there is no negative representation at all.
#[must_use]
pub fn exceeds_display_range(solution: Word, mode: Mode) -> bool {
    solution > mode.display_max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    /// Runs one dispatch against fresh registers, returning
    /// (solution, store).
    fn solve_with_store(opcode: Opcode, op1: Word, op2: Word, store: Word) -> (Word, Word) {
        let mut solution = 0;
        let mut store = store;
        dispatch(opcode, op1, op2, &mut solution, &mut store);
        (solution, store)
    }

    fn solve(opcode: Opcode, op1: Word, op2: Word) -> Word {
        solve_with_store(opcode, op1, op2, 0).0
    }

    #[test]
    fn test_arithmetic_opcodes() {
        assert_eq!(solve(Opcode::Add, 2, 3), 5);
        assert_eq!(solve(Opcode::Sub, 7, 5), 2);
        assert_eq!(solve(Opcode::Rsb, 5, 7), 2);
        assert_eq!(solve(Opcode::Mul, 123, 45), 5535);
    }

    #[test]
    fn test_mla_adds_the_store_register() {
        assert_eq!(solve_with_store(Opcode::Mla, 3, 4, 5), (17, 5));
    }

    #[test]
    fn test_teq() {
        assert_eq!(solve(Opcode::Teq, 42, 42), 1);
        assert_eq!(solve(Opcode::Teq, 42, 43), 0);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(solve(Opcode::Lsl, 0b1, 4), 0b10000);
        assert_eq!(solve(Opcode::Lsr, 0b10000, 4), 0b1);
        assert_eq!(solve(Opcode::Lsr, 0b111, 1), 0b11);
    }

    #[test]
    fn test_bitwise_opcodes() {
        assert_eq!(solve(Opcode::And, 0b1100, 0b1010), 0b1000);
        assert_eq!(solve(Opcode::Orr, 0b1100, 0b1010), 0b1110);
        assert_eq!(solve(Opcode::Eor, 0b1100, 0b1010), 0b0110);
        assert_eq!(solve(Opcode::Bic, 0b1111, 0b0101), 0b1010);
        assert_eq!(solve(Opcode::Mvn, 0, 99), Word::MAX);
    }

    #[test]
    fn test_store_and_load() {
        let mut solution = 0;
        let mut store = 0;
        dispatch(Opcode::Add, 20, 22, &mut solution, &mut store);
        assert_eq!(solution, 42);
        dispatch(Opcode::Str, 0, 0, &mut solution, &mut store);
        assert_eq!(store, 42, "STR should capture the current solution");
        assert_eq!(solution, 42, "STR should leave the solution alone");
        dispatch(Opcode::Mul, 6, 9, &mut solution, &mut store);
        assert_eq!(solution, 54);
        dispatch(Opcode::Ldr, 1234, 5678, &mut solution, &mut store);
        assert_eq!(
            solution, 42,
            "LDR should reproduce the stored value regardless of the operands"
        );
    }

    #[test]
    fn test_clz_scan_stops_at_the_first_set_bit() {
        assert_eq!(solve(Opcode::Clz, 0x8000_0000, 0), 0);
        assert_eq!(solve(Opcode::Clz, 0x4000_0000, 0), 1);
        assert_eq!(solve(Opcode::Clz, 0x0001_0000, 0), 15);
        assert_eq!(solve(Opcode::Clz, 0b10, 0), 30);
        // A set bit below the one the scan stops at changes nothing.
        assert_eq!(solve(Opcode::Clz, 0x0001_0001, 0), 15);
    }

    #[test]
    fn test_clz_never_inspects_bit_zero() {
        // The scan covers bits 31..=1, which is 31 bits.  A word of
        // zero therefore counts 31, not the 32 a full-width CLZ would
        // report; and the word 1 is indistinguishable from zero
        // because its only set bit is the one the scan skips.
        assert_eq!(solve(Opcode::Clz, 0, 0), 31);
        assert_eq!(solve(Opcode::Clz, 1, 0), 31);
    }

    #[test]
    fn test_wrapping_subtraction_trips_the_display_range_check() {
        let below_zero = solve(Opcode::Sub, 0, 1);
        assert_eq!(below_zero, Word::MAX);
        assert!(exceeds_display_range(below_zero, Mode::Hexadecimal));
        assert!(exceeds_display_range(below_zero, Mode::Decimal));
        assert!(exceeds_display_range(below_zero, Mode::RawBinary));
    }

    #[test]
    fn test_decimal_overflow_detection() {
        let solution = solve(Opcode::Add, 9999, 1);
        assert_eq!(solution, 10_000);
        assert!(exceeds_display_range(solution, Mode::Decimal));
        assert!(!exceeds_display_range(solution, Mode::Hexadecimal));
        assert!(!exceeds_display_range(9999, Mode::Decimal));
    }

    #[test]
    fn test_binary_display_range() {
        assert!(!exceeds_display_range(0b1111, Mode::RawBinary));
        assert!(exceeds_display_range(0b10000, Mode::RawBinary));
    }

    #[proptest]
    fn prop_teq_is_commutative(op1: Word, op2: Word) {
        assert_eq!(solve(Opcode::Teq, op1, op2), solve(Opcode::Teq, op2, op1));
    }

    #[proptest]
    fn prop_sub_and_rsb_mirror_each_other(op1: Word, op2: Word) {
        assert_eq!(solve(Opcode::Sub, op1, op2), solve(Opcode::Rsb, op2, op1));
    }

    #[proptest]
    fn prop_clz_matches_the_builtin_above_bit_zero(word: Word) {
        // For any word with a set bit above bit 0 the scan agrees
        // with the conventional count.
        if word > 1 {
            assert_eq!(solve(Opcode::Clz, word, 0), word.leading_zeros());
        }
    }
}
