//! Kani formal verification proofs for branch displacement encoding.
//!
//! These proofs use bounded model checking to verify displacement
//! invariants hold for ALL possible inputs.
//!
//! To run these proofs, install Kani and run:
//! ```
//! cargo kani --tests
//! ```
//!
//! They are ignored when running regular tests.

// Allow the `kani` cfg which is set by the Kani verifier
#![allow(unexpected_cfgs)]

#[cfg(kani)]
mod kani_proofs {
    use nessmith::assembler::encoder::{
        branch_displacement, encode_displacement, wrap_displacement,
    };

    /// Proof: In-range displacements round-trip through the encoded byte
    #[kani::proof]
    fn proof_in_range_displacement_roundtrips() {
        let displacement: i8 = kani::any();

        let byte = encode_displacement(displacement as i64).unwrap();
        assert_eq!(byte as i8, displacement);
        assert_eq!(byte, wrap_displacement(displacement as i64));
    }

    /// Proof: Out-of-range displacements are always rejected
    #[kani::proof]
    fn proof_out_of_range_displacement_rejected() {
        let displacement: i64 = kani::any();
        kani::assume(displacement > 127 || displacement < -128);

        assert!(encode_displacement(displacement).is_none());
    }

    /// Proof: The branch lands on its target
    #[kani::proof]
    fn proof_branch_reaches_target() {
        let target: u16 = kani::any();
        let operand: u16 = kani::any();
        kani::assume(operand < u16::MAX);

        let displacement = branch_displacement(target as usize, operand as usize);
        if let Some(byte) = encode_displacement(displacement) {
            let next = operand as i64 + 1;
            assert_eq!(next + (byte as i8) as i64, target as i64);
        }
    }
}
