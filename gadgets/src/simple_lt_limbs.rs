//! SimpleLtLimbsGadget gadget

/// Returns `true` when `lhs < rhs`, comparing two equal-length
/// little-endian sequences of 16-bit limbs.
///
/// Starting from the least significant limb, `lt := lhs[0] < rhs[0]`; for
/// each more significant limb `lt := lhs[i] < rhs[i] or (lhs[i] == rhs[i]
/// and lt)`. The final `lt` is the strict comparison of the full values.
/// The circuit realizes the same chain with one comparison gate per limb;
/// this rendition is the witness-level model of that chain.
#[derive(Clone, Debug)]
pub struct SimpleLtLimbsGadget<'a> {
    lhs: &'a [u16], // Little-endian limbs of the left hand side
    rhs: &'a [u16], // Little-endian limbs of the right hand side
}

impl<'a> SimpleLtLimbsGadget<'a> {
    /// Returns SimpleLtLimbsGadget. Both sides must carry the same number
    /// of limbs and at least one.
    pub fn new(lhs: &'a [u16], rhs: &'a [u16]) -> Self {
        assert_eq!(lhs.len(), rhs.len());
        assert!(!lhs.is_empty());
        Self { lhs, rhs }
    }

    /// Evaluate the comparison chain.
    pub fn is_lt(&self) -> bool {
        let mut lt = self.lhs[0] < self.rhs[0];
        for i in 1..self.lhs.len() {
            lt = self.lhs[i] < self.rhs[i] || (self.lhs[i] == self.rhs[i] && lt);
        }
        lt
    }
}
