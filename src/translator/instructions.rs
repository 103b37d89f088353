//! The instruction set: an externally-defined mapping from mnemonic to
//! instruction type.
//!
//! Unlike an LC-3-style fixed-width encoded word, a basm instruction record
//! is just a type tag plus one optional operand — there is no bit-packing
//! to do, so a flat lookup table stands in for the teacher's
//! encode-with-macros approach.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum InstType {
    Nop = 0,
    Push,
    Drop,
    Dup,
    Swap,
    Plus,
    Minus,
    Mult,
    Div,
    Not,
    Eq,
    Gt,
    Lt,
    Andb,
    Orb,
    Xor,
    Shr,
    Shl,
    Notb,
    PlusF,
    MinusF,
    MultF,
    DivF,
    EqF,
    GtF,
    LtF,
    Jmp,
    JmpIf,
    Ret,
    Call,
    Native,
    Halt,
    Read8,
    Read16,
    Read32,
    Read64,
    Write8,
    Write16,
    Write32,
    Write64,
    I2F,
    U2F,
    F2I,
    F2U,
}

pub struct InstSpec {
    pub mnemonic: &'static str,
    pub inst_type: InstType,
    pub has_operand: bool,
}

macro_rules! inst_table {
    ($(($mnemonic:literal, $ty:ident, $has_operand:literal)),* $(,)?) => {
        pub const INSTRUCTIONS: &[InstSpec] = &[
            $(InstSpec { mnemonic: $mnemonic, inst_type: InstType::$ty, has_operand: $has_operand }),*
        ];
    };
}

inst_table! {
    ("nop", Nop, false),
    ("push", Push, true),
    ("drop", Drop, false),
    ("dup", Dup, true),
    ("swap", Swap, true),
    ("plus", Plus, false),
    ("minus", Minus, false),
    ("mult", Mult, false),
    ("div", Div, false),
    ("not", Not, false),
    ("eq", Eq, false),
    ("gt", Gt, false),
    ("lt", Lt, false),
    ("andb", Andb, false),
    ("orb", Orb, false),
    ("xor", Xor, false),
    ("shr", Shr, false),
    ("shl", Shl, false),
    ("notb", Notb, false),
    ("plusf", PlusF, false),
    ("minusf", MinusF, false),
    ("multf", MultF, false),
    ("divf", DivF, false),
    ("eqf", EqF, false),
    ("gtf", GtF, false),
    ("ltf", LtF, false),
    ("jmp", Jmp, true),
    ("jmp_if", JmpIf, true),
    ("ret", Ret, false),
    ("call", Call, true),
    ("native", Native, true),
    ("halt", Halt, false),
    ("read8", Read8, false),
    ("read16", Read16, false),
    ("read32", Read32, false),
    ("read64", Read64, false),
    ("write8", Write8, false),
    ("write16", Write16, false),
    ("write32", Write32, false),
    ("write64", Write64, false),
    ("i2f", I2F, false),
    ("u2f", U2F, false),
    ("f2i", F2I, false),
    ("f2u", F2U, false),
}

pub fn lookup(mnemonic: &str) -> Option<&'static InstSpec> {
    INSTRUCTIONS.iter().find(|spec| spec.mnemonic == mnemonic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_mnemonics() {
        assert_eq!(lookup("push").unwrap().inst_type, InstType::Push);
        assert!(lookup("push").unwrap().has_operand);
        assert!(!lookup("halt").unwrap().has_operand);
    }

    #[test]
    fn unknown_mnemonic_is_none() {
        assert!(lookup("frobnicate").is_none());
    }

    #[test]
    fn call_and_native_take_operands() {
        assert!(lookup("call").unwrap().has_operand);
        assert!(lookup("native").unwrap().has_operand);
    }
}
