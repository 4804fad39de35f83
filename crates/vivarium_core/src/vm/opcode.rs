use serde::{Deserialize, Serialize};

/// Decoded instruction. Every byte value maps to exactly one opcode; most
/// opcodes own a bucket of ten or eleven consecutive bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    IncDp,
    DecDp,
    IncCell,
    DecCell,
    TurnClockwise,
    TurnCounterClockwise,
    MoveForward,
    MoveBackward,
    LoopOpen,
    LoopClose,
    SenseLargest,
    SenseOrganism,
    /// Selector is `(byte - 1) % 10`.
    StoreRegister(u8),
    LoadRegister(u8),
    Jump,
    Grow,
    Clamp,
    SenseFood,
    LoadImmediate,
    Randomize,
    DpFromIp,
    Fire,
    /// Second food-sense bucket; behaves exactly like `SenseFood`.
    SenseFoodAlt,
    StorePosition,
    Nop,
}

impl Opcode {
    pub fn decode(byte: u8) -> Self {
        match byte {
            0..=10 => Opcode::IncDp,
            11..=20 => Opcode::DecDp,
            21..=30 => Opcode::IncCell,
            31..=40 => Opcode::DecCell,
            41..=50 => Opcode::TurnClockwise,
            51..=60 => Opcode::TurnCounterClockwise,
            61..=70 => Opcode::MoveForward,
            71..=80 => Opcode::MoveBackward,
            81..=90 => Opcode::LoopOpen,
            91..=100 => Opcode::LoopClose,
            101..=110 => Opcode::SenseLargest,
            111..=120 => Opcode::SenseOrganism,
            121..=130 => Opcode::StoreRegister((byte - 1) % 10),
            131..=140 => Opcode::LoadRegister((byte - 1) % 10),
            141..=150 => Opcode::Jump,
            151..=160 => Opcode::Grow,
            161..=170 => Opcode::Clamp,
            171..=180 => Opcode::SenseFood,
            181..=190 => Opcode::LoadImmediate,
            191..=200 => Opcode::Randomize,
            201..=210 => Opcode::DpFromIp,
            211..=220 => Opcode::Fire,
            221..=230 => Opcode::SenseFoodAlt,
            231..=240 => Opcode::StorePosition,
            241..=255 => Opcode::Nop,
        }
    }

    pub fn is_loop_close(byte: u8) -> bool {
        matches!(Self::decode(byte), Opcode::LoopClose)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::IncDp => "INC",
            Opcode::DecDp => "DEC",
            Opcode::IncCell => "*INC",
            Opcode::DecCell => "*DEC",
            Opcode::TurnClockwise => "RIGHT",
            Opcode::TurnCounterClockwise => "LEFT",
            Opcode::MoveForward => "FORWARD",
            Opcode::MoveBackward => "BACK",
            Opcode::LoopOpen => "WHILE",
            Opcode::LoopClose => "END",
            Opcode::SenseLargest => "DETECT",
            Opcode::SenseOrganism => "BIN_DETECT",
            Opcode::StoreRegister(_) => "STORE",
            Opcode::LoadRegister(_) => "LOAD",
            Opcode::Jump => "JMP",
            Opcode::Grow => "GROW",
            Opcode::Clamp => "CLAMP",
            Opcode::SenseFood | Opcode::SenseFoodAlt => "DETECT_FOOD",
            Opcode::LoadImmediate => "IMM",
            Opcode::Randomize => "RAND",
            Opcode::DpFromIp => "P=IP",
            Opcode::Fire => "FIRE",
            Opcode::StorePosition => "POS",
            Opcode::Nop => "NOP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert_eq!(Opcode::decode(0), Opcode::IncDp);
        assert_eq!(Opcode::decode(10), Opcode::IncDp);
        assert_eq!(Opcode::decode(11), Opcode::DecDp);
        assert_eq!(Opcode::decode(90), Opcode::LoopOpen);
        assert_eq!(Opcode::decode(91), Opcode::LoopClose);
        assert_eq!(Opcode::decode(100), Opcode::LoopClose);
        assert_eq!(Opcode::decode(240), Opcode::StorePosition);
        assert_eq!(Opcode::decode(241), Opcode::Nop);
        assert_eq!(Opcode::decode(255), Opcode::Nop);
    }

    #[test]
    fn test_register_selector() {
        assert_eq!(Opcode::decode(121), Opcode::StoreRegister(0));
        assert_eq!(Opcode::decode(129), Opcode::StoreRegister(8));
        assert_eq!(Opcode::decode(130), Opcode::StoreRegister(9));
        assert_eq!(Opcode::decode(131), Opcode::LoadRegister(0));
        assert_eq!(Opcode::decode(140), Opcode::LoadRegister(9));
    }

    #[test]
    fn test_food_sense_buckets_stay_distinct() {
        assert_eq!(Opcode::decode(175), Opcode::SenseFood);
        assert_eq!(Opcode::decode(225), Opcode::SenseFoodAlt);
        assert_eq!(Opcode::SenseFood.mnemonic(), Opcode::SenseFoodAlt.mnemonic());
    }
}
