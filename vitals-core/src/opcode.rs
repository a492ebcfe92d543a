//! Opcodes do VMASM
//!
//! Conjunto fechado de dez instruções e os operadores relacionais do CJMP.

use std::fmt;

/// Opcodes do VMASM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `SET R n`: R := n
    Set,
    /// `INC R`: R := R + 1
    Inc,
    /// `DECJZ R label`: R := R - 1, salta se R == 0
    DecJz,
    /// `GOTO label`
    Goto,
    /// `PRINT id`
    Print,
    /// `PUSH R`
    Push,
    /// `POP R`
    Pop,
    /// `GET sensor R`: R := sensor
    Get,
    /// `CJMP sensor relop n label`
    CJmp,
    /// `HALT`
    Halt,
}

impl Opcode {
    pub const ALL: [Opcode; 10] = [
        Opcode::Set,
        Opcode::Inc,
        Opcode::DecJz,
        Opcode::Goto,
        Opcode::Print,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Get,
        Opcode::CJmp,
        Opcode::Halt,
    ];

    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Set => "SET",
            Self::Inc => "INC",
            Self::DecJz => "DECJZ",
            Self::Goto => "GOTO",
            Self::Print => "PRINT",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Get => "GET",
            Self::CJmp => "CJMP",
            Self::Halt => "HALT",
        }
    }

    /// Número mínimo de operandos
    pub const fn arity(&self) -> usize {
        match self {
            Self::Halt => 0,
            Self::Inc | Self::Goto | Self::Print | Self::Push | Self::Pop => 1,
            Self::Set | Self::DecJz | Self::Get => 2,
            Self::CJmp => 4,
        }
    }

    /// Sintaxe para ajuda e diagnósticos
    pub const fn syntax(&self) -> &'static str {
        match self {
            Self::Set => "SET R n",
            Self::Inc => "INC R",
            Self::DecJz => "DECJZ R label",
            Self::Goto => "GOTO label",
            Self::Print => "PRINT id",
            Self::Push => "PUSH R",
            Self::Pop => "POP R",
            Self::Get => "GET sensor R",
            Self::CJmp => "CJMP sensor relop n label",
            Self::Halt => "HALT",
        }
    }

    /// Mnemônico já normalizado para maiúsculas
    pub fn from_mnemonic(m: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == m)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Operador relacional do CJMP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relop {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Relop {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_uppercase().as_str() {
            "LT" => Self::Lt,
            "LE" => Self::Le,
            "GT" => Self::Gt,
            "GE" => Self::Ge,
            "EQ" => Self::Eq,
            "NE" => Self::Ne,
            _ => return None,
        })
    }

    pub fn eval(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }
}
