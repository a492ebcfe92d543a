//! Erros do VitalsVM
//!
//! Todos os erros são fatais: a execução é abortada no ponto de detecção e
//! as mutações já aplicadas permanecem (fazem parte do trace observável).

use thiserror::Error;

/// Tipo de resultado do VitalsVM
pub type VmResult<T> = Result<T, VmError>;

/// Erros de tradução e execução
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Label definido duas vezes
    #[error("line {line}: duplicate label '{label}'")]
    DuplicateLabel { label: String, line: usize },

    /// Operando de salto que não é um label conhecido
    #[error("line {line}: unknown jump target '{label}'")]
    UnresolvedJumpTarget { label: String, line: usize },

    /// Nome fora do conjunto {O2, IV}
    #[error("line {line}: invalid register '{name}'")]
    InvalidRegister { name: String, line: usize },

    /// Nome fora do conjunto {S_SPO2, S_BPM, S_IVLV}
    #[error("line {line}: invalid sensor '{name}'")]
    InvalidSensor { name: String, line: usize },

    /// Mnemônico não reconhecido
    #[error("line {line}: unknown instruction '{opcode}'")]
    UnknownOpcode { opcode: String, line: usize },

    /// POP com a pilha vazia
    #[error("line {line}: stack underflow on POP")]
    StackUnderflow { line: usize },

    /// Limite de passos atingido (provável loop infinito)
    #[error("step limit reached ({limit}), probable infinite loop")]
    StepLimitExceeded { limit: u64 },

    /// Literal inválido ou operandos insuficientes
    #[error("line {line}: {opcode}: {detail}")]
    MalformedOperand {
        opcode: String,
        detail: String,
        line: usize,
    },

    /// INC/DECJZ saiu do intervalo de i64
    #[error("line {line}: register {register} overflowed")]
    RegisterOverflow { register: String, line: usize },

    /// Falha ao escrever no stream de saída
    #[error("output error: {0}")]
    Output(String),
}

impl VmError {
    /// Linha de origem associada ao erro, quando existe
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::DuplicateLabel { line, .. }
            | Self::UnresolvedJumpTarget { line, .. }
            | Self::InvalidRegister { line, .. }
            | Self::InvalidSensor { line, .. }
            | Self::UnknownOpcode { line, .. }
            | Self::StackUnderflow { line }
            | Self::MalformedOperand { line, .. }
            | Self::RegisterOverflow { line, .. } => Some(*line),
            Self::StepLimitExceeded { .. } | Self::Output(_) => None,
        }
    }

    /// Verdadeiro para erros detectados durante a tradução
    pub fn is_translation_error(&self) -> bool {
        matches!(self, Self::DuplicateLabel { .. })
    }
}

impl From<std::io::Error> for VmError {
    fn from(err: std::io::Error) -> Self {
        VmError::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VmError::DuplicateLabel {
            label: "loop".into(),
            line: 4,
        };
        assert_eq!(err.to_string(), "line 4: duplicate label 'loop'");

        let err = VmError::StepLimitExceeded { limit: 10 };
        assert!(err.to_string().contains("infinite loop"));
    }

    #[test]
    fn test_error_line() {
        assert_eq!(VmError::StackUnderflow { line: 7 }.line(), Some(7));
        assert_eq!(VmError::StepLimitExceeded { limit: 1 }.line(), None);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: VmError = io_err.into();
        assert!(matches!(err, VmError::Output(ref msg) if msg.contains("pipe closed")));
    }
}
