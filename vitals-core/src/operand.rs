//! Resolução de operandos
//!
//! Um token cru é classificado, nesta ordem, como alvo de salto (label
//! conhecido), literal inteiro base 10 ou identificador. A resolução é
//! preguiçosa: acontece quando a instrução executa.

use crate::program::LabelTable;

/// Resultado da classificação de um operando
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    /// Índice de instrução de um label
    Target(usize),
    /// Literal inteiro
    Literal(i64),
    /// Nome de registrador/sensor (ou qualquer outro token)
    Ident(&'a str),
}

impl<'a> Operand<'a> {
    pub fn target(&self) -> Option<usize> {
        match self {
            Self::Target(index) => Some(*index),
            _ => None,
        }
    }

    pub fn literal(&self) -> Option<i64> {
        match self {
            Self::Literal(value) => Some(*value),
            _ => None,
        }
    }
}

/// Classifica `raw` contra a tabela de labels
pub fn resolve<'a>(raw: &'a str, labels: &LabelTable) -> Operand<'a> {
    if let Some(index) = labels.get(raw) {
        return Operand::Target(index);
    }
    match raw.parse::<i64>() {
        Ok(value) => Operand::Literal(value),
        Err(_) => Operand::Ident(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LabelTable {
        let mut labels = LabelTable::new();
        labels.define("loop", 3, 1).unwrap();
        labels.define("7", 1, 2).unwrap();
        labels
    }

    #[test]
    fn test_resolve_label() {
        assert_eq!(resolve("loop", &table()), Operand::Target(3));
    }

    #[test]
    fn test_resolve_literal() {
        assert_eq!(resolve("42", &table()), Operand::Literal(42));
        assert_eq!(resolve("-8", &table()), Operand::Literal(-8));
        assert_eq!(resolve("+5", &table()), Operand::Literal(5));
    }

    #[test]
    fn test_label_wins_over_literal() {
        assert_eq!(resolve("7", &table()), Operand::Target(1));
    }

    #[test]
    fn test_resolve_ident() {
        assert_eq!(resolve("O2", &table()), Operand::Ident("O2"));
        assert_eq!(resolve("LOOP", &table()), Operand::Ident("LOOP"));
        assert_eq!(resolve("4.5", &table()), Operand::Ident("4.5"));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Operand::Target(2).target(), Some(2));
        assert_eq!(Operand::Literal(2).target(), None);
        assert_eq!(Operand::Literal(9).literal(), Some(9));
        assert_eq!(Operand::Ident("x").literal(), None);
    }
}
