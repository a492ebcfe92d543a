//! Programa traduzido: lista de instruções + tabela de labels

use std::collections::HashMap;
use std::fmt;

use crate::error::{VmError, VmResult};

/// Instrução ainda não decodificada
///
/// O mnemônico já vem em maiúsculas; os operandos são tokens crus, validados
/// apenas quando a instrução executa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub operands: Vec<String>,
    /// Linha de origem (1-based)
    pub line: usize,
}

impl Instruction {
    pub fn new(mnemonic: impl Into<String>, operands: Vec<String>, line: usize) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            operands,
            line,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

/// Label → índice de instrução
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    entries: HashMap<String, usize>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra um label; falha se já existir
    pub fn define(&mut self, label: &str, index: usize, line: usize) -> VmResult<()> {
        if self.entries.contains_key(label) {
            return Err(VmError::DuplicateLabel {
                label: label.to_string(),
                line,
            });
        }
        self.entries.insert(label.to_string(), index);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entradas ordenadas por índice (e nome, para labels no mesmo índice)
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries.into_iter()
    }
}

/// Programa VMASM; índices 0..N-1 são o espaço de endereços dos saltos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    labels: LabelTable,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>, labels: LabelTable) -> Self {
        Self {
            instructions,
            labels,
        }
    }

    /// Traduz texto-fonte VMASM
    pub fn from_source(source: &str) -> VmResult<Self> {
        crate::translator::translate(source.lines())
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
