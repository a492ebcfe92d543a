//! Tradutor VMASM
//!
//! Converte linhas de texto em [`Program`] numa única passagem:
//!
//! ```text
//! ; comentário            # também comentário
//! start:                  ; label sozinho: aponta para a próxima instrução
//!     SET O2 40
//! a: b: INC IV            ; vários labels na mesma linha
//!     DECJZ IV start      ; referência para frente ou para trás
//!     HALT
//! ```
//!
//! O opcode não é validado aqui: um mnemônico desconhecido só falha se for
//! executado.

use tracing::debug;

use crate::error::VmResult;
use crate::program::{Instruction, LabelTable, Program};

/// Remove o comentário (primeiro `;` ou `#`) e espaços
fn strip_comment(line: &str) -> &str {
    let end = line.find([';', '#']).unwrap_or(line.len());
    line[..end].trim()
}

/// Consome os prefixos `label:`; devolve o corpo restante da instrução
///
/// Um segmento vazio antes de `:` encerra a varredura e o `:` continua no
/// corpo.
fn scan_labels<'a>(
    mut body: &'a str,
    labels: &mut LabelTable,
    index: usize,
    line: usize,
) -> VmResult<&'a str> {
    while let Some(colon) = body.find(':') {
        let label = body[..colon].trim();
        if label.is_empty() {
            break;
        }
        labels.define(label, index, line)?;
        body = body[colon + 1..].trim();
    }
    Ok(body)
}

/// Traduz linhas de código-fonte em instruções e labels
pub fn translate<I, S>(lines: I) -> VmResult<Program>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut instructions = Vec::new();
    let mut labels = LabelTable::new();

    for (idx, raw) in lines.into_iter().enumerate() {
        let line = idx + 1;
        let text = strip_comment(raw.as_ref());
        if text.is_empty() {
            continue;
        }

        let body = scan_labels(text, &mut labels, instructions.len(), line)?;
        let mut tokens = body.split_whitespace();
        let Some(mnemonic) = tokens.next() else {
            continue;
        };

        instructions.push(Instruction::new(
            mnemonic.to_uppercase(),
            tokens.map(str::to_string).collect(),
            line,
        ));
    }

    debug!(
        instructions = instructions.len(),
        labels = labels.len(),
        "program translated"
    );

    Ok(Program::new(instructions, labels))
}
