//! Declarative field constraints for catalog payloads.
//!
//! Rules are immutable `const` descriptors evaluated per call. Validation is
//! a pure function of the input plus the rule set; it stops at the first
//! violated constraint and reports it in the caller-facing message
//! vocabulary ("nome é um campo obrigatório", ...).

use cardapio_core::{DomainError, DomainResult, ProductId};

use crate::product::{NewProduct, ProductInput};

/// Constraint set for a free-text field.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub field: &'static str,
    pub max_len: usize,
    pub required: bool,
}

/// Constraint set for a strictly positive integer field.
#[derive(Debug, Clone, Copy)]
pub struct NumberRule {
    pub field: &'static str,
    pub required: bool,
}

/// Create-payload rules. The bounds double as the storage column bounds.
pub const NOME: TextRule = TextRule {
    field: "nome",
    max_len: 50,
    required: true,
};
pub const DESCRICAO: TextRule = TextRule {
    field: "descricao",
    max_len: 100,
    required: false,
};
pub const PRECO: NumberRule = NumberRule {
    field: "preco",
    required: true,
};

/// Path-identifier rule shared by every `/:id` operation.
pub const ID_PARAMS: NumberRule = NumberRule {
    field: "id",
    required: true,
};

impl TextRule {
    /// Trim and bounds-check one incoming value, fail-fast.
    ///
    /// Absent is only accepted for optional fields. A required field that
    /// trims to empty counts as missing, same as the upstream form layer
    /// treats it.
    pub fn check(&self, value: Option<&str>) -> DomainResult<Option<String>> {
        let Some(raw) = value else {
            if self.required {
                return Err(obrigatorio(self.field));
            }
            return Ok(None);
        };

        let trimmed = raw.trim();
        if self.required && trimmed.is_empty() {
            return Err(obrigatorio(self.field));
        }
        if trimmed.chars().count() > self.max_len {
            return Err(max_caracteres(self.field, self.max_len));
        }

        Ok(Some(trimmed.to_string()))
    }
}

impl NumberRule {
    /// Require a strictly positive integer when the value is present.
    pub fn check(&self, value: Option<i64>) -> DomainResult<Option<i64>> {
        let Some(n) = value else {
            if self.required {
                return Err(obrigatorio(self.field));
            }
            return Ok(None);
        };

        if n <= 0 {
            return Err(numero_positivo(self.field));
        }

        Ok(Some(n))
    }

    /// Parse a raw path parameter against this rule.
    pub fn parse(&self, raw: &str) -> DomainResult<i64> {
        let n: i64 = raw
            .trim()
            .parse()
            .map_err(|_| numero_positivo(self.field))?;
        self.check(Some(n))?;
        Ok(n)
    }
}

/// Create schema: returns the normalized record ready for insert.
///
/// Fields are checked in declared order (nome, preco, descricao); the first
/// violated constraint wins. `permiteObservacoes` has no bounds beyond its
/// type and defaults to `false` when absent.
pub fn validate_create(input: &ProductInput) -> DomainResult<NewProduct> {
    let nome = NOME
        .check(input.nome.as_deref())?
        .ok_or_else(|| obrigatorio(NOME.field))?;
    let preco = PRECO
        .check(input.preco)?
        .ok_or_else(|| obrigatorio(PRECO.field))?;
    let descricao = DESCRICAO.check(input.descricao.as_deref())?;

    Ok(NewProduct {
        nome,
        descricao,
        preco,
        permite_observacoes: input.permite_observacoes.unwrap_or(false),
    })
}

/// Path-identifier schema shared by every `/:id` operation.
pub fn parse_path_id(raw: &str) -> DomainResult<ProductId> {
    ID_PARAMS.parse(raw).map(ProductId::from_i64)
}

fn obrigatorio(field: &str) -> DomainError {
    DomainError::validation(format!("{field} é um campo obrigatório"))
}

fn max_caracteres(field: &str, max: usize) -> DomainError {
    DomainError::validation(format!("{field} deve ter no máximo {max} caracteres"))
}

fn numero_positivo(field: &str) -> DomainError {
    DomainError::validation(format!("{field} deve ser um número positivo"))
}
