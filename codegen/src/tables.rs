//! Immutable operator and type tables.
//!
//! Both tables are total over their closed key sets. Completeness is checked
//! once, when an emitter is constructed; a table that exists is complete.

use std::collections::HashMap;

use shade_dtype::{DType, ScalarDType};
use snafu::{OptionExt, ensure};
use strum::IntoEnumIterator;

use crate::error::{OperandCountSnafu, UnmappedOpSnafu, UnmappedTypeSnafu};
use crate::{ElementwiseOp, OpRender, Result};

/// Operator → rendering rule.
#[derive(Debug, Clone)]
pub struct OpTable {
    rules: HashMap<ElementwiseOp, OpRender>,
}

impl OpTable {
    /// Build a table, failing if any operator is missing or a rule's arity
    /// disagrees with its operator. Later duplicates replace earlier ones.
    pub fn try_from_entries(entries: impl IntoIterator<Item = (ElementwiseOp, OpRender)>) -> Result<Self> {
        let rules: HashMap<_, _> = entries.into_iter().collect();

        for op in ElementwiseOp::iter() {
            let rule = rules.get(&op).context(UnmappedOpSnafu { op })?;
            ensure!(rule.arity() == op.arity(), OperandCountSnafu { op, expected: op.arity(), actual: rule.arity() });
        }

        Ok(Self { rules })
    }

    /// Render `op` applied to already-rendered operand expressions.
    pub fn render(&self, op: ElementwiseOp, operands: &[&str]) -> Result<String> {
        ensure!(operands.len() == op.arity(), OperandCountSnafu { op, expected: op.arity(), actual: operands.len() });
        let rule = self.rules.get(&op).context(UnmappedOpSnafu { op })?;
        Ok(rule.apply(operands))
    }
}

/// Scalar type → target type name.
#[derive(Debug, Clone)]
pub struct TypeTable {
    names: HashMap<ScalarDType, &'static str>,
}

impl TypeTable {
    /// Build a table, failing if any scalar type has no name.
    pub fn try_from_entries(entries: impl IntoIterator<Item = (ScalarDType, &'static str)>) -> Result<Self> {
        let names: HashMap<_, _> = entries.into_iter().collect();

        for scalar in ScalarDType::iter() {
            ensure!(names.contains_key(&scalar), UnmappedTypeSnafu { scalar });
        }

        Ok(Self { names })
    }

    /// Name of a scalar type.
    pub fn scalar(&self, scalar: ScalarDType) -> Result<&'static str> {
        self.names.get(&scalar).copied().context(UnmappedTypeSnafu { scalar })
    }

    /// Name of the lane type of `dtype`.
    pub fn base(&self, dtype: &DType) -> Result<&'static str> {
        self.scalar(dtype.base())
    }
}
