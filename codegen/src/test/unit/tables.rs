//! Operator and type table construction.

use shade_dtype::{DType, ScalarDType};

use crate::cstyle::types::{c_ops, c_types};
use crate::cstyle::{CStyleEmitter, CStyleLanguage};
use crate::wgsl::types::{wgsl_ops, wgsl_types};
use crate::{ElementwiseOp, Error, OpRender, OpTable, TypeTable};

#[test]
fn test_wgsl_tables_complete() {
    assert!(OpTable::try_from_entries(wgsl_ops()).is_ok());
    assert!(TypeTable::try_from_entries(wgsl_types()).is_ok());
}

#[test]
fn test_missing_op_fails_fast() {
    let ops = wgsl_ops().into_iter().filter(|(op, _)| *op != ElementwiseOp::Sin);
    let err = OpTable::try_from_entries(ops).unwrap_err();
    assert_eq!(err, Error::UnmappedOp { op: ElementwiseOp::Sin });
}

#[test]
fn test_wrong_arity_rule_fails_fast() {
    let ops = wgsl_ops().into_iter().chain([(ElementwiseOp::Max, OpRender::Unary(|x| format!("abs({x})")))]);
    let err = OpTable::try_from_entries(ops).unwrap_err();
    assert_eq!(err, Error::OperandCount { op: ElementwiseOp::Max, expected: 2, actual: 1 });
}

#[test]
fn test_missing_type_fails_fast() {
    let types = wgsl_types().into_iter().filter(|(scalar, _)| *scalar != ScalarDType::Float16);
    let err = TypeTable::try_from_entries(types).unwrap_err();
    assert_eq!(err, Error::UnmappedType { scalar: ScalarDType::Float16 });
}

#[test]
fn test_emitter_construction_checks_tables() {
    let ops = c_ops().into_iter().filter(|(op, _)| *op != ElementwiseOp::MulAcc);
    let err = CStyleEmitter::with_tables(CStyleLanguage::default(), c_types(), ops).unwrap_err();
    assert_eq!(err, Error::UnmappedOp { op: ElementwiseOp::MulAcc });
}

#[test]
fn test_later_entry_replaces_earlier() {
    let ops = wgsl_ops().into_iter().chain([(ElementwiseOp::Max, OpRender::Binary(|x, y| format!("fmax({x},{y})")))]);
    let table = OpTable::try_from_entries(ops).unwrap();
    assert_eq!(table.render(ElementwiseOp::Max, &["a", "b"]).unwrap(), "fmax(a,b)");
}

#[test]
fn test_render_checks_operand_count() {
    let table = OpTable::try_from_entries(wgsl_ops()).unwrap();
    let err = table.render(ElementwiseOp::MulAcc, &["a", "b"]).unwrap_err();
    assert_eq!(err, Error::OperandCount { op: ElementwiseOp::MulAcc, expected: 3, actual: 2 });
}

#[test]
fn test_type_table_lookup() {
    let table = TypeTable::try_from_entries(wgsl_types()).unwrap();
    assert_eq!(table.scalar(ScalarDType::UInt32).unwrap(), "u32");
    assert_eq!(table.base(&DType::Float16.vec(4)).unwrap(), "f16");
}

#[test]
fn test_rule_arity_matches_op() {
    use strum::IntoEnumIterator;
    let rules: Vec<_> = wgsl_ops();
    for op in ElementwiseOp::iter() {
        let (_, rule) = rules.iter().find(|(o, _)| *o == op).expect("rule present");
        assert_eq!(rule.arity(), op.arity(), "{}", op.as_ref());
    }
}
