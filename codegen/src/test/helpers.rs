//! Shared helpers for emitter tests.
//!
//! The evaluators here understand exactly the shapes the emitters produce;
//! they are not general WGSL parsers.

use crate::WgslConfig;
use crate::wgsl::WgslEmitter;

pub fn wgsl() -> WgslEmitter {
    WgslEmitter::new(WgslConfig::default()).expect("WGSL tables are complete")
}

/// `data0`, `data1`, ...
pub fn buffer_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("data{i}")).collect()
}

/// `(slot, name)` of every storage declaration in `source`, in order.
pub fn bindings(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .filter_map(|line| {
            let rest = line.strip_prefix("@group(")?;
            let (_, rest) = rest.split_once(") @binding(")?;
            let (slot, rest) = rest.split_once(')')?;
            let rest = rest.strip_prefix(" var<storage,read_write> ")?;
            let (name, _) = rest.split_once(':')?;
            Some((slot.parse().ok()?, name.to_string()))
        })
        .collect()
}

/// Run a rendered WGSL loop header and collect the loop variable values.
///
/// Understands `for(var i = A; i <= B; i++) {`.
pub fn loop_values(header: &str) -> Vec<i64> {
    let inner = header.strip_prefix("for(var ").and_then(|s| s.strip_suffix(") {")).expect("loop header shape");
    let parts: Vec<&str> = inner.split("; ").collect();
    assert_eq!(parts.len(), 3, "init; cond; step: {header}");

    let (var, init) = parts[0].split_once(" = ").expect("init clause");
    let (cond_var, bound) = parts[1].split_once(" <= ").expect("inclusive condition");
    assert_eq!(cond_var, var);
    assert_eq!(parts[2], format!("{var}++"));

    let (init, bound): (i64, i64) = (init.parse().expect("int init"), bound.parse().expect("int bound"));
    let mut values = Vec::new();
    let mut i = init;
    while i <= bound {
        values.push(i);
        i += 1;
    }
    values
}

/// Evaluate `select(f32(Y), X, bool(C))` with literal operands.
pub fn eval_select(expr: &str) -> f32 {
    let inner = expr.strip_prefix("select(").and_then(|s| s.strip_suffix(')')).expect("select shape");
    let args: Vec<&str> = inner.split(", ").collect();
    assert_eq!(args.len(), 3, "three select operands: {expr}");

    let false_value = unwrap_call(args[0], "f32");
    let true_value = args[1];
    let cond = unwrap_call(args[2], "bool");

    let cond = match cond {
        "true" => true,
        "false" => false,
        numeric => parse_literal(numeric) != 0.0,
    };
    parse_literal(if cond { true_value } else { false_value })
}

fn unwrap_call<'a>(expr: &'a str, func: &str) -> &'a str {
    expr.strip_prefix(func)
        .and_then(|s| s.strip_prefix('('))
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or_else(|| panic!("expected {func}(..), got {expr}"))
}

/// Parse a WGSL numeric literal: decimal with optional `f`/`h`/`u`/`i`
/// suffix, or a hexadecimal float.
pub fn parse_literal(lit: &str) -> f32 {
    if lit.contains("0x") {
        return parse_hex_float(lit) as f32;
    }
    let digits = lit.trim_end_matches(['f', 'h', 'u', 'i']);
    digits.parse().unwrap_or_else(|_| panic!("not a decimal literal: {lit}"))
}

/// Value of a hexadecimal float literal such as `-0x1.fffffep+127f`.
pub fn parse_hex_float(lit: &str) -> f64 {
    let (sign, body) = match lit.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, lit),
    };
    let body = body.strip_prefix("0x").expect("hex prefix").trim_end_matches(['f', 'h']);
    let (mantissa, exponent) = body.split_once('p').expect("binary exponent");
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut value = u64::from_str_radix(int_part, 16).expect("hex integer part") as f64;
    for (i, digit) in frac_part.chars().enumerate() {
        let digit = digit.to_digit(16).expect("hex fraction digit") as f64;
        value += digit / 16f64.powi(i as i32 + 1);
    }
    let exponent: i32 = exponent.parse().expect("decimal exponent");
    sign * value * 2f64.powi(exponent)
}
