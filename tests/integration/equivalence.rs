//! Rewrites never change what a program prints

use neve::middle::OptimizerConfig;
use neve::util::config::PipelineConfig;
use neve::{run_with_config, CompilerConfig};
use proptest::prelude::*;

fn run_under(
    source: &str,
    optimizer: OptimizerConfig,
) -> String {
    let config = PipelineConfig {
        compiler: CompilerConfig { optimizer },
        ..PipelineConfig::default()
    };
    run_with_config(source, &config).unwrap()
}

/// Int-typed expressions
fn int_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i64..=20).prop_map(|n| n.to_string()),
        Just("0".to_string()),
        Just("-0".to_string()),
        Just("9007199254740993".to_string()),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "<<", ">>", "&", "^", "|"]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("({} {} {})", l, op, r)),
            inner.prop_map(|e| format!("-{}", e)),
        ]
    })
}

/// Int or Float expressions
fn num_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        int_expr(),
        (0u32..100).prop_map(|n| format!("{}.5", n)),
        Just("0.0".to_string()),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/"]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("({} {} {})", l, op, r)),
            inner.prop_map(|e| format!("-{}", e)),
        ]
    })
}

/// Whole programs of any result type
fn program() -> impl Strategy<Value = String> {
    prop_oneof![
        num_expr(),
        int_expr().prop_map(|e| format!("{} == 0", e)),
        int_expr().prop_map(|e| format!("0 != {}", e)),
        int_expr().prop_map(|e| format!("{} == -1", e)),
        (int_expr(), int_expr()).prop_map(|(a, b)| format!("{} == {}", a, b)),
        (num_expr(), num_expr()).prop_map(|(a, b)| format!("not not ({} < {})", a, b)),
        num_expr().prop_map(|e| format!("- -{}", e)),
        int_expr().prop_map(|e| format!("1 / {}", e)),
        (num_expr(), int_expr()).prop_map(|(a, b)| format!("{} / ({} * -1)", a, b)),
        int_expr().prop_map(|e| format!("\"#{{{} * 0}}\"", e)),
        (num_expr(), int_expr()).prop_map(|(a, b)| format!("\"a=#{{{}}} b=#{{{}}}\"", a, b)),
    ]
}

/// Each operation whose run-time result is a signed zero
const SIGNED_ZERO: &[(&str, &str)] = &[
    ("-0", "-0"),
    ("0 * -5", "-0"),
    ("-(2 - 2)", "-0"),
    ("1 / -0", "-inf"),
    ("1 / (0 * -1)", "-inf"),
    ("\"#{-0}\"", "-0"),
    ("-0 == 0", "true"),
];

#[test]
fn test_signed_zero_survives_rewrites() {
    for (source, expected) in SIGNED_ZERO {
        assert_eq!(
            run_under(source, OptimizerConfig::disabled()),
            *expected,
            "unoptimized {}",
            source
        );
        assert_eq!(
            run_under(source, OptimizerConfig::default()),
            *expected,
            "optimized {}",
            source
        );
    }
}

proptest! {
    #[test]
    fn test_folding_preserves_results(source in program()) {
        let folded = OptimizerConfig {
            fold_constants: true,
            ..OptimizerConfig::disabled()
        };
        prop_assert_eq!(
            run_under(&source, folded),
            run_under(&source, OptimizerConfig::disabled())
        );
    }

    #[test]
    fn test_specializing_preserves_results(source in program()) {
        let specialized = OptimizerConfig {
            specialize_equality: true,
            ..OptimizerConfig::disabled()
        };
        prop_assert_eq!(
            run_under(&source, specialized),
            run_under(&source, OptimizerConfig::disabled())
        );
    }

    #[test]
    fn test_all_rewrites_preserve_results(source in program()) {
        prop_assert_eq!(
            run_under(&source, OptimizerConfig::default()),
            run_under(&source, OptimizerConfig::disabled())
        );
    }
}
