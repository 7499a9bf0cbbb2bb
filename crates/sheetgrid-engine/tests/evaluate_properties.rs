// Property-based tests for formula evaluation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use sheetgrid_engine::engine::{CellRef, Evaluation, Sheet, eval_restricted, evaluate};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn small_sheet() -> impl Strategy<Value = Sheet> {
    prop::collection::vec(("[0-9]{1,3}|=[A-E][1-9]\\*2|=[0-9+*]{1,6}|[a-z]{0,4}", 0usize..10, 0usize..5), 0..12)
        .prop_map(|cells| {
            let mut sheet = Sheet::new(10, 5);
            for (text, row, col) in cells {
                sheet.set(row, col, text).expect("in range");
            }
            sheet
        })
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn literals_pass_through_unchanged(text in "[^=].*|") {
        let sheet = Sheet::new(10, 5);
        prop_assert_eq!(evaluate(&text, &sheet), Evaluation::Text(text.clone()));
    }

    #[test]
    fn out_of_bounds_references_contribute_zero(row in 10usize..5000, col in 5usize..700, k in 0u32..1000) {
        let sheet = Sheet::new(10, 5);
        let cell = CellRef::new(row, col);
        let formula = format!("={cell}+{k}");
        prop_assert_eq!(evaluate(&formula, &sheet), Evaluation::Number(k as f64));
    }

    #[test]
    fn disallowed_characters_never_evaluate(prefix in "[0-9+*/().-]{0,8}", bad in "[^0-9+*/().-]", suffix in "[0-9+*/().-]{0,8}") {
        let expr = format!("{prefix}{bad}{suffix}");
        prop_assert_eq!(eval_restricted(&expr), 0.0);
    }

    #[test]
    fn evaluation_is_idempotent(sheet in small_sheet(), formula in "=[A-E][1-9\\+*0-9]{0,6}") {
        let first = evaluate(&formula, &sheet);
        let second = evaluate(&formula, &sheet);
        match (&first, &second) {
            (Evaluation::Number(a), Evaluation::Number(b)) if a.is_nan() => prop_assert!(b.is_nan()),
            _ => prop_assert_eq!(&first, &second),
        }
    }

    #[test]
    fn deep_nesting_degrades_to_zero(depth in 300usize..20_000, sign in "[-+(]") {
        let formula = match sign.as_str() {
            "(" => format!("={}1{}", "(".repeat(depth), ")".repeat(depth)),
            op => format!("={}1", op.repeat(depth)),
        };
        let sheet = Sheet::new(10, 5);
        prop_assert_eq!(evaluate(&formula, &sheet), Evaluation::Number(0.0));
    }

    #[test]
    fn sum_of_integers_matches_iterator_sum(values in prop::collection::vec(0u32..10_000, 1..8)) {
        let sheet = Sheet::new(1, 1);
        let args: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let formula = format!("=sum({})", args.join(","));
        let expected: f64 = values.iter().map(|v| *v as f64).sum();
        prop_assert_eq!(evaluate(&formula, &sheet), Evaluation::Number(expected));
    }
}
