use finance_consulting_core::calculator::{compound, loan, savings};
use finance_consulting_core::FinanceError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Loan payments
// ===========================================================================

#[test]
fn test_home_mortgage_headline_figures() {
    let r = loan::calculate_loan_payment(dec!(250_000), dec!(0.045), 30).unwrap();
    assert!((r.monthly_payment - dec!(1266.71)).abs() < dec!(0.01));
    // 1266.7133 x 360; quoted elsewhere as ~456,017
    assert!((r.total_payment - dec!(456_017.35)).abs() < dec!(1));
    assert!((r.total_interest - dec!(206_017.35)).abs() < dec!(1));
    assert_eq!(r.total_interest, r.total_payment - r.principal);
    assert_eq!(r.total_payment, r.monthly_payment * Decimal::from(360));
}

#[test]
fn test_schedule_length_and_payoff_across_terms() {
    let cases = [
        (dec!(250_000), dec!(0.045), 30),
        (dec!(25_000), dec!(0.06), 5),
        (dec!(10_000), dec!(0.12), 3),
        (dec!(1_000), Decimal::ZERO, 1),
        (dec!(500_000), dec!(0.18), 40),
    ];
    for (principal, rate, years) in cases {
        let r = loan::calculate_loan_payment(principal, rate, years).unwrap();
        assert_eq!(r.schedule.len(), (years * 12) as usize);
        let last = r.schedule.last().unwrap();
        assert!(last.remaining_balance.abs() < dec!(0.01));
        assert_eq!(last.period_index, years * 12);
    }
}

#[test]
fn test_schedule_sums_back_to_total_payment() {
    let r = loan::calculate_loan_payment(dec!(25_000), dec!(0.06), 5).unwrap();
    let reconstructed: Decimal = r
        .schedule
        .iter()
        .map(|e| e.principal_component + e.interest_component)
        .sum();
    assert!((reconstructed - r.total_payment).abs() < dec!(0.000001));

    let principal_repaid: Decimal = r.schedule.iter().map(|e| e.principal_component).sum();
    assert!((principal_repaid - r.principal).abs() < dec!(0.01));
}

#[test]
fn test_zero_rate_is_exact_division() {
    let principal = dec!(100_000);
    let r = loan::calculate_loan_payment(principal, Decimal::ZERO, 7).unwrap();
    assert_eq!(r.monthly_payment, principal / Decimal::from(84));
    assert_eq!(r.total_interest.round_dp(10), Decimal::ZERO);
}

#[test]
fn test_loan_preconditions() {
    for (p, r, y) in [
        (dec!(-5), dec!(0.05), 10),
        (dec!(1_000), dec!(-0.001), 10),
        (dec!(1_000), dec!(0.05), 0),
    ] {
        match loan::calculate_loan_payment(p, r, y) {
            Err(FinanceError::InvalidArgument { .. }) => {}
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}

#[test]
fn test_analyze_loan_envelope() {
    let out = loan::analyze_loan(&loan::LoanInput {
        principal: dec!(25_000),
        annual_rate: dec!(0.06),
        years: 5,
    })
    .unwrap();
    assert_eq!(out.methodology, "Level-payment amortizing loan");
    assert!(out.warnings.is_empty());
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

// ===========================================================================
// Compound interest
// ===========================================================================

#[test]
fn test_compound_monotone_in_rate() {
    let rates = [dec!(0), dec!(0.01), dec!(0.03), dec!(0.05), dec!(0.08), dec!(0.15)];
    let finals: Vec<Decimal> = rates
        .iter()
        .map(|r| {
            compound::calculate_compound_interest(dec!(10_000), *r, 10, 12)
                .unwrap()
                .final_amount
        })
        .collect();
    assert!(finals.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_compound_monotone_in_years() {
    let finals: Vec<Decimal> = (1..=30)
        .map(|y| {
            compound::calculate_compound_interest(dec!(5_000), dec!(0.04), y, 4)
                .unwrap()
                .final_amount
        })
        .collect();
    assert!(finals.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_more_frequent_compounding_earns_more() {
    let annual = compound::calculate_compound_interest(dec!(1_000), dec!(0.06), 10, 1).unwrap();
    let daily = compound::calculate_compound_interest(dec!(1_000), dec!(0.06), 10, 365).unwrap();
    assert!(daily.final_amount > annual.final_amount);
}

#[test]
fn test_compound_preconditions() {
    assert!(compound::calculate_compound_interest(Decimal::ZERO, dec!(0.05), 5, 12).is_err());
    assert!(compound::calculate_compound_interest(dec!(100), dec!(0.05), 0, 12).is_err());
    assert!(compound::calculate_compound_interest(dec!(100), dec!(0.05), 5, 0).is_err());
}

#[test]
fn test_extreme_growth_is_reported_not_panicked() {
    // 100% a year compounded monthly for a century is around 1e43
    match compound::calculate_compound_interest(dec!(1_000), dec!(1.0), 100, 12) {
        Err(FinanceError::InvalidArgument { field, reason }) => {
            assert_eq!(field, "final_amount");
            assert_eq!(reason, "result overflows Decimal range");
        }
        other => panic!("expected overflow error, got {other:?}"),
    }
}

#[test]
fn test_century_loan_at_extreme_rate_is_interest_only() {
    let r = loan::calculate_loan_payment(dec!(100_000), dec!(1.0), 100).unwrap();
    let interest_only = dec!(100_000) / dec!(12);
    assert!((r.monthly_payment - interest_only).abs() < dec!(0.01));
    assert_eq!(r.schedule.len(), 1200);
    assert_eq!(r.schedule.last().unwrap().remaining_balance, Decimal::ZERO);
}

// ===========================================================================
// Savings goal
// ===========================================================================

#[test]
fn test_savings_goal_is_smallest_sufficient_month() {
    let r = savings::calculate_savings_goal(dec!(50_000), dec!(500), dec!(0.03)).unwrap();
    let months = r.months_required.unwrap();

    let monthly_rate = dec!(0.03) / dec!(12);
    let mut balance = Decimal::ZERO;
    for _ in 0..months - 1 {
        balance = balance * (Decimal::ONE + monthly_rate) + dec!(500);
    }
    assert!(balance < dec!(50_000));
    balance = balance * (Decimal::ONE + monthly_rate) + dec!(500);
    assert!(balance >= dec!(50_000));
}

#[test]
fn test_savings_goal_unreachable_signal() {
    let r = savings::calculate_savings_goal(dec!(10_000), dec!(-50), dec!(0.04)).unwrap();
    assert_eq!(r.months_required, None);
    assert!(!r.is_reachable());

    let out = savings::analyze_savings_goal(&savings::SavingsGoalInput {
        goal_amount: dec!(10_000),
        monthly_contribution: Decimal::ZERO,
        annual_rate: dec!(0.04),
        current_savings: Decimal::ZERO,
    })
    .unwrap();
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_savings_goal_preconditions() {
    assert!(savings::calculate_savings_goal(dec!(-1), dec!(100), dec!(0.03))
        .unwrap_err()
        .is_invalid_argument());
    assert!(savings::calculate_savings_goal(dec!(100), dec!(100), dec!(-0.03))
        .unwrap_err()
        .is_invalid_argument());
}
