//! Loan and investment formulas: amortizing loans, compound growth and
//! savings-goal timelines. Every function is pure and deterministic.

pub mod compound;
pub mod loan;
pub mod savings;

pub use compound::{calculate_compound_interest, CompoundInterestResult, YearlyBalance};
pub use loan::{calculate_loan_payment, AmortizationEntry, LoanPaymentResult};
pub use savings::{calculate_savings_goal, calculate_savings_goal_from, SavingsGoalResult};
