//! Pure aggregation over already-fetched records.
//!
//! Nothing in here touches storage or the clock: callers pass the records of
//! the period and `today`, which keeps every function referentially pure.
//! Sums and differences saturate at `Decimal`'s bounds and divisions collapse
//! to zero, so no input makes these functions panic.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::summary_model::{
    CategoryBreakdown, FinancialSummary, MonthTotals, MonthlyComparison, NextPayment, Variation,
};
use crate::categories::ExpenseCategory;
use crate::fixed_expenses::FixedExpense;
use crate::goals::Goal;
use crate::incomes::Income;
use crate::utils::format::round_for_display;
use crate::utils::MonthPeriod;
use crate::variable_expenses::VariableExpense;

/// Everything `compute_summary` reads.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInput<'a> {
    pub period: MonthPeriod,
    pub today: NaiveDate,
    /// Incomes of `period`.
    pub incomes: &'a [Income],
    /// Incomes of the month containing `today`, used for the forecast.
    pub forecast_incomes: &'a [Income],
    pub fixed_expenses: &'a [FixedExpense],
    /// Variable expenses dated inside `period`.
    pub variable_expenses: &'a [VariableExpense],
    pub goals: &'a [Goal],
    /// Target used when `goals` add up to zero.
    pub monthly_goal_fallback: Decimal,
}

pub fn compute_summary(input: &SummaryInput<'_>) -> FinancialSummary {
    let period = input.period;
    let total_incomes = total(input.incomes.iter().map(|i| i.amount));
    let (paid_fixed_expenses, unpaid_fixed_expenses) = split_fixed(input.fixed_expenses);
    let total_variable_expenses = total(input.variable_expenses.iter().map(|e| e.amount));
    let total_fixed_expenses = paid_fixed_expenses.saturating_add(unpaid_fixed_expenses);

    let savings = total_incomes
        .saturating_sub(paid_fixed_expenses)
        .saturating_sub(total_variable_expenses);
    let available_balance = savings;
    let variable_limit = available_balance.saturating_sub(unpaid_fixed_expenses);

    let goals_total = total(input.goals.iter().map(|g| g.monthly_goal));
    let monthly_goal = if goals_total.is_zero() {
        input.monthly_goal_fallback
    } else {
        goals_total
    };
    let savings_progress = if monthly_goal <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        percentage(savings, monthly_goal).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    };

    let is_current_month = period == MonthPeriod::of_date(input.today);
    let days_in_month = period.days_in_month();
    let remaining_days_in_month = if is_current_month {
        days_in_month.saturating_sub(input.today.day())
    } else {
        0
    };
    let daily_spending_limit = if remaining_days_in_month > 0 {
        divide(variable_limit, Decimal::from(remaining_days_in_month))
    } else {
        Decimal::ZERO
    };

    let elapsed = days_elapsed(&period, input.today);
    let projected_savings = if elapsed > 0 {
        savings
            .checked_div(Decimal::from(elapsed))
            .and_then(|per_day| per_day.checked_mul(Decimal::from(days_in_month)))
            .map(round_for_display)
            .unwrap_or(savings)
    } else {
        savings
    };

    FinancialSummary {
        period,
        is_current_month,
        total_incomes,
        paid_fixed_expenses,
        unpaid_fixed_expenses,
        total_fixed_expenses,
        total_variable_expenses,
        savings,
        available_balance,
        variable_limit,
        monthly_goal,
        savings_progress,
        savings_rate: percentage(savings, total_incomes),
        fixed_expenses_ratio: percentage(total_fixed_expenses, total_incomes),
        remaining_days_in_month,
        daily_spending_limit,
        projected_savings,
        next_payment: forecast_next_payment(input.forecast_incomes, &period, input.today),
    }
}

/// Days of `period` already lived through as of `today`.
pub fn days_elapsed(period: &MonthPeriod, today: NaiveDate) -> u32 {
    let current = MonthPeriod::of_date(today);
    if *period == current {
        today.day()
    } else if *period < current {
        period.days_in_month()
    } else {
        0
    }
}

/// Picks the next fixed income among those of the month containing `today`.
///
/// Days are clamped to the length of `period`. When `period` is the current
/// month the first day after today wins; once every day has passed, the
/// earliest one is reported with `occurs_next_month` set. For any other
/// period the earliest day is returned.
pub fn forecast_next_payment(
    forecast_incomes: &[Income],
    period: &MonthPeriod,
    today: NaiveDate,
) -> Option<NextPayment> {
    let current = MonthPeriod::of_date(today);
    let mut candidates: Vec<(u32, Decimal)> = forecast_incomes
        .iter()
        .filter(|i| i.month == current.month() && i.year == current.year())
        .filter_map(|i| i.fixed_day().map(|day| (period.clamp_day(day), i.amount)))
        .collect();
    candidates.sort_by_key(|(day, _)| *day);

    let &(first_day, first_amount) = candidates.first()?;
    if *period != current {
        return Some(NextPayment {
            day: first_day,
            amount: first_amount,
            occurs_next_month: false,
        });
    }

    Some(
        match candidates.iter().find(|(day, _)| *day > today.day()) {
            Some(&(day, amount)) => NextPayment {
                day,
                amount,
                occurs_next_month: false,
            },
            None => NextPayment {
                day: first_day,
                amount: first_amount,
                occurs_next_month: true,
            },
        },
    )
}

/// Paid fixed expenses plus the period's variable expenses, per category,
/// largest total first. Ties keep the category declaration order.
pub fn expenses_by_category(
    fixed_expenses: &[FixedExpense],
    variable_expenses: &[VariableExpense],
) -> Vec<CategoryBreakdown> {
    let mut grouped: BTreeMap<ExpenseCategory, (Decimal, Decimal)> = BTreeMap::new();
    for expense in fixed_expenses.iter().filter(|e| e.is_paid()) {
        let entry = grouped.entry(expense.category).or_default();
        entry.0 = entry.0.saturating_add(expense.amount);
    }
    for expense in variable_expenses {
        let entry = grouped.entry(expense.category).or_default();
        entry.1 = entry.1.saturating_add(expense.amount);
    }

    let mut breakdown: Vec<CategoryBreakdown> = grouped
        .into_iter()
        .map(|(category, (fixed, variable))| CategoryBreakdown {
            category,
            label: category.label().to_string(),
            fixed,
            variable,
            total: fixed.saturating_add(variable),
        })
        .filter(|b| !b.total.is_zero())
        .collect();
    breakdown.sort_by(|a, b| b.total.cmp(&a.total));
    breakdown
}

pub fn month_totals(
    incomes: &[Income],
    fixed_expenses: &[FixedExpense],
    variable_expenses: &[VariableExpense],
) -> MonthTotals {
    let incomes = total(incomes.iter().map(|i| i.amount));
    let (fixed_expenses, _) = split_fixed(fixed_expenses);
    let variable_expenses = total(variable_expenses.iter().map(|e| e.amount));
    MonthTotals {
        incomes,
        fixed_expenses,
        variable_expenses,
        savings: incomes
            .saturating_sub(fixed_expenses)
            .saturating_sub(variable_expenses),
    }
}

pub fn compare_months(
    current_period: MonthPeriod,
    current: MonthTotals,
    previous: MonthTotals,
) -> MonthlyComparison {
    let variable_expenses_variation =
        variation(current.variable_expenses, previous.variable_expenses);
    MonthlyComparison {
        current_period,
        previous_period: current_period.previous(),
        has_previous_month: previous.has_activity(),
        current,
        previous,
        variable_expenses_variation,
    }
}

/// Change from `previous` to `current`. Growth from nothing counts as 100%.
pub fn variation(current: Decimal, previous: Decimal) -> Variation {
    let absolute = current.saturating_sub(previous);
    let percentage = if previous > Decimal::ZERO {
        percentage(absolute, previous)
    } else if current > Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    Variation {
        absolute,
        percentage,
    }
}

fn split_fixed(fixed_expenses: &[FixedExpense]) -> (Decimal, Decimal) {
    fixed_expenses
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(paid, unpaid), e| {
            if e.is_paid() {
                (paid.saturating_add(e.amount), unpaid)
            } else {
                (paid, unpaid.saturating_add(e.amount))
            }
        })
}

fn total(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part / whole * 100` at display precision, zero when `whole` is zero.
fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_for_display)
        .unwrap_or(Decimal::ZERO)
}

fn divide(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .map(round_for_display)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MONTHLY_GOAL;
    use crate::fixed_expenses::PaymentStatus;
    use crate::incomes::IncomeSchedule;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn fixed_income(day: u32, amount: Decimal, month: u32, year: i32) -> Income {
        Income {
            id: format!("inc-{}", day),
            user_id: "u1".to_string(),
            schedule: IncomeSchedule::Fixed { day_of_month: day },
            amount,
            month,
            year,
            created_at: instant(year, month, 1),
        }
    }

    fn fixed_expense(amount: Decimal, status: PaymentStatus, category: ExpenseCategory) -> FixedExpense {
        FixedExpense {
            id: "fx".to_string(),
            user_id: "u1".to_string(),
            name: "Bill".to_string(),
            amount,
            category,
            status,
            suggested_payment_day: 1,
            created_at: instant(2024, 1, 1),
            updated_at: instant(2024, 1, 1),
        }
    }

    fn variable_expense(amount: Decimal, category: ExpenseCategory) -> VariableExpense {
        VariableExpense {
            id: "vx".to_string(),
            user_id: "u1".to_string(),
            amount,
            category,
            description: "Lunch".to_string(),
            date: instant(2024, 6, 10),
            created_at: instant(2024, 6, 10),
        }
    }

    fn goal(monthly_goal: Decimal) -> Goal {
        Goal {
            id: "g".to_string(),
            user_id: "u1".to_string(),
            name: "Goal".to_string(),
            description: None,
            monthly_goal,
            saved_amount: Decimal::ZERO,
            month: 6,
            year: 2024,
            created_at: instant(2024, 6, 1),
            updated_at: instant(2024, 6, 1),
        }
    }

    struct Fixture {
        incomes: Vec<Income>,
        fixed: Vec<FixedExpense>,
        variable: Vec<VariableExpense>,
        goals: Vec<Goal>,
    }

    impl Fixture {
        fn scenario_a() -> Self {
            Fixture {
                incomes: vec![fixed_income(5, dec!(3000), 6, 2024)],
                fixed: vec![
                    fixed_expense(dec!(1000), PaymentStatus::Paid, ExpenseCategory::Housing),
                    fixed_expense(dec!(500), PaymentStatus::Unpaid, ExpenseCategory::Health),
                ],
                variable: vec![variable_expense(dec!(200), ExpenseCategory::Food)],
                goals: vec![],
            }
        }

        fn summarize(&self, period: MonthPeriod, today: NaiveDate) -> FinancialSummary {
            compute_summary(&SummaryInput {
                period,
                today,
                incomes: &self.incomes,
                forecast_incomes: &self.incomes,
                fixed_expenses: &self.fixed,
                variable_expenses: &self.variable,
                goals: &self.goals,
                monthly_goal_fallback: DEFAULT_MONTHLY_GOAL,
            })
        }
    }

    fn june() -> MonthPeriod {
        MonthPeriod::new(6, 2024).unwrap()
    }

    #[test]
    fn test_scenario_a_totals() {
        let summary = Fixture::scenario_a().summarize(june(), date(2024, 6, 10));
        assert_eq!(summary.total_incomes, dec!(3000));
        assert_eq!(summary.paid_fixed_expenses, dec!(1000));
        assert_eq!(summary.unpaid_fixed_expenses, dec!(500));
        assert_eq!(summary.total_fixed_expenses, dec!(1500));
        assert_eq!(summary.total_variable_expenses, dec!(200));
        assert_eq!(summary.savings, dec!(1800));
        assert_eq!(summary.available_balance, dec!(1800));
        assert_eq!(summary.variable_limit, dec!(1300));
        assert_eq!(summary.savings_rate, dec!(60));
        assert_eq!(summary.fixed_expenses_ratio, dec!(50));
    }

    #[test]
    fn test_scenario_b_goal_fallback() {
        let summary = Fixture::scenario_a().summarize(june(), date(2024, 6, 10));
        assert_eq!(summary.monthly_goal, dec!(5000));
        assert_eq!(summary.savings_progress, dec!(36));
    }

    #[test]
    fn test_scenario_c_goals_are_summed() {
        let mut fixture = Fixture::scenario_a();
        fixture.goals = vec![goal(dec!(1000)), goal(dec!(2000))];
        let summary = fixture.summarize(june(), date(2024, 6, 10));
        assert_eq!(summary.monthly_goal, dec!(3000));
        assert_eq!(summary.savings_progress, dec!(60));
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut fixture = Fixture::scenario_a();
        fixture.goals = vec![goal(dec!(100))];
        assert_eq!(
            fixture.summarize(june(), date(2024, 6, 10)).savings_progress,
            dec!(100)
        );

        fixture.incomes.clear();
        let summary = fixture.summarize(june(), date(2024, 6, 10));
        assert!(summary.savings < Decimal::ZERO);
        assert_eq!(summary.savings_progress, Decimal::ZERO);
        assert_eq!(summary.savings_rate, Decimal::ZERO);
        assert_eq!(summary.fixed_expenses_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_days_and_projection_for_current_month() {
        let summary = Fixture::scenario_a().summarize(june(), date(2024, 6, 10));
        assert!(summary.is_current_month);
        assert_eq!(summary.remaining_days_in_month, 20);
        assert_eq!(summary.daily_spending_limit, dec!(65));
        assert_eq!(summary.projected_savings, dec!(5400));
    }

    #[test]
    fn test_days_and_projection_for_other_months() {
        let fixture = Fixture::scenario_a();
        let past = fixture.summarize(june(), date(2024, 8, 1));
        assert!(!past.is_current_month);
        assert_eq!(past.remaining_days_in_month, 0);
        assert_eq!(past.daily_spending_limit, Decimal::ZERO);
        assert_eq!(past.projected_savings, past.savings);

        let future = fixture.summarize(june(), date(2024, 5, 20));
        assert_eq!(future.remaining_days_in_month, 0);
        assert_eq!(future.projected_savings, future.savings);
    }

    #[test]
    fn test_last_day_of_month_has_no_remaining_days() {
        let summary = Fixture::scenario_a().summarize(june(), date(2024, 6, 30));
        assert_eq!(summary.remaining_days_in_month, 0);
        assert_eq!(summary.daily_spending_limit, Decimal::ZERO);
    }

    #[test]
    fn test_forecast_picks_next_day_after_today() {
        let incomes = vec![
            fixed_income(20, dec!(500), 6, 2024),
            fixed_income(5, dec!(3000), 6, 2024),
        ];
        let next = forecast_next_payment(&incomes, &june(), date(2024, 6, 10)).unwrap();
        assert_eq!(
            next,
            NextPayment {
                day: 20,
                amount: dec!(500),
                occurs_next_month: false
            }
        );
    }

    #[test]
    fn test_forecast_wraps_to_next_month() {
        let incomes = vec![
            fixed_income(20, dec!(500), 6, 2024),
            fixed_income(5, dec!(3000), 6, 2024),
        ];
        let next = forecast_next_payment(&incomes, &june(), date(2024, 6, 25)).unwrap();
        assert_eq!(next.day, 5);
        assert_eq!(next.amount, dec!(3000));
        assert!(next.occurs_next_month);

        // Paid today is not upcoming.
        let next = forecast_next_payment(&incomes, &june(), date(2024, 6, 20)).unwrap();
        assert!(next.occurs_next_month);
    }

    #[test]
    fn test_forecast_for_other_period_uses_earliest_clamped_day() {
        let incomes = vec![
            fixed_income(31, dec!(700), 6, 2024),
            fixed_income(15, dec!(300), 6, 2024),
        ];
        let feb = MonthPeriod::new(2, 2023).unwrap();
        let next = forecast_next_payment(&incomes, &feb, date(2024, 6, 1)).unwrap();
        assert_eq!((next.day, next.amount), (15, dec!(300)));
        assert!(!next.occurs_next_month);

        let only_last = vec![fixed_income(31, dec!(700), 6, 2024)];
        let next = forecast_next_payment(&only_last, &feb, date(2024, 6, 1)).unwrap();
        assert_eq!(next.day, 28);
    }

    #[test]
    fn test_forecast_ignores_one_time_and_other_months() {
        let incomes = vec![
            Income {
                schedule: IncomeSchedule::OneTime {
                    payment_date: instant(2024, 6, 28),
                },
                ..fixed_income(1, dec!(10), 6, 2024)
            },
            fixed_income(12, dec!(10), 5, 2024),
        ];
        assert!(forecast_next_payment(&incomes, &june(), date(2024, 6, 1)).is_none());
    }

    #[test]
    fn test_expenses_by_category_union_of_paid_and_variable() {
        let fixed = vec![
            fixed_expense(dec!(1000), PaymentStatus::Paid, ExpenseCategory::Housing),
            fixed_expense(dec!(300), PaymentStatus::Unpaid, ExpenseCategory::Education),
            fixed_expense(dec!(50), PaymentStatus::Paid, ExpenseCategory::Food),
        ];
        let variable = vec![
            variable_expense(dec!(120), ExpenseCategory::Food),
            variable_expense(dec!(40), ExpenseCategory::Leisure),
        ];
        let breakdown = expenses_by_category(&fixed, &variable);
        let categories: Vec<ExpenseCategory> = breakdown.iter().map(|b| b.category).collect();
        assert_eq!(
            categories,
            vec![
                ExpenseCategory::Housing,
                ExpenseCategory::Food,
                ExpenseCategory::Leisure
            ]
        );
        assert_eq!(breakdown[1].fixed, dec!(50));
        assert_eq!(breakdown[1].variable, dec!(120));
        assert_eq!(breakdown[1].total, dec!(170));
        assert!(expenses_by_category(&[], &[]).is_empty());
    }

    #[test]
    fn test_scenario_d_empty_previous_month() {
        let current = month_totals(
            &[fixed_income(5, dec!(3000), 6, 2024)],
            &[],
            &[variable_expense(dec!(100), ExpenseCategory::Food)],
        );
        let comparison = compare_months(june(), current, MonthTotals::default());
        assert!(!comparison.has_previous_month);
        assert_eq!(comparison.previous_period, MonthPeriod::new(5, 2024).unwrap());
        assert_eq!(comparison.current.savings, dec!(2900));
    }

    #[test]
    fn test_scenario_e_variation() {
        let v = variation(dec!(150), dec!(100));
        assert_eq!(v.percentage, dec!(50));
        assert_eq!(v.absolute, dec!(50));

        let v = variation(dec!(80), Decimal::ZERO);
        assert_eq!(v.percentage, dec!(100));
        assert_eq!(v.absolute, dec!(80));

        let v = variation(Decimal::ZERO, Decimal::ZERO);
        assert_eq!(v.percentage, Decimal::ZERO);

        let v = variation(dec!(50), dec!(200));
        assert_eq!(v.percentage, dec!(-75));
        assert_eq!(v.absolute, dec!(-150));
    }

    #[test]
    fn test_comparison_rolls_back_across_january() {
        let jan = MonthPeriod::new(1, 2025).unwrap();
        let comparison = compare_months(jan, MonthTotals::default(), MonthTotals::default());
        assert_eq!(
            (comparison.previous_period.month(), comparison.previous_period.year()),
            (12, 2024)
        );
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_panicking() {
        let huge = Decimal::MAX - dec!(1);
        let mut fixture = Fixture::scenario_a();
        fixture.incomes = vec![
            fixed_income(5, huge, 6, 2024),
            fixed_income(20, huge, 6, 2024),
        ];
        fixture.fixed = vec![
            fixed_expense(huge, PaymentStatus::Paid, ExpenseCategory::Housing),
            fixed_expense(huge, PaymentStatus::Paid, ExpenseCategory::Housing),
        ];
        fixture.variable = vec![
            variable_expense(huge, ExpenseCategory::Housing),
            variable_expense(huge, ExpenseCategory::Food),
        ];
        fixture.goals = vec![goal(huge), goal(huge)];

        let summary = fixture.summarize(june(), date(2024, 6, 10));
        assert_eq!(summary.total_incomes, Decimal::MAX);
        assert_eq!(summary.paid_fixed_expenses, Decimal::MAX);
        assert_eq!(summary.monthly_goal, Decimal::MAX);
        assert!(summary.savings_progress >= Decimal::ZERO);
        assert!(summary.savings_progress <= Decimal::ONE_HUNDRED);

        let breakdown = expenses_by_category(&fixture.fixed, &fixture.variable);
        assert_eq!(breakdown[0].category, ExpenseCategory::Housing);
        assert_eq!(breakdown[0].total, Decimal::MAX);

        let totals = month_totals(&fixture.incomes, &fixture.fixed, &fixture.variable);
        let v = variation(Decimal::MIN, Decimal::MAX);
        assert_eq!(v.absolute, Decimal::MIN);
        assert_eq!(totals.incomes, Decimal::MAX);
    }

    #[test]
    fn test_summary_serializes_camel_case_numbers() {
        let summary = Fixture::scenario_a().summarize(june(), date(2024, 6, 10));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalIncomes"], serde_json::json!(3000.0));
        assert_eq!(json["period"]["month"], 6);
        assert_eq!(json["nextPayment"]["occursNextMonth"], true);
    }
}
