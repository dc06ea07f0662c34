//! # Rental Cost Calculator
//!
//! Computes what a client owes for a rental.
//!
//! ## Branches
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    get_rent_cost()                                      │
//! │                                                                         │
//! │  actual_return_date?                                                    │
//! │       │                                                                 │
//! │       ├── None ──────────► amount × (return − start) × price            │
//! │       │                                                                 │
//! │       ├── <= return_date ► amount × (actual − start) × price            │
//! │       │                                                                 │
//! │       └── > return_date ─► amount × (return − start) × price            │
//! │                            + extra × (amount × price + extra + 1)       │
//! │                                                                         │
//! │  cost <= 0 ──► RentCost::NotApplicable                                  │
//! │  cost outside i64 cents ──► RentCost::Overflow                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The late-return penalty grows with the square of the overdue days. Its
//! `extra + 1` term is charged in whole currency units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::dates::days_between;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Rent;

// =============================================================================
// Rent Cost
// =============================================================================

/// Result of a cost computation.
///
/// A non-positive cost is never reported as a number. Callers must match on
/// `NotApplicable` before billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "cents", rename_all = "snake_case")]
pub enum RentCost {
    /// A strictly positive amount owed.
    Amount(Money),
    /// The inputs produced a zero or negative cost.
    NotApplicable,
    /// The cost does not fit in i64 cents.
    Overflow,
}

impl RentCost {
    /// Wraps a raw cost, mapping non-positive values to `NotApplicable`.
    pub fn from_money(cost: Money) -> Self {
        if cost.is_positive() {
            RentCost::Amount(cost)
        } else {
            RentCost::NotApplicable
        }
    }

    /// Cost in cents, `None` unless it is an `Amount`. This is the stored form.
    pub fn cents(&self) -> Option<i64> {
        match self {
            RentCost::Amount(money) => Some(money.cents()),
            RentCost::NotApplicable | RentCost::Overflow => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, RentCost::Amount(_))
    }

    /// Rejects `Overflow`, so it is never billed or stored as `NULL`.
    pub fn representable(self) -> CoreResult<Self> {
        match self {
            RentCost::Overflow => Err(CoreError::CostOverflow),
            cost => Ok(cost),
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes the cost of a rental.
///
/// ## Arguments
/// * `amount` - Copies rented
/// * `start_date` - First day of the rental
/// * `return_date` - Contracted return date
/// * `actual_return_date` - Day the copies came back, `None` if still out
/// * `price_by_day` - Daily price per copy
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use cinerent_core::money::Money;
/// use cinerent_core::pricing::{get_rent_cost, RentCost};
///
/// let start = NaiveDate::from_ymd_opt(2050, 1, 1).unwrap();
/// let due = NaiveDate::from_ymd_opt(2050, 1, 2).unwrap();
/// let back = NaiveDate::from_ymd_opt(2050, 1, 5).unwrap();
///
/// // Three days late: 20.00 base + 72.00 penalty
/// let cost = get_rent_cost(2, start, due, Some(back), Money::from_cents(1000));
/// assert_eq!(cost, RentCost::Amount(Money::from_cents(9200)));
/// ```
pub fn get_rent_cost(
    amount: i64,
    start_date: NaiveDate,
    return_date: NaiveDate,
    actual_return_date: Option<NaiveDate>,
    price_by_day: Money,
) -> RentCost {
    let cost = match actual_return_date {
        None => {
            let days = days_between(return_date, start_date);
            theoretical_cost(amount, days, price_by_day)
        }
        Some(actual) => actual_cost(amount, start_date, return_date, actual, price_by_day),
    };

    let Some(cost) = cost else {
        warn!(
            amount,
            %start_date,
            %return_date,
            ?actual_return_date,
            %price_by_day,
            "Rent cost overflows"
        );
        return RentCost::Overflow;
    };

    let result = RentCost::from_money(cost);
    if !result.is_applicable() {
        debug!(
            amount,
            %start_date,
            %return_date,
            ?actual_return_date,
            %price_by_day,
            %cost,
            "Rent cost is not applicable"
        );
    }
    result
}

/// Cost of a persisted rent at the given daily price.
pub fn cost_of_rent(rent: &Rent, price_by_day: Money) -> RentCost {
    get_rent_cost(
        rent.amount,
        rent.start_date,
        rent.return_date,
        rent.actual_return_date,
        price_by_day,
    )
}

/// Cost without penalties: `amount × days × price_by_day`.
///
/// `None` when the product leaves the i64 range. The same holds for
/// [`extra_cost`] and [`actual_cost`].
#[inline]
pub fn theoretical_cost(amount: i64, days: i64, price_by_day: Money) -> Option<Money> {
    price_by_day.checked_mul(amount)?.checked_mul(days)
}

/// Penalty for overdue days: `extra × (amount × price + extra + 1)`.
///
/// The `extra + 1` term is in whole currency units.
#[inline]
pub fn extra_cost(amount: i64, extra_days: i64, price_by_day: Money) -> Option<Money> {
    let day_term = Money::checked_from_major(extra_days.checked_add(1)?)?;
    price_by_day
        .checked_mul(amount)?
        .checked_add(day_term)?
        .checked_mul(extra_days)
}

/// Cost of a rental whose copies are back.
///
/// On-time and early returns pay for the days actually held. Late returns
/// pay the contracted period plus [`extra_cost`] for the overdue days.
pub fn actual_cost(
    amount: i64,
    start_date: NaiveDate,
    return_date: NaiveDate,
    actual_return_date: NaiveDate,
    price_by_day: Money,
) -> Option<Money> {
    let normal_days = days_between(return_date, start_date);
    let actual_days = days_between(actual_return_date, start_date);

    if actual_return_date <= return_date {
        return theoretical_cost(amount, actual_days, price_by_day);
    }

    let extra_days = actual_days - normal_days;
    let base = theoretical_cost(amount, normal_days, price_by_day)?;
    let penalty = extra_cost(amount, extra_days, price_by_day)?;

    debug!(normal_days, actual_days, extra_days, %base, %penalty, "Late return");

    base.checked_add(penalty)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RentState;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ten() -> Money {
        Money::from_cents(1000)
    }

    #[test]
    fn test_not_returned_bills_contracted_days() {
        let cost = get_rent_cost(2, date(2050, 1, 1), date(2050, 1, 2), None, ten());
        assert_eq!(cost, RentCost::Amount(Money::from_cents(2000)));
    }

    #[test]
    fn test_late_return_adds_penalty() {
        let cost = get_rent_cost(
            2,
            date(2050, 1, 1),
            date(2050, 1, 2),
            Some(date(2050, 1, 5)),
            ten(),
        );
        assert_eq!(cost, RentCost::Amount(Money::from_cents(9200)));
    }

    #[test]
    fn test_actual_cost_matches_late_branch() {
        let cost = actual_cost(2, date(2050, 1, 1), date(2050, 1, 2), date(2050, 1, 5), ten());
        assert_eq!(cost, Some(Money::from_cents(9200)));
    }

    #[test]
    fn test_early_return_bills_days_held() {
        // Contracted 10 days, returned after 4
        let cost = get_rent_cost(
            3,
            date(2050, 1, 1),
            date(2050, 1, 11),
            Some(date(2050, 1, 5)),
            Money::from_cents(250),
        );
        assert_eq!(cost, RentCost::Amount(Money::from_cents(3 * 4 * 250)));
    }

    #[test]
    fn test_on_time_return_equals_contracted_cost() {
        let start = date(2050, 1, 1);
        let due = date(2050, 1, 8);
        let unreturned = get_rent_cost(1, start, due, None, ten());
        let on_time = get_rent_cost(1, start, due, Some(due), ten());
        assert_eq!(unreturned, on_time);
    }

    #[test]
    fn test_penalty_is_quadratic_in_extra_days() {
        let start = date(2050, 1, 1);
        let due = date(2050, 1, 3);
        let price = Money::from_cents(150);

        for extra in 1..=5i64 {
            let back = due + chrono::Duration::days(extra);
            let expected = 2 * 2 * 150 + extra * (2 * 150 + (extra + 1) * 100);
            let cost = get_rent_cost(2, start, due, Some(back), price);
            assert_eq!(cost, RentCost::Amount(Money::from_cents(expected)), "extra={extra}");
        }
    }

    #[test]
    fn test_zero_price_is_not_applicable() {
        let cost = get_rent_cost(2, date(2050, 1, 1), date(2050, 1, 5), None, Money::from_cents(0));
        assert_eq!(cost, RentCost::NotApplicable);
        assert_eq!(cost.cents(), None);
    }

    #[test]
    fn test_zero_days_and_zero_amount_are_not_applicable() {
        let day = date(2050, 1, 1);
        assert_eq!(get_rent_cost(2, day, day, None, ten()), RentCost::NotApplicable);
        assert_eq!(
            get_rent_cost(0, day, date(2050, 1, 4), None, ten()),
            RentCost::NotApplicable
        );
    }

    #[test]
    fn test_huge_price_overflows_without_panicking() {
        let huge = Money::from_cents(1_000_000_000_000_000);
        let cost = get_rent_cost(1000, date(2050, 1, 1), date(2050, 1, 16), None, huge);
        assert_eq!(cost, RentCost::Overflow);
        assert_eq!(cost.cents(), None);
        assert!(!cost.is_applicable());
        assert!(matches!(cost.representable(), Err(CoreError::CostOverflow)));
    }

    #[test]
    fn test_late_penalty_overflow_is_reported() {
        // 40 years late on a single copy still fits, a huge daily price does not
        let start = date(2050, 1, 1);
        let due = date(2050, 1, 2);
        let back = date(2090, 1, 2);
        assert!(get_rent_cost(1, start, due, Some(back), ten()).is_applicable());

        let price = Money::from_cents(i64::MAX / 4);
        assert_eq!(get_rent_cost(1, start, due, Some(back), price), RentCost::Overflow);
        assert_eq!(extra_cost(1, 8, price), None);
    }

    #[test]
    fn test_cost_of_rent_uses_rent_fields() {
        let now = Utc::now();
        let rent = Rent {
            id: "r1".to_string(),
            film_id: "f1".to_string(),
            client_id: "c1".to_string(),
            amount: 2,
            start_date: date(2050, 1, 1),
            return_date: date(2050, 1, 2),
            actual_return_date: Some(date(2050, 1, 5)),
            state: RentState::Close,
            cost_cents: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(cost_of_rent(&rent, ten()).cents(), Some(9200));
    }

    #[test]
    fn test_rent_cost_serialization() {
        let json = serde_json::to_string(&RentCost::Amount(Money::from_cents(2000))).unwrap();
        assert_eq!(json, r#"{"kind":"amount","cents":2000}"#);

        let json = serde_json::to_string(&RentCost::NotApplicable).unwrap();
        assert_eq!(json, r#"{"kind":"not_applicable"}"#);

        assert!(RentCost::NotApplicable.representable().is_ok());
    }
}
