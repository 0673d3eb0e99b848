//! Rental price computation.
//!
//! Prices are computed from a [`PriceSheet`], the pricing columns of a car. Rental
//! length is counted in started days. Period prices (monthly, bi-weekly, weekly) are
//! consumed greedily from the longest period down, the rest is billed per day. A car
//! priced by date ranges bills every day at the rate of the first range containing
//! it instead.

use chrono::{DateTime, Duration, Utc};

use crate::server::model::{
    booking::BookingOptions,
    car::{Car, DateBasedPrice},
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Pricing columns of a car.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSheet {
    pub daily_price: f64,
    pub discounted_daily_price: Option<f64>,
    pub bi_weekly_price: Option<f64>,
    pub discounted_bi_weekly_price: Option<f64>,
    pub weekly_price: Option<f64>,
    pub discounted_weekly_price: Option<f64>,
    pub monthly_price: Option<f64>,
    pub discounted_monthly_price: Option<f64>,
    pub cancellation: f64,
    pub amendments: f64,
    pub theft_protection: f64,
    pub collision_damage_waiver: f64,
    pub full_insurance: f64,
    pub additional_driver: f64,
    /// Empty unless the car is priced by date ranges.
    pub date_based_prices: Vec<DateBasedPrice>,
}

impl PriceSheet {
    /// A sheet with only a daily price and no options on offer.
    pub fn daily(daily_price: f64) -> Self {
        Self {
            daily_price,
            discounted_daily_price: None,
            bi_weekly_price: None,
            discounted_bi_weekly_price: None,
            weekly_price: None,
            discounted_weekly_price: None,
            monthly_price: None,
            discounted_monthly_price: None,
            cancellation: -1.0,
            amendments: -1.0,
            theft_protection: -1.0,
            collision_damage_waiver: -1.0,
            full_insurance: -1.0,
            additional_driver: -1.0,
            date_based_prices: Vec::new(),
        }
    }

    pub fn from_car(car: &Car) -> Self {
        Self {
            daily_price: car.daily_price,
            discounted_daily_price: car.discounted_daily_price,
            bi_weekly_price: car.bi_weekly_price,
            discounted_bi_weekly_price: car.discounted_bi_weekly_price,
            weekly_price: car.weekly_price,
            discounted_weekly_price: car.discounted_weekly_price,
            monthly_price: car.monthly_price,
            discounted_monthly_price: car.discounted_monthly_price,
            cancellation: car.cancellation,
            amendments: car.amendments,
            theft_protection: car.theft_protection,
            collision_damage_waiver: car.collision_damage_waiver,
            full_insurance: car.full_insurance,
            additional_driver: car.additional_driver,
            date_based_prices: if car.is_date_based_price {
                car.date_based_prices.clone()
            } else {
                Vec::new()
            },
        }
    }

    fn daily_rate(&self) -> f64 {
        effective(Some(self.daily_price), self.discounted_daily_price).unwrap_or(self.daily_price)
    }
}

/// A discounted price replaces the regular one when set.
fn effective(regular: Option<f64>, discounted: Option<f64>) -> Option<f64> {
    discounted.or(regular)
}

/// Number of started days between two instants; zero unless `to` is after `from`.
pub fn days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let seconds = (to - from).num_seconds();
    if seconds <= 0 {
        return 0;
    }

    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

/// Total price of a rental, options and supplier rate change included.
///
/// # Arguments
/// - `sheet` - Pricing columns of the car
/// - `from`, `to` - Rental period
/// - `options` - Options selected by the driver
/// - `price_change_rate` - Supplier percentage applied last, e.g. `10.0` for +10%
pub fn total_price(
    sheet: &PriceSheet,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    options: &BookingOptions,
    price_change_rate: Option<f64>,
) -> f64 {
    let days = days(from, to);

    let mut price = if sheet.date_based_prices.is_empty() {
        period_price(sheet, days)
    } else {
        date_based_price(sheet, from, days)
    };

    price += option_price(sheet, options, days);

    if let Some(rate) = price_change_rate {
        price *= 1.0 + rate / 100.0;
    }

    round_cents(price)
}

fn period_price(sheet: &PriceSheet, days: i64) -> f64 {
    let periods = [
        (
            30,
            effective(sheet.monthly_price, sheet.discounted_monthly_price),
        ),
        (
            14,
            effective(sheet.bi_weekly_price, sheet.discounted_bi_weekly_price),
        ),
        (
            7,
            effective(sheet.weekly_price, sheet.discounted_weekly_price),
        ),
    ];

    let mut remaining = days;
    let mut price = 0.0;

    for (length, rate) in periods {
        if let Some(rate) = rate {
            let blocks = remaining / length;
            price += blocks as f64 * rate;
            remaining -= blocks * length;
        }
    }

    price + remaining as f64 * sheet.daily_rate()
}

fn date_based_price(sheet: &PriceSheet, from: DateTime<Utc>, days: i64) -> f64 {
    let first_day = from.date_naive();

    (0..days)
        .map(|offset| {
            let day = first_day + Duration::days(offset);
            sheet
                .date_based_prices
                .iter()
                .find(|range| range.contains(day))
                .map(|range| range.daily_price)
                .unwrap_or_else(|| sheet.daily_rate())
        })
        .sum()
}

fn option_price(sheet: &PriceSheet, options: &BookingOptions, days: i64) -> f64 {
    let flat = |selected: bool, price: f64| if selected && price > 0.0 { price } else { 0.0 };
    let per_day = |selected: bool, price: f64| flat(selected, price) * days as f64;

    flat(options.cancellation, sheet.cancellation)
        + flat(options.amendments, sheet.amendments)
        + per_day(options.theft_protection, sheet.theft_protection)
        + per_day(
            options.collision_damage_waiver,
            sheet.collision_damage_waiver,
        )
        + per_day(options.full_insurance, sheet.full_insurance)
        + per_day(options.additional_driver, sheet.additional_driver)
}

/// Amount charged up front when the driver only pays the deposit.
pub fn deposit_amount(car: &Car, price_change_rate: Option<f64>) -> f64 {
    let deposit = match price_change_rate {
        Some(rate) => car.deposit * (1.0 + rate / 100.0),
        None => car.deposit,
    };

    round_cents(deposit)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 7, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn counts_started_days() {
        assert_eq!(days(at(1, 10), at(3, 10)), 2);
        assert_eq!(days(at(1, 10), at(3, 11)), 3);
        assert_eq!(days(at(1, 10), at(1, 11)), 1);
        assert_eq!(days(at(3, 10), at(1, 10)), 0);
        assert_eq!(days(at(1, 10), at(1, 10)), 0);
    }

    #[test]
    fn bills_daily_price_without_periods() {
        let sheet = PriceSheet::daily(40.0);

        let price = total_price(&sheet, at(1, 9), at(4, 9), &BookingOptions::default(), None);

        assert_eq!(price, 120.0);
    }

    #[test]
    fn consumes_periods_greedily() {
        let sheet = PriceSheet {
            monthly_price: Some(900.0),
            bi_weekly_price: Some(500.0),
            weekly_price: Some(250.0),
            ..PriceSheet::daily(40.0)
        };

        // 30 + 14 + 7 + 2 days
        let from = at(1, 9);
        let to = from + Duration::days(53);
        let price = total_price(&sheet, from, to, &BookingOptions::default(), None);

        assert_eq!(price, 900.0 + 500.0 + 250.0 + 80.0);
    }

    #[test]
    fn skips_unset_periods() {
        let sheet = PriceSheet {
            weekly_price: Some(250.0),
            ..PriceSheet::daily(40.0)
        };

        // No bi-weekly price: 15 days are two weeks and a day
        let from = at(1, 9);
        let price = total_price(
            &sheet,
            from,
            from + Duration::days(15),
            &BookingOptions::default(),
            None,
        );

        assert_eq!(price, 540.0);
    }

    #[test]
    fn discounted_price_replaces_regular_price() {
        let sheet = PriceSheet {
            discounted_daily_price: Some(30.0),
            weekly_price: Some(250.0),
            discounted_weekly_price: Some(200.0),
            ..PriceSheet::daily(40.0)
        };

        let from = at(1, 9);
        let price = total_price(
            &sheet,
            from,
            from + Duration::days(8),
            &BookingOptions::default(),
            None,
        );

        assert_eq!(price, 230.0);
    }

    #[test]
    fn charges_selected_options_with_positive_price() {
        let sheet = PriceSheet {
            cancellation: 20.0,
            amendments: 0.0,
            theft_protection: 9.0,
            collision_damage_waiver: 12.0,
            full_insurance: -1.0,
            additional_driver: 5.0,
            ..PriceSheet::daily(40.0)
        };
        let options = BookingOptions {
            cancellation: true,
            amendments: true,
            theft_protection: true,
            collision_damage_waiver: false,
            full_insurance: true,
            additional_driver: true,
        };

        let price = total_price(&sheet, at(1, 9), at(3, 9), &options, None);

        // 2 days * 40 + cancellation 20 + 2 * (9 + 5)
        assert_eq!(price, 80.0 + 20.0 + 28.0);
    }

    #[test]
    fn applies_price_change_rate_last() {
        let sheet = PriceSheet {
            cancellation: 20.0,
            ..PriceSheet::daily(40.0)
        };
        let options = BookingOptions {
            cancellation: true,
            ..Default::default()
        };

        let price = total_price(&sheet, at(1, 9), at(3, 9), &options, Some(10.0));

        assert_eq!(price, 110.0);
    }

    #[test]
    fn prices_days_by_first_matching_range() {
        let sheet = PriceSheet {
            date_based_prices: vec![
                DateBasedPrice {
                    start_date: NaiveDate::from_ymd_opt(2030, 7, 2).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2030, 7, 3).unwrap(),
                    daily_price: 70.0,
                },
                DateBasedPrice {
                    start_date: NaiveDate::from_ymd_opt(2030, 7, 3).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2030, 7, 10).unwrap(),
                    daily_price: 90.0,
                },
            ],
            weekly_price: Some(10.0),
            ..PriceSheet::daily(40.0)
        };

        // July 1st at daily price, 2nd and 3rd from the first range, 4th from the second
        let price = total_price(&sheet, at(1, 9), at(5, 9), &BookingOptions::default(), None);

        assert_eq!(price, 40.0 + 70.0 + 70.0 + 90.0);
    }
}
