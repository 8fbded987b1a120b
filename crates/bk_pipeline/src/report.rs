//! Financial reporting over the recap ledger.
//!
//! revenue = sold × selling price, cost of goods = production × cost price,
//! profit = revenue − cost of goods. Prices are read from the current catalog.

use bk_core::rounding::percent;
use bk_core::{DailyRecap, Money, Product, ProductId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BakeryCtx, PipelineError};

pub const TOP_PRODUCTS: usize = 5;

/// Inclusive date range with an optional single-product filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub product: Option<ProductId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub product_id: ProductId,
    pub product_name: String,
    pub production_qty: u32,
    pub sold_qty: i64,
    pub leftover_qty: u32,
    pub leftover_pct: f64,
    pub revenue: Money,
    pub cost_of_goods: Money,
    pub profit: Money,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_revenue: Money,
    pub total_cost_of_goods: Money,
    pub total_profit: Money,
    pub total_production: i64,
    pub total_sold: i64,
    pub sell_through_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub revenue: Money,
    pub cost_of_goods: Money,
    pub profit: Money,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_id: ProductId,
    pub product_name: String,
    pub sold_qty: i64,
    pub revenue: Money,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub summary: ReportSummary,
    pub rows: Vec<ReportRow>,
    pub daily_trend: Vec<TrendPoint>,
    pub top_products: Vec<TopProduct>,
}

fn overflow(what: &str, date: NaiveDate) -> PipelineError {
    PipelineError::Validate(format!("{what} on {date} exceeds the i64 money range"))
}

/// `acc += v`, or a validation error naming the figure that overflowed.
fn accumulate(acc: &mut i64, v: i64, what: &str, date: NaiveDate) -> Result<(), PipelineError> {
    *acc = acc.checked_add(v).ok_or_else(|| overflow(what, date))?;
    Ok(())
}

fn report_row(recap: &DailyRecap, product: &Product) -> Result<ReportRow, PipelineError> {
    let date = recap.date;
    let revenue = recap
        .sold_qty
        .checked_mul(product.selling_price)
        .ok_or_else(|| overflow("revenue", date))?;
    let cost_of_goods = i64::from(recap.production_qty)
        .checked_mul(product.cost_price)
        .ok_or_else(|| overflow("cost of goods", date))?;
    let profit = revenue.checked_sub(cost_of_goods).ok_or_else(|| overflow("profit", date))?;
    Ok(ReportRow {
        date,
        product_id: recap.product_id.clone(),
        product_name: product.name.clone(),
        production_qty: recap.production_qty,
        sold_qty: recap.sold_qty,
        leftover_qty: recap.leftover_qty,
        leftover_pct: percent(f64::from(recap.leftover_qty), f64::from(recap.production_qty)),
        revenue,
        cost_of_goods,
        profit,
    })
}

/// Detail rows, totals, per-day trend and best sellers for a date range.
///
/// Money figures that leave the `i64` range fail with `PipelineError::Validate`.
pub fn financial_report(ctx: &BakeryCtx, query: &ReportQuery) -> Result<FinancialReport, PipelineError> {
    let mut rows: Vec<ReportRow> = ctx
        .ledger
        .between(query.from, query.to)
        .into_iter()
        .filter(|r| query.product.as_ref().map_or(true, |id| &r.product_id == id))
        .filter_map(|r| ctx.catalog.get(&r.product_id).map(|p| report_row(r, p)))
        .collect::<Result<Vec<_>, PipelineError>>()?;
    // ledger order is (date, id); stable re-sort to (date, name)
    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.product_name.cmp(&b.product_name)));

    let mut summary = ReportSummary::default();
    for r in &rows {
        accumulate(&mut summary.total_revenue, r.revenue, "total revenue", r.date)?;
        accumulate(&mut summary.total_cost_of_goods, r.cost_of_goods, "total cost of goods", r.date)?;
        accumulate(&mut summary.total_profit, r.profit, "total profit", r.date)?;
        accumulate(&mut summary.total_production, i64::from(r.production_qty), "total production", r.date)?;
        accumulate(&mut summary.total_sold, r.sold_qty, "total sold", r.date)?;
    }
    summary.sell_through_pct = percent(summary.total_sold as f64, summary.total_production as f64);

    let mut daily_trend: Vec<TrendPoint> = Vec::new();
    for r in &rows {
        match daily_trend.last_mut() {
            Some(t) if t.date == r.date => {
                accumulate(&mut t.revenue, r.revenue, "daily revenue", r.date)?;
                accumulate(&mut t.cost_of_goods, r.cost_of_goods, "daily cost of goods", r.date)?;
                accumulate(&mut t.profit, r.profit, "daily profit", r.date)?;
            }
            _ => daily_trend.push(TrendPoint {
                date: r.date,
                revenue: r.revenue,
                cost_of_goods: r.cost_of_goods,
                profit: r.profit,
            }),
        }
    }

    let mut top_products: Vec<TopProduct> = Vec::new();
    for r in &rows {
        match top_products.iter_mut().find(|t| t.product_id == r.product_id) {
            Some(t) => {
                accumulate(&mut t.sold_qty, r.sold_qty, "product sold", r.date)?;
                accumulate(&mut t.revenue, r.revenue, "product revenue", r.date)?;
            }
            None => top_products.push(TopProduct {
                product_id: r.product_id.clone(),
                product_name: r.product_name.clone(),
                sold_qty: r.sold_qty,
                revenue: r.revenue,
            }),
        }
    }
    top_products.sort_by(|a, b| b.sold_qty.cmp(&a.sold_qty));
    top_products.truncate(TOP_PRODUCTS);

    tracing::debug!(
        from = %query.from,
        to = %query.to,
        rows = rows.len(),
        "financial report built"
    );

    Ok(FinancialReport { summary, rows, daily_trend, top_products })
}

/// Headline numbers for one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub date: NaiveDate,
    /// Σ margin × sold over the day's rows.
    pub total_profit: Money,
    /// `"-"` when the day has no rows.
    pub best_seller_name: String,
    pub best_seller_qty: i64,
}

pub fn dashboard_stats(ctx: &BakeryCtx, date: NaiveDate) -> Result<DashboardStats, PipelineError> {
    let day: Vec<(&DailyRecap, &Product)> = ctx
        .ledger
        .on(date)
        .into_iter()
        .filter_map(|r| ctx.catalog.get(&r.product_id).map(|p| (r, p)))
        .collect();

    let mut total_profit: Money = 0;
    for (r, p) in &day {
        let profit = p.margin().checked_mul(r.sold_qty).ok_or_else(|| overflow("profit", date))?;
        accumulate(&mut total_profit, profit, "total profit", date)?;
    }

    // first row wins on equal sold quantities
    let best = day.iter().fold(None::<&(&DailyRecap, &Product)>, |best, cur| match best {
        Some(b) if cur.0.sold_qty <= b.0.sold_qty => Some(b),
        _ => Some(cur),
    });

    Ok(DashboardStats {
        date,
        total_profit,
        best_seller_name: best.map_or_else(|| "-".to_string(), |(_, p)| p.name.clone()),
        best_seller_qty: best.map_or(0, |(r, _)| r.sold_qty),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;
    use bk_core::RecapEntry;

    fn pid(s: &str) -> ProductId {
        s.parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn ctx() -> BakeryCtx {
        let mut ctx = BakeryCtx::default();
        for (id, name, sell, cost) in [("z", "Bolu", 20_000, 8_000), ("a", "Kue", 10_000, 4_000)] {
            ctx.catalog
                .insert(
                    pid(id),
                    ProductDraft {
                        name: name.into(),
                        selling_price: sell,
                        cost_price: cost,
                        shelf_life_hours: 24,
                        difficulty: 2,
                    },
                )
                .unwrap();
        }
        let mut rec = |d, id, made, left| {
            ctx.record_recap(day(d), RecapEntry { product_id: pid(id), production_qty: made, leftover_qty: left })
                .unwrap();
        };
        rec(1, "a", 10, 2);
        rec(1, "z", 5, 1);
        rec(2, "a", 4, 0);
        rec(3, "z", 0, 0);
        ctx
    }

    fn all_days() -> ReportQuery {
        ReportQuery { from: day(1), to: day(3), product: None }
    }

    #[test]
    fn detail_rows_are_date_then_name_ordered() {
        let rep = financial_report(&ctx(), &all_days()).unwrap();
        let order: Vec<_> = rep.rows.iter().map(|r| (r.date, r.product_name.as_str())).collect();
        assert_eq!(order, vec![(day(1), "Bolu"), (day(1), "Kue"), (day(2), "Kue"), (day(3), "Bolu")]);

        let kue = &rep.rows[1];
        assert_eq!(kue.revenue, 80_000);
        assert_eq!(kue.cost_of_goods, 40_000);
        assert_eq!(kue.profit, 40_000);
        assert_eq!(kue.leftover_pct, 20.0);
        assert_eq!(rep.rows[3].leftover_pct, 0.0);
    }

    #[test]
    fn summary_and_trend() {
        let rep = financial_report(&ctx(), &all_days()).unwrap();
        // Bolu d1: 4*20000 - 5*8000 = 40000 ; Kue d1: 40000 ; Kue d2: 40000 - 16000 = 24000
        assert_eq!(rep.summary.total_revenue, 80_000 + 80_000 + 40_000);
        assert_eq!(rep.summary.total_profit, 40_000 + 40_000 + 24_000);
        assert_eq!(rep.summary.total_production, 19);
        assert_eq!(rep.summary.total_sold, 16);
        assert!((rep.summary.sell_through_pct - 16.0 / 19.0 * 100.0).abs() < 1e-9);

        let trend: Vec<_> = rep.daily_trend.iter().map(|t| (t.date, t.profit)).collect();
        assert_eq!(trend, vec![(day(1), 80_000), (day(2), 24_000), (day(3), 0)]);
    }

    #[test]
    fn top_products_by_sold() {
        let rep = financial_report(&ctx(), &all_days()).unwrap();
        assert_eq!(rep.top_products[0].product_name, "Kue");
        assert_eq!(rep.top_products[0].sold_qty, 12);
        assert_eq!(rep.top_products[1].sold_qty, 4);
    }

    #[test]
    fn product_filter_and_empty_range() {
        let c = ctx();
        let rep = financial_report(&c, &ReportQuery { product: Some(pid("z")), ..all_days() }).unwrap();
        assert!(rep.rows.iter().all(|r| r.product_id.as_str() == "z"));
        assert_eq!(rep.rows.len(), 2);

        let empty = financial_report(&c, &ReportQuery { from: day(20), to: day(25), product: None }).unwrap();
        assert!(empty.rows.is_empty());
        assert_eq!(empty.summary.sell_through_pct, 0.0);
        assert!(empty.top_products.is_empty());
    }

    #[test]
    fn dashboard_for_a_day() {
        let c = ctx();
        let s = dashboard_stats(&c, day(1)).unwrap();
        // Kue: 6000 * 8 ; Bolu: 12000 * 4
        assert_eq!(s.total_profit, 48_000 + 48_000);
        assert_eq!(s.best_seller_name, "Kue");
        assert_eq!(s.best_seller_qty, 8);

        let none = dashboard_stats(&c, day(9)).unwrap();
        assert_eq!(none.total_profit, 0);
        assert_eq!(none.best_seller_name, "-");
        assert_eq!(none.best_seller_qty, 0);
    }

    #[test]
    fn dashboard_ties_keep_first_row() {
        let mut c = ctx();
        c.record_recap(day(5), RecapEntry { product_id: pid("a"), production_qty: 3, leftover_qty: 0 })
            .unwrap();
        c.record_recap(day(5), RecapEntry { product_id: pid("z"), production_qty: 3, leftover_qty: 0 })
            .unwrap();
        // ledger order within a day is by product id
        assert_eq!(dashboard_stats(&c, day(5)).unwrap().best_seller_name, "Kue");
    }

    #[test]
    fn money_overflow_is_a_validation_error() {
        let mut c = BakeryCtx::default();
        c.catalog
            .insert(
                pid("gold"),
                ProductDraft {
                    name: "Gold Cake".into(),
                    selling_price: 5_000_000_000_000,
                    cost_price: 0,
                    shelf_life_hours: 24,
                    difficulty: 1,
                },
            )
            .unwrap();
        c.record_recap(day(1), RecapEntry { product_id: pid("gold"), production_qty: 4_000_000, leftover_qty: 0 })
            .unwrap();

        assert!(matches!(dashboard_stats(&c, day(1)), Err(PipelineError::Validate(_))));
        let err = financial_report(&c, &all_days()).unwrap_err();
        assert!(matches!(err, PipelineError::Validate(ref m) if m.contains("revenue")));
    }

    #[test]
    fn totals_that_overflow_are_rejected() {
        let mut c = BakeryCtx::default();
        // each row fits; their sum does not
        for id in ["p1", "p2"] {
            c.catalog
                .insert(
                    pid(id),
                    ProductDraft {
                        name: id.into(),
                        selling_price: i64::MAX / 2,
                        cost_price: 0,
                        shelf_life_hours: 24,
                        difficulty: 1,
                    },
                )
                .unwrap();
            c.record_recap(day(1), RecapEntry { product_id: pid(id), production_qty: 2, leftover_qty: 0 })
                .unwrap();
        }
        assert!(matches!(financial_report(&c, &all_days()), Err(PipelineError::Validate(_))));
        assert!(matches!(dashboard_stats(&c, day(1)), Err(PipelineError::Validate(_))));
    }
}
