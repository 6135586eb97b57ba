//! Valuation and classification of raw sheet rows.
//!
//! Each row is either a holding of a priced instrument ("삼성전자", 10
//! shares) or a direct currency amount (a bank balance, a loan). Which
//! interpretation applies is decided by the price table: a positive
//! resolved price makes the amount a quantity, anything else makes it
//! the monetary value itself. Negative values are debts.

use serde::{Deserialize, Serialize};

use super::normalize_amount;
use super::PriceTable;
use crate::models::RawRecord;

/// A valuation result tagged asset or debt by the sign of its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    pub name: String,
    /// Signed value in currency units. `>= 0` means asset, `< 0` debt.
    pub value: f64,
}

/// Output of one pipeline run: classified entries, input order preserved
/// within each list, and totals recomputed from scratch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub assets: Vec<ClassifiedEntry>,
    pub debts: Vec<ClassifiedEntry>,
    pub total_asset: f64,
    pub total_debt: f64,
}

impl Valuation {
    pub fn net_worth(&self) -> f64 {
        self.total_asset + self.total_debt
    }
}

/// Value and classify an ordered sequence of raw records against a price
/// snapshot.
///
/// For each record, in input order:
/// 1. the amount cell is coerced to a number ([`normalize_amount`]);
/// 2. the name is resolved against the table;
/// 3. a positive price values the record as `price * qty`, otherwise the
///    normalized amount is taken as the value directly;
/// 4. the sign of the value classifies it: `>= 0` asset, `< 0` debt.
///
/// Never fails: malformed cells contribute `0.0` and an unresolvable
/// record with an empty amount still shows up as a zero-valued asset
/// line rather than being dropped.
pub fn value_records(records: &[RawRecord], prices: &PriceTable) -> Valuation {
    let mut valuation = Valuation::default();

    for record in records {
        let qty = normalize_amount(&record.amount);
        let price = prices.resolve(&record.name);

        let value = if price > 0.0 { price * qty } else { qty };

        let entry = ClassifiedEntry {
            name: record.name.clone(),
            value,
        };
        if value >= 0.0 {
            valuation.total_asset += value;
            valuation.assets.push(entry);
        } else {
            valuation.total_debt += value;
            valuation.debts.push(entry);
        }
    }

    valuation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    fn table(entries: &[(&str, f64)]) -> PriceTable {
        entries.iter().map(|&(n, p)| (n, p)).collect()
    }

    #[test]
    fn priced_instruments_value_as_quantity_times_price() {
        let records = vec![
            RawRecord::new("삼성전자", "10"),
            RawRecord::new("현금통장", "-500000"),
        ];
        let prices = table(&[("삼성전자", 70000.0)]);

        let v = value_records(&records, &prices);

        assert_eq!(
            v.assets,
            vec![ClassifiedEntry {
                name: "삼성전자".to_string(),
                value: 700000.0
            }]
        );
        assert_eq!(
            v.debts,
            vec![ClassifiedEntry {
                name: "현금통장".to_string(),
                value: -500000.0
            }]
        );
        assert_eq!(v.total_asset, 700000.0);
        assert_eq!(v.total_debt, -500000.0);
        assert_eq!(v.net_worth(), 200000.0);
    }

    #[test]
    fn unpriced_records_are_direct_currency_values() {
        let records = vec![RawRecord::new("비상금", "1500")];
        let v = value_records(&records, &PriceTable::new());

        assert_eq!(v.assets[0].value, 1500.0);
        assert_eq!(v.total_asset, 1500.0);
    }

    #[test]
    fn totals_keep_their_signs() {
        let records = vec![
            RawRecord::new("금", "2"),
            RawRecord::new("대출", "-30,000,000"),
            RawRecord::new("예금", "12,000,000"),
            RawRecord::new("카드값", "-450000"),
        ];
        let prices = table(&[("금", 450000.0)]);

        let v = value_records(&records, &prices);

        assert!(v.total_asset >= 0.0);
        assert!(v.total_debt <= 0.0);
        assert_eq!(v.total_asset, 900000.0 + 12_000_000.0);
        assert_eq!(v.total_debt, -30_000_000.0 - 450000.0);
        assert_eq!(v.net_worth(), v.total_asset + v.total_debt);
    }

    #[test]
    fn input_order_is_preserved_within_each_class() {
        let records = vec![
            RawRecord::new("a", "1"),
            RawRecord::new("b", "-1"),
            RawRecord::new("c", "2"),
            RawRecord::new("d", "-2"),
        ];
        let v = value_records(&records, &PriceTable::new());

        let asset_names: Vec<&str> = v.assets.iter().map(|e| e.name.as_str()).collect();
        let debt_names: Vec<&str> = v.debts.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(asset_names, vec!["a", "c"]);
        assert_eq!(debt_names, vec!["b", "d"]);
    }

    #[test]
    fn unresolvable_record_with_empty_amount_is_a_zero_asset_line() {
        let records = vec![RawRecord::new("모름", CellValue::Empty)];
        let v = value_records(&records, &PriceTable::new());

        assert_eq!(v.assets.len(), 1);
        assert_eq!(v.assets[0].value, 0.0);
        assert!(v.debts.is_empty());
    }

    #[test]
    fn malformed_amounts_degrade_to_zero_instead_of_erroring() {
        let records = vec![
            RawRecord::new("삼성전자", "열 주"),
            RawRecord::new("예금", "1,000"),
        ];
        let prices = table(&[("삼성전자", 70000.0)]);

        let v = value_records(&records, &prices);

        assert_eq!(v.assets[0].value, 0.0);
        assert_eq!(v.assets[1].value, 1000.0);
        assert_eq!(v.total_asset, 1000.0);
    }

    #[test]
    fn reruns_on_the_same_input_are_identical() {
        let records = vec![
            RawRecord::new("삼성전자", "10"),
            RawRecord::new("대출", "-5000"),
        ];
        let prices = table(&[("삼성전자", 70000.0)]);

        let first = value_records(&records, &prices);
        let second = value_records(&records, &prices);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_priced_instrument_reads_amount_as_currency() {
        // A true zero price is indistinguishable from "not in the table";
        // both take the direct-value branch.
        let records = vec![RawRecord::new("휴지조각", "250")];
        let prices = table(&[("휴지조각", 0.0)]);

        let v = value_records(&records, &prices);
        assert_eq!(v.assets[0].value, 250.0);
    }
}
