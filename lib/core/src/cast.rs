//! Type casting of raw text tables into typed records
//!
//! Orders get two text fixups before conversion:
//! - `sum` may use a comma as decimal separator
//! - `product_id` may carry non-digit noise around the digits
//!
//! Products are converted directly. Any cell that still fails to parse is a
//! fatal [`Error::MalformedInput`]; nothing is coerced to null.

use crate::record::{CategoryInterner, OrderRecord, ProductRecord, TIMESTAMP_FORMAT};
use crate::schema::{Dataset, FieldKind, ORDERS_SCHEMA, PRODUCTS_SCHEMA};
use crate::table::RawTable;
use crate::{Category, Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::borrow::Cow;
use tracing::debug;

const DATETIME_FORMATS: [&str; 2] = [TIMESTAMP_FORMAT, "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Replace every comma with a period so "1300,65" parses as 1300.65
pub fn fix_decimal_separator(value: &str) -> Cow<'_, str> {
    if value.contains(',') {
        Cow::Owned(value.replace(',', "."))
    } else {
        Cow::Borrowed(value)
    }
}

/// Drop every character that is not an ASCII digit, so "345f56" becomes "34556"
pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Converts raw tables into typed record sets
pub struct TypeCaster;

impl TypeCaster {
    /// Cast an orders table, applying the orders text fixups
    pub fn cast_orders(raw: &RawTable) -> Result<Vec<OrderRecord>> {
        let table = raw.project(&ORDERS_SCHEMA)?;
        let mut statuses = CategoryInterner::new();

        let records = table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cells = RowCells::new(Dataset::Orders, i, row);
                let sum = fix_decimal_separator(&row[4]);
                let product_id = strip_non_digits(&row[9]);
                Ok(OrderRecord {
                    order_source_id: cells.integer(0, &row[0])?,
                    order_created_datetime: cells.timestamp(1, &row[1])?,
                    customer_id: cells.integer(2, &row[2])?,
                    status: cells.category(&row[3], &mut statuses),
                    sum: cells.decimal(4, &sum)?,
                    quantity: cells.integer(5, &row[5])?,
                    name: cells.text(&row[6]),
                    surname: cells.text(&row[7]),
                    patronymic: cells.text(&row[8]),
                    product_id: cells.integer(9, &product_id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = records.len(), statuses = statuses.len(), "cast orders");
        Ok(records)
    }

    /// Cast a products table
    pub fn cast_products(raw: &RawTable) -> Result<Vec<ProductRecord>> {
        let table = raw.project(&PRODUCTS_SCHEMA)?;
        let mut groups = CategoryInterner::new();
        let mut manufacturers = CategoryInterner::new();

        let records = table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cells = RowCells::new(Dataset::Products, i, row);
                Ok(ProductRecord {
                    product_id: cells.integer(0, &row[0])?,
                    price: cells.decimal(1, &row[1])?,
                    goods_group: cells.category(&row[2], &mut groups),
                    manufacturer: cells.category(&row[3], &mut manufacturers),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            rows = records.len(),
            goods_groups = groups.len(),
            manufacturers = manufacturers.len(),
            "cast products"
        );
        Ok(records)
    }
}

/// Per-row conversion helpers that know where they are for error reporting
struct RowCells<'a> {
    dataset: Dataset,
    row: usize,
    raw: &'a [String],
}

impl<'a> RowCells<'a> {
    fn new(dataset: Dataset, row: usize, raw: &'a [String]) -> Self {
        Self { dataset, row, raw }
    }

    /// Errors always report the raw cell, not the fixed-up value
    fn malformed(&self, column: usize, expected: FieldKind) -> Error {
        Error::MalformedInput {
            dataset: self.dataset,
            column: self.dataset.schema().columns[column].name.to_string(),
            row: self.row,
            value: self.raw[column].clone(),
            expected,
        }
    }

    fn integer(&self, column: usize, value: &str) -> Result<i64> {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| self.malformed(column, FieldKind::Integer))
    }

    fn decimal(&self, column: usize, value: &str) -> Result<f64> {
        match value.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(parsed),
            _ => Err(self.malformed(column, FieldKind::Decimal)),
        }
    }

    fn timestamp(&self, column: usize, value: &str) -> Result<NaiveDateTime> {
        let value = value.trim();
        for format in DATETIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(parsed);
            }
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| self.malformed(column, FieldKind::Timestamp))
    }

    fn category(&self, value: &str, interner: &mut CategoryInterner) -> Option<Category> {
        if value.is_empty() {
            None
        } else {
            Some(interner.intern(value))
        }
    }

    fn text(&self, value: &str) -> Option<String> {
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders_table() -> RawTable {
        RawTable::from_columns(
            Dataset::Orders,
            &[
                ("order_source_id", &["111", "222234", "49586"]),
                (
                    "order_created_datetime",
                    &["2019-04-28T18:20:05", "2019-04-20T16:04:04", "2019-04-23T17:26:06"],
                ),
                ("customer_id", &["5375", "3356", "786544"]),
                ("status", &["Paid", "Waiting_Accepted", "Failed"]),
                ("sum", &["540", "1300,65", "67"]),
                ("quantity", &["12", "23", "34"]),
                ("name", &["olena", "василь", "петро"]),
                ("surname", &["-", "петренко", "анрійко"]),
                ("patronymic", &["igorivna", "олександрович", "Маркіянович"]),
                ("product_id", &["345f56", "596904", "d59954"]),
            ],
        )
        .unwrap()
    }

    fn products_table() -> RawTable {
        RawTable::from_columns(
            Dataset::Products,
            &[
                ("product_id", &["34556", "596904", "5678", "56332"]),
                ("price", &["45", "56.55", "10", "13.50"]),
                (
                    "goods_group",
                    &[
                        "Творчість та канцтовари",
                        "Творчість та канцтовари",
                        "Ігрові фігурки",
                        "Іграшки для розвитку",
                    ],
                ),
                ("manufacturer", &["BIC", "BIC", "Bingo", "Hama"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_fixups() {
        assert_eq!(fix_decimal_separator("1300,65"), "1300.65");
        assert!(matches!(fix_decimal_separator("540"), Cow::Borrowed(_)));
        assert_eq!(strip_non_digits("345f56"), "34556");
        assert_eq!(strip_non_digits("d59954"), "59954");
    }

    #[test]
    fn test_cast_orders() {
        let orders = TypeCaster::cast_orders(&orders_table()).unwrap();
        assert_eq!(orders.len(), 3);

        let sums: Vec<f64> = orders.iter().map(|o| o.sum).collect();
        assert_eq!(sums, vec![540.0, 1300.65, 67.0]);

        let product_ids: Vec<i64> = orders.iter().map(|o| o.product_id).collect();
        assert_eq!(product_ids, vec![34556, 596904, 59954]);

        assert_eq!(orders[0].order_source_id, 111);
        assert_eq!(orders[2].customer_id, 786544);
        assert_eq!(orders[1].quantity, 23);
        assert_eq!(
            orders[0].order_created_datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2019-04-28 18:20:05"
        );
        assert_eq!(orders[1].status.as_ref().map(|s| s.as_str()), Some("Waiting_Accepted"));
        // Names are not cleaned at this stage
        assert_eq!(orders[2].patronymic.as_deref(), Some("Маркіянович"));
    }

    #[test]
    fn test_cast_products() {
        let products = TypeCaster::cast_products(&products_table()).unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[1].product_id, 596904);
        assert_eq!(products[1].price, 56.55);
        assert_eq!(products[3].price, 13.5);
        assert_eq!(products[2].manufacturer.as_ref().map(|m| m.as_str()), Some("Bingo"));
        assert_eq!(products[0].goods_group, products[1].goods_group);
    }

    #[test]
    fn test_products_get_no_fixups() {
        let table = RawTable::from_strs(
            Dataset::Products,
            &["product_id", "price", "goods_group", "manufacturer"],
            &[&["34556", "45,5", "Pens", "BIC"]],
        )
        .unwrap();

        let err = TypeCaster::cast_products(&table).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedInput {
                dataset: Dataset::Products,
                column: "price".to_string(),
                row: 0,
                value: "45,5".to_string(),
                expected: FieldKind::Decimal,
            }
        );
    }

    #[test]
    fn test_malformed_order_aborts() {
        let mut raw = orders_table().rows().to_vec();
        raw[2][5] = "many".to_string();
        let table = RawTable::new(
            Dataset::Orders,
            orders_table().columns().to_vec(),
            raw,
        )
        .unwrap();

        match TypeCaster::cast_orders(&table) {
            Err(Error::MalformedInput { column, row, value, .. }) => {
                assert_eq!(column, "quantity");
                assert_eq!(row, 2);
                assert_eq!(value, "many");
            }
            other => panic!("expected malformed input, got {:?}", other),
        }
    }

    #[test]
    fn test_product_id_without_digits_is_malformed() {
        let mut raw = orders_table().rows().to_vec();
        raw[0][9] = "abc".to_string();
        let table = RawTable::new(Dataset::Orders, orders_table().columns().to_vec(), raw).unwrap();

        let err = TypeCaster::cast_orders(&table).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedInput { ref column, ref value, .. } if column == "product_id" && value == "abc"
        ));
    }

    #[test]
    fn test_timestamp_formats() {
        let raw = vec![String::new(); ORDERS_SCHEMA.len()];
        let cells = RowCells::new(Dataset::Orders, 0, &raw);
        let a = cells.timestamp(1, "2019-04-28 18:20:05").unwrap();
        let b = cells.timestamp(1, "2019-04-28T18:20:05.000").unwrap();
        let c = cells.timestamp(1, "2019-04-28").unwrap();
        assert_eq!(a, b);
        assert_eq!(c.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_empty_text_and_category_become_null() {
        let table = RawTable::from_strs(
            Dataset::Products,
            &["product_id", "price", "goods_group", "manufacturer"],
            &[&["1", "0", "", ""]],
        )
        .unwrap();
        let products = TypeCaster::cast_products(&table).unwrap();
        assert!(products[0].goods_group.is_none());
        assert!(products[0].manufacturer.is_none());
    }

    #[test]
    fn test_casting_is_idempotent() {
        let once = TypeCaster::cast_orders(&orders_table()).unwrap();
        let rendered = RawTable::new(
            Dataset::Orders,
            ORDERS_SCHEMA.column_names().map(str::to_string).collect(),
            once.iter().map(|o| o.to_raw_row()).collect(),
        )
        .unwrap();
        let twice = TypeCaster::cast_orders(&rendered).unwrap();
        assert_eq!(once, twice);

        let products = TypeCaster::cast_products(&products_table()).unwrap();
        let rendered = RawTable::new(
            Dataset::Products,
            PRODUCTS_SCHEMA.column_names().map(str::to_string).collect(),
            products.iter().map(|p| p.to_raw_row()).collect(),
        )
        .unwrap();
        assert_eq!(products, TypeCaster::cast_products(&rendered).unwrap());
    }
}
