//! Order-item aggregation steps
//!
//! Each step is a plain function from one row shape to the next:
//!
//! ```text
//! OrderItem ─filter─▶ OrderItem ─join_food─▶ Joined ─join_order─▶ Joined
//!   ─join_table─▶ Joined ─project─▶ Projected ─group─▶ Group ─finish─▶ OrderItemReport
//! ```
//!
//! Joins are left joins: a row whose food, order or table is missing is kept
//! with `None` in that slot.

use std::collections::HashMap;

use shared::models::{DiningTable, Food, Order, OrderItem, OrderItemReport, ReportLine};
use shared::money::sum_amounts;

/// Every line counts as one unit; the size token is not a multiplier
const COUNT_PER_LINE: u32 = 1;

/// An order item with its joined references
#[derive(Debug, Clone)]
pub struct Joined {
    pub item: OrderItem,
    pub food: Option<Food>,
    pub order: Option<Order>,
    pub table: Option<DiningTable>,
}

/// One projected line, still carrying its group key
#[derive(Debug, Clone, PartialEq)]
pub struct Projected {
    pub order_id: Option<String>,
    pub table_id: Option<String>,
    pub table_number: Option<i32>,
    pub counted: u32,
    pub line: ReportLine,
}

/// Lines sharing one `(order_id, table_number)` key
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub order_id: Option<String>,
    pub table_id: Option<String>,
    pub table_number: Option<i32>,
    pub total_count: u32,
    pub lines: Vec<ReportLine>,
}

/// Step 1: keep items of the requested order
pub fn filter(items: Vec<OrderItem>, order_id: &str) -> Vec<OrderItem> {
    items
        .into_iter()
        .filter(|item| item.order_id == order_id)
        .collect()
}

/// Step 2: left join each item with its food
pub fn join_food(items: Vec<OrderItem>, foods: &HashMap<String, Food>) -> Vec<Joined> {
    items
        .into_iter()
        .map(|item| {
            let food = foods.get(&item.food_id).cloned();
            Joined {
                item,
                food,
                order: None,
                table: None,
            }
        })
        .collect()
}

/// Step 3: left join each row with its order
pub fn join_order(rows: Vec<Joined>, orders: &HashMap<String, Order>) -> Vec<Joined> {
    rows.into_iter()
        .map(|mut row| {
            row.order = orders.get(&row.item.order_id).cloned();
            row
        })
        .collect()
}

/// Step 4: left join each row with the table of its order
pub fn join_table(rows: Vec<Joined>, tables: &HashMap<String, DiningTable>) -> Vec<Joined> {
    rows.into_iter()
        .map(|mut row| {
            row.table = row
                .order
                .as_ref()
                .and_then(|o| o.table_id.as_ref())
                .and_then(|id| tables.get(id))
                .cloned();
            row
        })
        .collect()
}

/// Step 5: flatten a joined row into a report line
///
/// The amount is the food's list price.
pub fn project(rows: Vec<Joined>) -> Vec<Projected> {
    rows.into_iter()
        .map(|row| {
            let price = row.food.as_ref().map(|f| f.price);
            let line = ReportLine {
                order_item_id: row.item.order_item_id,
                food_id: row.item.food_id,
                quantity: row.item.quantity,
                unit_price: row.item.unit_price,
                food_name: row.food.as_ref().map(|f| f.name.clone()),
                food_image: row.food.as_ref().map(|f| f.food_image.clone()),
                price,
                amount: price,
            };
            Projected {
                order_id: row.order.as_ref().map(|o| o.order_id.clone()),
                table_id: row.table.as_ref().map(|t| t.table_id.clone()),
                table_number: row.table.as_ref().map(|t| t.table_number),
                counted: COUNT_PER_LINE,
                line,
            }
        })
        .collect()
}

/// Step 6: group by `(order_id, table_number)` in first-seen order
///
/// Key fields of a group come from its first row.
pub fn group(rows: Vec<Projected>) -> Vec<Group> {
    let mut index: HashMap<(Option<String>, Option<i32>), usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for row in rows {
        let key = (row.order_id.clone(), row.table_number);
        match index.get(&key) {
            Some(&i) => {
                let g = &mut groups[i];
                g.total_count += row.counted;
                g.lines.push(row.line);
            }
            None => {
                index.insert(key, groups.len());
                groups.push(Group {
                    order_id: row.order_id,
                    table_id: row.table_id,
                    table_number: row.table_number,
                    total_count: row.counted,
                    lines: vec![row.line],
                });
            }
        }
    }

    groups
}

/// Step 7: final report shape; missing amounts add nothing
pub fn finish(groups: Vec<Group>) -> Vec<OrderItemReport> {
    groups
        .into_iter()
        .map(|g| OrderItemReport {
            total_amount: sum_amounts(g.lines.iter().filter_map(|l| l.amount)),
            table_id: g.table_id,
            order_id: g.order_id,
            table_number: g.table_number,
            total_count: g.total_count,
            order_items: g.lines,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::Quantity;

    fn item(id: &str, order: &str, food: &str, qty: Quantity, price: f64) -> OrderItem {
        let now = Utc::now();
        OrderItem {
            order_item_id: id.into(),
            order_id: order.into(),
            food_id: food.into(),
            quantity: qty,
            unit_price: price,
            created_at: now,
            updated_at: now,
        }
    }

    fn food(id: &str, price: f64) -> Food {
        let now = Utc::now();
        Food {
            food_id: id.into(),
            name: format!("food-{id}"),
            price,
            food_image: format!("https://img.example/{id}.png"),
            menu_id: "m1".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn projected(order: Option<&str>, number: Option<i32>, id: &str, amount: Option<f64>) -> Projected {
        Projected {
            order_id: order.map(String::from),
            table_id: number.map(|n| format!("t{n}")),
            table_number: number,
            counted: 1,
            line: ReportLine {
                order_item_id: id.into(),
                food_id: "f".into(),
                quantity: Quantity::S,
                unit_price: 1.0,
                food_name: None,
                food_image: None,
                price: amount,
                amount,
            },
        }
    }

    #[test]
    fn test_filter_keeps_matching_order() {
        let items = vec![
            item("i1", "o1", "f1", Quantity::S, 1.0),
            item("i2", "o2", "f1", Quantity::S, 1.0),
            item("i3", "o1", "f2", Quantity::L, 1.0),
        ];
        let kept = filter(items, "o1");
        let ids: Vec<_> = kept.iter().map(|i| i.order_item_id.as_str()).collect();
        assert_eq!(ids, ["i1", "i3"]);
    }

    #[test]
    fn test_join_food_keeps_unmatched() {
        let foods = HashMap::from([("f1".to_string(), food("f1", 9.5))]);
        let rows = join_food(
            vec![
                item("i1", "o1", "f1", Quantity::S, 1.0),
                item("i2", "o1", "missing", Quantity::S, 1.0),
            ],
            &foods,
        );
        assert_eq!(rows.len(), 2);
        assert!(rows[0].food.is_some());
        assert!(rows[1].food.is_none());
    }

    #[test]
    fn test_join_table_needs_order() {
        let now = Utc::now();
        let table = DiningTable {
            table_id: "t1".into(),
            table_number: 7,
            number_of_guests: 4,
            created_at: now,
            updated_at: now,
        };
        let order = Order {
            order_id: "o1".into(),
            table_id: Some("t1".into()),
            order_date: now,
            created_at: now,
            updated_at: now,
        };
        let orders = HashMap::from([("o1".to_string(), order)]);
        let tables = HashMap::from([("t1".to_string(), table)]);

        let rows = join_food(
            vec![
                item("i1", "o1", "f1", Quantity::S, 1.0),
                item("i2", "ghost", "f1", Quantity::S, 1.0),
            ],
            &HashMap::new(),
        );
        let rows = join_table(join_order(rows, &orders), &tables);
        assert_eq!(rows[0].table.as_ref().map(|t| t.table_number), Some(7));
        assert!(rows[1].order.is_none());
        assert!(rows[1].table.is_none());
    }

    #[test]
    fn test_project_amount_is_food_price() {
        let foods = HashMap::from([("f1".to_string(), food("f1", 12.0))]);
        let rows = join_food(vec![item("i1", "o1", "f1", Quantity::L, 3.25)], &foods);
        let out = project(rows);
        assert_eq!(out[0].line.amount, Some(12.0));
        assert_eq!(out[0].line.unit_price, 3.25);
        assert_eq!(out[0].counted, 1);
        assert_eq!(out[0].line.food_name.as_deref(), Some("food-f1"));
    }

    #[test]
    fn test_project_missing_food_has_no_amount() {
        let rows = join_food(vec![item("i1", "o1", "gone", Quantity::M, 3.25)], &HashMap::new());
        let out = project(rows);
        assert_eq!(out[0].line.amount, None);
        assert_eq!(out[0].line.food_name, None);
        assert_eq!(out[0].line.food_image, None);
    }

    #[test]
    fn test_group_first_seen_order_and_counts() {
        let rows = vec![
            projected(Some("o1"), Some(3), "a", Some(2.0)),
            projected(Some("o1"), None, "b", Some(1.0)),
            projected(Some("o1"), Some(3), "c", None),
        ];
        let groups = group(rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].table_number, Some(3));
        assert_eq!(groups[0].total_count, 2);
        assert_eq!(groups[0].lines.len(), 2);
        assert_eq!(groups[1].table_number, None);
        assert_eq!(groups[1].total_count, 1);
    }

    #[test]
    fn test_finish_sums_present_amounts() {
        let groups = group(vec![
            projected(Some("o1"), Some(1), "a", Some(10.99)),
            projected(Some("o1"), Some(1), "b", Some(2.99)),
            projected(Some("o1"), Some(1), "c", None),
            projected(Some("o1"), Some(1), "d", Some(2.99)),
        ]);
        let reports = finish(groups);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].total_amount, 16.97);
        assert_eq!(reports[0].total_count, 4);
        assert_eq!(reports[0].order_items.len(), 4);
        assert_eq!(reports[0].table_id.as_deref(), Some("t1"));
    }
}
