use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Utc};

use crate::domain::{Customer, LineItem, Order, OrderStatus};

fn money(cents: i64) -> BigDecimal {
    BigDecimal::new(cents.into(), 2)
}

/// Demo orders the repository starts with, timestamped relative to `now`.
pub fn mock_orders(now: DateTime<Utc>) -> Vec<Order> {
    let ago = |minutes: i64| now - Duration::minutes(minutes);

    vec![
        Order::new(
            "1001",
            Customer::new("John Doe", "john@example.com", "555-1234")
                .with_address("123 Main St, Anytown, CA 94567"),
            vec![
                LineItem::new("item1", "Product A", money(2999), 2),
                LineItem::new("item2", "Product B", money(4999), 1),
            ],
            money(10997),
            ago(30),
        ),
        Order::new(
            "1002",
            Customer::new("Jane Smith", "jane@example.com", "555-5678")
                .with_address("456 Oak St, Somewhere, NY 10001"),
            vec![LineItem::new("item3", "Product C", money(1999), 3)],
            money(5997),
            ago(120),
        )
        .with_status(OrderStatus::Processing, ago(45)),
        Order::new(
            "1003",
            Customer::new("Bob Johnson", "bob@example.com", "555-9012")
                .with_address("789 Pine St, Nowhere, TX 75001"),
            vec![
                LineItem::new("item4", "Product D", money(9999), 1),
                LineItem::new("item5", "Product E", money(3499), 2),
            ],
            money(16997),
            ago(300),
        )
        .with_status(OrderStatus::Completed, ago(60)),
        Order::new(
            "1004",
            Customer::new("Alice Williams", "alice@example.com", "555-3456")
                .with_address("321 Maple St, Elsewhere, FL 33101"),
            vec![LineItem::new("item6", "Product F", money(14999), 1)],
            money(14999),
            ago(480),
        )
        .with_status(OrderStatus::Cancelled, ago(420)),
        Order::new(
            "1005",
            Customer::new("Emma Brown", "emma@example.com", "555-7890")
                .with_address("654 Cedar St, Someplace, WA 98001"),
            vec![
                LineItem::new("item7", "Product G", money(3999), 2),
                LineItem::new("item8", "Product H", money(5999), 1),
                LineItem::new("item9", "Product I", money(1499), 3),
            ],
            money(18494),
            ago(15),
        ),
    ]
}
