// src/model/queues.rs

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An order that has been placed and will land in stock on `arrival_day`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingOrder {
    pub arrival_day: usize,
    pub quantity: f64,
}

/// Outstanding replenishment orders, oldest first.
///
/// Lead time is fixed, so orders are pushed in non-decreasing arrival order
/// and arrivals can always be taken from the front.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    orders: VecDeque<PendingOrder>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step 1 of a day: remove every order due on or before `day` and
    /// return the total quantity received.
    pub fn take_arrivals(&mut self, day: usize) -> f64 {
        let mut received = 0.0;
        while let Some(order) = self.orders.front() {
            if order.arrival_day > day {
                break;
            }
            received += order.quantity;
            self.orders.pop_front();
        }
        received
    }

    /// Step 4 of a day: a new order enters the pipeline.
    pub fn push(&mut self, order: PendingOrder) {
        debug_assert!(
            self.orders
                .back()
                .map_or(true, |last| last.arrival_day <= order.arrival_day),
            "orders must be pushed in arrival order"
        );
        self.orders.push_back(order);
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Units ordered but not yet received.
    pub fn in_transit(&self) -> f64 {
        self.orders.iter().map(|o| o.quantity).sum()
    }

    pub fn orders(&self) -> impl Iterator<Item = &PendingOrder> {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(arrival_day: usize, quantity: f64) -> PendingOrder {
        PendingOrder {
            arrival_day,
            quantity,
        }
    }

    #[test]
    fn arrivals_leave_future_orders_in_place() {
        let mut pipeline = Pipeline::new();
        pipeline.push(order(2, 50.0));
        pipeline.push(order(2, 10.0));
        pipeline.push(order(3, 50.0));

        assert_eq!(pipeline.take_arrivals(1), 0.0);
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.take_arrivals(2), 60.0);
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline.in_transit(), 50.0);
        assert_eq!(pipeline.take_arrivals(3), 50.0);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn overdue_orders_are_still_received() {
        // A zero lead-time order placed after the arrival phase of its own day.
        let mut pipeline = Pipeline::new();
        pipeline.push(order(4, 25.0));
        assert_eq!(pipeline.take_arrivals(5), 25.0);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn no_stale_orders_after_arrivals() {
        let mut pipeline = Pipeline::new();
        for (arrival_day, quantity) in [(1, 5.0), (3, 5.0), (3, 7.0), (6, 5.0), (9, 2.0)] {
            pipeline.push(order(arrival_day, quantity));
        }

        for day in 0..10 {
            pipeline.take_arrivals(day);
            assert!(pipeline.orders().all(|o| o.arrival_day > day), "day {day}");
        }
        let remaining: Vec<_> = pipeline.orders().copied().collect();
        assert!(remaining.is_empty());

        pipeline.push(order(12, 4.0));
        pipeline.take_arrivals(10);
        assert_eq!(pipeline.orders().copied().collect::<Vec<_>>(), vec![order(12, 4.0)]);
    }
}
