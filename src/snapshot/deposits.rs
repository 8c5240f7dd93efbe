use chrono::{DateTime, Utc};

use crate::api::DepositEvent;

/// Basis for the held-counterfactual: what the user put in at the most recent
/// deposit block.
///
/// Only deposits at the highest block number contribute, and within that block
/// only those at the latest timestamp. Withdrawals and earlier deposits in the
/// history window are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialDepositSummary {
    pub amount_x: f64,
    pub amount_y: f64,
    /// Absent when the history holds no deposits
    pub deposit_time: Option<DateTime<Utc>>,
}

impl InitialDepositSummary {
    pub fn from_events(events: &[DepositEvent]) -> Self {
        let latest = events
            .iter()
            .filter(|e| e.is_deposit)
            .filter_map(|e| Some(((e.block_number?, e.timestamp?), e)))
            .fold(None, |acc: Option<((u64, DateTime<Utc>), f64, f64)>, (key, e)| {
                match acc {
                    Some((best, x, y)) if key == best => {
                        Some((best, x + e.token_x.amount, y + e.token_y.amount))
                    },
                    Some((best, _, _)) if key < best => acc,
                    _ => Some((key, e.token_x.amount, e.token_y.amount)),
                }
            });

        match latest {
            Some(((_, time), amount_x, amount_y)) => Self {
                amount_x,
                amount_y,
                deposit_time: Some(time),
            },
            None => Self::empty(),
        }
    }

    pub fn empty() -> Self {
        Self {
            amount_x: 0.0,
            amount_y: 0.0,
            deposit_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TokenFlow;

    fn event(block: u64, ts: i64, is_deposit: bool, x: f64, y: f64) -> DepositEvent {
        DepositEvent {
            timestamp: DateTime::from_timestamp(ts, 0),
            is_deposit,
            block_number: Some(block),
            token_x: TokenFlow {
                amount: x,
                price: 0.0,
            },
            token_y: TokenFlow {
                amount: y,
                price: 0.0,
            },
            ..Default::default()
        }
    }

    // 2024-05-01 10:00:00 and 11:00:00 UTC
    const T10: i64 = 1_714_557_600;
    const T11: i64 = 1_714_561_200;

    #[test]
    fn test_latest_block_wins() {
        let events = vec![
            event(100, T10, true, 5.0, 50.0),
            event(105, T11, true, 1.0, 10.0),
            event(105, T11, true, 2.0, 20.0),
        ];

        let summary = InitialDepositSummary::from_events(&events);
        assert_eq!(summary.amount_x, 3.0);
        assert_eq!(summary.amount_y, 30.0);
        assert_eq!(summary.deposit_time, DateTime::from_timestamp(T11, 0));
    }

    #[test]
    fn test_latest_timestamp_within_block() {
        let events = vec![
            event(105, T11, true, 1.0, 1.0),
            event(105, T10, true, 7.0, 7.0),
        ];

        let summary = InitialDepositSummary::from_events(&events);
        assert_eq!(summary.amount_x, 1.0);
        assert_eq!(summary.deposit_time, DateTime::from_timestamp(T11, 0));
    }

    #[test]
    fn test_order_independent() {
        let mut events = vec![
            event(105, T11, true, 1.0, 10.0),
            event(100, T10, true, 5.0, 50.0),
            event(105, T11, true, 2.0, 20.0),
        ];
        let forward = InitialDepositSummary::from_events(&events);
        events.reverse();
        assert_eq!(forward, InitialDepositSummary::from_events(&events));
    }

    #[test]
    fn test_withdrawals_are_ignored() {
        let events = vec![
            event(100, T10, true, 5.0, 50.0),
            event(200, T11, false, 9.0, 90.0),
        ];

        let summary = InitialDepositSummary::from_events(&events);
        assert_eq!(summary.amount_x, 5.0);
        assert_eq!(summary.deposit_time, DateTime::from_timestamp(T10, 0));
    }

    #[test]
    fn test_no_deposits() {
        let events = vec![event(200, T11, false, 9.0, 90.0)];

        let summary = InitialDepositSummary::from_events(&events);
        assert_eq!(summary, InitialDepositSummary::empty());
        assert!(summary.deposit_time.is_none());

        assert_eq!(
            InitialDepositSummary::from_events(&[]),
            InitialDepositSummary::empty()
        );
    }
}
