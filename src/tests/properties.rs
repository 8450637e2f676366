use super::{lot, started_at, Fixture};
use crate::{
    auction::BidError,
    board::BoardSettings,
    catalog::{CatalogItem, CatalogQuery, ItemStatus},
    countdown::time_left,
    fixtures::CATEGORIES,
};
use chrono::Duration;
use proptest::prelude::*;
use proptest::sample::select;
use std::collections::BTreeSet;

fn item_strategy() -> impl Strategy<Value = CatalogItem> {
    (
        0u64..1000,
        select(vec!["Часы", "часы с боем", "Картина", "Ручка", "Комод"]),
        select(CATEGORIES.to_vec()),
        0u64..3_000_000,
    )
        .prop_map(|(id, title, category, price)| CatalogItem {
            id,
            title: title.to_owned(),
            category: category.to_owned(),
            price,
            year: "1900".to_owned(),
            status: ItemStatus::Available,
            image: String::new(),
        })
}

fn query_strategy() -> impl Strategy<Value = CatalogQuery> {
    (
        select(vec!["", "ч", "часы", "ЧАСЫ", "а"]),
        0u64..1_500_000,
        0u64..3_000_000,
        proptest::collection::btree_set(select(CATEGORIES.to_vec()), 0..3),
    )
        .prop_map(|(search, min_price, max_price, categories)| CatalogQuery {
            search: search.to_owned(),
            min_price,
            max_price,
            categories: categories.into_iter().map(str::to_owned).collect(),
        })
}

proptest! {
    #[test]
    fn bid_accepted_iff_it_reaches_the_minimum(
        current_bid in 0u64..10_000_000,
        min_increment in 0u64..100_000,
        amount in 0u64..10_200_000,
    ) {
        let fx = Fixture::new();
        let mut board = fx.board(vec![lot(1, current_bid, min_increment, 3600)], BoardSettings::default());

        let res = board.submit_bid(1, amount);
        let lot = board.lot(1).unwrap();
        if current_bid + min_increment <= amount {
            prop_assert!(res.is_ok());
            prop_assert_eq!(lot.current_bid, amount);
            prop_assert_eq!(lot.bid_count, 1);
            prop_assert_eq!(board.ledger().len(), 1);
        } else {
            prop_assert_eq!(res, Err(BidError::TooLow { minimum: current_bid + min_increment }));
            prop_assert_eq!(lot.current_bid, current_bid);
            prop_assert_eq!(lot.bid_count, 0);
            prop_assert!(board.ledger().is_empty());
        }
    }

    #[test]
    fn ledger_grows_by_one_per_accepted_bid(amounts in proptest::collection::vec(0u64..2_000, 0..40)) {
        let fx = Fixture::new();
        let mut board = fx.board(vec![lot(1, 0, 10, 3600)], BoardSettings::default());

        let mut accepted = vec![];
        let mut current_bid = 0;
        for amount in amounts {
            if board.submit_bid(1, amount).is_ok() {
                accepted.push(amount);
            }
            let lot = board.lot(1).unwrap();
            prop_assert!(current_bid <= lot.current_bid);
            current_bid = lot.current_bid;
        }

        let recorded: Vec<_> = board.ledger().entries().iter().map(|bid| bid.amount).collect();
        prop_assert_eq!(&recorded, &accepted);
        prop_assert_eq!(board.lot(1).unwrap().bid_count, accepted.len() as u64);
    }

    #[test]
    fn countdown_is_a_pure_projection(offset_ms in -10_000_000i64..100_000_000) {
        let now = started_at();
        let end = now + Duration::milliseconds(offset_ms);
        prop_assert_eq!(time_left(end, now), time_left(end, now));
        prop_assert_eq!(time_left(end, now).has_ended(), offset_ms <= 0);
    }

    #[test]
    fn filter_is_pure(
        items in proptest::collection::vec(item_strategy(), 0..30),
        query in query_strategy(),
    ) {
        prop_assert_eq!(query.apply(&items), query.apply(&items));
    }

    #[test]
    fn narrowing_never_grows_the_result(
        items in proptest::collection::vec(item_strategy(), 0..30),
        query in query_strategy(),
        raise_min in 0u64..500_000,
        lower_max in 0u64..500_000,
        category in select(CATEGORIES.to_vec()),
    ) {
        let base = query.apply(&items).len();

        let mut narrower = query.clone();
        narrower.min_price = narrower.min_price.saturating_add(raise_min);
        prop_assert!(narrower.apply(&items).len() <= base);

        let mut narrower = query.clone();
        narrower.max_price = narrower.max_price.saturating_sub(lower_max);
        prop_assert!(narrower.apply(&items).len() <= base);

        let mut narrower = query.clone();
        narrower.search.push('ы');
        prop_assert!(narrower.apply(&items).len() <= base);

        // restricting an unrestricted category set, or dropping one from a
        // restricted one, both narrow
        let mut narrower = query.clone();
        if narrower.categories.is_empty() {
            narrower.categories = BTreeSet::from([category.to_owned()]);
        } else if narrower.categories.len() > 1 {
            let first = narrower.categories.iter().next().cloned().unwrap();
            narrower.categories.remove(&first);
        }
        prop_assert!(narrower.apply(&items).len() <= base);
    }
}
