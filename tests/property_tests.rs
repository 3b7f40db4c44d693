use std::sync::Arc;

use pizzastore_rs::models::{Pizza, PizzaSize};
use pizzastore_rs::repositories::InMemoryPizzaRepository;
use pizzastore_rs::services::PizzaService;
use proptest::prelude::*;
use rust_decimal::Decimal;

// Property-based test strategies
prop_compose! {
    fn arb_pizza_size()(size in prop_oneof![
        Just(PizzaSize::Small),
        Just(PizzaSize::Medium),
        Just(PizzaSize::Large),
    ]) -> PizzaSize {
        size
    }
}

prop_compose! {
    fn arb_price()(cents in 1u32..100000) -> Decimal {
        // Generate prices as cents and convert to decimal with exactly 2 decimal places
        Decimal::from_parts(cents, 0, 0, false, 2)
    }
}

prop_compose! {
    fn arb_pizza()(
        name in "[a-zA-Z0-9 ]{3,60}",
        size in arb_pizza_size(),
        price in arb_price(),
        is_gluten_free in any::<bool>(),
    ) -> Pizza {
        Pizza::new(name, size, price).gluten_free(is_gluten_free)
    }
}

fn fresh_service() -> PizzaService {
    PizzaService::new(Arc::new(InMemoryPizzaRepository::new()))
}

proptest! {
    #[test]
    fn adding_n_pizzas_lists_n_preserved_entries(pizzas in prop::collection::vec(arb_pizza(), 0..12)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let service = fresh_service();

            let mut stored_ids = Vec::new();
            for pizza in &pizzas {
                let stored = service.add_pizza(pizza.clone()).await.unwrap();
                assert_ne!(stored.id, 0);
                stored_ids.push(stored.id);
            }

            let listed = service.get_pizzas().await.unwrap();
            assert_eq!(listed.len(), pizzas.len());

            // Insertion order and every field survive the round trip
            // through the store.
            for (stored, original) in listed.iter().zip(pizzas.iter()) {
                assert_eq!(stored.name, original.name);
                assert_eq!(stored.size, original.size);
                assert_eq!(stored.price, original.price);
                assert_eq!(stored.is_gluten_free, original.is_gluten_free);
            }

            // Ids are pairwise distinct.
            let mut deduped = stored_ids.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(deduped.len(), stored_ids.len());
        });
    }

    #[test]
    fn deleting_one_id_removes_exactly_that_row(
        pizzas in prop::collection::vec(arb_pizza(), 1..10),
        selector in any::<prop::sample::Index>(),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let service = fresh_service();

            let mut stored = Vec::new();
            for pizza in pizzas {
                stored.push(service.add_pizza(pizza).await.unwrap());
            }

            let victim = stored[selector.index(stored.len())].clone();
            service.delete_pizza(victim.id).await.unwrap();

            let listed = service.get_pizzas().await.unwrap();
            assert_eq!(listed.len(), stored.len() - 1);
            assert!(listed.iter().all(|pizza| pizza.id != victim.id));

            // Every other row is untouched.
            let survivors: Vec<_> = stored
                .iter()
                .filter(|pizza| pizza.id != victim.id)
                .cloned()
                .collect();
            assert_eq!(listed, survivors);
        });
    }

    #[test]
    fn deleting_an_unknown_id_leaves_the_catalog_unchanged(
        pizzas in prop::collection::vec(arb_pizza(), 0..10),
        unknown_id in 1_000_000i64..2_000_000,
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let service = fresh_service();

            for pizza in pizzas {
                service.add_pizza(pizza).await.unwrap();
            }

            let before = service.get_pizzas().await.unwrap();
            service.delete_pizza(unknown_id).await.unwrap();
            let after = service.get_pizzas().await.unwrap();

            assert_eq!(before, after);
        });
    }

    #[test]
    fn gluten_free_flag_round_trips(flag in any::<bool>(), pizza in arb_pizza()) {
        let flagged = pizza.gluten_free(flag);
        prop_assert_eq!(flagged.is_gluten_free, flag);

        let json = serde_json::to_string(&flagged).unwrap();
        let deserialized: Pizza = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(deserialized.is_gluten_free, flag);
    }

    #[test]
    fn pizza_serialization_round_trips(pizza in arb_pizza()) {
        let json = serde_json::to_string(&pizza).unwrap();
        let deserialized: Pizza = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(pizza, deserialized);
    }

    #[test]
    fn pizza_size_serialization_round_trips(size in arb_pizza_size()) {
        let json = serde_json::to_string(&size).unwrap();
        let deserialized: PizzaSize = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(size.clone(), deserialized);

        // Display and FromStr agree with each other as well.
        let parsed: PizzaSize = size.to_string().parse().unwrap();
        prop_assert_eq!(size, parsed);
    }
}
