mod common;

use anyhow::Result;
use cashbook::application::{AppError, INVALID_INPUT_MESSAGE, LedgerService};
use cashbook::domain::{IndexError, Summary, ValidationError};
use cashbook::storage::{MemoryStore, Store, TRANSACTIONS_KEY};
use common::{
    add_paycheck_and_rent, assert_close, descriptions, memory_service, RecordingRenderer,
};

#[tokio::test]
async fn test_scenario_a_add_income_and_expense() -> Result<()> {
    let (mut service, _store) = memory_service().await?;

    add_paycheck_and_rent(&mut service).await?;

    let summary = service.summary();
    assert_close(summary.income, 1000.0);
    assert_close(summary.expense, 500.0);
    assert_close(summary.balance, 500.0);
    assert_eq!(descriptions(service.list()), vec!["Paycheck", "Rent"]);

    Ok(())
}

#[tokio::test]
async fn test_scenario_b_remove_first() -> Result<()> {
    let (mut service, _store) = memory_service().await?;
    add_paycheck_and_rent(&mut service).await?;

    let removed = service.remove_at(0).await?;
    assert_eq!(removed.description(), "Paycheck");

    let list = service.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].description(), "Rent");
    assert_eq!(list[0].amount(), -500.0);
    assert!(!list[0].is_inflow());

    let summary = service.summary();
    assert_close(summary.income, 0.0);
    assert_close(summary.expense, 500.0);
    assert_close(summary.balance, -500.0);

    Ok(())
}

#[tokio::test]
async fn test_scenario_c_empty_description_rejected() -> Result<()> {
    let (mut service, store) = memory_service().await?;

    let result = service.add("", "10").await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::EmptyDescription))
    ));
    assert!(service.list().is_empty());
    assert_eq!(service.summary(), Summary::default());
    // No persistence write, no re-render
    assert_eq!(store.get(TRANSACTIONS_KEY).await?, None);
    assert_eq!(service.renderer().renders, 0);
    assert_eq!(
        service.renderer().error_area.as_deref(),
        Some(INVALID_INPUT_MESSAGE)
    );

    Ok(())
}

#[tokio::test]
async fn test_scenario_d_reload_in_fresh_instance() -> Result<()> {
    let (mut service, store) = memory_service().await?;
    add_paycheck_and_rent(&mut service).await?;
    let list_before = service.list().to_vec();
    let summary_before = service.summary();
    drop(service);

    let reloaded = LedgerService::open(store, RecordingRenderer::default()).await?;

    assert_eq!(reloaded.list(), list_before.as_slice());
    assert_eq!(reloaded.summary(), summary_before);

    Ok(())
}

#[tokio::test]
async fn test_summary_matches_amount_sums() -> Result<()> {
    let (mut service, _store) = memory_service().await?;
    let amounts = [
        12.5, -3.25, 0.0, 1000.0, -999.99, 0.01, -0.01, 42.0, -7.5, 3.3333,
    ];

    for (i, amount) in amounts.iter().enumerate() {
        service.add_amount(&format!("entry {}", i), *amount).await?;
    }

    let expected_income: f64 = amounts.iter().filter(|a| **a >= 0.0).sum();
    let expected_expense: f64 = amounts.iter().filter(|a| **a < 0.0).map(|a| -a).sum();

    let summary = service.summary();
    assert_close(summary.income, expected_income);
    assert_close(summary.expense, expected_expense);
    assert_close(summary.balance, expected_income - expected_expense);
    assert!(summary.income >= 0.0);
    assert!(summary.expense >= 0.0);

    Ok(())
}

#[tokio::test]
async fn test_remove_preserves_order_of_the_rest() -> Result<()> {
    let (mut service, _store) = memory_service().await?;
    for name in ["a", "b", "c", "d", "e"] {
        service.add(name, "1").await?;
    }

    service.remove_at(2).await?;

    assert_eq!(descriptions(service.list()), vec!["a", "b", "d", "e"]);
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_amount_rejected() -> Result<()> {
    let (mut service, store) = memory_service().await?;
    service.add("Paycheck", "1000").await?;
    let before = service.list().to_vec();
    let saved_before = store.get(TRANSACTIONS_KEY).await?;

    for bad in ["", "abc", "NaN", "12abc", "inf"] {
        let result = service.add("coffee", bad).await;
        assert!(
            matches!(
                result,
                Err(AppError::Validation(ValidationError::InvalidAmount))
            ),
            "amount {:?} should be rejected",
            bad
        );
    }
    let result = service.add_amount("coffee", f64::NAN).await;
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::InvalidAmount))
    ));

    assert_eq!(service.list(), before.as_slice());
    assert_eq!(store.get(TRANSACTIONS_KEY).await?, saved_before);
    Ok(())
}

#[tokio::test]
async fn test_inflow_follows_amount_sign() -> Result<()> {
    let (mut service, _store) = memory_service().await?;

    for (description, amount) in [("in", "25"), ("out", "-25"), ("zero", "0"), ("tiny", "-0.01")] {
        let tx = service.add(description, amount).await?;
        assert_eq!(tx.is_inflow(), tx.amount() >= 0.0);
    }

    service.remove_at(1).await?;
    service.add("later", "-3").await?;

    for tx in service.list() {
        assert_eq!(tx.is_inflow(), tx.amount() >= 0.0);
    }
    Ok(())
}

#[tokio::test]
async fn test_description_is_trimmed() -> Result<()> {
    let (mut service, _store) = memory_service().await?;

    let tx = service.add("  Groceries  ", " -42.50 ").await?;

    assert_eq!(tx.description(), "Groceries");
    assert_eq!(tx.amount(), -42.5);
    Ok(())
}

#[tokio::test]
async fn test_remove_out_of_range_rejected() -> Result<()> {
    let (mut service, store) = memory_service().await?;
    add_paycheck_and_rent(&mut service).await?;
    let saved_before = store.get(TRANSACTIONS_KEY).await?;
    let renders_before = service.renderer().renders;

    let result = service.remove_at(2).await;

    assert!(matches!(
        result,
        Err(AppError::Index(IndexError { index: 2, len: 2 }))
    ));
    assert_eq!(service.list().len(), 2);
    assert_eq!(store.get(TRANSACTIONS_KEY).await?, saved_before);
    assert_eq!(service.renderer().renders, renders_before);
    assert_eq!(
        service.renderer().error_area.as_deref(),
        Some("No transaction at position 2 (ledger has 2 transactions)")
    );
    Ok(())
}

#[tokio::test]
async fn test_each_mutation_renders_and_saves() -> Result<()> {
    let (mut service, store) = memory_service().await?;

    service.add("Paycheck", "1000").await?;
    assert_eq!(service.renderer().renders, 1);
    let saved: serde_json::Value =
        serde_json::from_str(&store.get(TRANSACTIONS_KEY).await?.unwrap())?;
    assert_eq!(
        saved,
        serde_json::json!([{"description": "Paycheck", "amount": 1000.0, "inflow": true}])
    );

    service.remove_at(0).await?;
    assert_eq!(service.renderer().renders, 2);
    assert_eq!(store.get(TRANSACTIONS_KEY).await?.as_deref(), Some("[]"));

    let (rendered, summary) = service.renderer().last_render.clone().unwrap();
    assert!(rendered.is_empty());
    assert_eq!(summary, Summary::default());
    Ok(())
}

#[tokio::test]
async fn test_error_area_cleared_on_next_success() -> Result<()> {
    let (mut service, _store) = memory_service().await?;

    assert!(service.add("", "5").await.is_err());
    assert!(service.renderer().error_area.is_some());

    assert!(service.remove_at(7).await.is_err());
    assert!(service.renderer().error_area.is_some());

    service.add("Coffee", "-3.5").await?;
    assert_eq!(service.renderer().error_area, None);
    assert_eq!(service.renderer().errors_shown.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_refresh_renders_loaded_state() -> Result<()> {
    let store = MemoryStore::new();
    store
        .set(
            TRANSACTIONS_KEY,
            r#"[{"description":"Paycheck","amount":1000,"inflow":true}]"#,
        )
        .await?;

    let mut service = LedgerService::open(store, RecordingRenderer::default()).await?;
    assert_eq!(service.renderer().renders, 0);

    service.refresh()?;

    let (rendered, summary) = service.renderer().last_render.clone().unwrap();
    assert_eq!(descriptions(&rendered), vec!["Paycheck"]);
    assert_close(summary.balance, 1000.0);
    Ok(())
}
