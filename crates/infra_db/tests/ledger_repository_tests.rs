//! PostgreSQL integration tests for the ledger repository
//!
//! These tests run against a real PostgreSQL instance in a testcontainer
//! and are ignored by default; run them with `cargo test -- --ignored`
//! when Docker is available.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use core_kernel::{AccountId, DependentId, Money};
use domain_ledger::{
    AccountKind, DepositOutcome, DepositProcessor, LedgerStore, StoreError, TransactionKind,
    TransactionReader,
};
use infra_db::LedgerRepository;
use test_utils::database::get_shared_test_database;

static NEXT_DEPENDENT: AtomicI64 = AtomicI64::new(1);

fn next_dependent() -> DependentId {
    DependentId::new(NEXT_DEPENDENT.fetch_add(1, Ordering::Relaxed))
}

async fn repository() -> LedgerRepository {
    let db = get_shared_test_database().await;
    LedgerRepository::new(db.pool().clone())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_open_accounts_provisions_checking_and_savings() {
    let repo = repository().await;
    let dependent = next_dependent();

    let accounts = repo.open_accounts(dependent).await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].kind, AccountKind::Checking);
    assert_eq!(accounts[1].kind, AccountKind::Savings);
    assert!(accounts.iter().all(|a| a.balance.is_zero()));

    let second = repo.open_accounts(dependent).await;
    assert!(matches!(second, Err(StoreError::AlreadyExists(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_account_misses_unknown_id() {
    let repo = repository().await;
    let found = repo.find_account(AccountId::new(i64::MAX)).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_deposit_commits_transaction_and_balance_together() {
    let repo = repository().await;
    let accounts = repo.open_accounts(next_dependent()).await.unwrap();
    let account_id = accounts[0].id;
    let key = test_utils::fixtures::StringFixtures::idempotency_key();

    let outcome = repo
        .apply_deposit(
            account_id,
            Money::from_minor(500),
            TransactionKind::Deposit,
            &key,
        )
        .await
        .unwrap();

    match outcome {
        DepositOutcome::Applied {
            balance,
            transaction,
        } => {
            assert_eq!(balance.minor_units(), 500);
            assert_eq!(transaction.account_id, account_id);
            assert_eq!(transaction.idempotency_key, key);
        }
        DepositOutcome::Replayed { .. } => panic!("first application must not replay"),
    }

    let account = repo.find_account(account_id).await.unwrap().unwrap();
    assert_eq!(account.balance.minor_units(), 500);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_key_replays_without_second_row() {
    let repo = repository().await;
    let accounts = repo.open_accounts(next_dependent()).await.unwrap();
    let account_id = accounts[0].id;
    let key = test_utils::fixtures::StringFixtures::idempotency_key();

    repo.apply_deposit(
        account_id,
        Money::from_minor(500),
        TransactionKind::Deposit,
        &key,
    )
    .await
    .unwrap();

    let replay = repo
        .apply_deposit(
            account_id,
            Money::from_minor(500),
            TransactionKind::Deposit,
            &key,
        )
        .await
        .unwrap();

    assert!(matches!(
        replay,
        DepositOutcome::Replayed { balance, .. } if balance.minor_units() == 500
    ));

    let page = repo.transactions_before(account_id, None, 10).await.unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_deposits_serialize_on_the_account_row() {
    let repo = Arc::new(repository().await);
    let accounts = repo.open_accounts(next_dependent()).await.unwrap();
    let account_id = accounts[0].id;
    let processor = DepositProcessor::new(repo.clone());

    const WRITERS: usize = 20;
    const AMOUNT: i64 = 100;

    let mut handles = Vec::with_capacity(WRITERS);
    for _ in 0..WRITERS {
        let processor = processor.clone();
        let key = test_utils::fixtures::StringFixtures::idempotency_key();
        handles.push(tokio::spawn(async move {
            processor.deposit(account_id, AMOUNT, &key).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let account = repo.find_account(account_id).await.unwrap().unwrap();
    assert_eq!(account.balance.minor_units(), WRITERS as i64 * AMOUNT);

    let rows = repo.transactions_before(account_id, None, 100).await.unwrap();
    assert_eq!(rows.len(), WRITERS);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_keyset_pagination_walks_history_newest_first() {
    let repo = Arc::new(repository().await);
    let accounts = repo.open_accounts(next_dependent()).await.unwrap();
    let account_id = accounts[0].id;
    let processor = DepositProcessor::new(repo.clone());
    let reader = TransactionReader::new(repo.clone());

    for i in 0..9 {
        let key = format!("page-test-{}-{}", account_id, i);
        processor.deposit(account_id, 100, &key).await.unwrap();
    }

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = reader
            .list(account_id, Some(4), cursor.as_deref())
            .await
            .unwrap();
        test_utils::assertions::assert_page_descending(&page.transactions);
        seen.extend(page.transactions.iter().map(|t| t.id.value()));
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(seen.len(), 9);
    let mut deduped = seen.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), 9);
}
