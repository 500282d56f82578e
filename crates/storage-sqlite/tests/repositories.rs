use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use saver_core::goals::{GoalRepositoryTrait, GoalStatus, NewGoal};
use saver_core::milestones::{Milestone, MilestoneRepositoryTrait, NewMilestone};
use saver_core::transactions::{
    NewTransaction, TransactionRepositoryTrait, TransactionService, TransactionServiceTrait,
};
use saver_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, DbPool, GoalRepository, MilestoneRepository,
    TransactionRepository, WriteHandle,
};
use tempfile::{tempdir, TempDir};

/// Keeps the temp dir alive for as long as the test holds the store.
struct TestStore {
    _dir: TempDir,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TestStore {
    fn goals(&self) -> GoalRepository {
        GoalRepository::new(self.pool.clone(), self.writer.clone())
    }

    fn milestones(&self) -> MilestoneRepository {
        MilestoneRepository::new(self.pool.clone(), self.writer.clone())
    }

    fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.pool.clone(), self.writer.clone())
    }
}

fn open_store() -> TestStore {
    let dir = tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("nested").join("saver.db");
    let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer(&pool).expect("Failed to spawn writer");
    TestStore {
        _dir: dir,
        pool,
        writer,
    }
}

fn new_goal(name: &str, target: f64) -> NewGoal {
    NewGoal {
        id: None,
        name: name.to_string(),
        description: Some("Testing".to_string()),
        target,
        status: GoalStatus::Open,
        is_default: false,
    }
}

fn deposit(amount: f64) -> NewTransaction {
    NewTransaction::new(amount, None, Utc::now())
}

#[tokio::test]
async fn goals_are_scoped_to_their_owner() {
    let store = open_store();
    let goals = store.goals();

    let holiday = goals
        .create_goal_for_user(78, new_goal("Holiday", 100.0))
        .await
        .unwrap()
        .unwrap();
    goals
        .create_goal_for_user(78, new_goal("Car", 250.0))
        .await
        .unwrap();
    goals
        .create_goal_for_user(12, new_goal("House", 540.0))
        .await
        .unwrap();

    assert!(holiday.id > 0);
    assert_eq!(holiday.status, GoalStatus::Open);
    assert_eq!(goals.get_goals().unwrap().len(), 3);
    assert_eq!(goals.get_goals_for_user(78).unwrap().len(), 2);
    assert!(goals.get_goal_for_user(holiday.id, 78).unwrap().is_some());
    assert!(goals.get_goal_for_user(holiday.id, 12).unwrap().is_none());
}

#[tokio::test]
async fn goal_update_keeps_target_and_delete_is_soft() {
    let store = open_store();
    let goals = store.goals();
    let transactions = store.transactions();

    let goal = goals
        .create_goal_for_user(1, new_goal("Bike", 300.0))
        .await
        .unwrap()
        .unwrap();
    transactions
        .create(deposit(40.0), Some(goal.id))
        .await
        .unwrap();

    let mut changed = goal.clone();
    changed.name = "Road bike".to_string();
    changed.target = 9999.0;
    changed.status = GoalStatus::Complete;
    let updated = goals.update_goal(changed).await.unwrap().unwrap();
    assert_eq!(updated.name, "Road bike");
    assert_eq!(updated.target, 300.0);
    assert_eq!(updated.status, GoalStatus::Complete);

    let removed = goals.delete_goal(goal.id).await.unwrap();
    assert_eq!(removed.map(|g| g.id), Some(goal.id));
    assert!(goals.get_goal(goal.id).unwrap().is_none());
    assert!(goals.get_goals_for_user(1).unwrap().is_empty());
    assert!(goals.delete_goal(goal.id).await.unwrap().is_none());

    // The ledger of a deleted goal is kept
    assert_eq!(transactions.get_transactions_for_goal(goal.id).unwrap().len(), 1);
    assert_eq!(transactions.get_transactions_for_user(1).unwrap().len(), 1);
}

#[tokio::test]
async fn missing_rows_are_reported_as_none() {
    let store = open_store();

    assert!(store.goals().get_goal(404).unwrap().is_none());
    assert!(store.milestones().get(404).unwrap().is_none());
    assert!(store.milestones().delete(404).await.unwrap().is_none());
    assert!(store.transactions().get_by_id(404).unwrap().is_none());

    let ghost = Milestone {
        id: 404,
        target: 10.0,
        description: None,
        date_met: None,
    };
    assert!(store.milestones().update(404, ghost).await.unwrap().is_none());
}

#[tokio::test]
async fn milestones_round_trip_and_settle() {
    let store = open_store();
    let goal = store
        .goals()
        .create_goal_for_user(1, new_goal("Holiday", 100.0))
        .await
        .unwrap()
        .unwrap();
    let milestones = store.milestones();

    let batch = (1..=5)
        .map(|i| NewMilestone {
            target: 20.0 * f64::from(i),
            description: Some(format!("Holiday - {}/5 completed!", i)),
        })
        .collect();
    let created = milestones
        .create_multiple_for_goal(batch, goal.id)
        .await
        .unwrap();
    assert_eq!(created.len(), 5);
    assert_eq!(milestones.get_for_goal(goal.id).unwrap().len(), 5);

    let met_at = Utc.with_ymd_and_hms(2020, 5, 17, 10, 30, 0).unwrap();
    let first = created[0].clone();
    let stamped = milestones
        .update(
            first.id,
            Milestone {
                date_met: Some(met_at),
                ..first.clone()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stamped.date_met, Some(met_at));
    assert_eq!(milestones.get(first.id).unwrap().unwrap().date_met, Some(met_at));

    let removed = milestones.delete(created[4].id).await.unwrap().unwrap();
    assert_eq!(removed.target, 100.0);
    assert_eq!(milestones.get_all().unwrap().len(), 4);
}

#[tokio::test]
async fn milestone_for_unknown_goal_is_rejected_by_foreign_key() {
    let store = open_store();
    let result = store
        .milestones()
        .create_for_goal(
            NewMilestone {
                target: 10.0,
                description: None,
            },
            999,
        )
        .await;

    assert!(result.is_err());
    assert!(store.milestones().get_all().unwrap().is_empty());
}

#[tokio::test]
async fn ledger_rows_keep_both_endpoints() {
    let store = open_store();
    let goals = store.goals();
    let a = goals
        .create_goal_for_user(7, new_goal("A", 100.0))
        .await
        .unwrap()
        .unwrap();
    let b = goals
        .create_goal_for_user(7, new_goal("B", 100.0))
        .await
        .unwrap()
        .unwrap();
    let other = goals
        .create_goal_for_user(8, new_goal("Other", 100.0))
        .await
        .unwrap()
        .unwrap();
    let transactions = store.transactions();

    let at = Utc.with_ymd_and_hms(2019, 4, 2, 8, 15, 0).unwrap();
    let posted = transactions
        .create(NewTransaction::new(60.0, None, at), Some(a.id))
        .await
        .unwrap()
        .unwrap();
    transactions
        .create(NewTransaction::new(20.0, Some(a.id), at), Some(b.id))
        .await
        .unwrap();
    transactions
        .create(NewTransaction::new(5.0, Some(b.id), at), None)
        .await
        .unwrap();
    transactions
        .create(deposit(15.0), Some(other.id))
        .await
        .unwrap();

    assert_eq!(posted.target_goal_id, Some(a.id));
    assert_eq!(posted.source_goal_id, None);
    assert_eq!(posted.timestamp, at);
    assert_eq!(transactions.get_by_id(posted.id).unwrap(), Some(posted));

    assert_eq!(transactions.get_transactions_for_goal(a.id).unwrap().len(), 2);
    assert_eq!(transactions.get_transactions_for_goal(b.id).unwrap().len(), 2);
    assert_eq!(transactions.get_transactions_for_user(7).unwrap().len(), 3);
    assert_eq!(transactions.get_transactions_for_user(8).unwrap().len(), 1);
}

#[tokio::test]
async fn deposit_through_the_service_settles_stored_milestones() {
    let store = open_store();
    let goal = store
        .goals()
        .create_goal_for_user(78, new_goal("Holiday", 100.0))
        .await
        .unwrap()
        .unwrap();
    for target in [20.0, 40.0, 60.0] {
        store
            .milestones()
            .create_for_goal(
                NewMilestone {
                    target,
                    description: None,
                },
                goal.id,
            )
            .await
            .unwrap();
    }

    let service = TransactionService::new(
        Arc::new(store.transactions()),
        Arc::new(store.goals()),
        Arc::new(store.milestones()),
    );
    service.deposit(78, 25.0, goal.id).await.unwrap();
    let last = service.deposit(78, 20.0, goal.id).await.unwrap();
    service.withdraw(78, 10.0, goal.id).await.unwrap();

    assert_eq!(service.get_goal_balance(goal.id).unwrap(), dec!(35));
    let met: Vec<f64> = store
        .milestones()
        .get_for_goal(goal.id)
        .unwrap()
        .iter()
        .filter(|m| m.is_met())
        .map(|m| m.target)
        .collect();
    assert_eq!(met, vec![20.0, 40.0]);
    let forty = store
        .milestones()
        .get_for_goal(goal.id)
        .unwrap()
        .into_iter()
        .find(|m| m.target == 40.0)
        .unwrap();
    assert_eq!(forty.date_met, Some(last.timestamp));
}
