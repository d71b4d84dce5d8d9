//! Unit tests for the shutdown coordinator

use std::time::Duration;
use storage_api::core::{
    guard_startup, ShutdownCoordinator, ShutdownPhase, ShutdownTrigger, EXIT_FAILURE,
    EXIT_SUCCESS,
};
use storage_api::db::ConnectionManager;
use tokio_test::{assert_pending, assert_ready, task};

use crate::mock_driver::MockDriver;

const URI: &str = "mongodb://localhost:27017/storage-test";

async fn connected(driver: &MockDriver) -> ConnectionManager<MockDriver> {
    let manager = ConnectionManager::new(driver.clone());
    manager.connect(URI).await.unwrap();
    manager
}

#[test]
fn first_trigger_wins() {
    let coordinator = ShutdownCoordinator::new();
    assert_eq!(coordinator.phase(), ShutdownPhase::Running);

    assert!(coordinator.trigger(ShutdownTrigger::Signal("SIGTERM")));
    assert!(!coordinator.trigger(ShutdownTrigger::UncaughtFault("boom".to_string())));
    assert!(!coordinator.trigger(ShutdownTrigger::Signal("SIGINT")));

    assert_eq!(coordinator.cause(), Some(ShutdownTrigger::Signal("SIGTERM")));
    assert_eq!(coordinator.phase(), ShutdownPhase::Draining);
    assert!(coordinator.is_triggered());
}

#[test]
fn triggers_differ_only_in_label() {
    assert_eq!(ShutdownTrigger::Signal("SIGINT").label(), "SIGINT");
    assert_eq!(
        ShutdownTrigger::UncaughtFault("x".into()).label(),
        "Uncaught fault"
    );
    assert_eq!(
        ShutdownTrigger::UnhandledRejection("x".into()).label(),
        "Unhandled rejection"
    );
}

#[test]
fn draining_resolves_once_triggered() {
    let coordinator = ShutdownCoordinator::new();
    let mut draining = task::spawn(coordinator.draining());

    assert_pending!(draining.poll());
    coordinator.trigger(ShutdownTrigger::Signal("SIGINT"));

    assert!(draining.is_woken());
    assert_ready!(draining.poll());
}

#[tokio::test]
async fn drains_listener_before_closing_database() {
    let driver = MockDriver::new();
    let database = connected(&driver).await;
    let journal = driver.journal();
    let coordinator = ShutdownCoordinator::new();

    coordinator.trigger(ShutdownTrigger::Signal("SIGTERM"));
    let drain_journal = journal.clone();
    let drain = async move {
        drain_journal.lock().unwrap().push("drain".to_string());
        Ok::<(), String>(())
    };
    let report = coordinator.run(drain, &database).await;

    assert_eq!(
        *journal.lock().unwrap(),
        vec!["connect", "drain", "disconnect"]
    );
    assert_eq!(report.exit_code, 0);
    assert_eq!(report.trigger, Some(ShutdownTrigger::Signal("SIGTERM")));
    assert_eq!(coordinator.phase(), ShutdownPhase::Exited);
    assert!(!database.is_connected());
}

#[tokio::test]
async fn run_waits_for_a_trigger() {
    let driver = MockDriver::new();
    let database = connected(&driver).await;
    let coordinator = ShutdownCoordinator::new();

    let trigger = coordinator.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.trigger(ShutdownTrigger::UncaughtFault("worker panicked".to_string()));
    });

    let token = coordinator.token();
    let drain = async move {
        token.cancelled().await;
        Ok::<(), String>(())
    };
    let report = coordinator.run(drain, &database).await;

    assert_eq!(
        report.trigger,
        Some(ShutdownTrigger::UncaughtFault("worker panicked".to_string()))
    );
    assert_eq!(report.exit_code, 0);
    assert_eq!(driver.disconnect_calls(), 1);
}

#[tokio::test]
async fn failures_during_shutdown_are_not_fatal() {
    let driver = MockDriver::new().with_failing_disconnect();
    let database = connected(&driver).await;
    let coordinator = ShutdownCoordinator::new();

    coordinator.trigger(ShutdownTrigger::Signal("SIGTERM"));
    let report = coordinator
        .run(async { Err::<(), _>("listener close failed") }, &database)
        .await;

    assert_eq!(report.exit_code, 0);
    assert_eq!(coordinator.phase(), ShutdownPhase::Exited);
    assert_eq!(driver.disconnect_calls(), 1);
}

#[tokio::test]
async fn server_stopping_on_its_own_counts_as_a_trigger() {
    let driver = MockDriver::new();
    let database = connected(&driver).await;
    let coordinator = ShutdownCoordinator::new();

    let report = coordinator
        .run(async { Err::<(), _>("accept loop died") }, &database)
        .await;

    assert!(matches!(
        report.trigger,
        Some(ShutdownTrigger::UnhandledRejection(ref message)) if message.contains("accept loop died")
    ));
    assert_eq!(report.exit_code, 0);
    assert!(!database.is_connected());
}

#[tokio::test]
async fn supervised_task_failure_triggers_shutdown() {
    let coordinator = ShutdownCoordinator::new();
    let task = tokio::spawn(async { Err::<(), _>("queue consumer crashed") });

    coordinator.supervise("consumer", task).await.unwrap();

    assert!(matches!(
        coordinator.cause(),
        Some(ShutdownTrigger::UnhandledRejection(ref message))
            if message == "consumer failed: queue consumer crashed"
    ));
}

#[tokio::test]
async fn supervised_task_success_does_not_trigger() {
    let coordinator = ShutdownCoordinator::new();
    let task = tokio::spawn(async { Ok::<_, String>(()) });

    coordinator.supervise("consumer", task).await.unwrap();

    assert!(!coordinator.is_triggered());
    assert_eq!(coordinator.phase(), ShutdownPhase::Running);
}

async fn startup_that_panics() -> u8 {
    panic!("config loader exploded");
}

#[tokio::test]
async fn panic_during_startup_exits_with_failure() {
    assert_eq!(guard_startup(startup_that_panics()).await, EXIT_FAILURE);
}

#[tokio::test]
async fn startup_exit_code_passes_through() {
    assert_eq!(guard_startup(async { EXIT_SUCCESS }).await, EXIT_SUCCESS);
    assert_eq!(guard_startup(async { EXIT_FAILURE }).await, EXIT_FAILURE);
}
