use async_trait::async_trait;
use process_engine::{
    Process, ProcessContext, ProcessEngine, ProcessFailure, ProcessId, ProcessOptions, RetryPolicy,
    WorkerOptions,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

// --- Test Process ---

/// A minimal approval process: optionally ponder for a while, then wait up to
/// five seconds for a boolean decision signal.
struct Approval;

#[derive(Clone, Debug)]
struct ApprovalRequest {
    name: String,
    /// Sleep before entering the decision wait, to exercise signals recorded
    /// before the wait begins.
    ponder_secs: u64,
    /// Fail the first execution attempt with a retryable error.
    flaky: bool,
}

impl ApprovalRequest {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ponder_secs: 0,
            flaky: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ApprovalError {
    #[error("no decision before timeout")]
    DecisionTimedOut,
    #[error("flaky failure on attempt {0}")]
    Flaky(u32),
}

#[async_trait]
impl Process for Approval {
    type Input = ApprovalRequest;
    type Signal = bool;
    type Output = String;
    type Context = Arc<AtomicU32>;
    type Error = ApprovalError;

    const NAME: &'static str = "approval";

    fn process_id(input: &ApprovalRequest) -> ProcessId {
        ProcessId::new(format!("approval-{}", input.name))
    }

    fn options() -> ProcessOptions {
        ProcessOptions {
            start_to_close: Duration::from_secs(60),
            task_timeout: Duration::from_secs(10),
            retry: RetryPolicy {
                initial_backoff: Duration::from_secs(1),
                max_backoff: Duration::from_secs(3),
                max_attempts: 2,
            },
        }
    }

    fn retryable(error: &ApprovalError) -> bool {
        matches!(error, ApprovalError::Flaky(_))
    }

    async fn execute(
        ctx: &ProcessContext<Self>,
        input: ApprovalRequest,
    ) -> Result<String, ApprovalError> {
        let attempt = ctx.deps().fetch_add(1, Ordering::SeqCst) + 1;
        if input.flaky && attempt == 1 {
            return Err(ApprovalError::Flaky(attempt));
        }

        if input.ponder_secs > 0 {
            ctx.sleep(Duration::from_secs(input.ponder_secs)).await;
        }

        match ctx.wait_signal(Duration::from_secs(5)).await {
            Some(true) => Ok(format!("{} approved", input.name)),
            Some(false) => Ok(format!("{} denied", input.name)),
            None => Err(ApprovalError::DecisionTimedOut),
        }
    }
}

fn start_worker() -> (process_engine::ProcessClient<Approval>, Arc<AtomicU32>) {
    let executions = Arc::new(AtomicU32::new(0));
    let (engine, client) = ProcessEngine::<Approval>::new(WorkerOptions::default());
    tokio::spawn(engine.run(executions.clone()));
    (client, executions)
}

// --- Tests ---

#[tokio::test(start_paused = true)]
async fn signal_resolves_the_decision_wait() {
    let (client, _) = start_worker();

    let request = ApprovalRequest::named("expense");
    let id = Approval::process_id(&request);
    let completion = client.start(request).await.unwrap();
    client.signal(id, true).await.unwrap();

    let outcome = completion.wait().await.unwrap();
    assert_eq!(outcome, "expense approved");
}

#[tokio::test(start_paused = true)]
async fn signal_recorded_before_the_wait_begins_is_observed() {
    let (client, _) = start_worker();

    // The instance ponders for 10s; the signal arrives during that sleep,
    // well before the decision wait starts, and must still be observed.
    let request = ApprovalRequest {
        ponder_secs: 10,
        ..ApprovalRequest::named("early")
    };
    let id = Approval::process_id(&request);
    let completion = client.start(request).await.unwrap();
    client.signal(id, false).await.unwrap();

    let outcome = completion.wait().await.unwrap();
    assert_eq!(outcome, "early denied");
}

#[tokio::test(start_paused = true)]
async fn duplicate_signal_does_not_overwrite_the_decision() {
    let (client, _) = start_worker();

    let request = ApprovalRequest::named("dup");
    let id = Approval::process_id(&request);
    let completion = client.start(request).await.unwrap();

    client.signal(id.clone(), true).await.unwrap();
    client.signal(id, false).await.unwrap();

    let outcome = completion.wait().await.unwrap();
    assert_eq!(outcome, "dup approved", "first recorded decision must stand");
}

#[tokio::test(start_paused = true)]
async fn wait_times_out_without_a_signal_and_is_not_retried() {
    let (client, executions) = start_worker();

    let outcome = client.run(ApprovalRequest::named("silent")).await;
    match outcome {
        Err(ProcessFailure::Failed { message, .. }) => {
            assert!(message.contains("no decision before timeout"), "{message}")
        }
        other => panic!("expected fatal failure, got {other:?}"),
    }

    // A deterministic failure must not go through the retry policy.
    assert_eq!(executions.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn second_start_for_the_same_id_attaches_to_the_existing_instance() {
    let (client, executions) = start_worker();

    let request = ApprovalRequest::named("shared");
    let id = Approval::process_id(&request);

    let first = client.start(request.clone()).await.unwrap();
    let second = client.start(request).await.unwrap();
    client.signal(id, true).await.unwrap();

    let a = first.wait().await.unwrap();
    let b = second.wait().await.unwrap();
    assert_eq!(a, "shared approved");
    assert_eq!(b, "shared approved");
    assert_eq!(
        executions.load(Ordering::SeqCst),
        1,
        "one instance must serve both callers"
    );
}

#[tokio::test(start_paused = true)]
async fn retryable_failure_is_re_executed_under_the_process_policy() {
    let (client, executions) = start_worker();

    let request = ApprovalRequest {
        flaky: true,
        ..ApprovalRequest::named("flaky")
    };
    let id = Approval::process_id(&request);
    let completion = client.start(request).await.unwrap();
    client.signal(id, true).await.unwrap();

    let outcome = completion.wait().await.unwrap();
    assert_eq!(outcome, "flaky approved");
    assert_eq!(executions.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn completed_instances_keep_their_outcome_for_late_callers() {
    let (client, executions) = start_worker();

    let request = ApprovalRequest::named("late");
    let id = Approval::process_id(&request);
    let completion = client.start(request.clone()).await.unwrap();
    client.signal(id, false).await.unwrap();
    assert_eq!(completion.wait().await.unwrap(), "late denied");

    // Starting again after completion returns the settled outcome.
    let replay = client.run(request).await.unwrap();
    assert_eq!(replay, "late denied");
    assert_eq!(executions.load(Ordering::SeqCst), 1);
}
