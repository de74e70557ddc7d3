//! Bounded queue plus worker pool that turns [`CodeDelivery`] jobs into mails.
//!
//! Request handlers enqueue with [`CodeDispatcher::dispatch`] and return at once.
//! Failures never reach the client; they are reported on an error channel that
//! by default ends in the log.

use std::future::Future;
use std::sync::Arc;

use flume::{Receiver, Sender, TrySendError};
use tracing::{debug, error, info, warn};

use crate::domain::repository::CodeDispatcher;
use crate::domain::types::CodeDelivery;
use crate::error::BlogServiceError;
use crate::infra::cache::RedisCodeStore;
use crate::infra::code::RandomCodeGenerator;
use crate::infra::mail::SmtpMailer;
use crate::usecase::verification::DeliverCodeUseCase;

/// Work done for one queued job.
pub trait DeliveryHandler: Send + Sync + 'static {
    fn handle(
        &self,
        job: CodeDelivery,
    ) -> impl Future<Output = Result<(), BlogServiceError>> + Send;
}

impl DeliveryHandler for DeliverCodeUseCase<RedisCodeStore, SmtpMailer, RandomCodeGenerator> {
    fn handle(
        &self,
        job: CodeDelivery,
    ) -> impl Future<Output = Result<(), BlogServiceError>> + Send {
        self.execute(job)
    }
}

/// A job the handler gave up on.
#[derive(Debug)]
pub struct DeliveryFailure {
    pub job: CodeDelivery,
    pub error: BlogServiceError,
}

#[derive(Clone)]
pub struct MailQueue {
    sender: Sender<CodeDelivery>,
}

impl MailQueue {
    /// Spawn `workers` delivery tasks and a task that logs their failures.
    pub fn start<H: DeliveryHandler>(handler: H, workers: usize, capacity: usize) -> Self {
        let (errors, failures) = flume::unbounded();
        tokio::spawn(log_failures(failures));
        Self::start_with_error_sink(handler, workers, capacity, errors)
    }

    /// Like [`MailQueue::start`], but failures go to `errors` instead of the log.
    pub fn start_with_error_sink<H: DeliveryHandler>(
        handler: H,
        workers: usize,
        capacity: usize,
        errors: Sender<DeliveryFailure>,
    ) -> Self {
        let workers = workers.max(1);
        let capacity = capacity.max(1);
        let (sender, receiver) = flume::bounded(capacity);
        let handler = Arc::new(handler);

        for worker_id in 0..workers {
            tokio::spawn(worker_task(
                worker_id,
                receiver.clone(),
                handler.clone(),
                errors.clone(),
            ));
        }

        info!(workers, capacity, "mail delivery workers started");
        Self { sender }
    }

    /// Jobs waiting for a worker.
    pub fn pending(&self) -> usize {
        self.sender.len()
    }
}

impl CodeDispatcher for MailQueue {
    fn dispatch(&self, job: CodeDelivery) {
        match self.sender.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => {
                warn!(purpose = ?job.purpose, "mail queue full, dropping code delivery");
            }
            Err(TrySendError::Disconnected(job)) => {
                warn!(purpose = ?job.purpose, "mail queue closed, dropping code delivery");
            }
        }
    }
}

async fn worker_task<H: DeliveryHandler>(
    worker_id: usize,
    receiver: Receiver<CodeDelivery>,
    handler: Arc<H>,
    errors: Sender<DeliveryFailure>,
) {
    while let Ok(job) = receiver.recv_async().await {
        debug!(worker_id, purpose = ?job.purpose, "delivering code");
        if let Err(error) = handler.handle(job.clone()).await {
            // Receiver gone means nobody is listening; keep draining anyway.
            let _ = errors.send(DeliveryFailure { job, error });
        }
    }
    debug!(worker_id, "mail delivery worker stopped");
}

async fn log_failures(failures: Receiver<DeliveryFailure>) {
    while let Ok(failure) = failures.recv_async().await {
        error!(
            error = ?failure.error,
            purpose = ?failure.job.purpose,
            "code delivery failed"
        );
    }
}
