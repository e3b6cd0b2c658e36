use std::sync::Arc;

use wallet_verifier::{
	models::{QueuedTransaction, TransactionStatus},
	services::gas::{GasError, TransactionQueue},
};

fn transfer(value: &str) -> QueuedTransaction {
	QueuedTransaction::new(
		"0x1111111111111111111111111111111111111111",
		"0x2222222222222222222222222222222222222222",
		value,
		"0x",
		21_000,
		1_000_000_000,
	)
}

#[test]
fn test_full_queue_frees_a_slot_on_dequeue() {
	let queue = TransactionQueue::new(2);
	let first = queue.enqueue(transfer("1")).unwrap();
	queue.enqueue(transfer("2")).unwrap();

	assert!(matches!(
		queue.enqueue(transfer("3")),
		Err(GasError::QueueFull(2))
	));
	assert_eq!(queue.len(), 2);

	let dequeued = queue.dequeue().unwrap();
	assert_eq!(dequeued.id, first);
	assert_eq!(dequeued.value, "1");
	assert!(queue.enqueue(transfer("3")).is_ok());
	assert_eq!(queue.len(), queue.capacity());
}

#[test]
fn test_transaction_lifecycle() {
	let queue = TransactionQueue::default();
	let id = queue.enqueue(transfer("5")).unwrap();
	assert_eq!(queue.get(&id).unwrap().status, TransactionStatus::Pending);

	let next = queue.dequeue().unwrap();
	queue
		.update_status(&next.id, TransactionStatus::Processing)
		.unwrap();
	let done = queue
		.update_status(&next.id, TransactionStatus::Completed)
		.unwrap();

	assert_eq!(done.status, TransactionStatus::Completed);
	assert!(done.status.is_terminal());
	assert!(matches!(
		queue.update_status(&id, TransactionStatus::Failed),
		Err(GasError::InvalidTransition {
			from: TransactionStatus::Completed,
			to: TransactionStatus::Failed,
			..
		})
	));
}

#[test]
fn test_ids_are_unique() {
	let queue = TransactionQueue::new(50);
	let mut ids: Vec<String> = (0..50)
		.map(|n| queue.enqueue(transfer(&n.to_string())).unwrap())
		.collect();
	ids.sort();
	ids.dedup();
	assert_eq!(ids.len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_producers_respect_capacity() {
	let queue = Arc::new(TransactionQueue::new(10));

	let producers: Vec<_> = (0..40)
		.map(|n| {
			let queue = queue.clone();
			tokio::spawn(async move { queue.enqueue(transfer(&n.to_string())).is_ok() })
		})
		.collect();

	let mut accepted = 0;
	for producer in producers {
		if producer.await.unwrap() {
			accepted += 1;
		}
	}

	assert_eq!(accepted, 10);
	assert_eq!(queue.len(), 10);
	assert_eq!(queue.transactions().len(), 10);
}

#[test]
fn test_resubmitted_transaction_is_rejected() {
	let queue = TransactionQueue::with_history(4, 1);
	let original = transfer("7");
	let id = queue.enqueue(original.clone()).unwrap();
	queue.dequeue().unwrap();
	queue
		.update_status(&id, TransactionStatus::Processing)
		.unwrap();
	queue.update_status(&id, TransactionStatus::Failed).unwrap();

	assert!(matches!(
		queue.enqueue(original.clone()),
		Err(GasError::DuplicateId(_))
	));

	// Once the failed record is pruned the id may be reused
	assert_eq!(queue.prune(), 1);
	assert_eq!(queue.enqueue(original).unwrap(), id);
}
